//! Missing-completely-at-random masking.
//!
//! Every entry is masked independently with probability `p`; the number of
//! masked entries is binomial, not a fixed quota. Rows or columns may end up
//! fully masked and downstream code has to cope with that.

use log::debug;

use crate::error::{EvalError, Result};
use crate::rng::RandomSource;
use crate::types::{is_missing, DMatrix, MISSING};

/// Coordinates of the masked entries of one matrix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaskIndices {
    nrows: usize,
    ncols: usize,
    positions: Vec<(usize, usize)>,
}

impl MaskIndices {
    /// Builds a mask from explicit `(row, column)` positions.
    pub fn from_positions(
        nrows: usize,
        ncols: usize,
        positions: Vec<(usize, usize)>,
    ) -> Result<Self> {
        if let Some(&(i, j)) = positions.iter().find(|&&(i, j)| i >= nrows || j >= ncols) {
            return Err(EvalError::dimension_mismatch(
                format!("position inside {nrows}x{ncols}"),
                format!("({i}, {j})"),
            ));
        }
        Ok(Self {
            nrows,
            ncols,
            positions,
        })
    }

    /// Masked positions in row-major visit order.
    pub fn positions(&self) -> &[(usize, usize)] {
        &self.positions
    }

    /// Number of masked entries.
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// Whether nothing is masked.
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Fraction of all entries that are masked.
    pub fn fraction(&self) -> f64 {
        let total = self.nrows * self.ncols;
        if total == 0 {
            0.0
        } else {
            self.len() as f64 / total as f64
        }
    }

    /// Masked rows of column `j`, ascending.
    pub fn rows_in_column(&self, j: usize) -> Vec<usize> {
        self.positions
            .iter()
            .filter(|&&(_, c)| c == j)
            .map(|&(i, _)| i)
            .collect()
    }

    /// Shape of the masked matrix.
    pub fn shape(&self) -> (usize, usize) {
        (self.nrows, self.ncols)
    }
}

/// A data matrix with some entries replaced by [`MISSING`], plus the exact
/// set of replaced coordinates.
#[derive(Debug, Clone)]
pub struct MaskedMatrix {
    values: DMatrix,
    indices: MaskIndices,
}

impl MaskedMatrix {
    /// Replaces the entries of `data` listed in `indices` with [`MISSING`].
    pub fn from_indices(data: &DMatrix, indices: MaskIndices) -> Result<Self> {
        if indices.shape() != data.shape() {
            return Err(EvalError::dimension_mismatch(
                format!("{}x{}", data.nrows(), data.ncols()),
                format!("{}x{}", indices.nrows, indices.ncols),
            ));
        }
        let mut values = data.clone();
        for &(i, j) in indices.positions() {
            values[(i, j)] = MISSING;
        }
        Ok(Self { values, indices })
    }

    /// The matrix with missing entries.
    pub fn values(&self) -> &DMatrix {
        &self.values
    }

    /// The masked coordinates.
    pub fn indices(&self) -> &MaskIndices {
        &self.indices
    }

    /// Number of rows.
    pub fn nrows(&self) -> usize {
        self.values.nrows()
    }

    /// Number of columns.
    pub fn ncols(&self) -> usize {
        self.values.ncols()
    }

    /// Whether entry `(i, j)` is missing.
    pub fn is_missing(&self, i: usize, j: usize) -> bool {
        is_missing(self.values[(i, j)])
    }

    /// Non-missing values of column `j`, in row order.
    pub fn observed_column(&self, j: usize) -> Vec<f64> {
        self.values
            .column(j)
            .iter()
            .copied()
            .filter(|v| !is_missing(*v))
            .collect()
    }
}

/// Masks entries independently with a fixed probability.
#[derive(Debug, Clone, Copy)]
pub struct MissingnessMasker {
    fraction: f64,
}

impl MissingnessMasker {
    /// Creates a masker for a fraction in `(0, 1)`.
    pub fn new(fraction: f64) -> Result<Self> {
        if !(fraction > 0.0 && fraction < 1.0) {
            return Err(EvalError::invalid_configuration(
                "mask_fraction",
                format!("must lie in (0, 1), got {fraction}"),
            ));
        }
        Ok(Self { fraction })
    }

    /// Masking probability.
    pub fn fraction(&self) -> f64 {
        self.fraction
    }

    /// Masks `data`, visiting entries row by row and drawing one uniform per
    /// entry; an entry is masked when its draw is below the fraction.
    pub fn apply(&self, data: &DMatrix, rng: &mut RandomSource) -> Result<MaskedMatrix> {
        let (nrows, ncols) = data.shape();
        let mut positions = Vec::new();
        for i in 0..nrows {
            for j in 0..ncols {
                if rng.uniform() < self.fraction {
                    positions.push((i, j));
                }
            }
        }
        let indices = MaskIndices::from_positions(nrows, ncols, positions)?;
        debug!(
            "masked {} of {} entries ({:.4})",
            indices.len(),
            nrows * ncols,
            indices.fraction()
        );
        MaskedMatrix::from_indices(data, indices)
    }
}
