//! Imputer interface and a marginal baseline.
//!
//! An [`Imputer`] receives a matrix whose missing entries hold the
//! [`MISSING`](crate::types::MISSING) sentinel and returns a completed matrix
//! together with its estimate of the latent correlation matrix. The harness
//! treats the algorithm as a black box; it only checks the shapes of what
//! comes back (see [`ImputationResult::validate`]).

use log::{debug, warn};

use crate::error::{EvalError, Result};
use crate::schema::{ColumnKind, ColumnSchema};
use crate::stats;
use crate::types::{is_missing, shape_of, DMatrix};

/// Output of an imputer.
#[derive(Debug, Clone)]
pub struct ImputationResult {
    /// Input matrix with every missing entry filled
    pub imputed: DMatrix,
    /// Estimated correlation matrix of the latent variables
    pub correlation: DMatrix,
}

impl ImputationResult {
    /// Checks the result against the shape of the imputer input.
    ///
    /// The imputed matrix must be `nrows x ncols` with no missing entries,
    /// and the correlation estimate `ncols x ncols`.
    pub fn validate(&self, nrows: usize, ncols: usize) -> Result<()> {
        if self.imputed.shape() != (nrows, ncols) {
            return Err(EvalError::dimension_mismatch(
                format!("{nrows}x{ncols} imputed matrix"),
                shape_of(&self.imputed),
            ));
        }
        if self.correlation.shape() != (ncols, ncols) {
            return Err(EvalError::dimension_mismatch(
                format!("{ncols}x{ncols} correlation matrix"),
                shape_of(&self.correlation),
            ));
        }
        let unfilled = self.imputed.iter().filter(|v| is_missing(**v)).count();
        if unfilled > 0 {
            return Err(EvalError::imputation(format!(
                "{unfilled} entries are still missing after imputation"
            )));
        }
        Ok(())
    }
}

/// A missing-value imputation algorithm.
pub trait Imputer {
    /// Short name used in reports.
    fn name(&self) -> &str;

    /// Fills the missing entries of `data` and estimates the latent
    /// correlation. `threshold` is the algorithm's convergence tolerance.
    fn impute(&mut self, data: &DMatrix, threshold: f64) -> Result<ImputationResult>;
}

/// Single-pass baseline imputer.
///
/// Missing continuous entries get the observed column median; missing binary
/// and ordinal entries get the observed mode (smallest value on ties). The
/// correlation estimate uses pairwise-complete Spearman correlations mapped
/// to the Gaussian scale with `r = 2 sin(π ρ_s / 6)`. The method does not
/// iterate, so the threshold is never consulted.
#[derive(Debug, Clone)]
pub struct MarginalImputer {
    schema: ColumnSchema,
}

impl MarginalImputer {
    /// Creates a baseline imputer for data laid out as `schema`.
    pub fn new(schema: ColumnSchema) -> Self {
        Self { schema }
    }

    fn fill_value(kind: ColumnKind, observed: &[f64]) -> Option<f64> {
        if kind.is_discrete() {
            mode(observed)
        } else {
            stats::median(observed)
        }
    }
}

impl Imputer for MarginalImputer {
    fn name(&self) -> &str {
        "marginal"
    }

    fn impute(&mut self, data: &DMatrix, _threshold: f64) -> Result<ImputationResult> {
        self.schema.check_columns(data.ncols())?;
        let ncols = data.ncols();

        let columns: Vec<Vec<f64>> = (0..ncols)
            .map(|j| data.column(j).iter().copied().collect())
            .collect();

        let mut imputed = data.clone();
        for (j, column) in columns.iter().enumerate() {
            let observed: Vec<f64> = column.iter().copied().filter(|v| !is_missing(*v)).collect();
            let fill = Self::fill_value(self.schema.kind(j), &observed).unwrap_or_else(|| {
                warn!("column {j} has no observed entries, filling with 0");
                0.0
            });
            for v in imputed.column_mut(j).iter_mut() {
                if is_missing(*v) {
                    *v = fill;
                }
            }
        }

        // Ranks are recomputed per pair since the pairwise-complete rows
        // differ from pair to pair: O(D² N log N), fine for a few dozen columns.
        let mut correlation = DMatrix::identity(ncols, ncols);
        for a in 0..ncols {
            for b in (a + 1)..ncols {
                let (x, y): (Vec<f64>, Vec<f64>) = columns[a]
                    .iter()
                    .zip(&columns[b])
                    .filter(|(x, y)| !is_missing(**x) && !is_missing(**y))
                    .map(|(x, y)| (*x, *y))
                    .unzip();
                let r = stats::spearman(&x, &y)
                    .map_or(0.0, |rho| 2.0 * (std::f64::consts::PI * rho / 6.0).sin());
                correlation[(a, b)] = r;
                correlation[(b, a)] = r;
            }
        }
        debug!("{} imputer filled {}x{} matrix", self.name(), data.nrows(), ncols);

        Ok(ImputationResult {
            imputed,
            correlation,
        })
    }
}

/// Most frequent value, smallest on ties.
fn mode(values: &[f64]) -> Option<f64> {
    let sorted = stats::sorted(values);
    let mut best: Option<(f64, usize)> = None;
    let mut start = 0;
    while start < sorted.len() {
        let mut end = start + 1;
        while end < sorted.len() && sorted[end] == sorted[start] {
            end += 1;
        }
        let count = end - start;
        if best.map_or(true, |(_, c)| count > c) {
            best = Some((sorted[start], count));
        }
        start = end;
    }
    best.map(|(v, _)| v)
}
