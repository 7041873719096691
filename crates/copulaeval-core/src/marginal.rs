//! Marginal transforms of latent Gaussian columns.
//!
//! Each column of a latent `N(0, Σ)` matrix is mapped independently to its
//! target marginal by a monotone function, so the rank dependence (the
//! Gaussian copula) between columns is preserved:
//!
//! - continuous: `x ↦ F⁻¹_Exp(Φ(x))`, an exponential with the configured scale
//! - binary: `x ↦ 1[x > c]` for a cutoff `c` chosen by [`BinaryCutoff`]
//! - ordinal: number of empirical `j/k` quantiles strictly below `x`

use log::{debug, warn};
use statrs::distribution::{ContinuousCDF, Normal};

use crate::config::{BinaryCutoff, GeneratorConfig};
use crate::error::{EvalError, Result};
use crate::rng::RandomSource;
use crate::schema::{ColumnKind, ColumnSchema};
use crate::stats;
use crate::types::{shape_of, DMatrix, DVector};

/// Random cutoff draws tried before falling back to the median.
const MAX_CUTOFF_DRAWS: usize = 1000;

/// Largest probability fed to the exponential quantile. `Φ(x)` rounds to 1
/// for `x ≳ 8.3`, where the quantile would be infinite.
const MAX_PROBABILITY: f64 = 1.0 - f64::EPSILON;

/// Maps a standard normal column to an exponential marginal of mean `scale`.
///
/// Every output is finite and non-negative.
pub fn exponential_from_normal(column: &[f64], scale: f64) -> Result<Vec<f64>> {
    let normal = Normal::new(0.0, 1.0)
        .map_err(|e| EvalError::invalid_configuration("normal", e.to_string()))?;
    if !(scale.is_finite() && scale > 0.0) {
        return Err(EvalError::invalid_configuration(
            "exponential_scale",
            format!("must be positive, got {scale}"),
        ));
    }
    // F⁻¹(u) = -scale · ln(1 - u)
    Ok(column
        .iter()
        .map(|&x| {
            let u = normal.cdf(x).clamp(0.0, MAX_PROBABILITY);
            (-scale * (-u).ln_1p()).max(0.0)
        })
        .collect())
}

/// Thresholds a column into `{0, 1}`: 1 where the value exceeds the cutoff.
pub fn binarize(column: &[f64], cutoff: BinaryCutoff, rng: &mut RandomSource) -> Result<Vec<f64>> {
    let c = binary_threshold(column, cutoff, rng)?;
    Ok(column
        .iter()
        .map(|&x| if x > c { 1.0 } else { 0.0 })
        .collect())
}

/// Picks the binary threshold for a column.
pub fn binary_threshold(
    column: &[f64],
    cutoff: BinaryCutoff,
    rng: &mut RandomSource,
) -> Result<f64> {
    let median = stats::median(column)
        .ok_or_else(|| EvalError::invalid_configuration("rows", "cannot binarize an empty column"))?;

    match cutoff {
        BinaryCutoff::Median => Ok(median),
        BinaryCutoff::RandomBalanced { min_fraction } => {
            let n = column.len() as f64;
            let lower = min_fraction * n;
            let upper = (1.0 - min_fraction) * n;
            for _ in 0..MAX_CUTOFF_DRAWS {
                let c = column[rng.index(column.len())];
                let below = column.iter().filter(|&&x| x < c).count() as f64;
                if below > lower && below < upper {
                    return Ok(c);
                }
            }
            warn!(
                "no balanced binary cutoff after {MAX_CUTOFF_DRAWS} draws, using the median"
            );
            Ok(median)
        }
    }
}

/// Discretises a column into `levels` ordered categories by quantile binning.
///
/// Output values are integers in `[0, levels - 1]`, non-decreasing in the
/// input.
pub fn ordinalize(column: &[f64], levels: usize) -> Result<Vec<f64>> {
    if levels < 2 {
        return Err(EvalError::invalid_configuration(
            "ordinal_levels",
            format!("need at least 2 levels, got {levels}"),
        ));
    }
    let sorted = stats::sorted(column);
    let cutoffs: Vec<f64> = (1..levels)
        .filter_map(|j| stats::quantile_sorted(&sorted, j as f64 / levels as f64))
        .collect();
    Ok(column
        .iter()
        .map(|&x| cutoffs.iter().filter(|&&c| x > c).count() as f64)
        .collect())
}

/// Applies the per-kind marginal transforms of a generator configuration.
#[derive(Debug, Clone)]
pub struct MarginalTransformer {
    schema: ColumnSchema,
    exponential_scale: f64,
    ordinal_levels: usize,
    binary_cutoff: BinaryCutoff,
}

impl MarginalTransformer {
    /// Builds a transformer from a validated generator configuration.
    pub fn new(config: &GeneratorConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            schema: config.schema.clone(),
            exponential_scale: config.exponential_scale,
            ordinal_levels: config.ordinal_levels,
            binary_cutoff: config.binary_cutoff,
        })
    }

    /// Column schema the transformer expects.
    pub fn schema(&self) -> &ColumnSchema {
        &self.schema
    }

    /// Transforms every column of `latent` according to its kind.
    ///
    /// Columns are processed left to right; binary columns with a random
    /// cutoff consume draws from `rng` in that order.
    pub fn apply(&self, latent: &DMatrix, rng: &mut RandomSource) -> Result<DMatrix> {
        self.schema.check_columns(latent.ncols())?;
        if latent.nrows() == 0 {
            return Err(EvalError::dimension_mismatch(
                "at least one row",
                shape_of(latent),
            ));
        }

        let mut out = latent.clone();
        for (j, kind) in self.schema.kinds().iter().enumerate() {
            let column: Vec<f64> = latent.column(j).iter().copied().collect();
            let transformed = match kind {
                ColumnKind::Continuous => {
                    exponential_from_normal(&column, self.exponential_scale)?
                }
                ColumnKind::Binary => binarize(&column, self.binary_cutoff, rng)?,
                ColumnKind::Ordinal => ordinalize(&column, self.ordinal_levels)?,
            };
            out.set_column(j, &DVector::from_vec(transformed));
        }
        debug!(
            "transformed {} latent columns to mixed marginals",
            latent.ncols()
        );
        Ok(out)
    }
}
