//! Recovery error metrics.
//!
//! # Scaled error
//!
//! ```text
//! e(Â, A) = ‖Â − A‖_F / ‖A‖_F
//! ```
//!
//! Used both on correlation matrices and on continuous data columns. It is
//! zero exactly when `Â = A`, and not symmetric in its arguments.
//!
//! # SMAE
//!
//! For column `j`, over the rows `M_j` masked in that column:
//!
//! ```text
//! smae_j = Σ_{i∈M_j} |x̂_ij − x_ij| / Σ_{i∈M_j} |med_j − x_ij|
//! ```
//!
//! where `med_j` is the median of the observed (unmasked) entries of column
//! `j`. A value below 1 means the imputer beats filling with the observed
//! median. The metric is undefined (`None`) when the column has no masked
//! entries, no observed entries, or a zero denominator.

use log::warn;

use crate::error::{EvalError, Result};
use crate::masking::MaskedMatrix;
use crate::schema::{ColumnKind, ColumnSchema};
use crate::stats;
use crate::types::{shape_of, DMatrix};

fn check_same_shape(estimate: &DMatrix, truth: &DMatrix) -> Result<()> {
    if estimate.shape() != truth.shape() {
        return Err(EvalError::dimension_mismatch(
            shape_of(truth),
            shape_of(estimate),
        ));
    }
    Ok(())
}

/// Relative Frobenius error of `estimate` against `truth`.
///
/// Fails when the shapes differ, when `truth` has zero norm, or when either
/// matrix holds non-finite values.
pub fn scaled_error(estimate: &DMatrix, truth: &DMatrix) -> Result<f64> {
    check_same_shape(estimate, truth)?;
    if estimate.iter().chain(truth.iter()).any(|v| !v.is_finite()) {
        return Err(EvalError::undefined_metric(
            "scaled_error",
            "inputs contain non-finite values",
        ));
    }
    let reference = truth.norm();
    if reference <= 0.0 {
        return Err(EvalError::undefined_metric(
            "scaled_error",
            "reference matrix has zero norm",
        ));
    }
    Ok((estimate - truth).norm() / reference)
}

/// Per-column SMAE over masked positions. `None` marks an undefined column.
pub fn smae(imputed: &DMatrix, truth: &DMatrix, masked: &MaskedMatrix) -> Result<Vec<Option<f64>>> {
    check_same_shape(imputed, truth)?;
    check_same_shape(masked.values(), truth)?;

    let mut errors = Vec::with_capacity(truth.ncols());
    for j in 0..truth.ncols() {
        let rows = masked.indices().rows_in_column(j);
        let median = stats::median(&masked.observed_column(j));
        let value = match median {
            Some(median) if !rows.is_empty() => {
                let (num, den) = rows.iter().fold((0.0, 0.0), |(num, den), &i| {
                    let t = truth[(i, j)];
                    (num + (imputed[(i, j)] - t).abs(), den + (median - t).abs())
                });
                if den > 0.0 && num.is_finite() {
                    Some(num / den)
                } else {
                    None
                }
            }
            _ => None,
        };
        if value.is_none() {
            warn!("SMAE undefined for column {j}");
        }
        errors.push(value);
    }
    Ok(errors)
}

/// Scaled error of each continuous column of `imputed` against `truth`,
/// in schema order.
pub fn continuous_scaled_errors(
    imputed: &DMatrix,
    truth: &DMatrix,
    schema: &ColumnSchema,
) -> Result<Vec<f64>> {
    check_same_shape(imputed, truth)?;
    schema.check_columns(truth.ncols())?;
    schema
        .indices_of(ColumnKind::Continuous)
        .into_iter()
        .map(|j| {
            let estimate = imputed.columns(j, 1).into_owned();
            let reference = truth.columns(j, 1).into_owned();
            scaled_error(&estimate, &reference)
        })
        .collect()
}
