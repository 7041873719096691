//! Random correlation matrices.
//!
//! # Construction
//!
//! For a dimension `d` the synthesizer draws `W ∈ ℝ^{d×d}` with independent
//! standard normal entries and forms the Gram matrix
//!
//! ```text
//! C  = W Wᵀ                        (positive semi-definite)
//! C' = D^{-1/2} C D^{-1/2},  D = diag(C)
//! ```
//!
//! The rescaling is a congruence, so `C'` stays positive semi-definite while
//! its diagonal becomes one. The diagonal is then written as exactly `1.0`
//! and the matrix symmetrised, so the unit-diagonal invariant holds without
//! rounding error.

use log::debug;

use crate::error::{EvalError, Result};
use crate::rng::RandomSource;
use crate::types::{constants, shape_of, DMatrix};

/// A symmetric positive semi-definite matrix with unit diagonal.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CorrelationMatrix {
    matrix: DMatrix,
}

impl CorrelationMatrix {
    /// Wraps a matrix after checking shape, symmetry and unit diagonal.
    ///
    /// Positive semi-definiteness is not checked here; see
    /// [`CorrelationMatrix::min_eigenvalue`].
    pub fn new(matrix: DMatrix) -> Result<Self> {
        if !matrix.is_square() || matrix.nrows() == 0 {
            return Err(EvalError::dimension_mismatch(
                "non-empty square matrix",
                shape_of(&matrix),
            ));
        }
        let tol = constants::CORRELATION_TOLERANCE;
        let d = matrix.nrows();
        for i in 0..d {
            if (matrix[(i, i)] - 1.0).abs() > tol {
                return Err(EvalError::numerical_error(format!(
                    "diagonal entry {i} is {}, expected 1",
                    matrix[(i, i)]
                )));
            }
            for j in (i + 1)..d {
                if (matrix[(i, j)] - matrix[(j, i)]).abs() > tol {
                    return Err(EvalError::numerical_error(format!(
                        "matrix is not symmetric at ({i}, {j})"
                    )));
                }
            }
        }
        Ok(Self { matrix })
    }

    /// Identity correlation (independent variables).
    pub fn identity(dim: usize) -> Self {
        Self {
            matrix: DMatrix::identity(dim, dim),
        }
    }

    /// Number of variables.
    #[inline]
    pub fn dim(&self) -> usize {
        self.matrix.nrows()
    }

    /// Underlying matrix.
    #[inline]
    pub fn as_matrix(&self) -> &DMatrix {
        &self.matrix
    }

    /// Consumes the wrapper and returns the matrix.
    pub fn into_inner(self) -> DMatrix {
        self.matrix
    }

    /// Smallest eigenvalue; non-negative up to rounding for a valid matrix.
    pub fn min_eigenvalue(&self) -> f64 {
        self.matrix.clone().symmetric_eigenvalues().min()
    }
}

/// Rescales a covariance matrix to unit diagonal.
///
/// Fails with [`EvalError::DegenerateDraw`] when a diagonal entry is zero,
/// negative or not finite, since `1/sqrt(c_ii)` is then undefined.
pub fn normalize_covariance(covariance: &DMatrix) -> Result<CorrelationMatrix> {
    if !covariance.is_square() || covariance.nrows() == 0 {
        return Err(EvalError::dimension_mismatch(
            "non-empty square matrix",
            shape_of(covariance),
        ));
    }
    let d = covariance.nrows();
    let mut inv_sqrt = Vec::with_capacity(d);
    for i in 0..d {
        let c = covariance[(i, i)];
        if !c.is_finite() || c <= 0.0 {
            return Err(EvalError::degenerate_draw(format!(
                "diagonal entry {i} of the Gram matrix is {c}"
            )));
        }
        inv_sqrt.push(c.sqrt().recip());
    }

    let mut matrix = DMatrix::from_fn(d, d, |i, j| {
        inv_sqrt[i] * covariance[(i, j)] * inv_sqrt[j]
    });
    for i in 0..d {
        matrix[(i, i)] = 1.0;
        for j in (i + 1)..d {
            let avg = 0.5 * (matrix[(i, j)] + matrix[(j, i)]);
            matrix[(i, j)] = avg;
            matrix[(j, i)] = avg;
        }
    }
    Ok(CorrelationMatrix { matrix })
}

/// Draws random correlation matrices of a fixed dimension.
#[derive(Debug, Clone, Copy)]
pub struct CorrelationSynthesizer {
    dim: usize,
}

impl CorrelationSynthesizer {
    /// Creates a synthesizer for `dim x dim` matrices.
    pub fn new(dim: usize) -> Result<Self> {
        if dim == 0 {
            return Err(EvalError::invalid_configuration(
                "dimension",
                "correlation dimension must be at least 1",
            ));
        }
        Ok(Self { dim })
    }

    /// Matrix dimension.
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Draws one correlation matrix from the Gram construction.
    pub fn sample(&self, rng: &mut RandomSource) -> Result<CorrelationMatrix> {
        let w = rng.standard_normal_matrix(self.dim, self.dim);
        let gram = &w * w.transpose();
        let correlation = normalize_covariance(&gram)?;
        debug!(
            "sampled {}x{} correlation matrix (seed {})",
            self.dim,
            self.dim,
            rng.seed()
        );
        Ok(correlation)
    }
}
