//! Seedable random source.
//!
//! Every random draw of a trial goes through one [`RandomSource`] owned by the
//! caller. Reseeding with the same integer reproduces the same stream on every
//! platform: the generator is ChaCha8, whose output is fixed by its
//! specification rather than by the `rand` version in use.

use log::warn;
use nalgebra::{Cholesky, SymmetricEigen};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rand_distr::StandardNormal;

use crate::error::{EvalError, Result};
use crate::types::{shape_of, DMatrix};

/// Explicit, reseedable random number source.
#[derive(Debug, Clone)]
pub struct RandomSource {
    rng: ChaCha8Rng,
    seed: u64,
}

impl RandomSource {
    /// Creates a source seeded with `seed`.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// Restarts the stream from `seed`, discarding all previous state.
    pub fn reseed(&mut self, seed: u64) {
        self.rng = ChaCha8Rng::seed_from_u64(seed);
        self.seed = seed;
    }

    /// Seed of the current stream.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Uniform draw on `[0, 1)`.
    pub fn uniform(&mut self) -> f64 {
        self.rng.gen::<f64>()
    }

    /// Standard normal draw.
    pub fn standard_normal(&mut self) -> f64 {
        self.rng.sample(StandardNormal)
    }

    /// Uniform index in `0..upper`. `upper` must be positive.
    pub fn index(&mut self, upper: usize) -> usize {
        self.rng.gen_range(0..upper)
    }

    /// `rows x cols` matrix of independent standard normals, filled row by row.
    pub fn standard_normal_matrix(&mut self, rows: usize, cols: usize) -> DMatrix {
        DMatrix::from_row_iterator(
            rows,
            cols,
            (0..rows * cols).map(|_| self.standard_normal()),
        )
    }

    /// Draws `rows` observations from `N(0, covariance)`, one per row.
    ///
    /// The covariance is factored as `L Lᵀ` (Cholesky, or a symmetric
    /// eigen-factor when the matrix is only semi-definite) and each row is
    /// `L z` for a vector `z` of independent standard normals.
    pub fn multivariate_normal(&mut self, covariance: &DMatrix, rows: usize) -> Result<DMatrix> {
        if !covariance.is_square() {
            return Err(EvalError::dimension_mismatch(
                "square covariance matrix",
                shape_of(covariance),
            ));
        }
        let factor = covariance_factor(covariance)?;
        let z = self.standard_normal_matrix(rows, covariance.ncols());
        Ok(z * factor.transpose())
    }
}

/// Returns `L` with `L Lᵀ = covariance`.
fn covariance_factor(covariance: &DMatrix) -> Result<DMatrix> {
    if let Some(cholesky) = Cholesky::new(covariance.clone()) {
        return Ok(cholesky.l());
    }

    warn!("covariance is not positive definite, falling back to eigen factor");
    let eigen = SymmetricEigen::new(covariance.clone());
    let min_eigenvalue = eigen.eigenvalues.min();
    let scale = covariance.amax().max(1.0);
    if !min_eigenvalue.is_finite() || min_eigenvalue < -1e-8 * scale {
        return Err(EvalError::numerical_error(format!(
            "covariance is not positive semi-definite (smallest eigenvalue {min_eigenvalue:e})"
        )));
    }
    let sqrt_values = eigen.eigenvalues.map(|v| v.max(0.0).sqrt());
    let mut factor = eigen.eigenvectors;
    for (j, s) in sqrt_values.iter().enumerate() {
        factor.column_mut(j).scale_mut(*s);
    }
    Ok(factor)
}
