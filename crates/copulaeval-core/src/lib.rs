//! Core of the Gaussian-copula imputation benchmark.
//!
//! This crate generates synthetic mixed-type data whose dependence is a
//! Gaussian copula, masks it completely at random, and scores how well an
//! [`Imputer`](imputer::Imputer) recovers the masked entries and the latent
//! correlation.
//!
//! # Pipeline
//!
//! 1. [`correlation`]: random correlation matrix `Σ` (Gram matrix rescaled to
//!    unit diagonal)
//! 2. [`rng`]: latent rows `z ~ N(0, Σ)`
//! 3. [`marginal`]: per-column transforms to exponential, binary and ordinal
//!    marginals
//! 4. [`masking`]: independent Bernoulli masking of entries
//! 5. [`imputer`]: external imputation (interface plus a baseline)
//! 6. [`metrics`]: scaled correlation error, per-column SMAE and continuous
//!    scaled errors
//!
//! # Modules
//!
//! - [`config`]: generator and experiment parameters
//! - [`dataset`]: one-call dataset generation
//! - [`error`]: error type
//! - [`schema`]: column kinds
//! - [`stats`]: descriptive statistics helpers
//! - [`types`]: aliases, missing-value sentinel and reference constants

pub mod config;
pub mod correlation;
pub mod dataset;
pub mod error;
pub mod imputer;
pub mod marginal;
pub mod masking;
pub mod metrics;
pub mod rng;
pub mod schema;
pub mod stats;
pub mod types;

pub use error::{EvalError, Result};

/// Prelude module for convenient imports.
///
/// # Example
/// ```
/// use copulaeval_core::prelude::*;
///
/// let config = GeneratorConfig::new().with_rows(50);
/// let generator = CopulaDataGenerator::new(&config)?;
/// let mut rng = RandomSource::seeded(1);
/// let data = generator.generate(&mut rng)?;
/// let masked = MissingnessMasker::new(0.3)?.apply(&data.ground_truth, &mut rng)?;
/// assert_eq!(masked.ncols(), 15);
/// # Ok::<(), EvalError>(())
/// ```
pub mod prelude {
    pub use crate::config::{BinaryCutoff, ExperimentConfig, GeneratorConfig};
    pub use crate::correlation::{normalize_covariance, CorrelationMatrix, CorrelationSynthesizer};
    pub use crate::dataset::{CopulaDataGenerator, SyntheticDataset};
    pub use crate::error::{EvalError, Result};
    pub use crate::imputer::{ImputationResult, Imputer, MarginalImputer};
    pub use crate::marginal::{binarize, exponential_from_normal, ordinalize, MarginalTransformer};
    pub use crate::masking::{MaskIndices, MaskedMatrix, MissingnessMasker};
    pub use crate::metrics::{continuous_scaled_errors, scaled_error, smae};
    pub use crate::rng::RandomSource;
    pub use crate::schema::{ColumnKind, ColumnSchema};
    pub use crate::types::{constants, is_missing, DMatrix, DVector, MISSING};
}
