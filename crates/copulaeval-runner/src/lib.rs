//! Repeated-trial driver for the Gaussian-copula imputation benchmark.
//!
//! A [`TrialRunner`](trial::TrialRunner) owns one
//! [`Imputer`](copulaeval_core::imputer::Imputer) and runs the configured
//! number of trials, each with its own seed. Per-trial scores are collected
//! into a [`RunSummary`](summary::RunSummary) and streamed to a
//! [`TrialReporter`](reporter::TrialReporter).
//!
//! # Example
//! ```
//! use copulaeval_runner::prelude::*;
//!
//! let config = ExperimentConfig::new()
//!     .with_trials(2)
//!     .with_generator(GeneratorConfig::new().with_rows(100));
//! let imputer = MarginalImputer::new(config.generator.schema.clone());
//! let mut runner = TrialRunner::new(config, imputer)?;
//! let summary = runner.run(&mut NoOpReporter)?;
//! assert_eq!(summary.trials, 2);
//! # Ok::<(), RunnerError>(())
//! ```

pub mod config_file;
pub mod error;
pub mod reporter;
pub mod summary;
pub mod trial;

pub use error::{Result, RunnerError};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::config_file::{load_config, parse_config};
    pub use crate::error::{Result, RunnerError};
    pub use crate::reporter::{NoOpReporter, PrintReporter, TrialReporter};
    pub use crate::summary::{ColumnSummary, KindSummary, MeanStd, RunSummary};
    pub use crate::trial::{PreparedTrial, TrialMetrics, TrialRunner};
    pub use copulaeval_core::config::{BinaryCutoff, ExperimentConfig, GeneratorConfig};
    pub use copulaeval_core::imputer::{ImputationResult, Imputer, MarginalImputer};
    pub use copulaeval_core::schema::{ColumnKind, ColumnSchema};
}
