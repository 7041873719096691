//! Error types for the trial runner.

use copulaeval_core::EvalError;
use thiserror::Error;

/// Errors raised while running or reporting an experiment.
#[derive(Debug, Error)]
pub enum RunnerError {
    /// Propagated generation, masking, imputation or scoring error.
    #[error("Trial {seed} failed: {source}")]
    Trial {
        /// Seed of the failing trial
        seed: u64,
        /// Underlying error
        #[source]
        source: EvalError,
    },

    /// Error outside any trial (configuration, aggregation).
    #[error(transparent)]
    Eval(#[from] EvalError),

    /// The configuration file could not be read or parsed.
    #[error("Cannot load configuration from {path}: {reason}")]
    Config {
        /// Path of the configuration file
        path: String,
        /// Description of the problem
        reason: String,
    },

    /// Writing the report failed.
    #[error("Report output failed: {0}")]
    Io(#[from] std::io::Error),
}

impl RunnerError {
    /// Wraps a core error with the seed of the trial that raised it.
    pub fn trial(seed: u64, source: EvalError) -> Self {
        Self::Trial { seed, source }
    }

    /// Create a Config error.
    pub fn config<S1, S2>(path: S1, reason: S2) -> Self
    where
        S1: Into<String>,
        S2: Into<String>,
    {
        Self::Config {
            path: path.into(),
            reason: reason.into(),
        }
    }
}

/// Result type alias for runner operations.
pub type Result<T> = std::result::Result<T, RunnerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trial_error_names_seed() {
        let err = RunnerError::trial(4, EvalError::degenerate_draw("zero diagonal"));
        assert_eq!(
            err.to_string(),
            "Trial 4 failed: Degenerate random draw: zero diagonal"
        );
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_eval_error_propagation() {
        let err: RunnerError = EvalError::invalid_configuration("trials", "zero").into();
        assert!(matches!(err, RunnerError::Eval(_)));
        assert!(err.to_string().contains("trials"));
    }
}
