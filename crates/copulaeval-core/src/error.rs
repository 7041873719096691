//! Error types for data generation, masking and scoring.
//!
//! Every failure in this crate is fatal for the trial that raised it: there is
//! no transient failure mode, so nothing here is retried. Metrics that are
//! merely undefined for a column (e.g. SMAE with no masked entries) are not
//! errors and are reported as `None` by the metric itself.

use thiserror::Error;

/// Errors that can occur while generating, masking or scoring a trial.
#[derive(Debug, Clone, Error)]
pub enum EvalError {
    /// A random draw produced a matrix that cannot be normalised.
    ///
    /// Raised by the correlation synthesizer when the Gram matrix has a zero,
    /// negative or non-finite diagonal entry.
    #[error("Degenerate random draw: {reason}")]
    DegenerateDraw {
        /// Description of the degenerate quantity
        reason: String,
    },

    /// Dimension mismatch between matrices.
    ///
    /// Raised when an imputer returns matrices of the wrong shape, or when a
    /// metric is asked to compare matrices of different shapes.
    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch {
        /// Expected dimensions
        expected: String,
        /// Actual dimensions
        actual: String,
    },

    /// Invalid experiment or generator parameters.
    #[error("Invalid configuration for `{parameter}`: {reason}")]
    InvalidConfiguration {
        /// Name of the offending parameter
        parameter: String,
        /// Description of the problem
        reason: String,
    },

    /// Numerical failure in a linear-algebra routine.
    #[error("Numerical error: {reason}")]
    NumericalError {
        /// Description of the numerical issue
        reason: String,
    },

    /// A scalar metric is undefined for its inputs.
    #[error("Metric `{metric}` is undefined: {reason}")]
    UndefinedMetric {
        /// Name of the metric
        metric: String,
        /// Why it could not be computed
        reason: String,
    },

    /// The imputer reported a failure or returned unusable output.
    #[error("Imputation failed: {reason}")]
    Imputation {
        /// Description of the failure
        reason: String,
    },
}

impl EvalError {
    /// Create a DegenerateDraw error.
    pub fn degenerate_draw<S: Into<String>>(reason: S) -> Self {
        Self::DegenerateDraw {
            reason: reason.into(),
        }
    }

    /// Create a DimensionMismatch error.
    pub fn dimension_mismatch<S1, S2>(expected: S1, actual: S2) -> Self
    where
        S1: std::fmt::Display,
        S2: std::fmt::Display,
    {
        Self::DimensionMismatch {
            expected: expected.to_string(),
            actual: actual.to_string(),
        }
    }

    /// Create an InvalidConfiguration error.
    pub fn invalid_configuration<S1, S2>(parameter: S1, reason: S2) -> Self
    where
        S1: Into<String>,
        S2: Into<String>,
    {
        Self::InvalidConfiguration {
            parameter: parameter.into(),
            reason: reason.into(),
        }
    }

    /// Create a NumericalError.
    pub fn numerical_error<S: Into<String>>(reason: S) -> Self {
        Self::NumericalError {
            reason: reason.into(),
        }
    }

    /// Create an UndefinedMetric error.
    pub fn undefined_metric<S1, S2>(metric: S1, reason: S2) -> Self
    where
        S1: Into<String>,
        S2: Into<String>,
    {
        Self::UndefinedMetric {
            metric: metric.into(),
            reason: reason.into(),
        }
    }

    /// Create an Imputation error.
    pub fn imputation<S: Into<String>>(reason: S) -> Self {
        Self::Imputation {
            reason: reason.into(),
        }
    }
}

/// Result type alias for this crate.
pub type Result<T> = std::result::Result<T, EvalError>;
