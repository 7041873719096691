//! Type aliases and constants shared across the crate.
//!
//! All data matrices are dense, row-per-observation `f64` matrices. Missing
//! entries are encoded in-band with the [`MISSING`] sentinel.

/// Dense, dynamically sized `f64` matrix (rows = observations).
pub type DMatrix = nalgebra::DMatrix<f64>;

/// Dense, dynamically sized `f64` column vector.
pub type DVector = nalgebra::DVector<f64>;

/// Sentinel stored in place of a missing entry.
pub const MISSING: f64 = f64::NAN;

/// Returns `true` if `value` is the missing-value sentinel.
#[inline]
pub fn is_missing(value: f64) -> bool {
    value.is_nan()
}

/// Shape of a matrix formatted as `rowsxcols`, for error messages.
pub(crate) fn shape_of(matrix: &DMatrix) -> String {
    format!("{}x{}", matrix.nrows(), matrix.ncols())
}

/// Parameters of the reference experiment.
pub mod constants {
    /// Number of repeated trials.
    pub const NUM_TRIALS: usize = 10;

    /// Observations per trial.
    pub const NUM_ROWS: usize = 2000;

    /// Continuous (exponential) columns.
    pub const NUM_CONTINUOUS: usize = 5;

    /// Binary columns.
    pub const NUM_BINARY: usize = 5;

    /// Ordinal columns.
    pub const NUM_ORDINAL: usize = 5;

    /// Probability that an entry is masked.
    pub const MASK_FRACTION: f64 = 0.3;

    /// Scale (mean) of the exponential marginal.
    pub const EXPONENTIAL_SCALE: f64 = 3.0;

    /// Number of ordinal levels.
    pub const ORDINAL_LEVELS: usize = 5;

    /// Convergence threshold handed to the imputer.
    pub const IMPUTER_THRESHOLD: f64 = 0.01;

    /// Minimum class share enforced by the random binary cutoff.
    pub const BINARY_MIN_FRACTION: f64 = 0.1;

    /// Tolerance for unit-diagonal and symmetry checks.
    pub const CORRELATION_TOLERANCE: f64 = 1e-9;
}
