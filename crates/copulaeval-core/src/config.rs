//! Experiment configuration.
//!
//! `Default` on every struct gives the reference experiment: 15 columns
//! (5 continuous, 5 binary, 5 ordinal with 5 levels), 2000 rows, 30 %
//! missingness, imputer threshold 0.01 and 10 trials seeded 1..=10.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{EvalError, Result};
use crate::schema::ColumnSchema;
use crate::types::constants;

/// Rule used to pick the threshold of a binary column.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum BinaryCutoff {
    /// Split at the column median.
    Median,
    /// Split at a value drawn from the column itself, redrawn until each
    /// class holds more than `min_fraction` of the rows.
    RandomBalanced {
        /// Minimum share of each class, in `[0, 0.5)`
        min_fraction: f64,
    },
}

impl Default for BinaryCutoff {
    fn default() -> Self {
        Self::RandomBalanced {
            min_fraction: constants::BINARY_MIN_FRACTION,
        }
    }
}

/// Parameters of the synthetic mixed-type data.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GeneratorConfig {
    /// Observations per dataset
    pub rows: usize,
    /// Kind of each column
    pub schema: ColumnSchema,
    /// Scale (mean) of the exponential marginal of continuous columns
    pub exponential_scale: f64,
    /// Number of levels of ordinal columns
    pub ordinal_levels: usize,
    /// Threshold rule of binary columns
    pub binary_cutoff: BinaryCutoff,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            rows: constants::NUM_ROWS,
            schema: ColumnSchema::reference(),
            exponential_scale: constants::EXPONENTIAL_SCALE,
            ordinal_levels: constants::ORDINAL_LEVELS,
            binary_cutoff: BinaryCutoff::default(),
        }
    }
}

impl GeneratorConfig {
    /// Creates the reference generator configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the number of rows.
    pub fn with_rows(mut self, rows: usize) -> Self {
        self.rows = rows;
        self
    }

    /// Sets the column schema.
    pub fn with_schema(mut self, schema: ColumnSchema) -> Self {
        self.schema = schema;
        self
    }

    /// Sets the exponential scale.
    pub fn with_exponential_scale(mut self, scale: f64) -> Self {
        self.exponential_scale = scale;
        self
    }

    /// Sets the number of ordinal levels.
    pub fn with_ordinal_levels(mut self, levels: usize) -> Self {
        self.ordinal_levels = levels;
        self
    }

    /// Sets the binary threshold rule.
    pub fn with_binary_cutoff(mut self, cutoff: BinaryCutoff) -> Self {
        self.binary_cutoff = cutoff;
        self
    }

    /// Number of columns.
    pub fn dim(&self) -> usize {
        self.schema.len()
    }

    /// Checks every parameter.
    pub fn validate(&self) -> Result<()> {
        if self.rows < 2 {
            return Err(EvalError::invalid_configuration(
                "rows",
                format!("need at least 2 rows, got {}", self.rows),
            ));
        }
        if self.schema.is_empty() {
            return Err(EvalError::invalid_configuration(
                "schema",
                "schema has no columns",
            ));
        }
        if !(self.exponential_scale.is_finite() && self.exponential_scale > 0.0) {
            return Err(EvalError::invalid_configuration(
                "exponential_scale",
                format!("must be positive, got {}", self.exponential_scale),
            ));
        }
        if self.ordinal_levels < 2 {
            return Err(EvalError::invalid_configuration(
                "ordinal_levels",
                format!("need at least 2 levels, got {}", self.ordinal_levels),
            ));
        }
        if let BinaryCutoff::RandomBalanced { min_fraction } = self.binary_cutoff {
            if !(0.0..0.5).contains(&min_fraction) {
                return Err(EvalError::invalid_configuration(
                    "binary_cutoff.min_fraction",
                    format!("must lie in [0, 0.5), got {min_fraction}"),
                ));
            }
        }
        Ok(())
    }
}

/// Full parameters of a repeated-trial experiment.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ExperimentConfig {
    /// Data generation parameters
    pub generator: GeneratorConfig,
    /// Probability that an entry is masked, in `(0, 1)`
    pub mask_fraction: f64,
    /// Convergence threshold passed to the imputer
    pub threshold: f64,
    /// Number of trials
    pub trials: usize,
    /// Seed of the first trial; trial `i` (0-based) uses `first_seed + i`
    pub first_seed: u64,
}

impl Default for ExperimentConfig {
    fn default() -> Self {
        Self {
            generator: GeneratorConfig::default(),
            mask_fraction: constants::MASK_FRACTION,
            threshold: constants::IMPUTER_THRESHOLD,
            trials: constants::NUM_TRIALS,
            first_seed: 1,
        }
    }
}

impl ExperimentConfig {
    /// Creates the reference experiment configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the generator configuration.
    pub fn with_generator(mut self, generator: GeneratorConfig) -> Self {
        self.generator = generator;
        self
    }

    /// Sets the mask fraction.
    pub fn with_mask_fraction(mut self, fraction: f64) -> Self {
        self.mask_fraction = fraction;
        self
    }

    /// Sets the imputer threshold.
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    /// Sets the number of trials.
    pub fn with_trials(mut self, trials: usize) -> Self {
        self.trials = trials;
        self
    }

    /// Sets the seed of the first trial.
    pub fn with_first_seed(mut self, seed: u64) -> Self {
        self.first_seed = seed;
        self
    }

    /// Seeds of all trials, in execution order.
    pub fn seeds(&self) -> impl Iterator<Item = u64> {
        let first = self.first_seed;
        (0..self.trials as u64).map(move |i| first.wrapping_add(i))
    }

    /// Checks every parameter.
    pub fn validate(&self) -> Result<()> {
        self.generator.validate()?;
        if !(self.mask_fraction > 0.0 && self.mask_fraction < 1.0) {
            return Err(EvalError::invalid_configuration(
                "mask_fraction",
                format!("must lie in (0, 1), got {}", self.mask_fraction),
            ));
        }
        if !(self.threshold.is_finite() && self.threshold > 0.0) {
            return Err(EvalError::invalid_configuration(
                "threshold",
                format!("must be positive, got {}", self.threshold),
            ));
        }
        if self.trials == 0 {
            return Err(EvalError::invalid_configuration(
                "trials",
                "need at least one trial",
            ));
        }
        if self.first_seed.checked_add(self.trials as u64 - 1).is_none() {
            return Err(EvalError::invalid_configuration(
                "first_seed",
                format!(
                    "{} trials starting at seed {} run past u64::MAX",
                    self.trials, self.first_seed
                ),
            ));
        }
        Ok(())
    }
}
