//! Repeated randomized trials.
//!
//! A trial reseeds the runner's [`RandomSource`] with its own seed, then
//! generates a dataset, masks it, times one imputer call and scores the
//! result. The seed alone determines the data of a trial, so trials never
//! influence each other. Trials run strictly one after another.

use std::time::{Duration, Instant};

use copulaeval_core::config::ExperimentConfig;
use copulaeval_core::dataset::{CopulaDataGenerator, SyntheticDataset};
use copulaeval_core::imputer::{ImputationResult, Imputer};
use copulaeval_core::masking::{MaskedMatrix, MissingnessMasker};
use copulaeval_core::metrics;
use copulaeval_core::rng::RandomSource;
use log::{debug, info};

use crate::error::{Result, RunnerError};
use crate::reporter::TrialReporter;
use crate::summary::RunSummary;

/// Scores of one trial. Immutable once recorded.
#[derive(Debug, Clone, PartialEq)]
pub struct TrialMetrics {
    /// Seed the trial was generated from
    pub seed: u64,
    /// Scaled error of the estimated correlation matrix
    pub correlation_error: f64,
    /// Per-column SMAE; `None` where undefined
    pub smae: Vec<Option<f64>>,
    /// Scaled error of each continuous column
    pub continuous_errors: Vec<f64>,
    /// Wall-clock duration of the imputer call
    pub elapsed: Duration,
}

/// Generated and masked data of one trial, before imputation.
#[derive(Debug, Clone)]
pub struct PreparedTrial {
    /// Seed the trial was generated from
    pub seed: u64,
    /// Ground truth and its generating correlation
    pub dataset: SyntheticDataset,
    /// Ground truth with masked entries
    pub masked: MaskedMatrix,
}

impl PreparedTrial {
    /// Scores an imputation of this trial.
    pub fn score(
        &self,
        result: &ImputationResult,
        elapsed: Duration,
    ) -> copulaeval_core::Result<TrialMetrics> {
        let truth = &self.dataset.ground_truth;
        result.validate(truth.nrows(), truth.ncols())?;

        let correlation_error =
            metrics::scaled_error(&result.correlation, self.dataset.correlation.as_matrix())?;
        let smae = metrics::smae(&result.imputed, truth, &self.masked)?;
        let continuous_errors =
            metrics::continuous_scaled_errors(&result.imputed, truth, &self.dataset.schema)?;

        Ok(TrialMetrics {
            seed: self.seed,
            correlation_error,
            smae,
            continuous_errors,
            elapsed,
        })
    }
}

/// Drives an experiment with one imputer.
#[derive(Debug)]
pub struct TrialRunner<I: Imputer> {
    config: ExperimentConfig,
    generator: CopulaDataGenerator,
    masker: MissingnessMasker,
    imputer: I,
    rng: RandomSource,
}

impl<I: Imputer> TrialRunner<I> {
    /// Creates a runner, validating the configuration.
    pub fn new(config: ExperimentConfig, imputer: I) -> Result<Self> {
        config.validate()?;
        let generator = CopulaDataGenerator::new(&config.generator)?;
        let masker = MissingnessMasker::new(config.mask_fraction)?;
        let rng = RandomSource::seeded(config.first_seed);
        Ok(Self {
            config,
            generator,
            masker,
            imputer,
            rng,
        })
    }

    /// Experiment configuration.
    pub fn config(&self) -> &ExperimentConfig {
        &self.config
    }

    /// The imputer under evaluation.
    pub fn imputer(&self) -> &I {
        &self.imputer
    }

    /// Reseeds and generates the masked data of trial `seed`.
    pub fn prepare(&mut self, seed: u64) -> copulaeval_core::Result<PreparedTrial> {
        self.rng.reseed(seed);
        let dataset = self.generator.generate(&mut self.rng)?;
        let masked = self.masker.apply(&dataset.ground_truth, &mut self.rng)?;
        Ok(PreparedTrial {
            seed,
            dataset,
            masked,
        })
    }

    /// Runs one full trial.
    pub fn run_trial(&mut self, seed: u64) -> Result<TrialMetrics> {
        self.run_trial_inner(seed)
            .map_err(|e| RunnerError::trial(seed, e))
    }

    fn run_trial_inner(&mut self, seed: u64) -> copulaeval_core::Result<TrialMetrics> {
        let prepared = self.prepare(seed)?;

        let start = Instant::now();
        let result = self
            .imputer
            .impute(prepared.masked.values(), self.config.threshold)?;
        let elapsed = start.elapsed();
        debug!(
            "{} imputer took {:.3}s on trial {seed}",
            self.imputer.name(),
            elapsed.as_secs_f64()
        );

        prepared.score(&result, elapsed)
    }

    /// Runs every configured trial in seed order and aggregates the results.
    pub fn run<R: TrialReporter>(&mut self, reporter: &mut R) -> Result<RunSummary> {
        reporter.on_run_start(&self.config)?;

        let seeds: Vec<u64> = self.config.seeds().collect();
        let mut trials = Vec::with_capacity(seeds.len());
        for seed in seeds {
            info!("starting trial {seed}");
            let metrics = self.run_trial(seed)?;
            reporter.on_trial_end(&metrics)?;
            trials.push(metrics);
        }

        let summary = RunSummary::from_trials(&trials, &self.config.generator.schema)?;
        reporter.on_run_end(&summary)?;
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reporter::NoOpReporter;
    use copulaeval_core::config::GeneratorConfig;
    use copulaeval_core::error::EvalError;
    use copulaeval_core::imputer::MarginalImputer;
    use copulaeval_core::schema::ColumnSchema;
    use copulaeval_core::types::DMatrix;

    fn small_config() -> ExperimentConfig {
        ExperimentConfig::new()
            .with_trials(3)
            .with_generator(GeneratorConfig::new().with_rows(200))
    }

    /// Returns the wrong number of columns.
    struct ShapeBreakingImputer;

    impl Imputer for ShapeBreakingImputer {
        fn name(&self) -> &str {
            "broken"
        }

        fn impute(
            &mut self,
            data: &DMatrix,
            _threshold: f64,
        ) -> copulaeval_core::Result<ImputationResult> {
            Ok(ImputationResult {
                imputed: DMatrix::zeros(data.nrows(), data.ncols() - 1),
                correlation: DMatrix::identity(data.ncols(), data.ncols()),
            })
        }
    }

    #[test]
    fn test_trial_metric_shapes() {
        let mut runner =
            TrialRunner::new(small_config(), MarginalImputer::new(ColumnSchema::reference()))
                .unwrap();
        let metrics = runner.run_trial(1).unwrap();
        assert_eq!(metrics.seed, 1);
        assert_eq!(metrics.smae.len(), 15);
        assert_eq!(metrics.continuous_errors.len(), 5);
        assert!(metrics.correlation_error > 0.0);
    }

    #[test]
    fn test_prepare_is_reproducible() {
        let mut runner =
            TrialRunner::new(small_config(), MarginalImputer::new(ColumnSchema::reference()))
                .unwrap();
        let a = runner.prepare(2).unwrap();
        let _ = runner.prepare(7).unwrap();
        let b = runner.prepare(2).unwrap();
        assert_eq!(a.dataset.ground_truth, b.dataset.ground_truth);
        assert_eq!(a.masked.indices(), b.masked.indices());
    }

    #[test]
    fn test_shape_mismatch_is_fatal() {
        let mut runner = TrialRunner::new(small_config(), ShapeBreakingImputer).unwrap();
        let err = runner.run(&mut NoOpReporter).unwrap_err();
        assert!(matches!(
            err,
            RunnerError::Trial {
                seed: 1,
                source: EvalError::DimensionMismatch { .. }
            }
        ));
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = small_config().with_mask_fraction(1.5);
        let result = TrialRunner::new(config, ShapeBreakingImputer);
        assert!(matches!(result, Err(RunnerError::Eval(_))));
    }
}
