//! Aggregation of per-trial metrics.
//!
//! Means and standard deviations are taken elementwise across trials, with
//! the population (divisor `n`) convention. Undefined SMAE values are skipped
//! column by column; a column that is undefined in every trial has no
//! summary. Per-kind SMAE figures are the average, over the columns of that
//! kind, of the per-column means (resp. standard deviations).

use std::time::Duration;

use copulaeval_core::error::{EvalError, Result};
use copulaeval_core::schema::{ColumnKind, ColumnSchema};
use copulaeval_core::stats;

use crate::trial::TrialMetrics;

/// Mean and population standard deviation of a sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeanStd {
    /// Sample mean
    pub mean: f64,
    /// Population standard deviation
    pub std: f64,
}

impl MeanStd {
    /// Summarises `values`; `None` when empty.
    pub fn of(values: &[f64]) -> Option<Self> {
        Some(Self {
            mean: stats::mean(values)?,
            std: stats::population_std(values)?,
        })
    }
}

/// SMAE summary of one column.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnSummary {
    /// Kind of the column
    pub kind: ColumnKind,
    /// Mean and std over the trials where SMAE was defined
    pub stats: Option<MeanStd>,
    /// Number of trials where SMAE was defined
    pub defined_trials: usize,
}

/// SMAE summary of all columns of one kind.
#[derive(Debug, Clone, PartialEq)]
pub struct KindSummary {
    /// Column kind
    pub kind: ColumnKind,
    /// Average of the per-column SMAE means
    pub mean: Option<f64>,
    /// Average of the per-column SMAE standard deviations
    pub std: Option<f64>,
}

/// Aggregate of a whole run.
#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    /// Number of trials
    pub trials: usize,
    /// Correlation error of every trial, in order
    pub correlation_errors: Vec<f64>,
    /// Summary of the correlation errors
    pub correlation_error: MeanStd,
    /// Per-column SMAE summaries
    pub smae: Vec<ColumnSummary>,
    /// Per-kind SMAE summaries, in [`ColumnKind::ALL`] order, for kinds
    /// present in the schema
    pub smae_by_kind: Vec<KindSummary>,
    /// Continuous scaled error of every trial, in order
    pub continuous_error_trials: Vec<Vec<f64>>,
    /// Per-continuous-column summaries of the scaled error
    pub continuous_errors: Vec<MeanStd>,
    /// Imputer runtime of every trial, in order
    pub runtimes: Vec<Duration>,
    /// Summary of the runtimes in seconds
    pub runtime: MeanStd,
}

impl RunSummary {
    /// Aggregates the metrics of a run.
    pub fn from_trials(trials: &[TrialMetrics], schema: &ColumnSchema) -> Result<Self> {
        if trials.is_empty() {
            return Err(EvalError::invalid_configuration(
                "trials",
                "cannot summarise an empty run",
            ));
        }
        let n_cont = schema.count(ColumnKind::Continuous);
        for t in trials {
            if t.smae.len() != schema.len() {
                return Err(EvalError::dimension_mismatch(
                    format!("{} SMAE values", schema.len()),
                    format!("{} in trial {}", t.smae.len(), t.seed),
                ));
            }
            if t.continuous_errors.len() != n_cont {
                return Err(EvalError::dimension_mismatch(
                    format!("{n_cont} continuous errors"),
                    format!("{} in trial {}", t.continuous_errors.len(), t.seed),
                ));
            }
        }

        let correlation_errors: Vec<f64> = trials.iter().map(|t| t.correlation_error).collect();
        let runtimes: Vec<Duration> = trials.iter().map(|t| t.elapsed).collect();
        let seconds: Vec<f64> = runtimes.iter().map(Duration::as_secs_f64).collect();

        let smae: Vec<ColumnSummary> = (0..schema.len())
            .map(|j| {
                let defined: Vec<f64> = trials.iter().filter_map(|t| t.smae[j]).collect();
                ColumnSummary {
                    kind: schema.kind(j),
                    stats: MeanStd::of(&defined),
                    defined_trials: defined.len(),
                }
            })
            .collect();

        let smae_by_kind = ColumnKind::ALL
            .iter()
            .filter(|&&kind| schema.count(kind) > 0)
            .map(|&kind| {
                let column_stats: Vec<MeanStd> = smae
                    .iter()
                    .filter(|c| c.kind == kind)
                    .filter_map(|c| c.stats)
                    .collect();
                let means: Vec<f64> = column_stats.iter().map(|s| s.mean).collect();
                let stds: Vec<f64> = column_stats.iter().map(|s| s.std).collect();
                KindSummary {
                    kind,
                    mean: stats::mean(&means),
                    std: stats::mean(&stds),
                }
            })
            .collect();

        let continuous_error_trials: Vec<Vec<f64>> =
            trials.iter().map(|t| t.continuous_errors.clone()).collect();
        let continuous_errors = (0..n_cont)
            .filter_map(|k| {
                let column: Vec<f64> = continuous_error_trials.iter().map(|e| e[k]).collect();
                MeanStd::of(&column)
            })
            .collect();

        // Non-empty inputs, so these summaries exist.
        let correlation_error = MeanStd::of(&correlation_errors)
            .ok_or_else(|| EvalError::numerical_error("empty correlation errors"))?;
        let runtime = MeanStd::of(&seconds)
            .ok_or_else(|| EvalError::numerical_error("empty runtimes"))?;

        Ok(Self {
            trials: trials.len(),
            correlation_errors,
            correlation_error,
            smae,
            smae_by_kind,
            continuous_error_trials,
            continuous_errors,
            runtimes,
            runtime,
        })
    }

    /// Per-kind SMAE summary, if the schema has columns of that kind.
    pub fn kind(&self, kind: ColumnKind) -> Option<&KindSummary> {
        self.smae_by_kind.iter().find(|k| k.kind == kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn trial(seed: u64, corr: f64, smae: Vec<Option<f64>>, cont: Vec<f64>, ms: u64) -> TrialMetrics {
        TrialMetrics {
            seed,
            correlation_error: corr,
            smae,
            continuous_errors: cont,
            elapsed: Duration::from_millis(ms),
        }
    }

    fn schema() -> ColumnSchema {
        ColumnSchema::blocks(1, 1, 1)
    }

    #[test]
    fn test_mean_std_population() {
        let s = MeanStd::of(&[1.0, 3.0]).unwrap();
        assert_eq!(s.mean, 2.0);
        assert_eq!(s.std, 1.0);
        assert!(MeanStd::of(&[]).is_none());
    }

    #[test]
    fn test_aggregation() {
        let trials = vec![
            trial(1, 0.2, vec![Some(0.5), Some(1.0), Some(0.8)], vec![0.3], 100),
            trial(2, 0.4, vec![Some(0.7), None, Some(0.6)], vec![0.5], 300),
        ];
        let summary = RunSummary::from_trials(&trials, &schema()).unwrap();

        assert_eq!(summary.trials, 2);
        assert_relative_eq!(summary.correlation_error.mean, 0.3, epsilon = 1e-12);
        assert_relative_eq!(summary.correlation_error.std, 0.1, epsilon = 1e-12);

        let cont = summary.smae[0].stats.unwrap();
        assert_relative_eq!(cont.mean, 0.6, epsilon = 1e-12);
        assert_relative_eq!(cont.std, 0.1, epsilon = 1e-12);

        // The undefined value is skipped, not treated as zero.
        assert_eq!(summary.smae[1].defined_trials, 1);
        assert_eq!(summary.smae[1].stats.unwrap().mean, 1.0);
        assert_eq!(summary.smae[1].stats.unwrap().std, 0.0);

        let ord = summary.kind(ColumnKind::Ordinal).unwrap();
        assert_relative_eq!(ord.mean.unwrap(), 0.7, epsilon = 1e-12);

        assert_relative_eq!(summary.continuous_errors[0].mean, 0.4, epsilon = 1e-12);
        assert_relative_eq!(summary.runtime.mean, 0.2, epsilon = 1e-12);
        assert_eq!(summary.runtimes.len(), 2);
    }

    #[test]
    fn test_column_never_defined() {
        let trials = vec![trial(1, 0.2, vec![Some(0.5), None, Some(0.8)], vec![0.3], 1)];
        let summary = RunSummary::from_trials(&trials, &schema()).unwrap();
        assert_eq!(summary.smae[1].stats, None);
        let bin = summary.kind(ColumnKind::Binary).unwrap();
        assert_eq!(bin.mean, None);
        assert_eq!(bin.std, None);
    }

    #[test]
    fn test_kinds_absent_from_schema_are_omitted() {
        let trials = vec![trial(1, 0.1, vec![Some(0.5)], vec![0.2], 1)];
        let summary = RunSummary::from_trials(&trials, &ColumnSchema::blocks(1, 0, 0)).unwrap();
        assert_eq!(summary.smae_by_kind.len(), 1);
        assert!(summary.kind(ColumnKind::Ordinal).is_none());
    }

    #[test]
    fn test_inconsistent_trials_rejected() {
        let trials = vec![trial(1, 0.1, vec![Some(0.5)], vec![0.2], 1)];
        assert!(matches!(
            RunSummary::from_trials(&trials, &schema()),
            Err(EvalError::DimensionMismatch { .. })
        ));
        assert!(RunSummary::from_trials(&[], &schema()).is_err());
    }
}
