//! Callback support for reporting trial results.
//!
//! A [`TrialReporter`] is notified at the start of a run, after every trial
//! and once the summary is computed. Reporters only observe; they cannot
//! alter the run.

use std::io::{self, Write};

use copulaeval_core::config::ExperimentConfig;
use crate::error::Result;
use crate::summary::{KindSummary, RunSummary};
use crate::trial::TrialMetrics;

/// Observer of an experiment run.
pub trait TrialReporter {
    /// Called before the first trial.
    fn on_run_start(&mut self, config: &ExperimentConfig) -> Result<()> {
        let _ = config;
        Ok(())
    }

    /// Called after each trial is scored.
    fn on_trial_end(&mut self, metrics: &TrialMetrics) -> Result<()> {
        let _ = metrics;
        Ok(())
    }

    /// Called once with the aggregated summary.
    fn on_run_end(&mut self, summary: &RunSummary) -> Result<()> {
        let _ = summary;
        Ok(())
    }
}

/// A reporter that does nothing.
pub struct NoOpReporter;

impl TrialReporter for NoOpReporter {}

/// Writes a plain-text report, trial by trial, then the summary.
pub struct PrintReporter<W: Write = io::Stdout> {
    out: W,
}

impl PrintReporter<io::Stdout> {
    /// Reporter writing to standard output.
    pub fn stdout() -> Self {
        Self { out: io::stdout() }
    }
}

impl<W: Write> PrintReporter<W> {
    /// Reporter writing to any sink.
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// Returns the underlying sink.
    pub fn into_inner(self) -> W {
        self.out
    }
}

fn format_values(values: &[f64]) -> String {
    let parts: Vec<String> = values.iter().map(|v| format!("{v:.6}")).collect();
    format!("[{}]", parts.join(", "))
}

fn format_optional(values: &[Option<f64>]) -> String {
    let parts: Vec<String> = values
        .iter()
        .map(|v| v.map_or_else(|| "undefined".to_string(), |v| format!("{v:.6}")))
        .collect();
    format!("[{}]", parts.join(", "))
}

fn format_scalar(value: Option<f64>) -> String {
    value.map_or_else(|| "undefined".to_string(), |v| format!("{v:.6}"))
}

impl<W: Write> TrialReporter for PrintReporter<W> {
    fn on_run_start(&mut self, config: &ExperimentConfig) -> Result<()> {
        writeln!(
            self.out,
            "running {} trials: {} rows x {} columns, mask fraction {}, threshold {}",
            config.trials,
            config.generator.rows,
            config.generator.dim(),
            config.mask_fraction,
            config.threshold
        )?;
        Ok(())
    }

    fn on_trial_end(&mut self, metrics: &TrialMetrics) -> Result<()> {
        writeln!(self.out, "trial {}", metrics.seed)?;
        writeln!(self.out, "correlation error is: {:.6}", metrics.correlation_error)?;
        writeln!(self.out, "mean absolute errors are: {}", format_optional(&metrics.smae))?;
        writeln!(
            self.out,
            "continuous scaled errors are: {}",
            format_values(&metrics.continuous_errors)
        )?;
        writeln!(
            self.out,
            "imputation time: {:.3}s",
            metrics.elapsed.as_secs_f64()
        )?;
        writeln!(self.out)?;
        Ok(())
    }

    fn on_run_end(&mut self, summary: &RunSummary) -> Result<()> {
        let out = &mut self.out;
        writeln!(out, "all correlation errors are: {}", format_values(&summary.correlation_errors))?;
        writeln!(out, "mean of correlation errors is: {:.6}", summary.correlation_error.mean)?;
        writeln!(out, "std deviation of correlation errors is: {:.6}", summary.correlation_error.std)?;
        writeln!(out)?;

        let means: Vec<Option<f64>> = summary.smae.iter().map(|c| c.stats.map(|s| s.mean)).collect();
        let stds: Vec<Option<f64>> = summary.smae.iter().map(|c| c.stats.map(|s| s.std)).collect();
        writeln!(out, "mean of smaes is: {}", format_optional(&means))?;
        for KindSummary { kind, mean, .. } in &summary.smae_by_kind {
            writeln!(out, "mean {kind} smaes are: {}", format_scalar(*mean))?;
        }
        writeln!(out, "std deviation of smaes is: {}", format_optional(&stds))?;
        for KindSummary { kind, std, .. } in &summary.smae_by_kind {
            writeln!(out, "std dev {kind} smaes are: {}", format_scalar(*std))?;
        }
        writeln!(out)?;

        let cont_means: Vec<f64> = summary.continuous_errors.iter().map(|s| s.mean).collect();
        let cont_stds: Vec<f64> = summary.continuous_errors.iter().map(|s| s.std).collect();
        for (i, errors) in summary.continuous_error_trials.iter().enumerate() {
            writeln!(out, "continuous scaled errors, trial {}: {}", i + 1, format_values(errors))?;
        }
        writeln!(out, "mean of continuous scaled errors is: {}", format_values(&cont_means))?;
        writeln!(out, "std deviation of continuous scaled errors is: {}", format_values(&cont_stds))?;

        let runtimes: Vec<f64> = summary.runtimes.iter().map(|d| d.as_secs_f64()).collect();
        writeln!(out, "all runtimes were: {}", format_values(&runtimes))?;
        writeln!(out, "mean time for run is: {:.6}", summary.runtime.mean)?;
        out.flush()?;
        Ok(())
    }
}
