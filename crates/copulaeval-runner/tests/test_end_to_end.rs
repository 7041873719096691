//! End-to-end runs of the benchmark with the baseline imputer.

use approx::assert_relative_eq;
use copulaeval_runner::prelude::*;
use copulaeval_runner::reporter::PrintReporter;

fn config(trials: usize, rows: usize) -> ExperimentConfig {
    ExperimentConfig::new()
        .with_trials(trials)
        .with_generator(GeneratorConfig::new().with_rows(rows))
}

fn runner(config: ExperimentConfig) -> TrialRunner<MarginalImputer> {
    let imputer = MarginalImputer::new(config.generator.schema.clone());
    TrialRunner::new(config, imputer).unwrap()
}

#[test]
fn test_reference_trial_shapes() {
    let mut runner = runner(config(1, 2000));
    let prepared = runner.prepare(1).unwrap();
    assert_eq!(prepared.dataset.ground_truth.shape(), (2000, 15));
    assert_eq!(prepared.dataset.correlation.dim(), 15);

    // About 30% of 30000 entries, well within 5 standard deviations.
    let masked = prepared.masked.indices().len() as f64;
    assert!((masked - 9000.0).abs() < 400.0, "masked {masked}");

    let metrics = runner.run_trial(1).unwrap();
    assert_eq!(metrics.smae.len(), 15);
    assert_eq!(metrics.continuous_errors.len(), 5);
    assert!(metrics.correlation_error.is_finite() && metrics.correlation_error > 0.0);
    assert!(metrics.continuous_errors.iter().all(|e| *e >= 0.0));
}

#[test]
fn test_continuous_median_fill_scores_one() {
    // Filling continuous gaps with the observed median is exactly the SMAE
    // reference, so those ratios are 1.
    let mut runner = runner(config(1, 500));
    let metrics = runner.run_trial(3).unwrap();
    for value in &metrics.smae[..5] {
        assert_relative_eq!(value.unwrap(), 1.0, epsilon = 1e-12);
    }
}

#[test]
fn test_runs_are_reproducible() {
    let a = runner(config(3, 300)).run(&mut NoOpReporter).unwrap();
    let b = runner(config(3, 300)).run(&mut NoOpReporter).unwrap();
    assert_eq!(a.correlation_errors, b.correlation_errors);
    assert_eq!(a.continuous_error_trials, b.continuous_error_trials);
    let smae = |s: &RunSummary| s.smae.iter().map(|c| c.stats).collect::<Vec<_>>();
    assert_eq!(smae(&a), smae(&b));
}

#[test]
fn test_trials_use_distinct_seeds() {
    let summary = runner(config(3, 300)).run(&mut NoOpReporter).unwrap();
    assert_eq!(summary.trials, 3);
    assert_eq!(summary.runtimes.len(), 3);
    assert_ne!(summary.correlation_errors[0], summary.correlation_errors[1]);
    assert_ne!(summary.correlation_errors[1], summary.correlation_errors[2]);
}

#[test]
fn test_summary_structure() {
    let summary = runner(config(2, 300)).run(&mut NoOpReporter).unwrap();
    assert_eq!(summary.smae.len(), 15);
    assert_eq!(summary.continuous_errors.len(), 5);
    assert_eq!(summary.continuous_error_trials.len(), 2);
    assert_eq!(summary.smae_by_kind.len(), 3);
    assert!(summary.correlation_error.std >= 0.0);
    assert!(summary.runtime.mean >= 0.0);
    for kind in ColumnKind::ALL {
        assert!(summary.kind(kind).is_some());
    }
}

#[test]
fn test_printed_report() {
    let mut runner = runner(config(2, 200));
    let mut reporter = PrintReporter::new(Vec::new());
    runner.run(&mut reporter).unwrap();
    let text = String::from_utf8(reporter.into_inner()).unwrap();

    assert!(text.starts_with("running 2 trials: 200 rows x 15 columns"));
    assert_eq!(text.matches("correlation error is:").count(), 2);
    assert!(text.contains("mean of correlation errors is:"));
    assert!(text.contains("mean cont smaes are: 1.000000"));
    assert!(text.contains("mean bin smaes are:"));
    assert!(text.contains("mean ord smaes are:"));
    assert!(text.contains("all runtimes were:"));
    assert!(text.contains("mean time for run is:"));
}
