//! Property tests for the synthetic data generator and the error metrics.
//!
//! Seeds and dimensions are drawn by proptest; every generated object must
//! satisfy the structural invariants regardless of the draw.

use copulaeval_core::prelude::*;
use proptest::prelude::*;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn correlation_is_unit_diagonal_symmetric_psd(seed in any::<u64>(), dim in 2usize..20) {
        let synthesizer = CorrelationSynthesizer::new(dim).unwrap();
        let mut rng = RandomSource::seeded(seed);
        let c = synthesizer.sample(&mut rng).unwrap();
        let m = c.as_matrix();

        for i in 0..dim {
            prop_assert!((m[(i, i)] - 1.0).abs() <= 1e-9);
            for j in 0..dim {
                prop_assert!((m[(i, j)] - m[(j, i)]).abs() <= 1e-9);
            }
        }
        prop_assert!(c.min_eigenvalue() >= -1e-9);
    }

    #[test]
    fn continuous_transform_is_non_negative(
        xs in prop::collection::vec(-50.0f64..50.0, 1..200),
        scale in 0.1f64..10.0,
    ) {
        let out = exponential_from_normal(&xs, scale).unwrap();
        prop_assert_eq!(out.len(), xs.len());
        prop_assert!(out.iter().all(|v| v.is_finite() && *v >= 0.0));
    }

    #[test]
    fn ordinal_levels_in_range_and_monotone(
        xs in prop::collection::vec(-5.0f64..5.0, 2..300),
        levels in 2usize..8,
    ) {
        let out = ordinalize(&xs, levels).unwrap();
        let max = (levels - 1) as f64;
        prop_assert!(out.iter().all(|v| *v >= 0.0 && *v <= max && v.fract() == 0.0));
        for (a, b) in xs.iter().zip(&out) {
            for (c, d) in xs.iter().zip(&out) {
                if a < c {
                    prop_assert!(b <= d);
                }
            }
        }
    }

    #[test]
    fn scaled_error_is_non_negative(
        truth in prop::collection::vec(0.1f64..10.0, 9),
        noise in prop::collection::vec(-1.0f64..1.0, 9),
    ) {
        let truth = DMatrix::from_row_slice(3, 3, &truth);
        let estimate = &truth + DMatrix::from_row_slice(3, 3, &noise);
        let e = scaled_error(&estimate, &truth).unwrap();
        prop_assert!(e >= 0.0);
        prop_assert_eq!(scaled_error(&truth, &truth).unwrap(), 0.0);
    }

    #[test]
    fn binary_columns_are_indicators(seed in any::<u64>()) {
        let mut rng = RandomSource::seeded(seed);
        let column: Vec<f64> = (0..200).map(|_| rng.standard_normal()).collect();
        let out = binarize(&column, BinaryCutoff::default(), &mut rng).unwrap();
        prop_assert!(out.iter().all(|v| *v == 0.0 || *v == 1.0));
        let ones = out.iter().filter(|v| **v == 1.0).count();
        prop_assert!(ones > 0 && ones < 200);
    }
}

#[test]
fn mask_fraction_converges_over_trials() {
    let data = DMatrix::zeros(2000, 15);
    let masker = MissingnessMasker::new(0.3).unwrap();
    let mut total = 0usize;
    for seed in 1..=10 {
        let mut rng = RandomSource::seeded(seed);
        let masked = masker.apply(&data, &mut rng).unwrap();
        let count = masked.indices().len();
        assert!(
            (count as f64 - 9000.0).abs() < 450.0,
            "seed {seed}: {count} masked entries"
        );
        total += count;
    }
    let fraction = total as f64 / (10.0 * 2000.0 * 15.0);
    assert!((fraction - 0.3).abs() < 0.005, "empirical fraction {fraction}");
}
