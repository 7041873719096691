//! Small descriptive statistics used by the transforms, metrics and
//! aggregation. Inputs are plain slices; none of these functions look at the
//! missing-value sentinel, so callers filter first.
//!
//! Means, spreads, medians and ranks come from `statrs`; quantiles are
//! computed here because the ordinal cutoffs use linear interpolation between
//! order statistics (type 7), not the `statrs` default (type 8).

use statrs::statistics::{Data, Median, OrderStatistics, RankTieBreaker, Statistics};

/// Sorts a copy of `values` ascending (total order on `f64`).
pub fn sorted(values: &[f64]) -> Vec<f64> {
    let mut out = values.to_vec();
    out.sort_by(f64::total_cmp);
    out
}

/// Quantile `q ∈ [0, 1]` of sorted data, linearly interpolated between order
/// statistics. Returns `None` for empty input.
pub fn quantile_sorted(sorted: &[f64], q: f64) -> Option<f64> {
    let n = sorted.len();
    if n == 0 {
        return None;
    }
    let h = q.clamp(0.0, 1.0) * (n - 1) as f64;
    let lo = h.floor() as usize;
    let hi = (lo + 1).min(n - 1);
    let frac = h - lo as f64;
    Some(sorted[lo] + frac * (sorted[hi] - sorted[lo]))
}

/// Median (mean of the two middle values for even lengths). Returns `None`
/// for empty input.
pub fn median(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(Median::median(&Data::new(values.to_vec())))
}

/// Arithmetic mean. Returns `None` for empty input.
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(Statistics::mean(values))
}

/// Population standard deviation (divisor `n`). Returns `None` for empty
/// input.
pub fn population_std(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(Statistics::population_std_dev(values))
}

/// Ranks starting at 1, ties receiving the average of their positions.
/// Returns `None` if any value is NaN.
pub fn average_ranks(values: &[f64]) -> Option<Vec<f64>> {
    if values.iter().any(|v| v.is_nan()) {
        return None;
    }
    Some(Data::new(values.to_vec()).ranks(RankTieBreaker::Average))
}

/// Pearson correlation. `None` when fewer than two points or either side is
/// constant.
pub fn pearson(x: &[f64], y: &[f64]) -> Option<f64> {
    if x.len() != y.len() || x.len() < 2 {
        return None;
    }
    let mx = mean(x)?;
    let my = mean(y)?;
    let (mut sxy, mut sxx, mut syy) = (0.0, 0.0, 0.0);
    for (a, b) in x.iter().zip(y) {
        let dx = a - mx;
        let dy = b - my;
        sxy += dx * dy;
        sxx += dx * dx;
        syy += dy * dy;
    }
    if sxx <= 0.0 || syy <= 0.0 {
        return None;
    }
    Some((sxy / (sxx * syy).sqrt()).clamp(-1.0, 1.0))
}

/// Spearman rank correlation (Pearson correlation of average ranks).
pub fn spearman(x: &[f64], y: &[f64]) -> Option<f64> {
    if x.len() != y.len() {
        return None;
    }
    pearson(&average_ranks(x)?, &average_ranks(y)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_median() {
        assert_eq!(median(&[3.0, 1.0, 2.0]), Some(2.0));
        assert_eq!(median(&[4.0, 1.0, 3.0, 2.0]), Some(2.5));
        assert_eq!(median(&[]), None);
    }

    #[test]
    fn test_quantile_interpolates() {
        let s = [0.0, 10.0, 20.0, 30.0, 40.0];
        assert_eq!(quantile_sorted(&s, 0.0), Some(0.0));
        assert_eq!(quantile_sorted(&s, 1.0), Some(40.0));
        assert_relative_eq!(quantile_sorted(&s, 0.2).unwrap(), 8.0, epsilon = 1e-12);
    }

    #[test]
    fn test_mean_and_std() {
        let v = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        assert_relative_eq!(mean(&v).unwrap(), 5.0, epsilon = 1e-12);
        assert_relative_eq!(population_std(&v).unwrap(), 2.0, epsilon = 1e-12);
        assert_eq!(population_std(&[7.0]), Some(0.0));
        assert_eq!(mean(&[]), None);
        assert_eq!(population_std(&[]), None);
    }

    #[test]
    fn test_average_ranks_with_ties() {
        let ranks = average_ranks(&[10.0, 20.0, 10.0, 30.0]).unwrap();
        assert_eq!(ranks, vec![1.5, 3.0, 1.5, 4.0]);
        let ranks = average_ranks(&[5.0, 5.0, 5.0]).unwrap();
        assert_eq!(ranks, vec![2.0, 2.0, 2.0]);
        assert_eq!(average_ranks(&[1.0, f64::NAN]), None);
    }

    #[test]
    fn test_correlations() {
        let x = [1.0, 2.0, 3.0, 4.0];
        let y = [1.0, 4.0, 9.0, 16.0];
        assert_relative_eq!(spearman(&x, &y).unwrap(), 1.0, epsilon = 1e-12);
        assert!(pearson(&x, &y).unwrap() < 1.0);
        assert_eq!(pearson(&x, &[1.0, 1.0, 1.0, 1.0]), None);
        assert_eq!(spearman(&[1.0], &[2.0]), None);
        assert_eq!(spearman(&[1.0, f64::NAN, 3.0], &x[..3]), None);
    }
}
