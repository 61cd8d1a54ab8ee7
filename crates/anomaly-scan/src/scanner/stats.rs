//! Column statistics for the spike rule.
//!
//! Plain arithmetic over `f64` slices where missing entries are NaN. Under
//! [`MissingValuePolicy::Propagate`] a NaN anywhere in the input makes the
//! result NaN, because it flows through the sum.

use crate::config::MissingValuePolicy;
use crate::utils::is_missing;

/// Arithmetic mean. NaN for an empty input.
pub(crate) fn mean(values: &[f64], policy: MissingValuePolicy) -> f64 {
    let (sum, n) = usable(values, policy).fold((0.0, 0usize), |(sum, n), v| (sum + v, n + 1));
    sum / n as f64
}

/// Sample standard deviation (divisor N - 1) around a precomputed mean.
///
/// NaN when fewer than two entries take part.
pub(crate) fn sample_std(values: &[f64], mean: f64, policy: MissingValuePolicy) -> f64 {
    let (sum_sq, n) = usable(values, policy).fold((0.0, 0usize), |(sum_sq, n), v| {
        (sum_sq + (v - mean).powi(2), n + 1)
    });

    if n < 2 {
        return f64::NAN;
    }

    (sum_sq / (n - 1) as f64).sqrt()
}

fn usable(values: &[f64], policy: MissingValuePolicy) -> impl Iterator<Item = f64> + '_ {
    values
        .iter()
        .copied()
        .filter(move |v| policy == MissingValuePolicy::Propagate || !is_missing(*v))
}

#[cfg(test)]
mod tests {
    use super::*;

    const PROPAGATE: MissingValuePolicy = MissingValuePolicy::Propagate;
    const SKIP: MissingValuePolicy = MissingValuePolicy::Skip;

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_mean_basic() {
        assert!(approx_eq(mean(&[70.0, 72.0, 71.0, 69.0], PROPAGATE), 70.5));
    }

    #[test]
    fn test_mean_empty_is_nan() {
        assert!(mean(&[], PROPAGATE).is_nan());
        assert!(mean(&[f64::NAN], SKIP).is_nan());
    }

    #[test]
    fn test_sample_std_uses_n_minus_one() {
        // deviations -2, 0, 2 -> sum of squares 8, / (3 - 1) = 4
        let values = [1.0, 3.0, 5.0];
        let m = mean(&values, PROPAGATE);
        assert!(approx_eq(sample_std(&values, m, PROPAGATE), 2.0));
    }

    #[test]
    fn test_sample_std_single_value_is_nan() {
        assert!(sample_std(&[5.0], 5.0, PROPAGATE).is_nan());
        assert!(sample_std(&[], f64::NAN, PROPAGATE).is_nan());
    }

    #[test]
    fn test_constant_column_has_zero_std() {
        let values = [5.0; 4];
        assert_eq!(sample_std(&values, mean(&values, PROPAGATE), PROPAGATE), 0.0);
    }

    #[test]
    fn test_missing_values_propagate() {
        let values = [70.0, f64::NAN, 72.0];
        let m = mean(&values, PROPAGATE);
        assert!(m.is_nan());
        assert!(sample_std(&values, m, PROPAGATE).is_nan());
    }

    #[test]
    fn test_missing_values_skipped() {
        let values = [70.0, f64::NAN, 72.0];
        let m = mean(&values, SKIP);
        assert!(approx_eq(m, 71.0));
        assert!(approx_eq(sample_std(&values, m, SKIP), 2f64.sqrt()));
    }

    #[test]
    fn test_skip_with_one_usable_value_is_nan_std() {
        let values = [f64::NAN, 3.0, f64::NAN];
        let m = mean(&values, SKIP);
        assert_eq!(m, 3.0);
        assert!(sample_std(&values, m, SKIP).is_nan());
    }
}
