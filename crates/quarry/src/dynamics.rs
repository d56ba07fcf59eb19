//! Relative-change arithmetic with fixed zero-baseline conventions.
//!
//! Year-over-year dynamics, momentum features and the derived valuation
//! ratios all funnel through the two functions here, so the degenerate
//! cases are handled once and identically everywhere.

/// Relative change of `newer` against `older`.
///
/// The regular case is `(newer - older) / |older|`. The degenerate cases
/// follow a fixed convention rather than raising:
///
/// * a missing input yields a missing result;
/// * a change from exactly zero has no finite percentage, so the value is
///   collapsed to its leading decade — see [`zero_base_proxy`];
/// * a zero-to-zero change is `0`.
///
/// The branch order is part of the contract: the missing check precedes the
/// zero checks, and the zero-baseline proxy applies only to a nonzero
/// `newer`.
pub fn dynamics(newer: Option<f64>, older: Option<f64>) -> Option<f64> {
    let newer = newer?;
    let older = older?;
    if older == 0.0 && newer != 0.0 {
        return Some(zero_base_proxy(newer));
    }
    if older == 0.0 && newer == 0.0 {
        return Some(0.0);
    }
    Some((newer - older) / older.abs())
}

/// Quotient of two fields under the same degenerate-case convention as
/// [`dynamics`].
///
/// A missing numerator or denominator yields a missing result; a zero
/// denominator with a nonzero numerator yields the numerator's
/// [`zero_base_proxy`]; `0 / 0` is `0`; otherwise the plain quotient.
pub fn ratio(numerator: Option<f64>, denominator: Option<f64>) -> Option<f64> {
    let numerator = numerator?;
    let denominator = denominator?;
    if denominator == 0.0 && numerator != 0.0 {
        return Some(zero_base_proxy(numerator));
    }
    if denominator == 0.0 && numerator == 0.0 {
        return Some(0.0);
    }
    Some(numerator / denominator)
}

/// Bounded, sign-preserving proxy for a change from a zero baseline.
///
/// `value / 10^floor(log10(|value|))` — the value collapsed to its leading
/// decade, keeping the sign with a magnitude in `[1, 10)`. Not a real
/// percentage; a deliberate stand-in for the unbounded change from zero.
/// `value` must be nonzero.
pub fn zero_base_proxy(value: f64) -> f64 {
    value / 10f64.powi(value.abs().log10().floor() as i32)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rstest::rstest;

    #[test]
    fn regular_relative_change() {
        assert_relative_eq!(dynamics(Some(110.0), Some(100.0)).unwrap(), 0.10);
        assert_relative_eq!(dynamics(Some(90.0), Some(100.0)).unwrap(), -0.10);
    }

    #[test]
    fn negative_baseline_uses_absolute_denominator() {
        // (50 - -100) / |-100| = 1.5
        assert_relative_eq!(dynamics(Some(50.0), Some(-100.0)).unwrap(), 1.5);
    }

    #[test]
    fn missing_propagates() {
        assert_eq!(dynamics(None, Some(100.0)), None);
        assert_eq!(dynamics(Some(100.0), None), None);
        assert_eq!(dynamics(None, None), None);
    }

    #[test]
    fn zero_to_zero_is_zero() {
        assert_eq!(dynamics(Some(0.0), Some(0.0)), Some(0.0));
    }

    #[rstest]
    #[case(0.04)]
    #[case(0.5)]
    #[case(7.0)]
    #[case(-7.0)]
    #[case(123.45)]
    #[case(-0.003)]
    #[case(9999.0)]
    fn zero_baseline_proxy_is_bounded_and_sign_preserving(#[case] newer: f64) {
        let result = dynamics(Some(newer), Some(0.0)).unwrap();
        assert_eq!(result.signum(), newer.signum());
        assert!(
            (1.0..10.0).contains(&result.abs()),
            "|{result}| out of [1, 10) for {newer}"
        );
    }

    #[test]
    fn proxy_collapses_to_leading_decade() {
        assert_relative_eq!(zero_base_proxy(123.45), 1.2345);
        assert_relative_eq!(zero_base_proxy(0.04), 4.0);
        assert_relative_eq!(zero_base_proxy(-7.0), -7.0);
    }

    #[test]
    fn ratio_plain_quotient() {
        assert_relative_eq!(ratio(Some(10.0), Some(4.0)).unwrap(), 2.5);
        // Unlike dynamics, the sign of the denominator carries through.
        assert_relative_eq!(ratio(Some(10.0), Some(-4.0)).unwrap(), -2.5);
    }

    #[test]
    fn ratio_degenerate_cases() {
        assert_eq!(ratio(None, Some(1.0)), None);
        assert_eq!(ratio(Some(1.0), None), None);
        assert_eq!(ratio(Some(0.0), Some(0.0)), Some(0.0));
        let proxied = ratio(Some(5.0), Some(0.0)).unwrap();
        assert_relative_eq!(proxied, 5.0);
        assert!((1.0..10.0).contains(&proxied.abs()));
    }
}
