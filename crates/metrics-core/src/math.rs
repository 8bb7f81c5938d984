//! Null-tolerant arithmetic shared by every calculator.

use std::f64::consts::PI;

/// `n / d`, or `None` when either side is missing or `d` is zero.
pub fn safe_div(n: Option<f64>, d: Option<f64>) -> Option<f64> {
    let (n, d) = (n?, d?);
    if d == 0.0 {
        return None;
    }
    Some(n / d)
}

/// Compound growth rate `(latest / base)^(1 / periods) - 1`.
///
/// Returns `None` when either input is missing or exactly zero, or when
/// `periods` is zero. A negative ratio raised to a fractional power has no
/// real root; the real part of the principal complex root is used instead,
/// i.e. `|r|^(1/p) * cos(pi/p) - 1`.
pub fn cagr(latest: Option<f64>, base: Option<f64>, periods: u32) -> Option<f64> {
    let (latest, base) = (latest?, base?);
    if latest == 0.0 || base == 0.0 || periods == 0 {
        return None;
    }

    let ratio = latest / base;
    let exponent = 1.0 / periods as f64;
    let growth = if ratio < 0.0 && periods > 1 {
        ratio.abs().powf(exponent) * (PI * exponent).cos()
    } else {
        ratio.powf(exponent)
    };

    let rate = growth - 1.0;
    rate.is_finite().then_some(rate)
}

/// Sum of all values, `None` if any of them is missing.
pub fn sum_all<I>(values: I) -> Option<f64>
where
    I: IntoIterator<Item = Option<f64>>,
{
    values.into_iter().sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_safe_div() {
        assert_eq!(safe_div(Some(10.0), Some(0.0)), None);
        assert_eq!(safe_div(None, Some(2.0)), None);
        assert_eq!(safe_div(Some(2.0), None), None);
        assert_eq!(safe_div(Some(340.0), Some(1000.0)), Some(340.0 / 1000.0));
        assert_eq!(safe_div(Some(-3.0), Some(4.0)), Some(-0.75));
    }

    #[test]
    fn test_cagr_rejects_zero_and_missing() {
        assert_eq!(cagr(Some(5.0), Some(0.0), 3), None);
        assert_eq!(cagr(Some(0.0), Some(5.0), 3), None);
        assert_eq!(cagr(None, Some(5.0), 3), None);
        assert_eq!(cagr(Some(5.0), None, 3), None);
        assert_eq!(cagr(Some(5.0), Some(4.0), 0), None);
    }

    #[test]
    fn test_cagr_positive() {
        assert_eq!(cagr(Some(121.0), Some(100.0), 2), Some((121.0f64 / 100.0).powf(0.5) - 1.0));
        let one_year = cagr(Some(110.0), Some(100.0), 1).unwrap();
        assert!((one_year - 0.1).abs() < 1e-12);
    }

    #[test]
    fn test_cagr_negative_ratio_uses_real_part() {
        // cube root of -8 on the principal branch is 1 + i*sqrt(3)
        let rate = cagr(Some(-8.0), Some(1.0), 3).unwrap();
        assert!(rate.abs() < 1e-12);

        // single period keeps the plain (negative) ratio
        let rate = cagr(Some(-50.0), Some(100.0), 1).unwrap();
        assert!((rate + 1.5).abs() < 1e-12);

        // square root of a negative ratio is purely imaginary
        let rate = cagr(Some(-4.0), Some(1.0), 2).unwrap();
        assert!((rate + 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_sum_all() {
        assert_eq!(sum_all([Some(1.0), Some(2.5)]), Some(3.5));
        assert_eq!(sum_all([Some(1.0), None]), None);
        assert_eq!(sum_all(Vec::new()), Some(0.0));
    }
}
