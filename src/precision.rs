//! Coefficient post-processing.
//!
//! Solved coefficients carry floating point noise from the elimination: a
//! term that should vanish comes back as `3.2e-17`, and an exact `1` comes
//! back as `0.9999999999999998`. Rounding to a fixed number of significant
//! digits removes that noise before the coefficients are scored, sampled or
//! displayed.
use crate::{
    error::{Error, Result},
    value::Value,
};

/// Default number of significant digits kept on each coefficient.
pub const DEFAULT_PRECISION: usize = 15;

/// Largest precision that still means something for an `f64`.
pub const MAX_PRECISION: usize = 17;

/// Rounds a single value to `precision` significant decimal digits.
///
/// - Values with `|v| < 10^-precision` become exactly zero
/// - Non-finite values are returned unchanged
///
/// # Errors
/// - [`Error::InvalidConfig`] if `precision` is 0
/// - [`Error::CastFailed`] if the value cannot be represented as an `f64` and back
///
/// # Example
/// ```
/// # use slicefit::precision::round_significant;
/// assert_eq!(round_significant(0.999_999_999_999_999_8, 15).unwrap(), 1.0);
/// assert_eq!(round_significant(3.2e-17, 15).unwrap(), 0.0);
/// assert_eq!(round_significant(123.456, 4).unwrap(), 123.5);
/// ```
pub fn round_significant<T: Value>(value: T, precision: usize) -> Result<T> {
    if precision == 0 {
        return Err(Error::InvalidConfig("precision must be at least 1"));
    }

    if !value.is_finite_value() {
        return Ok(value);
    }

    let exponent = i32::try_from(precision).map_err(|_| Error::CastFailed)?;
    let threshold = T::try_cast(10f64.powi(-exponent))?;
    if Value::abs(value) < threshold {
        return Ok(T::zero());
    }

    // Scientific formatting rounds to exactly `precision` significant digits
    let v: f64 = num_traits::cast(value).ok_or(Error::CastFailed)?;
    let rounded: f64 = format!("{:.*e}", precision - 1, v)
        .parse()
        .map_err(|_| Error::CastFailed)?;

    T::try_cast(rounded)
}

/// Rounds every coefficient with [`round_significant`], preserving order and length.
///
/// # Errors
/// See [`round_significant`].
pub fn round_coefficients<T: Value>(coefficients: &[T], precision: usize) -> Result<Vec<T>> {
    coefficients
        .iter()
        .map(|&c| round_significant(c, precision))
        .collect()
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn test_negligible_values_snap_to_zero() {
        assert_eq!(round_significant(1e-16, 15).unwrap(), 0.0);
        assert_eq!(round_significant(-4e-16, 15).unwrap(), 0.0);
        assert_eq!(round_significant(0.0, 15).unwrap(), 0.0);

        // Threshold follows the precision
        assert_eq!(round_significant(5e-4, 3).unwrap(), 0.0);
        assert_eq!(round_significant(5e-3, 3).unwrap(), 5e-3);
    }

    #[test]
    fn test_significant_digits() {
        assert_eq!(round_significant(2.000_000_000_000_000_4, 15).unwrap(), 2.0);
        assert_eq!(round_significant(-1.000_000_000_000_001, 15).unwrap(), -1.0);
        assert_eq!(round_significant(98_765.4321, 3).unwrap(), 98_800.0);
        assert_eq!(round_significant(-0.012_345, 2).unwrap(), -0.012);
        assert_eq!(round_significant(1.0 / 3.0, 5).unwrap(), 0.333_33);
    }

    #[test]
    fn test_non_finite_passthrough() {
        assert!(round_significant(f64::NAN, 15).unwrap().is_nan());
        assert_eq!(round_significant(f64::INFINITY, 15).unwrap(), f64::INFINITY);
        assert_eq!(
            round_significant(f64::NEG_INFINITY, 15).unwrap(),
            f64::NEG_INFINITY
        );
    }

    #[test]
    fn test_zero_precision_rejected() {
        assert!(matches!(
            round_significant(1.0, 0),
            Err(Error::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_round_coefficients() {
        let raw = [0.999_999_999_999_999_8, 2.3e-17, -3.000_000_000_000_001];
        let rounded = round_coefficients(&raw, DEFAULT_PRECISION).unwrap();
        assert_eq!(rounded, vec![1.0, 0.0, -3.0]);

        let f32s = round_coefficients(&[1.234_567_f32, 1e-9], 3).unwrap();
        assert_eq!(f32s, vec![1.23_f32, 0.0]);
    }
}
