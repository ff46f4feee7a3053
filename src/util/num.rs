/// Lower bound (inclusive) of the `f64` values that fit into an `i64`.
const I64_LOWER: f64 = -9_223_372_036_854_775_808.0;
/// Upper bound (exclusive) of the `f64` values that fit into an `i64`.
const I64_UPPER: f64 = 9_223_372_036_854_775_808.0;

/// Converts an `f64` to `i64` if and only if the conversion is exact.
///
/// # Returns
/// - `Some(i64)`: If the value is finite, has no fractional part and lies
///   within the `i64` range.
/// - `None`: Otherwise.
///
/// # Example
/// ```
/// use dynexpr::util::num::f64_to_i64_exact;
///
/// assert_eq!(f64_to_i64_exact(-12.0), Some(-12));
/// assert_eq!(f64_to_i64_exact(0.5), None);
/// assert_eq!(f64_to_i64_exact(1e19), None);
/// assert_eq!(f64_to_i64_exact(f64::NAN), None);
/// ```
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn f64_to_i64_exact(value: f64) -> Option<i64> {
    if !value.is_finite() || value.fract() != 0.0 {
        return None;
    }
    if !(I64_LOWER..I64_UPPER).contains(&value) {
        return None;
    }
    Some(value as i64)
}

/// Converts a whole `f64` to `i64`, clamping values outside the `i64` range
/// to `i64::MIN` or `i64::MAX`.
///
/// # Example
/// ```
/// use dynexpr::util::num::f64_to_i64_saturating;
///
/// assert_eq!(f64_to_i64_saturating(1e19), i64::MAX);
/// assert_eq!(f64_to_i64_saturating(-1e19), i64::MIN);
/// assert_eq!(f64_to_i64_saturating(7.0), 7);
/// ```
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub const fn f64_to_i64_saturating(value: f64) -> i64 {
    value as i64
}

/// Formats a real number the way string concatenation renders it.
///
/// Finite values use the shortest decimal representation that round-trips,
/// without an exponent. Non-finite values are rendered as `+Inf`, `-Inf` and
/// `NaN`.
///
/// # Example
/// ```
/// use dynexpr::util::num::format_real;
///
/// assert_eq!(format_real(4.2), "4.2");
/// assert_eq!(format_real(42.0), "42");
/// assert_eq!(format_real(1e21), "1000000000000000000000");
/// assert_eq!(format_real(f64::NEG_INFINITY), "-Inf");
/// ```
#[must_use]
pub fn format_real(value: f64) -> String {
    if value.is_nan() {
        "NaN".to_string()
    } else if value == f64::INFINITY {
        "+Inf".to_string()
    } else if value == f64::NEG_INFINITY {
        "-Inf".to_string()
    } else {
        format!("{value}")
    }
}

/// Converts a slice bound or index to `usize`, treating negatives as absent.
#[must_use]
pub fn i64_to_usize(value: i64) -> Option<usize> {
    usize::try_from(value).ok()
}

/// Converts a length or byte offset to `i64` for error reporting.
#[must_use]
pub fn usize_to_i64(value: usize) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_conversion_at_the_edges() {
        assert_eq!(f64_to_i64_exact(I64_LOWER), Some(i64::MIN));
        assert_eq!(f64_to_i64_exact(I64_UPPER), None);
        assert_eq!(f64_to_i64_exact(-0.0), Some(0));
    }

    #[test]
    fn format_small_and_negative_values() {
        assert_eq!(format_real(0.000_001), "0.000001");
        assert_eq!(format_real(-2.5), "-2.5");
        assert_eq!(format_real(f64::NAN), "NaN");
    }
}
