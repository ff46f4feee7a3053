use std::sync::Arc;

use crate::{
    error::RuntimeError,
    interpreter::{evaluator::core::EvalResult, value::core::Value},
    util::num::{f64_to_i64_exact, f64_to_i64_saturating, i64_to_usize},
};

/// Structural equality as used by `==`, `!=` and `in`.
///
/// - Arrays are equal if they have the same length and their elements are
///   pairwise deep-equal.
/// - Records are equal if they have the same keys and the values under each
///   key are deep-equal. Key order does not matter.
/// - Two integers compare exactly. An integer equals a real with the same
///   numeric value.
/// - Host values are equal only to themselves.
/// - Values of any other differing types are unequal.
///
/// # Example
/// ```
/// use dynexpr::{Value, interpreter::evaluator::utils::deep_equal};
///
/// let a = Value::from(vec![Value::Integer(1), Value::from("x")]);
/// let b = Value::from(vec![Value::Real(1.0), Value::from("x")]);
/// assert!(deep_equal(&a, &b));
/// assert!(!deep_equal(&Value::Null, &Value::Bool(false)));
/// ```
#[must_use]
pub fn deep_equal(left: &Value, right: &Value) -> bool {
    match (left, right) {
        (Value::Array(a), Value::Array(b)) => {
            a.len() == b.len() && a.iter().zip(b.iter()).all(|(a, b)| deep_equal(a, b))
        },
        (Value::Record(a), Value::Record(b)) => {
            a.len() == b.len()
            && a.iter()
                .all(|(key, a)| b.get(key).is_some_and(|b| deep_equal(a, b)))
        },
        (Value::Host(a), Value::Host(b)) => Arc::ptr_eq(a, b),
        (Value::Integer(a), Value::Integer(b)) => a == b,
        _ if left.is_number() && right.is_number() => left.as_f64() == right.as_f64(),
        _ => left == right,
    }
}

/// Converts an array index to an integer.
///
/// Integers are used as they are. Reals must be whole numbers. Whole reals
/// beyond the `i64` range are clamped, which the range check then rejects.
///
/// # Errors
/// - `ArrayIndexType` if the index is not a number.
/// - `FractionalIndex` if a real index has a fractional part.
pub fn array_index(index: &Value) -> EvalResult<i64> {
    match index {
        Value::Integer(n) => Ok(*n),
        Value::Real(r) => match f64_to_i64_exact(*r) {
            Some(n) => Ok(n),
            // Whole but beyond i64: no array is that long.
            None if r.is_finite() && r.fract() == 0.0 => Ok(f64_to_i64_saturating(*r)),
            None => Err(RuntimeError::FractionalIndex { index: *r }),
        },
        other => Err(RuntimeError::ArrayIndexType { found: other.type_name().to_string() }),
    }
}

/// Checks that `index` lies in `[0, length)` and converts it to `usize`.
///
/// # Errors
/// `IndexOutOfRange` otherwise.
pub fn checked_index(index: i64, length: usize) -> EvalResult<usize> {
    i64_to_usize(index).filter(|&i| i < length)
                       .ok_or(RuntimeError::IndexOutOfRange { index, length })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interpreter::value::{host::HostValue, record::Record};

    #[derive(Debug)]
    struct Opaque;

    impl HostValue for Opaque {}

    #[test]
    fn integer_and_real_are_equal_by_value() {
        assert!(deep_equal(&Value::Integer(3), &Value::Real(3.0)));
        assert!(!deep_equal(&Value::Integer(3), &Value::Real(3.5)));
        assert!(!deep_equal(&Value::Real(f64::NAN), &Value::Real(f64::NAN)));
    }

    #[test]
    fn large_integers_compare_exactly() {
        let above = Value::Integer(9_007_199_254_740_993);
        let below = Value::Integer(9_007_199_254_740_992);
        assert!(!deep_equal(&above, &below));
        assert!(deep_equal(&above, &above.clone()));
        assert!(!deep_equal(&Value::Integer(i64::MAX), &Value::Integer(i64::MAX - 1)));
        let nested = Value::from(vec![above.clone()]);
        assert!(!deep_equal(&nested, &Value::from(vec![below])));
    }

    #[test]
    fn records_ignore_key_order() {
        let a: Record = [("x", Value::Integer(1)), ("y", Value::Null)].into_iter().collect();
        let b: Record = [("y", Value::Null), ("x", Value::Real(1.0))].into_iter().collect();
        let c: Record = [("x", Value::Integer(1)), ("z", Value::Null)].into_iter().collect();
        assert!(deep_equal(&a.clone().into(), &b.into()));
        assert!(!deep_equal(&a.into(), &c.into()));
    }

    #[test]
    fn host_values_compare_by_identity() {
        let a = Value::host(Opaque);
        let b = Value::host(Opaque);
        assert!(deep_equal(&a, &a.clone()));
        assert!(!deep_equal(&a, &b));
    }

    #[test]
    fn index_conversion() {
        assert_eq!(array_index(&Value::Real(2.0)).unwrap(), 2);
        assert_eq!(array_index(&Value::Real(0.5)).unwrap_err(),
                   RuntimeError::FractionalIndex { index: 0.5 });
        assert_eq!(array_index(&Value::from("0")).unwrap_err().to_string(),
                   "syntax error: array index must be number, but was string");
        assert_eq!(checked_index(-1, 3).unwrap_err().to_string(),
                   "var error: array index -1 is out of range [0, 3]");
        assert_eq!(checked_index(3, 3).unwrap_err(), RuntimeError::IndexOutOfRange { index: 3, length: 3 });
        assert_eq!(checked_index(2, 3).unwrap(), 2);
    }

    #[test]
    fn huge_whole_indices_are_out_of_range() {
        let index = array_index(&Value::Real(1e19)).unwrap();
        assert_eq!(index, i64::MAX);
        assert!(matches!(checked_index(index, 4), Err(RuntimeError::IndexOutOfRange { .. })));
        assert_eq!(array_index(&Value::Real(-1e19)).unwrap(), i64::MIN);
        assert_eq!(array_index(&Value::Real(f64::INFINITY)).unwrap_err().to_string(),
                   "eval error: array index must be whole number, but was +Inf");
    }
}
