use std::sync::Arc;

use crate::{
    ast::LiteralValue,
    error::RuntimeError,
    interpreter::{
        evaluator::core::EvalResult,
        value::{host::HostValue, record::Record},
    },
    util::num::{f64_to_i64_exact, format_real},
};

/// Represents a runtime value in the interpreter.
///
/// Values are immutable. Containers are shared behind an [`Arc`], so cloning
/// a value is cheap and a value can be handed to other threads.
#[derive(Debug, Clone)]
pub enum Value {
    /// The `nil` value.
    Null,
    /// A boolean value (`true` or `false`).
    Bool(bool),
    /// A 64 bit signed integer.
    Integer(i64),
    /// A double precision floating-point number.
    Real(f64),
    /// A UTF-8 string, indexed by byte offsets.
    Text(Arc<str>),
    /// An ordered, possibly heterogeneous list.
    Array(Arc<Vec<Self>>),
    /// A string-keyed map that keeps insertion order.
    Record(Arc<Record>),
    /// A caller-owned value exposed through [`HostValue`].
    Host(Arc<dyn HostValue>),
}

impl Value {
    /// Wraps a caller-owned value.
    pub fn host(value: impl HostValue + 'static) -> Self {
        Self::Host(Arc::new(value))
    }

    /// Returns the name of the value's type as it appears in error messages.
    ///
    /// Integers and reals are both reported as `number`. Host values report
    /// their own [`HostValue::type_name`].
    ///
    /// # Example
    /// ```
    /// use dynexpr::Value;
    ///
    /// assert_eq!(Value::Null.type_name(), "nil");
    /// assert_eq!(Value::from(1.5).type_name(), "number");
    /// assert_eq!(Value::from(Vec::<Value>::new()).type_name(), "array");
    /// ```
    #[must_use]
    pub fn type_name(&self) -> &str {
        match self {
            Self::Null => "nil",
            Self::Bool(_) => "bool",
            Self::Integer(_) | Self::Real(_) => "number",
            Self::Text(_) => "string",
            Self::Array(_) => "array",
            Self::Record(_) => "object",
            Self::Host(host) => host.type_name(),
        }
    }

    /// Converts the value to a `bool`, or returns an error if it is not a
    /// boolean.
    ///
    /// # Returns
    /// - `Ok(bool)`: If the value is `Bool`.
    /// - `Err(RuntimeError::RequiredBool)`: Otherwise.
    pub fn as_bool(&self) -> EvalResult<bool> {
        match self {
            Self::Bool(b) => Ok(*b),
            other => Err(RuntimeError::RequiredBool { found: other.type_name().to_string() }),
        }
    }

    /// Converts the value to an `i64` without losing precision.
    ///
    /// Integers are returned unchanged. Reals are accepted when they have no
    /// fractional part and fit into 64 bits.
    ///
    /// # Returns
    /// - `Ok(i64)`: If the value is integral.
    /// - `Err(RuntimeError::LossyFloatCast)`: For reals that are not integral.
    /// - `Err(RuntimeError::RequiredInteger)`: For every other type.
    ///
    /// # Example
    /// ```
    /// use dynexpr::{Value, error::RuntimeError};
    ///
    /// assert_eq!(Value::from(3.0).as_integer().unwrap(), 3);
    /// assert_eq!(Value::from(3.5).as_integer().unwrap_err(), RuntimeError::LossyFloatCast);
    /// ```
    pub fn as_integer(&self) -> EvalResult<i64> {
        match self {
            Self::Integer(n) => Ok(*n),
            Self::Real(r) => f64_to_i64_exact(*r).ok_or(RuntimeError::LossyFloatCast),
            other => Err(RuntimeError::RequiredInteger { found: other.type_name().to_string() }),
        }
    }

    /// Returns the numeric value as `f64` for integers and reals.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub const fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Integer(n) => Some(*n as f64),
            Self::Real(r) => Some(*r),
            _ => None,
        }
    }

    /// Returns the string slice for text values.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Returns `true` for `Integer` and `Real`.
    #[must_use]
    pub const fn is_number(&self) -> bool {
        matches!(self, Self::Integer(_) | Self::Real(_))
    }
}

/// Strict structural equality.
///
/// Unlike the `==` operator of the language, an `Integer` never equals a
/// `Real` here, which keeps test assertions exact. Records compare without
/// regard to order and host values compare by identity.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Null, Self::Null) => true,
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::Integer(a), Self::Integer(b)) => a == b,
            (Self::Real(a), Self::Real(b)) => a == b,
            (Self::Text(a), Self::Text(b)) => a == b,
            (Self::Array(a), Self::Array(b)) => a == b,
            (Self::Record(a), Self::Record(b)) => a == b,
            (Self::Host(a), Self::Host(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Self::Integer(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Real(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::Text(Arc::from(v))
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::Text(Arc::from(v))
    }
}

impl From<Vec<Self>> for Value {
    fn from(v: Vec<Self>) -> Self {
        Self::Array(Arc::new(v))
    }
}

impl From<Record> for Value {
    fn from(v: Record) -> Self {
        Self::Record(Arc::new(v))
    }
}

impl From<&LiteralValue> for Value {
    fn from(lit: &LiteralValue) -> Self {
        match lit {
            LiteralValue::Nil => Self::Null,
            LiteralValue::Bool(b) => (*b).into(),
            LiteralValue::Integer(i) => (*i).into(),
            LiteralValue::Real(r) => (*r).into(),
            LiteralValue::Text(s) => Self::Text(Arc::clone(s)),
        }
    }
}

/// Renders the value close to the literal syntax of the language.
///
/// Strings are quoted, reals always show a decimal point or exponent so they
/// can be told apart from integers.
///
/// # Example
/// ```
/// use dynexpr::Value;
///
/// let value = Value::from(vec![Value::from(1), Value::from(2.5), Value::from("x"), Value::Null]);
/// assert_eq!(value.to_string(), r#"[1, 2.5, "x", nil]"#);
/// ```
impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Null => write!(f, "nil"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Integer(n) => write!(f, "{n}"),
            Self::Real(r) if r.is_finite() => write!(f, "{r:?}"),
            Self::Real(r) => write!(f, "{}", format_real(*r)),
            Self::Text(s) => write!(f, "{s:?}"),
            Self::Array(a) => {
                write!(f, "[")?;

                for (index, value) in a.iter().enumerate() {
                    if index > 0 {
                        write!(f, ", ")?;
                    }

                    write!(f, "{value}")?;
                }

                write!(f, "]")
            },
            Self::Record(r) => {
                write!(f, "{{")?;

                for (index, (key, value)) in r.iter().enumerate() {
                    if index > 0 {
                        write!(f, ", ")?;
                    }

                    write!(f, "{key:?}: {value}")?;
                }

                write!(f, "}}")
            },
            Self::Host(host) => write!(f, "<{}>", host.type_name()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct Opaque;

    impl HostValue for Opaque {}

    #[test]
    fn strict_equality_keeps_integer_and_real_apart() {
        assert_ne!(Value::Integer(42), Value::Real(42.0));
        assert_eq!(Value::from(vec![Value::Integer(1)]), Value::from(vec![Value::Integer(1)]));
    }

    #[test]
    fn host_values_compare_by_identity() {
        let a = Value::host(Opaque);
        let b = Value::host(Opaque);
        assert_eq!(a, a.clone());
        assert_ne!(a, b);
        assert_eq!(a.type_name(), "<unknown type>");
    }

    #[test]
    fn as_integer_rejects_non_numbers() {
        assert_eq!(Value::from("1").as_integer(),
                   Err(RuntimeError::RequiredInteger { found: "string".into() }));
        assert_eq!(Value::Null.as_bool(), Err(RuntimeError::RequiredBool { found: "nil".into() }));
    }

    #[test]
    fn display_marks_reals_and_records() {
        let record: Record = [("a", Value::from(1.0))].into_iter().collect();
        assert_eq!(Value::from(record).to_string(), r#"{"a": 1.0}"#);
        assert_eq!(Value::Real(f64::INFINITY).to_string(), "+Inf");
    }
}
