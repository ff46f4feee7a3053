use crate::util::num::format_real;

#[derive(Debug, Clone, PartialEq)]
/// Represents all errors that can occur during evaluation.
///
/// Type names stored in the variants are the names reported by
/// [`Value::type_name`](crate::interpreter::value::core::Value::type_name).
pub enum RuntimeError {
    /// `!`, `&&` or `||` applied to a non-boolean.
    RequiredBool {
        /// Type of the offending operand.
        found: String,
    },
    /// A bitwise operand, shift amount or slice bound that is not a number.
    RequiredInteger {
        /// Type of the offending operand.
        found: String,
    },
    /// A float with a fractional part where an integer is required.
    LossyFloatCast,
    /// Unary minus applied to a non-number.
    UnaryMinus {
        /// Type of the operand.
        found: String,
    },
    /// Arithmetic operator applied to unsupported operand types.
    InvalidOperands {
        /// Verb phrase naming the operation, e.g. `add or concatenate`.
        action: &'static str,
        /// Type of the left operand.
        left:   String,
        /// Type of the right operand.
        right:  String,
    },
    /// Integer division or remainder by zero.
    DivisionByZero,
    /// A record key that is not a string.
    ObjectKeyType {
        /// Type of the key.
        found: String,
    },
    /// An array index that is not a number.
    ArrayIndexType {
        /// Type of the index.
        found: String,
    },
    /// An array index with a fractional part.
    FractionalIndex {
        /// The offending index.
        index: f64,
    },
    /// A record or host object without the requested member.
    NoSuchMember {
        /// Name of the member.
        name: String,
    },
    /// An index outside the bounds of an array or host sequence.
    IndexOutOfRange {
        /// The requested index.
        index:  i64,
        /// Length of the sequence.
        length: usize,
    },
    /// A host member that exists but is not visible.
    InaccessibleMember {
        /// Name of the member.
        name: String,
    },
    /// A host member that is a method.
    MethodMember {
        /// Name of the member.
        name: String,
    },
    /// Field or index access on a type that has no members.
    CannotAccess {
        /// Type of the target.
        found: String,
    },
    /// The same key appears twice in one object literal.
    DuplicateKey {
        /// The repeated key.
        key: String,
    },
    /// The right operand of `in` is not an array.
    MembershipRequiresArray {
        /// Type of the right operand.
        found: String,
    },
    /// Slicing something that is neither an array nor a string.
    SliceTarget {
        /// Type of the target.
        found: String,
    },
    /// A negative slice start.
    NegativeStart {
        /// The start index.
        start: i64,
    },
    /// A slice end beyond the length of the target.
    EndOutOfRange {
        /// The end index.
        end:    i64,
        /// Length of the target.
        length: usize,
    },
    /// A slice whose start lies after its end.
    StartAfterEnd {
        /// The start index.
        start: i64,
        /// The end index.
        end:   i64,
    },
    /// A string slice bound that splits a multi-byte character.
    NotCharBoundary {
        /// The offending byte offset.
        index: usize,
    },
    /// An identifier not present in the variable map.
    UnknownVariable {
        /// The name of the variable.
        name: String,
    },
    /// A call to a name not present in the function map.
    UnknownFunction {
        /// The name of the function.
        name: String,
    },
    /// A host function reported a failure.
    FunctionFailed {
        /// The name of the function.
        name:    String,
        /// The message returned by the function.
        message: String,
    },
}

impl std::fmt::Display for RuntimeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::RequiredBool { found } => {
                write!(f, "type error: required bool, but was {found}")
            },
            Self::RequiredInteger { found } => {
                write!(f, "type error: required number of type integer, but was {found}")
            },
            Self::LossyFloatCast => write!(f,
                                           "type error: cannot cast floating point number to integer without losing precision"),
            Self::UnaryMinus { found } => {
                write!(f, "type error: unary minus requires number, but was {found}")
            },
            Self::InvalidOperands { action, left, right } => {
                write!(f, "type error: cannot {action} type {left} and {right}")
            },
            Self::DivisionByZero => write!(f, "runtime error: integer divide by zero"),

            Self::ObjectKeyType { found } => {
                write!(f, "syntax error: object key must be string, but was {found}")
            },
            Self::ArrayIndexType { found } => {
                write!(f, "syntax error: array index must be number, but was {found}")
            },
            Self::FractionalIndex { index } if index.is_finite() => {
                write!(f, "eval error: array index must be whole number, but was {index:.6}")
            },
            Self::FractionalIndex { index } => {
                write!(f,
                       "eval error: array index must be whole number, but was {}",
                       format_real(*index))
            },
            Self::NoSuchMember { name } => write!(f, "var error: object has no member {name:?}"),
            Self::IndexOutOfRange { index, length } => {
                write!(f, "var error: array index {index} is out of range [0, {length}]")
            },
            Self::InaccessibleMember { name } => {
                write!(f, "var error: object member {name:?} is inaccessible")
            },
            Self::MethodMember { name } => write!(f,
                                                  "syntax error: object member {name:?} is a method and currently unsupported"),
            Self::CannotAccess { found } => {
                write!(f, "syntax error: cannot access fields on type {found}")
            },
            Self::DuplicateKey { key } => write!(f, "syntax error: duplicate object key {key:?}"),

            Self::MembershipRequiresArray { found } => {
                write!(f, "syntax error: in-operator requires array, but was {found}")
            },
            Self::SliceTarget { found } => {
                write!(f, "syntax error: slicing requires an array or string, but was {found}")
            },
            Self::NegativeStart { start } => {
                write!(f, "range error: start-index {start} is negative")
            },
            Self::EndOutOfRange { end, length } => {
                write!(f, "range error: end-index {end} is out of range [0, {length}]")
            },
            Self::StartAfterEnd { start, end } => {
                write!(f, "range error: start-index {start} is greater than end-index {end}")
            },
            Self::NotCharBoundary { index } => {
                write!(f, "range error: index {index} is not on a character boundary")
            },

            Self::UnknownVariable { name } => {
                write!(f, "var error: variable {name:?} does not exist")
            },
            Self::UnknownFunction { name } => write!(f, "syntax error: no such function {name:?}"),
            Self::FunctionFailed { name, message } => {
                write!(f, "function error: {name:?} - {message}")
            },
        }
    }
}

impl std::error::Error for RuntimeError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fractional_index_uses_six_decimals() {
        let err = RuntimeError::FractionalIndex { index: 0.1 };
        assert_eq!(err.to_string(), "eval error: array index must be whole number, but was 0.100000");
    }

    #[test]
    fn non_finite_index_is_spelled_out() {
        let err = RuntimeError::FractionalIndex { index: f64::INFINITY };
        assert_eq!(err.to_string(), "eval error: array index must be whole number, but was +Inf");
        let err = RuntimeError::FractionalIndex { index: f64::NAN };
        assert_eq!(err.to_string(), "eval error: array index must be whole number, but was NaN");
    }

    #[test]
    fn operand_errors_name_both_types() {
        let err = RuntimeError::InvalidOperands { action: "perform modulo on",
                                                  left:   "string".into(),
                                                  right:  "nil".into(), };
        assert_eq!(err.to_string(), "type error: cannot perform modulo on type string and nil");
    }
}
