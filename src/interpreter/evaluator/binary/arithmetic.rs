use std::sync::Arc;

use crate::{
    ast::BinaryOperator,
    error::RuntimeError,
    interpreter::{
        evaluator::core::{Context, EvalResult},
        value::core::Value,
    },
    util::num::format_real,
};

/// Renders the non-string side of a string concatenation.
///
/// Only numbers, booleans and `nil` can be joined to a string. Integers are
/// printed in decimal, reals with [`format_real`].
fn concat_operand(value: &Value) -> Option<String> {
    match value {
        Value::Null => Some("nil".to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Integer(n) => Some(n.to_string()),
        Value::Real(r) => Some(format_real(*r)),
        _ => None,
    }
}

/// Verb used in the type error of an arithmetic operator.
const fn action(op: BinaryOperator) -> &'static str {
    match op {
        BinaryOperator::Sub => "subtract",
        BinaryOperator::Mul => "multiply",
        BinaryOperator::Div => "divide",
        BinaryOperator::Mod => "perform modulo on",
        _ => "add or concatenate",
    }
}

fn invalid_operands(op: BinaryOperator, left: &Value, right: &Value) -> RuntimeError {
    RuntimeError::InvalidOperands { action: action(op),
                                    left:   left.type_name().to_string(),
                                    right:  right.type_name().to_string(), }
}

impl Context<'_> {
    /// Evaluates `left + right`.
    ///
    /// The meaning depends on the operand types:
    /// - two strings are concatenated,
    /// - two integers are added with wrap-around on overflow,
    /// - any other pair of numbers is added as reals,
    /// - a string and a number, boolean or `nil` are concatenated in the given
    ///   order after rendering the other operand as text,
    /// - two arrays are concatenated into a new array,
    /// - two records are merged into a new record, with keys of the right
    ///   operand replacing those of the left.
    ///
    /// Neither operand is modified.
    ///
    /// # Errors
    /// `InvalidOperands` for every other combination.
    ///
    /// # Example
    /// ```
    /// use dynexpr::interpreter::{evaluator::core::Context, value::core::Value};
    ///
    /// let v = Context::eval_add(&Value::from("pi is "), &Value::Real(3.14)).unwrap();
    /// assert_eq!(v, Value::from("pi is 3.14"));
    ///
    /// let v = Context::eval_add(&Value::Integer(1), &Value::Real(0.5)).unwrap();
    /// assert_eq!(v, Value::Real(1.5));
    ///
    /// let err = Context::eval_add(&Value::Bool(true), &Value::Integer(1)).unwrap_err();
    /// assert_eq!(err.to_string(), "type error: cannot add or concatenate type bool and number");
    /// ```
    pub fn eval_add(left: &Value, right: &Value) -> EvalResult<Value> {
        use Value::{Array, Integer, Real, Record, Text};

        match (left, right) {
            (Text(a), Text(b)) => Ok(format!("{a}{b}").into()),
            (Integer(a), Integer(b)) => Ok(Integer(a.wrapping_add(*b))),
            (Array(a), Array(b)) => {
                let mut joined = Vec::with_capacity(a.len() + b.len());
                joined.extend(a.iter().cloned());
                joined.extend(b.iter().cloned());
                Ok(Array(Arc::new(joined)))
            },
            (Record(a), Record(b)) => Ok(Record(Arc::new(a.merged(b)))),
            (Text(a), other) => match concat_operand(other) {
                Some(b) => Ok(format!("{a}{b}").into()),
                None => Err(invalid_operands(BinaryOperator::Add, left, right)),
            },
            (other, Text(b)) => match concat_operand(other) {
                Some(a) => Ok(format!("{a}{b}").into()),
                None => Err(invalid_operands(BinaryOperator::Add, left, right)),
            },
            _ => match (left.as_f64(), right.as_f64()) {
                (Some(a), Some(b)) => Ok(Real(a + b)),
                _ => Err(invalid_operands(BinaryOperator::Add, left, right)),
            },
        }
    }

    /// Evaluates `-`, `*`, `/` and `%` on numbers.
    ///
    /// Two integers produce an integer: results wrap on overflow and division
    /// truncates toward zero. Any other pair of numbers is computed on reals,
    /// where division follows IEEE-754 and `%` is the truncated remainder
    /// whose sign follows the dividend.
    ///
    /// # Parameters
    /// - `op`: One of `Sub`, `Mul`, `Div` or `Mod`.
    /// - `left`: Left operand.
    /// - `right`: Right operand.
    ///
    /// # Errors
    /// - `DivisionByZero` for integer `/` or `%` by zero.
    /// - `InvalidOperands` if either operand is not a number.
    ///
    /// # Example
    /// ```
    /// use dynexpr::{
    ///     ast::BinaryOperator,
    ///     interpreter::{evaluator::core::Context, value::core::Value},
    /// };
    ///
    /// let v = Context::eval_arithmetic(BinaryOperator::Div, &Value::Integer(7), &Value::Integer(2));
    /// assert_eq!(v.unwrap(), Value::Integer(3));
    ///
    /// let v = Context::eval_arithmetic(BinaryOperator::Mod, &Value::Real(-7.5), &Value::Integer(2));
    /// assert_eq!(v.unwrap(), Value::Real(-1.5));
    /// ```
    pub fn eval_arithmetic(op: BinaryOperator, left: &Value, right: &Value) -> EvalResult<Value> {
        use BinaryOperator::{Div, Mod, Mul, Sub};

        if let (Value::Integer(a), Value::Integer(b)) = (left, right) {
            return Ok(Value::Integer(match op {
                                         Sub => a.wrapping_sub(*b),
                                         Mul => a.wrapping_mul(*b),
                                         Div | Mod if *b == 0 => {
                                             return Err(RuntimeError::DivisionByZero);
                                         },
                                         Div => a.wrapping_div(*b),
                                         Mod => a.wrapping_rem(*b),
                                         _ => unreachable!("eval_arithmetic used with {op}"),
                                     }));
        }

        let (Some(a), Some(b)) = (left.as_f64(), right.as_f64()) else {
            return Err(invalid_operands(op, left, right));
        };

        Ok(Value::Real(match op {
                           Sub => a - b,
                           Mul => a * b,
                           Div => a / b,
                           Mod => a % b,
                           _ => unreachable!("eval_arithmetic used with {op}"),
                       }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interpreter::value::record::Record;

    fn arith(op: BinaryOperator, left: impl Into<Value>, right: impl Into<Value>) -> EvalResult<Value> {
        Context::eval_arithmetic(op, &left.into(), &right.into())
    }

    #[test]
    fn string_concatenation_renders_the_other_side() {
        let cases: [(Value, Value, &str); 7] = [(Value::from("a"), Value::from("b"), "ab"),
                                                (Value::from("x"), Value::Integer(-3), "x-3"),
                                                (Value::Real(0.1), Value::from("x"), "0.1x"),
                                                (Value::from("x"), Value::Real(1e21), "x1000000000000000000000"),
                                                (Value::from("x"), Value::Real(f64::NAN), "xNaN"),
                                                (Value::Bool(false), Value::from("!"), "false!"),
                                                (Value::from("is "), Value::Null, "is nil")];
        for (left, right, expected) in cases {
            assert_eq!(Context::eval_add(&left, &right).unwrap(), Value::from(expected));
        }
    }

    #[test]
    fn containers_are_joined_without_touching_operands() {
        let left = Value::from(vec![Value::Integer(1)]);
        let right = Value::from(vec![Value::Integer(2)]);
        let joined = Context::eval_add(&left, &right).unwrap();
        assert_eq!(joined, Value::from(vec![Value::Integer(1), Value::Integer(2)]));
        assert_eq!(left, Value::from(vec![Value::Integer(1)]));

        let a: Record = [("k", Value::Integer(1)), ("a", Value::Integer(1))].into_iter().collect();
        let b: Record = [("k", Value::Integer(2))].into_iter().collect();
        let merged = Context::eval_add(&a.into(), &b.into()).unwrap();
        let Value::Record(merged) = merged else {
            panic!("expected record");
        };
        assert_eq!(merged.get("k"), Some(&Value::Integer(2)));
        assert_eq!(merged.len(), 2);
    }

    #[test]
    fn strings_and_containers_do_not_mix() {
        let err = Context::eval_add(&Value::from("a"), &Value::from(Vec::<Value>::new())).unwrap_err();
        assert_eq!(err.to_string(), "type error: cannot add or concatenate type string and array");
    }

    #[test]
    fn integer_arithmetic_wraps() {
        assert_eq!(Context::eval_add(&Value::Integer(i64::MAX), &Value::Integer(1)).unwrap(),
                   Value::Integer(i64::MIN));
        assert_eq!(arith(BinaryOperator::Mul, i64::MAX, 2_i64).unwrap(), Value::Integer(-2));
        assert_eq!(arith(BinaryOperator::Div, i64::MIN, -1_i64).unwrap(), Value::Integer(i64::MIN));
        assert_eq!(arith(BinaryOperator::Mod, i64::MIN, -1_i64).unwrap(), Value::Integer(0));
    }

    #[test]
    fn integer_division_by_zero_is_an_error() {
        assert_eq!(arith(BinaryOperator::Div, 1_i64, 0_i64).unwrap_err(), RuntimeError::DivisionByZero);
        assert_eq!(arith(BinaryOperator::Mod, 1_i64, 0_i64).unwrap_err(), RuntimeError::DivisionByZero);
        assert_eq!(arith(BinaryOperator::Div, 1_i64, 0.0).unwrap(), Value::Real(f64::INFINITY));
    }

    #[test]
    fn remainder_sign_follows_dividend() {
        assert_eq!(arith(BinaryOperator::Mod, -7_i64, 3_i64).unwrap(), Value::Integer(-1));
        assert_eq!(arith(BinaryOperator::Mod, 7.5, -2_i64).unwrap(), Value::Real(1.5));
    }

    #[test]
    fn type_errors_name_the_operation() {
        for (op, verb) in [(BinaryOperator::Sub, "subtract"),
                           (BinaryOperator::Mul, "multiply"),
                           (BinaryOperator::Div, "divide"),
                           (BinaryOperator::Mod, "perform modulo on")]
        {
            let err = arith(op, "a", Value::Null).unwrap_err();
            assert_eq!(err.to_string(), format!("type error: cannot {verb} type string and nil"));
        }
    }
}
