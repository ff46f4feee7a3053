use crate::{
    ast::UnaryOperator,
    error::RuntimeError,
    interpreter::{
        evaluator::core::{Context, EvalResult},
        value::core::Value,
    },
};

impl Context<'_> {
    /// Evaluates a unary operation on a value.
    ///
    /// Supported operators:
    /// - `Negate`: numeric negation. Integers wrap, so negating `i64::MIN`
    ///   yields `i64::MIN`.
    /// - `Not`: boolean negation.
    /// - `BitNot`: bitwise complement of an integral number.
    ///
    /// # Parameters
    /// - `op`: Unary operator.
    /// - `value`: Input value.
    ///
    /// # Returns
    /// The computed `Value` wrapped in `EvalResult`.
    ///
    /// # Example
    /// ```
    /// use dynexpr::{
    ///     ast::UnaryOperator,
    ///     interpreter::{evaluator::core::Context, value::core::Value},
    /// };
    ///
    /// // Negation
    /// let v = Context::eval_unary(UnaryOperator::Negate, &Value::Integer(5)).unwrap();
    /// assert_eq!(v, Value::Integer(-5));
    ///
    /// // Boolean not
    /// let v = Context::eval_unary(UnaryOperator::Not, &Value::Bool(false)).unwrap();
    /// assert_eq!(v, Value::Bool(true));
    ///
    /// // Bitwise not accepts whole reals
    /// let v = Context::eval_unary(UnaryOperator::BitNot, &Value::Real(-1.0)).unwrap();
    /// assert_eq!(v, Value::Integer(0));
    /// ```
    pub fn eval_unary(op: UnaryOperator, value: &Value) -> EvalResult<Value> {
        match op {
            UnaryOperator::Negate => match value {
                Value::Integer(n) => Ok(Value::Integer(n.wrapping_neg())),
                Value::Real(r) => Ok(Value::Real(-r)),
                other => Err(RuntimeError::UnaryMinus { found: other.type_name().to_string() }),
            },
            UnaryOperator::Not => Ok(Value::Bool(!value.as_bool()?)),
            UnaryOperator::BitNot => Ok(Value::Integer(!value.as_integer()?)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn negation_errors_name_the_type() {
        let err = Context::eval_unary(UnaryOperator::Negate, &Value::from("x")).unwrap_err();
        assert_eq!(err.to_string(), "type error: unary minus requires number, but was string");
    }

    #[test]
    fn negation_wraps() {
        assert_eq!(Context::eval_unary(UnaryOperator::Negate, &Value::Integer(i64::MIN)).unwrap(),
                   Value::Integer(i64::MIN));
        assert_eq!(Context::eval_unary(UnaryOperator::Negate, &Value::Real(1.5)).unwrap(),
                   Value::Real(-1.5));
    }

    #[test]
    fn bit_not_requires_an_integer() {
        assert_eq!(Context::eval_unary(UnaryOperator::BitNot, &Value::Integer(0)).unwrap(),
                   Value::Integer(-1));
        assert_eq!(Context::eval_unary(UnaryOperator::BitNot, &Value::Real(0.5)).unwrap_err(),
                   RuntimeError::LossyFloatCast);
        assert_eq!(Context::eval_unary(UnaryOperator::BitNot, &Value::Bool(true)).unwrap_err()
                                                                                  .to_string(),
                   "type error: required number of type integer, but was bool");
    }

    #[test]
    fn not_requires_a_bool() {
        assert_eq!(Context::eval_unary(UnaryOperator::Not, &Value::Null).unwrap_err()
                                                                        .to_string(),
                   "type error: required bool, but was nil");
    }
}
