use std::cmp::Ordering;

use crate::{
    ast::BinaryOperator,
    error::RuntimeError,
    interpreter::{
        evaluator::{
            core::{Context, EvalResult},
            utils::deep_equal,
        },
        value::core::Value,
    },
};

/// Orders two numbers.
///
/// Two integers are compared exactly. Mixed pairs are compared as reals,
/// which yields `None` when a `NaN` is involved.
fn numeric_order(left: &Value, right: &Value) -> EvalResult<Option<Ordering>> {
    if let (Value::Integer(a), Value::Integer(b)) = (left, right) {
        return Ok(Some(a.cmp(b)));
    }
    match (left.as_f64(), right.as_f64()) {
        (Some(a), Some(b)) => Ok(a.partial_cmp(&b)),
        _ => Err(RuntimeError::InvalidOperands { action: "compare",
                                                 left:   left.type_name().to_string(),
                                                 right:  right.type_name().to_string(), }),
    }
}

impl Context<'_> {
    /// Evaluates a comparison of the form `Value <Operator> Value`.
    ///
    /// For `Equal` and `NotEqual`, values are compared with [`deep_equal`],
    /// which never fails: values of different types are simply unequal.
    /// Relational operators accept numbers only.
    ///
    /// # Parameters
    /// - `op`: The comparison operator.
    /// - `left`: The left-hand value.
    /// - `right`: The right-hand value.
    ///
    /// # Returns
    /// An `EvalResult<Value>` containing a boolean result.
    ///
    /// # Example
    /// ```
    /// use dynexpr::{
    ///     ast::BinaryOperator,
    ///     interpreter::{evaluator::core::Context, value::core::Value},
    /// };
    ///
    /// let result = Context::eval_comparison(BinaryOperator::Less, &Value::Real(3.0), &Value::Integer(5));
    /// assert_eq!(result.unwrap(), Value::Bool(true));
    ///
    /// let result = Context::eval_comparison(BinaryOperator::NotEqual, &Value::Null, &Value::Bool(false));
    /// assert_eq!(result.unwrap(), Value::Bool(true));
    /// ```
    pub fn eval_comparison(op: BinaryOperator, left: &Value, right: &Value) -> EvalResult<Value> {
        use BinaryOperator::{Equal, Greater, GreaterEqual, Less, LessEqual, NotEqual};

        Ok(Value::Bool(match op {
                           Equal => deep_equal(left, right),
                           NotEqual => !deep_equal(left, right),
                           Less | Greater | LessEqual | GreaterEqual => {
                               let Some(order) = numeric_order(left, right)? else {
                                   return Ok(Value::Bool(false));
                               };
                               match op {
                                   Less => order.is_lt(),
                                   Greater => order.is_gt(),
                                   LessEqual => order.is_le(),
                                   GreaterEqual => order.is_ge(),
                                   _ => unreachable!(),
                               }
                           },
                           _ => unreachable!("eval_comparison used with {op}"),
                       }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn compare(op: BinaryOperator, left: impl Into<Value>, right: impl Into<Value>) -> EvalResult<Value> {
        Context::eval_comparison(op, &left.into(), &right.into())
    }

    #[test]
    fn large_integers_compare_exactly() {
        let big = 9_007_199_254_740_993_i64;
        assert_eq!(compare(BinaryOperator::Greater, big, big - 1).unwrap(), Value::Bool(true));
        assert_eq!(compare(BinaryOperator::LessEqual, i64::MIN, i64::MIN).unwrap(), Value::Bool(true));
    }

    #[test]
    fn nan_is_unordered() {
        for op in [BinaryOperator::Less, BinaryOperator::GreaterEqual] {
            assert_eq!(compare(op, f64::NAN, 1_i64).unwrap(), Value::Bool(false));
        }
    }

    #[test]
    fn ordering_requires_numbers() {
        let err = compare(BinaryOperator::Less, "a", "b").unwrap_err();
        assert_eq!(err.to_string(), "type error: cannot compare type string and string");
        let err = compare(BinaryOperator::GreaterEqual, 1_i64, Value::Null).unwrap_err();
        assert_eq!(err.to_string(), "type error: cannot compare type number and nil");
    }

    #[test]
    fn equality_never_fails() {
        assert_eq!(compare(BinaryOperator::Equal, "1", 1_i64).unwrap(), Value::Bool(false));
        assert_eq!(compare(BinaryOperator::Equal, 2_i64, 2.0).unwrap(), Value::Bool(true));
        assert_eq!(compare(BinaryOperator::NotEqual, Value::Null, Value::Null).unwrap(),
                   Value::Bool(false));
    }
}
