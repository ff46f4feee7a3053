use crate::{
    error::RuntimeError,
    interpreter::{
        evaluator::{
            core::{Context, EvalResult},
            utils::deep_equal,
        },
        value::core::Value,
    },
};

impl Context<'_> {
    /// Evaluates `needle in haystack`.
    ///
    /// The haystack must be an array. Elements are compared with
    /// [`deep_equal`], so `1 in [1.0]` holds and nested arrays and records
    /// are found by content.
    ///
    /// # Errors
    /// `MembershipRequiresArray` if the right operand is not an array.
    ///
    /// # Example
    /// ```
    /// use dynexpr::interpreter::{evaluator::core::Context, value::core::Value};
    ///
    /// let haystack = Value::from(vec![Value::from("a"), Value::Integer(2)]);
    /// assert_eq!(Context::eval_membership(&Value::Real(2.0), &haystack).unwrap(), Value::Bool(true));
    /// assert_eq!(Context::eval_membership(&Value::from("b"), &haystack).unwrap(), Value::Bool(false));
    /// ```
    pub fn eval_membership(needle: &Value, haystack: &Value) -> EvalResult<Value> {
        let Value::Array(elements) = haystack else {
            return Err(RuntimeError::MembershipRequiresArray { found: haystack.type_name()
                                                                              .to_string() });
        };
        Ok(Value::Bool(elements.iter().any(|element| deep_equal(element, needle))))
    }
}
