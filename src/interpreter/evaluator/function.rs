use crate::{
    ast::Expr,
    error::RuntimeError,
    interpreter::{
        evaluator::core::{Context, EvalResult},
        value::core::Value,
    },
};

impl Context<'_> {
    /// Evaluates a function call.
    ///
    /// The arguments are evaluated left to right before the name is looked
    /// up, so an error in an argument is reported even when the function
    /// does not exist. The function receives the argument values in source
    /// order.
    ///
    /// # Parameters
    /// - `name`: Function name.
    /// - `arguments`: Unevaluated argument expressions.
    /// - `position`: Position of the call in the source, used for tracing.
    ///
    /// # Returns
    /// The value returned by the function.
    ///
    /// # Errors
    /// - `UnknownFunction` if no function with that name was supplied.
    /// - `FunctionFailed` if the function reported a failure.
    ///
    /// # Example
    /// ```
    /// use std::{collections::HashMap, sync::Arc};
    ///
    /// use dynexpr::{
    ///     Function,
    ///     interpreter::{evaluator::core::Context, parser::core::parse, value::core::Value},
    /// };
    ///
    /// let double: Function = Arc::new(|args: &[Value]| match args {
    ///     [Value::Integer(n)] => Ok(Value::Integer(n * 2)),
    ///     _ => Err("expected one integer".to_string()),
    /// });
    /// let variables = HashMap::new();
    /// let functions = HashMap::from([("double".to_string(), double)]);
    /// let context = Context::new(&variables, &functions);
    ///
    /// assert_eq!(context.eval(&parse("double(21)").unwrap()).unwrap(), Value::Integer(42));
    /// assert_eq!(context.eval(&parse("double()").unwrap()).unwrap_err().to_string(),
    ///            r#"function error: "double" - expected one integer"#);
    /// ```
    pub fn eval_function_call(&self,
                              name: &str,
                              arguments: &[Expr],
                              position: usize)
                              -> EvalResult<Value> {
        let values = arguments.iter()
                              .map(|argument| self.eval(argument))
                              .collect::<EvalResult<Vec<_>>>()?;

        let function =
            self.functions
                .get(name)
                .ok_or_else(|| RuntimeError::UnknownFunction { name: name.to_string() })?;

        tracing::trace!("calling {name}/{} at position {position}", values.len());

        function(&values).map_err(|message| RuntimeError::FunctionFailed { name: name.to_string(),
                                                                           message })
    }
}

#[cfg(test)]
mod tests {
    use std::{
        collections::HashMap,
        sync::{Arc, Mutex},
    };

    use crate::interpreter::{
        evaluator::core::{Function, Functions, Variables},
        parser::core::parse,
    };

    use super::*;

    fn run(source: &str, variables: &Variables, functions: &Functions) -> EvalResult<Value> {
        Context::new(variables, functions).eval(&parse(source).unwrap())
    }

    #[test]
    fn arguments_are_evaluated_before_lookup() {
        let variables = HashMap::new();
        let err = run("missing(unknown)", &variables, &HashMap::new()).unwrap_err();
        assert_eq!(err, RuntimeError::UnknownVariable { name: "unknown".into() });

        let err = run("missing(1)", &variables, &HashMap::new()).unwrap_err();
        assert_eq!(err.to_string(), r#"syntax error: no such function "missing""#);
    }

    #[test]
    fn arguments_arrive_in_source_order() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let record = Arc::clone(&seen);
        let collect: Function = Arc::new(move |args: &[Value]| {
            record.lock().unwrap().extend_from_slice(args);
            Ok::<_, String>(Value::Null)
        });
        let functions = HashMap::from([("collect".to_string(), collect)]);

        run(r#"collect(1, "two", [3])"#, &HashMap::new(), &functions).unwrap();
        assert_eq!(*seen.lock().unwrap(),
                   vec![Value::Integer(1), Value::from("two"), Value::from(vec![Value::Integer(3)])]);
    }
}
