use std::{collections::HashMap, sync::Arc};

use crate::{
    ast::{Expr, LiteralValue},
    error::RuntimeError,
    interpreter::value::{core::Value, record::Record},
};

/// Result type used by the evaluator.
///
/// All evaluation functions return either a value of type `T` or a
/// `RuntimeError` describing the failure.
pub type EvalResult<T> = Result<T, RuntimeError>;

/// A host-supplied function.
///
/// Receives the evaluated arguments in source order and returns a value or a
/// failure message, which is reported as a function error.
pub type Function = Arc<dyn Fn(&[Value]) -> Result<Value, String> + Send + Sync>;

/// Named input values of an evaluation.
pub type Variables = HashMap<String, Value>;

/// Named host functions of an evaluation.
pub type Functions = HashMap<String, Function>;

/// Stores the runtime evaluation context.
///
/// The context borrows the caller's variables and functions for the duration
/// of one evaluation. It never modifies them and holds no other state, so
/// independent contexts may run on different threads at the same time.
pub struct Context<'a> {
    /// Values that identifiers resolve to.
    pub variables: &'a Variables,
    /// Functions that calls are dispatched to.
    pub functions: &'a Functions,
}

impl<'a> Context<'a> {
    /// Creates a new evaluation context over the given variables and
    /// functions.
    #[must_use]
    pub const fn new(variables: &'a Variables, functions: &'a Functions) -> Self {
        Self { variables, functions }
    }

    /// Evaluates an expression and returns the resulting value.
    ///
    /// This is the main entry point for expression evaluation. Operands are
    /// always evaluated left to right before the operator is applied, and the
    /// first error aborts the evaluation.
    ///
    /// # Parameters
    /// - `expr`: Expression to evaluate.
    ///
    /// # Returns
    /// The value the expression reduces to.
    ///
    /// # Example
    /// ```
    /// use std::collections::HashMap;
    ///
    /// use dynexpr::interpreter::{evaluator::core::Context, parser::core::parse, value::core::Value};
    ///
    /// let variables = HashMap::from([("x".to_string(), Value::Integer(20))]);
    /// let functions = HashMap::new();
    /// let context = Context::new(&variables, &functions);
    ///
    /// let expr = parse("x * 2 + 2").unwrap();
    /// assert_eq!(context.eval(&expr).unwrap(), Value::Integer(42));
    /// ```
    pub fn eval(&self, expr: &Expr) -> EvalResult<Value> {
        match expr {
            Expr::Literal { value, .. } => Ok(Self::eval_literal(value)),
            Expr::Variable { name, .. } => self.eval_variable(name),
            Expr::UnaryOp { op, expr, .. } => {
                let operand = self.eval(expr)?;
                Self::eval_unary(*op, &operand)
            },
            Expr::BinaryOp { left, op, right, .. } => {
                let left = self.eval(left)?;
                let right = self.eval(right)?;
                Self::eval_binary(*op, &left, &right)
            },
            Expr::FunctionCall { name,
                                 arguments,
                                 position, } => {
                self.eval_function_call(name, arguments, *position)
            },
            Expr::ArrayLiteral { elements, .. } => self.eval_array_literal(elements),
            Expr::ObjectLiteral { members, .. } => self.eval_object_literal(members),
            Expr::FieldAccess { target, name, .. } => {
                let target = self.eval(target)?;
                Self::eval_access(&target, &Value::from(name.as_str()))
            },
            Expr::Index { target, index, .. } => {
                let target = self.eval(target)?;
                let index = self.eval(index)?;
                Self::eval_access(&target, &index)
            },
            Expr::Slice { target, from, to, .. } => {
                let target = self.eval(target)?;
                let from = from.as_deref().map(|e| self.eval(e)).transpose()?;
                let to = to.as_deref().map(|e| self.eval(e)).transpose()?;
                Self::eval_slice(&target, from.as_ref(), to.as_ref())
            },
        }
    }

    /// Evaluates a literal expression.
    ///
    /// Converts the literal value directly into a `Value`. Literals never
    /// produce errors.
    #[must_use]
    pub fn eval_literal(value: &LiteralValue) -> Value {
        value.into()
    }

    /// Resolves an identifier against the caller's variables.
    ///
    /// # Errors
    /// `UnknownVariable` if the name is not bound. A missing variable is
    /// never treated as `nil`.
    pub fn eval_variable(&self, name: &str) -> EvalResult<Value> {
        self.variables
            .get(name)
            .cloned()
            .ok_or_else(|| RuntimeError::UnknownVariable { name: name.to_string() })
    }

    /// Evaluates the elements of an array literal in order.
    pub fn eval_array_literal(&self, elements: &[Expr]) -> EvalResult<Value> {
        let values = elements.iter()
                             .map(|element| self.eval(element))
                             .collect::<EvalResult<Vec<_>>>()?;
        Ok(values.into())
    }

    /// Evaluates an object literal.
    ///
    /// Each member's key and value are evaluated before the key is checked,
    /// members are processed in source order, and the first invalid or
    /// repeated key aborts the evaluation.
    ///
    /// # Errors
    /// - `ObjectKeyType` if a key does not evaluate to a string.
    /// - `DuplicateKey` if a key appears twice.
    pub fn eval_object_literal(&self, members: &[(Expr, Expr)]) -> EvalResult<Value> {
        let mut record = Record::with_capacity(members.len());
        for (key, value) in members {
            let key = self.eval(key)?;
            let value = self.eval(value)?;
            let Value::Text(key) = key else {
                return Err(RuntimeError::ObjectKeyType { found: key.type_name().to_string() });
            };
            if record.contains_key(&key) {
                return Err(RuntimeError::DuplicateKey { key: key.to_string() });
            }
            record.insert(&*key, value);
        }
        Ok(record.into())
    }
}
