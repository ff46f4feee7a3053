use crate::{
    ast::BinaryOperator,
    interpreter::{
        evaluator::core::{Context, EvalResult},
        value::core::Value,
    },
};

impl Context<'_> {
    /// Evaluates a binary operation between two values.
    ///
    /// Both operands have already been evaluated, left first. This function
    /// only routes the operator to its family:
    /// `+` goes to `eval_add`, the other arithmetic operators to
    /// `eval_arithmetic`, equality and ordering to `eval_comparison`, `&&`
    /// and `||` to `eval_logic`, bitwise operators and shifts to
    /// `eval_bitwise`, and `in` to `eval_membership`.
    ///
    /// # Parameters
    /// - `op`: The operator.
    /// - `left`: Left operand.
    /// - `right`: Right operand.
    ///
    /// # Returns
    /// An `EvalResult<Value>` containing the evaluated result.
    ///
    /// # Example
    /// ```
    /// use dynexpr::{
    ///     ast::BinaryOperator,
    ///     interpreter::{evaluator::core::Context, value::core::Value},
    /// };
    ///
    /// let left = Value::Integer(3);
    /// let right = Value::Integer(4);
    ///
    /// let result = Context::eval_binary(BinaryOperator::Add, &left, &right);
    /// assert_eq!(result.unwrap(), Value::Integer(7));
    ///
    /// let result = Context::eval_binary(BinaryOperator::Equal, &left, &Value::Real(3.0));
    /// assert_eq!(result.unwrap(), Value::Bool(true));
    /// ```
    pub fn eval_binary(op: BinaryOperator, left: &Value, right: &Value) -> EvalResult<Value> {
        use BinaryOperator::{
            Add, And, BitAnd, BitOr, BitXor, Div, Equal, Greater, GreaterEqual, In, Less,
            LessEqual, Mod, Mul, NotEqual, Or, ShiftLeft, ShiftRight, Sub,
        };

        match op {
            Add => Self::eval_add(left, right),
            Sub | Mul | Div | Mod => Self::eval_arithmetic(op, left, right),

            Equal | NotEqual | Less | Greater | LessEqual | GreaterEqual => {
                Self::eval_comparison(op, left, right)
            },

            And | Or => Self::eval_logic(op, left, right),

            BitOr | BitXor | BitAnd | ShiftLeft | ShiftRight => {
                Self::eval_bitwise(op, left, right)
            },

            In => Self::eval_membership(left, right),
        }
    }
}
