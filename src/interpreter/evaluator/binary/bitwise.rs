use crate::{
    ast::BinaryOperator,
    interpreter::{
        evaluator::core::{Context, EvalResult},
        value::core::Value,
    },
};

/// Shifts left by `amount` bits. Everything is shifted out at 64 or more.
fn shift_left(value: i64, amount: u64) -> i64 {
    u32::try_from(amount).ok()
                         .and_then(|amount| value.checked_shl(amount))
                         .unwrap_or(0)
}

/// Arithmetic shift right by `amount` bits. At 64 or more only the sign
/// remains.
fn shift_right(value: i64, amount: u64) -> i64 {
    u32::try_from(amount).ok()
                         .and_then(|amount| value.checked_shr(amount))
                         .unwrap_or(if value < 0 { -1 } else { 0 })
}

impl Context<'_> {
    /// Evaluates a bitwise operator or a shift.
    ///
    /// Both operands are converted with `as_integer`, the left one first, so
    /// reals are accepted when they are whole numbers. Shifts by a negative
    /// amount shift in the opposite direction. Shifting by 64 or more bits
    /// yields `0`, or `-1` when shifting a negative value right.
    ///
    /// # Parameters
    /// - `op`: One of `BitOr`, `BitXor`, `BitAnd`, `ShiftLeft` or `ShiftRight`.
    /// - `left`: Left operand.
    /// - `right`: Right operand.
    ///
    /// # Returns
    /// An `EvalResult<Value>` containing an integer.
    ///
    /// # Example
    /// ```
    /// use dynexpr::{
    ///     ast::BinaryOperator,
    ///     interpreter::{evaluator::core::Context, value::core::Value},
    /// };
    ///
    /// let v = Context::eval_bitwise(BinaryOperator::BitOr, &Value::Integer(0b1010), &Value::Real(1.0));
    /// assert_eq!(v.unwrap(), Value::Integer(0b1011));
    ///
    /// let v = Context::eval_bitwise(BinaryOperator::ShiftLeft, &Value::Integer(8), &Value::Integer(-2));
    /// assert_eq!(v.unwrap(), Value::Integer(2));
    /// ```
    pub fn eval_bitwise(op: BinaryOperator, left: &Value, right: &Value) -> EvalResult<Value> {
        use BinaryOperator::{BitAnd, BitOr, BitXor, ShiftLeft, ShiftRight};

        let left = left.as_integer()?;
        let right = right.as_integer()?;

        Ok(Value::Integer(match op {
                              BitOr => left | right,
                              BitXor => left ^ right,
                              BitAnd => left & right,
                              ShiftLeft if right < 0 => shift_right(left, right.unsigned_abs()),
                              ShiftLeft => shift_left(left, right.unsigned_abs()),
                              ShiftRight if right < 0 => shift_left(left, right.unsigned_abs()),
                              ShiftRight => shift_right(left, right.unsigned_abs()),
                              _ => unreachable!("eval_bitwise used with {op}"),
                          }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RuntimeError;

    fn bitwise(op: BinaryOperator, left: impl Into<Value>, right: impl Into<Value>) -> EvalResult<Value> {
        Context::eval_bitwise(op, &left.into(), &right.into())
    }

    #[test]
    fn wide_shifts_saturate() {
        assert_eq!(bitwise(BinaryOperator::ShiftLeft, 1_i64, 63_i64).unwrap(), Value::Integer(i64::MIN));
        assert_eq!(bitwise(BinaryOperator::ShiftLeft, 1_i64, 64_i64).unwrap(), Value::Integer(0));
        assert_eq!(bitwise(BinaryOperator::ShiftRight, -8_i64, 100_i64).unwrap(), Value::Integer(-1));
        assert_eq!(bitwise(BinaryOperator::ShiftRight, 8_i64, 100_i64).unwrap(), Value::Integer(0));
        assert_eq!(bitwise(BinaryOperator::ShiftRight, 1_i64, i64::MIN).unwrap(), Value::Integer(0));
    }

    #[test]
    fn negative_amounts_reverse_direction() {
        assert_eq!(bitwise(BinaryOperator::ShiftRight, 1_i64, -4_i64).unwrap(), Value::Integer(16));
        assert_eq!(bitwise(BinaryOperator::ShiftLeft, -16_i64, -2_i64).unwrap(), Value::Integer(-4));
    }

    #[test]
    fn operands_must_be_integral() {
        assert_eq!(bitwise(BinaryOperator::BitAnd, 6.0, 3_i64).unwrap(), Value::Integer(2));
        assert_eq!(bitwise(BinaryOperator::BitXor, 1.5, "x").unwrap_err(), RuntimeError::LossyFloatCast);
        assert_eq!(bitwise(BinaryOperator::BitXor, 1_i64, "x").unwrap_err().to_string(),
                   "type error: required number of type integer, but was string");
    }
}
