use std::sync::Arc;

use crate::{
    error::RuntimeError,
    interpreter::{
        evaluator::{
            core::{Context, EvalResult},
            utils::{array_index, checked_index},
        },
        value::{
            core::Value,
            host::{HostValue, Member},
        },
    },
    util::num::{i64_to_usize, usize_to_i64},
};

/// Turns the result of a host lookup into a value.
fn resolve_member(member: Member, name: impl Into<String>) -> EvalResult<Value> {
    match member {
        Member::Visible(value) => Ok(value),
        Member::Hidden => Err(RuntimeError::InaccessibleMember { name: name.into() }),
        Member::Method => Err(RuntimeError::MethodMember { name: name.into() }),
        Member::Absent => Err(RuntimeError::NoSuchMember { name: name.into() }),
    }
}

impl Context<'_> {
    /// Reads a member of a value, as in `target.name` or `target[key]`.
    ///
    /// - On a record the key must be a string naming an existing member.
    /// - On an array the key must be an integral number in `[0, length)`.
    /// - On a host value the lookup is delegated to [`HostValue`]. Values
    ///   that report a sequence length are indexed like arrays, all others
    ///   are accessed by name.
    ///
    /// `target.name` is evaluated as `target["name"]`, so on an array it
    /// fails with an index type error.
    ///
    /// # Errors
    /// - `ObjectKeyType` for a non-string key on a record or named host value.
    /// - `ArrayIndexType` or `FractionalIndex` for an invalid array index.
    /// - `NoSuchMember` or `IndexOutOfRange` if nothing is found.
    /// - `InaccessibleMember` or `MethodMember` for host members that cannot
    ///   be read.
    /// - `CannotAccess` on every other type.
    ///
    /// # Example
    /// ```
    /// use dynexpr::{
    ///     Record,
    ///     interpreter::{evaluator::core::Context, value::core::Value},
    /// };
    ///
    /// let record: Record = [("a", Value::Integer(1))].into_iter().collect();
    /// let value = Context::eval_access(&record.into(), &Value::from("a")).unwrap();
    /// assert_eq!(value, Value::Integer(1));
    ///
    /// let array = Value::from(vec![Value::from("x"), Value::from("y")]);
    /// assert_eq!(Context::eval_access(&array, &Value::Real(1.0)).unwrap(), Value::from("y"));
    /// ```
    pub fn eval_access(target: &Value, key: &Value) -> EvalResult<Value> {
        match target {
            Value::Record(record) => {
                let Value::Text(key) = key else {
                    return Err(RuntimeError::ObjectKeyType { found: key.type_name().to_string() });
                };
                record.get(key)
                      .cloned()
                      .ok_or_else(|| RuntimeError::NoSuchMember { name: key.to_string() })
            },
            Value::Array(elements) => {
                let index = checked_index(array_index(key)?, elements.len())?;
                Ok(elements[index].clone())
            },
            Value::Host(host) => Self::eval_host_access(host.as_ref(), key),
            other => Err(RuntimeError::CannotAccess { found: other.type_name().to_string() }),
        }
    }

    /// Reads a field or element of a host value.
    fn eval_host_access(host: &dyn HostValue, key: &Value) -> EvalResult<Value> {
        if let Some(length) = host.sequence_len() {
            let index = array_index(key)?;
            let element = checked_index(index, length)?;
            return resolve_member(host.element(element), index.to_string());
        }

        let Value::Text(name) = key else {
            return Err(RuntimeError::ObjectKeyType { found: key.type_name().to_string() });
        };
        resolve_member(host.field(name), &**name)
    }

    /// Evaluates `target[from:to]`.
    ///
    /// A missing `from` defaults to `0` and a missing `to` to the length of
    /// the target. Bounds are converted with `as_integer` and checked in this
    /// order: the start must not be negative, the end must lie in
    /// `[0, length]` and the start must not exceed the end. Strings are
    /// sliced by byte offset and the result is a new string; arrays produce a
    /// new array.
    ///
    /// # Errors
    /// - `SliceTarget` if the target is neither a string nor an array.
    /// - `NegativeStart`, `EndOutOfRange` or `StartAfterEnd` for invalid
    ///   bounds.
    /// - `NotCharBoundary` if a string bound falls inside a multi-byte
    ///   character.
    ///
    /// # Example
    /// ```
    /// use dynexpr::interpreter::{evaluator::core::Context, value::core::Value};
    ///
    /// let text = Value::from("hello");
    /// let v = Context::eval_slice(&text, Some(&Value::Integer(1)), Some(&Value::Integer(3)));
    /// assert_eq!(v.unwrap(), Value::from("el"));
    ///
    /// let v = Context::eval_slice(&text, None, Some(&Value::Integer(6)));
    /// assert_eq!(v.unwrap_err().to_string(), "range error: end-index 6 is out of range [0, 5]");
    /// ```
    pub fn eval_slice(target: &Value,
                      from: Option<&Value>,
                      to: Option<&Value>)
                      -> EvalResult<Value> {
        let length = match target {
            Value::Text(text) => text.len(),
            Value::Array(elements) => elements.len(),
            other => {
                return Err(RuntimeError::SliceTarget { found: other.type_name().to_string() });
            },
        };

        let start = from.map(Value::as_integer).transpose()?.unwrap_or(0);
        let end = match to {
            Some(to) => to.as_integer()?,
            None => usize_to_i64(length),
        };

        let Some(first) = i64_to_usize(start) else {
            return Err(RuntimeError::NegativeStart { start });
        };
        let Some(last) = i64_to_usize(end).filter(|&last| last <= length) else {
            return Err(RuntimeError::EndOutOfRange { end, length });
        };
        if first > last {
            return Err(RuntimeError::StartAfterEnd { start, end });
        }

        match target {
            Value::Text(text) => {
                let Some(slice) = text.get(first..last) else {
                    let index = if text.is_char_boundary(first) { last } else { first };
                    return Err(RuntimeError::NotCharBoundary { index });
                };
                Ok(slice.into())
            },
            Value::Array(elements) => Ok(Value::Array(Arc::new(elements[first..last].to_vec()))),
            _ => unreachable!("slice target checked above"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interpreter::value::record::Record;

    #[derive(Debug)]
    struct Account {
        owner: String,
    }

    impl HostValue for Account {
        fn type_name(&self) -> &str {
            "account"
        }

        fn field(&self, name: &str) -> Member {
            match name {
                "Owner" => Member::Visible(self.owner.as_str().into()),
                "balance" => Member::Hidden,
                "Close" => Member::Method,
                _ => Member::Absent,
            }
        }
    }

    #[derive(Debug)]
    struct Pair;

    impl HostValue for Pair {
        fn sequence_len(&self) -> Option<usize> {
            Some(2)
        }

        fn element(&self, index: usize) -> Member {
            if index == 0 {
                Member::Visible(Value::Integer(10))
            } else {
                Member::Hidden
            }
        }
    }

    fn access_err(target: &Value, key: impl Into<Value>) -> String {
        Context::eval_access(target, &key.into()).unwrap_err().to_string()
    }

    fn slice(target: impl Into<Value>, from: Option<i64>, to: Option<i64>) -> EvalResult<Value> {
        let from = from.map(Value::Integer);
        let to = to.map(Value::Integer);
        Context::eval_slice(&target.into(), from.as_ref(), to.as_ref())
    }

    #[test]
    fn record_access_errors() {
        let record: Value = [("a", Value::Null)].into_iter().collect::<Record>().into();
        assert_eq!(access_err(&record, 1_i64), "syntax error: object key must be string, but was number");
        assert_eq!(access_err(&record, "b"), r#"var error: object has no member "b""#);
        assert_eq!(Context::eval_access(&record, &Value::from("a")).unwrap(), Value::Null);
    }

    #[test]
    fn array_access_errors() {
        let array = Value::from(vec![Value::Integer(1)]);
        assert_eq!(access_err(&array, 1_i64), "var error: array index 1 is out of range [0, 1]");
        assert_eq!(access_err(&array, 0.5), "eval error: array index must be whole number, but was 0.500000");
        assert_eq!(access_err(&array, "a"), "syntax error: array index must be number, but was string");
    }

    #[test]
    fn scalars_have_no_members() {
        assert_eq!(access_err(&Value::from("abc"), 0_i64), "syntax error: cannot access fields on type string");
        assert_eq!(access_err(&Value::Null, "a"), "syntax error: cannot access fields on type nil");
    }

    #[test]
    fn host_fields() {
        let account = Value::host(Account { owner: "ada".to_string() });
        assert_eq!(Context::eval_access(&account, &Value::from("Owner")).unwrap(), Value::from("ada"));
        assert_eq!(access_err(&account, "balance"), r#"var error: object member "balance" is inaccessible"#);
        assert_eq!(access_err(&account, "Close"),
                   r#"syntax error: object member "Close" is a method and currently unsupported"#);
        assert_eq!(access_err(&account, "missing"), r#"var error: object has no member "missing""#);
        assert_eq!(access_err(&account, 0_i64), "syntax error: object key must be string, but was number");
    }

    #[test]
    fn host_sequences() {
        let pair = Value::host(Pair);
        assert_eq!(Context::eval_access(&pair, &Value::Real(0.0)).unwrap(), Value::Integer(10));
        assert_eq!(access_err(&pair, 1_i64), r#"var error: object member "1" is inaccessible"#);
        assert_eq!(access_err(&pair, 2_i64), "var error: array index 2 is out of range [0, 2]");
        assert_eq!(access_err(&pair, "x"), "syntax error: array index must be number, but was string");
    }

    #[test]
    fn slicing_strings_by_byte() {
        assert_eq!(slice("hello", None, None).unwrap(), Value::from("hello"));
        assert_eq!(slice("hello", Some(5), None).unwrap(), Value::from(""));
        assert_eq!(slice("héllo", Some(1), Some(3)).unwrap(), Value::from("é"));
        assert_eq!(slice("héllo", Some(2), None).unwrap_err(), RuntimeError::NotCharBoundary { index: 2 });
        assert_eq!(slice("héllo", Some(0), Some(2)).unwrap_err().to_string(),
                   "range error: index 2 is not on a character boundary");
    }

    #[test]
    fn slice_bounds_are_checked_in_order() {
        assert_eq!(slice("abc", Some(-1), Some(9)).unwrap_err().to_string(),
                   "range error: start-index -1 is negative");
        assert_eq!(slice("abc", Some(0), Some(-1)).unwrap_err().to_string(),
                   "range error: end-index -1 is out of range [0, 3]");
        assert_eq!(slice("abc", Some(9), Some(2)).unwrap_err().to_string(),
                   "range error: start-index 9 is greater than end-index 2");
    }

    #[test]
    fn slicing_arrays_copies() {
        let array = vec![Value::Integer(1), Value::Integer(2), Value::Integer(3)];
        assert_eq!(slice(array.clone(), Some(1), None).unwrap(),
                   Value::from(vec![Value::Integer(2), Value::Integer(3)]));
        assert_eq!(slice(Vec::<Value>::new(), None, None).unwrap(), Value::from(Vec::<Value>::new()));
        assert_eq!(slice(Value::Bool(true), None, None).unwrap_err().to_string(),
                   "syntax error: slicing requires an array or string, but was bool");
    }

    #[test]
    fn slice_bounds_must_be_integral() {
        let err = Context::eval_slice(&Value::from("abc"), Some(&Value::Real(0.5)), None).unwrap_err();
        assert_eq!(err, RuntimeError::LossyFloatCast);
        let err = Context::eval_slice(&Value::from("abc"), None, Some(&Value::from("2"))).unwrap_err();
        assert_eq!(err.to_string(), "type error: required number of type integer, but was string");
    }
}
