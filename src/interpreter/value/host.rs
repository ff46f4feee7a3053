use std::fmt::Debug;

use crate::interpreter::value::core::Value;

/// Outcome of looking up a member of a [`HostValue`].
#[derive(Debug, Clone, PartialEq)]
pub enum Member {
    /// The member exists and may be read.
    Visible(Value),
    /// The member exists but the host does not expose it.
    Hidden,
    /// The member is a method; calling methods is not supported.
    Method,
    /// There is no such member.
    Absent,
}

/// Capability interface for caller-owned values.
///
/// An embedding wraps its own data in a type implementing this trait and
/// passes it in as [`Value::Host`]. Field access (`value.name`,
/// `value["name"]`) is routed to [`HostValue::field`]. Index access
/// (`value[0]`) is routed to [`HostValue::element`] when
/// [`HostValue::sequence_len`] reports a length. Every method has a default,
/// so a host value that exposes nothing only has to implement `Debug`.
///
/// # Example
/// ```
/// use std::collections::HashMap;
///
/// use dynexpr::{HostValue, Member, Value, evaluate};
///
/// #[derive(Debug)]
/// struct Point {
///     x: i64,
///     y: i64,
/// }
///
/// impl HostValue for Point {
///     fn type_name(&self) -> &str {
///         "point"
///     }
///
///     fn field(&self, name: &str) -> Member {
///         match name {
///             "x" => Member::Visible(self.x.into()),
///             "y" => Member::Visible(self.y.into()),
///             _ => Member::Absent,
///         }
///     }
/// }
///
/// let variables = HashMap::from([("p".to_string(), Value::host(Point { x: 3, y: 4 }))]);
/// let result = evaluate("p.x * p.y", &variables, &HashMap::new()).unwrap();
/// assert_eq!(result, Value::Integer(12));
/// ```
pub trait HostValue: Debug + Send + Sync {
    /// Name used for this value in error messages.
    fn type_name(&self) -> &str {
        "<unknown type>"
    }

    /// Looks up a named member.
    fn field(&self, name: &str) -> Member {
        let _ = name;
        Member::Absent
    }

    /// Number of elements if the value behaves like a sequence.
    fn sequence_len(&self) -> Option<usize> {
        None
    }

    /// Looks up the element at `index`, which is always below
    /// [`HostValue::sequence_len`].
    fn element(&self, index: usize) -> Member {
        let _ = index;
        Member::Absent
    }
}
