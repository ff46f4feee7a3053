/// The `Value` enum and its conversions.
///
/// Defines the closed set of runtime types, the type names used in error
/// messages, strict structural equality for tests and embeddings, and the
/// conversions used by the operators (`as_bool`, `as_integer`).
pub mod core;
/// Host value capability.
///
/// Defines the `HostValue` trait through which an embedding exposes its own
/// data to field and index access, and the `Member` lookup outcome that tells
/// visible, hidden, method and missing members apart.
pub mod host;
/// Insertion-ordered record.
///
/// Defines `Record`, the string-keyed map behind object literals. Keys are
/// unique, iteration follows insertion order and equality ignores order.
pub mod record;
