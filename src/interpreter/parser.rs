/// Parser entry points and the token stream.
///
/// Contains `parse`, which turns a whole source string into one expression,
/// the shared `ParseResult` type and the `TokenStream` that pulls tokens from
/// the lexer on demand.
pub mod core;

/// Unary, postfix and primary expressions.
///
/// Handles prefix operators (`-`, `!`, `~`), member access, indexing and
/// slicing, literals, function calls, and array and object literals.
pub mod unary;

/// Binary operator parsing.
///
/// Implements one function per precedence level, from logical OR down to
/// multiplication. All levels are left-associative.
pub mod binary;

/// Utility functions for the parser.
///
/// Provides helpers for comma-separated lists and object literal members.
pub mod utils;
