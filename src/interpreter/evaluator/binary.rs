/// Binary operator dispatch.
///
/// Routes each operator to the handler for its family.
pub mod core;

/// Addition, concatenation, subtraction, multiplication, division and
/// remainder.
pub mod arithmetic;

/// Deep equality and numeric ordering.
pub mod comparison;

/// Logical AND and OR on booleans.
pub mod logic;

/// Bitwise operators and shifts on 64 bit integers.
pub mod bitwise;

/// The `in` operator.
pub mod membership;
