/// Core evaluation logic and context management.
///
/// Contains the evaluation context, which borrows the caller's variables and
/// functions, and the tree walk that reduces an expression to a value.
pub mod core;

/// Unary operator evaluation logic.
///
/// Implements arithmetic negation, logical NOT and bitwise NOT.
pub mod unary;

/// Binary operator evaluation logic.
///
/// Handles the execution of all binary operations in expressions, including
/// arithmetic, comparisons, logical and bitwise operators, and membership.
pub mod binary;

/// Member access and slicing.
///
/// Reads fields of records and host values, elements of arrays and host
/// sequences, and slices of strings and arrays.
pub mod access;

/// Function evaluation.
///
/// Dispatches calls to the host functions supplied by the caller.
pub mod function;

/// Utility functions for evaluation.
///
/// Provides deep equality and index conversion shared by the operators.
pub mod utils;
