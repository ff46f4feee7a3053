/// The evaluator module reduces an expression tree to a value.
///
/// The evaluator walks the tree bottom-up, evaluating children left to right
/// and applying exactly one operator per node. Identifiers and calls are
/// resolved against the caller's variables and functions.
///
/// # Responsibilities
/// - Implements the semantics of every operator.
/// - Reads members of records, arrays and host values.
/// - Reports runtime errors such as type mismatches and out of range indices.
pub mod evaluator;
/// The lexer module tokenizes source text for further parsing.
///
/// The lexer reads the raw source text and produces a stream of tokens, each
/// carrying its byte position. Comments and whitespace are skipped.
///
/// # Responsibilities
/// - Decodes numeric and string literals, identifiers and operators.
/// - Rejects characters and tokens the language does not use.
pub mod lexer;
/// The parser module builds the expression tree from tokens.
///
/// A recursive descent parser with one function per precedence level. The
/// whole input has to form exactly one expression.
///
/// # Responsibilities
/// - Converts tokens into [`Expr`](crate::ast::Expr) nodes.
/// - Reports syntax errors naming the unexpected token.
pub mod parser;
/// The value module defines the runtime data types for evaluation.
///
/// Declares `Value`, the insertion-ordered `Record` used for objects, and the
/// `HostValue` capability trait through which callers expose their own data.
///
/// # Responsibilities
/// - Defines the `Value` enum and its conversions.
/// - Names value types for error messages.
/// - Converts values to booleans and integers where operators require it.
pub mod value;
