//! # dynexpr
//!
//! dynexpr is an embeddable, dynamically typed expression language written in
//! Rust. It parses a short expression, resolves identifiers and function
//! calls against values and functions supplied by the caller, and reduces the
//! expression to a single value.
//!
//! Evaluations share no state. The same variables and functions can be used
//! by several threads at once.
//!
//! ```
//! use std::collections::HashMap;
//!
//! use dynexpr::{Value, evaluate};
//!
//! let variables = HashMap::from([("price".to_string(), Value::Real(2.5)),
//!                                ("tags".to_string(),
//!                                 Value::from(vec![Value::from("sale"), Value::from("new")]))]);
//!
//! let result = evaluate(r#"price * 4 > 9 && "sale" in tags"#, &variables, &HashMap::new());
//! assert_eq!(result.unwrap(), Value::Bool(true));
//! ```

#![warn(
    clippy::redundant_clone,
    clippy::needless_pass_by_value,
    clippy::similar_names,
    clippy::large_enum_variant,
    clippy::string_lit_as_bytes,
    clippy::match_same_arms,
    clippy::cargo,
    clippy::nursery,
    clippy::perf,
    clippy::style,
    clippy::suspicious,
    clippy::correctness,
    clippy::complexity,
    clippy::pedantic,
    //missing_docs,
)]
#![allow(clippy::missing_errors_doc)]

use std::panic::{self, AssertUnwindSafe};

use crate::interpreter::{evaluator::core::Context, parser::core::parse};

/// Defines the structure of parsed expressions.
///
/// This module declares the `Expr` enum and related types that represent the
/// syntactic structure of an expression as a tree. The tree is built by the
/// parser and walked by the evaluator.
///
/// # Responsibilities
/// - Defines the expression node types and the operator enums.
/// - Attaches the source position of the starting token to every node.
pub mod ast;
/// Provides unified error types for parsing and evaluation.
///
/// This module defines all errors that can be raised while lexing, parsing or
/// evaluating an expression, and the umbrella [`Error`] returned by the
/// public entry points. Messages follow the form `category error: details`.
///
/// # Responsibilities
/// - Defines error enums for all failure modes (lexer, parser, evaluator).
/// - Classifies errors with [`ErrorKind`].
/// - Implements `Display` and `std::error::Error` for reporting.
pub mod error;
/// Lexing, parsing, evaluation and the runtime value model.
///
/// This module ties together the phases of an evaluation. Most embeddings only
/// need [`evaluate`] or [`Evaluator`]; the phases are public for callers that
/// want to inspect the expression tree or drive the evaluator directly.
pub mod interpreter;
/// General utilities for safe numeric conversion and formatting.
///
/// # Responsibilities
/// - Convert between `i64`, `usize` and `f64` without silent data loss.
/// - Render reals the way string concatenation does.
pub mod util;

pub use crate::{
    error::{Error, ErrorKind},
    interpreter::{
        evaluator::core::{Function, Functions, Variables},
        value::{
            core::Value,
            host::{HostValue, Member},
            record::Record,
        },
    },
};

/// Result types an [`Evaluator`] accepts.
///
/// Every flag defaults to `true`. When the result of an evaluation has a type
/// whose flag is `false`, the evaluation fails with
/// [`Error::TypeNotAccepted`].
///
/// # Example
/// ```
/// use std::collections::HashMap;
///
/// use dynexpr::{Error, EvalConfig, Evaluator};
///
/// let config = EvalConfig { string_result: false,
///                           ..EvalConfig::default() };
/// let evaluator = Evaluator::with_config(config);
/// let empty = HashMap::new();
///
/// assert!(evaluator.evaluate("1 + 1", &empty, &HashMap::new()).is_ok());
/// assert_eq!(evaluator.evaluate(r#""a" + 1"#, &empty, &HashMap::new()),
///            Err(Error::TypeNotAccepted));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[allow(clippy::struct_excessive_bools)]
pub struct EvalConfig {
    /// Accept `nil`.
    pub nil_result:     bool,
    /// Accept booleans.
    pub bool_result:    bool,
    /// Accept integers.
    pub integer_result: bool,
    /// Accept reals.
    pub float_result:   bool,
    /// Accept strings.
    pub string_result:  bool,
    /// Accept arrays.
    pub array_result:   bool,
    /// Accept objects.
    pub object_result:  bool,
    /// Accept host values.
    pub host_result:    bool,
}

impl Default for EvalConfig {
    fn default() -> Self {
        Self { nil_result:     true,
               bool_result:    true,
               integer_result: true,
               float_result:   true,
               string_result:  true,
               array_result:   true,
               object_result:  true,
               host_result:    true, }
    }
}

impl EvalConfig {
    /// Returns `true` if a result of this value's type is accepted.
    #[must_use]
    pub const fn accepts(&self, value: &Value) -> bool {
        match value {
            Value::Null => self.nil_result,
            Value::Bool(_) => self.bool_result,
            Value::Integer(_) => self.integer_result,
            Value::Real(_) => self.float_result,
            Value::Text(_) => self.string_result,
            Value::Array(_) => self.array_result,
            Value::Record(_) => self.object_result,
            Value::Host(_) => self.host_result,
        }
    }
}

/// Evaluates expressions under an [`EvalConfig`].
///
/// An evaluator holds nothing but its configuration, so one instance can be
/// shared between threads and used for any number of evaluations.
#[derive(Debug, Clone, Default)]
pub struct Evaluator {
    config: EvalConfig,
}

impl Evaluator {
    /// Creates an evaluator that accepts every result type.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an evaluator with the given configuration.
    #[must_use]
    pub const fn with_config(config: EvalConfig) -> Self {
        Self { config }
    }

    /// Replaces the configuration.
    pub const fn configure(&mut self, config: EvalConfig) {
        self.config = config;
    }

    /// Returns the current configuration.
    #[must_use]
    pub const fn config(&self) -> &EvalConfig {
        &self.config
    }

    /// Parses and evaluates `source`.
    ///
    /// Identifiers are resolved against `variables` and calls against
    /// `functions`. Neither map is modified. The first error aborts the
    /// evaluation.
    ///
    /// # Parameters
    /// - `source`: The expression text.
    /// - `variables`: Values that identifiers may refer to.
    /// - `functions`: Functions that may be called by name.
    ///
    /// # Returns
    /// The value of the expression, if its type is accepted.
    ///
    /// # Errors
    /// - [`Error::Parse`] if the source is not a single valid expression.
    /// - [`Error::Runtime`] if evaluation fails.
    /// - [`Error::TypeNotAccepted`] if the result type is rejected by the
    ///   configuration.
    ///
    /// # Example
    /// ```
    /// use std::collections::HashMap;
    ///
    /// use dynexpr::{Evaluator, Value};
    ///
    /// let evaluator = Evaluator::new();
    /// let variables = HashMap::from([("name".to_string(), Value::from("world"))]);
    ///
    /// let value = evaluator.evaluate(r#""hello " + name"#, &variables, &HashMap::new());
    /// assert_eq!(value.unwrap(), Value::from("hello world"));
    ///
    /// let err = evaluator.evaluate("name.first", &variables, &HashMap::new()).unwrap_err();
    /// assert_eq!(err.to_string(), "syntax error: cannot access fields on type string");
    /// ```
    pub fn evaluate(&self,
                    source: &str,
                    variables: &Variables,
                    functions: &Functions)
                    -> Result<Value, Error> {
        tracing::debug!("evaluating {source:?}");

        let expr = parse(source)?;
        let value = Context::new(variables, functions).eval(&expr)?;

        if !self.config.accepts(&value) {
            tracing::debug!("rejecting result of type {}", value.type_name());
            return Err(Error::TypeNotAccepted);
        }
        Ok(value)
    }

    /// Like [`Evaluator::evaluate`], but also turns a panic into an error.
    ///
    /// The evaluator itself does not panic on any input. Host functions and
    /// host values are caller code, though, and may. This entry point catches
    /// such a panic and reports it as [`Error::Internal`] carrying the panic
    /// message.
    ///
    /// # Example
    /// ```
    /// use std::{collections::HashMap, sync::Arc};
    ///
    /// use dynexpr::{ErrorKind, Evaluator, Function, Value};
    ///
    /// let boom: Function = Arc::new(|_: &[Value]| -> Result<Value, String> { panic!("boom") });
    /// let functions = HashMap::from([("boom".to_string(), boom)]);
    ///
    /// let err = Evaluator::new().evaluate_catching("boom()", &HashMap::new(), &functions)
    ///                           .unwrap_err();
    /// assert_eq!(err.kind(), ErrorKind::Internal);
    /// assert_eq!(err.to_string(), "internal error: boom");
    /// ```
    pub fn evaluate_catching(&self,
                             source: &str,
                             variables: &Variables,
                             functions: &Functions)
                             -> Result<Value, Error> {
        panic::catch_unwind(AssertUnwindSafe(|| self.evaluate(source, variables, functions)))
            .unwrap_or_else(|payload| {
                let message = payload.downcast_ref::<&str>()
                                     .map(ToString::to_string)
                                     .or_else(|| payload.downcast_ref::<String>().cloned())
                                     .unwrap_or_else(|| "evaluation panicked".to_string());
                tracing::warn!("evaluation of {source:?} panicked: {message}");
                Err(Error::Internal(message))
            })
    }
}

/// Evaluates `source` with the default configuration.
///
/// Shorthand for `Evaluator::new().evaluate(source, variables, functions)`.
///
/// # Examples
/// ```
/// use std::collections::HashMap;
///
/// use dynexpr::{ErrorKind, Value, evaluate};
///
/// let value = evaluate("[1, 2, 3][1:][0] << 4", &HashMap::new(), &HashMap::new());
/// assert_eq!(value.unwrap(), Value::Integer(32));
///
/// // Unknown identifiers are errors, never nil.
/// let err = evaluate("x + 1", &HashMap::new(), &HashMap::new()).unwrap_err();
/// assert_eq!(err.kind(), ErrorKind::Variable);
/// assert_eq!(err.to_string(), r#"var error: variable "x" does not exist"#);
/// ```
pub fn evaluate(source: &str, variables: &Variables, functions: &Functions) -> Result<Value, Error> {
    Evaluator::new().evaluate(source, variables, functions)
}
