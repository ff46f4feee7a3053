/// Parsing errors.
///
/// Defines all error types that can occur during lexing and parsing of source
/// code: unknown tokens, malformed literals and grammar violations. Every
/// parse error carries the source position of the offending token.
pub mod parse_error;
/// Runtime errors.
///
/// Contains all error types that can be raised while evaluating a parsed
/// expression: type mismatches, range violations, unresolved variables and
/// members, and failures reported by host functions. Runtime errors never
/// carry a position.
pub mod runtime_error;

pub use parse_error::ParseError;
pub use runtime_error::RuntimeError;

/// Coarse classification of an [`Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Unknown token or malformed literal.
    Lex,
    /// Grammar violation, duplicate object key or wrong key/index type.
    Syntax,
    /// Operator applied outside its domain.
    Type,
    /// Slice bounds violated.
    Range,
    /// Unresolved identifier, missing member or out-of-range index.
    Variable,
    /// Unknown function or a failure reported by a host function.
    Function,
    /// Integer division by zero.
    Arithmetic,
    /// The result type was rejected by the [`EvalConfig`](crate::EvalConfig).
    NotAccepted,
    /// A panic converted by the never-fail entry point.
    Internal,
}

/// Any error produced by an evaluation.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// The source could not be tokenized or parsed.
    Parse(ParseError),
    /// Evaluation of the parsed expression failed.
    Runtime(RuntimeError),
    /// The result was produced but its type is not accepted.
    TypeNotAccepted,
    /// Evaluation panicked; the payload message is kept.
    Internal(String),
}

impl Error {
    /// Classifies the error.
    ///
    /// # Example
    /// ```
    /// use dynexpr::error::{Error, ErrorKind, RuntimeError};
    ///
    /// let err = Error::from(RuntimeError::DivisionByZero);
    /// assert_eq!(err.kind(), ErrorKind::Arithmetic);
    /// assert_eq!(Error::TypeNotAccepted.kind(), ErrorKind::NotAccepted);
    /// ```
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Parse(err) if err.is_lexical() => ErrorKind::Lex,
            Self::Parse(_) => ErrorKind::Syntax,
            Self::Runtime(err) => match err {
                RuntimeError::RequiredBool { .. }
                | RuntimeError::RequiredInteger { .. }
                | RuntimeError::LossyFloatCast
                | RuntimeError::UnaryMinus { .. }
                | RuntimeError::InvalidOperands { .. } => ErrorKind::Type,
                RuntimeError::DivisionByZero => ErrorKind::Arithmetic,
                RuntimeError::ObjectKeyType { .. }
                | RuntimeError::ArrayIndexType { .. }
                | RuntimeError::FractionalIndex { .. }
                | RuntimeError::MethodMember { .. }
                | RuntimeError::CannotAccess { .. }
                | RuntimeError::DuplicateKey { .. }
                | RuntimeError::MembershipRequiresArray { .. }
                | RuntimeError::SliceTarget { .. } => ErrorKind::Syntax,
                RuntimeError::NegativeStart { .. }
                | RuntimeError::EndOutOfRange { .. }
                | RuntimeError::StartAfterEnd { .. }
                | RuntimeError::NotCharBoundary { .. } => ErrorKind::Range,
                RuntimeError::NoSuchMember { .. }
                | RuntimeError::IndexOutOfRange { .. }
                | RuntimeError::InaccessibleMember { .. }
                | RuntimeError::UnknownVariable { .. } => ErrorKind::Variable,
                RuntimeError::UnknownFunction { .. } | RuntimeError::FunctionFailed { .. } => {
                    ErrorKind::Function
                },
            },
            Self::TypeNotAccepted => ErrorKind::NotAccepted,
            Self::Internal(_) => ErrorKind::Internal,
        }
    }

    /// Returns the source position, available for parse errors only.
    #[must_use]
    pub const fn position(&self) -> Option<usize> {
        match self {
            Self::Parse(err) => Some(err.position()),
            _ => None,
        }
    }
}

impl From<ParseError> for Error {
    fn from(err: ParseError) -> Self {
        Self::Parse(err)
    }
}

impl From<RuntimeError> for Error {
    fn from(err: RuntimeError) -> Self {
        Self::Runtime(err)
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Parse(err) => err.fmt(f),
            Self::Runtime(err) => err.fmt(f),
            Self::TypeNotAccepted => write!(f, "Type not accepted"),
            Self::Internal(message) => write!(f, "internal error: {message}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Parse(err) => Some(err),
            Self::Runtime(err) => Some(err),
            Self::TypeNotAccepted | Self::Internal(_) => None,
        }
    }
}
