#[derive(Debug, Clone, PartialEq, Eq)]
/// Represents all errors that can occur during lexing or parsing.
///
/// Every variant carries the 1-based byte offset of the offending token. The
/// end of input is reported at `source.len() + 1`.
pub enum ParseError {
    /// A character or operator that is not part of the language.
    UnknownToken {
        /// Name of the token class, such as `ILLEGAL`, `CHAR` or `+=`.
        token:    String,
        /// The offending literal, empty for operator tokens.
        literal:  String,
        /// Position of the token.
        position: usize,
    },
    /// An integer literal that does not fit into 64 bits or is malformed.
    InvalidInteger {
        /// Position of the literal.
        position: usize,
    },
    /// A float literal that is out of range.
    InvalidFloat {
        /// Position of the literal.
        position: usize,
    },
    /// A string literal that is unterminated or contains a bad escape.
    InvalidString {
        /// Position of the literal.
        position: usize,
    },
    /// A token that cannot continue any valid derivation.
    UnexpectedToken {
        /// Grammar name of the token, such as `IDENT`, `')'` or `$end`.
        token:     String,
        /// The only viable continuation, if there is exactly one.
        expecting: Option<String>,
        /// Position of the token.
        position:  usize,
    },
    /// The expression nests deeper than the parser allows.
    TooDeep {
        /// Position of the token at which the limit was reached.
        position: usize,
    },
}

impl ParseError {
    /// Returns the 1-based source position the error refers to.
    ///
    /// # Example
    /// ```
    /// use dynexpr::error::ParseError;
    ///
    /// let err = ParseError::InvalidFloat { position: 7 };
    /// assert_eq!(err.position(), 7);
    /// ```
    #[must_use]
    pub const fn position(&self) -> usize {
        match self {
            Self::UnknownToken { position, .. }
            | Self::InvalidInteger { position }
            | Self::InvalidFloat { position }
            | Self::InvalidString { position }
            | Self::UnexpectedToken { position, .. }
            | Self::TooDeep { position } => *position,
        }
    }

    /// Returns `true` for errors raised by the lexer rather than the grammar.
    #[must_use]
    pub const fn is_lexical(&self) -> bool {
        !matches!(self, Self::UnexpectedToken { .. } | Self::TooDeep { .. })
    }
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownToken { token, literal, position } => {
                write!(f, "unknown token {token:?} ({literal:?}) at position {position}")
            },
            Self::InvalidInteger { position } => {
                write!(f, "parse error: cannot parse integer at position {position}")
            },
            Self::InvalidFloat { position } => {
                write!(f, "parse error: cannot parse float at position {position}")
            },
            Self::InvalidString { position } => {
                write!(f, "parse error: cannot unquote string literal at position {position}")
            },
            Self::UnexpectedToken { token, expecting: Some(expected), .. } => {
                write!(f, "syntax error: unexpected {token}, expecting {expected}")
            },
            Self::UnexpectedToken { token, expecting: None, .. } => {
                write!(f, "syntax error: unexpected {token}")
            },
            Self::TooDeep { position } => {
                write!(f, "syntax error: expression nested too deeply at position {position}")
            },
        }
    }
}

impl std::error::Error for ParseError {}
