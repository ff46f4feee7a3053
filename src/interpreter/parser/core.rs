use crate::{
    ast::Expr,
    error::ParseError,
    interpreter::{
        lexer::{Token, Tokens, tokenize},
        parser::binary::parse_logical_or,
    },
};

pub type ParseResult<T> = Result<T, ParseError>;

/// Grammar name used for the end of input.
const END_OF_INPUT: &str = "$end";

/// Deepest expression tree the parser builds.
///
/// Both parsing and evaluation recurse once per tree level, so the bound
/// keeps hostile input from exhausting the stack.
pub const MAX_DEPTH: usize = 128;

/// Token source for the parser with one token of lookahead.
///
/// Tokens are pulled from the lexer only when the parser asks for them, so a
/// lexical error is reported exactly when the parser reaches it.
pub struct TokenStream<'src> {
    tokens: Tokens<'src>,
    peeked: Option<Option<(Token, usize)>>,
    end:    usize,
    depth:  usize,
}

impl<'src> TokenStream<'src> {
    /// Creates a stream over `source`.
    #[must_use]
    pub fn new(source: &'src str) -> Self {
        Self { tokens: tokenize(source),
               peeked: None,
               end:    source.len() + 1,
               depth:  0, }
    }

    /// Returns the next token and its position without consuming it.
    ///
    /// # Returns
    /// - `Ok(Some(..))`: The next token.
    /// - `Ok(None)`: At the end of input.
    /// - `Err(ParseError)`: If the lexer fails on the next token.
    pub fn peek(&mut self) -> ParseResult<Option<&(Token, usize)>> {
        if self.peeked.is_none() {
            let next = self.tokens.next().transpose()?;
            self.peeked = Some(next);
        }
        Ok(self.peeked.as_ref().and_then(Option::as_ref))
    }

    /// Returns `true` if the next token equals `expected`.
    pub fn next_is(&mut self, expected: &Token) -> ParseResult<bool> {
        Ok(self.peek()?.is_some_and(|(token, _)| token == expected))
    }

    /// Consumes and returns the next token.
    pub fn advance(&mut self) -> ParseResult<Option<(Token, usize)>> {
        match self.peeked.take() {
            Some(peeked) => Ok(peeked),
            None => self.tokens.next().transpose(),
        }
    }

    /// Consumes the next token if it equals `expected`.
    ///
    /// # Returns
    /// The position of the consumed token.
    ///
    /// # Errors
    /// An `UnexpectedToken` error naming the token that was found instead.
    pub fn expect(&mut self, expected: &Token) -> ParseResult<usize> {
        if let Some((token, position)) = self.peek()?
           && token == expected
        {
            let position = *position;
            self.advance()?;
            return Ok(position);
        }
        Err(self.unexpected(None))
    }

    /// Builds the error for the next token, which cannot continue the
    /// current rule. A lexical error on that token takes precedence.
    pub fn unexpected(&mut self, expecting: Option<&str>) -> ParseError {
        let end = self.end;
        match self.peek() {
            Ok(Some((token, position))) => unexpected_token(token, *position, expecting),
            Ok(None) => ParseError::UnexpectedToken { token:     END_OF_INPUT.to_string(),
                                                      expecting: expecting.map(str::to_string),
                                                      position:  end, },
            Err(err) => err,
        }
    }

    /// Enters one more level of the expression tree.
    ///
    /// # Errors
    /// `TooDeep` at the next token once [`MAX_DEPTH`] levels are open.
    pub fn descend(&mut self) -> ParseResult<()> {
        if self.depth >= MAX_DEPTH {
            let end = self.end;
            let position = self.peek()?.map_or(end, |(_, position)| *position);
            return Err(ParseError::TooDeep { position });
        }
        self.depth += 1;
        Ok(())
    }

    /// Leaves `levels` levels entered with [`TokenStream::descend`].
    pub const fn ascend(&mut self, levels: usize) {
        self.depth = self.depth.saturating_sub(levels);
    }

    /// Builds the error for reaching the end of input.
    #[must_use]
    pub fn end_of_input(&self) -> ParseError {
        ParseError::UnexpectedToken { token:     END_OF_INPUT.to_string(),
                                      expecting: None,
                                      position:  self.end, }
    }
}

/// Builds an `UnexpectedToken` error for an already consumed token.
pub fn unexpected_token(token: &Token, position: usize, expecting: Option<&str>) -> ParseError {
    ParseError::UnexpectedToken { token: token.to_string(),
                                  expecting: expecting.map(str::to_string),
                                  position }
}

/// Parses a complete source string into a single expression.
///
/// The whole input must form one expression; any token left over after it is
/// a syntax error.
///
/// # Example
/// ```
/// use dynexpr::interpreter::parser::core::parse;
///
/// let expr = parse("a + 1").unwrap();
/// assert_eq!(expr.position(), 3);
///
/// let err = parse("42text").unwrap_err();
/// assert_eq!(err.to_string(), "syntax error: unexpected IDENT");
/// ```
pub fn parse(source: &str) -> ParseResult<Expr> {
    let mut tokens = TokenStream::new(source);
    let expr = parse_expression(&mut tokens)?;
    if tokens.peek()?.is_some() {
        return Err(tokens.unexpected(None));
    }
    Ok(expr)
}

/// Parses a full expression.
///
/// This is the entry point for expression parsing.
/// It begins at the lowest-precedence level, logical OR, and recursively
/// descends through the precedence hierarchy.
///
/// Grammar: `expression := logical_or`
///
/// # Parameters
/// - `tokens`: Token stream providing `(Token, position)` pairs.
///
/// # Returns
/// The parsed expression node.
pub fn parse_expression(tokens: &mut TokenStream<'_>) -> ParseResult<Expr> {
    parse_logical_or(tokens)
}
