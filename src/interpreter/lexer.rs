use std::{fmt, sync::Arc};

use logos::{Lexer, Logos};

use crate::error::ParseError;

/// Reasons a token could not be produced.
///
/// Logos reports these through the `Err` side of its iterator. [`Tokens`]
/// turns them into [`ParseError`]s carrying the token position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LexError {
    /// A character that starts no token.
    #[default]
    Illegal,
    /// An operator the language does not support, such as `+=`.
    Unsupported,
    /// A single-quoted character literal.
    CharLiteral,
    /// An integer literal that does not fit into 64 bits.
    Integer,
    /// A float literal that is out of range.
    Float,
    /// A string literal that is unterminated or has a bad escape.
    Unquote,
}

/// Represents a lexical token in the source input.
/// A token is a minimal but meaningful unit of text produced by the lexer.
/// This enum defines all recognized tokens in the language.
#[derive(Logos, Debug, PartialEq, Clone)]
#[logos(error = LexError)]
pub enum Token {
    /// `nil`
    #[token("nil")]
    Nil,
    /// Boolean literal tokens, `true` and `false`.
    #[token("true", |_| true)]
    #[token("false", |_| false)]
    Bool(bool),
    /// Integer literal tokens, such as `42` or `0xFF`.
    #[regex(r"[0-9]+", parse_decimal)]
    #[regex(r"0[xX][0-9a-fA-F]*", parse_hex)]
    Integer(i64),
    /// Numeric literal tokens, such as `3.14`, `1.`, `.5` or `2.1e-10`.
    #[regex(r"[0-9]+\.[0-9]*([eE][+-]?[0-9]+)?", parse_float)]
    #[regex(r"\.[0-9]+([eE][+-]?[0-9]+)?", parse_float)]
    #[regex(r"[0-9]+[eE][+-]?[0-9]+", parse_float)]
    Real(f64),
    /// String literal tokens, either `"quoted\n"` or `` `raw` ``.
    #[regex(r#""([^"\\\n]|\\[^\n])*""#, unquote, allow_greedy = true)]
    #[regex(r"`[^`]*`", unquote_raw, allow_greedy = true)]
    Text(Arc<str>),
    /// `in` or `IN`
    #[token("in")]
    #[token("IN")]
    In,
    /// Identifier tokens; variable or function names such as `x` or `len`.
    #[regex(r"[\p{L}_][\p{L}\p{Nd}_]*", |lex| lex.slice().to_string())]
    Identifier(String),

    /// `+`
    #[token("+")]
    Plus,
    /// `-`
    #[token("-")]
    Minus,
    /// `*`
    #[token("*")]
    Star,
    /// `/`
    #[token("/")]
    Slash,
    /// `%`
    #[token("%")]
    Percent,
    /// `!`
    #[token("!")]
    Bang,
    /// `~`
    #[token("~")]
    Tilde,
    /// `.`
    #[token(".")]
    Dot,
    /// `,`
    #[token(",")]
    Comma,
    /// `:`
    #[token(":")]
    Colon,
    /// `(`
    #[token("(")]
    LParen,
    /// `)`
    #[token(")")]
    RParen,
    /// `[`
    #[token("[")]
    LBracket,
    /// `]`
    #[token("]")]
    RBracket,
    /// `{`
    #[token("{")]
    LBrace,
    /// `}`
    #[token("}")]
    RBrace,
    /// `|`
    #[token("|")]
    Pipe,
    /// `^`
    #[token("^")]
    Caret,
    /// `&`
    #[token("&")]
    Ampersand,
    /// `&&`
    #[token("&&")]
    AndAnd,
    /// `||`
    #[token("||")]
    OrOr,
    /// `==`
    #[token("==")]
    EqualEqual,
    /// `!=`
    #[token("!=")]
    BangEqual,
    /// `<`
    #[token("<")]
    Less,
    /// `>`
    #[token(">")]
    Greater,
    /// `<=`
    #[token("<=")]
    LessEqual,
    /// `>=`
    #[token(">=")]
    GreaterEqual,
    /// `<<`
    #[token("<<")]
    ShiftLeft,
    /// `>>`
    #[token(">>")]
    ShiftRight,

    /// Input that is recognized only to be refused: operators without a
    /// meaning in expressions, character literals, unterminated strings, and
    /// integer spellings without support: binary, octal and digit separators.
    /// The callbacks always fail, so this variant is never produced.
    #[token("...", unsupported)]
    #[token("=", unsupported)]
    #[token(":=", unsupported)]
    #[token(";", unsupported)]
    #[token("++", unsupported)]
    #[token("--", unsupported)]
    #[token("+=", unsupported)]
    #[token("-=", unsupported)]
    #[token("*=", unsupported)]
    #[token("/=", unsupported)]
    #[token("%=", unsupported)]
    #[token("&=", unsupported)]
    #[token("|=", unsupported)]
    #[token("^=", unsupported)]
    #[token("<<=", unsupported)]
    #[token(">>=", unsupported)]
    #[token("&^", unsupported)]
    #[token("&^=", unsupported)]
    #[regex(r"'([^'\\\n]|\\[^\n])*'?", callback = |_| { Err::<(), _>(LexError::CharLiteral) }, allow_greedy = true)]
    #[regex(r#""([^"\\\n]|\\[^\n])*\\?"#, callback = |_| { Err::<(), _>(LexError::Unquote) }, allow_greedy = true)]
    #[regex(r"`[^`]*", callback = |_| { Err::<(), _>(LexError::Unquote) }, allow_greedy = true)]
    #[regex(r"0[bBoO][0-9a-zA-Z_]*", callback = |_| { Err::<(), _>(LexError::Integer) })]
    #[regex(r"[0-9]+_[0-9_]*", callback = |_| { Err::<(), _>(LexError::Integer) })]
    #[regex(r"0[xX][0-9a-fA-F]*_[0-9a-fA-F_]*", callback = |_| { Err::<(), _>(LexError::Integer) })]
    Rejected,

    /// `// Comments.`
    #[regex(r"//[^\n\r]*", logos::skip, allow_greedy = true)]
    Comment,
    /// `/* Block comments. */`
    #[regex(r"/\*([^*]|\*+[^*/])*\*+/", logos::skip, allow_greedy = true)]
    BlockComment,
    /// Spaces, tabs and line breaks.
    #[regex(r"[ \t\r\n]+", logos::skip)]
    Ignored,
}

/// Grammar names of the tokens as they appear in syntax errors.
///
/// Literal classes and multi-character operators use upper-case names,
/// single-character punctuation is quoted.
impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Nil => "LITERAL_NIL",
            Self::Bool(_) => "LITERAL_BOOL",
            Self::Integer(_) | Self::Real(_) => "LITERAL_NUMBER",
            Self::Text(_) => "LITERAL_STRING",
            Self::In => "IN",
            Self::Identifier(_) => "IDENT",
            Self::Plus => "'+'",
            Self::Minus => "'-'",
            Self::Star => "'*'",
            Self::Slash => "'/'",
            Self::Percent => "'%'",
            Self::Bang => "'!'",
            Self::Tilde => "BIT_NOT",
            Self::Dot => "'.'",
            Self::Comma => "','",
            Self::Colon => "':'",
            Self::LParen => "'('",
            Self::RParen => "')'",
            Self::LBracket => "'['",
            Self::RBracket => "']'",
            Self::LBrace => "'{'",
            Self::RBrace => "'}'",
            Self::Pipe => "'|'",
            Self::Caret => "'^'",
            Self::Ampersand => "'&'",
            Self::AndAnd => "AND",
            Self::OrOr => "OR",
            Self::EqualEqual => "EQL",
            Self::BangEqual => "NEQ",
            Self::Less => "LSS",
            Self::Greater => "GTR",
            Self::LessEqual => "LEQ",
            Self::GreaterEqual => "GEQ",
            Self::ShiftLeft => "SHL",
            Self::ShiftRight => "SHR",
            Self::Rejected | Self::Comment | Self::BlockComment | Self::Ignored => "ILLEGAL",
        };
        write!(f, "{name}")
    }
}

/// Lazy token stream over a source string.
///
/// Yields each token together with its 1-based byte position. Lexical
/// failures are reported as [`ParseError`]s; the stream should not be polled
/// after the first error.
pub struct Tokens<'src> {
    lexer: Lexer<'src, Token>,
}

/// Creates a lazy token stream for `source`.
///
/// # Example
/// ```
/// use dynexpr::interpreter::lexer::{Token, tokenize};
///
/// let tokens: Vec<_> = tokenize("a + 0x10").collect::<Result<_, _>>().unwrap();
/// assert_eq!(tokens,
///            vec![(Token::Identifier("a".into()), 1), (Token::Plus, 3), (Token::Integer(16), 5)]);
/// ```
#[must_use]
pub fn tokenize(source: &str) -> Tokens<'_> {
    Tokens { lexer: Token::lexer(source) }
}

impl Iterator for Tokens<'_> {
    type Item = Result<(Token, usize), ParseError>;

    fn next(&mut self) -> Option<Self::Item> {
        let token = self.lexer.next()?;
        let start = self.lexer.span().start;
        let position = start + 1;

        Some(match token {
            Ok(token) => Ok((token, position)),
            Err(LexError::Illegal) => {
                let literal = self.lexer.source()[start..].chars()
                                                          .next()
                                                          .map(String::from)
                                                          .unwrap_or_default();
                Err(ParseError::UnknownToken { token: "ILLEGAL".to_string(),
                                               literal,
                                               position })
            },
            Err(err) => Err(lex_error(err, self.lexer.slice(), position)),
        })
    }
}

/// Builds the [`ParseError`] for a token that matched but was refused.
fn lex_error(err: LexError, slice: &str, position: usize) -> ParseError {
    match err {
        LexError::Unsupported => {
            let literal = if slice == ";" { ";" } else { "" };
            ParseError::UnknownToken { token: slice.to_string(),
                                       literal: literal.to_string(),
                                       position }
        },
        LexError::CharLiteral => ParseError::UnknownToken { token: "CHAR".to_string(),
                                                            literal: slice.to_string(),
                                                            position },
        LexError::Integer => ParseError::InvalidInteger { position },
        LexError::Float => ParseError::InvalidFloat { position },
        LexError::Illegal | LexError::Unquote => ParseError::InvalidString { position },
    }
}

/// Fails for operators that exist in the token grammar but not in the
/// language.
fn unsupported(_: &Lexer<Token>) -> Result<(), LexError> {
    Err(LexError::Unsupported)
}

/// Parses a decimal integer literal.
///
/// # Returns
/// - `Ok(i64)`: The parsed value.
/// - `Err(LexError::Integer)`: If the literal exceeds the `i64` range.
fn parse_decimal(lex: &Lexer<Token>) -> Result<i64, LexError> {
    lex.slice().parse().map_err(|_| LexError::Integer)
}

/// Parses a hexadecimal integer literal.
///
/// The digits are read as an unsigned 64 bit number and reinterpreted as
/// `i64`, so `0xFFFFFFFFFFFFFFFF` is `-1`. Only the lower-case `0x` prefix is
/// accepted.
#[allow(clippy::cast_possible_wrap)]
fn parse_hex(lex: &Lexer<Token>) -> Result<i64, LexError> {
    let digits = lex.slice()
                    .strip_prefix("0x")
                    .ok_or(LexError::Integer)?;
    u64::from_str_radix(digits, 16).map(|v| v as i64)
                                   .map_err(|_| LexError::Integer)
}

/// Parses a floating-point literal, rejecting literals that overflow to
/// infinity.
fn parse_float(lex: &Lexer<Token>) -> Result<f64, LexError> {
    match lex.slice().parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(LexError::Float),
    }
}

/// Strips the quotes of a double-quoted literal and resolves its escapes.
fn unquote(lex: &Lexer<Token>) -> Result<Arc<str>, LexError> {
    let slice = lex.slice();
    let body = &slice[1..slice.len() - 1];
    unescape(body).map(Arc::from).ok_or(LexError::Unquote)
}

/// Strips the backticks of a raw literal. Carriage returns are dropped.
fn unquote_raw(lex: &Lexer<Token>) -> Arc<str> {
    let slice = lex.slice();
    let body = &slice[1..slice.len() - 1];
    if body.contains('\r') {
        Arc::from(body.replace('\r', ""))
    } else {
        Arc::from(body)
    }
}

/// Resolves backslash escapes.
///
/// Supports `\a \b \f \n \r \t \v \\ \"`, two-digit `\x` hex bytes,
/// three-digit octal bytes, `\u` with four and `\U` with eight hex digits.
/// Returns `None` for unknown escapes, truncated sequences and byte escapes
/// that do not form valid UTF-8.
///
/// # Example
/// ```
/// use dynexpr::interpreter::lexer::unescape;
///
/// assert_eq!(unescape(r"a\tb\x41\101é").as_deref(), Some("a\tbAAé"));
/// assert_eq!(unescape(r"\q"), None);
/// assert_eq!(unescape(r"\xff"), None);
/// ```
#[must_use]
pub fn unescape(body: &str) -> Option<String> {
    let mut bytes = Vec::with_capacity(body.len());
    let mut chars = body.chars();

    while let Some(c) = chars.next() {
        if c != '\\' {
            let mut buffer = [0; 4];
            bytes.extend_from_slice(c.encode_utf8(&mut buffer).as_bytes());
            continue;
        }
        let escaped = match chars.next()? {
            'a' => 0x07,
            'b' => 0x08,
            'f' => 0x0C,
            'n' => b'\n',
            'r' => b'\r',
            't' => b'\t',
            'v' => 0x0B,
            '\\' => b'\\',
            '"' => b'"',
            'x' => u8::try_from(read_digits(&mut chars, 2, 16)?).ok()?,
            first @ '0'..='7' => {
                let rest = read_digits(&mut chars, 2, 8)?;
                u8::try_from(first.to_digit(8)? * 64 + rest).ok()?
            },
            'u' => {
                let c = char::from_u32(read_digits(&mut chars, 4, 16)?)?;
                let mut buffer = [0; 4];
                bytes.extend_from_slice(c.encode_utf8(&mut buffer).as_bytes());
                continue;
            },
            'U' => {
                let c = char::from_u32(read_digits(&mut chars, 8, 16)?)?;
                let mut buffer = [0; 4];
                bytes.extend_from_slice(c.encode_utf8(&mut buffer).as_bytes());
                continue;
            },
            _ => return None,
        };
        bytes.push(escaped);
    }

    String::from_utf8(bytes).ok()
}

/// Reads exactly `count` digits in `radix` and returns their value.
fn read_digits(chars: &mut std::str::Chars<'_>, count: usize, radix: u32) -> Option<u32> {
    let mut value = 0_u32;
    for _ in 0..count {
        value = value * radix + chars.next()?.to_digit(radix)?;
    }
    Some(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lex(source: &str) -> Result<Vec<Token>, ParseError> {
        tokenize(source).map(|item| item.map(|(token, _)| token))
                        .collect()
    }

    fn lex_err(source: &str) -> String {
        tokenize(source).find_map(Result::err)
                        .map(|err| err.to_string())
                        .unwrap_or_default()
    }

    #[test]
    fn numbers() {
        assert_eq!(lex("42 0x2A 1.5 1. .5 4e2").unwrap(),
                   vec![Token::Integer(42),
                        Token::Integer(42),
                        Token::Real(1.5),
                        Token::Real(1.0),
                        Token::Real(0.5),
                        Token::Real(400.0)]);
        assert_eq!(lex("0xFFFFFFFFFFFFFFFF").unwrap(), vec![Token::Integer(-1)]);
    }

    #[test]
    fn version_like_literal_splits_into_two_numbers() {
        assert_eq!(lex("4.2.0").unwrap(), vec![Token::Real(4.2), Token::Real(0.0)]);
    }

    #[test]
    fn keywords_and_identifiers() {
        assert_eq!(lex("nil true false in IN In _x1 äö").unwrap(),
                   vec![Token::Nil,
                        Token::Bool(true),
                        Token::Bool(false),
                        Token::In,
                        Token::In,
                        Token::Identifier("In".into()),
                        Token::Identifier("_x1".into()),
                        Token::Identifier("äö".into())]);
    }

    #[test]
    fn strings() {
        assert_eq!(lex(r#""a\"b" `c\n`"#).unwrap(),
                   vec![Token::Text("a\"b".into()), Token::Text("c\\n".into())]);
        assert_eq!(lex("`a\r\nb`").unwrap(), vec![Token::Text("a\nb".into())]);
    }

    #[test]
    fn comments_and_whitespace_are_skipped() {
        assert_eq!(lex("1 /* two */ + // three\n 4").unwrap(),
                   vec![Token::Integer(1), Token::Plus, Token::Integer(4)]);
    }

    #[test]
    fn operators_prefer_the_longest_match() {
        assert_eq!(lex("<<= <= << <").map_err(|e| e.to_string()),
                   Err(r#"unknown token "<<=" ("") at position 1"#.to_string()));
        assert_eq!(lex("<= << < && &").unwrap(),
                   vec![Token::LessEqual,
                        Token::ShiftLeft,
                        Token::Less,
                        Token::AndAnd,
                        Token::Ampersand]);
    }

    #[test]
    fn arrow_is_less_followed_by_minus() {
        assert_eq!(lex("1<-2").unwrap(),
                   vec![Token::Integer(1), Token::Less, Token::Minus, Token::Integer(2)]);
    }

    #[test]
    fn lexical_errors() {
        assert_eq!(lex_err("1 §"), r#"unknown token "ILLEGAL" ("§") at position 3"#);
        assert_eq!(lex_err("a += 1"), r#"unknown token "+=" ("") at position 3"#);
        assert_eq!(lex_err("a;"), r#"unknown token ";" (";") at position 2"#);
        assert_eq!(lex_err("'t'"), r#"unknown token "CHAR" ("'t'") at position 1"#);
        assert_eq!(lex_err("99999999999999999999"),
                   "parse error: cannot parse integer at position 1");
        assert_eq!(lex_err("0x"), "parse error: cannot parse integer at position 1");
        assert_eq!(lex_err("1e999"), "parse error: cannot parse float at position 1");
        assert_eq!(lex_err(r#"text""#), "parse error: cannot unquote string literal at position 5");
        assert_eq!(lex_err(r#""\'""#), "parse error: cannot unquote string literal at position 1");
        assert_eq!(lex_err("`open"), "parse error: cannot unquote string literal at position 1");
    }

    #[test]
    fn foreign_integer_spellings_are_one_bad_literal() {
        for source in ["0b101", "0B1", "0o17", "0O7", "1_000", "0x_FF", "0xFF_FF", "7_"] {
            assert_eq!(lex_err(source), "parse error: cannot parse integer at position 1", "{source}");
        }
        assert_eq!(lex_err("x + 0b1"), "parse error: cannot parse integer at position 5");
        assert_eq!(lex("0 b").unwrap(), vec![Token::Integer(0), Token::Identifier("b".into())]);
    }
}
