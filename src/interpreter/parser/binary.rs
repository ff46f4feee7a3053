use crate::{
    ast::{BinaryOperator, Expr},
    interpreter::{
        lexer::Token,
        parser::{
            core::{ParseResult, TokenStream},
            unary::parse_unary,
        },
    },
};

/// Signature shared by all precedence levels.
type Level = fn(&mut TokenStream<'_>) -> ParseResult<Expr>;

/// Parses a left-associative chain of binary operators.
///
/// The rule is: `level := operand (op operand)*` where `op` is one of
/// `operators`.
///
/// # Parameters
/// - `tokens`: Token stream with position information.
/// - `operand`: Parser for the next higher precedence level.
/// - `operators`: Operators accepted on this level.
///
/// # Returns
/// An `Expr::BinaryOp` tree, or the single operand if no operator follows.
fn parse_left_associative(tokens: &mut TokenStream<'_>,
                          operand: Level,
                          operators: &[BinaryOperator])
                          -> ParseResult<Expr> {
    let mut left = operand(tokens)?;
    let mut levels = 0;
    loop {
        let Some((token, position)) = tokens.peek()? else {
            break;
        };
        let position = *position;
        let Some(op) = token_to_binary_operator(token).filter(|op| operators.contains(op)) else {
            break;
        };
        tokens.advance()?;
        // Each operator in a chain nests the tree one level deeper.
        tokens.descend()?;
        levels += 1;
        let right = operand(tokens)?;
        left = Expr::BinaryOp { left: Box::new(left),
                                op,
                                right: Box::new(right),
                                position };
    }
    tokens.ascend(levels);
    Ok(left)
}

/// Parses logical OR expressions.
///
/// The rule is: `logical_or := logical_and ("||" logical_and)*`
pub fn parse_logical_or(tokens: &mut TokenStream<'_>) -> ParseResult<Expr> {
    parse_left_associative(tokens, parse_logical_and, &[BinaryOperator::Or])
}

/// Parses logical AND expressions, which bind tighter than OR.
///
/// The rule is: `logical_and := equality ("&&" equality)*`
pub fn parse_logical_and(tokens: &mut TokenStream<'_>) -> ParseResult<Expr> {
    parse_left_associative(tokens, parse_equality, &[BinaryOperator::And])
}

/// Parses `==` and `!=`.
///
/// The rule is: `equality := relational (("==" | "!=") relational)*`
pub fn parse_equality(tokens: &mut TokenStream<'_>) -> ParseResult<Expr> {
    parse_left_associative(tokens,
                           parse_relational,
                           &[BinaryOperator::Equal, BinaryOperator::NotEqual])
}

/// Parses comparisons and the membership operator, which share one level.
///
/// The rule is: `relational := bit_or (("<" | ">" | "<=" | ">=" | "in")
/// bit_or)*`
pub fn parse_relational(tokens: &mut TokenStream<'_>) -> ParseResult<Expr> {
    parse_left_associative(tokens,
                           parse_bit_or,
                           &[BinaryOperator::Less,
                             BinaryOperator::Greater,
                             BinaryOperator::LessEqual,
                             BinaryOperator::GreaterEqual,
                             BinaryOperator::In])
}

/// The rule is: `bit_or := bit_xor ("|" bit_xor)*`
pub fn parse_bit_or(tokens: &mut TokenStream<'_>) -> ParseResult<Expr> {
    parse_left_associative(tokens, parse_bit_xor, &[BinaryOperator::BitOr])
}

/// The rule is: `bit_xor := bit_and ("^" bit_and)*`
pub fn parse_bit_xor(tokens: &mut TokenStream<'_>) -> ParseResult<Expr> {
    parse_left_associative(tokens, parse_bit_and, &[BinaryOperator::BitXor])
}

/// The rule is: `bit_and := shift ("&" shift)*`
pub fn parse_bit_and(tokens: &mut TokenStream<'_>) -> ParseResult<Expr> {
    parse_left_associative(tokens, parse_shift, &[BinaryOperator::BitAnd])
}

/// The rule is: `shift := additive (("<<" | ">>") additive)*`
pub fn parse_shift(tokens: &mut TokenStream<'_>) -> ParseResult<Expr> {
    parse_left_associative(tokens,
                           parse_additive,
                           &[BinaryOperator::ShiftLeft, BinaryOperator::ShiftRight])
}

/// Parses addition and subtraction expressions.
///
/// Handles left-associative binary operators: `+` and `-`.
///
/// The rule is: `additive := multiplicative (("+" | "-") multiplicative)*`
///
/// # Parameters
/// - `tokens`: Token stream with position information.
///
/// # Returns
/// An `Expr::BinaryOp` tree representing the parsed expression.
pub fn parse_additive(tokens: &mut TokenStream<'_>) -> ParseResult<Expr> {
    parse_left_associative(tokens,
                           parse_multiplicative,
                           &[BinaryOperator::Add, BinaryOperator::Sub])
}

/// Parses multiplication-level expressions.
///
/// The rule is: `multiplicative := unary (("*" | "/" | "%") unary)*`
pub fn parse_multiplicative(tokens: &mut TokenStream<'_>) -> ParseResult<Expr> {
    parse_left_associative(tokens,
                           parse_unary,
                           &[BinaryOperator::Mul, BinaryOperator::Div, BinaryOperator::Mod])
}

/// Maps a token to the binary operator it denotes.
///
/// # Returns
/// `None` for tokens that are not binary operators.
///
/// # Example
/// ```
/// use dynexpr::{
///     ast::BinaryOperator,
///     interpreter::{lexer::Token, parser::binary::token_to_binary_operator},
/// };
///
/// assert_eq!(token_to_binary_operator(&Token::In), Some(BinaryOperator::In));
/// assert_eq!(token_to_binary_operator(&Token::Bang), None);
/// ```
#[must_use]
pub const fn token_to_binary_operator(token: &Token) -> Option<BinaryOperator> {
    match token {
        Token::OrOr => Some(BinaryOperator::Or),
        Token::AndAnd => Some(BinaryOperator::And),
        Token::EqualEqual => Some(BinaryOperator::Equal),
        Token::BangEqual => Some(BinaryOperator::NotEqual),
        Token::Less => Some(BinaryOperator::Less),
        Token::Greater => Some(BinaryOperator::Greater),
        Token::LessEqual => Some(BinaryOperator::LessEqual),
        Token::GreaterEqual => Some(BinaryOperator::GreaterEqual),
        Token::In => Some(BinaryOperator::In),
        Token::Pipe => Some(BinaryOperator::BitOr),
        Token::Caret => Some(BinaryOperator::BitXor),
        Token::Ampersand => Some(BinaryOperator::BitAnd),
        Token::ShiftLeft => Some(BinaryOperator::ShiftLeft),
        Token::ShiftRight => Some(BinaryOperator::ShiftRight),
        Token::Plus => Some(BinaryOperator::Add),
        Token::Minus => Some(BinaryOperator::Sub),
        Token::Star => Some(BinaryOperator::Mul),
        Token::Slash => Some(BinaryOperator::Div),
        Token::Percent => Some(BinaryOperator::Mod),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interpreter::parser::core::parse;

    fn binary_parts(expr: &Expr) -> (BinaryOperator, &Expr, &Expr) {
        match expr {
            Expr::BinaryOp { op, left, right, .. } => (*op, left, right),
            other => panic!("expected binary operation, got {other:?}"),
        }
    }

    #[test]
    fn and_binds_tighter_than_or() {
        let expr = parse("a || b && c").unwrap();
        let (op, _, right) = binary_parts(&expr);
        assert_eq!(op, BinaryOperator::Or);
        assert_eq!(binary_parts(right).0, BinaryOperator::And);
    }

    #[test]
    fn multiplication_binds_tighter_than_addition() {
        let expr = parse("1 + 2 * 3").unwrap();
        let (op, _, right) = binary_parts(&expr);
        assert_eq!(op, BinaryOperator::Add);
        assert_eq!(binary_parts(right).0, BinaryOperator::Mul);
    }

    #[test]
    fn operators_are_left_associative() {
        let expr = parse("8 - 4 - 2").unwrap();
        let (op, left, _) = binary_parts(&expr);
        assert_eq!(op, BinaryOperator::Sub);
        assert_eq!(binary_parts(left).0, BinaryOperator::Sub);
    }

    #[test]
    fn membership_shares_the_relational_level() {
        let expr = parse("1 in a == true").unwrap();
        let (op, left, _) = binary_parts(&expr);
        assert_eq!(op, BinaryOperator::Equal);
        assert_eq!(binary_parts(left).0, BinaryOperator::In);
    }

    #[test]
    fn bitwise_levels_sit_between_comparison_and_shift() {
        let expr = parse("1 | 2 ^ 3 & 4 << 5 < 6").unwrap();
        let (op, left, _) = binary_parts(&expr);
        assert_eq!(op, BinaryOperator::Less);
        let (op, _, right) = binary_parts(left);
        assert_eq!(op, BinaryOperator::BitOr);
        let (op, _, right) = binary_parts(right);
        assert_eq!(op, BinaryOperator::BitXor);
        let (op, _, right) = binary_parts(right);
        assert_eq!(op, BinaryOperator::BitAnd);
        assert_eq!(binary_parts(right).0, BinaryOperator::ShiftLeft);
    }

    #[test]
    fn operator_position_is_recorded() {
        assert_eq!(parse("a  >= b").unwrap().position(), 4);
    }
}
