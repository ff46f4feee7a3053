use crate::{
    ast::{Expr, LiteralValue, UnaryOperator},
    interpreter::{
        lexer::Token,
        parser::{
            core::{ParseResult, TokenStream, parse_expression, unexpected_token},
            utils::{parse_comma_separated, parse_object_members},
        },
    },
};

/// Parses a unary expression.
///
/// Supports prefix operators:
/// - `-`  (numeric negation)
/// - `!`  (logical not)
/// - `~`  (bitwise not)
///
/// Unary operators are right-associative, so an input like `!-x` is parsed as
/// `!( -x )`.
///
/// If no unary operator is present, the function delegates to
/// [`parse_primary`] and then applies any postfix operators via
/// [`parse_postfix`].
///
/// Grammar:
/// ```text
///     unary := ("-" | "!" | "~") unary
///            | primary postfix*
/// ```
/// # Parameters
/// - `tokens`: Token stream with lookahead.
///
/// # Returns
/// An [`Expr::UnaryOp`] or a primary expression possibly followed by postfixes.
pub(crate) fn parse_unary(tokens: &mut TokenStream<'_>) -> ParseResult<Expr> {
    tokens.descend()?;
    let expr = parse_prefixed(tokens)?;
    tokens.ascend(1);
    Ok(expr)
}

/// Parses an optional prefix operator and its operand.
fn parse_prefixed(tokens: &mut TokenStream<'_>) -> ParseResult<Expr> {
    let prefix = match tokens.peek()? {
        Some((Token::Minus, position)) => Some((UnaryOperator::Negate, *position)),
        Some((Token::Bang, position)) => Some((UnaryOperator::Not, *position)),
        Some((Token::Tilde, position)) => Some((UnaryOperator::BitNot, *position)),
        _ => None,
    };

    if let Some((op, position)) = prefix {
        tokens.advance()?;
        let expr = parse_unary(tokens)?;
        return Ok(Expr::UnaryOp { op,
                                  expr: Box::new(expr),
                                  position });
    }

    let primary = parse_primary(tokens)?;
    parse_postfix(tokens, primary)
}

/// Applies postfix operators to an already parsed expression.
///
/// Handles, in any order and number:
/// - field access: `expr.name`
/// - dynamic access: `expr[key]`
/// - slicing: `expr[from:to]`, where both bounds are optional
///
/// Grammar:
/// ```text
///     postfix := "." IDENT
///              | "[" expression "]"
///              | "[" expression? ":" expression? "]"
/// ```
///
/// # Errors
/// Returns a `ParseError` if a `.` is not followed by a name or a `[` is not
/// properly closed with `]`.
fn parse_postfix(tokens: &mut TokenStream<'_>, mut node: Expr) -> ParseResult<Expr> {
    let mut levels = 0;
    loop {
        let position = match tokens.peek()? {
            Some((Token::Dot | Token::LBracket, position)) => *position,
            _ => break,
        };
        tokens.descend()?;
        levels += 1;

        if tokens.next_is(&Token::Dot)? {
            tokens.advance()?;
            let name = match tokens.peek()? {
                Some((Token::Identifier(name), _)) => name.clone(),
                _ => return Err(tokens.unexpected(Some("IDENT"))),
            };
            tokens.advance()?;
            node = Expr::FieldAccess { target: Box::new(node),
                                       name,
                                       position };
            continue;
        }

        tokens.advance()?;
        node = parse_brackets(tokens, node, position)?;
    }
    tokens.ascend(levels);
    Ok(node)
}

/// Parses the inside of `[...]` after a target expression, producing either
/// an index or a slice.
fn parse_brackets(tokens: &mut TokenStream<'_>,
                  target: Expr,
                  position: usize)
                  -> ParseResult<Expr> {
    let from = if tokens.next_is(&Token::Colon)? {
        None
    } else {
        let index = parse_expression(tokens)?;
        if !tokens.next_is(&Token::Colon)? {
            tokens.expect(&Token::RBracket)?;
            return Ok(Expr::Index { target: Box::new(target),
                                    index: Box::new(index),
                                    position });
        }
        Some(Box::new(index))
    };

    tokens.expect(&Token::Colon)?;
    let to = if tokens.next_is(&Token::RBracket)? {
        None
    } else {
        Some(Box::new(parse_expression(tokens)?))
    };
    tokens.expect(&Token::RBracket)?;

    Ok(Expr::Slice { target: Box::new(target),
                     from,
                     to,
                     position })
}

/// Parses a primary (atomic) expression.
///
/// Primary expressions form the base of the expression grammar and include:
/// - literals (`nil`, booleans, numbers, strings)
/// - identifiers and function calls
/// - parenthesized expressions
/// - array literals (`[ ... ]`)
/// - object literals (`{ key: value, ... }`)
///
/// Grammar (simplified):
/// ```text
///     primary := literal
///              | IDENT
///              | IDENT "(" arguments ")"
///              | "(" expression ")"
///              | "[" elements "]"
///              | "{" members "}"
/// ```
/// # Parameters
/// - `tokens`: Token stream positioned at the start of a primary expression.
///
/// # Returns
/// The parsed primary [`Expr`] or a `ParseError` on failure.
pub(crate) fn parse_primary(tokens: &mut TokenStream<'_>) -> ParseResult<Expr> {
    let Some((token, position)) = tokens.advance()? else {
        return Err(tokens.end_of_input());
    };

    let literal = |value| Ok(Expr::Literal { value, position });

    match token {
        Token::Nil => literal(LiteralValue::Nil),
        Token::Bool(b) => literal(LiteralValue::Bool(b)),
        Token::Integer(n) => literal(LiteralValue::Integer(n)),
        Token::Real(r) => literal(LiteralValue::Real(r)),
        Token::Text(s) => literal(LiteralValue::Text(s)),
        Token::Identifier(name) => parse_identifier_or_function(tokens, name, position),
        Token::LParen => parse_grouping(tokens),
        Token::LBracket => parse_array_literal(tokens, position),
        Token::LBrace => {
            let members = parse_object_members(tokens)?;
            Ok(Expr::ObjectLiteral { members, position })
        },
        other => Err(unexpected_token(&other, position, None)),
    }
}

/// Parses the rest of a parenthesized expression after `(`.
fn parse_grouping(tokens: &mut TokenStream<'_>) -> ParseResult<Expr> {
    let expr = parse_expression(tokens)?;
    tokens.expect(&Token::RParen)?;
    Ok(expr)
}

/// Parses the elements of an array literal after `[`.
///
/// Trailing commas are not allowed: `[1, ]` fails at the `]`.
fn parse_array_literal(tokens: &mut TokenStream<'_>, position: usize) -> ParseResult<Expr> {
    let elements = parse_comma_separated(tokens, parse_expression, &Token::RBracket)?;
    Ok(Expr::ArrayLiteral { elements, position })
}

/// Parses a variable reference, or a function call if the name is followed
/// by `(`.
///
/// Only plain names can be called; there are no first-class functions.
fn parse_identifier_or_function(tokens: &mut TokenStream<'_>,
                                name: String,
                                position: usize)
                                -> ParseResult<Expr> {
    if tokens.next_is(&Token::LParen)? {
        tokens.advance()?;
        let arguments = parse_comma_separated(tokens, parse_expression, &Token::RParen)?;
        return Ok(Expr::FunctionCall { name,
                                       arguments,
                                       position });
    }
    Ok(Expr::Variable { name, position })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interpreter::parser::core::parse;

    fn parse_err(source: &str) -> String {
        parse(source).unwrap_err().to_string()
    }

    #[test]
    fn prefix_operators_nest() {
        let expr = parse("!-~x").unwrap();
        let Expr::UnaryOp { op: UnaryOperator::Not, expr, .. } = expr else {
            panic!("expected logical not");
        };
        let Expr::UnaryOp { op: UnaryOperator::Negate, expr, .. } = *expr else {
            panic!("expected negation");
        };
        assert!(matches!(*expr, Expr::UnaryOp { op: UnaryOperator::BitNot, .. }));
    }

    #[test]
    fn postfix_binds_tighter_than_prefix() {
        let expr = parse("-a.b").unwrap();
        let Expr::UnaryOp { expr, .. } = expr else {
            panic!("expected negation");
        };
        assert!(matches!(*expr, Expr::FieldAccess { ref name, .. } if name == "b"));
    }

    #[test]
    fn slices_with_optional_bounds() {
        for (source, has_from, has_to) in [("s[:]", false, false),
                                           ("s[1:]", true, false),
                                           ("s[:2]", false, true),
                                           ("s[1:2]", true, true)]
        {
            let Expr::Slice { from, to, .. } = parse(source).unwrap() else {
                panic!("expected slice for {source}");
            };
            assert_eq!(from.is_some(), has_from, "{source}");
            assert_eq!(to.is_some(), has_to, "{source}");
        }
    }

    #[test]
    fn call_and_chained_access() {
        let expr = parse(r#"f(1, "a")[0].x"#).unwrap();
        let Expr::FieldAccess { target, .. } = expr else {
            panic!("expected field access");
        };
        let Expr::Index { target, .. } = *target else {
            panic!("expected index");
        };
        assert!(matches!(*target, Expr::FunctionCall { ref arguments, .. } if arguments.len() == 2));
    }

    #[test]
    fn syntax_errors_name_the_offending_token() {
        assert_eq!(parse_err("4.2.0"), "syntax error: unexpected LITERAL_NUMBER");
        assert_eq!(parse_err("obj.0"), "syntax error: unexpected LITERAL_NUMBER");
        assert_eq!(parse_err("obj.[b]"), "syntax error: unexpected '[', expecting IDENT");
        assert_eq!(parse_err("true!"), "syntax error: unexpected '!'");
        assert_eq!(parse_err("[1, ]"), "syntax error: unexpected ']'");
        assert_eq!(parse_err("[, 1]"), "syntax error: unexpected ','");
        assert_eq!(parse_err("["), "syntax error: unexpected $end");
        assert_eq!(parse_err(r#"{"a"}"#), "syntax error: unexpected '}'");
        assert_eq!(parse_err("{:1}"), "syntax error: unexpected ':'");
        assert_eq!(parse_err("func("), "syntax error: unexpected $end");
        assert_eq!(parse_err("func)"), "syntax error: unexpected ')'");
        assert_eq!(parse_err("func((1, 2))"), "syntax error: unexpected ','");
        assert_eq!(parse_err("1 +"), "syntax error: unexpected $end");
        assert_eq!(parse_err(""), "syntax error: unexpected $end");
        assert_eq!(parse_err("a[1:2:3]"), "syntax error: unexpected ':'");
    }

    #[test]
    fn error_positions() {
        assert_eq!(parse("a b").unwrap_err().position(), 3);
        assert_eq!(parse("(1").unwrap_err().position(), 3);
    }
}
