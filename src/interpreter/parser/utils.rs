use crate::{
    ast::Expr,
    interpreter::{
        lexer::Token,
        parser::core::{ParseResult, TokenStream, parse_expression},
    },
};

/// Parses a comma-separated list of items until a closing token.
///
/// This utility is shared by array literals and function argument lists. It
/// repeatedly calls `parse_item` to parse one element, expecting either:
///
/// - a comma, to continue the list, or
/// - the specified closing token, to end it.
///
/// An immediately encountered closing token produces an empty list. A comma
/// directly before the closing token is an error.
///
/// Grammar (simplified): `list := (item ("," item)*)?`
///
/// # Parameters
/// - `tokens`: Token stream positioned after the opening token.
/// - `parse_item`: Function used to parse each list element.
/// - `closing`: The token that terminates the list (e.g., `]` or `)`).
///
/// # Returns
/// A vector of parsed items.
///
/// # Errors
/// Returns a `ParseError` if:
/// - an item fails to parse,
/// - an unexpected token is encountered,
/// - the stream ends before the closing token.
pub(in crate::interpreter::parser) fn parse_comma_separated<T>(
    tokens: &mut TokenStream<'_>,
    parse_item: impl Fn(&mut TokenStream<'_>) -> ParseResult<T>,
    closing: &Token)
    -> ParseResult<Vec<T>> {
    let mut items = Vec::new();
    if tokens.next_is(closing)? {
        tokens.advance()?;

        return Ok(items);
    }
    loop {
        items.push(parse_item(tokens)?);
        match tokens.peek()? {
            Some((Token::Comma, _)) => {
                tokens.advance()?;
            },
            Some((tok, _)) if tok == closing => {
                tokens.advance()?;

                return Ok(items);
            },
            _ => return Err(tokens.unexpected(None)),
        }
    }
}

/// Parses the members of an object literal after `{`.
///
/// Keys are arbitrary expressions; whether they evaluate to strings and are
/// unique is checked during evaluation.
///
/// Grammar (simplified): `members := (expression ":" expression ("," expression
/// ":" expression)*)?`
pub(in crate::interpreter::parser) fn parse_object_members(tokens: &mut TokenStream<'_>)
                                                           -> ParseResult<Vec<(Expr, Expr)>> {
    parse_comma_separated(tokens,
                          |tokens| {
                              let key = parse_expression(tokens)?;
                              tokens.expect(&Token::Colon)?;
                              let value = parse_expression(tokens)?;
                              Ok((key, value))
                          },
                          &Token::RBrace)
}

#[cfg(test)]
mod tests {
    use crate::{ast::Expr, interpreter::parser::core::parse};

    #[test]
    fn empty_containers() {
        assert!(matches!(parse("[]").unwrap(), Expr::ArrayLiteral { ref elements, .. } if elements.is_empty()));
        assert!(matches!(parse("{}").unwrap(), Expr::ObjectLiteral { ref members, .. } if members.is_empty()));
        assert!(matches!(parse("f()").unwrap(), Expr::FunctionCall { ref arguments, .. } if arguments.is_empty()));
    }

    #[test]
    fn object_members_keep_source_order() {
        let Expr::ObjectLiteral { members, .. } = parse(r#"{"b": 1, "a": 2, k: 3}"#).unwrap() else {
            panic!("expected object literal");
        };
        assert_eq!(members.len(), 3);
        assert!(matches!(members[2].0, Expr::Variable { ref name, .. } if name == "k"));
    }
}
