use crate::{
    ast::{Expr, Literal, ObjectLiteral},
    error::ParseError,
    interpreter::{
        lexer::TokenKind,
        parser::{
            binary::parse_expression,
            core::{ParseResult, TokenStream},
            statement::{parse_def, parse_let},
        },
    },
    util::num::{parse_decimal_literal, parse_integer_literal},
};

/// Parses a secondary expression: a primary followed by any chain of
/// property accesses and method calls.
///
/// Grammar: `sec := primary ('.' IDENT ('(' args? ')')?)*`
pub fn parse_secondary(stream: &mut TokenStream) -> ParseResult<Expr> {
    let mut expression = parse_primary(stream)?;

    while stream.match_literal(".") {
        let name = stream.expect_identifier("a member name after '.'")?;

        if stream.match_literal("(") {
            let arguments = parse_arguments(stream)?;
            expression = Expr::Method { receiver: Box::new(expression),
                                        name,
                                        arguments };
        } else {
            expression = Expr::Property { receiver: Box::new(expression),
                                          name };
        }
    }

    Ok(expression)
}

/// Parses a primary expression: a literal, a group, an object literal, or a
/// variable/function expression.
///
/// Grammar: `primary := literal | group | object | var_or_call`
fn parse_primary(stream: &mut TokenStream) -> ParseResult<Expr> {
    if stream.peek_literal("NIL")
       || stream.peek_literal("TRUE")
       || stream.peek_literal("FALSE")
       || stream.peek_kind(TokenKind::Integer)
       || stream.peek_kind(TokenKind::Decimal)
       || stream.peek_kind(TokenKind::Character)
       || stream.peek_kind(TokenKind::String)
    {
        return parse_literal(stream);
    }
    if stream.peek_literal("(") {
        return parse_group(stream);
    }
    if stream.peek_literal("OBJECT") {
        return parse_object(stream);
    }
    if stream.peek_kind(TokenKind::Identifier) {
        return parse_variable_or_function(stream);
    }
    Err(stream.unexpected("a primary expression"))
}

/// Parses a literal expression, decoding the token's source spelling into a
/// semantic value.
///
/// Integers and decimals become arbitrary-precision values. Character and
/// string literals lose their surrounding quotes and have their escape
/// sequences resolved; a backslash before an unlisted character is kept as
/// the literal two-character sequence.
fn parse_literal(stream: &mut TokenStream) -> ParseResult<Expr> {
    if stream.match_literal("NIL") {
        return Ok(Expr::Literal(Literal::Nil));
    }
    if stream.match_literal("TRUE") {
        return Ok(Expr::Literal(Literal::Boolean(true)));
    }
    if stream.match_literal("FALSE") {
        return Ok(Expr::Literal(Literal::Boolean(false)));
    }
    if stream.match_kind(TokenKind::Integer) {
        let literal = &stream.previous().literal;
        let value = parse_integer_literal(literal,
                                          ParseError::InvalidLiteral { literal:
                                                                           literal.clone(), })?;
        return Ok(Expr::Literal(Literal::Integer(value)));
    }
    if stream.match_kind(TokenKind::Decimal) {
        let literal = &stream.previous().literal;
        let value = parse_decimal_literal(literal,
                                          ParseError::InvalidLiteral { literal:
                                                                           literal.clone(), })?;
        return Ok(Expr::Literal(Literal::Decimal(value)));
    }
    if stream.match_kind(TokenKind::Character) {
        let literal = &stream.previous().literal;
        return Ok(Expr::Literal(Literal::Character(decode_character(literal))));
    }
    if stream.match_kind(TokenKind::String) {
        let literal = &stream.previous().literal;
        let value = decode_string(literal).ok_or_else(|| {
                                              ParseError::InvalidLiteral { literal:
                                                                               literal.clone(), }
                                          })?;
        return Ok(Expr::Literal(Literal::String(value)));
    }
    Err(stream.unexpected("a literal"))
}

/// Grammar: `group := '(' expr ')'`
fn parse_group(stream: &mut TokenStream) -> ParseResult<Expr> {
    stream.expect_literal("(", "'('")?;
    let inner = parse_expression(stream)?;
    stream.expect_literal(")", "')' to close the group")?;
    Ok(Expr::Group(Box::new(inner)))
}

/// Parses an `OBJECT` literal.
///
/// Grammar: `object := 'OBJECT' IDENT? 'DO' (let)* (def)* 'END'`
///
/// Fields must precede methods; a `LET` after the first `DEF` is a parse
/// error.
fn parse_object(stream: &mut TokenStream) -> ParseResult<Expr> {
    stream.match_literal("OBJECT");

    let mut name = None;
    if !stream.peek_literal("DO") && stream.match_kind(TokenKind::Identifier) {
        name = Some(stream.previous().literal.clone());
    }

    stream.expect_literal("DO", "'DO' after OBJECT")?;

    let mut fields = Vec::new();
    let mut methods = Vec::new();

    while stream.has(0) && !stream.peek_literal("END") {
        if stream.peek_literal("LET") {
            let field = parse_let(stream)?;
            if !methods.is_empty() {
                return Err(ParseError::FieldAfterMethod { name: field.name });
            }
            fields.push(field);
        } else if stream.peek_literal("DEF") {
            methods.push(parse_def(stream)?);
        } else {
            return Err(stream.unexpected("'LET', 'DEF', or 'END' inside OBJECT"));
        }
    }

    stream.expect_literal("END", "'END' to close the OBJECT literal")?;

    Ok(Expr::Object(ObjectLiteral { name, fields, methods }))
}

/// Parses a variable reference or, if a parenthesis follows the name, a
/// function call.
///
/// Grammar: `var_or_call := IDENT ('(' args? ')')?`
fn parse_variable_or_function(stream: &mut TokenStream) -> ParseResult<Expr> {
    let name = stream.expect_identifier("an identifier")?;

    if stream.match_literal("(") {
        let arguments = parse_arguments(stream)?;
        return Ok(Expr::Function { name, arguments });
    }

    Ok(Expr::Variable(name))
}

/// Parses a call's argument list; the opening parenthesis has already been
/// consumed.
///
/// Grammar: `args := expr (',' expr)*`
fn parse_arguments(stream: &mut TokenStream) -> ParseResult<Vec<Expr>> {
    let mut arguments = Vec::new();

    if !stream.peek_literal(")") {
        arguments.push(parse_expression(stream)?);
        while stream.match_literal(",") {
            arguments.push(parse_expression(stream)?);
        }
    }

    stream.expect_literal(")", "')' to close the argument list")?;
    Ok(arguments)
}

/// Decodes a character literal's source spelling, quotes included.
///
/// The lexer guarantees the body is one plain character or one escape from
/// the supported set, so decoding cannot fail.
fn decode_character(literal: &str) -> char {
    let inner = &literal[1..literal.len() - 1];
    match inner {
        "\\b" => '\x08',
        "\\n" => '\n',
        "\\r" => '\r',
        "\\t" => '\t',
        "\\f" => '\x0C',
        "\\'" => '\'',
        "\\\"" => '"',
        "\\\\" => '\\',
        _ => inner.chars().next().unwrap_or('\\'),
    }
}

/// Decodes a string literal's source spelling, quotes included, resolving
/// the supported escapes and preserving unknown ones as written. Returns
/// `None` for a backslash that ends the body unterminated.
fn decode_string(literal: &str) -> Option<String> {
    let inner = &literal[1..literal.len() - 1];
    let mut decoded = String::with_capacity(inner.len());
    let mut chars = inner.chars();

    while let Some(c) = chars.next() {
        if c != '\\' {
            decoded.push(c);
            continue;
        }
        match chars.next()? {
            'b' => decoded.push('\x08'),
            'n' => decoded.push('\n'),
            'r' => decoded.push('\r'),
            't' => decoded.push('\t'),
            'f' => decoded.push('\x0C'),
            '\'' => decoded.push('\''),
            '"' => decoded.push('"'),
            '\\' => decoded.push('\\'),
            other => {
                decoded.push('\\');
                decoded.push(other);
            },
        }
    }

    Some(decoded)
}
