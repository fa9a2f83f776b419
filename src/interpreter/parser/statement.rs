use crate::{
    ast::{DefDecl, LetDecl, Parameter, Stmt},
    interpreter::{
        lexer::TokenKind,
        parser::{
            binary::parse_expression,
            core::{ParseResult, TokenStream},
        },
    },
};

/// Parses a single statement.
///
/// A statement is one of:
/// - a `LET` declaration,
/// - a `DEF` declaration,
/// - an `IF` statement,
/// - a `FOR` loop,
/// - a `RETURN` statement,
/// - an expression or assignment terminated by `;`.
///
/// Dispatch is on the leading keyword; anything else parses as an
/// expression-or-assignment statement.
///
/// # Parameters
/// - `stream`: Token stream positioned at the start of a statement.
///
/// # Returns
/// A parsed [`Stmt`] node.
pub fn parse_statement(stream: &mut TokenStream) -> ParseResult<Stmt> {
    if stream.peek_literal("LET") {
        return Ok(Stmt::Let(parse_let(stream)?));
    }
    if stream.peek_literal("DEF") {
        return Ok(Stmt::Def(parse_def(stream)?));
    }
    if stream.peek_literal("IF") {
        return parse_if(stream);
    }
    if stream.peek_literal("FOR") {
        return parse_for(stream);
    }
    if stream.peek_literal("RETURN") {
        return parse_return(stream);
    }
    parse_expression_or_assignment(stream)
}

/// Parses a `LET` declaration and returns the bare declaration, so object
/// literals can reuse the rule for fields.
///
/// Grammar: `let := 'LET' IDENT (':' IDENT)? ('=' expr)? ';'`
pub(in crate::interpreter::parser) fn parse_let(stream: &mut TokenStream) -> ParseResult<LetDecl> {
    stream.match_literal("LET");

    let name = stream.expect_identifier("an identifier after 'LET'")?;

    let type_name = if stream.match_literal(":") {
        Some(stream.expect_identifier("a type name after ':'")?)
    } else {
        None
    };

    let value = if stream.match_literal("=") {
        Some(parse_expression(stream)?)
    } else {
        None
    };

    stream.expect_literal(";", "';' at the end of the LET statement")?;

    Ok(LetDecl { name, type_name, value })
}

/// Parses a `DEF` declaration and returns the bare declaration, so object
/// literals can reuse the rule for methods.
///
/// Grammar: `def := 'DEF' IDENT '(' params? ')' (':' IDENT)? 'DO' stmt* 'END'`
pub(in crate::interpreter::parser) fn parse_def(stream: &mut TokenStream) -> ParseResult<DefDecl> {
    stream.match_literal("DEF");

    let name = stream.expect_identifier("an identifier after 'DEF'")?;
    stream.expect_literal("(", "'(' after the function name")?;

    let mut parameters = Vec::new();
    if stream.match_kind(TokenKind::Identifier) {
        parameters.push(parse_parameter_tail(stream)?);
        while stream.match_literal(",") {
            if !stream.match_kind(TokenKind::Identifier) {
                return Err(stream.unexpected("a parameter name after ','"));
            }
            parameters.push(parse_parameter_tail(stream)?);
        }
    }

    stream.expect_literal(")", "')' after the parameter list")?;

    let return_type = if stream.match_literal(":") {
        Some(stream.expect_identifier("a return type after ':'")?)
    } else {
        None
    };

    stream.expect_literal("DO", "'DO' before the function body")?;

    let mut body = Vec::new();
    while stream.has(0) && !stream.peek_literal("END") {
        body.push(parse_statement(stream)?);
    }

    stream.expect_literal("END", "'END' to close the function body")?;

    Ok(DefDecl { name,
                 parameters,
                 return_type,
                 body })
}

/// Finishes one parameter whose name was just consumed: reads the optional
/// `: Type` annotation.
fn parse_parameter_tail(stream: &mut TokenStream) -> ParseResult<Parameter> {
    let name = stream.previous().literal.clone();
    let type_name = if stream.match_literal(":") {
        Some(stream.expect_identifier("a type name after ':'")?)
    } else {
        None
    };
    Ok(Parameter { name, type_name })
}

/// Parses an `IF` statement with its optional `ELSE` body.
///
/// Grammar: `if := 'IF' expr 'DO' stmt* ('ELSE' stmt*)? 'END'`
fn parse_if(stream: &mut TokenStream) -> ParseResult<Stmt> {
    stream.match_literal("IF");

    let condition = parse_expression(stream)?;
    stream.expect_literal("DO", "'DO' after the condition")?;

    let mut then_body = Vec::new();
    while stream.has(0) && !stream.peek_literal("ELSE") && !stream.peek_literal("END") {
        then_body.push(parse_statement(stream)?);
    }

    let mut else_body = Vec::new();
    if stream.match_literal("ELSE") {
        while stream.has(0) && !stream.peek_literal("END") {
            else_body.push(parse_statement(stream)?);
        }
    }

    stream.expect_literal("END", "'END' to close the IF statement")?;

    Ok(Stmt::If { condition,
                  then_body,
                  else_body })
}

/// Parses a `FOR` loop.
///
/// Grammar: `for := 'FOR' IDENT 'IN' expr 'DO' stmt* 'END'`
fn parse_for(stream: &mut TokenStream) -> ParseResult<Stmt> {
    stream.match_literal("FOR");

    let name = stream.expect_identifier("a loop variable after 'FOR'")?;
    stream.expect_literal("IN", "'IN' after the loop variable")?;

    let iterable = parse_expression(stream)?;
    stream.expect_literal("DO", "'DO' after the loop expression")?;

    let mut body = Vec::new();
    while stream.has(0) && !stream.peek_literal("END") {
        body.push(parse_statement(stream)?);
    }

    stream.expect_literal("END", "'END' to close the FOR statement")?;

    Ok(Stmt::For { name, iterable, body })
}

/// Parses a `RETURN` statement, desugaring the guarded form.
///
/// Grammar: `return := 'RETURN' expr? ('IF' expr)? ';'`
///
/// `RETURN expr IF cond;` becomes an `If` holding the plain return in its
/// then-body, so later stages never see the guarded shape.
fn parse_return(stream: &mut TokenStream) -> ParseResult<Stmt> {
    stream.match_literal("RETURN");

    let value = if stream.peek_literal("IF") || stream.peek_literal(";") {
        None
    } else {
        Some(parse_expression(stream)?)
    };

    let condition = if stream.match_literal("IF") {
        Some(parse_expression(stream)?)
    } else {
        None
    };

    stream.expect_literal(";", "';' at the end of the RETURN statement")?;

    match condition {
        None => Ok(Stmt::Return { value }),
        Some(condition) => Ok(Stmt::If { condition,
                                         then_body: vec![Stmt::Return { value }],
                                         else_body: Vec::new(), }),
    }
}

/// Parses an expression statement or, if an `=` follows the expression, an
/// assignment. Whether the target is assignable is not this rule's concern.
///
/// Grammar: `exprOrAssign := expr ('=' expr)? ';'`
fn parse_expression_or_assignment(stream: &mut TokenStream) -> ParseResult<Stmt> {
    let expression = parse_expression(stream)?;

    if stream.match_literal("=") {
        let value = parse_expression(stream)?;
        stream.expect_literal(";", "';' at the end of the assignment")?;
        return Ok(Stmt::Assignment { target: expression,
                                     value });
    }

    stream.expect_literal(";", "';' at the end of the expression statement")?;
    Ok(Stmt::Expression(expression))
}
