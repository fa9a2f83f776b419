use crate::{
    ast::{BinaryOperator, Expr},
    interpreter::parser::{
        core::{ParseResult, TokenStream},
        primary::parse_secondary,
    },
};

/// Parses a full expression.
///
/// This is the entry point for expression parsing. It begins at the
/// lowest-precedence level, logical AND/OR, and recursively descends
/// through the precedence hierarchy. Every binary level associates
/// left-to-right.
///
/// Grammar: `expr := logical`
///
/// # Parameters
/// - `stream`: The token stream positioned at the start of an expression.
///
/// # Returns
/// The parsed expression node.
pub fn parse_expression(stream: &mut TokenStream) -> ParseResult<Expr> {
    parse_logical(stream)
}

/// Grammar: `logical := compare (('AND'|'OR') compare)*`
fn parse_logical(stream: &mut TokenStream) -> ParseResult<Expr> {
    let mut expression = parse_comparison(stream)?;

    loop {
        let operator = if stream.match_literal("AND") {
            BinaryOperator::And
        } else if stream.match_literal("OR") {
            BinaryOperator::Or
        } else {
            break;
        };

        let right = parse_comparison(stream)?;
        expression = Expr::Binary { operator,
                                    left: Box::new(expression),
                                    right: Box::new(right), };
    }

    Ok(expression)
}

/// Grammar: `compare := add (('<'|'<='|'>'|'>='|'=='|'!=') add)*`
fn parse_comparison(stream: &mut TokenStream) -> ParseResult<Expr> {
    let mut expression = parse_additive(stream)?;

    loop {
        let operator = if stream.match_literal("<") {
            BinaryOperator::Less
        } else if stream.match_literal("<=") {
            BinaryOperator::LessEqual
        } else if stream.match_literal(">") {
            BinaryOperator::Greater
        } else if stream.match_literal(">=") {
            BinaryOperator::GreaterEqual
        } else if stream.match_literal("==") {
            BinaryOperator::Equal
        } else if stream.match_literal("!=") {
            BinaryOperator::NotEqual
        } else {
            break;
        };

        let right = parse_additive(stream)?;
        expression = Expr::Binary { operator,
                                    left: Box::new(expression),
                                    right: Box::new(right), };
    }

    Ok(expression)
}

/// Grammar: `add := mul (('+'|'-') mul)*`
fn parse_additive(stream: &mut TokenStream) -> ParseResult<Expr> {
    let mut expression = parse_multiplicative(stream)?;

    loop {
        let operator = if stream.match_literal("+") {
            BinaryOperator::Add
        } else if stream.match_literal("-") {
            BinaryOperator::Sub
        } else {
            break;
        };

        let right = parse_multiplicative(stream)?;
        expression = Expr::Binary { operator,
                                    left: Box::new(expression),
                                    right: Box::new(right), };
    }

    Ok(expression)
}

/// Grammar: `mul := sec (('*'|'/') sec)*`
fn parse_multiplicative(stream: &mut TokenStream) -> ParseResult<Expr> {
    let mut expression = parse_secondary(stream)?;

    loop {
        let operator = if stream.match_literal("*") {
            BinaryOperator::Mul
        } else if stream.match_literal("/") {
            BinaryOperator::Div
        } else {
            break;
        };

        let right = parse_secondary(stream)?;
        expression = Expr::Binary { operator,
                                    left: Box::new(expression),
                                    right: Box::new(right), };
    }

    Ok(expression)
}
