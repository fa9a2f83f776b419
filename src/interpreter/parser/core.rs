use crate::{
    ast::{Expr, Source, Stmt},
    error::ParseError,
    interpreter::{
        lexer::{Token, TokenKind},
        parser::{binary::parse_expression, statement::parse_statement},
    },
};

/// Result type used by every parsing rule.
pub type ParseResult<T> = Result<T, ParseError>;

/// A cursor over the token sequence.
///
/// Rules look ahead with `peek_*`, consume with `match_*` or `expect_*`, and
/// read back the token just consumed with [`TokenStream::previous`]. A token
/// can be addressed by its kind or by its exact literal; keywords are
/// ordinary identifier tokens matched by literal.
pub struct TokenStream<'a> {
    tokens: &'a [Token],
    index:  usize,
}

impl<'a> TokenStream<'a> {
    pub(crate) const fn new(tokens: &'a [Token]) -> Self {
        Self { tokens, index: 0 }
    }

    /// Returns true if a token exists at the current position plus `offset`.
    pub fn has(&self, offset: usize) -> bool {
        self.index + offset < self.tokens.len()
    }

    /// Returns true if the next token's literal equals `literal`.
    pub fn peek_literal(&self, literal: &str) -> bool {
        self.tokens.get(self.index).is_some_and(|token| token.literal == literal)
    }

    /// Returns true if the next token has kind `kind`.
    pub fn peek_kind(&self, kind: TokenKind) -> bool {
        self.tokens.get(self.index).is_some_and(|token| token.kind == kind)
    }

    /// Consumes the next token if its literal equals `literal`.
    pub fn match_literal(&mut self, literal: &str) -> bool {
        let matched = self.peek_literal(literal);
        if matched {
            self.index += 1;
        }
        matched
    }

    /// Consumes the next token if it has kind `kind`.
    pub fn match_kind(&mut self, kind: TokenKind) -> bool {
        let matched = self.peek_kind(kind);
        if matched {
            self.index += 1;
        }
        matched
    }

    /// Returns the most recently consumed token.
    ///
    /// Only meaningful directly after a successful `match_*` or `expect_*`;
    /// rules use it to read the literal they just consumed.
    pub fn previous(&self) -> &'a Token {
        &self.tokens[self.index - 1]
    }

    /// Consumes the next token, which must have literal `literal`, or fails
    /// describing `expected`.
    pub fn expect_literal(&mut self, literal: &str, expected: &str) -> ParseResult<()> {
        if self.match_literal(literal) {
            Ok(())
        } else {
            Err(self.unexpected(expected))
        }
    }

    /// Consumes the next token, which must be an identifier, and returns its
    /// literal, or fails describing `expected`.
    pub fn expect_identifier(&mut self, expected: &str) -> ParseResult<String> {
        if self.match_kind(TokenKind::Identifier) {
            Ok(self.previous().literal.clone())
        } else {
            Err(self.unexpected(expected))
        }
    }

    /// Builds the failure for an unsatisfied expectation: either the token
    /// at the current position or the end of input.
    pub fn unexpected(&self, expected: &str) -> ParseError {
        match self.tokens.get(self.index) {
            Some(token) => ParseError::UnexpectedToken { expected: expected.to_string(),
                                                         found:    token.literal.clone(), },
            None => ParseError::UnexpectedEndOfInput { expected: expected.to_string() },
        }
    }

    fn ensure_consumed(&self) -> ParseResult<()> {
        match self.tokens.get(self.index) {
            Some(token) => Err(ParseError::UnexpectedTrailingTokens { found:
                                                                          token.literal.clone(), }),
            None => Ok(()),
        }
    }
}

/// Parses a complete program: statements until the end of input.
///
/// # Parameters
/// - `tokens`: The token sequence produced by the lexer.
///
/// # Returns
/// The program AST.
///
/// # Errors
/// Returns a [`ParseError`] if any statement is malformed.
///
/// # Example
/// ```
/// use opal::interpreter::{lexer::lex, parser::core::parse_source};
///
/// let tokens = lex("LET x = 1; log(x);").unwrap();
/// let source = parse_source(&tokens).unwrap();
///
/// assert_eq!(source.statements.len(), 2);
/// ```
pub fn parse_source(tokens: &[Token]) -> ParseResult<Source> {
    let mut stream = TokenStream::new(tokens);
    let mut statements = Vec::new();

    while stream.has(0) {
        statements.push(parse_statement(&mut stream)?);
    }

    Ok(Source { statements })
}

/// Parses a single statement, rejecting trailing tokens.
///
/// # Errors
/// Returns a [`ParseError`] if the statement is malformed or if tokens
/// remain after it.
pub fn parse_stmt(tokens: &[Token]) -> ParseResult<Stmt> {
    let mut stream = TokenStream::new(tokens);
    let statement = parse_statement(&mut stream)?;
    stream.ensure_consumed()?;
    Ok(statement)
}

/// Parses a single expression, rejecting trailing tokens.
///
/// # Errors
/// Returns a [`ParseError`] if the expression is malformed or if tokens
/// remain after it.
pub fn parse_expr(tokens: &[Token]) -> ParseResult<Expr> {
    let mut stream = TokenStream::new(tokens);
    let expression = parse_expression(&mut stream)?;
    stream.ensure_consumed()?;
    Ok(expression)
}
