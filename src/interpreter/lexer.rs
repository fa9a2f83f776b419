use logos::Logos;

use crate::error::LexError;

/// The kind of a lexical token.
///
/// Keywords are not distinguished here: `LET` is an ordinary identifier
/// token, and the parser treats the reserved words specially by matching on
/// literals. Whitespace (`[ \b\n\r\t]`) and `//` line comments are skipped
/// between tokens.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(skip r"[ \x08\n\r\t]+")]
#[logos(skip r"//[^\n\r]*")]
pub enum TokenKind {
    /// Identifier tokens: a letter or underscore, then letters, digits,
    /// underscores, or hyphens.
    #[regex(r"[A-Za-z_][A-Za-z0-9_-]*")]
    Identifier,
    /// Integer literal tokens such as `42`, `-0`, or `10e5`. A sign is part
    /// of the number only when a digit follows it directly.
    #[regex(r"[+-]?[0-9]+(e[+-]?[0-9]+)?")]
    Integer,
    /// Decimal literal tokens such as `3.14` or `1.0e-2`. The decimal point
    /// must sit between digits; `1.` is an integer followed by an operator.
    #[regex(r"[+-]?[0-9]+\.[0-9]+(e[+-]?[0-9]+)?")]
    Decimal,
    /// Character literal tokens: one plain character or one escape between
    /// single quotes.
    #[regex(r#"'([^'\n\r\\]|\\[bnrt'"\\])'"#)]
    Character,
    /// String literal tokens: plain characters and escapes between double
    /// quotes, with no raw newlines.
    #[regex(r#""([^"\n\r\\]|\\[bnrt'"\\])*""#)]
    String,
    /// Operator tokens: `< > ! =` with an optional trailing `=`, or any
    /// single character that no other rule claims.
    #[regex(r"[<>!=]=?", priority = 3)]
    #[regex(r#"[^A-Za-z0-9_'" \x08\n\r\t]"#)]
    Operator,
}

/// A lexical token: its kind paired with the exact source slice it covers.
///
/// The literal preserves spelling precisely, including signs, exponents,
/// surrounding quotes, and unresolved escape sequences; downstream stages
/// decode it semantically.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// The token kind.
    pub kind:    TokenKind,
    /// The exact source text of the token.
    pub literal: String,
}

/// Tokenizes an entire source string.
///
/// # Parameters
/// - `source`: The source text to tokenize.
///
/// # Returns
/// The ordered token sequence.
///
/// # Errors
/// Returns a [`LexError`] carrying the byte offset of the first position at
/// which no token rule matches.
///
/// # Example
/// ```
/// use opal::interpreter::lexer::{TokenKind, lex};
///
/// let tokens = lex("LET x = -5;").unwrap();
/// let kinds: Vec<_> = tokens.iter().map(|token| token.kind).collect();
///
/// assert_eq!(kinds,
///            vec![TokenKind::Identifier,
///                 TokenKind::Identifier,
///                 TokenKind::Operator,
///                 TokenKind::Integer,
///                 TokenKind::Operator]);
/// ```
pub fn lex(source: &str) -> Result<Vec<Token>, LexError> {
    let mut lexer = TokenKind::lexer(source);
    let mut tokens = Vec::new();

    while let Some(kind) = lexer.next() {
        match kind {
            Ok(kind) => tokens.push(Token { kind,
                                            literal: lexer.slice().to_string(), }),
            Err(()) => return Err(classify_failure(source, lexer.span().start)),
        }
    }

    Ok(tokens)
}

/// Examines the source at a position the token rules rejected and decides
/// which failure to report. Only quote-delimited literals can fail to match;
/// everything else falls through to the single-character operator rule.
fn classify_failure(source: &str, index: usize) -> LexError {
    let rest = &source[index..];
    let mut chars = rest.char_indices().map(|(offset, c)| (index + offset, c));

    match chars.next() {
        Some((_, '\'')) => classify_character_failure(&mut chars, index),
        Some((_, '"')) => classify_string_failure(&mut chars, index),
        _ => LexError::InvalidToken { index },
    }
}

fn classify_character_failure(chars: &mut impl Iterator<Item = (usize, char)>,
                              start: usize)
                              -> LexError {
    match chars.next() {
        None | Some((_, '\'' | '\n' | '\r')) => LexError::InvalidCharacter { index: start },
        Some((index, '\\')) => match chars.next() {
            Some((_, 'b' | 'n' | 'r' | 't' | '\'' | '"' | '\\')) => match chars.next() {
                Some((_, '\'')) => LexError::InvalidCharacter { index: start },
                _ => LexError::UnterminatedCharacter { index: start },
            },
            _ => LexError::InvalidEscape { index },
        },
        Some(_) => match chars.next() {
            // A well-formed body would have matched, so the close quote is
            // either missing entirely or preceded by extra characters.
            Some((_, '\'')) => LexError::InvalidCharacter { index: start },
            _ => LexError::UnterminatedCharacter { index: start },
        },
    }
}

fn classify_string_failure(chars: &mut impl Iterator<Item = (usize, char)>,
                           start: usize)
                           -> LexError {
    loop {
        match chars.next() {
            None | Some((_, '\n' | '\r')) => return LexError::UnterminatedString { index: start },
            Some((_, '"')) => return LexError::UnterminatedString { index: start },
            Some((index, '\\')) => match chars.next() {
                Some((_, 'b' | 'n' | 'r' | 't' | '\'' | '"' | '\\')) => {},
                _ => return LexError::InvalidEscape { index },
            },
            Some(_) => {},
        }
    }
}
