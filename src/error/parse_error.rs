#[derive(Debug)]
/// Represents all errors that can occur during parsing.
///
/// Variants that point at a token carry the exact source literal of the token
/// the parser was looking at when it failed.
pub enum ParseError {
    /// Found an unexpected token while a specific construct was required.
    UnexpectedToken {
        /// What the parser expected at this position.
        expected: String,
        /// The literal of the token actually found.
        found:    String,
    },
    /// Reached the end of input while a construct was still open.
    UnexpectedEndOfInput {
        /// What the parser expected at this position.
        expected: String,
    },
    /// Found extra tokens after the requested start rule was complete.
    UnexpectedTrailingTokens {
        /// The literal of the first trailing token.
        found: String,
    },
    /// A field declaration appeared after a method inside an object literal.
    FieldAfterMethod {
        /// The name of the misplaced field.
        name: String,
    },
    /// A literal token could not be decoded into a value.
    InvalidLiteral {
        /// The exact source spelling of the literal.
        literal: String,
    },
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnexpectedToken { expected, found } => {
                write!(f, "Parse error: Expected {expected}, found '{found}'.")
            },
            Self::UnexpectedEndOfInput { expected } => {
                write!(f, "Parse error: Expected {expected}, but the input ended.")
            },
            Self::UnexpectedTrailingTokens { found } => write!(f,
                                                               "Parse error: Extra tokens after the end of the input: '{found}'."),
            Self::FieldAfterMethod { name } => write!(f,
                                                      "Parse error: Field '{name}' appears after a method; fields must come first."),
            Self::InvalidLiteral { literal } => {
                write!(f, "Parse error: Literal '{literal}' cannot be decoded.")
            },
        }
    }
}

impl std::error::Error for ParseError {}
