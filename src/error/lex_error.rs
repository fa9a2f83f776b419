#[derive(Debug)]
/// Represents all errors that can occur during lexing.
///
/// Every variant carries the byte offset of the position at which the lexer
/// gave up, pointing into the original source text.
pub enum LexError {
    /// A character literal had an empty or unlexable body.
    InvalidCharacter {
        /// The byte offset of the offending position.
        index: usize,
    },
    /// A character literal was missing its closing quote, or held more than
    /// one character.
    UnterminatedCharacter {
        /// The byte offset of the offending position.
        index: usize,
    },
    /// A backslash escape named an unsupported character or ended the input.
    InvalidEscape {
        /// The byte offset of the offending position.
        index: usize,
    },
    /// A string literal ran into a newline or the end of input before its
    /// closing quote.
    UnterminatedString {
        /// The byte offset of the offending position.
        index: usize,
    },
    /// No token rule matched at this position.
    InvalidToken {
        /// The byte offset of the offending position.
        index: usize,
    },
}

impl std::fmt::Display for LexError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidCharacter { index } => {
                write!(f, "Error at index {index}: Invalid character literal.")
            },
            Self::UnterminatedCharacter { index } => write!(f,
                                                            "Error at index {index}: Character literal is missing its closing quote."),
            Self::InvalidEscape { index } => {
                write!(f, "Error at index {index}: Invalid escape sequence.")
            },
            Self::UnterminatedString { index } => {
                write!(f, "Error at index {index}: Unterminated string literal.")
            },
            Self::InvalidToken { index } => {
                write!(f, "Error at index {index}: No token matches this input.")
            },
        }
    }
}

impl std::error::Error for LexError {}
