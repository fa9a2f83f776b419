/// Analysis errors.
///
/// Defines all error types that can occur while type-checking the AST and
/// lowering it to the typed IR: unknown names, duplicate definitions, and
/// every form of type mismatch the analyzer rejects.
pub mod analyze_error;
/// Evaluation errors.
///
/// Contains all error types that can be raised while executing a program:
/// wrong runtime types, unknown names, division by zero, misuse of `this`,
/// and malformed prototype chains.
pub mod evaluate_error;
/// Lexing errors.
///
/// Defines the error types produced while turning source text into tokens.
/// Each carries the byte offset of the failing position.
pub mod lex_error;
/// Parsing errors.
///
/// Defines all error types that can occur while building the AST from the
/// token sequence: missing or unexpected tokens, malformed literals, and
/// ordering violations inside object literals.
pub mod parse_error;

pub use analyze_error::AnalyzeError;
pub use evaluate_error::EvaluateError;
pub use lex_error::LexError;
pub use parse_error::ParseError;

#[derive(Debug)]
/// A failure from any stage of the pipeline.
///
/// The driver-facing entry points return this sum so a caller can report a
/// failure without caring which stage produced it, while still being able to
/// match on the stage when it matters.
pub enum Error {
    /// The lexer rejected the source text.
    Lex(LexError),
    /// The parser rejected the token sequence.
    Parse(ParseError),
    /// The analyzer rejected the AST.
    Analyze(AnalyzeError),
    /// The evaluator failed while executing the AST.
    Evaluate(EvaluateError),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Lex(error) => write!(f, "{error}"),
            Self::Parse(error) => write!(f, "{error}"),
            Self::Analyze(error) => write!(f, "{error}"),
            Self::Evaluate(error) => write!(f, "{error}"),
        }
    }
}

impl std::error::Error for Error {}

impl From<LexError> for Error {
    fn from(error: LexError) -> Self {
        Self::Lex(error)
    }
}

impl From<ParseError> for Error {
    fn from(error: ParseError) -> Self {
        Self::Parse(error)
    }
}

impl From<AnalyzeError> for Error {
    fn from(error: AnalyzeError) -> Self {
        Self::Analyze(error)
    }
}

impl From<EvaluateError> for Error {
    fn from(error: EvaluateError) -> Self {
        Self::Evaluate(error)
    }
}
