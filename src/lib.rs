//! # opal
//!
//! opal is an interpreter for a small imperative object language, written in
//! Rust. Source text flows through a four-stage pipeline: a lexer, a
//! recursive-descent parser, a semantic analyzer producing a typed IR, and a
//! tree-walk evaluator. The analyzer and the evaluator both work from the
//! AST independently, so programs can be executed without being analyzed
//! and vice versa.

#![warn(
    clippy::redundant_clone,
    clippy::needless_pass_by_value,
    clippy::similar_names,
    clippy::large_enum_variant,
    clippy::string_lit_as_bytes,
    clippy::match_same_arms,
    clippy::cargo,
    clippy::nursery,
    clippy::perf,
    clippy::style,
    clippy::suspicious,
    clippy::correctness,
    clippy::complexity,
    clippy::pedantic,
)]
#![allow(clippy::missing_errors_doc)]

use crate::{
    error::Error,
    interpreter::{
        analyzer::{core::Analyzer, environment},
        evaluator::{builtin, core::Evaluator},
        lexer::Token,
        parser::core::parse_source,
        value::RuntimeValue,
    },
};

/// Defines the structure of parsed code.
///
/// This module declares the statement and expression enums that represent
/// the syntactic structure of source code as a tree. The AST is built by the
/// parser and traversed independently by the analyzer and the evaluator.
///
/// # Responsibilities
/// - Defines expression and statement types for all language constructs.
/// - Carries decoded literal values at arbitrary precision.
pub mod ast;
/// Provides unified error types for every pipeline stage.
///
/// This module defines all errors that can be raised during lexing, parsing,
/// analysis, or evaluation, plus the [`Error`] sum the driver-facing entry
/// points return.
///
/// # Responsibilities
/// - Defines error enums for all failure modes, one module per stage.
/// - Attaches the offending position, token, or name to each failure.
/// - Supports integration with standard error handling traits.
pub mod error;
/// Orchestrates the entire process of code execution.
///
/// This module ties together lexing, parsing, analysis, evaluation, the
/// scope model, the type model, and the runtime value representations. It
/// contains every pipeline stage as a submodule.
///
/// # Responsibilities
/// - Coordinates all core components: lexer, parser, analyzer, evaluator.
/// - Defines the shared scope and environment model.
/// - Manages the flow of data and errors between phases.
pub mod interpreter;
/// Defines the typed intermediate representation.
///
/// The IR mirrors the AST structurally, with every expression annotated
/// with its resolved type and assignments split into their legal target
/// forms. It is the contract consumed by host-language code generators.
///
/// # Responsibilities
/// - Defines typed statement and expression nodes.
/// - Exposes each expression's type uniformly.
pub mod ir;
/// General utilities for arbitrary-precision numerics.
///
/// This module provides literal decoding and the division helpers used by
/// the parser and evaluator.
///
/// # Responsibilities
/// - Decode integer and decimal literal spellings.
/// - Implement floor and half-even division.
pub mod util;

/// Tokenizes a source string.
///
/// # Errors
/// Returns an [`Error`] wrapping the lex failure, with the byte offset of
/// the offending position.
///
/// # Example
/// ```
/// let tokens = opal::lex("LET x = 1;").unwrap();
/// assert_eq!(tokens.len(), 5);
/// ```
pub fn lex(source: &str) -> Result<Vec<Token>, Error> {
    Ok(interpreter::lexer::lex(source)?)
}

/// Parses a source string into a program AST.
///
/// # Errors
/// Returns an [`Error`] wrapping the first lex or parse failure.
///
/// # Example
/// ```
/// let source = opal::parse("LET x = 1; log(x);").unwrap();
/// assert_eq!(source.statements.len(), 2);
/// ```
pub fn parse(source: &str) -> Result<ast::Source, Error> {
    let tokens = interpreter::lexer::lex(source)?;
    Ok(parse_source(&tokens)?)
}

/// Parses and analyzes a source string against the built-in environment,
/// producing the typed IR.
///
/// # Errors
/// Returns an [`Error`] wrapping the first lex, parse, or analyze failure.
///
/// # Example
/// ```
/// assert!(opal::analyze("LET x: Integer = 1;").is_ok());
/// assert!(opal::analyze("LET x: Integer = \"s\";").is_err());
/// ```
pub fn analyze(source: &str) -> Result<ir::Source, Error> {
    let source = parse(source)?;
    let mut analyzer = Analyzer::new(environment::type_scope());
    Ok(analyzer.analyze(&source)?)
}

/// Parses and evaluates a source string against the built-in environment,
/// returning the last statement's value.
///
/// The evaluator runs directly on the AST; no analysis pass is involved.
///
/// # Errors
/// Returns an [`Error`] wrapping the first lex, parse, or evaluate failure.
///
/// # Example
/// ```
/// let value = opal::evaluate("DEF double(x) DO RETURN x + x; END double(21);").unwrap();
/// assert_eq!(value.print(), "42");
/// ```
pub fn evaluate(source: &str) -> Result<RuntimeValue, Error> {
    let source = parse(source)?;
    let mut evaluator = Evaluator::new(builtin::runtime_scope());
    Ok(evaluator.evaluate(&source)?)
}
