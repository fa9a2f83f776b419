/// The analyzer module type-checks the AST and produces the typed IR.
///
/// The analyzer resolves names against a threaded type scope, enforces the
/// subtyping rules on declarations, assignments, calls, and operators, and
/// annotates every expression with its resolved type. Its output is the
/// contract a host-language code generator consumes.
///
/// # Responsibilities
/// - Resolves identifiers and type annotations, rejecting unknown names.
/// - Enforces subtyping on every flow of a value into a typed position.
/// - Produces an IR node for every AST node, each expression carrying a
///   type.
pub mod analyzer;
/// The evaluator module executes AST nodes and computes results.
///
/// The evaluator traverses the AST, evaluates expressions and statements,
/// performs arithmetic and logical operations, manages the runtime scope
/// chain, and implements function invocation with non-local return. It is
/// the core execution engine of the interpreter.
///
/// # Responsibilities
/// - Evaluates AST nodes, performing all supported operations.
/// - Handles closures, objects, and prototype-chain member lookup.
/// - Reports runtime errors such as division by zero or invalid operands.
pub mod evaluator;
/// The lexer module tokenizes source code for further parsing.
///
/// The lexer reads the raw source text and produces a stream of tokens,
/// each carrying its exact source slice. This is the first stage of
/// interpretation.
///
/// # Responsibilities
/// - Converts the input character stream into kind/literal token pairs.
/// - Handles numeric, character, and string literals, identifiers, and
///   operators.
/// - Reports lexical errors with the byte offset of the failure.
pub mod lexer;
/// The parser module builds the abstract syntax tree (AST) from tokens.
///
/// The parser processes the token stream produced by the lexer and
/// constructs an AST via recursive descent, with operator precedence
/// encoded in the grammar rules.
///
/// # Responsibilities
/// - Converts tokens into structured AST nodes (expressions, statements).
/// - Validates the grammar, reporting errors with the offending token.
/// - Decodes literal spellings into semantic values.
pub mod parser;
/// The scope module defines the lexical binding environment.
///
/// A scope is an insertion-ordered name-to-binding map with an optional
/// parent, shared by handle so closures and objects can keep their defining
/// environment alive. Both the analyzer and the evaluator thread one as
/// their current scope.
///
/// # Responsibilities
/// - Resolves names in the current scope or along the parent chain.
/// - Defines new bindings and assigns through to the owning scope.
pub mod scope;
/// The types module defines the analyzed language's type model.
///
/// Declares the built-in primitive types, function types, and object types,
/// together with name lookup and the subtyping relation that governs
/// assignability.
///
/// # Responsibilities
/// - Defines the `Type` sum and its identity rules.
/// - Implements the subtyping relation.
pub mod types;
/// The value module defines the runtime data types for evaluation.
///
/// Declares the runtime value sum: primitives over arbitrary-precision
/// numerics, function values (native or declared), and objects owning their
/// member scope. Provides print and debug renderings and structural
/// equality.
///
/// # Responsibilities
/// - Defines `RuntimeValue` and its payloads.
/// - Implements the printed forms used by `log`, `print`, and
///   concatenation.
pub mod value;
