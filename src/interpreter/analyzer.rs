/// The analyzer's statement rules and scope threading.
///
/// Declares the `Analyzer` itself and implements analysis of statements and
/// declarations, including the `$RETURN` convention that lets `RETURN`
/// statements find their enclosing function's return type.
pub mod core;
/// The built-in type environment.
///
/// Builds the initial type scope: the named primitive types' helper
/// variables, the native function signatures, and the testing helpers.
pub mod environment;
/// The analyzer's expression rules.
///
/// Implements type checking and IR construction for every expression form,
/// including the binary operator typing rules and object literals.
pub mod expression;
