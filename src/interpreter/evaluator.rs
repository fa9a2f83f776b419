/// Binary operator evaluation.
///
/// Implements arithmetic with the language's division rules, structural
/// equality, ordered comparison, and the short-circuiting logical operators.
pub mod binary;
/// The built-in runtime environment.
///
/// Builds the initial runtime scope: the native printing functions, `range`,
/// and the testing helpers mirroring the analyzer's environment.
pub mod builtin;
/// The evaluator's statement rules, scope threading, and function
/// invocation.
///
/// Declares the `Evaluator` itself, the non-local return signal, and the
/// machinery that saves and restores the current scope around every nested
/// construct.
pub mod core;
/// Object evaluation: literals, property and method access, and the
/// prototype chain walk.
pub mod object;
