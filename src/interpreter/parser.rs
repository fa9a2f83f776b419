/// Precedence-climbing rules for binary expressions.
///
/// Implements the four binary levels of the grammar (logical, comparison,
/// additive, multiplicative), each associating left-to-right.
pub mod binary;
/// The token stream and the public entry points.
///
/// Exposes `parse_source`, `parse_stmt`, and `parse_expr`, which run their
/// start rule against the full token sequence and reject trailing tokens.
pub mod core;
/// Primary and secondary expression rules.
///
/// Covers literals (including escape resolution and arbitrary-precision
/// decoding), groups, object literals, variable and call expressions, and
/// the property/method chain.
pub mod primary;
/// Statement rules.
///
/// Covers `LET`, `DEF`, `IF`, `FOR`, `RETURN` (with its guarded form), and
/// expression-or-assignment statements.
pub mod statement;
