/// Numeric helpers for arbitrary-precision values.
///
/// This module provides decoding of numeric literal spellings into
/// arbitrary-precision values and the two division routines whose rounding
/// behavior the language pins down (floor division for integers, half-even
/// rounding for decimals).
///
/// # Responsibilities
/// - Decode integer spellings, including sign and exponent forms.
/// - Decode decimal spellings via [`bigdecimal`].
/// - Implement floor division and half-even division with explicit
///   division-by-zero errors.
pub mod num;
