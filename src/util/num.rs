use std::str::FromStr;

use bigdecimal::{BigDecimal, RoundingMode};
use num_bigint::BigInt;
use num_traits::{One, Signed, Zero};

/// Decodes an integer literal spelling into an arbitrary-precision integer.
///
/// The spelling may carry a leading sign and a lowercase `e` exponent with an
/// optional sign, exactly as produced by the lexer. Exponent forms are scaled
/// out, so `10e5` decodes to `1000000`.
///
/// # Parameters
/// - `literal`: The exact source spelling of the literal.
/// - `error`: The error to return if the spelling does not denote an integer.
///
/// # Returns
/// - `Ok(BigInt)`: The decoded value.
/// - `Err(error)`: If the spelling is malformed or the exponent is negative.
///
/// # Example
/// ```
/// use num_bigint::BigInt;
/// use opal::util::num::parse_integer_literal;
///
/// assert_eq!(parse_integer_literal("-0", "bad").unwrap(), BigInt::from(0));
/// assert_eq!(parse_integer_literal("10e5", "bad").unwrap(), BigInt::from(1_000_000));
/// assert!(parse_integer_literal("10e-5", "bad").is_err());
/// ```
pub fn parse_integer_literal<E>(literal: &str, error: E) -> Result<BigInt, E> {
    integer_from_spelling(literal).ok_or(error)
}

fn integer_from_spelling(literal: &str) -> Option<BigInt> {
    let (mantissa, exponent) = match literal.split_once('e') {
        Some((mantissa, exponent)) => (mantissa, Some(exponent)),
        None => (literal, None),
    };

    let mantissa = BigInt::from_str(mantissa).ok()?;

    match exponent {
        None => Some(mantissa),
        Some(exponent) => {
            let exponent = exponent.strip_prefix('+').unwrap_or(exponent);
            let exponent: u32 = exponent.parse().ok()?;
            Some(mantissa * BigInt::from(10).pow(exponent))
        },
    }
}

/// Decodes a decimal literal spelling into an arbitrary-precision decimal.
///
/// Handles sign, fractional digits, and the lowercase `e` exponent form, so
/// `3.14e-2` decodes to `0.0314`.
///
/// # Parameters
/// - `literal`: The exact source spelling of the literal.
/// - `error`: The error to return if the spelling is malformed.
///
/// # Returns
/// - `Ok(BigDecimal)`: The decoded value.
/// - `Err(error)`: If the spelling does not denote a decimal.
pub fn parse_decimal_literal<E>(literal: &str, error: E) -> Result<BigDecimal, E> {
    BigDecimal::from_str(literal).map_err(|_| error)
}

/// Divides two arbitrary-precision integers, rounding toward negative
/// infinity.
///
/// The quotient is adjusted downward when the operands have opposite signs
/// and the remainder is nonzero, so `-7 / 2` yields `-4`.
///
/// # Parameters
/// - `dividend`: The value being divided.
/// - `divisor`: The value to divide by.
/// - `error`: The error to return when the divisor is zero.
///
/// # Returns
/// - `Ok(BigInt)`: The floored quotient.
/// - `Err(error)`: If `divisor` is zero.
///
/// # Example
/// ```
/// use num_bigint::BigInt;
/// use opal::util::num::floor_div;
///
/// let quotient = floor_div(&BigInt::from(-7), &BigInt::from(2), "zero").unwrap();
/// assert_eq!(quotient, BigInt::from(-4));
/// ```
pub fn floor_div<E>(dividend: &BigInt, divisor: &BigInt, error: E) -> Result<BigInt, E> {
    if divisor.is_zero() {
        return Err(error);
    }

    let mut quotient = dividend / divisor;
    let remainder = dividend % divisor;

    if !remainder.is_zero() && (dividend.is_negative() != divisor.is_negative()) {
        quotient -= BigInt::one();
    }

    Ok(quotient)
}

/// Divides two arbitrary-precision decimals, rounding half-to-even at the
/// dividend's scale.
///
/// The result keeps as many fractional digits as the dividend carried, with
/// ties broken toward the even digit, so `1.0 / 3.0` yields `0.3`.
///
/// # Parameters
/// - `dividend`: The value being divided.
/// - `divisor`: The value to divide by.
/// - `error`: The error to return when the divisor is zero.
///
/// # Returns
/// - `Ok(BigDecimal)`: The rounded quotient.
/// - `Err(error)`: If `divisor` is zero.
pub fn div_half_even<E>(dividend: &BigDecimal,
                        divisor: &BigDecimal,
                        error: E)
                        -> Result<BigDecimal, E> {
    if divisor.is_zero() {
        return Err(error);
    }

    let scale = dividend.as_bigint_and_exponent().1;
    let quotient = dividend / divisor;

    Ok(quotient.with_scale_round(scale, RoundingMode::HalfEven))
}
