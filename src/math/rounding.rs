//! Wide-integer division helpers with explicit rounding.
//!
//! Pool formulas multiply reserves before dividing, so every intermediate
//! lives in a [`BigUint`].  The helpers here are the only places pool math
//! divides, and each one takes a [`Rounding`].
//!
//! # Convention
//!
//! **Always round against the trader** (pool-favourable):
//!
//! | Quantity | Direction |
//! |----------|-----------|
//! | Output amount | [`Rounding::RoundDown`] |
//! | Required input | [`Rounding::RoundUp`] |
//! | Minted / redeemed liquidity | [`Rounding::RoundDown`] |
//!
//! # Examples
//!
//! ```
//! use ampswap::math::{div_round, Rounding};
//! use num_bigint::BigUint;
//!
//! let ten = BigUint::from(10u32);
//! let three = BigUint::from(3u32);
//! assert_eq!(div_round(&ten, &three, Rounding::RoundDown), Ok(BigUint::from(3u32)));
//! assert_eq!(div_round(&ten, &three, Rounding::RoundUp), Ok(BigUint::from(4u32)));
//! ```

use num_bigint::{BigInt, BigUint};
use num_integer::Integer;
use num_traits::Zero;
use uniswap_sdk_core::prelude::Rounding;

use crate::error::AmmError;

/// Divides `numerator` by `denominator` in the given direction.
///
/// # Errors
///
/// Returns [`AmmError::DivisionByZero`] if `denominator` is zero.
pub fn div_round(
    numerator: &BigUint,
    denominator: &BigUint,
    rounding: Rounding,
) -> Result<BigUint, AmmError> {
    if denominator.is_zero() {
        return Err(AmmError::DivisionByZero);
    }
    let (q, r) = numerator.div_rem(denominator);
    if r.is_zero() {
        return Ok(q);
    }
    let up = match rounding {
        Rounding::RoundDown => false,
        Rounding::RoundUp => true,
        Rounding::RoundHalfUp => &r * 2u32 >= *denominator,
    };
    Ok(if up { q + 1u32 } else { q })
}

/// Computes `a × b / denominator` without intermediate overflow.
///
/// # Errors
///
/// Returns [`AmmError::DivisionByZero`] if `denominator` is zero.
pub fn mul_div(
    a: &BigUint,
    b: &BigUint,
    denominator: &BigUint,
    rounding: Rounding,
) -> Result<BigUint, AmmError> {
    div_round(&(a * b), denominator, rounding)
}

/// Converts a raw amount to an unsigned integer.
///
/// # Errors
///
/// Returns [`AmmError::Invariant`]`("AMOUNT")` if `value` is negative.
pub fn unsigned(value: &BigInt) -> Result<BigUint, AmmError> {
    value.to_biguint().ok_or(AmmError::Invariant("AMOUNT"))
}

/// Integer square root, rounded down.
#[must_use]
pub fn isqrt(n: &BigUint) -> BigUint {
    n.sqrt()
}
