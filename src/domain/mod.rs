//! Domain value types: tokens, currencies, amounts and addresses.
//!
//! Tokens, currencies and amounts are the `uniswap-sdk-core` entities and
//! addresses are `alloy-primitives` addresses.  Raw amounts are unbounded
//! [`BigInt`]s, so pool math never narrows an intermediate value; only the
//! EVM word size (256 bits) bounds what a pool will quote.
//!
//! This module adds the aliases and constructors the rest of the crate
//! shares, and the canonical token ordering reported with this crate's
//! invariant tags.

use num_bigint::{BigInt, BigUint};
use uniswap_sdk_core::prelude::*;

pub use alloy_primitives::Address;
pub use uniswap_sdk_core::prelude::{
    BaseCurrency, Currency, CurrencyAmount, Ether, Token, TradeType,
};

use crate::error::AmmError;

/// An amount of an ERC-20 token; pools only ever hold these.
pub type TokenAmount = CurrencyAmount<Token>;

/// Largest decimal precision accepted from a chain-data provider.
pub const MAX_DECIMALS: u8 = 18;

/// Widest raw amount the router contract can carry.
pub const MAX_AMOUNT_BITS: u64 = 256;

/// An ERC-20 token with no symbol, name or transfer fees.
///
/// # Examples
///
/// ```
/// use ampswap::domain::{erc20, Address, BaseCurrency};
/// use ampswap::prelude::BaseCurrencyCore;
///
/// let dai = erc20(1, Address::with_last_byte(7), 18);
/// assert_eq!(dai.decimals(), 18);
/// ```
#[must_use]
pub fn erc20(chain_id: u64, address: Address, decimals: u8) -> Token {
    Token::new(chain_id, address, decimals, None, None, None, None)
}

/// The native coin of `chain_id` (ETH on mainnet).
///
/// Pools hold its canonical wrapped token; only chains that have one can
/// be routed through.
#[must_use]
pub fn native(chain_id: u64) -> Currency {
    Currency::NativeCurrency(Ether::on_chain(chain_id))
}

/// `raw` smallest units of `token`.
///
/// # Errors
///
/// Returns [`AmmError::Core`] if the amount is rejected by the currency
/// amount constructor.
pub fn token_amount(token: Token, raw: impl Into<BigInt>) -> Result<TokenAmount, AmmError> {
    Ok(CurrencyAmount::from_raw_amount(token, raw)?)
}

/// `raw` smallest units of `currency`, which may be native.
///
/// # Errors
///
/// See [`token_amount`].
pub fn currency_amount(
    currency: impl Into<Currency>,
    raw: impl Into<BigInt>,
) -> Result<CurrencyAmount<Currency>, AmmError> {
    Ok(CurrencyAmount::from_raw_amount(currency.into(), raw)?)
}

/// Canonical ordering: `true` if `a` becomes `token0` of a pair with `b`.
///
/// Tokens are ordered by address bytes.
///
/// # Errors
///
/// - [`AmmError::Invariant`]`("CHAIN_IDS")` if the tokens are on different chains.
/// - [`AmmError::Invariant`]`("ADDRESSES")` if both tokens share an address.
pub fn sorts_before(a: &Token, b: &Token) -> Result<bool, AmmError> {
    if a.chain_id() != b.chain_id() {
        return Err(AmmError::Invariant("CHAIN_IDS"));
    }
    if a.address() == b.address() {
        return Err(AmmError::Invariant("ADDRESSES"));
    }
    Ok(a.address() < b.address())
}

/// The same quantity denominated in the currency's wrapped token.
pub(crate) fn wrapped_amount(amount: &CurrencyAmount<Currency>) -> Result<TokenAmount, AmmError> {
    Ok(CurrencyAmount::from_fractional_amount(
        amount.currency.wrapped().clone(),
        amount.numerator.clone(),
        amount.denominator.clone(),
    )?)
}

/// Re-denominates a pool-side amount in the caller's currency.
pub(crate) fn in_currency(
    currency: &Currency,
    amount: &TokenAmount,
) -> Result<CurrencyAmount<Currency>, AmmError> {
    Ok(CurrencyAmount::from_fractional_amount(
        currency.clone(),
        amount.numerator.clone(),
        amount.denominator.clone(),
    )?)
}

/// Floor of `amount` in smallest units.
///
/// # Errors
///
/// Returns [`AmmError::Invariant`]`("AMOUNT")` for a negative amount.
pub(crate) fn raw_of<T: BaseCurrency>(amount: &CurrencyAmount<T>) -> Result<BigUint, AmmError> {
    crate::math::unsigned(&amount.quotient())
}
