//! Virtual-reserve constant-product pool.
//!
//! Pricing uses the constant-product curve over **virtual** reserves, which
//! an amplified pool keeps larger than its real balances to flatten the
//! curve.  Real reserves still bound what the pool can pay out.
//!
//! # Swap Algorithm (token in → token out)
//!
//! 1. `in_with_fee = amount_in × (PRECISION − fee) / PRECISION` (floor)
//! 2. `amount_out  = in_with_fee × v_out / (v_in + in_with_fee)` (floor)
//! 3. reject if `amount_out ≥ real_out` or `amount_out == 0`
//! 4. advisory next state: `v_in += amount_in`, `v_out −= amount_out`
//!
//! The inverse ([`Pool::get_input_amount`]) rounds up twice so that a
//! trader can never extract more than the forward formula would pay.
//!
//! Every intermediate is an unbounded integer.  Only values the router
//! contract would have to carry (reserves, quoted amounts, next reserves)
//! are checked against the 256-bit word.
//!
//! A `Pool` is a frozen snapshot; quoting never mutates it.

use num_bigint::{BigInt, BigUint};
use num_traits::Zero;
use uniswap_sdk_core::prelude::*;

use crate::domain::{raw_of, sorts_before, token_amount, Address, Token, TokenAmount, MAX_AMOUNT_BITS};
use crate::error::AmmError;
use crate::math::{div_round, isqrt, mul_div};

/// Fixed-point denominator for [`Pool::fee`]: `3 × 10^15` is 0.3%.
pub const PRECISION: u128 = 1_000_000_000_000_000_000;

/// Liquidity permanently locked by the first deposit.
pub const MINIMUM_LIQUIDITY: u128 = 1_000;

/// Denominator of the protocol-fee share passed to [`Pool::get_liquidity_value`].
const PROTOCOL_FEE_DENOMINATOR: u32 = 5_000;

/// Decimals of every pool's LP token.
const LIQUIDITY_DECIMALS: u8 = 18;

/// Raw value of `amount`, bounded to one EVM word.
fn word(amount: &TokenAmount) -> Result<BigUint, AmmError> {
    bounded(raw_of(amount)?)
}

fn bounded(value: BigUint) -> Result<BigUint, AmmError> {
    if value.bits() > MAX_AMOUNT_BITS {
        return Err(AmmError::Overflow("amount exceeds uint256"));
    }
    Ok(value)
}

/// Result of pricing an amount against a pool.
///
/// Carries the computed amount and the virtual reserves the pool would hold
/// afterwards.  The reserves are advisory; the pool itself is unchanged.
#[derive(Debug, Clone)]
pub struct PoolQuote {
    amount: TokenAmount,
    virtual_reserve_in: TokenAmount,
    virtual_reserve_out: TokenAmount,
}

impl PoolQuote {
    /// The output (for [`Pool::get_output_amount`]) or required input
    /// (for [`Pool::get_input_amount`]).
    #[must_use]
    pub const fn amount(&self) -> &TokenAmount {
        &self.amount
    }

    #[must_use]
    pub fn into_amount(self) -> TokenAmount {
        self.amount
    }

    /// Virtual reserves after the swap, as `(input side, output side)`.
    #[must_use]
    pub const fn next_virtual_reserves(&self) -> (&TokenAmount, &TokenAmount) {
        (&self.virtual_reserve_in, &self.virtual_reserve_out)
    }
}

/// A point-in-time snapshot of one two-token pool.
///
/// `token0` always sorts before `token1` by address, whatever order the
/// constructor received them in.
///
/// # Example
///
/// ```rust
/// use ampswap::domain::{erc20, token_amount, Address, BaseCurrency};
/// use ampswap::pools::Pool;
/// use ampswap::prelude::FractionBase;
/// use num_bigint::BigInt;
///
/// let a = erc20(1, Address::with_last_byte(1), 18);
/// let b = erc20(1, Address::with_last_byte(2), 18);
/// let pool = Pool::new(
///     Address::with_last_byte(0xaa),
///     token_amount(b.clone(), 1_000_000).expect("amount"),
///     token_amount(a.clone(), 1_000_000).expect("amount"),
///     token_amount(b, 1_000_000).expect("amount"),
///     token_amount(a.clone(), 1_000_000).expect("amount"),
///     3_000_000_000_000_000, // 0.3%
///     10_000,
/// )
/// .expect("valid pool");
///
/// assert!(pool.token0().equals(&a));
/// let quote = pool
///     .get_output_amount(&token_amount(a, 1_000).expect("amount"))
///     .expect("quote");
/// assert_eq!(quote.amount().quotient(), BigInt::from(996));
/// ```
#[derive(Debug, Clone)]
pub struct Pool {
    address: Address,
    liquidity_token: Token,
    reserves: [TokenAmount; 2],
    virtual_reserves: [TokenAmount; 2],
    fee: u128,
    amp_bps: u128,
}

impl Pool {
    /// Builds a pool snapshot, sorting both real and virtual reserves into
    /// canonical token order.
    ///
    /// `virtual_a` / `virtual_b` pair with `amount_a` / `amount_b`.
    ///
    /// # Errors
    ///
    /// - [`AmmError::Invariant`]`("CHAIN_IDS")` if the tokens are on different chains.
    /// - [`AmmError::Invariant`]`("ADDRESSES")` if both amounts are of the same token.
    /// - [`AmmError::Invariant`]`("TOKEN")` if a virtual reserve is not of its real reserve's token.
    /// - [`AmmError::Invariant`]`("FEE")` if `fee ≥ PRECISION`.
    /// - [`AmmError::Invariant`]`("AMOUNT")` for a negative reserve.
    /// - [`AmmError::Overflow`] for a reserve wider than 256 bits.
    pub fn new(
        address: Address,
        amount_a: TokenAmount,
        amount_b: TokenAmount,
        virtual_a: TokenAmount,
        virtual_b: TokenAmount,
        fee: u128,
        amp_bps: u128,
    ) -> Result<Self, AmmError> {
        if fee >= PRECISION {
            return Err(AmmError::Invariant("FEE"));
        }
        if !virtual_a.currency.equals(&amount_a.currency)
            || !virtual_b.currency.equals(&amount_b.currency)
        {
            return Err(AmmError::Invariant("TOKEN"));
        }
        for reserve in [&amount_a, &amount_b, &virtual_a, &virtual_b] {
            word(reserve)?;
        }
        let (reserves, virtual_reserves) = if sorts_before(&amount_a.currency, &amount_b.currency)? {
            ([amount_a, amount_b], [virtual_a, virtual_b])
        } else {
            ([amount_b, amount_a], [virtual_b, virtual_a])
        };
        let liquidity_token = Token::new(
            reserves[0].currency.chain_id(),
            address,
            LIQUIDITY_DECIMALS,
            Some("AMM-LP".to_owned()),
            Some("AMM LP".to_owned()),
            None,
            None,
        );
        Ok(Self {
            address,
            liquidity_token,
            reserves,
            virtual_reserves,
            fee,
            amp_bps,
        })
    }

    // -- Accessors ----------------------------------------------------------

    #[must_use]
    pub const fn address(&self) -> Address {
        self.address
    }

    /// The pool's LP share token: the pool address with 18 decimals.
    #[must_use]
    pub const fn liquidity_token(&self) -> &Token {
        &self.liquidity_token
    }

    #[must_use]
    pub fn chain_id(&self) -> u64 {
        self.token0().chain_id()
    }

    #[must_use]
    pub fn token0(&self) -> &Token {
        &self.reserves[0].currency
    }

    #[must_use]
    pub fn token1(&self) -> &Token {
        &self.reserves[1].currency
    }

    #[must_use]
    pub const fn reserve0(&self) -> &TokenAmount {
        &self.reserves[0]
    }

    #[must_use]
    pub const fn reserve1(&self) -> &TokenAmount {
        &self.reserves[1]
    }

    #[must_use]
    pub const fn virtual_reserve0(&self) -> &TokenAmount {
        &self.virtual_reserves[0]
    }

    #[must_use]
    pub const fn virtual_reserve1(&self) -> &TokenAmount {
        &self.virtual_reserves[1]
    }

    /// Swap fee as a fraction of [`PRECISION`].
    #[must_use]
    pub const fn fee(&self) -> u128 {
        self.fee
    }

    /// Amplification factor in basis points (10 000 = unamplified).
    #[must_use]
    pub const fn amp_bps(&self) -> u128 {
        self.amp_bps
    }

    /// Returns `true` if `token` is `token0` or `token1`.
    #[must_use]
    pub fn involves_token(&self, token: &Token) -> bool {
        token.equals(self.token0()) || token.equals(self.token1())
    }

    /// Given one side of the pool, returns the other.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::Invariant`]`("TOKEN")` if `token` is not in the pool.
    pub fn other_token(&self, token: &Token) -> Result<&Token, AmmError> {
        Ok(&self.reserves[1 - self.index_of(token)?].currency)
    }

    /// Real reserve held for `token`.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::Invariant`]`("TOKEN")` if `token` is not in the pool.
    pub fn reserve_of(&self, token: &Token) -> Result<&TokenAmount, AmmError> {
        Ok(&self.reserves[self.index_of(token)?])
    }

    /// Virtual reserve used for pricing `token`.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::Invariant`]`("TOKEN")` if `token` is not in the pool.
    pub fn virtual_reserve_of(&self, token: &Token) -> Result<&TokenAmount, AmmError> {
        Ok(&self.virtual_reserves[self.index_of(token)?])
    }

    fn index_of(&self, token: &Token) -> Result<usize, AmmError> {
        if token.equals(self.token0()) {
            Ok(0)
        } else if token.equals(self.token1()) {
            Ok(1)
        } else {
            Err(AmmError::Invariant("TOKEN"))
        }
    }

    // -- Prices -------------------------------------------------------------

    /// `reserves[1 - base] / reserves[base]` as a price of the `base` token.
    fn ratio(reserves: &[TokenAmount; 2], base: usize) -> Result<Price<Token, Token>, AmmError> {
        let quote = 1 - base;
        let denominator = reserves[base].quotient();
        if denominator.is_zero() {
            return Err(AmmError::DivisionByZero);
        }
        Ok(Price::new(
            reserves[base].currency.clone(),
            reserves[quote].currency.clone(),
            denominator,
            reserves[quote].quotient(),
        ))
    }

    /// Mid price of `token0` in `token1`: `v1 / v0`.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::DivisionByZero`] if the `token0` virtual reserve is zero.
    pub fn token0_price(&self) -> Result<Price<Token, Token>, AmmError> {
        Self::ratio(&self.virtual_reserves, 0)
    }

    /// Mid price of `token1` in `token0`: `v0 / v1`.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::DivisionByZero`] if the `token1` virtual reserve is zero.
    pub fn token1_price(&self) -> Result<Price<Token, Token>, AmmError> {
        Self::ratio(&self.virtual_reserves, 1)
    }

    /// Mid price of `token` in the other pool token, from virtual reserves.
    ///
    /// # Errors
    ///
    /// - [`AmmError::Invariant`]`("TOKEN")` if `token` is not in the pool.
    /// - [`AmmError::DivisionByZero`] if the relevant virtual reserve is zero.
    pub fn price_of(&self, token: &Token) -> Result<Price<Token, Token>, AmmError> {
        Self::ratio(&self.virtual_reserves, self.index_of(token)?)
    }

    /// Mid price of `token` in the other pool token, from real reserves.
    ///
    /// Differs from [`Pool::price_of`] whenever the amplification skews the
    /// virtual reserves away from the real balance ratio.
    ///
    /// # Errors
    ///
    /// - [`AmmError::Invariant`]`("TOKEN")` if `token` is not in the pool.
    /// - [`AmmError::DivisionByZero`] if the relevant real reserve is zero.
    pub fn price_of_real(&self, token: &Token) -> Result<Price<Token, Token>, AmmError> {
        Self::ratio(&self.reserves, self.index_of(token)?)
    }

    // -- Swap math ----------------------------------------------------------

    fn has_empty_reserve(&self) -> bool {
        self.reserves
            .iter()
            .chain(&self.virtual_reserves)
            .any(|r| r.quotient().is_zero())
    }

    fn quote(
        token: &Token,
        amount: BigUint,
        next_in: (&Token, BigUint),
        next_out: (&Token, BigUint),
    ) -> Result<PoolQuote, AmmError> {
        Ok(PoolQuote {
            amount: token_amount(token.clone(), BigInt::from(amount))?,
            virtual_reserve_in: token_amount(next_in.0.clone(), BigInt::from(next_in.1))?,
            virtual_reserve_out: token_amount(next_out.0.clone(), BigInt::from(next_out.1))?,
        })
    }

    /// Output received for selling `input` into the pool.
    ///
    /// # Errors
    ///
    /// - [`AmmError::Invariant`]`("TOKEN")` if `input` is not a pool token.
    /// - [`AmmError::InsufficientReserves`] if any reserve is empty, or the
    ///   output would reach the real output reserve.
    /// - [`AmmError::InsufficientInputAmount`] if the output rounds to zero.
    /// - [`AmmError::Overflow`] if `input` or the next virtual reserve is
    ///   wider than 256 bits.
    pub fn get_output_amount(&self, input: &TokenAmount) -> Result<PoolQuote, AmmError> {
        let i = self.index_of(&input.currency)?;
        let o = 1 - i;
        if self.has_empty_reserve() {
            return Err(AmmError::InsufficientReserves);
        }

        let v_in = word(&self.virtual_reserves[i])?;
        let v_out = word(&self.virtual_reserves[o])?;
        let amount_in = word(input)?;

        let in_with_fee = mul_div(
            &amount_in,
            &BigUint::from(PRECISION - self.fee),
            &BigUint::from(PRECISION),
            Rounding::RoundDown,
        )?;
        let out = mul_div(&in_with_fee, &v_out, &(&v_in + &in_with_fee), Rounding::RoundDown)?;

        if out >= word(&self.reserves[o])? {
            return Err(AmmError::InsufficientReserves);
        }
        if out.is_zero() {
            return Err(AmmError::InsufficientInputAmount);
        }

        let next_in = bounded(v_in + amount_in)?;
        let next_out = v_out - &out;
        let token_out = self.reserves[o].currency.clone();
        Self::quote(&token_out, out, (&input.currency, next_in), (&token_out, next_out))
    }

    /// Input required to receive exactly `output` from the pool.
    ///
    /// # Errors
    ///
    /// - [`AmmError::Invariant`]`("TOKEN")` if `output` is not a pool token.
    /// - [`AmmError::InsufficientReserves`] if any reserve is empty, or
    ///   `output` reaches the real (or virtual) output reserve.
    /// - [`AmmError::Overflow`] if the required input is wider than 256 bits.
    pub fn get_input_amount(&self, output: &TokenAmount) -> Result<PoolQuote, AmmError> {
        let o = self.index_of(&output.currency)?;
        let i = 1 - o;
        if self.has_empty_reserve() {
            return Err(AmmError::InsufficientReserves);
        }

        let v_in = word(&self.virtual_reserves[i])?;
        let v_out = word(&self.virtual_reserves[o])?;
        let amount_out = word(output)?;
        if amount_out >= word(&self.reserves[o])? || amount_out >= v_out {
            return Err(AmmError::InsufficientReserves);
        }

        let net_in = div_round(&(&v_in * &amount_out), &(&v_out - &amount_out), Rounding::RoundDown)?
            + 1u32;
        let gross_in = bounded(mul_div(
            &net_in,
            &BigUint::from(PRECISION),
            &BigUint::from(PRECISION - self.fee),
            Rounding::RoundUp,
        )?)?;

        let next_in = bounded(v_in + &gross_in)?;
        let next_out = v_out - amount_out;
        let token_in = self.reserves[i].currency.clone();
        Self::quote(&token_in, gross_in, (&token_in, next_in), (&output.currency, next_out))
    }

    // -- Liquidity math -----------------------------------------------------

    /// LP tokens minted for depositing `amount_a` and `amount_b`.
    ///
    /// The first deposit mints `√(a0 × a1) − MINIMUM_LIQUIDITY`; later
    /// deposits mint the smaller of the two pro-rata shares.
    ///
    /// # Errors
    ///
    /// - [`AmmError::Invariant`]`("LIQUIDITY")` if `total_supply` is not the LP token.
    /// - [`AmmError::Invariant`]`("TOKEN")` if the deposit tokens are not the pool pair.
    /// - [`AmmError::InsufficientInputAmount`] if nothing would be minted.
    pub fn get_liquidity_minted(
        &self,
        total_supply: &TokenAmount,
        amount_a: &TokenAmount,
        amount_b: &TokenAmount,
    ) -> Result<TokenAmount, AmmError> {
        if !total_supply.currency.equals(&self.liquidity_token) {
            return Err(AmmError::Invariant("LIQUIDITY"));
        }
        let (a0, a1) = if sorts_before(&amount_a.currency, &amount_b.currency)? {
            (amount_a, amount_b)
        } else {
            (amount_b, amount_a)
        };
        if !a0.currency.equals(self.token0()) || !a1.currency.equals(self.token1()) {
            return Err(AmmError::Invariant("TOKEN"));
        }

        let a0 = word(a0)?;
        let a1 = word(a1)?;
        let supply = word(total_supply)?;
        let minimum = BigUint::from(MINIMUM_LIQUIDITY);

        let liquidity = if supply.is_zero() {
            let root = isqrt(&(&a0 * &a1));
            if root <= minimum {
                return Err(AmmError::InsufficientInputAmount);
            }
            root - minimum
        } else {
            let by0 = mul_div(&a0, &supply, &word(&self.reserves[0])?, Rounding::RoundDown)?;
            let by1 = mul_div(&a1, &supply, &word(&self.reserves[1])?, Rounding::RoundDown)?;
            by0.min(by1)
        };

        if liquidity.is_zero() {
            return Err(AmmError::InsufficientInputAmount);
        }
        token_amount(self.liquidity_token.clone(), BigInt::from(bounded(liquidity)?))
    }

    /// Amount of `token` redeemable for `liquidity` LP tokens.
    ///
    /// With a non-zero `protocol_fee_bps`, the supply is first inflated by
    /// the LP tokens the protocol is owed for growth of `√(v0 × v1)` since
    /// `k_last` was recorded.  A `k_last` of zero means no growth is owed.
    ///
    /// # Errors
    ///
    /// - [`AmmError::Invariant`]`("TOKEN")` if `token` is not in the pool.
    /// - [`AmmError::Invariant`]`("TOTAL_SUPPLY")` / `("LIQUIDITY")` if the
    ///   amounts are not the LP token, or `liquidity` exceeds `total_supply`.
    /// - [`AmmError::Invariant`]`("K_LAST")` if a protocol fee is charged
    ///   without `k_last`.
    /// - [`AmmError::DivisionByZero`] if the adjusted supply is zero.
    pub fn get_liquidity_value(
        &self,
        token: &Token,
        total_supply: &TokenAmount,
        liquidity: &TokenAmount,
        protocol_fee_bps: u32,
        k_last: Option<&BigUint>,
    ) -> Result<TokenAmount, AmmError> {
        let reserve = self.reserve_of(token)?;
        if !total_supply.currency.equals(&self.liquidity_token) {
            return Err(AmmError::Invariant("TOTAL_SUPPLY"));
        }
        let supply = word(total_supply)?;
        let shares = word(liquidity)?;
        if !liquidity.currency.equals(&self.liquidity_token) || shares > supply {
            return Err(AmmError::Invariant("LIQUIDITY"));
        }

        let adjusted_supply = if protocol_fee_bps == 0 {
            supply
        } else {
            let k_last = k_last.ok_or(AmmError::Invariant("K_LAST"))?;
            let owed = self.protocol_fee_liquidity(&supply, protocol_fee_bps, k_last)?;
            supply + owed
        };

        let value = mul_div(&shares, &word(reserve)?, &adjusted_supply, Rounding::RoundDown)?;
        token_amount(reserve.currency.clone(), BigInt::from(value))
    }

    /// LP tokens owed to the protocol for invariant growth since `k_last`.
    fn protocol_fee_liquidity(
        &self,
        supply: &BigUint,
        fee_bps: u32,
        k_last: &BigUint,
    ) -> Result<BigUint, AmmError> {
        if k_last.is_zero() {
            return Ok(BigUint::zero());
        }
        let root_k = isqrt(&(word(&self.virtual_reserves[0])? * word(&self.virtual_reserves[1])?));
        let root_k_last = isqrt(k_last);
        if root_k <= root_k_last {
            return Ok(BigUint::zero());
        }
        let numerator = supply * (&root_k - &root_k_last) * fee_bps;
        let denominator = (root_k + root_k_last) * PROTOCOL_FEE_DENOMINATOR;
        div_round(&numerator, &denominator, Rounding::RoundDown)
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::domain::erc20;

    const FEE: u128 = 3_000_000_000_000_000;
    const E18: u128 = 1_000_000_000_000_000_000;

    fn token(n: u8) -> Token {
        erc20(1, Address::with_last_byte(n), 18)
    }

    fn amt(t: &Token, raw: impl Into<BigInt>) -> TokenAmount {
        let Ok(a) = token_amount(t.clone(), raw) else {
            panic!("valid amount");
        };
        a
    }

    fn big(v: u128) -> BigInt {
        BigInt::from(v)
    }

    fn skewed(real: (u128, u128), virt: (u128, u128), amp_bps: u128) -> Pool {
        let Ok(p) = Pool::new(
            Address::ZERO,
            amt(&token(1), real.0),
            amt(&token(2), real.1),
            amt(&token(1), virt.0),
            amt(&token(2), virt.1),
            FEE,
            amp_bps,
        ) else {
            panic!("valid pool");
        };
        p
    }

    fn pool(a: (Token, u128), b: (Token, u128)) -> Pool {
        let Ok(p) = Pool::new(
            Address::with_last_byte(0xaa),
            amt(&a.0, a.1),
            amt(&b.0, b.1),
            amt(&a.0, a.1),
            amt(&b.0, b.1),
            FEE,
            10_000,
        ) else {
            panic!("valid pool");
        };
        p
    }

    // -- Construction -------------------------------------------------------

    #[test]
    fn constructor_sorts_tokens() {
        let p = pool((token(2), 200), (token(1), 100));
        assert!(p.token0().equals(&token(1)));
        assert_eq!(p.reserve0().quotient(), big(100));
        assert_eq!(p.virtual_reserve1().quotient(), big(200));
    }

    #[test]
    fn constructor_rejects_cross_chain() {
        let other = erc20(5, Address::with_last_byte(2), 18);
        let r = Pool::new(
            Address::ZERO,
            amt(&token(1), 1),
            amt(&other, 1),
            amt(&token(1), 1),
            amt(&other, 1),
            FEE,
            10_000,
        );
        assert_eq!(r.err(), Some(AmmError::Invariant("CHAIN_IDS")));
    }

    #[test]
    fn constructor_rejects_fee_at_precision() {
        let r = Pool::new(
            Address::ZERO,
            amt(&token(1), 1),
            amt(&token(2), 1),
            amt(&token(1), 1),
            amt(&token(2), 1),
            PRECISION,
            10_000,
        );
        assert_eq!(r.err(), Some(AmmError::Invariant("FEE")));
    }

    #[test]
    fn constructor_rejects_mismatched_virtual_reserve() {
        let r = Pool::new(
            Address::ZERO,
            amt(&token(1), 1),
            amt(&token(2), 1),
            amt(&token(2), 1),
            amt(&token(1), 1),
            FEE,
            10_000,
        );
        assert_eq!(r.err(), Some(AmmError::Invariant("TOKEN")));
    }

    #[test]
    fn liquidity_token_is_pool_address() {
        let p = pool((token(1), 100), (token(2), 100));
        assert_eq!(p.liquidity_token().address(), Address::with_last_byte(0xaa));
        assert_eq!(p.liquidity_token().decimals(), 18);
        assert_eq!(p.liquidity_token().chain_id(), 1);
    }

    // -- Lookups ------------------------------------------------------------

    #[test]
    fn reserve_of_foreign_token_fails() {
        let p = pool((token(1), 100), (token(2), 100));
        assert_eq!(p.reserve_of(&token(3)).err(), Some(AmmError::Invariant("TOKEN")));
        assert!(matches!(p.other_token(&token(1)), Ok(t) if t.equals(&token(2))));
    }

    // -- Prices -------------------------------------------------------------

    #[test]
    fn prices_use_virtual_reserves() {
        let p = skewed((100, 100), (100, 400), 20_000);
        let Ok(price) = p.price_of(&token(1)) else {
            panic!("expected Ok");
        };
        assert_eq!(price.numerator, big(400));
        assert_eq!(price.denominator, big(100));
        let Ok(price) = p.token1_price() else {
            panic!("expected Ok");
        };
        assert!(price.base_currency.equals(&token(2)));
    }

    #[test]
    fn real_price_diverges_from_virtual_price() {
        let p = skewed((100, 300), (100, 400), 20_000);
        let (Ok(virt), Ok(real)) = (p.price_of(&token(1)), p.price_of_real(&token(1))) else {
            panic!("expected Ok");
        };
        assert_eq!(virt.quotient(), big(4));
        assert_eq!(real.quotient(), big(3));
        assert!(real.quote_currency.equals(&token(2)));

        let Ok(inverse) = p.price_of_real(&token(2)) else {
            panic!("expected Ok");
        };
        assert_eq!(inverse.numerator, big(100));
        assert_eq!(inverse.denominator, big(300));
    }

    #[test]
    fn real_price_of_foreign_token_fails() {
        let p = skewed((100, 300), (100, 400), 20_000);
        assert_eq!(p.price_of_real(&token(3)).err(), Some(AmmError::Invariant("TOKEN")));
    }

    #[test]
    fn real_price_with_empty_reserve_fails() {
        let p = skewed((0, 300), (100, 400), 20_000);
        assert_eq!(p.price_of_real(&token(1)).err(), Some(AmmError::DivisionByZero));
        assert!(p.price_of(&token(1)).is_ok());
    }

    // -- get_output_amount --------------------------------------------------

    #[test]
    fn output_amount_matches_formula() {
        let p = pool((token(1), 1000 * E18), (token(3), 1100 * E18));
        let Ok(q) = p.get_output_amount(&amt(&token(1), 100 * E18)) else {
            panic!("expected Ok");
        };
        assert_eq!(q.amount().quotient(), big(99_727_198_326_816_404_473));
        assert!(q.amount().currency.equals(&token(3)));
        let (next_in, next_out) = q.next_virtual_reserves();
        assert_eq!(next_in.quotient(), big(1100 * E18));
        assert_eq!(next_out.quotient(), big(1100 * E18 - 99_727_198_326_816_404_473));
    }

    #[test]
    fn output_amount_leaves_pool_untouched() {
        let p = pool((token(1), 1000), (token(2), 1000));
        let _ = p.get_output_amount(&amt(&token(1), 100));
        assert_eq!(p.virtual_reserve0().quotient(), big(1000));
        assert_eq!(p.virtual_reserve1().quotient(), big(1000));
    }

    #[test]
    fn output_amount_zero_reserve_fails() {
        let p = pool((token(1), 0), (token(2), 1000));
        assert_eq!(
            p.get_output_amount(&amt(&token(1), 100)).err(),
            Some(AmmError::InsufficientReserves)
        );
    }

    #[test]
    fn output_amount_dust_fails() {
        let p = pool((token(1), 1000), (token(2), 1000));
        assert_eq!(
            p.get_output_amount(&amt(&token(1), 1)).err(),
            Some(AmmError::InsufficientInputAmount)
        );
    }

    #[test]
    fn output_amount_capped_by_real_reserve() {
        let p = skewed((1_000, 10), (1_000_000, 1_000_000), 1_000_000);
        assert_eq!(
            p.get_output_amount(&amt(&token(1), 100)).err(),
            Some(AmmError::InsufficientReserves)
        );
    }

    #[test]
    fn output_amount_foreign_token_fails() {
        let p = pool((token(1), 1000), (token(2), 1000));
        assert_eq!(
            p.get_output_amount(&amt(&token(3), 100)).err(),
            Some(AmmError::Invariant("TOKEN"))
        );
    }

    #[test]
    fn output_amount_beyond_u128_is_exact() {
        let reserve = BigInt::from(u128::MAX) * 4u32;
        let Ok(p) = Pool::new(
            Address::ZERO,
            amt(&token(1), reserve.clone()),
            amt(&token(2), reserve.clone()),
            amt(&token(1), reserve.clone()),
            amt(&token(2), reserve.clone()),
            FEE,
            10_000,
        ) else {
            panic!("valid pool");
        };
        let Ok(q) = p.get_output_amount(&amt(&token(1), reserve.clone())) else {
            panic!("expected Ok");
        };
        // Selling a full reserve's worth returns just under half the other side.
        assert!(q.amount().quotient() > BigInt::from(u128::MAX));
        assert!(q.amount().quotient() < reserve / 2u32);
    }

    // -- get_input_amount ---------------------------------------------------

    #[test]
    fn input_amount_matches_formula() {
        let p = pool((token(1), 1000 * E18), (token(3), 1100 * E18));
        let Ok(q) = p.get_input_amount(&amt(&token(3), 100 * E18)) else {
            panic!("expected Ok");
        };
        assert_eq!(q.amount().quotient(), big(100_300_902_708_124_373_121));
        assert!(q.amount().currency.equals(&token(1)));
    }

    #[test]
    fn input_amount_rejects_full_drain() {
        let p = pool((token(1), 1000), (token(2), 1000));
        assert_eq!(
            p.get_input_amount(&amt(&token(2), 1000)).err(),
            Some(AmmError::InsufficientReserves)
        );
    }

    #[test]
    fn input_amount_small_pool() {
        let p = pool((token(1), 1000), (token(2), 1000));
        let Ok(q) = p.get_input_amount(&amt(&token(2), 100)) else {
            panic!("expected Ok");
        };
        assert_eq!(q.amount().quotient(), big(113));
    }

    #[test]
    fn input_amount_wider_than_a_word_overflows() {
        let Ok(p) = Pool::new(
            Address::ZERO,
            amt(&token(1), 1_000),
            amt(&token(2), 1_000),
            amt(&token(1), BigInt::from(1u8) << 250u32),
            amt(&token(2), 1_000),
            FEE,
            10_000,
        ) else {
            panic!("valid pool");
        };
        assert_eq!(
            p.get_input_amount(&amt(&token(2), 999)).err(),
            Some(AmmError::Overflow("amount exceeds uint256"))
        );
    }

    // -- get_liquidity_minted -----------------------------------------------

    #[test]
    fn liquidity_minted_first_deposit() {
        let p = pool((token(1), 0), (token(2), 0));
        let supply = amt(p.liquidity_token(), 0);
        let Ok(minted) =
            p.get_liquidity_minted(&supply, &amt(&token(1), 1001), &amt(&token(2), 1001))
        else {
            panic!("expected Ok");
        };
        assert_eq!(minted.quotient(), big(1));
        assert!(minted.currency.equals(p.liquidity_token()));
    }

    #[test]
    fn liquidity_minted_first_deposit_too_small() {
        let p = pool((token(1), 0), (token(2), 0));
        let supply = amt(p.liquidity_token(), 0);
        assert_eq!(
            p.get_liquidity_minted(&supply, &amt(&token(1), 1000), &amt(&token(2), 1)).err(),
            Some(AmmError::InsufficientInputAmount)
        );
    }

    #[test]
    fn liquidity_minted_pro_rata() {
        let p = pool((token(1), 10_000), (token(2), 10_000));
        let supply = amt(p.liquidity_token(), 10_000);
        let Ok(minted) =
            p.get_liquidity_minted(&supply, &amt(&token(2), 2000), &amt(&token(1), 2000))
        else {
            panic!("expected Ok");
        };
        assert_eq!(minted.quotient(), big(2000));
    }

    #[test]
    fn liquidity_minted_takes_smaller_share() {
        let p = pool((token(1), 10_000), (token(2), 10_000));
        let supply = amt(p.liquidity_token(), 10_000);
        let Ok(minted) =
            p.get_liquidity_minted(&supply, &amt(&token(1), 3000), &amt(&token(2), 1000))
        else {
            panic!("expected Ok");
        };
        assert_eq!(minted.quotient(), big(1000));
    }

    #[test]
    fn liquidity_minted_wrong_supply_token() {
        let p = pool((token(1), 10_000), (token(2), 10_000));
        assert_eq!(
            p.get_liquidity_minted(&amt(&token(1), 1), &amt(&token(1), 1), &amt(&token(2), 1)).err(),
            Some(AmmError::Invariant("LIQUIDITY"))
        );
    }

    #[test]
    fn liquidity_minted_wrong_pair() {
        let p = pool((token(1), 10_000), (token(2), 10_000));
        let supply = amt(p.liquidity_token(), 10_000);
        assert_eq!(
            p.get_liquidity_minted(&supply, &amt(&token(1), 1), &amt(&token(3), 1)).err(),
            Some(AmmError::Invariant("TOKEN"))
        );
    }

    // -- get_liquidity_value ------------------------------------------------

    #[test]
    fn liquidity_value_without_protocol_fee() {
        let p = pool((token(1), 1000), (token(2), 1000));
        let lp = p.liquidity_token();
        let Ok(v) = p.get_liquidity_value(&token(1), &amt(lp, 1000), &amt(lp, 1000), 0, None) else {
            panic!("expected Ok");
        };
        assert_eq!(v.quotient(), big(1000));

        let Ok(v) = p.get_liquidity_value(&token(1), &amt(lp, 1000), &amt(lp, 500), 0, None) else {
            panic!("expected Ok");
        };
        assert_eq!(v.quotient(), big(500));
        assert!(v.currency.equals(&token(1)));
    }

    #[test]
    fn liquidity_value_with_protocol_fee() {
        let p = pool((token(1), 1000), (token(2), 1000));
        let lp = p.liquidity_token();
        let k_last = BigUint::from(250_000u32);
        let Ok(v) =
            p.get_liquidity_value(&token(1), &amt(lp, 500), &amt(lp, 500), 1000, Some(&k_last))
        else {
            panic!("expected Ok");
        };
        assert_eq!(v.quotient(), big(938));
    }

    #[test]
    fn liquidity_value_with_zero_k_last_is_unadjusted() {
        let p = pool((token(1), 1000), (token(2), 1000));
        let lp = p.liquidity_token();
        let k_last = BigUint::zero();
        let Ok(v) =
            p.get_liquidity_value(&token(1), &amt(lp, 500), &amt(lp, 500), 1000, Some(&k_last))
        else {
            panic!("expected Ok");
        };
        assert_eq!(v.quotient(), big(1000));
    }

    #[test]
    fn liquidity_value_requires_k_last_when_fee_on() {
        let p = pool((token(1), 1000), (token(2), 1000));
        let lp = p.liquidity_token();
        assert_eq!(
            p.get_liquidity_value(&token(1), &amt(lp, 500), &amt(lp, 500), 1000, None).err(),
            Some(AmmError::Invariant("K_LAST"))
        );
    }

    #[test]
    fn liquidity_value_rejects_excess_liquidity() {
        let p = pool((token(1), 1000), (token(2), 1000));
        let lp = p.liquidity_token();
        assert_eq!(
            p.get_liquidity_value(&token(1), &amt(lp, 500), &amt(lp, 501), 0, None).err(),
            Some(AmmError::Invariant("LIQUIDITY"))
        );
    }

    #[test]
    fn liquidity_value_rejects_foreign_supply() {
        let p = pool((token(1), 1000), (token(2), 1000));
        let lp = p.liquidity_token();
        assert_eq!(
            p.get_liquidity_value(&token(1), &amt(&token(1), 500), &amt(lp, 500), 0, None).err(),
            Some(AmmError::Invariant("TOTAL_SUPPLY"))
        );
    }
}
