//! Validated chains of pools.

use std::sync::OnceLock;

use num_bigint::BigInt;
use uniswap_sdk_core::prelude::*;

use crate::domain::{Currency, Token};
use crate::error::AmmError;
use crate::pools::Pool;

/// An ordered list of pools leading from `input` to `output`.
///
/// `path` lists the tokens visited, starting with the wrapped input and
/// ending with the wrapped output, so `path.len() == pools.len() + 1`.
/// `input` and `output` keep the caller's currencies, which may be native.
#[derive(Debug, Clone)]
pub struct Route {
    pools: Vec<Pool>,
    path: Vec<Token>,
    input: Currency,
    output: Currency,
    mid_price: OnceLock<Price<Currency, Currency>>,
}

impl Route {
    /// Validates `pools` as a path from `input` to `output`.
    ///
    /// # Errors
    ///
    /// [`AmmError::Invariant`] with:
    /// - `"PAIRS"` if `pools` is empty;
    /// - `"CHAIN_IDS"` if the pools span several chains;
    /// - `"INPUT"` / `"OUTPUT"` if the first / last pool lacks the wrapped currency;
    /// - `"PATH"` if consecutive pools do not connect, or the walk ends on a
    ///   token other than the wrapped output.
    pub fn new(pools: Vec<Pool>, input: Currency, output: Currency) -> Result<Self, AmmError> {
        let (Some(first), Some(last)) = (pools.first(), pools.last()) else {
            return Err(AmmError::Invariant("PAIRS"));
        };
        let chain_id = first.chain_id();
        if pools.iter().any(|p| p.chain_id() != chain_id) {
            return Err(AmmError::Invariant("CHAIN_IDS"));
        }
        let wrapped_input = input.wrapped().clone();
        let wrapped_output = output.wrapped().clone();
        if !first.involves_token(&wrapped_input) {
            return Err(AmmError::Invariant("INPUT"));
        }
        if !last.involves_token(&wrapped_output) {
            return Err(AmmError::Invariant("OUTPUT"));
        }

        let mut path = Vec::with_capacity(pools.len() + 1);
        path.push(wrapped_input);
        for pool in &pools {
            let frontier = path.last().ok_or(AmmError::Invariant("PATH"))?;
            let next = pool
                .other_token(frontier)
                .map_err(|_| AmmError::Invariant("PATH"))?
                .clone();
            path.push(next);
        }
        if !path.last().is_some_and(|t| t.equals(&wrapped_output)) {
            return Err(AmmError::Invariant("PATH"));
        }

        Ok(Self {
            pools,
            path,
            input,
            output,
            mid_price: OnceLock::new(),
        })
    }

    #[must_use]
    pub fn pools(&self) -> &[Pool] {
        &self.pools
    }

    /// Tokens visited, input first.
    #[must_use]
    pub fn path(&self) -> &[Token] {
        &self.path
    }

    #[must_use]
    pub const fn input(&self) -> &Currency {
        &self.input
    }

    #[must_use]
    pub const fn output(&self) -> &Currency {
        &self.output
    }

    #[must_use]
    pub fn chain_id(&self) -> u64 {
        self.path[0].chain_id()
    }

    /// Composite pre-trade price of `output` per `input`, computed once.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::DivisionByZero`] if a pool on the route has an
    /// empty virtual reserve.
    pub fn mid_price(&self) -> Result<Price<Currency, Currency>, AmmError> {
        if let Some(price) = self.mid_price.get() {
            return Ok(price.clone());
        }
        let mut numerator = BigInt::from(1);
        let mut denominator = BigInt::from(1);
        for (pool, token) in self.pools.iter().zip(&self.path) {
            let hop = pool.price_of(token)?;
            numerator *= &hop.numerator;
            denominator *= &hop.denominator;
        }
        let price = Price::new(self.input.clone(), self.output.clone(), denominator, numerator);
        Ok(self.mid_price.get_or_init(|| price).clone())
    }
}
