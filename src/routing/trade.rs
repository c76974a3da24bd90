//! Trades: a route simulated for one fixed amount.

use core::cmp::Ordering;

use num_bigint::BigInt;
use uniswap_sdk_core::prelude::*;

use super::Route;
use crate::domain::{in_currency, wrapped_amount, Currency, CurrencyAmount, TradeType};
use crate::error::AmmError;
use crate::math::{div_round, unsigned};

/// A [`Route`] priced for one fixed input or output amount.
///
/// Construction simulates every hop against the route's pool snapshots;
/// the resulting amounts are denominated in the route's own (possibly
/// native) currencies.
#[derive(Debug, Clone)]
pub struct Trade {
    route: Route,
    trade_type: TradeType,
    input_amount: CurrencyAmount<Currency>,
    output_amount: CurrencyAmount<Currency>,
    execution_price: Price<Currency, Currency>,
    price_impact: Percent,
}

impl Trade {
    /// Simulates `route` for `amount`.
    ///
    /// For [`TradeType::ExactInput`], `amount` is in the route's input
    /// currency and is fed forward through every pool.  For
    /// [`TradeType::ExactOutput`], it is in the output currency and each
    /// pool is asked, last to first, for the input it needs.
    ///
    /// # Errors
    ///
    /// - [`AmmError::Invariant`]`("INPUT")` / `("OUTPUT")` if `amount` is in
    ///   the wrong currency.
    /// - Any quote failure raised by a pool along the way.
    pub fn new(
        route: Route,
        amount: CurrencyAmount<Currency>,
        trade_type: TradeType,
    ) -> Result<Self, AmmError> {
        let (input_amount, output_amount) = match trade_type {
            TradeType::ExactInput => {
                if !amount.currency.equals(route.input()) {
                    return Err(AmmError::Invariant("INPUT"));
                }
                let mut current = wrapped_amount(&amount)?;
                for pool in route.pools() {
                    current = pool.get_output_amount(&current)?.into_amount();
                }
                let output = in_currency(route.output(), &current)?;
                (amount, output)
            }
            TradeType::ExactOutput => {
                if !amount.currency.equals(route.output()) {
                    return Err(AmmError::Invariant("OUTPUT"));
                }
                let mut current = wrapped_amount(&amount)?;
                for pool in route.pools().iter().rev() {
                    current = pool.get_input_amount(&current)?.into_amount();
                }
                let input = in_currency(route.input(), &current)?;
                (input, amount)
            }
        };

        let execution_price =
            Price::from_currency_amounts(input_amount.clone(), output_amount.clone());
        let price_impact = compute_price_impact(&route.mid_price()?, &input_amount, &output_amount)?;

        Ok(Self {
            route,
            trade_type,
            input_amount,
            output_amount,
            execution_price,
            price_impact,
        })
    }

    /// Shorthand for [`Trade::new`] with [`TradeType::ExactInput`].
    ///
    /// # Errors
    ///
    /// See [`Trade::new`].
    pub fn exact_in(route: Route, amount_in: CurrencyAmount<Currency>) -> Result<Self, AmmError> {
        Self::new(route, amount_in, TradeType::ExactInput)
    }

    /// Shorthand for [`Trade::new`] with [`TradeType::ExactOutput`].
    ///
    /// # Errors
    ///
    /// See [`Trade::new`].
    pub fn exact_out(route: Route, amount_out: CurrencyAmount<Currency>) -> Result<Self, AmmError> {
        Self::new(route, amount_out, TradeType::ExactOutput)
    }

    #[must_use]
    pub const fn route(&self) -> &Route {
        &self.route
    }

    #[must_use]
    pub const fn trade_type(&self) -> TradeType {
        self.trade_type
    }

    #[must_use]
    pub const fn input_amount(&self) -> &CurrencyAmount<Currency> {
        &self.input_amount
    }

    #[must_use]
    pub const fn output_amount(&self) -> &CurrencyAmount<Currency> {
        &self.output_amount
    }

    /// Output per input actually realised.
    #[must_use]
    pub const fn execution_price(&self) -> &Price<Currency, Currency> {
        &self.execution_price
    }

    /// Shortfall of the execution price against the route's mid price.
    #[must_use]
    pub const fn price_impact(&self) -> &Percent {
        &self.price_impact
    }

    /// Least output acceptable under `slippage_tolerance`:
    /// `output / (1 + tolerance)`, rounded down.  Exact-output trades
    /// return their fixed output.
    ///
    /// # Errors
    ///
    /// - [`AmmError::Invariant`]`("SLIPPAGE_TOLERANCE")` if the tolerance is negative.
    pub fn minimum_amount_out(
        &self,
        slippage_tolerance: &Percent,
    ) -> Result<CurrencyAmount<Currency>, AmmError> {
        check_tolerance(slippage_tolerance)?;
        if self.trade_type == TradeType::ExactOutput {
            return Ok(self.output_amount.clone());
        }
        let bound = self
            .output_amount
            .multiply(&(Percent::new(1, 1) + slippage_tolerance.clone()).invert())?;
        Ok(CurrencyAmount::from_raw_amount(
            self.output_amount.currency.clone(),
            bound.quotient(),
        )?)
    }

    /// Most input acceptable under `slippage_tolerance`:
    /// `input × (1 + tolerance)`, rounded up.  Exact-input trades return
    /// their fixed input.
    ///
    /// # Errors
    ///
    /// - [`AmmError::Invariant`]`("SLIPPAGE_TOLERANCE")` if the tolerance is negative.
    pub fn maximum_amount_in(
        &self,
        slippage_tolerance: &Percent,
    ) -> Result<CurrencyAmount<Currency>, AmmError> {
        check_tolerance(slippage_tolerance)?;
        if self.trade_type == TradeType::ExactInput {
            return Ok(self.input_amount.clone());
        }
        let bound = self
            .input_amount
            .multiply(&(Percent::new(1, 1) + slippage_tolerance.clone()))?;
        let ceil = div_round(
            &unsigned(&bound.numerator)?,
            &unsigned(&bound.denominator)?,
            Rounding::RoundUp,
        )?;
        Ok(CurrencyAmount::from_raw_amount(
            self.input_amount.currency.clone(),
            BigInt::from(ceil),
        )?)
    }

    /// Price at the slippage bounds: `minimum_amount_out / maximum_amount_in`.
    ///
    /// # Errors
    ///
    /// Propagates the errors of the two bounds.
    pub fn worst_execution_price(
        &self,
        slippage_tolerance: &Percent,
    ) -> Result<Price<Currency, Currency>, AmmError> {
        Ok(Price::from_currency_amounts(
            self.maximum_amount_in(slippage_tolerance)?,
            self.minimum_amount_out(slippage_tolerance)?,
        ))
    }
}

fn check_tolerance(slippage_tolerance: &Percent) -> Result<(), AmmError> {
    if *slippage_tolerance < Percent::default() {
        return Err(AmmError::Invariant("SLIPPAGE_TOLERANCE"));
    }
    Ok(())
}

/// Orders trades with the same input and output currencies: more output
/// first, then less input.
#[must_use]
pub fn input_output_comparator(a: &Trade, b: &Trade) -> Ordering {
    debug_assert!(a.input_amount.currency.equals(&b.input_amount.currency));
    debug_assert!(a.output_amount.currency.equals(&b.output_amount.currency));
    b.output_amount
        .quotient()
        .cmp(&a.output_amount.quotient())
        .then_with(|| a.input_amount.quotient().cmp(&b.input_amount.quotient()))
}

/// Ranking used by route search: [`input_output_comparator`], then lower
/// price impact, then fewer hops.
#[must_use]
pub fn trade_comparator(a: &Trade, b: &Trade) -> Ordering {
    input_output_comparator(a, b)
        .then_with(|| {
            a.price_impact
                .partial_cmp(&b.price_impact)
                .unwrap_or(Ordering::Equal)
        })
        .then_with(|| a.route.path().len().cmp(&b.route.path().len()))
}
