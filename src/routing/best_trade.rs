//! Bounded search for the best routes between two currencies.
//!
//! The search walks outward from the fixed side of the trade.  At each step
//! it considers every slot touching the current frontier token, keeps the
//! slot's best pool for the current amount, and either completes a route
//! (frontier reached the target) or recurses with that slot excluded.
//!
//! Slot exclusion is an index mask over the caller's slice, and the
//! in-progress path is a stack of borrowed pools, so recursion allocates
//! only when a route completes.

use num_bigint::BigInt;
use tracing::{debug, trace};
use uniswap_sdk_core::prelude::*;

use super::{trade_comparator, Route, Trade};
use crate::config::BestTradeOptions;
use crate::domain::{wrapped_amount, Currency, CurrencyAmount, TokenAmount, TradeType};
use crate::error::AmmError;
use crate::pools::{Pool, PoolSlot};

/// Ranked route search over a fixed set of pool slots.
///
/// # Example
///
/// ```rust
/// use ampswap::config::BestTradeOptions;
/// use ampswap::domain::{currency_amount, erc20, token_amount, Address};
/// use ampswap::pools::{Pool, PoolSlot};
/// use ampswap::routing::BestTradeSearch;
/// use ampswap::prelude::FractionBase;
/// use num_bigint::BigInt;
///
/// let a = erc20(1, Address::with_last_byte(1), 18);
/// let b = erc20(1, Address::with_last_byte(2), 18);
/// let ra = token_amount(a.clone(), 1_000_000).expect("amount");
/// let rb = token_amount(b.clone(), 1_000_000).expect("amount");
/// let pool = Pool::new(
///     Address::with_last_byte(0xaa),
///     ra.clone(),
///     rb.clone(),
///     ra,
///     rb,
///     3_000_000_000_000_000,
///     10_000,
/// )
/// .expect("valid pool");
/// let slots = vec![PoolSlot::new(vec![pool]).expect("one pool")];
///
/// let search = BestTradeSearch::new(&slots, BestTradeOptions::default()).expect("valid search");
/// let trades = search
///     .exact_in(&currency_amount(a, 1_000).expect("amount"), &b.into())
///     .expect("search ran");
/// assert_eq!(trades.len(), 1);
/// assert_eq!(trades[0].output_amount().quotient(), BigInt::from(996));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct BestTradeSearch<'a> {
    slots: &'a [PoolSlot],
    options: BestTradeOptions,
}

/// Mutable state threaded through one search.
struct Frame<'a> {
    excluded: Vec<bool>,
    path: Vec<&'a Pool>,
    results: Vec<Trade>,
}

impl<'a> BestTradeSearch<'a> {
    /// Prepares a search over `slots`.
    ///
    /// # Errors
    ///
    /// - [`AmmError::Invariant`]`("PAIRS")` if `slots` is empty.
    /// - [`AmmError::Invariant`]`("MAX_HOPS")` if `options.max_hops` is zero.
    pub fn new(slots: &'a [PoolSlot], options: BestTradeOptions) -> Result<Self, AmmError> {
        if slots.is_empty() {
            return Err(AmmError::Invariant("PAIRS"));
        }
        options.validate()?;
        Ok(Self { slots, options })
    }

    /// Best routes selling exactly `amount_in` for `currency_out`, best first.
    ///
    /// An empty result means no viable route, not an error.  Routes paying
    /// out no more than [`BestTradeOptions::dust_threshold`] are omitted.
    ///
    /// # Errors
    ///
    /// Any error other than a per-pool quote failure aborts the search,
    /// including [`AmmError::Invariant`]`("MAX_SIZE_ZERO")` when a route is
    /// found but `max_num_results` is zero.
    pub fn exact_in(
        &self,
        amount_in: &CurrencyAmount<Currency>,
        currency_out: &Currency,
    ) -> Result<Vec<Trade>, AmmError> {
        debug!(
            slots = self.slots.len(),
            max_hops = self.options.max_hops(),
            max_results = self.options.max_num_results(),
            amount = %amount_in.quotient(),
            "searching exact-in routes"
        );
        let mut frame = self.frame();
        self.search(
            &mut frame,
            TradeType::ExactInput,
            amount_in,
            currency_out,
            wrapped_amount(amount_in)?,
            self.options.max_hops(),
        )?;
        debug!(found = frame.results.len(), "exact-in search finished");
        Ok(frame.results)
    }

    /// Best routes buying exactly `amount_out` with `currency_in`, best first.
    ///
    /// An empty result means no viable route, not an error.
    ///
    /// # Errors
    ///
    /// See [`BestTradeSearch::exact_in`].
    pub fn exact_out(
        &self,
        currency_in: &Currency,
        amount_out: &CurrencyAmount<Currency>,
    ) -> Result<Vec<Trade>, AmmError> {
        debug!(
            slots = self.slots.len(),
            max_hops = self.options.max_hops(),
            max_results = self.options.max_num_results(),
            amount = %amount_out.quotient(),
            "searching exact-out routes"
        );
        let mut frame = self.frame();
        self.search(
            &mut frame,
            TradeType::ExactOutput,
            amount_out,
            currency_in,
            wrapped_amount(amount_out)?,
            self.options.max_hops(),
        )?;
        debug!(found = frame.results.len(), "exact-out search finished");
        Ok(frame.results)
    }

    fn frame(&self) -> Frame<'a> {
        Frame {
            excluded: vec![false; self.slots.len()],
            path: Vec::with_capacity(self.options.max_hops() as usize),
            results: Vec::with_capacity(self.options.max_num_results()),
        }
    }

    /// One level of the search.
    ///
    /// `fixed` is the caller's amount, `target` the currency at the other
    /// end, and `current` the amount at the frontier.  For exact-out the
    /// walk runs backwards from the output, so `frame.path` holds pools in
    /// reverse route order.
    fn search(
        &self,
        frame: &mut Frame<'a>,
        trade_type: TradeType,
        fixed: &CurrencyAmount<Currency>,
        target: &Currency,
        current: TokenAmount,
        hops_left: u32,
    ) -> Result<(), AmmError> {
        let target_token = target.wrapped().clone();
        let remaining = frame.excluded.iter().filter(|x| !**x).count();

        for (index, slot) in self.slots.iter().enumerate() {
            if frame.excluded[index] || !slot.involves_token(&current.currency) {
                continue;
            }
            let Some((pool, next)) = best_in_slot(slot, &current, trade_type)? else {
                trace!(slot = index, "no viable pool in slot");
                continue;
            };
            trace!(slot = index, pool = %pool.address(), amount = %next.quotient(), "selected pool");

            if next.currency.equals(&target_token) {
                if trade_type == TradeType::ExactInput && self.is_dust(&next) {
                    trace!(slot = index, "omitting dust route");
                    continue;
                }
                frame.path.push(pool);
                let trade = self.complete(&frame.path, trade_type, fixed, target);
                frame.path.pop();
                self.insert(&mut frame.results, trade?)?;
            } else if hops_left > 1 && remaining > 1 {
                frame.excluded[index] = true;
                frame.path.push(pool);
                let outcome = self.search(frame, trade_type, fixed, target, next, hops_left - 1);
                frame.path.pop();
                frame.excluded[index] = false;
                outcome?;
            }
        }
        Ok(())
    }

    fn is_dust(&self, output: &TokenAmount) -> bool {
        output.quotient() <= BigInt::from(self.options.dust_threshold())
    }

    /// Adds `trade` to the ranked list, dropping the lowest-ranked entry
    /// once the list is full.
    fn insert(&self, results: &mut Vec<Trade>, trade: Trade) -> Result<(), AmmError> {
        let capacity = self.options.max_num_results();
        if capacity == 0 {
            return Err(AmmError::Invariant("MAX_SIZE_ZERO"));
        }
        if results.len() == capacity {
            trace!("result list full, lowest-ranked trade will be dropped");
        }
        let _evicted = sorted_insert(results, trade, capacity, trade_comparator);
        Ok(())
    }

    /// Builds the trade for a completed path.
    fn complete(
        &self,
        path: &[&Pool],
        trade_type: TradeType,
        fixed: &CurrencyAmount<Currency>,
        target: &Currency,
    ) -> Result<Trade, AmmError> {
        let (pools, input, output): (Vec<Pool>, _, _) = match trade_type {
            TradeType::ExactInput => (
                path.iter().map(|p| (*p).clone()).collect(),
                fixed.currency.clone(),
                target.clone(),
            ),
            TradeType::ExactOutput => (
                path.iter().rev().map(|p| (*p).clone()).collect(),
                target.clone(),
                fixed.currency.clone(),
            ),
        };
        Trade::new(Route::new(pools, input, output)?, fixed.clone(), trade_type)
    }
}

/// Picks the pool in `slot` with the most output (exact-in) or least input
/// (exact-out) for `amount`.  The first pool wins ties.
///
/// Pools that cannot quote `amount` are skipped; any other error aborts.
/// No dust threshold applies here: a pool quoting a tiny positive output
/// is still the slot's best when nothing else quotes more, and whether the
/// finished route is worth returning is decided once, on its final output.
fn best_in_slot<'p>(
    slot: &'p PoolSlot,
    amount: &TokenAmount,
    trade_type: TradeType,
) -> Result<Option<(&'p Pool, TokenAmount)>, AmmError> {
    let mut best: Option<(&Pool, TokenAmount)> = None;
    for pool in slot.pools() {
        let quote = match trade_type {
            TradeType::ExactInput => pool.get_output_amount(amount),
            TradeType::ExactOutput => pool.get_input_amount(amount),
        };
        let quoted = match quote {
            Ok(q) => q.into_amount(),
            Err(e) if e.is_quote_failure() => continue,
            Err(e) => return Err(e),
        };
        let better = match (&best, trade_type) {
            (None, _) => true,
            (Some((_, b)), TradeType::ExactInput) => quoted.quotient() > b.quotient(),
            (Some((_, b)), TradeType::ExactOutput) => quoted.quotient() < b.quotient(),
        };
        if better {
            best = Some((pool, quoted));
        }
    }
    Ok(best)
}
