//! Pool snapshots and the slots route search groups them into.
//!
//! | Type | Role |
//! |------|------|
//! | [`Pool`] | one two-token pool: swap and liquidity math |
//! | [`PoolQuote`] | an amount priced against a pool, plus advisory next reserves |
//! | [`PoolSlot`] | interchangeable pools for the same token pair |

mod pool;
mod slot;

#[cfg(test)]
#[allow(clippy::panic)]
mod proptest_properties;

pub use pool::{Pool, PoolQuote, MINIMUM_LIQUIDITY, PRECISION};
pub use slot::PoolSlot;
