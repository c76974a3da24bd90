//! Convenience re-exports for common types.
//!
//! Includes the `uniswap-sdk-core` prelude, so currency and fraction
//! traits are in scope along with this crate's own types.
//!
//! ```rust
//! use ampswap::prelude::*;
//! ```

pub use uniswap_sdk_core::prelude::*;

pub use crate::config::{BestTradeOptions, Deadline, SwapCallOptions};
pub use crate::domain::{
    currency_amount, erc20, native, sorts_before, token_amount, Address, Currency, CurrencyAmount,
    Token, TokenAmount, TradeType,
};
pub use crate::error::{AmmError, Result};
#[cfg(feature = "fetcher")]
pub use crate::fetcher::{ChainDataProvider, Fetcher, FetcherCache, PoolSnapshot};
pub use crate::math::{Fraction, Percent, Price, Rounding};
pub use crate::pools::{Pool, PoolSlot};
pub use crate::router::{swap_call_parameters, CallArgument, SwapParameters};
pub use crate::routing::{BestTradeSearch, Route, Trade};
