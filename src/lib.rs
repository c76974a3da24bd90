//! # ampswap
//!
//! Pricing and routing for amplified constant-product pools.
//!
//! Each pool trades against *virtual* reserves, which are its real
//! balances scaled by an amplification factor, while the real balances
//! bound how much can actually leave the pool.  This crate provides:
//!
//! - exact integer pool math (quotes, liquidity minting and burning),
//! - routes, trades and slippage bounds,
//! - a bounded best-trade search over sets of pools grouped per token pair,
//! - an async fetcher that loads pools through a pluggable provider, and
//! - an encoder that turns a trade into swap-router call parameters.
//!
//! All arithmetic is arbitrary-precision integer math with explicit
//! rounding; there is no floating point anywhere in the crate.
//!
//! # Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `fetcher` | yes | Async [`fetcher`] module (`async-trait`, `dashmap`) |
//! | `serde` | no | `Serialize` / `Deserialize` for options and router calls |
//!
//! # Quick Start
//!
//! ```rust
//! use ampswap::prelude::*;
//! use num_bigint::BigInt;
//!
//! let usdc = erc20(1, Address::with_last_byte(1), 6);
//! let weth = native(1).wrapped().clone();
//!
//! // Real reserves 1M / 1M, amplified 2x (virtual 2M / 2M), 0.3% fee.
//! let pool = Pool::new(
//!     Address::with_last_byte(0xaa),
//!     token_amount(usdc.clone(), 1_000_000).expect("amount"),
//!     token_amount(weth.clone(), 1_000_000).expect("amount"),
//!     token_amount(usdc.clone(), 2_000_000).expect("amount"),
//!     token_amount(weth, 2_000_000).expect("amount"),
//!     3_000_000_000_000_000,
//!     20_000,
//! )
//! .expect("valid pool");
//! let slots = vec![PoolSlot::new(vec![pool]).expect("one pool")];
//!
//! let search = BestTradeSearch::new(&slots, BestTradeOptions::default()).expect("valid search");
//! let amount_in = currency_amount(usdc, 10_000).expect("amount");
//! let trades = search.exact_in(&amount_in, &native(1)).expect("search ran");
//!
//! let best = &trades[0];
//! let min_out = best.minimum_amount_out(&Percent::new(50, 10_000)).expect("bounded");
//! assert!(min_out.quotient() < best.output_amount().quotient());
//! assert!(best.output_amount().currency.is_native());
//! ```
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐
//! │   Fetcher     │  provider + cache -> Token, Pool, PoolSlot
//! └──────┬───────┘
//!        ▼
//! ┌──────────────┐
//! │    Pools      │  Pool quotes over virtual reserves, PoolSlot grouping
//! └──────┬───────┘
//!        ▼
//! ┌──────────────┐
//! │   Routing     │  Route -> Trade, BestTradeSearch ranking
//! └──────┬───────┘
//!        ▼
//! ┌──────────────┐
//! │    Router     │  Trade + SwapCallOptions -> SwapParameters
//! └──────────────┘
//! ```
//!
//! # Module Guide
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`domain`] | `uniswap-sdk-core` tokens, currencies and amounts; `alloy-primitives` addresses |
//! | [`math`] | Integer rounding helpers; re-exports the sdk's exact rationals |
//! | [`pools`] | [`Pool`](pools::Pool) math and [`PoolSlot`](pools::PoolSlot) grouping |
//! | [`routing`] | [`Route`](routing::Route), [`Trade`](routing::Trade), [`BestTradeSearch`](routing::BestTradeSearch) |
//! | [`config`] | Validated search and call-encoding options |
//! | [`router`] | [`swap_call_parameters`](router::swap_call_parameters) |
//! | `fetcher` | Async chain-data loading with an explicit cache (`fetcher` feature) |
//! | [`error`] | [`AmmError`](error::AmmError) unified error enum |
//! | [`prelude`] | Convenience re-exports for common types |

pub mod config;
pub mod domain;
pub mod error;
#[cfg(feature = "fetcher")]
pub mod fetcher;
pub mod math;
pub mod pools;
pub mod prelude;
pub mod router;
pub mod routing;
