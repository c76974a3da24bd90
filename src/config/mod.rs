//! Validated option structs for route search and call encoding.
//!
//! Each struct validates on construction and exposes `validate()` so that
//! values deserialized from a config file (with the `serde` feature) can be
//! checked before use.

mod best_trade;
mod swap_call;

pub use best_trade::{BestTradeOptions, DEFAULT_MAX_HOPS, DEFAULT_MAX_NUM_RESULTS};
pub use swap_call::{Deadline, SwapCallOptions};
