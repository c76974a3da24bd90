//! Routes, trades, and the best-trade search.
//!
//! Data flows one way: pools feed [`Route`] construction, a route plus one
//! amount becomes a [`Trade`], and [`BestTradeSearch`] builds and ranks
//! many transient routes and trades over a set of [`PoolSlot`](crate::pools::PoolSlot)s.

mod best_trade;
mod route;
mod trade;

pub use best_trade::BestTradeSearch;
pub use route::Route;
pub use trade::{input_output_comparator, trade_comparator, Trade};
