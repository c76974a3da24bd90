//! Unified error types for the ampswap library.
//!
//! All fallible operations across the crate return [`AmmError`] as their
//! error type.  Errors fall into two tiers:
//!
//! - **Quote failures** ([`AmmError::InsufficientReserves`],
//!   [`AmmError::InsufficientInputAmount`]) are expected outcomes of pricing
//!   an amount against a pool.  Route search treats them as "this pool is
//!   not viable" and moves on.
//! - **Everything else** signals API misuse or an arithmetic limit and must
//!   propagate to the caller unchanged.  [`AmmError::Invariant`] carries a
//!   short upper-case tag naming the violated precondition.

use thiserror::Error;
use uniswap_sdk_core::error::Error as CoreError;

/// Errors produced by pool math, routing, encoding and data fetching.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AmmError {
    /// A reserve is empty, or the requested output would drain the real reserve.
    #[error("insufficient reserves")]
    InsufficientReserves,

    /// The input is too small to produce any output, or a deposit mints no liquidity.
    #[error("insufficient input amount")]
    InsufficientInputAmount,

    /// A precondition of the API was violated.
    #[error("invariant failed: {0}")]
    Invariant(&'static str),

    /// An intermediate or final value does not fit its target type.
    #[error("arithmetic overflow: {0}")]
    Overflow(&'static str),

    /// A division had a zero denominator.
    #[error("division by zero")]
    DivisionByZero,

    /// A precision parameter (decimals, fee) is out of range.
    #[error("invalid precision: {0}")]
    InvalidPrecision(&'static str),

    /// A currency, amount or price constructor rejected its arguments.
    #[error("sdk error: {0}")]
    Core(String),

    /// The chain-data provider failed.
    #[error("provider error: {0}")]
    Provider(String),
}

impl AmmError {
    /// Returns `true` for the two recoverable quote failures.
    #[must_use]
    pub const fn is_quote_failure(&self) -> bool {
        matches!(self, Self::InsufficientReserves | Self::InsufficientInputAmount)
    }
}

impl From<CoreError> for AmmError {
    fn from(err: CoreError) -> Self {
        Self::Core(err.to_string())
    }
}

/// Crate-wide result alias.
pub type Result<T> = core::result::Result<T, AmmError>;
