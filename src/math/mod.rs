//! Integer arithmetic used by pool math.
//!
//! Exact rationals ([`Fraction`], [`Percent`], [`Price`]) come from
//! `uniswap-sdk-core`; this module holds the integer side: [`div_round`]
//! and [`mul_div`] are the only divisions pool math performs, each with an
//! explicit [`Rounding`].

mod rounding;

pub use rounding::{div_round, isqrt, mul_div, unsigned};
pub use uniswap_sdk_core::prelude::{Fraction, Percent, Price, Rounding};
