//! Options for encoding a trade as a router call.

use uniswap_sdk_core::prelude::Percent;

use crate::domain::Address;
use crate::error::AmmError;

/// Basis points in 100%.
const BPS: u32 = 10_000;

/// When the router call stops being valid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Deadline {
    /// Seconds from the moment the call is encoded.
    Ttl(u64),
    /// Absolute unix timestamp in seconds.
    Timestamp(u64),
}

/// How [`swap_call_parameters`](crate::router::swap_call_parameters)
/// encodes a trade.
///
/// # Validation
///
/// - A [`Deadline::Ttl`] must be positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SwapCallOptions {
    recipient: Address,
    deadline: Deadline,
    allowed_slippage_bps: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    fee_on_transfer: bool,
}

impl SwapCallOptions {
    /// Creates validated options.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::Invariant`]`("TTL")` for a zero time-to-live.
    pub fn new(
        recipient: Address,
        deadline: Deadline,
        allowed_slippage_bps: u32,
    ) -> Result<Self, AmmError> {
        let options = Self {
            recipient,
            deadline,
            allowed_slippage_bps,
            fee_on_transfer: false,
        };
        options.validate()?;
        Ok(options)
    }

    /// Validates all invariants.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::Invariant`]`("TTL")` for a zero time-to-live.
    pub const fn validate(&self) -> Result<(), AmmError> {
        if let Deadline::Ttl(0) = self.deadline {
            return Err(AmmError::Invariant("TTL"));
        }
        Ok(())
    }

    /// Use the router entry points that tolerate fee-on-transfer tokens.
    #[must_use]
    pub const fn with_fee_on_transfer(mut self, fee_on_transfer: bool) -> Self {
        self.fee_on_transfer = fee_on_transfer;
        self
    }

    #[must_use]
    pub const fn recipient(&self) -> Address {
        self.recipient
    }

    #[must_use]
    pub const fn deadline(&self) -> Deadline {
        self.deadline
    }

    #[must_use]
    pub const fn fee_on_transfer(&self) -> bool {
        self.fee_on_transfer
    }

    #[must_use]
    pub const fn allowed_slippage_bps(&self) -> u32 {
        self.allowed_slippage_bps
    }

    /// Slippage tolerance applied to the trade's amounts.
    #[must_use]
    pub fn allowed_slippage(&self) -> Percent {
        Percent::new(self.allowed_slippage_bps, BPS)
    }
}
