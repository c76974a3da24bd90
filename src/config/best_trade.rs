//! Bounds for best-trade route search.

use crate::error::AmmError;

/// Default maximum pools per route.
pub const DEFAULT_MAX_HOPS: u32 = 3;

/// Default size of the ranked result list.
pub const DEFAULT_MAX_NUM_RESULTS: usize = 3;

/// Limits on how much work a route search does and how much it returns.
///
/// # Validation
///
/// - `max_hops` must be at least 1.
/// - `max_num_results` is not checked here: a search with zero capacity
///   only fails once it finds a route to insert.
///
/// # Dust
///
/// `dust_threshold` (raw output units, default 0) omits exact-in routes
/// whose final output is at or below it.  Exact-out searches ignore it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BestTradeOptions {
    max_hops: u32,
    max_num_results: usize,
    dust_threshold: u128,
}

impl Default for BestTradeOptions {
    fn default() -> Self {
        Self {
            max_hops: DEFAULT_MAX_HOPS,
            max_num_results: DEFAULT_MAX_NUM_RESULTS,
            dust_threshold: 0,
        }
    }
}

impl BestTradeOptions {
    /// Creates validated options.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::Invariant`]`("MAX_HOPS")` if `max_hops` is zero.
    pub fn new(max_hops: u32, max_num_results: usize) -> Result<Self, AmmError> {
        let options = Self {
            max_hops,
            max_num_results,
            dust_threshold: 0,
        };
        options.validate()?;
        Ok(options)
    }

    /// Validates all invariants.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::Invariant`]`("MAX_HOPS")` if `max_hops` is zero.
    pub const fn validate(&self) -> Result<(), AmmError> {
        if self.max_hops == 0 {
            return Err(AmmError::Invariant("MAX_HOPS"));
        }
        Ok(())
    }

    #[must_use]
    pub const fn with_max_hops(mut self, max_hops: u32) -> Self {
        self.max_hops = max_hops;
        self
    }

    #[must_use]
    pub const fn with_max_num_results(mut self, max_num_results: usize) -> Self {
        self.max_num_results = max_num_results;
        self
    }

    #[must_use]
    pub const fn with_dust_threshold(mut self, dust_threshold: u128) -> Self {
        self.dust_threshold = dust_threshold;
        self
    }

    #[must_use]
    pub const fn max_hops(&self) -> u32 {
        self.max_hops
    }

    #[must_use]
    pub const fn max_num_results(&self) -> usize {
        self.max_num_results
    }

    /// Exact-in outputs at or below this many raw units are omitted.
    #[must_use]
    pub const fn dust_threshold(&self) -> u128 {
        self.dust_threshold
    }
}
