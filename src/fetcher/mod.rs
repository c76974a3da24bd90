//! Loading tokens and pools from a chain-data provider.
//!
//! [`Fetcher`] turns raw [`ChainDataProvider`] lookups into domain values:
//! [`Token`]s with their decimals and [`Pool`]s with real and virtual
//! reserves.  Immutable lookups are memoized in an explicit
//! [`FetcherCache`] that callers own and may share between fetchers.

mod cache;
mod provider;

use std::sync::Arc;

use alloy_primitives::U256;
use tracing::{debug, trace};
use uniswap_sdk_core::prelude::*;

pub use cache::FetcherCache;
pub use provider::{ChainDataProvider, PoolSnapshot};

use crate::domain::{
    erc20, sorts_before, token_amount, Address, Token, TokenAmount, MAX_DECIMALS,
};
use crate::error::AmmError;
use crate::pools::{Pool, PoolSlot};

/// Fetches token and pool data through a provider, memoizing in a cache.
#[derive(Debug)]
pub struct Fetcher<P> {
    provider: P,
    cache: Arc<FetcherCache>,
}

impl<P: ChainDataProvider> Fetcher<P> {
    /// A fetcher with its own, freshly seeded cache.
    #[must_use]
    pub fn new(provider: P) -> Self {
        Self::with_cache(provider, Arc::new(FetcherCache::new()))
    }

    /// A fetcher sharing `cache` with other fetchers.
    #[must_use]
    pub const fn with_cache(provider: P, cache: Arc<FetcherCache>) -> Self {
        Self { provider, cache }
    }

    #[must_use]
    pub const fn provider(&self) -> &P {
        &self.provider
    }

    #[must_use]
    pub fn cache(&self) -> &FetcherCache {
        &self.cache
    }

    /// Builds the [`Token`] at `address`, asking the provider for its
    /// decimals only on a cache miss.
    ///
    /// # Errors
    ///
    /// Provider failures, or [`AmmError::InvalidPrecision`] if the token
    /// reports more than 18 decimals.
    pub async fn fetch_token_data(&self, chain_id: u64, address: Address) -> Result<Token, AmmError> {
        if let Some(decimals) = self.cache.decimals(chain_id, address) {
            trace!(chain_id, token = %address, "decimals cache hit");
            return Ok(erc20(chain_id, address, decimals));
        }
        debug!(chain_id, token = %address, "decimals cache miss");
        let decimals = self.provider.token_decimals(chain_id, address).await?;
        if decimals > MAX_DECIMALS {
            return Err(AmmError::InvalidPrecision("decimals"));
        }
        self.cache.insert_decimals(chain_id, address, decimals);
        Ok(erc20(chain_id, address, decimals))
    }

    /// Lists the pools `factory` has deployed for the pair.
    ///
    /// The argument order does not matter; the lookup is keyed by the
    /// sorted pair.
    ///
    /// # Errors
    ///
    /// [`AmmError::Invariant`]`("CHAIN_IDS")` or `("ADDRESSES")` for an
    /// invalid pair, or a provider failure.
    pub async fn fetch_pool_addresses(
        &self,
        token_a: &Token,
        token_b: &Token,
        factory: Address,
    ) -> Result<Arc<[Address]>, AmmError> {
        let (token0, token1) = sorted(token_a, token_b)?;
        let chain_id = token0.chain_id();
        if let Some(pools) = self.cache.pool_addresses(chain_id, token0.address(), token1.address()) {
            trace!(chain_id, count = pools.len(), "pool addresses cache hit");
            return Ok(pools);
        }
        let pools: Arc<[Address]> = self
            .provider
            .pool_addresses(chain_id, factory, token0.address(), token1.address())
            .await?
            .into();
        debug!(
            chain_id,
            token0 = %token0.address(),
            token1 = %token1.address(),
            count = pools.len(),
            "pool addresses fetched"
        );
        self.cache.insert_pool_addresses(
            chain_id,
            token0.address(),
            token1.address(),
            Arc::clone(&pools),
        );
        Ok(pools)
    }

    /// Loads a current snapshot of every pool for the pair.
    ///
    /// Reserves are always read fresh.  An empty result means the factory
    /// lists no pool for the pair.
    ///
    /// # Errors
    ///
    /// As [`Fetcher::fetch_pool_addresses`], plus [`AmmError::Invariant`]`("FEE")`
    /// if a pool reports a fee at or above precision.
    pub async fn fetch_pool_data(
        &self,
        token_a: &Token,
        token_b: &Token,
        factory: Address,
    ) -> Result<Vec<Pool>, AmmError> {
        let addresses = self.fetch_pool_addresses(token_a, token_b, factory).await?;
        let (token0, token1) = sorted(token_a, token_b)?;
        let mut pools = Vec::with_capacity(addresses.len());
        for &address in addresses.iter() {
            let snapshot = self.provider.trade_info(token0.chain_id(), address).await?;
            trace!(pool = %address, ?snapshot, "trade info");
            let amount0 = |word| reserve(token0, word);
            let amount1 = |word| reserve(token1, word);
            pools.push(Pool::new(
                address,
                amount0(snapshot.reserve0)?,
                amount1(snapshot.reserve1)?,
                amount0(snapshot.virtual_reserve0)?,
                amount1(snapshot.virtual_reserve1)?,
                snapshot.fee_in_precision,
                snapshot.amp_bps,
            )?);
        }
        Ok(pools)
    }

    /// Loads the pair's pools as a [`PoolSlot`], or `None` if there are none.
    ///
    /// # Errors
    ///
    /// As [`Fetcher::fetch_pool_data`].
    pub async fn fetch_pool_slot(
        &self,
        token_a: &Token,
        token_b: &Token,
        factory: Address,
    ) -> Result<Option<PoolSlot>, AmmError> {
        let pools = self.fetch_pool_data(token_a, token_b, factory).await?;
        if pools.is_empty() {
            return Ok(None);
        }
        PoolSlot::new(pools).map(Some)
    }
}

fn sorted<'a>(a: &'a Token, b: &'a Token) -> Result<(&'a Token, &'a Token), AmmError> {
    Ok(if sorts_before(a, b)? { (a, b) } else { (b, a) })
}

fn reserve(token: &Token, word: U256) -> Result<TokenAmount, AmmError> {
    token_amount(token.clone(), provider::word_to_bigint(word))
}
