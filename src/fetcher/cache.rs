//! Memoization for chain data that never changes.

use std::sync::Arc;

use dashmap::DashMap;

use crate::domain::Address;

const MAINNET: u64 = 1;

/// Mainnet WBTC, whose decimals are known without a lookup.
const MAINNET_WBTC: Address = Address::new([
    0x22, 0x60, 0xfa, 0xc5, 0xe5, 0x54, 0x2a, 0x77, 0x3a, 0xa4, 0x4f, 0xbc, 0xfe, 0xdf, 0x7c, 0x19,
    0x3b, 0xc2, 0xc5, 0x99,
]);

/// Lookups shared by every [`Fetcher`](super::Fetcher) holding this cache.
///
/// Token decimals and the pool addresses a factory lists for a pair are
/// treated as immutable: entries are never refreshed or evicted for the
/// life of the cache.  Build a new cache (or call [`FetcherCache::clear`])
/// to observe newly deployed pools.  Reserves are never cached.
#[derive(Debug, Default)]
pub struct FetcherCache {
    decimals: DashMap<(u64, Address), u8>,
    pool_addresses: DashMap<(u64, Address, Address), Arc<[Address]>>,
}

impl FetcherCache {
    /// A cache pre-seeded with well-known token decimals.
    #[must_use]
    pub fn new() -> Self {
        let cache = Self::empty();
        cache.decimals.insert((MAINNET, MAINNET_WBTC), 8);
        cache
    }

    /// A cache with no entries at all.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn decimals(&self, chain_id: u64, token: Address) -> Option<u8> {
        self.decimals.get(&(chain_id, token)).map(|d| *d)
    }

    pub fn insert_decimals(&self, chain_id: u64, token: Address, decimals: u8) {
        self.decimals.insert((chain_id, token), decimals);
    }

    /// Cached pools for a pair; `token0` must sort before `token1`.
    #[must_use]
    pub fn pool_addresses(
        &self,
        chain_id: u64,
        token0: Address,
        token1: Address,
    ) -> Option<Arc<[Address]>> {
        self.pool_addresses
            .get(&(chain_id, token0, token1))
            .map(|entry| Arc::clone(entry.value()))
    }

    pub fn insert_pool_addresses(
        &self,
        chain_id: u64,
        token0: Address,
        token1: Address,
        pools: Arc<[Address]>,
    ) {
        self.pool_addresses.insert((chain_id, token0, token1), pools);
    }

    /// Drops every entry, including the seeded ones.
    pub fn clear(&self) {
        self.decimals.clear();
        self.pool_addresses.clear();
    }
}
