//! The chain-data boundary.

use alloy_primitives::U256;
use async_trait::async_trait;
use num_bigint::{BigInt, Sign};

use crate::domain::Address;
use crate::error::AmmError;

/// Reserve state reported by a pool contract, in `token0` / `token1` order.
///
/// Reserves are `uint256` words exactly as the contract returns them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolSnapshot {
    pub reserve0: U256,
    pub reserve1: U256,
    pub virtual_reserve0: U256,
    pub virtual_reserve1: U256,
    /// Swap fee over [`PRECISION`](crate::pools::PRECISION).
    pub fee_in_precision: u128,
    pub amp_bps: u128,
}

/// Widens a contract word into an arbitrary-precision raw amount.
pub(crate) fn word_to_bigint(word: U256) -> BigInt {
    BigInt::from_bytes_be(Sign::Plus, &word.to_be_bytes::<32>())
}

/// Read access to on-chain token and pool data.
///
/// Implementations wrap an RPC client or, in tests, an in-memory table.
/// Failures should be reported as [`AmmError::Provider`].
#[async_trait]
pub trait ChainDataProvider: Send + Sync {
    /// ERC-20 `decimals()` of `token`.
    async fn token_decimals(&self, chain_id: u64, token: Address) -> Result<u8, AmmError>;

    /// Pools registered by `factory` for the pair; `token0` sorts before `token1`.
    async fn pool_addresses(
        &self,
        chain_id: u64,
        factory: Address,
        token0: Address,
        token1: Address,
    ) -> Result<Vec<Address>, AmmError>;

    /// Current reserves, fee and amplification of `pool`.
    async fn trade_info(&self, chain_id: u64, pool: Address) -> Result<PoolSnapshot, AmmError>;
}
