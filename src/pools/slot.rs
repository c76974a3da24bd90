//! Interchangeable pools for one token pair.

use uniswap_sdk_core::prelude::*;

use super::Pool;
use crate::domain::Token;
use crate::error::AmmError;

/// All candidate pools connecting the same two tokens, e.g. several
/// amplification or fee variants of one pair.
///
/// Route search prices an amount against every pool in a slot and keeps
/// only the best one, so a slot contributes at most one hop to a path.
#[derive(Debug, Clone)]
pub struct PoolSlot {
    pools: Vec<Pool>,
}

impl PoolSlot {
    /// Groups `pools` into a slot.
    ///
    /// # Errors
    ///
    /// - [`AmmError::Invariant`]`("PAIRS")` if `pools` is empty.
    /// - [`AmmError::Invariant`]`("INVALID_PAIR")` if the pools do not all
    ///   share the same `token0` / `token1`.
    pub fn new(pools: Vec<Pool>) -> Result<Self, AmmError> {
        let Some(first) = pools.first() else {
            return Err(AmmError::Invariant("PAIRS"));
        };
        let (t0, t1) = (first.token0(), first.token1());
        if pools
            .iter()
            .any(|p| !p.token0().equals(t0) || !p.token1().equals(t1))
        {
            return Err(AmmError::Invariant("INVALID_PAIR"));
        }
        Ok(Self { pools })
    }

    #[must_use]
    pub fn pools(&self) -> &[Pool] {
        &self.pools
    }

    /// The slot's `token0`.
    ///
    /// Construction guarantees a non-empty slot, so indexing is in bounds.
    #[must_use]
    pub fn token0(&self) -> &Token {
        self.pools[0].token0()
    }

    #[must_use]
    pub fn token1(&self) -> &Token {
        self.pools[0].token1()
    }

    #[must_use]
    pub fn involves_token(&self, token: &Token) -> bool {
        self.pools[0].involves_token(token)
    }
}

impl TryFrom<Vec<Pool>> for PoolSlot {
    type Error = AmmError;

    fn try_from(pools: Vec<Pool>) -> Result<Self, Self::Error> {
        Self::new(pools)
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::domain::{erc20, token_amount, Address};

    fn token(n: u8) -> Token {
        erc20(1, Address::with_last_byte(n), 18)
    }

    fn pool(addr: u8, a: u8, b: u8) -> Pool {
        let (Ok(ra), Ok(rb)) = (token_amount(token(a), 1000), token_amount(token(b), 1000)) else {
            panic!("valid amounts");
        };
        let Ok(p) = Pool::new(
            Address::with_last_byte(addr),
            ra.clone(),
            rb.clone(),
            ra,
            rb,
            0,
            10_000,
        ) else {
            panic!("valid pool");
        };
        p
    }

    #[test]
    fn empty_slot_rejected() {
        assert_eq!(PoolSlot::new(Vec::new()).err(), Some(AmmError::Invariant("PAIRS")));
    }

    #[test]
    fn mixed_pairs_rejected() {
        assert_eq!(
            PoolSlot::new(vec![pool(0xa0, 1, 2), pool(0xa1, 1, 3)]).err(),
            Some(AmmError::Invariant("INVALID_PAIR"))
        );
    }

    #[test]
    fn argument_order_does_not_matter() {
        let Ok(slot) = PoolSlot::new(vec![pool(0xa0, 1, 2), pool(0xa1, 2, 1)]) else {
            panic!("expected Ok");
        };
        assert_eq!(slot.pools().len(), 2);
        assert!(slot.token0().equals(&token(1)));
        assert!(slot.token1().equals(&token(2)));
        assert!(slot.involves_token(&token(2)));
        assert!(!slot.involves_token(&token(3)));
    }
}
