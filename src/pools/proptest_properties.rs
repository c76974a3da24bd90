//! Property-based tests for pool math.
//!
//! 1. **Conservative round trip**: paying the input `get_input_amount`
//!    asks for always buys at least the requested output.
//! 2. **Invariant preservation**: `v_in × v_out` never shrinks across a swap.
//! 3. **Canonical ordering**: argument order never changes the snapshot.
//! 4. **Output monotonicity**: selling more never yields less.
//! 5. **Minting bound**: pro-rata minting never exceeds either share.

use num_bigint::{BigInt, BigUint};
use proptest::prelude::*;
use uniswap_sdk_core::prelude::*;

use crate::domain::{erc20, token_amount, Address, Token, TokenAmount};
use crate::error::AmmError;
use crate::pools::{Pool, PRECISION};

// ---------------------------------------------------------------------------
// Shared helpers
// ---------------------------------------------------------------------------

fn tok_a() -> Token {
    erc20(1, Address::with_last_byte(1), 18)
}

fn tok_b() -> Token {
    erc20(1, Address::with_last_byte(2), 18)
}

fn amt(token: Token, raw: u128) -> TokenAmount {
    let Ok(amount) = token_amount(token, raw) else {
        panic!("valid amount");
    };
    amount
}

fn make_pool(ra: u128, rb: u128, amp_bps: u128, fee: u128) -> Pool {
    // Virtual reserves scale the real ones by the amplification factor.
    let va = ra * amp_bps / 10_000;
    let vb = rb * amp_bps / 10_000;
    let Ok(pool) = Pool::new(
        Address::with_last_byte(0xaa),
        amt(tok_a(), ra),
        amt(tok_b(), rb),
        amt(tok_a(), va),
        amt(tok_b(), vb),
        fee,
        amp_bps,
    ) else {
        panic!("valid pool");
    };
    pool
}

fn reserve() -> impl Strategy<Value = u128> {
    1_000u128..1_000_000_000_000_000_000_000_000
}

fn fee() -> impl Strategy<Value = u128> {
    0u128..PRECISION / 10
}

proptest! {
    #[test]
    fn exact_out_round_trip_never_favours_trader(
        ra in reserve(),
        rb in reserve(),
        amp in 10_000u128..50_000,
        fee in fee(),
        wanted in 1u128..1_000_000_000_000_000_000_000,
    ) {
        let pool = make_pool(ra, rb, amp, fee);
        let output = amt(tok_b(), wanted);
        match pool.get_input_amount(&output) {
            Ok(required) => match pool.get_output_amount(required.amount()) {
                Ok(paid) => prop_assert!(paid.amount().quotient() >= output.quotient()),
                Err(e) => prop_assert_eq!(e, AmmError::InsufficientReserves),
            },
            Err(e) => prop_assert!(e.is_quote_failure(), "unexpected error {e:?}"),
        }
    }

    #[test]
    fn virtual_invariant_never_decreases(
        ra in reserve(),
        rb in reserve(),
        amp in 10_000u128..50_000,
        fee in fee(),
        amount in 1u128..1_000_000_000_000_000_000_000,
    ) {
        let pool = make_pool(ra, rb, amp, fee);
        match pool.get_output_amount(&amt(tok_a(), amount)) {
            Ok(quote) => {
                let (next_in, next_out) = quote.next_virtual_reserves();
                let before = pool.virtual_reserve0().quotient() * pool.virtual_reserve1().quotient();
                let after = next_in.quotient() * next_out.quotient();
                prop_assert!(after >= before);
            }
            Err(e) => prop_assert!(e.is_quote_failure(), "unexpected error {e:?}"),
        }
    }

    #[test]
    fn canonical_ordering_ignores_argument_order(
        ra in reserve(),
        rb in reserve(),
        fee in fee(),
    ) {
        let ab = make_pool(ra, rb, 10_000, fee);
        let Ok(ba) = Pool::new(
            Address::with_last_byte(0xaa),
            amt(tok_b(), rb),
            amt(tok_a(), ra),
            amt(tok_b(), rb),
            amt(tok_a(), ra),
            fee,
            10_000,
        ) else {
            panic!("valid pool");
        };
        prop_assert!(ab.token0().equals(ba.token0()));
        prop_assert!(ab.token1().equals(ba.token1()));
        prop_assert_eq!(ab.reserve0().quotient(), ba.reserve0().quotient());
        prop_assert_eq!(ab.reserve1().quotient(), ba.reserve1().quotient());
        prop_assert_eq!(ab.virtual_reserve0().quotient(), ba.virtual_reserve0().quotient());
    }

    #[test]
    fn output_is_monotonic_in_input(
        ra in reserve(),
        rb in reserve(),
        fee in fee(),
        small in 1u128..1_000_000_000_000,
        extra in 1u128..1_000_000_000_000,
    ) {
        let pool = make_pool(ra, rb, 10_000, fee);
        let out = |raw: u128| {
            pool.get_output_amount(&amt(tok_a(), raw))
                .map(|q| q.amount().quotient())
        };
        match (out(small), out(small + extra)) {
            (Ok(lo), Ok(hi)) => prop_assert!(hi >= lo),
            (Ok(_), Err(e)) => prop_assert_eq!(e, AmmError::InsufficientReserves),
            (Err(e), _) => prop_assert!(e.is_quote_failure()),
        }
    }

    #[test]
    fn minted_liquidity_bounded_by_each_share(
        ra in reserve(),
        rb in reserve(),
        supply in 1_000u128..1_000_000_000_000_000_000_000,
        da in 1u128..1_000_000_000_000_000_000,
        db in 1u128..1_000_000_000_000_000_000,
    ) {
        let pool = make_pool(ra, rb, 10_000, 0);
        let total = amt(pool.liquidity_token().clone(), supply);
        let minted = pool.get_liquidity_minted(&total, &amt(tok_a(), da), &amt(tok_b(), db));
        match minted {
            Ok(lp) => {
                let lp = lp.quotient();
                prop_assert!(lp.clone() * ra <= BigInt::from(da) * supply);
                prop_assert!(lp * rb <= BigInt::from(db) * supply);
            }
            Err(e) => prop_assert_eq!(e, AmmError::InsufficientInputAmount),
        }
    }

    #[test]
    fn quotes_above_u128_never_overflow(
        ra in reserve(),
        rb in reserve(),
        scale in 1u32..64,
        amount in 1u128..1_000_000_000_000_000_000_000,
    ) {
        // Reserves far beyond u128 still quote exactly within one EVM word.
        let shift = BigUint::from(1u8) << (64 + scale);
        let wide = |raw: u128, token: Token| {
            let Ok(a) = token_amount(token, BigInt::from(BigUint::from(raw) * &shift)) else {
                panic!("valid amount");
            };
            a
        };
        let Ok(pool) = Pool::new(
            Address::with_last_byte(0xaa),
            wide(ra, tok_a()),
            wide(rb, tok_b()),
            wide(ra, tok_a()),
            wide(rb, tok_b()),
            3_000_000_000_000_000,
            10_000,
        ) else {
            panic!("valid pool");
        };
        match pool.get_output_amount(&amt(tok_a(), amount)) {
            Ok(quote) => prop_assert!(quote.amount().quotient() > BigInt::from(0)),
            Err(e) => prop_assert!(e.is_quote_failure(), "unexpected error {e:?}"),
        }
    }
}
