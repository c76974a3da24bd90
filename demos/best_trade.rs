//! Best-trade search example.
//!
//! Builds three pairs over USDC, DAI and WETH (the USDC/WETH pair with two
//! pools at different amplifications), ranks every route for an exact-input
//! and an exact-output trade, and prints their slippage bounds.
//!
//! # Run
//!
//! ```bash
//! RUST_LOG=ampswap=debug cargo run --example best_trade
//! ```

use ampswap::prelude::*;
use num_bigint::BigInt;
use tracing_subscriber::EnvFilter;

const FEE: u128 = 3_000_000_000_000_000; // 0.30%

/// `whole` tokens in smallest units.
fn units(token: &Token, whole: u64) -> BigInt {
    BigInt::from(whole) * BigInt::from(10u32).pow(u32::from(token.decimals()))
}

/// Price impact in basis points, rounded down.
fn bps(percent: &Percent) -> BigInt {
    &percent.numerator * 10_000 / &percent.denominator
}

fn pool(
    address: u8,
    a: &Token,
    ra: BigInt,
    b: &Token,
    rb: BigInt,
    amp_bps: u128,
) -> Result<Pool> {
    let scale = |r: &BigInt| r * amp_bps / 10_000u32;
    Pool::new(
        Address::with_last_byte(address),
        token_amount(a.clone(), ra.clone())?,
        token_amount(b.clone(), rb.clone())?,
        token_amount(a.clone(), scale(&ra))?,
        token_amount(b.clone(), scale(&rb))?,
        FEE,
        amp_bps,
    )
}

fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    // ── 1. Tokens ───────────────────────────────────────────────────────
    let usdc = erc20(1, "0xa0b86991c6218b36c1d19d4a2e9eb0ce3606eb48".parse()?, 6);
    let dai = erc20(1, "0x6b175474e89094c44da98b954eedeac495271d0f".parse()?, 18);
    let weth = native(1).wrapped().clone();

    // ── 2. Pools grouped per pair ───────────────────────────────────────
    let slots = vec![
        PoolSlot::new(vec![
            pool(0xa1, &usdc, units(&usdc, 2_000_000), &weth, units(&weth, 1_000), 10_000)?,
            pool(0xa2, &usdc, units(&usdc, 500_000), &weth, units(&weth, 250), 40_000)?,
        ])?,
        PoolSlot::new(vec![pool(
            0xa3,
            &usdc,
            units(&usdc, 5_000_000),
            &dai,
            units(&dai, 5_000_000),
            200_000,
        )?])?,
        PoolSlot::new(vec![pool(
            0xa4,
            &dai,
            units(&dai, 4_000_000),
            &weth,
            units(&weth, 2_000),
            10_000,
        )?])?,
    ];
    let search = BestTradeSearch::new(&slots, BestTradeOptions::default())?;
    let tolerance = Percent::new(50, 10_000);

    // ── 3. Sell exactly 10 000 USDC for WETH ────────────────────────────
    let amount_in = currency_amount(usdc.clone(), units(&usdc, 10_000))?;
    println!("=== Exact input: 10 000 USDC -> WETH ===");
    for (rank, trade) in search.exact_in(&amount_in, &weth.clone().into())?.iter().enumerate() {
        println!(
            "#{rank} hops={} out={} min_out={} impact={}bps",
            trade.route().pools().len(),
            trade.output_amount().quotient(),
            trade.minimum_amount_out(&tolerance)?.quotient(),
            bps(trade.price_impact()),
        );
    }

    // ── 4. Buy exactly 5 WETH with USDC ─────────────────────────────────
    let amount_out = currency_amount(weth.clone(), units(&weth, 5))?;
    println!("\n=== Exact output: USDC -> 5 WETH ===");
    for (rank, trade) in search.exact_out(&usdc.into(), &amount_out)?.iter().enumerate() {
        println!(
            "#{rank} hops={} in={} max_in={} impact={}bps",
            trade.route().pools().len(),
            trade.input_amount().quotient(),
            trade.maximum_amount_in(&tolerance)?.quotient(),
            bps(trade.price_impact()),
        );
    }

    Ok(())
}
