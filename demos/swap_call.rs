//! Fetch, route and encode example.
//!
//! Loads pools through an in-memory [`ChainDataProvider`], finds the best
//! route for selling ETH, and encodes it as a router call.
//!
//! # Run
//!
//! ```bash
//! RUST_LOG=ampswap=debug cargo run --example swap_call
//! ```

use std::collections::HashMap;

use alloy_primitives::U256;
use ampswap::prelude::*;
use async_trait::async_trait;
use tracing_subscriber::EnvFilter;

/// Stands in for an RPC-backed provider.
struct StaticProvider {
    pools: HashMap<(Address, Address), Vec<Address>>,
    snapshots: HashMap<Address, PoolSnapshot>,
}

#[async_trait]
impl ChainDataProvider for StaticProvider {
    async fn token_decimals(&self, _chain_id: u64, _token: Address) -> Result<u8> {
        Ok(18)
    }

    async fn pool_addresses(
        &self,
        _chain_id: u64,
        _factory: Address,
        token0: Address,
        token1: Address,
    ) -> Result<Vec<Address>> {
        Ok(self.pools.get(&(token0, token1)).cloned().unwrap_or_default())
    }

    async fn trade_info(&self, _chain_id: u64, pool: Address) -> Result<PoolSnapshot> {
        self.snapshots
            .get(&pool)
            .copied()
            .ok_or_else(|| AmmError::Provider(format!("unknown pool {pool}")))
    }
}

fn snapshot(reserve0: u128, reserve1: u128, amp_bps: u128) -> PoolSnapshot {
    PoolSnapshot {
        reserve0: U256::from(reserve0),
        reserve1: U256::from(reserve1),
        virtual_reserve0: U256::from(reserve0 * amp_bps / 10_000),
        virtual_reserve1: U256::from(reserve1 * amp_bps / 10_000),
        fee_in_precision: 3_000_000_000_000_000,
        amp_bps,
    }
}

#[tokio::main]
async fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let ether = native(1);
    let weth = ether.wrapped().address();
    let dai: Address = "0x6b175474e89094c44da98b954eedeac495271d0f".parse()?;
    let factory = Address::with_last_byte(0xff);
    let pool = Address::with_last_byte(0xa1);

    let mut provider = StaticProvider {
        pools: HashMap::new(),
        snapshots: HashMap::new(),
    };
    // DAI sorts before WETH.
    provider.pools.insert((dai, weth), vec![pool]);
    provider
        .snapshots
        .insert(pool, snapshot(4_000_000 * 10u128.pow(18), 2_000 * 10u128.pow(18), 20_000));

    let fetcher = Fetcher::new(provider);
    let weth = fetcher.fetch_token_data(1, weth).await?;
    let dai = fetcher.fetch_token_data(1, dai).await?;
    let slots: Vec<PoolSlot> = fetcher.fetch_pool_slot(&weth, &dai, factory).await?.into_iter().collect();

    let search = BestTradeSearch::new(&slots, BestTradeOptions::default())?;
    let amount_in = currency_amount(ether, 10u128.pow(18))?;
    let trades = search.exact_in(&amount_in, &dai.into())?;
    let Some(best) = trades.first() else {
        println!("no route from ETH to DAI");
        return Ok(());
    };
    let impact = best.price_impact();
    println!(
        "1 ETH -> {} DAI wei (impact {}/{})",
        best.output_amount().quotient(),
        impact.numerator,
        impact.denominator
    );

    let options = SwapCallOptions::new(Address::with_last_byte(0xcc), Deadline::Ttl(1_200), 50)?;
    let params = swap_call_parameters(best, &options, chrono::Utc::now())?;
    println!("{}(", params.method_name);
    for arg in &params.args {
        match arg {
            CallArgument::Value(v) => println!("    {v},"),
            CallArgument::List(items) => println!("    [{}],", items.join(", ")),
        }
    }
    println!(") value={}", params.value);
    Ok(())
}
