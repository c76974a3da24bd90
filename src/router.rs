//! Encoding a [`Trade`] as a call to the swap router contract.
//!
//! [`swap_call_parameters`] picks the router method for the trade's
//! direction and native-currency legs, and renders every argument the way
//! an EVM JSON-RPC client expects: amounts as minimal hex quantities and
//! addresses as `0x`-prefixed hex.

use chrono::{DateTime, Utc};
use num_bigint::BigInt;
use tracing::debug;
use uniswap_sdk_core::prelude::*;

use crate::config::{Deadline, SwapCallOptions};
use crate::domain::{Address, TradeType};
use crate::error::AmmError;
use crate::routing::Trade;

/// One positional argument of a router call.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum CallArgument {
    Value(String),
    List(Vec<String>),
}

/// A fully encoded router call.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct SwapParameters {
    /// Router method to invoke.
    pub method_name: &'static str,
    /// Arguments in the method's positional order.
    pub args: Vec<CallArgument>,
    /// Native currency to attach, as a hex quantity.
    pub value: String,
}

/// Produces the router call executing `trade` under `options`.
///
/// `now` anchors a [`Deadline::Ttl`]; an explicit
/// [`Deadline::Timestamp`] is used as given.
///
/// # Errors
///
/// - [`AmmError::Invariant`]`("ETHER_IN_OUT")` if both input and output are native.
/// - [`AmmError::Invariant`]`("TTL")` for a zero time-to-live.
/// - [`AmmError::Invariant`]`("EXACT_OUT_FOT")` for an exact-output trade
///   with fee-on-transfer support requested.
/// - [`AmmError::Overflow`] if the deadline does not fit in `u64`.
pub fn swap_call_parameters(
    trade: &Trade,
    options: &SwapCallOptions,
    now: DateTime<Utc>,
) -> Result<SwapParameters, AmmError> {
    let ether_in = trade.input_amount().currency.is_native();
    let ether_out = trade.output_amount().currency.is_native();
    if ether_in && ether_out {
        return Err(AmmError::Invariant("ETHER_IN_OUT"));
    }
    options.validate()?;

    let slippage = options.allowed_slippage();
    let amount_in = quantity_hex(&trade.maximum_amount_in(&slippage)?.quotient());
    let amount_out = quantity_hex(&trade.minimum_amount_out(&slippage)?.quotient());
    let route = trade.route();
    let pools: Vec<String> = route.pools().iter().map(|p| address_hex(p.address())).collect();
    let path: Vec<String> = route.path().iter().map(|t| address_hex(t.address())).collect();
    let to = address_hex(options.recipient());
    let deadline = deadline_hex(options.deadline(), now)?;

    let tail = [
        CallArgument::List(pools),
        CallArgument::List(path),
        CallArgument::Value(to),
        CallArgument::Value(deadline),
    ];
    let zero = quantity_hex(&BigInt::from(0));

    let (method_name, head, value) = match trade.trade_type() {
        TradeType::ExactInput => {
            let fot = options.fee_on_transfer();
            if ether_in {
                let method = if fot {
                    "swapExactETHForTokensSupportingFeeOnTransferTokens"
                } else {
                    "swapExactETHForTokens"
                };
                (method, vec![CallArgument::Value(amount_out)], amount_in)
            } else {
                let method = match (ether_out, fot) {
                    (true, true) => "swapExactTokensForETHSupportingFeeOnTransferTokens",
                    (true, false) => "swapExactTokensForETH",
                    (false, true) => "swapExactTokensForTokensSupportingFeeOnTransferTokens",
                    (false, false) => "swapExactTokensForTokens",
                };
                let head = vec![CallArgument::Value(amount_in), CallArgument::Value(amount_out)];
                (method, head, zero)
            }
        }
        TradeType::ExactOutput => {
            if options.fee_on_transfer() {
                return Err(AmmError::Invariant("EXACT_OUT_FOT"));
            }
            if ether_in {
                ("swapETHForExactTokens", vec![CallArgument::Value(amount_out)], amount_in)
            } else {
                let method = if ether_out {
                    "swapTokensForExactETH"
                } else {
                    "swapTokensForExactTokens"
                };
                let head = vec![CallArgument::Value(amount_out), CallArgument::Value(amount_in)];
                (method, head, zero)
            }
        }
    };

    debug!(method = method_name, trade_type = ?trade.trade_type(), value = %value, "encoded swap call");
    let mut args = head;
    args.extend(tail);
    Ok(SwapParameters {
        method_name,
        args,
        value,
    })
}

/// Minimal `0x` hex quantity, `0x0` for zero.
fn quantity_hex(amount: &BigInt) -> String {
    format!("{amount:#x}")
}

/// Lower-case `0x` hex, without the checksum casing of `Display`.
fn address_hex(address: Address) -> String {
    format!("0x{}", hex::encode(address.as_slice()))
}

fn deadline_hex(deadline: Deadline, now: DateTime<Utc>) -> Result<String, AmmError> {
    let seconds = match deadline {
        Deadline::Timestamp(at) => at,
        Deadline::Ttl(ttl) => u64::try_from(now.timestamp())
            .ok()
            .and_then(|now| now.checked_add(ttl))
            .ok_or(AmmError::Overflow("deadline"))?,
    };
    Ok(format!("{seconds:#x}"))
}
