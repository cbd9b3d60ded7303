//! Effective fee resolution and human-readable fee formatting.
//!
//! Fee math stays in integer wei end to end; formatting scales only for
//! display.

use alloy::primitives::U256;
use serde::Serialize;

/// Fee-rate fields gathered from a receipt and its parent transaction.
///
/// Separated from the RPC types so resolution is testable with synthetic
/// values and independent of which fields a given node populates.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct FeeSource {
    /// Rate the network reports it actually charged, when available.
    pub effective_gas_price: Option<u128>,
    /// Fee cap of a fee-market transaction.
    pub max_fee_per_gas: Option<u128>,
    /// Flat rate of a legacy transaction.
    pub gas_price: Option<u128>,
    /// Whether the transaction uses fee-market (EIP-1559 style) pricing.
    pub is_fee_market: bool,
}

/// Resolve the gas price a transaction was (or would be) charged.
///
/// Preference order: the network-reported effective rate, then the
/// transaction's own fee fields (fee cap for fee-market transactions, flat
/// gas price otherwise), then zero when nothing is available.
pub fn resolve_gas_price(source: &FeeSource) -> u128 {
    if let Some(effective) = source.effective_gas_price {
        return effective;
    }
    let fallback = if source.is_fee_market {
        source.max_fee_per_gas.or(source.gas_price)
    } else {
        source.gas_price
    };
    fallback.unwrap_or(0)
}

/// Fee paid for an included transaction: gas consumed times the rate.
pub fn fee_paid_wei(gas_used: u64, gas_price_wei: u128) -> u128 {
    (gas_used as u128).saturating_mul(gas_price_wei)
}

/// Format a wei amount as ETH with six decimal places.
pub fn format_eth(wei: u128) -> String {
    const WEI_PER_ETH: u128 = 1_000_000_000_000_000_000;
    const SCALE: u128 = 1_000_000;

    let whole = wei / WEI_PER_ETH;
    let fractional = ((wei % WEI_PER_ETH) * SCALE) / WEI_PER_ETH;

    format!("{whole}.{fractional:06} ETH")
}

/// Format a wei-per-gas rate as gwei with three decimal places.
pub fn format_gwei(wei: u128) -> String {
    const WEI_PER_GWEI: u128 = 1_000_000_000;
    const SCALE: u128 = 1_000;

    let whole = wei / WEI_PER_GWEI;
    let fractional = ((wei % WEI_PER_GWEI) * SCALE) / WEI_PER_GWEI;

    format!("{whole}.{fractional:03} gwei")
}

/// Format an 18-decimal token amount with six decimal places.
pub fn format_token_amount(amount: U256) -> String {
    let base = U256::from(10u64).pow(U256::from(18));
    let scale = U256::from(1_000_000u64);

    let whole = amount / base;
    let fractional = ((amount % base) * scale) / base;
    // fractional < 10^6 by construction
    let fractional = fractional.to::<u64>();

    format!("{whole}.{fractional:06}")
}

#[cfg(test)]
mod tests {
    use super::*;

    const GWEI: u128 = 1_000_000_000;

    #[test]
    fn effective_rate_wins_when_reported() {
        let source = FeeSource {
            effective_gas_price: Some(2 * GWEI),
            max_fee_per_gas: Some(4 * GWEI),
            gas_price: Some(9 * GWEI),
            is_fee_market: true,
        };
        assert_eq!(resolve_gas_price(&source), 2 * GWEI);
    }

    #[test]
    fn fee_market_falls_back_to_fee_cap() {
        let source = FeeSource {
            effective_gas_price: None,
            max_fee_per_gas: Some(4 * GWEI),
            gas_price: None,
            is_fee_market: true,
        };
        assert_eq!(resolve_gas_price(&source), 4 * GWEI);
    }

    #[test]
    fn legacy_falls_back_to_flat_gas_price() {
        let source = FeeSource {
            effective_gas_price: None,
            max_fee_per_gas: Some(4 * GWEI),
            gas_price: Some(7 * GWEI),
            is_fee_market: false,
        };
        assert_eq!(resolve_gas_price(&source), 7 * GWEI);
    }

    #[test]
    fn nothing_available_resolves_to_zero() {
        assert_eq!(resolve_gas_price(&FeeSource::default()), 0);
    }

    #[test]
    fn fee_is_exact_product() {
        assert_eq!(fee_paid_wei(21_000, 2 * GWEI), 42_000_000_000_000);
        assert_eq!(fee_paid_wei(0, 5 * GWEI), 0);
        assert_eq!(fee_paid_wei(21_000, 0), 0);
    }

    #[test]
    fn formats_eth_and_gwei() {
        assert_eq!(format_eth(1_000_000_000_000_000_000), "1.000000 ETH");
        assert_eq!(format_eth(42_000_000_000_000), "0.000042 ETH");
        assert_eq!(format_gwei(GWEI), "1.000 gwei");
        assert_eq!(format_gwei(2_500_000_000), "2.500 gwei");
    }

    #[test]
    fn formats_token_amounts() {
        let base = U256::from(10u64).pow(U256::from(18));
        assert_eq!(format_token_amount(U256::from(1500u64) * base), "1500.000000");
        assert_eq!(format_token_amount(base / U256::from(2u64)), "0.500000");
        assert_eq!(format_token_amount(U256::ZERO), "0.000000");
    }
}
