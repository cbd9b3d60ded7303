//! Per-transaction analysis record.

use alloy::primitives::B256;
use serde::Serialize;

use crate::events::TokenEvent;
use crate::fees::{fee_paid_wei, resolve_gas_price, FeeSource};
use crate::ordering::MinedTx;

/// Everything the analyzer reports about one recorded transaction.
#[derive(Clone, Debug, Serialize)]
pub struct TxReport {
    pub hash: B256,
    pub block_number: u64,
    pub tx_index: u64,
    pub success: bool,
    pub gas_used: u64,
    /// Gas price resolved per the preference order in [`crate::fees`].
    pub gas_price_wei: u128,
    /// `gas_used * gas_price_wei`, exactly.
    pub fee_wei: u128,
    pub events: Vec<TokenEvent>,
}

impl TxReport {
    pub fn new(
        hash: B256,
        block_number: u64,
        tx_index: u64,
        success: bool,
        gas_used: u64,
        source: FeeSource,
        events: Vec<TokenEvent>,
    ) -> Self {
        let gas_price_wei = resolve_gas_price(&source);
        Self {
            hash,
            block_number,
            tx_index,
            success,
            gas_used,
            gas_price_wei,
            fee_wei: fee_paid_wei(gas_used, gas_price_wei),
            events,
        }
    }

    pub fn status_label(&self) -> &'static str {
        if self.success {
            "success"
        } else {
            "reverted"
        }
    }

    /// Inclusion coordinates for mined-order sorting.
    pub fn mined_position(&self) -> MinedTx {
        MinedTx {
            hash: self.hash,
            block_number: self.block_number,
            tx_index: self.tx_index,
        }
    }
}
