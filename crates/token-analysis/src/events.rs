//! Best-effort decoding of token event logs.
//!
//! Each log is attempted against the known ERC-20 event schemas in turn;
//! the first match wins. A log matching no known signature is not an error,
//! it is simply skipped — contracts routinely emit events this toolkit does
//! not track.

use alloy::primitives::{Address, LogData, U256};
use alloy::sol_types::SolEvent;
use serde::Serialize;

use token_chain::token::IErc20;

use crate::fees::format_token_amount;

/// A decoded token event.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub enum TokenEvent {
    Transfer {
        from: Address,
        to: Address,
        value: U256,
    },
    Approval {
        owner: Address,
        spender: Address,
        value: U256,
    },
}

/// Attempt to decode a log against each known event schema in turn.
///
/// Returns `None` when the log matches neither schema.
pub fn decode_token_event(log: &LogData) -> Option<TokenEvent> {
    if let Ok(event) = IErc20::Transfer::decode_log_data(log, true) {
        return Some(TokenEvent::Transfer {
            from: event.from,
            to: event.to,
            value: event.value,
        });
    }
    if let Ok(event) = IErc20::Approval::decode_log_data(log, true) {
        return Some(TokenEvent::Approval {
            owner: event.owner,
            spender: event.spender,
            value: event.value,
        });
    }
    None
}

impl TokenEvent {
    /// One-line human-readable rendering with whole-token amounts.
    pub fn describe(&self) -> String {
        match self {
            TokenEvent::Transfer { from, to, value } => format!(
                "Transfer: {from} -> {to}, amount {}",
                format_token_amount(*value)
            ),
            TokenEvent::Approval {
                owner,
                spender,
                value,
            } => format!(
                "Approval: owner {owner} -> spender {spender}, amount {}",
                format_token_amount(*value)
            ),
        }
    }
}
