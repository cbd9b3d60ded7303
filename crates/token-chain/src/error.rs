//! Error taxonomy for chain operations.
//!
//! Every variant is fatal to the process that raises it except where the
//! caller is only observing execution: the analyzer reports a reverted
//! transaction instead of failing on it.

use std::time::Duration;

use alloy::primitives::B256;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ChainError {
    /// A required configuration input was not provided. Raised before any
    /// network call is attempted.
    #[error("missing required configuration: {0}")]
    MissingConfig(&'static str),

    /// A configuration input was provided but could not be used.
    #[error("invalid {field}: {reason}")]
    InvalidConfig { field: &'static str, reason: String },

    /// The RPC endpoint was unreachable or returned a transport-level error.
    /// There is no automatic retry anywhere in this toolkit.
    #[error("network error: {0}")]
    Network(String),

    /// A submitted transaction was included but marked failed.
    #[error("transaction {hash} reverted in block {block}")]
    Reverted { hash: B256, block: u64 },

    /// The bounded wait for inclusion expired before a receipt appeared.
    #[error("timed out after {timeout:?} waiting for transaction {hash} to be mined")]
    WaitTimeout { hash: B256, timeout: Duration },

    /// The node has no receipt or transaction body for a recorded hash.
    #[error("no transaction known for hash {0}")]
    UnknownTransaction(B256),
}

impl ChainError {
    pub(crate) fn network(err: impl std::fmt::Display) -> Self {
        Self::Network(err.to_string())
    }
}
