//! token-analysis crate
//!
//! Receipt-side analytics for the token-ops toolkit: effective fee
//! resolution and fee math, best-effort token event decoding, mined-order
//! derivation, and the per-transaction report assembled by the analyzer.

pub mod events;
pub mod fees;
pub mod ordering;
pub mod report;

pub use events::{decode_token_event, TokenEvent};
pub use fees::{fee_paid_wei, resolve_gas_price, FeeSource};
pub use ordering::{sort_by_inclusion, MinedTx};
pub use report::TxReport;
