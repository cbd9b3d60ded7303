//! token-chain crate
//!
//! Chain-facing layer of the token-ops toolkit: configuration, contract
//! artifact loading, signed transaction submission with explicit fee
//! parameters, bounded receipt waits, and the persisted run record shared
//! with the analyzer.

pub mod artifact;
pub mod client;
pub mod config;
pub mod error;
pub mod run_file;
pub mod scenario;
pub mod token;

pub use artifact::ContractArtifact;
pub use client::{ensure_success, ChainClient, SigningClient};
pub use config::{ConfigSources, NodeConfig};
pub use error::ChainError;
pub use run_file::RunRecord;
