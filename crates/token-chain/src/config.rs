//! Process configuration assembled once at startup.
//!
//! All inputs arrive through CLI flags or their environment-variable
//! equivalents and are gathered into one [`ConfigSources`] value that is
//! passed into each command handler. Accessors validate on demand so that a
//! missing or malformed input fails before any network call, and so that
//! components stay testable with synthetic configuration.
//!
//! There are deliberately no fallback values for the signing key, token
//! address, or recipient address.

use alloy::primitives::{utils::parse_units, Address, U256};

use crate::error::ChainError;
use crate::token::TOKEN_DECIMALS;

/// Initial supply in whole tokens when no override is configured.
pub const DEFAULT_INITIAL_SUPPLY: &str = "1000000";

/// Raw, unvalidated configuration inputs for one process invocation.
#[derive(Clone, Debug, Default)]
pub struct ConfigSources {
    /// JSON-RPC endpoint URL (RPC_URL).
    pub rpc_url: Option<String>,
    /// Numeric chain identifier (CHAIN_ID).
    pub chain_id: Option<u64>,
    /// Hex-encoded signing key, with or without a leading `0x` (PRIVATE_KEY).
    pub private_key: Option<String>,
    /// Deployed token contract address (TOKEN).
    pub token: Option<String>,
    /// Transfer recipient / approval spender address (RECIPIENT).
    pub recipient: Option<String>,
    /// Human-decimal initial supply override (TOKEN_INITIAL).
    pub initial_supply: Option<String>,
}

/// Validated endpoint configuration shared by every command.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NodeConfig {
    pub rpc_url: String,
    pub chain_id: u64,
}

impl ConfigSources {
    /// Endpoint and chain id. Required by every command.
    pub fn node(&self) -> Result<NodeConfig, ChainError> {
        let rpc_url = non_empty(self.rpc_url.as_deref())
            .ok_or(ChainError::MissingConfig("rpc-url"))?
            .to_string();
        let chain_id = self.chain_id.ok_or(ChainError::MissingConfig("chain-id"))?;
        Ok(NodeConfig { rpc_url, chain_id })
    }

    /// Signing key with any leading `0x` marker stripped.
    pub fn signing_key(&self) -> Result<String, ChainError> {
        let raw = non_empty(self.private_key.as_deref())
            .ok_or(ChainError::MissingConfig("private-key"))?;
        Ok(raw.strip_prefix("0x").unwrap_or(raw).to_string())
    }

    /// Deployed token contract address. Required by interact.
    pub fn token_address(&self) -> Result<Address, ChainError> {
        parse_address("token", self.token.as_deref())
    }

    /// Recipient address. Required by interact.
    pub fn recipient_address(&self) -> Result<Address, ChainError> {
        parse_address("recipient", self.recipient.as_deref())
    }

    /// Configured or default initial supply as a human-decimal string.
    pub fn initial_supply_text(&self) -> &str {
        non_empty(self.initial_supply.as_deref()).unwrap_or(DEFAULT_INITIAL_SUPPLY)
    }

    /// Initial supply scaled to the token's base units.
    pub fn initial_supply(&self) -> Result<U256, ChainError> {
        let text = self.initial_supply_text();
        let parsed =
            parse_units(text, TOKEN_DECIMALS).map_err(|err| ChainError::InvalidConfig {
                field: "initial-supply",
                reason: err.to_string(),
            })?;
        Ok(parsed.get_absolute())
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

fn parse_address(field: &'static str, value: Option<&str>) -> Result<Address, ChainError> {
    let raw = non_empty(value).ok_or(ChainError::MissingConfig(field))?;
    raw.parse::<Address>().map_err(|_| ChainError::InvalidConfig {
        field,
        reason: format!("`{raw}` is not a 20-byte hex address"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_sources() -> ConfigSources {
        ConfigSources {
            rpc_url: Some("http://127.0.0.1:8545".to_string()),
            chain_id: Some(31337),
            private_key: Some(
                "0x59c6995e998f97a5a0044966f0945389dc9e86dae88c7a8412f4603b6b78690d".to_string(),
            ),
            token: Some("0x8464135c8f25da09e49bc8782676a84730c318bc".to_string()),
            recipient: Some("0x3C44CdDdB6a900fa2b585dd299e03d12FA4293BC".to_string()),
            initial_supply: Some("250000".to_string()),
        }
    }

    #[test]
    fn node_requires_endpoint_and_chain_id() {
        let sources = ConfigSources::default();
        assert!(matches!(
            sources.node(),
            Err(ChainError::MissingConfig("rpc-url"))
        ));

        let sources = ConfigSources {
            rpc_url: Some("http://127.0.0.1:8545".to_string()),
            ..ConfigSources::default()
        };
        assert!(matches!(
            sources.node(),
            Err(ChainError::MissingConfig("chain-id"))
        ));

        let node = full_sources().node().expect("complete node config");
        assert_eq!(node.chain_id, 31337);
    }

    #[test]
    fn missing_signing_key_fails_immediately() {
        let sources = ConfigSources {
            private_key: None,
            ..full_sources()
        };
        assert!(matches!(
            sources.signing_key(),
            Err(ChainError::MissingConfig("private-key"))
        ));
    }

    #[test]
    fn blank_signing_key_counts_as_missing() {
        let sources = ConfigSources {
            private_key: Some("   ".to_string()),
            ..full_sources()
        };
        assert!(matches!(
            sources.signing_key(),
            Err(ChainError::MissingConfig("private-key"))
        ));
    }

    #[test]
    fn signing_key_strips_hex_marker() {
        let key = full_sources().signing_key().expect("key present");
        assert!(!key.starts_with("0x"));
        assert_eq!(key.len(), 64);
    }

    #[test]
    fn addresses_parse_and_reject_garbage() {
        let sources = full_sources();
        sources.token_address().expect("valid token address");
        sources.recipient_address().expect("valid recipient address");

        let sources = ConfigSources {
            token: Some("not-an-address".to_string()),
            ..full_sources()
        };
        assert!(matches!(
            sources.token_address(),
            Err(ChainError::InvalidConfig { field: "token", .. })
        ));
    }

    #[test]
    fn initial_supply_defaults_and_scales() {
        let sources = ConfigSources::default();
        assert_eq!(sources.initial_supply_text(), DEFAULT_INITIAL_SUPPLY);

        let million = sources.initial_supply().expect("default parses");
        let expected = U256::from(1_000_000u64) * U256::from(10u64).pow(U256::from(18));
        assert_eq!(million, expected);

        let sources = full_sources();
        assert_eq!(sources.initial_supply_text(), "250000");
    }

    #[test]
    fn initial_supply_rejects_non_decimal() {
        let sources = ConfigSources {
            initial_supply: Some("one million".to_string()),
            ..ConfigSources::default()
        };
        assert!(matches!(
            sources.initial_supply(),
            Err(ChainError::InvalidConfig {
                field: "initial-supply",
                ..
            })
        ));
    }
}
