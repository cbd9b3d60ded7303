//! Compiled contract artifact loading.
//!
//! Deployment consumes a Hardhat-style JSON artifact produced by an external
//! compilation step. Only the creation bytecode is used at runtime; the
//! callable interface lives in [`crate::token`] as a compile-time `sol!`
//! definition.

use std::path::{Path, PathBuf};

use alloy::hex;
use alloy::primitives::U256;
use alloy::sol_types::SolValue;
use eyre::{eyre, Context, Result};
use serde::Deserialize;

/// Deserialized view of a compiled contract artifact.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContractArtifact {
    /// Contract name as recorded by the compiler, when present.
    #[serde(default)]
    pub contract_name: String,
    /// Hex-encoded creation bytecode, `0x`-prefixed.
    pub bytecode: String,
}

impl ContractArtifact {
    /// Resolve and load the artifact for `contract_name` under `artifacts_dir`.
    ///
    /// Checks the flat layout `<dir>/<Name>.json` first, then Hardhat's
    /// nested `<dir>/contracts/<Name>.sol/<Name>.json`.
    ///
    /// # Errors
    /// Returns error if no candidate file exists or the JSON is malformed.
    pub fn load(artifacts_dir: &Path, contract_name: &str) -> Result<Self> {
        let candidates = [
            artifacts_dir.join(format!("{contract_name}.json")),
            artifacts_dir
                .join("contracts")
                .join(format!("{contract_name}.sol"))
                .join(format!("{contract_name}.json")),
        ];

        let path = candidates
            .iter()
            .find(|candidate| candidate.is_file())
            .ok_or_else(|| {
                eyre!(
                    "no artifact for contract {} under {} (looked for {})",
                    contract_name,
                    artifacts_dir.display(),
                    join_paths(&candidates)
                )
            })?;

        Self::load_file(path)
    }

    /// Load an artifact from an explicit file path.
    pub fn load_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .wrap_err_with(|| format!("failed to read artifact {}", path.display()))?;
        serde_json::from_str(&content)
            .wrap_err_with(|| format!("malformed artifact {}", path.display()))
    }

    /// Creation bytecode followed by the ABI-encoded constructor argument.
    ///
    /// The token constructor takes a single `uint256` initial supply.
    pub fn deploy_code(&self, initial_supply: U256) -> Result<Vec<u8>> {
        let raw = self.bytecode.strip_prefix("0x").unwrap_or(&self.bytecode);
        let mut code = hex::decode(raw).wrap_err("artifact bytecode is not valid hex")?;
        if code.is_empty() {
            return Err(eyre!("artifact bytecode is empty"));
        }
        code.extend_from_slice(&initial_supply.abi_encode());
        Ok(code)
    }
}

fn join_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
