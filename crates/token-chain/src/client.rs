//! Alloy RPC clients for driving the token contract.
//!
//! Two clients mirror the read/write split of the JSON-RPC surface: a
//! [`ChainClient`] for receipts, transactions, and `eth_call` reads, and a
//! [`SigningClient`] that submits wallet-signed transactions. Nonce, gas,
//! and chain id are filled by the provider's recommended fillers; fee
//! parameters are always set explicitly by the caller.

use std::time::Duration;

use alloy::network::{Ethereum, EthereumWallet, TransactionBuilder};
use alloy::primitives::{Address, B256, U256};
use alloy::providers::fillers::{
    BlobGasFiller, ChainIdFiller, FillProvider, GasFiller, JoinFill, NonceFiller, WalletFiller,
};
use alloy::providers::{Identity, Provider, ProviderBuilder, RootProvider};
use alloy::rpc::types::eth::{Transaction, TransactionReceipt, TransactionRequest};
use alloy::signers::local::PrivateKeySigner;
use alloy::sol_types::SolCall;

use crate::config::NodeConfig;
use crate::error::ChainError;
use crate::scenario::FeeTier;
use crate::token::IErc20;

type DefaultFillers =
    JoinFill<Identity, JoinFill<GasFiller, JoinFill<BlobGasFiller, JoinFill<NonceFiller, ChainIdFiller>>>>;

type ReadProvider = FillProvider<DefaultFillers, RootProvider<Ethereum>>;

type WalletProvider = FillProvider<
    JoinFill<DefaultFillers, WalletFiller<EthereumWallet>>,
    RootProvider<Ethereum>,
>;

/// Interval between receipt polls while waiting for inclusion.
const POLL_INTERVAL: Duration = Duration::from_secs(1);

/// Read-only JSON-RPC client.
pub struct ChainClient {
    provider: ReadProvider,
}

impl ChainClient {
    /// Connect to the node, probe connectivity, and verify the chain id.
    ///
    /// # Errors
    /// Returns `InvalidConfig` if the URL does not parse or the node reports
    /// a different chain id than configured, `Network` if the probe fails.
    pub async fn connect(node: &NodeConfig) -> Result<Self, ChainError> {
        let url = node
            .rpc_url
            .parse()
            .map_err(|err| ChainError::InvalidConfig {
                field: "rpc-url",
                reason: format!("{err}"),
            })?;
        let provider = ProviderBuilder::new().on_http(url);

        let reported = provider
            .get_chain_id()
            .await
            .map_err(ChainError::network)?;
        if reported != node.chain_id {
            return Err(ChainError::InvalidConfig {
                field: "chain-id",
                reason: format!("node at {} reports chain id {reported}", node.rpc_url),
            });
        }

        let latest = provider
            .get_block_number()
            .await
            .map_err(ChainError::network)?;
        tracing::debug!(
            rpc_url = %node.rpc_url,
            chain_id = reported,
            latest_block = latest,
            "RPC connection established"
        );

        Ok(Self { provider })
    }

    /// Poll for a receipt until it appears or `timeout` expires.
    ///
    /// The wait is deliberately bounded: a stalled network surfaces as
    /// [`ChainError::WaitTimeout`] instead of hanging the process.
    pub async fn wait_for_receipt(
        &self,
        hash: B256,
        timeout: Duration,
    ) -> Result<TransactionReceipt, ChainError> {
        let started = tokio::time::Instant::now();
        loop {
            match self.provider.get_transaction_receipt(hash).await {
                Ok(Some(receipt)) => return Ok(receipt),
                Ok(None) => {}
                Err(err) => return Err(ChainError::network(err)),
            }
            if started.elapsed() >= timeout {
                return Err(ChainError::WaitTimeout { hash, timeout });
            }
            tokio::time::sleep(POLL_INTERVAL).await;
        }
    }

    /// Fetch a receipt that is already expected to exist.
    ///
    /// # Errors
    /// `UnknownTransaction` if the node has no receipt for `hash`.
    pub async fn receipt(&self, hash: B256) -> Result<TransactionReceipt, ChainError> {
        self.provider
            .get_transaction_receipt(hash)
            .await
            .map_err(ChainError::network)?
            .ok_or(ChainError::UnknownTransaction(hash))
    }

    /// Fetch the original transaction body for a recorded hash.
    pub async fn transaction(&self, hash: B256) -> Result<Transaction, ChainError> {
        self.provider
            .get_transaction_by_hash(hash)
            .await
            .map_err(ChainError::network)?
            .ok_or(ChainError::UnknownTransaction(hash))
    }

    /// `balanceOf(owner)` via read-only `eth_call`.
    pub async fn balance_of(&self, token: Address, owner: Address) -> Result<U256, ChainError> {
        let calldata = IErc20::balanceOfCall { account: owner }.abi_encode();
        let raw = self.call(token, calldata).await?;
        let decoded = IErc20::balanceOfCall::abi_decode_returns(&raw, true)
            .map_err(|err| ChainError::Network(format!("malformed balanceOf response: {err}")))?;
        Ok(decoded._0)
    }

    /// `allowance(owner, spender)` via read-only `eth_call`.
    pub async fn allowance(
        &self,
        token: Address,
        owner: Address,
        spender: Address,
    ) -> Result<U256, ChainError> {
        let calldata = IErc20::allowanceCall { owner, spender }.abi_encode();
        let raw = self.call(token, calldata).await?;
        let decoded = IErc20::allowanceCall::abi_decode_returns(&raw, true)
            .map_err(|err| ChainError::Network(format!("malformed allowance response: {err}")))?;
        Ok(decoded._0)
    }

    async fn call(&self, to: Address, calldata: Vec<u8>) -> Result<alloy::primitives::Bytes, ChainError> {
        let request = TransactionRequest::default().with_to(to).with_input(calldata);
        self.provider
            .call(request)
            .await
            .map_err(ChainError::network)
    }
}

/// Wallet-backed client that signs and submits transactions.
pub struct SigningClient {
    provider: WalletProvider,
    sender: Address,
}

impl SigningClient {
    /// Build a signing client from a hex private key (no `0x` prefix).
    ///
    /// Construction is purely local; nothing touches the network until a
    /// transaction is submitted.
    pub fn connect(node: &NodeConfig, key_hex: &str) -> Result<Self, ChainError> {
        let signer: PrivateKeySigner =
            key_hex.parse().map_err(|_| ChainError::InvalidConfig {
                field: "private-key",
                reason: "not a valid secp256k1 private key".to_string(),
            })?;
        let sender = signer.address();
        let wallet = EthereumWallet::from(signer);

        let url = node
            .rpc_url
            .parse()
            .map_err(|err| ChainError::InvalidConfig {
                field: "rpc-url",
                reason: format!("{err}"),
            })?;
        let provider = ProviderBuilder::new().wallet(wallet).on_http(url);

        Ok(Self { provider, sender })
    }

    /// Address derived from the signing key.
    pub fn sender(&self) -> Address {
        self.sender
    }

    /// Submit a contract-creation transaction. Returns the pending hash.
    pub async fn deploy(&self, deploy_code: Vec<u8>) -> Result<B256, ChainError> {
        let request = TransactionRequest::default().with_deploy_code(deploy_code);
        self.send(request).await
    }

    /// Submit a token call with explicit EIP-1559 fee parameters.
    pub async fn token_call(
        &self,
        token: Address,
        calldata: Vec<u8>,
        fees: FeeTier,
    ) -> Result<B256, ChainError> {
        let request = TransactionRequest::default()
            .with_to(token)
            .with_input(calldata)
            .with_max_priority_fee_per_gas(fees.priority_fee_wei)
            .with_max_fee_per_gas(fees.max_fee_wei);
        self.send(request).await
    }

    async fn send(&self, request: TransactionRequest) -> Result<B256, ChainError> {
        let pending = self
            .provider
            .send_transaction(request)
            .await
            .map_err(ChainError::network)?;
        let hash = *pending.tx_hash();
        tracing::debug!(tx_hash = %hash, from = %self.sender, "transaction submitted");
        Ok(hash)
    }
}

/// Fail on a receipt whose execution reverted.
///
/// Used by the deploying and interacting paths, where a revert is terminal;
/// the analyzer reports status instead of calling this.
pub fn ensure_success(receipt: TransactionReceipt) -> Result<TransactionReceipt, ChainError> {
    if receipt.status() {
        Ok(receipt)
    } else {
        Err(ChainError::Reverted {
            hash: receipt.transaction_hash,
            block: receipt.block_number.unwrap_or_default(),
        })
    }
}
