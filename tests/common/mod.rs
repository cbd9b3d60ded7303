//! Shared test helpers.
//!
//! Factory functions for synthetic addresses, hashes, and encoded token
//! event logs, so tests exercise the decoding and ordering paths without a
//! network.

#![allow(dead_code)]

use alloy::primitives::{Address, B256, LogData, U256};
use alloy::sol_types::{SolEvent, SolValue};
use token_chain::token::IErc20;

/// Deterministic test address: twenty copies of `n`.
pub fn addr(n: u8) -> Address {
    Address::repeat_byte(n)
}

/// Deterministic test hash: thirty-two copies of `n`.
pub fn hash(n: u8) -> B256 {
    B256::repeat_byte(n)
}

/// Left-pad an address into a 32-byte indexed-topic word.
pub fn topic(address: Address) -> B256 {
    B256::left_padding_from(address.as_slice())
}

/// Encoded `Transfer(from, to, value)` log as the node would emit it.
pub fn transfer_log(from: Address, to: Address, value: U256) -> LogData {
    LogData::new_unchecked(
        vec![IErc20::Transfer::SIGNATURE_HASH, topic(from), topic(to)],
        value.abi_encode().into(),
    )
}

/// Encoded `Approval(owner, spender, value)` log.
pub fn approval_log(owner: Address, spender: Address, value: U256) -> LogData {
    LogData::new_unchecked(
        vec![IErc20::Approval::SIGNATURE_HASH, topic(owner), topic(spender)],
        value.abi_encode().into(),
    )
}

/// A log with a signature this toolkit does not recognize.
pub fn unrelated_log() -> LogData {
    LogData::new_unchecked(
        vec![B256::repeat_byte(0xd7), topic(addr(0x61)), topic(addr(0x62))],
        U256::from(123).abi_encode().into(),
    )
}
