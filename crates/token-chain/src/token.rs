//! Compile-time ERC-20 interface for the deployed token.
//!
//! The callable surface is defined with `alloy::sol!` rather than parsed
//! from the artifact's JSON ABI at runtime: selectors and event topics are
//! computed at compile time, decode results are strongly typed, and the
//! interface is reviewable in source. The artifact file is consulted only
//! for deployment bytecode.

use alloy::primitives::U256;
use alloy::sol;

/// Decimal places of the token. Matches the contract's fixed `decimals()`.
pub const TOKEN_DECIMALS: u8 = 18;

sol! {
    /// The ERC-20 surface this toolkit drives and observes. The deployed
    /// contract may expose more; anything outside this interface is ignored.
    interface IErc20 {
        event Transfer(address indexed from, address indexed to, uint256 value);
        event Approval(address indexed owner, address indexed spender, uint256 value);

        function balanceOf(address account) external view returns (uint256);
        function transfer(address to, uint256 amount) external returns (bool);
        function approve(address spender, uint256 amount) external returns (bool);
        function allowance(address owner, address spender) external view returns (uint256);
    }
}

/// Scale a whole-token count to base units.
pub fn whole_tokens(count: u64) -> U256 {
    U256::from(count) * U256::from(10u64).pow(U256::from(TOKEN_DECIMALS))
}
