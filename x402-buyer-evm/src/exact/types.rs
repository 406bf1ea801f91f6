//! Wire types for the EVM "exact" payment scheme.
//!
//! The payload pairs an ERC-3009 `transferWithAuthorization` message with
//! its signature. Addresses and amounts keep the exact text the server sent
//! so the buyer never rewrites what it agreed to pay.

use alloy_sol_types::sol;
use serde::{Deserialize, Serialize};
use x402_buyer::timestamp::UnixTimestamp;

pub use x402_buyer::scheme::ExactScheme;

/// Scheme-specific payload of an exact EVM payment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExactEvmPayload {
    /// `0x`-prefixed hex of the 65-byte `r ‖ s ‖ v` signature, `v` in {27, 28}.
    pub signature: String,
    /// The authorization that was signed.
    pub authorization: ExactEvmAuthorization,
}

/// The `TransferWithAuthorization` fields as they travel on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExactEvmAuthorization {
    /// Checksummed payer address.
    pub from: String,
    /// Payee address, verbatim from the requirements.
    pub to: String,
    /// Amount in the token's smallest unit, verbatim from the requirements.
    pub value: String,
    /// The authorization cannot be executed at or before this time.
    pub valid_after: UnixTimestamp,
    /// The authorization cannot be executed after this time.
    pub valid_before: UnixTimestamp,
    /// `0x`-prefixed hex of the 32-byte nonce.
    pub nonce: String,
}

impl ExactEvmAuthorization {
    /// Returns `true` if the window admits submission at `now`,
    /// i.e. `validAfter < now <= validBefore`.
    #[must_use]
    pub fn is_valid_at(&self, now: UnixTimestamp) -> bool {
        self.valid_after < now && now <= self.valid_before
    }
}

/// Token domain parameters carried in `PaymentRequirements.extra`.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct PaymentRequirementsExtra {
    /// The token name as used in the EIP-712 domain.
    pub name: String,
    /// The token version as used in the EIP-712 domain.
    pub version: String,
}

sol!(
    /// Solidity-compatible struct definition for ERC-3009 `transferWithAuthorization`.
    ///
    /// Field order and types fix the EIP-712 type hash, so they must match the
    /// token contract exactly.
    struct TransferWithAuthorization {
        address from;
        address to;
        uint256 value;
        uint256 validAfter;
        uint256 validBefore;
        bytes32 nonce;
    }
);
