//! EIP-712 digest construction for `TransferWithAuthorization`.

use alloy_primitives::{Address, B256, keccak256};
use alloy_sol_types::{Eip712Domain, SolStruct, eip712_domain};

use super::types::TransferWithAuthorization;

/// Length of the `0x19 0x01 ‖ domainSeparator ‖ structHash` pre-image.
pub const PREIMAGE_LEN: usize = 66;

/// Builds the EIP-712 domain of an ERC-3009 token.
#[must_use]
pub fn token_domain(
    name: String,
    version: String,
    chain_id: u64,
    verifying_contract: Address,
) -> Eip712Domain {
    eip712_domain! {
        name: name,
        version: version,
        chain_id: chain_id,
        verifying_contract: verifying_contract,
    }
}

/// A signing digest together with the bytes it hashes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypedDataDigest {
    /// `keccak256(preimage)`, the value that gets signed.
    pub hash: B256,
    /// `0x19 0x01 ‖ domainSeparator ‖ structHash`.
    pub preimage: [u8; PREIMAGE_LEN],
}

impl TypedDataDigest {
    /// Hashes `message` under `domain`.
    #[must_use]
    pub fn new(domain: &Eip712Domain, message: &TransferWithAuthorization) -> Self {
        let mut preimage = [0u8; PREIMAGE_LEN];
        preimage[0] = 0x19;
        preimage[1] = 0x01;
        preimage[2..34].copy_from_slice(domain.separator().as_slice());
        preimage[34..].copy_from_slice(message.eip712_hash_struct().as_slice());
        Self {
            hash: keccak256(preimage),
            preimage,
        }
    }
}
