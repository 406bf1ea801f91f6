//! 65-byte `r ‖ s ‖ v` signature encoding and local recovery.
//!
//! Payloads carry `v` in the Ethereum convention (27 or 28). Recovery works
//! on the raw parity bit (0 or 1), so the byte is restored before use.

use alloy_primitives::{Address, B256, Signature, SignatureError, U256};

/// Length of an encoded ECDSA signature.
pub const SIGNATURE_LEN: usize = 65;

const V_OFFSET: u8 = 27;

/// Encodes `signature` as `r ‖ s ‖ v` with `v` in {27, 28}.
#[must_use]
pub fn to_rsv_bytes(signature: &Signature) -> [u8; SIGNATURE_LEN] {
    let mut out = [0u8; SIGNATURE_LEN];
    out[..32].copy_from_slice(&signature.r().to_be_bytes::<32>());
    out[32..64].copy_from_slice(&signature.s().to_be_bytes::<32>());
    out[64] = normalize_v(u8::from(signature.v()));
    out
}

/// Lifts a raw recovery byte into the 27/28 convention.
///
/// Values already at or above 27 are returned unchanged.
#[must_use]
pub const fn normalize_v(v: u8) -> u8 {
    if v < V_OFFSET { v + V_OFFSET } else { v }
}

/// Restores the raw parity bit from either convention.
///
/// # Errors
///
/// Returns [`SignatureError::InvalidParity`] for any byte other than 0, 1, 27 or 28.
pub fn denormalize_v(v: u8) -> Result<bool, SignatureError> {
    match v {
        0 | 27 => Ok(false),
        1 | 28 => Ok(true),
        other => Err(SignatureError::InvalidParity(u64::from(other))),
    }
}

/// Recovers the signing address from a digest and an encoded signature.
///
/// # Errors
///
/// Returns [`SignatureError`] when `v` is out of range or the signature does
/// not correspond to any public key.
pub fn recover_address(digest: &B256, rsv: &[u8; SIGNATURE_LEN]) -> Result<Address, SignatureError> {
    let r = U256::from_be_slice(&rsv[..32]);
    let s = U256::from_be_slice(&rsv[32..64]);
    let parity = denormalize_v(rsv[64])?;
    Signature::new(r, s, parity).recover_address_from_prehash(digest)
}
