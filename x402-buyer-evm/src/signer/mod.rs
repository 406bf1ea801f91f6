//! Signing capability for EVM payers.
//!
//! A [`Signer`] produces a secp256k1 signature over a 32-byte digest. An
//! [`EvmSigner`] additionally reports the account address the signature
//! recovers to. Payers depend only on these traits, never on a key type.
//!
//! Two implementations ship with this crate:
//!
//! - [`LocalKeySigner`] - holds a raw private key in memory
//! - [`KeyStoreSigner`] - decrypts a Web3 Secret Storage file per signature
//!
//! Implementations must be safe to call from several in-flight requests at
//! once and must not log or persist the digest or the signature.

mod keystore;
mod local;

use std::future::Future;
use std::sync::Arc;

use alloy_primitives::{Address, B256, Signature};

pub use keystore::{KeyStore, KeyStoreSigner};
pub use local::LocalKeySigner;

/// Errors raised while constructing a signer or signing a digest.
#[derive(Debug, thiserror::Error)]
pub enum SignerError {
    /// Key material is not a 32-byte secp256k1 scalar.
    #[error("invalid secp256k1 key: expected 32 bytes, got {len}")]
    InvalidCurve {
        /// Length of the rejected key material.
        len: usize,
    },
    /// The scalar is zero or not below the curve order, so no public point exists.
    #[error("invalid secp256k1 key: scalar does not map to a curve point")]
    InvalidPoint,
    /// Key material is not valid hex.
    #[error("invalid hex key material: {0}")]
    InvalidHex(#[from] alloy_primitives::hex::FromHexError),
    /// The named environment variable is unset or not unicode.
    #[error("environment variable {0} is not set")]
    MissingEnvVar(String),
    /// The key store holds no file for the requested address.
    #[error("account {0} not found in key store")]
    AccountNotFound(Address),
    /// The digest handed to [`Signer::sign`] is not 32 bytes.
    #[error("digest must be 32 bytes, got {0}")]
    InvalidDigestLength(usize),
    /// The key store directory could not be read.
    #[error("key store I/O error: {0}")]
    KeyStoreIo(#[from] std::io::Error),
    /// The key file could not be decrypted with the passphrase.
    #[error("failed to decrypt key file: {0}")]
    KeyStoreDecrypt(#[source] alloy_signer_local::LocalSignerError),
    /// The blocking decrypt task panicked or was cancelled.
    #[error("key store task failed: {0}")]
    KeyStoreTask(#[from] tokio::task::JoinError),
    /// The underlying signer failed.
    #[error("signing failed: {0}")]
    Sign(#[from] alloy_signer::Error),
}

/// Produces signatures over 32-byte digests.
pub trait Signer: Send + Sync {
    /// Signs `digest`, which must be exactly 32 bytes.
    ///
    /// # Errors
    ///
    /// Returns [`SignerError::InvalidDigestLength`] for any other length, or
    /// a backend error when the key is unavailable.
    fn sign(&self, digest: &[u8]) -> impl Future<Output = Result<Signature, SignerError>> + Send;
}

/// A [`Signer`] bound to a single EVM account.
pub trait EvmSigner: Signer {
    /// The account address signatures recover to.
    fn address(&self) -> Address;
}

impl<T: Signer> Signer for Arc<T> {
    fn sign(&self, digest: &[u8]) -> impl Future<Output = Result<Signature, SignerError>> + Send {
        (**self).sign(digest)
    }
}

impl<T: EvmSigner> EvmSigner for Arc<T> {
    fn address(&self) -> Address {
        (**self).address()
    }
}

/// Checks the digest length without truncating or padding.
pub(crate) fn digest_from_slice(digest: &[u8]) -> Result<B256, SignerError> {
    B256::try_from(digest).map_err(|_| SignerError::InvalidDigestLength(digest.len()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_digest_length_is_exact() {
        assert!(digest_from_slice(&[0u8; 32]).is_ok());
        assert!(matches!(
            digest_from_slice(&[0u8; 31]),
            Err(SignerError::InvalidDigestLength(31))
        ));
        assert!(matches!(
            digest_from_slice(&[0u8; 33]),
            Err(SignerError::InvalidDigestLength(33))
        ));
    }
}
