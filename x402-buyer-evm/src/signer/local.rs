//! In-memory private key signer.

use std::fmt;

use alloy_primitives::{Address, B256, Signature, hex};
use alloy_signer::SignerSync;
use alloy_signer_local::PrivateKeySigner;

use super::{EvmSigner, Signer, SignerError, digest_from_slice};

/// Signs with a secp256k1 private key held in memory.
///
/// The key is validated once at construction: it must be 32 bytes and a
/// non-zero scalar below the curve order. It is never exposed afterwards,
/// and [`Debug`](fmt::Debug) prints only the address.
#[derive(Clone)]
pub struct LocalKeySigner {
    inner: PrivateKeySigner,
}

impl fmt::Debug for LocalKeySigner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LocalKeySigner")
            .field("address", &self.address())
            .finish_non_exhaustive()
    }
}

impl LocalKeySigner {
    /// Builds a signer from raw key bytes.
    ///
    /// # Errors
    ///
    /// Returns [`SignerError::InvalidCurve`] when `bytes` is not 32 bytes long
    /// and [`SignerError::InvalidPoint`] when the scalar is zero or not below
    /// the secp256k1 order.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, SignerError> {
        let key = B256::try_from(bytes).map_err(|_| SignerError::InvalidCurve { len: bytes.len() })?;
        let inner = PrivateKeySigner::from_bytes(&key).map_err(|_| SignerError::InvalidPoint)?;
        Ok(Self { inner })
    }

    /// Builds a signer from hex key material, with or without a `0x` prefix.
    ///
    /// # Errors
    ///
    /// Returns [`SignerError::InvalidHex`] for malformed hex, otherwise the
    /// same errors as [`LocalKeySigner::from_bytes`].
    pub fn from_hex(key: &str) -> Result<Self, SignerError> {
        let bytes = hex::decode(key.trim())?;
        Self::from_bytes(&bytes)
    }

    /// Builds a signer from hex key material stored in the environment.
    ///
    /// # Errors
    ///
    /// Returns [`SignerError::MissingEnvVar`] when `name` is unset or blank,
    /// otherwise the same errors as [`LocalKeySigner::from_hex`].
    pub fn from_env(name: &str) -> Result<Self, SignerError> {
        Self::from_env_value(name, std::env::var(name).ok())
    }

    fn from_env_value(name: &str, value: Option<String>) -> Result<Self, SignerError> {
        let key = value
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| SignerError::MissingEnvVar(name.to_owned()))?;
        Self::from_hex(&key)
    }

    fn sign_prehash(&self, hash: &B256) -> Result<Signature, SignerError> {
        Ok(self.inner.sign_hash_sync(hash)?)
    }
}

impl From<PrivateKeySigner> for LocalKeySigner {
    fn from(inner: PrivateKeySigner) -> Self {
        Self { inner }
    }
}

impl Signer for LocalKeySigner {
    async fn sign(&self, digest: &[u8]) -> Result<Signature, SignerError> {
        let hash = digest_from_slice(digest)?;
        self.sign_prehash(&hash)
    }
}

impl EvmSigner for LocalKeySigner {
    fn address(&self) -> Address {
        alloy_signer::Signer::address(&self.inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::{address, b256};

    const TEST_KEY: &str = "6cfb3f917efa513636a6f8103d01426e932806cc7205c4361de4c633452e2b57";

    #[test]
    fn test_address_from_hex() {
        let signer = LocalKeySigner::from_hex(TEST_KEY).unwrap();
        assert_eq!(
            signer.address(),
            address!("0x7840586eE7C215aE14599655b7c96ce23B7A9662")
        );
        let prefixed = LocalKeySigner::from_hex(&format!("0x{TEST_KEY}")).unwrap();
        assert_eq!(prefixed.address(), signer.address());
    }

    #[test]
    fn test_rejects_wrong_length() {
        let err = LocalKeySigner::from_bytes(&[1u8; 31]).unwrap_err();
        assert!(matches!(err, SignerError::InvalidCurve { len: 31 }));
    }

    #[test]
    fn test_rejects_scalar_off_curve() {
        let err = LocalKeySigner::from_bytes(&[0xff; 32]).unwrap_err();
        assert!(matches!(err, SignerError::InvalidPoint));
        let err = LocalKeySigner::from_bytes(&[0u8; 32]).unwrap_err();
        assert!(matches!(err, SignerError::InvalidPoint));
    }

    #[test]
    fn test_rejects_bad_hex() {
        let err = LocalKeySigner::from_hex("0xnothex").unwrap_err();
        assert!(matches!(err, SignerError::InvalidHex(_)));
    }

    #[test]
    fn test_missing_env_var() {
        let err = LocalKeySigner::from_env("X402_BUYER_TEST_KEY_THAT_IS_NEVER_SET").unwrap_err();
        assert!(
            matches!(err, SignerError::MissingEnvVar(ref name) if name == "X402_BUYER_TEST_KEY_THAT_IS_NEVER_SET")
        );
    }

    #[test]
    fn test_blank_env_var_is_missing() {
        for value in ["", "  \n"] {
            let err = LocalKeySigner::from_env_value("X402_KEY", Some(value.to_owned())).unwrap_err();
            assert!(matches!(err, SignerError::MissingEnvVar(ref name) if name == "X402_KEY"));
        }
        let signer = LocalKeySigner::from_env_value("X402_KEY", Some(TEST_KEY.to_owned())).unwrap();
        assert_eq!(signer.address(), address!("0x7840586eE7C215aE14599655b7c96ce23B7A9662"));
    }

    #[test]
    fn test_debug_hides_key() {
        let signer = LocalKeySigner::from_hex(TEST_KEY).unwrap();
        let debug = format!("{signer:?}");
        assert!(!debug.contains(TEST_KEY));
        assert!(debug.contains("LocalKeySigner"));
    }

    #[tokio::test]
    async fn test_sign_known_digest() {
        let signer = LocalKeySigner::from_hex(TEST_KEY).unwrap();
        let digest = b256!("291ea3849c8018ce32bbf62d479dc3ddf6aeb48ff26ce781af4c5eaa83279a5a");
        let signature = signer.sign(digest.as_slice()).await.unwrap();
        assert_eq!(
            hex::encode(signature.as_bytes()),
            "4134c5a9c223b337acaa8085bb4553787fa159a809793f6920044766d55271b77eb01e102b9525edffcac69c31a4c1d51c7fee78bab28bd716f3bb5181ed31001b"
        );
    }

    #[tokio::test]
    async fn test_sign_rejects_short_digest() {
        let signer = LocalKeySigner::from_hex(TEST_KEY).unwrap();
        let err = signer.sign(&[0u8; 20]).await.unwrap_err();
        assert!(matches!(err, SignerError::InvalidDigestLength(20)));
    }
}
