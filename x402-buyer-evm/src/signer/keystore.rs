//! Signer backed by a directory of encrypted key files.
//!
//! Files follow the Web3 Secret Storage (v3) layout written by geth and
//! friends. The store indexes them by the plaintext `address` field; the
//! key itself is only decrypted for the duration of a single signature.

use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::Arc;

use alloy_primitives::{Address, Signature};
use alloy_signer::SignerSync;
use alloy_signer_local::PrivateKeySigner;
use serde::Deserialize;
use tracing::debug;

use super::{EvmSigner, Signer, SignerError, digest_from_slice};

#[derive(Deserialize)]
struct KeyFileHeader {
    address: String,
}

/// Index of the encrypted key files in one directory.
#[derive(Debug, Clone, Default)]
pub struct KeyStore {
    accounts: HashMap<Address, PathBuf>,
}

impl KeyStore {
    /// Scans `dir` for key files.
    ///
    /// Entries that are not readable v3 key files are skipped.
    ///
    /// # Errors
    ///
    /// Returns [`SignerError::KeyStoreIo`] if the directory cannot be listed.
    pub fn open(dir: impl AsRef<Path>) -> Result<Self, SignerError> {
        let mut accounts = HashMap::new();
        for entry in std::fs::read_dir(dir.as_ref())? {
            let path = entry?.path();
            if !path.is_file() {
                continue;
            }
            match read_address(&path) {
                Some(address) => {
                    accounts.insert(address, path);
                }
                None => debug!(path = %path.display(), "skipping non key file"),
            }
        }
        Ok(Self { accounts })
    }

    /// Returns `true` if the store holds a key for `address`.
    #[must_use]
    pub fn contains(&self, address: &Address) -> bool {
        self.accounts.contains_key(address)
    }

    /// All addresses in the store.
    pub fn accounts(&self) -> impl Iterator<Item = &Address> {
        self.accounts.keys()
    }

    /// Number of indexed key files.
    #[must_use]
    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    /// Returns `true` when the store holds no key files.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }
}

fn read_address(path: &Path) -> Option<Address> {
    let contents = std::fs::read_to_string(path).ok()?;
    let header: KeyFileHeader = serde_json::from_str(&contents).ok()?;
    Address::from_str(&header.address).ok()
}

/// Signs with one account from a [`KeyStore`].
///
/// Every [`sign`](Signer::sign) call decrypts the key file on the blocking
/// thread pool and drops the plaintext key before returning, so concurrent
/// callers never share decrypted key material.
#[derive(Clone)]
pub struct KeyStoreSigner {
    address: Address,
    path: PathBuf,
    passphrase: Arc<str>,
}

impl fmt::Debug for KeyStoreSigner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyStoreSigner")
            .field("address", &self.address)
            .field("path", &self.path)
            .finish_non_exhaustive()
    }
}

impl KeyStoreSigner {
    /// Binds a signer to `address` in `store`.
    ///
    /// The passphrase is not checked until the first signature.
    ///
    /// # Errors
    ///
    /// Returns [`SignerError::AccountNotFound`] when `store` has no key file
    /// for `address`.
    pub fn new(
        store: &KeyStore,
        address: Address,
        passphrase: impl Into<Arc<str>>,
    ) -> Result<Self, SignerError> {
        let path = store
            .accounts
            .get(&address)
            .cloned()
            .ok_or(SignerError::AccountNotFound(address))?;
        Ok(Self {
            address,
            path,
            passphrase: passphrase.into(),
        })
    }
}

impl Signer for KeyStoreSigner {
    async fn sign(&self, digest: &[u8]) -> Result<Signature, SignerError> {
        let hash = digest_from_slice(digest)?;
        let path = self.path.clone();
        let passphrase = Arc::clone(&self.passphrase);
        tokio::task::spawn_blocking(move || -> Result<Signature, SignerError> {
            let key = PrivateKeySigner::decrypt_keystore(&path, passphrase.as_bytes())
                .map_err(SignerError::KeyStoreDecrypt)?;
            Ok(key.sign_hash_sync(&hash)?)
        })
        .await?
    }
}

impl EvmSigner for KeyStoreSigner {
    fn address(&self) -> Address {
        self.address
    }
}
