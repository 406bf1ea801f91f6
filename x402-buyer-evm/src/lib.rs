#![cfg_attr(docsrs, feature(doc_auto_cfg))]

//! EVM payment signing for x402 buyers.
//!
//! This crate answers x402 v1 `"exact"` payment requirements on EVM chains
//! by signing an ERC-3009 `transferWithAuthorization` as EIP-712 typed data.
//!
//! # Architecture
//!
//! - [`signer`] - The signing capability and its in-memory and key store backends
//! - [`exact`] - The `"exact"` payment builder, its wire types and digest
//! - [`signature`] - `r ‖ s ‖ v` encoding and local address recovery
//! - [`networks`] - Network names the builder can resolve to chain ids
//!
//! # Example
//!
//! ```no_run
//! use x402_buyer::PayerRegistry;
//! use x402_buyer_evm::{ExactEvmPayer, LocalKeySigner};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let signer = LocalKeySigner::from_env("WALLET_PRIVATE_KEY")?;
//! let registry = PayerRegistry::new().with(ExactEvmPayer::new(signer));
//! # let _ = registry;
//! # Ok(())
//! # }
//! ```

pub mod exact;
pub mod networks;
pub mod signature;
pub mod signer;

pub use exact::{ExactEvmPayer, TypedDataDigest};
pub use networks::chain_id_by_network_name;
pub use signer::{EvmSigner, KeyStore, KeyStoreSigner, LocalKeySigner, Signer, SignerError};
