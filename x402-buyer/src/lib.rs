#![cfg_attr(docsrs, feature(doc_auto_cfg))]

//! Core types for paying x402 `402 Payment Required` challenges.
//!
//! This crate holds the chain-agnostic half of an x402 buyer: the v1 wire
//! types a server sends and a client returns, the clock and nonce sources a
//! payment builder draws from, and the scheme-keyed [`Payer`](scheme::Payer)
//! registry an HTTP transport dispatches into.
//!
//! Chain-specific builders live in separate crates:
//!
//! - `x402-buyer-evm` signs ERC-3009 `transferWithAuthorization` payments
//! - `x402-buyer-http` wires payers into a `reqwest` middleware
//!
//! # Modules
//!
//! - [`encoding`] - Base64 wrapper used for the `X-Payment` header
//! - [`error`] - Errors raised while building a payment
//! - [`options`] - Injected clock and nonce sources
//! - [`proto`] - Wire format types
//! - [`scheme`] - Payment scheme dispatch
//! - [`timestamp`] - Unix timestamps for authorization windows

pub mod encoding;
pub mod error;
pub mod options;
pub mod proto;
pub mod scheme;
pub mod timestamp;

pub use error::PayerError;
pub use options::PayerOptions;
pub use scheme::{Payer, PayerRegistry};
