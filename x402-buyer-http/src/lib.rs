#![cfg_attr(docsrs, feature(doc_auto_cfg))]

//! Reqwest middleware that pays [x402](https://www.x402.org) challenges.
//!
//! A server that wants payment answers `402 Payment Required` with a JSON
//! list of acceptable payment options. [`X402Client`] intercepts that
//! response, builds a signed payment for the first option with the payer
//! registered for its scheme, and repeats the request once with an
//! `X-Payment` header. Every other response passes through untouched.
//!
//! # Modules
//!
//! - [`client`] - The middleware and the reqwest builder extension
//! - [`constants`] - Header names and the trigger status
//! - [`headers`] - `X-Payment` encoding and decoding
//! - [`error`] - Transport error types
//!
//! # Feature Flags
//!
//! - `evm` - Adds `client_for_signer` for the common single-signer setup

pub mod client;
pub mod constants;
pub mod error;
pub mod headers;

#[cfg(feature = "evm")]
pub use client::client_for_signer;
pub use client::{ReqwestWithPayments, ReqwestWithPaymentsBuild, X402Client};
pub use error::{ClientError, HeaderError};
pub use headers::{decode_x_payment, encode_x_payment};
