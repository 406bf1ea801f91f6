//! EVM "exact" payment scheme implementation.
//!
//! This module implements the `exact` scheme using ERC-3009
//! `transferWithAuthorization` for precise payment amounts.

mod payer;
pub mod typed_data;
pub mod types;

pub use payer::{CLOCK_SKEW, ExactEvmPayer};
pub use typed_data::TypedDataDigest;
pub use types::*;
