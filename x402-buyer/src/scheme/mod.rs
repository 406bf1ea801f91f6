//! Payment scheme seam for x402 clients.
//!
//! A [`Payer`] turns one accepted [`PaymentRequirements`] entry into a signed
//! [`PaymentPayload`]. The HTTP layer looks payers up in a [`PayerRegistry`]
//! by the scheme name the server advertised.

mod registry;

use std::future::Future;
use std::pin::Pin;

pub use registry::*;

use crate::error::PayerError;
use crate::proto::{PaymentPayload, PaymentRequirements};

/// Boxed, `Send` future returned by object-safe async traits.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// A unit struct representing the string literal `"exact"`.
///
/// This is the canonical scheme name for exact-amount payment schemes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ExactScheme;

impl ExactScheme {
    /// The string literal value: `"exact"`.
    pub const VALUE: &'static str = "exact";
}

impl std::fmt::Display for ExactScheme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(Self::VALUE)
    }
}

impl AsRef<str> for ExactScheme {
    fn as_ref(&self) -> &str {
        Self::VALUE
    }
}

/// Builds signed payment payloads for a single scheme.
pub trait Payer: Send + Sync {
    /// The scheme name this payer answers, e.g. `"exact"`.
    fn scheme(&self) -> &str;

    /// Signs a payload satisfying `requirements`.
    ///
    /// # Errors
    ///
    /// Returns [`PayerError`] when the requirements cannot be satisfied or
    /// the signer fails.
    fn pay<'a>(
        &'a self,
        requirements: &'a PaymentRequirements,
    ) -> BoxFuture<'a, Result<PaymentPayload, PayerError>>;
}
