//! Error types for building x402 payment payloads.

/// Type-erased error carried across the signer seam.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors raised while turning [`PaymentRequirements`](crate::proto::PaymentRequirements)
/// into a signed [`PaymentPayload`](crate::proto::PaymentPayload).
#[derive(Debug, thiserror::Error)]
pub enum PayerError {
    /// The requirements name a scheme this payer does not implement.
    #[error("unsupported scheme: {0}")]
    UnsupportedScheme(String),

    /// The requirements name a network this payer cannot resolve.
    #[error("unsupported network: {0}")]
    UnsupportedNetwork(String),

    /// The `extra` object is missing or lacks the token domain `name`/`version`.
    #[error("malformed extra: {0}")]
    MalformedExtra(String),

    /// A requirements field could not be parsed.
    #[error("invalid {field}: {reason}")]
    InvalidRequirements {
        /// Wire name of the offending field.
        field: &'static str,
        /// Why it was rejected.
        reason: String,
    },

    /// `maxTimeoutSeconds` pushes `validBefore` past the representable range.
    #[error("maxTimeoutSeconds overflows the authorization window")]
    InvalidTimeout,

    /// The signer failed to produce a signature.
    #[error("signing failed: {0}")]
    Signing(#[source] BoxError),

    /// The signature does not recover to the signer's own address.
    #[error("signature recovers to {recovered}, expected {expected}")]
    SignerMismatch {
        /// Address the signer claims.
        expected: String,
        /// Address recovered from the signature.
        recovered: String,
    },

    /// The payload could not be serialized.
    #[error("failed to serialize payment payload: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl PayerError {
    /// Shorthand for [`PayerError::InvalidRequirements`].
    pub fn invalid(field: &'static str, reason: impl ToString) -> Self {
        Self::InvalidRequirements {
            field,
            reason: reason.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_requirements_message() {
        let err = PayerError::invalid("payTo", "odd number of digits");
        assert_eq!(err.to_string(), "invalid payTo: odd number of digits");
    }

    #[test]
    fn test_signing_keeps_source() {
        let inner: BoxError = "key locked".into();
        let err = PayerError::Signing(inner);
        let source = std::error::Error::source(&err).unwrap();
        assert_eq!(source.to_string(), "key locked");
    }
}
