//! Error types for the HTTP payment transport.

use x402_buyer::PayerError;

/// Errors raised while encoding or decoding the `X-Payment` header.
#[derive(Debug, thiserror::Error)]
pub enum HeaderError {
    /// JSON serialization/deserialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Base64 decoding failed.
    #[error("Base64 decode error: {0}")]
    Base64(#[from] base64::DecodeError),

    /// The encoded value is not a legal header value.
    #[error("invalid header value: {0}")]
    InvalidValue(#[from] http::header::InvalidHeaderValue),
}

/// Errors raised by [`X402Client`](crate::client::X402Client) while paying a
/// `402 Payment Required` response.
///
/// They reach the caller as `reqwest_middleware::Error::Middleware`; errors
/// from the wrapped transport are returned unchanged instead.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The request body could not be read into memory.
    #[error("failed to read request body: {0}")]
    ReadRequestBody(#[source] reqwest::Error),

    /// The 402 response body could not be read.
    #[error("failed to read 402 response body: {0}")]
    ReadBody(#[source] reqwest::Error),

    /// The 402 response body is not a v1 payment request.
    #[error("invalid 402 response body: {0}")]
    ParsePaymentRequired(#[source] serde_json::Error),

    /// The server listed no payment options.
    #[error("no payment methods accepted")]
    NoPaymentMethods,

    /// No payer is registered for the first accepted scheme.
    #[error("unsupported scheme: {0}")]
    UnsupportedScheme(String),

    /// The payer could not build a payment.
    #[error("failed to create payment: {0}")]
    Payment(#[from] PayerError),

    /// The payment could not be encoded as a header.
    #[error("failed to encode X-Payment header: {0}")]
    Header(#[from] HeaderError),
}
