//! `X-Payment` header encoding and decoding.
//!
//! The header value is the standard base64 encoding of the JSON payment
//! payload.

use serde::Serialize;
use x402_buyer::encoding::Base64Bytes;
use x402_buyer::proto::PaymentPayload;

use crate::error::HeaderError;

/// Encodes a payment payload for the `X-Payment` header.
///
/// # Errors
///
/// Returns [`HeaderError::Json`] if JSON serialization fails.
pub fn encode_x_payment<T: Serialize>(payload: &PaymentPayload<T>) -> Result<String, HeaderError> {
    let json = serde_json::to_vec(payload)?;
    Ok(Base64Bytes::encode(json).to_string())
}

/// Decodes an `X-Payment` header value.
///
/// Surrounding whitespace is ignored.
///
/// # Errors
///
/// Returns [`HeaderError`] on base64 or JSON decode failure.
pub fn decode_x_payment(header_value: &str) -> Result<PaymentPayload, HeaderError> {
    let bytes = Base64Bytes::from(header_value.trim().as_bytes()).decode()?;
    Ok(serde_json::from_slice(&bytes)?)
}
