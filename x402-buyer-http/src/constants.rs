//! HTTP-specific constants for the x402 v1 protocol.

use http::StatusCode;

/// Request header carrying the base64 JSON payment payload (client → server).
pub const X_PAYMENT: &str = "x-payment";

/// The only status that triggers a payment.
pub const PAYMENT_REQUIRED: StatusCode = StatusCode::PAYMENT_REQUIRED;
