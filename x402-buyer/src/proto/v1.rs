//! Protocol version 1 (V1) types for x402.
//!
//! V1 identifies chains by human-readable network names (e.g. `"base-sepolia"`)
//! and carries the server's requirements in the `402` response body.
//!
//! # Key Types
//!
//! - [`X402Version1`] - Version marker that serializes as `1`
//! - [`PaymentRequired`] - HTTP 402 response body
//! - [`PaymentRequirements`] - One payment option offered by the seller
//! - [`PaymentPayload`] - Signed payment authorization from the buyer

use serde::{Deserialize, Serialize};

use serde_json::value::RawValue;

/// Version marker for x402 protocol version 1.
///
/// Serializes as the integer `1` and rejects other values on deserialization.
pub type X402Version1 = super::Version<1>;

/// Convenience constant for constructing V1 protocol messages.
pub const V1: X402Version1 = super::Version;

/// Payment requirements set by the seller.
///
/// Instances are received from the server and never modified; the buyer
/// picks one out of [`PaymentRequired::accepts`] and builds a payment for it.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentRequirements {
    /// The payment scheme (e.g., "exact").
    pub scheme: String,
    /// The network name (e.g., "base-sepolia").
    pub network: String,
    /// The maximum amount required for payment, as a decimal string.
    pub max_amount_required: String,
    /// The resource URL being paid for.
    #[serde(default)]
    pub resource: String,
    /// Human-readable description of the resource.
    #[serde(default)]
    pub description: String,
    /// MIME type of the resource.
    #[serde(default)]
    pub mime_type: String,
    /// Optional JSON schema for the resource output.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_schema: Option<serde_json::Value>,
    /// The recipient address for payment.
    pub pay_to: String,
    /// Maximum time in seconds for payment validity.
    pub max_timeout_seconds: u64,
    /// The token asset address.
    pub asset: String,
    /// Scheme-specific extra data.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extra: Option<serde_json::Value>,
}

/// HTTP 402 Payment Required response body for V1.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentRequired {
    /// Protocol version (always 1).
    pub x402_version: X402Version1,
    /// Human-readable reason the payment is required.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Acceptable payment methods, in the seller's order of preference.
    #[serde(default)]
    pub accepts: Vec<PaymentRequirements>,
}

impl PaymentRequired {
    /// Returns the authoritative payment option: the first one listed.
    #[must_use]
    pub fn first_accepted(&self) -> Option<&PaymentRequirements> {
        self.accepts.first()
    }
}

/// A signed payment authorization from the buyer.
///
/// # Type Parameters
///
/// - `TPayload` - The scheme-specific payload type (default: raw JSON, so
///   field order survives the trip through a type-erased [`Payer`](crate::scheme::Payer))
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentPayload<TPayload = Box<RawValue>> {
    /// Protocol version (always 1).
    pub x402_version: X402Version1,
    /// The payment scheme (e.g., "exact").
    pub scheme: String,
    /// The network name (e.g., "base-sepolia").
    pub network: String,
    /// The scheme-specific signed payload.
    pub payload: TPayload,
}

impl<TPayload: Serialize> PaymentPayload<TPayload> {
    /// Erases the scheme-specific payload type, keeping its JSON as written.
    ///
    /// # Errors
    ///
    /// Returns an error if the payload cannot be serialized.
    pub fn into_raw(self) -> Result<PaymentPayload, serde_json::Error> {
        Ok(PaymentPayload {
            x402_version: self.x402_version,
            scheme: self.scheme,
            network: self.network,
            payload: serde_json::value::to_raw_value(&self.payload)?,
        })
    }
}
