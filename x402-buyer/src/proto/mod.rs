//! Wire format types for x402 payment messages.
//!
//! The buyer speaks protocol version 1: the server lists what it accepts in
//! the body of a `402` response, and the client answers with a signed
//! [`v1::PaymentPayload`] in the `X-Payment` request header.
//!
//! All types serialize to JSON using camelCase field names.

mod version;

pub mod v1;

pub use v1::{PaymentPayload, PaymentRequired, PaymentRequirements};
pub use version::Version;
