//! Builds signed ERC-3009 payments for the v1 "exact" scheme.

use std::str::FromStr;
use std::time::Duration;

use alloy_primitives::{Address, B256, U256, hex};
use serde::Deserialize;
use tracing::{debug, instrument};
use x402_buyer::options::PayerOptions;
use x402_buyer::proto::v1::V1;
use x402_buyer::proto::{PaymentPayload, PaymentRequirements};
use x402_buyer::scheme::{BoxFuture, Payer};
use x402_buyer::PayerError;

use super::typed_data::{TypedDataDigest, token_domain};
use super::types::{
    ExactEvmAuthorization, ExactEvmPayload, ExactScheme, PaymentRequirementsExtra,
    TransferWithAuthorization,
};
use crate::networks::chain_id_by_network_name;
use crate::signature::{recover_address, to_rsv_bytes};
use crate::signer::EvmSigner;

/// How far `validAfter` is backdated to tolerate clock drift between the
/// buyer and the chain.
pub const CLOCK_SKEW: Duration = Duration::from_secs(10 * 60);

/// Pays `"exact"` requirements on EVM networks with ERC-3009
/// `transferWithAuthorization`.
///
/// Each call draws a fresh nonce and reads the clock once from its
/// [`PayerOptions`], so fixing both makes the output byte-for-byte stable.
#[derive(Debug, Clone)]
pub struct ExactEvmPayer<S> {
    signer: S,
    options: PayerOptions,
}

/// An authorization whose digest is ready to be signed.
struct UnsignedAuthorization {
    from: Address,
    authorization: ExactEvmAuthorization,
    digest: TypedDataDigest,
}

impl<S: EvmSigner> ExactEvmPayer<S> {
    /// Creates a payer with the system clock and random nonces.
    #[must_use]
    pub fn new(signer: S) -> Self {
        Self::with_options(signer, PayerOptions::default())
    }

    /// Creates a payer with explicit clock and nonce sources.
    pub const fn with_options(signer: S, options: PayerOptions) -> Self {
        Self { signer, options }
    }

    /// The payer's account address.
    #[must_use]
    pub fn address(&self) -> Address {
        self.signer.address()
    }

    /// Computes the digest a payment for `requirements` would sign.
    ///
    /// # Errors
    ///
    /// Returns [`PayerError`] when the scheme, network, `extra` or any
    /// address or amount field is unusable.
    pub fn digest(&self, requirements: &PaymentRequirements) -> Result<TypedDataDigest, PayerError> {
        self.prepare(requirements).map(|unsigned| unsigned.digest)
    }

    /// Builds and signs a payment for `requirements`.
    ///
    /// # Errors
    ///
    /// Returns [`PayerError`] when the requirements are unusable, the signer
    /// fails, or the signature does not recover to the signer's address.
    #[instrument(name = "x402.buyer.exact_evm.pay", skip_all, err, fields(network = %requirements.network))]
    pub async fn pay_exact(
        &self,
        requirements: &PaymentRequirements,
    ) -> Result<PaymentPayload<ExactEvmPayload>, PayerError> {
        let UnsignedAuthorization {
            from,
            authorization,
            digest,
        } = self.prepare(requirements)?;

        let signature = self
            .signer
            .sign(digest.hash.as_slice())
            .await
            .map_err(|e| PayerError::Signing(Box::new(e)))?;
        let rsv = to_rsv_bytes(&signature);

        let recovered =
            recover_address(&digest.hash, &rsv).map_err(|e| PayerError::Signing(Box::new(e)))?;
        if recovered != from {
            return Err(PayerError::SignerMismatch {
                expected: from.to_checksum(None),
                recovered: recovered.to_checksum(None),
            });
        }
        debug!(payer = %recovered, "signature recovers to payer");

        Ok(PaymentPayload {
            x402_version: V1,
            scheme: ExactScheme::VALUE.to_owned(),
            network: requirements.network.clone(),
            payload: ExactEvmPayload {
                signature: hex::encode_prefixed(rsv),
                authorization,
            },
        })
    }

    fn prepare(&self, requirements: &PaymentRequirements) -> Result<UnsignedAuthorization, PayerError> {
        if requirements.scheme != ExactScheme::VALUE {
            return Err(PayerError::UnsupportedScheme(requirements.scheme.clone()));
        }
        let chain_id = chain_id_by_network_name(&requirements.network)
            .ok_or_else(|| PayerError::UnsupportedNetwork(requirements.network.clone()))?;
        let extra = parse_extra(requirements.extra.as_ref())?;
        let asset = parse_address("asset", &requirements.asset)?;
        let pay_to = parse_address("payTo", &requirements.pay_to)?;
        let value = parse_amount(&requirements.max_amount_required)?;

        let now = self.options.now();
        let valid_after = now.saturating_sub(CLOCK_SKEW);
        let valid_before = now
            .checked_add(Duration::from_secs(requirements.max_timeout_seconds))
            .ok_or(PayerError::InvalidTimeout)?;
        let nonce = B256::from(self.options.nonce());
        let from = self.signer.address();

        let message = TransferWithAuthorization {
            from,
            to: pay_to,
            value,
            validAfter: U256::from(valid_after.as_secs()),
            validBefore: U256::from(valid_before.as_secs()),
            nonce,
        };
        let domain = token_domain(extra.name, extra.version, chain_id, asset);
        let digest = TypedDataDigest::new(&domain, &message);
        debug!(chain_id, digest = %digest.hash, "built transfer authorization");

        let authorization = ExactEvmAuthorization {
            from: from.to_checksum(None),
            to: requirements.pay_to.clone(),
            value: requirements.max_amount_required.clone(),
            valid_after,
            valid_before,
            nonce: hex::encode_prefixed(nonce),
        };
        Ok(UnsignedAuthorization {
            from,
            authorization,
            digest,
        })
    }
}

impl<S: EvmSigner + 'static> Payer for ExactEvmPayer<S> {
    fn scheme(&self) -> &str {
        ExactScheme::VALUE
    }

    fn pay<'a>(
        &'a self,
        requirements: &'a PaymentRequirements,
    ) -> BoxFuture<'a, Result<PaymentPayload, PayerError>> {
        Box::pin(async move {
            let payload = self.pay_exact(requirements).await?;
            payload.into_raw().map_err(PayerError::from)
        })
    }
}

fn parse_extra(extra: Option<&serde_json::Value>) -> Result<PaymentRequirementsExtra, PayerError> {
    let extra = extra.ok_or_else(|| PayerError::MalformedExtra("extra is missing".into()))?;
    PaymentRequirementsExtra::deserialize(extra).map_err(|e| PayerError::MalformedExtra(e.to_string()))
}

fn parse_address(field: &'static str, value: &str) -> Result<Address, PayerError> {
    Address::from_str(value).map_err(|e| PayerError::invalid(field, e))
}

fn parse_amount(value: &str) -> Result<U256, PayerError> {
    if value.is_empty() {
        return Err(PayerError::invalid("maxAmountRequired", "empty amount"));
    }
    U256::from_str_radix(value, 10).map_err(|e| PayerError::invalid("maxAmountRequired", e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signer::{LocalKeySigner, Signer, SignerError};
    use alloy_primitives::{Signature, address};
    use alloy_signer_local::PrivateKeySigner;
    use x402_buyer::timestamp::UnixTimestamp;

    const TEST_KEY: &str = "6cfb3f917efa513636a6f8103d01426e932806cc7205c4361de4c633452e2b57";
    const GOLDEN: &str = include_str!("../../tests/fixtures/x402_org_payment_payload.golden");
    const NONCE: [u8; 32] = [
        0x14, 0x0f, 0xd6, 0x07, 0xc5, 0x2d, 0x26, 0x69, 0x41, 0xaa, 0x8d, 0x82, 0x41, 0x89, 0x16,
        0x54, 0xb6, 0xd7, 0xab, 0x50, 0xa0, 0x20, 0x28, 0xcb, 0x90, 0x0c, 0x74, 0x6e, 0x3a, 0x1b,
        0xf4, 0xdd,
    ];
    // 2001-02-03T04:05:06Z
    const NOW: u64 = 981_173_106;

    fn requirements() -> PaymentRequirements {
        serde_json::from_value(serde_json::json!({
            "scheme": "exact",
            "network": "base-sepolia",
            "maxAmountRequired": "10000",
            "resource": "https://api.example.com/premium",
            "description": "premium content",
            "mimeType": "application/json",
            "payTo": "0x209693Bc6afc0C5328bA36FaF03C514EF312287C",
            "maxTimeoutSeconds": 300,
            "asset": "0x036CbD53842c5426634e7929541eC2318f3dCF7e",
            "extra": { "name": "USDC", "version": "2" }
        }))
        .unwrap()
    }

    fn fixed_options() -> PayerOptions {
        PayerOptions::new()
            .with_now_fn(|| UnixTimestamp::from_secs(NOW))
            .with_nonce_fn(|| NONCE)
    }

    fn payer() -> ExactEvmPayer<LocalKeySigner> {
        ExactEvmPayer::with_options(LocalKeySigner::from_hex(TEST_KEY).unwrap(), fixed_options())
    }

    #[tokio::test]
    async fn test_matches_recorded_payload() {
        let payload = payer().pay_exact(&requirements()).await.unwrap();
        assert_eq!(serde_json::to_string_pretty(&payload).unwrap(), GOLDEN);
    }

    #[tokio::test]
    async fn test_payer_trait_keeps_bytes() {
        let payer = payer();
        let typed = serde_json::to_string(&payer.pay_exact(&requirements()).await.unwrap()).unwrap();
        let raw = serde_json::to_string(&payer.pay(&requirements()).await.unwrap()).unwrap();
        assert_eq!(typed, raw);
    }

    #[tokio::test]
    async fn test_deterministic_with_fixed_sources() {
        let first = payer().pay_exact(&requirements()).await.unwrap();
        let second = payer().pay_exact(&requirements()).await.unwrap();
        assert_eq!(
            serde_json::to_vec(&first).unwrap(),
            serde_json::to_vec(&second).unwrap()
        );
    }

    #[tokio::test]
    async fn test_fresh_nonce_per_payment() {
        let payer = ExactEvmPayer::new(LocalKeySigner::from_hex(TEST_KEY).unwrap());
        let first = payer.pay_exact(&requirements()).await.unwrap();
        let second = payer.pay_exact(&requirements()).await.unwrap();
        assert_ne!(first.payload.authorization.nonce, second.payload.authorization.nonce);
    }

    #[tokio::test]
    async fn test_window_and_digest() {
        let payer = payer();
        let digest = payer.digest(&requirements()).unwrap();
        assert_eq!(
            hex::encode(digest.hash),
            "2e1af1e88fabc343ec0118961e86a2851fc2062aa09bee5c9b797d30917e9207"
        );
        assert_eq!(
            hex::encode(digest.preimage),
            "190171f17a3b2ff373b803d70a5a07c046c1a2bc8e89c09ef722fcb047abe94c981855c3555d31a50be0e1315c27514b56598de56c2d0fcd2cf0c274e1f3f426676d"
        );

        let payload = payer.pay_exact(&requirements()).await.unwrap();
        let auth = &payload.payload.authorization;
        assert_eq!(auth.valid_after.as_secs(), NOW - 600);
        assert_eq!(auth.valid_before.as_secs(), NOW + 300);
        assert!(auth.is_valid_at(UnixTimestamp::from_secs(NOW)));
    }

    #[tokio::test]
    async fn test_signature_recovers_to_signer() {
        let payer = payer();
        let digest = payer.digest(&requirements()).unwrap();
        let payload = payer.pay_exact(&requirements()).await.unwrap();

        let bytes = hex::decode(&payload.payload.signature).unwrap();
        assert_eq!(bytes.len(), 65);
        assert!(bytes[64] == 27 || bytes[64] == 28);
        let mut rsv = [0u8; 65];
        rsv.copy_from_slice(&bytes);
        assert_eq!(recover_address(&digest.hash, &rsv).unwrap(), payer.address());
    }

    #[tokio::test]
    async fn test_signature_recovers_for_random_keys() {
        for _ in 0..8 {
            let signer = LocalKeySigner::from(PrivateKeySigner::random());
            let payer = ExactEvmPayer::new(signer);
            let digest = payer.digest(&requirements()).unwrap();
            let payload = payer.pay_exact(&requirements()).await.unwrap();

            let bytes = hex::decode(&payload.payload.signature).unwrap();
            let mut rsv = [0u8; 65];
            rsv.copy_from_slice(&bytes);
            assert!(rsv[64] == 27 || rsv[64] == 28);
            assert_eq!(recover_address(&digest.hash, &rsv).unwrap(), payer.address());
            assert_eq!(payload.payload.authorization.from, payer.address().to_checksum(None));
        }
    }

    #[tokio::test]
    async fn test_rejects_unknown_network() {
        let mut req = requirements();
        req.network = "mainnet-unknown".into();
        let err = payer().pay_exact(&req).await.unwrap_err();
        assert!(matches!(err, PayerError::UnsupportedNetwork(ref n) if n == "mainnet-unknown"));
    }

    #[tokio::test]
    async fn test_rejects_extra_without_version() {
        let mut req = requirements();
        req.extra = Some(serde_json::json!({ "name": "USDC" }));
        let err = payer().pay_exact(&req).await.unwrap_err();
        assert!(matches!(err, PayerError::MalformedExtra(_)));

        req.extra = None;
        let err = payer().pay_exact(&req).await.unwrap_err();
        assert!(matches!(err, PayerError::MalformedExtra(_)));
    }

    #[tokio::test]
    async fn test_rejects_other_scheme() {
        let mut req = requirements();
        req.scheme = "upto".into();
        let err = payer().pay_exact(&req).await.unwrap_err();
        assert!(matches!(err, PayerError::UnsupportedScheme(ref s) if s == "upto"));
    }

    #[tokio::test]
    async fn test_rejects_bad_fields() {
        let mut req = requirements();
        req.pay_to = "0x1234".into();
        let err = payer().pay_exact(&req).await.unwrap_err();
        assert!(matches!(err, PayerError::InvalidRequirements { field: "payTo", .. }));

        let mut req = requirements();
        req.max_amount_required = "1.5".into();
        let err = payer().pay_exact(&req).await.unwrap_err();
        assert!(matches!(err, PayerError::InvalidRequirements { field: "maxAmountRequired", .. }));

        let mut req = requirements();
        req.max_timeout_seconds = u64::MAX;
        let err = payer().pay_exact(&req).await.unwrap_err();
        assert!(matches!(err, PayerError::InvalidTimeout));
    }

    struct LyingSigner(LocalKeySigner);

    impl Signer for LyingSigner {
        async fn sign(&self, digest: &[u8]) -> Result<Signature, SignerError> {
            self.0.sign(digest).await
        }
    }

    impl EvmSigner for LyingSigner {
        fn address(&self) -> Address {
            address!("0x209693Bc6afc0C5328bA36FaF03C514EF312287C")
        }
    }

    #[tokio::test]
    async fn test_rejects_signature_from_other_key() {
        let signer = LyingSigner(LocalKeySigner::from_hex(TEST_KEY).unwrap());
        let payer = ExactEvmPayer::with_options(signer, fixed_options());
        let err = payer.pay_exact(&requirements()).await.unwrap_err();
        assert!(matches!(err, PayerError::SignerMismatch { .. }));
    }

    struct LockedSigner;

    impl Signer for LockedSigner {
        async fn sign(&self, _digest: &[u8]) -> Result<Signature, SignerError> {
            Err(SignerError::MissingEnvVar("WALLET_KEY".into()))
        }
    }

    impl EvmSigner for LockedSigner {
        fn address(&self) -> Address {
            Address::ZERO
        }
    }

    #[tokio::test]
    async fn test_signing_failure_is_propagated() {
        let payer = ExactEvmPayer::with_options(LockedSigner, fixed_options());
        let err = payer.pay_exact(&requirements()).await.unwrap_err();
        assert!(matches!(err, PayerError::Signing(_)));
    }
}
