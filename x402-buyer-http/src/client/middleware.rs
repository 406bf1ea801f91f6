//! The payment middleware.
//!
//! [`X402Client`] forwards every request unchanged. When the response is
//! `402 Payment Required` it reads the payment request from the body, asks
//! the payer registered for the first accepted scheme to build a payment,
//! and sends the request exactly once more with an `X-Payment` header.
//! Whatever that second attempt returns goes back to the caller as is.

use http::{Extensions, HeaderMap, HeaderValue};
use reqwest::{Request, Response};
use reqwest_middleware as rqm;
use tracing::instrument::WithSubscriber;
use tracing::{Dispatch, debug, instrument, trace};
use x402_buyer::proto::PaymentRequired;
use x402_buyer::scheme::{Payer, PayerRegistry};

use super::body::BufferedRequest;
use crate::constants::{PAYMENT_REQUIRED, X_PAYMENT};
use crate::error::{ClientError, HeaderError};
use crate::headers::encode_x_payment;

/// Reqwest middleware that pays x402 challenges.
///
/// Holds no per-request state; one instance serves any number of
/// concurrent requests.
#[derive(Clone, Debug, Default)]
pub struct X402Client {
    payers: PayerRegistry,
    dispatch: Option<Dispatch>,
}

impl X402Client {
    /// Creates a client with no payers registered.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a client around an existing registry.
    #[must_use]
    pub const fn with_registry(payers: PayerRegistry) -> Self {
        Self {
            payers,
            dispatch: None,
        }
    }

    /// Registers a payer under its scheme name.
    #[must_use]
    pub fn register<P: Payer + 'static>(mut self, payer: P) -> Self {
        self.payers.register(payer);
        self
    }

    /// Routes this client's log records to `dispatch` instead of the
    /// global subscriber.
    #[must_use]
    pub fn with_dispatch(mut self, dispatch: impl Into<Dispatch>) -> Self {
        self.dispatch = Some(dispatch.into());
        self
    }

    /// The registered payers.
    #[must_use]
    pub const fn payers(&self) -> &PayerRegistry {
        &self.payers
    }

    /// Builds the retry headers for a 402 response.
    ///
    /// Consumes the response body. Only the first entry of `accepts` is
    /// considered.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] when the body is not a payment request, lists
    /// no options, names a scheme with no registered payer, or the payer
    /// fails.
    #[instrument(name = "x402.buyer.http.payment_headers", skip_all, err)]
    pub async fn make_payment_headers(&self, res: Response) -> Result<HeaderMap, ClientError> {
        let body = res.bytes().await.map_err(ClientError::ReadBody)?;
        debug!(body = %String::from_utf8_lossy(&body), "received payment request");

        let payment_required: PaymentRequired =
            serde_json::from_slice(&body).map_err(ClientError::ParsePaymentRequired)?;
        let requirements = payment_required
            .first_accepted()
            .ok_or(ClientError::NoPaymentMethods)?;
        debug!(
            scheme = %requirements.scheme,
            network = %requirements.network,
            amount = %requirements.max_amount_required,
            pay_to = %requirements.pay_to,
            "selected payment requirements"
        );

        let payer = self
            .payers
            .get(&requirements.scheme)
            .ok_or_else(|| ClientError::UnsupportedScheme(requirements.scheme.clone()))?;
        let payload = payer.pay(requirements).await?;

        let encoded = encode_x_payment(&payload)?;
        debug!(x_payment = %encoded, "computed payment header");
        let value = HeaderValue::from_str(&encoded).map_err(HeaderError::from)?;

        let mut headers = HeaderMap::new();
        headers.insert(X_PAYMENT, value);
        Ok(headers)
    }

    #[instrument(
        name = "x402.buyer.http.handle",
        skip_all,
        err,
        fields(method = %req.method(), url = %req.url())
    )]
    async fn process(
        &self,
        mut req: Request,
        extensions: &mut Extensions,
        next: rqm::Next<'_>,
    ) -> rqm::Result<Response> {
        let snapshot = BufferedRequest::capture(&mut req)
            .await
            .map_err(middleware_error)?;
        debug!(body = %String::from_utf8_lossy(snapshot.body()), "buffered request body");

        let res = next.clone().run(req, extensions).await?;
        if res.status() != PAYMENT_REQUIRED {
            trace!(status = %res.status(), "no payment required");
            return Ok(res);
        }

        let headers = self
            .make_payment_headers(res)
            .await
            .map_err(middleware_error)?;
        let mut retry = snapshot.rebuild();
        retry.headers_mut().extend(headers);

        let res = next.run(retry, extensions).await?;
        debug!(status = %res.status(), "payment retry completed");
        Ok(res)
    }
}

fn middleware_error(err: ClientError) -> rqm::Error {
    rqm::Error::Middleware(err.into())
}

#[async_trait::async_trait]
impl rqm::Middleware for X402Client {
    async fn handle(
        &self,
        req: Request,
        extensions: &mut Extensions,
        next: rqm::Next<'_>,
    ) -> rqm::Result<Response> {
        let exchange = self.process(req, extensions, next);
        match &self.dispatch {
            Some(dispatch) => exchange.with_subscriber(dispatch.clone()).await,
            None => exchange.await,
        }
    }
}
