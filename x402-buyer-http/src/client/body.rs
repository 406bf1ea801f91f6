//! Request snapshot that survives the first send.
//!
//! Sending a `reqwest::Request` consumes it, so everything needed to send it
//! again is copied out beforehand. The body is read in full, streams
//! included, and handed back to the request as bytes; the memory is released
//! when the snapshot drops at the end of the exchange.

use std::time::Duration;

use bytes::Bytes;
use http::{HeaderMap, Method, Version};
use http_body_util::BodyExt;
use reqwest::{Body, Request, Url};

use crate::error::ClientError;

pub(crate) struct BufferedRequest {
    method: Method,
    url: Url,
    headers: HeaderMap,
    version: Version,
    timeout: Option<Duration>,
    body: Option<Bytes>,
}

impl BufferedRequest {
    /// Drains the body of `req` into memory and puts the buffered copy back,
    /// so `req` can still be sent.
    pub(crate) async fn capture(req: &mut Request) -> Result<Self, ClientError> {
        let body = match req.body_mut().take() {
            None => None,
            Some(body) => {
                let bytes = match body.as_bytes() {
                    Some(b) => Bytes::copy_from_slice(b),
                    None => body
                        .collect()
                        .await
                        .map_err(ClientError::ReadRequestBody)?
                        .to_bytes(),
                };
                *req.body_mut() = Some(Body::from(bytes.clone()));
                Some(bytes)
            }
        };
        Ok(Self {
            method: req.method().clone(),
            url: req.url().clone(),
            headers: req.headers().clone(),
            version: req.version(),
            timeout: req.timeout().copied(),
            body,
        })
    }

    /// The buffered body, empty when the request had none.
    pub(crate) fn body(&self) -> &[u8] {
        self.body.as_deref().unwrap_or_default()
    }

    /// Builds a fresh request with the original method, URL, headers and body.
    pub(crate) fn rebuild(&self) -> Request {
        let mut req = Request::new(self.method.clone(), self.url.clone());
        *req.headers_mut() = self.headers.clone();
        *req.version_mut() = self.version;
        *req.timeout_mut() = self.timeout;
        *req.body_mut() = self.body.clone().map(Body::from);
        req
    }
}
