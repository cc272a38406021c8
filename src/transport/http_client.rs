//! Transport backed by `reqwest`.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, CACHE_CONTROL, CONTENT_TYPE};
use reqwest::Client;

use crate::error::{Error, Result};
use crate::signing::{Method, SignedRequest};
use crate::transport::{HttpTransport, TransportResponse};

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// [`HttpTransport`] over a pooled `reqwest::Client`.
#[derive(Clone)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    /// Build a transport with default timeouts.
    pub fn new() -> Result<Self> {
        let client = Client::builder()
            .timeout(DEFAULT_TIMEOUT)
            .connect_timeout(CONNECT_TIMEOUT)
            .build()
            .map_err(|e| Error::transport(e.to_string()))?;
        Ok(Self { client })
    }

    /// Wrap an existing client.
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }

    fn headers(request: &SignedRequest) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        for (name, value) in request.headers() {
            let name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|e| Error::invalid_request(format!("header name {}: {}", name, e)))?;
            let value = HeaderValue::from_str(value)
                .map_err(|e| Error::invalid_request(format!("header {}: {}", name, e)))?;
            headers.append(name, value);
        }
        if let Some(policy) = request.cache_policy() {
            let value = HeaderValue::from_str(&policy.header_value())
                .map_err(|e| Error::invalid_request(e.to_string()))?;
            headers.insert(CACHE_CONTROL, value);
        }
        if request.body().is_some() && !headers.contains_key(CONTENT_TYPE) {
            headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        }
        Ok(headers)
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn execute(&self, request: &SignedRequest) -> Result<TransportResponse> {
        let headers = Self::headers(request)?;
        let url = request.url();

        let mut builder = match request.method() {
            Method::Get => self.client.get(url),
            Method::Post => self.client.post(url),
        }
        .headers(headers);
        if let Some(body) = request.body() {
            builder = builder.body(body.to_owned());
        }

        let response = builder
            .send()
            .await
            .map_err(|e| Error::transport(e.to_string()))?;
        let status = response.status().as_u16();
        let body = response
            .bytes()
            .await
            .map_err(|e| Error::transport(e.to_string()))?;

        Ok(TransportResponse { status, body })
    }
}
