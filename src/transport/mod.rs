//! HTTP transport seam.
//!
//! TLS, retries, pooling and timeouts belong to the transport. This crate
//! only ever hands it a [`SignedRequest`](crate::signing::SignedRequest), so
//! an unsigned request cannot reach the wire.

#[cfg(feature = "reqwest-transport")]
mod http_client;

#[cfg(feature = "reqwest-transport")]
pub use http_client::ReqwestTransport;

use async_trait::async_trait;
use bytes::Bytes;

use crate::error::Result;
use crate::signing::SignedRequest;

/// Executes signed requests.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// Send `request` and return the raw response.
    ///
    /// Network failures are reported as [`Error::Transport`](crate::Error::Transport);
    /// any HTTP status, including errors, is returned as a response.
    async fn execute(&self, request: &SignedRequest) -> Result<TransportResponse>;
}

/// Raw HTTP response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    /// HTTP status code
    pub status: u16,
    /// Response body
    pub body: Bytes,
}

impl TransportResponse {
    /// Create a response.
    pub fn new(status: u16, body: impl Into<Bytes>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Check for a 2xx status.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Check for a status that means the credential was rejected.
    pub fn is_auth_failure(&self) -> bool {
        self.status == 401 || self.status == 403
    }

    /// Body as UTF-8 text, lossy.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_response_classification() {
        assert!(TransportResponse::new(200, "ok").is_success());
        assert!(TransportResponse::new(204, Bytes::new()).is_success());
        assert!(!TransportResponse::new(301, "").is_success());
        assert!(TransportResponse::new(401, "").is_auth_failure());
        assert!(TransportResponse::new(403, "").is_auth_failure());
        assert!(!TransportResponse::new(500, "").is_auth_failure());
    }

    #[test]
    fn test_response_text() {
        let response = TransportResponse::new(200, "{\"response\":{}}");
        assert_eq!(response.text(), "{\"response\":{}}");
    }
}
