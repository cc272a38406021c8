//! # yq-session
//!
//! Anonymous session bootstrap and request signing for the yq content API.
//! The API rejects any request without a valid `gsn` signature, and content
//! reads additionally need a bearer credential negotiated once per device.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │      RequestBuilder  (build_get / build_post)           │
//! ├───────────────────────────┬─────────────────────────────┤
//! │  SessionManager           │  RequestFactory             │
//! │  (single-flight bootstrap,│  (fixed params, headers)    │
//! │   credential store)       │                             │
//! ├───────────────────────────┼─────────────────────────────┤
//! │  Bootstrapper             │  Signer (canonical + MD5)   │
//! ├───────────────────────────┴─────────────────────────────┤
//! │  Crypto (RSA PKCS#1 v1.5)  ·  DeviceIdentity (Luhn)     │
//! ├─────────────────────────────────────────────────────────┤
//! │  HttpTransport (injected; reqwest by default)           │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```no_run
//! # async fn demo() -> yq_session::Result<()> {
//! use yq_session::{ClientConfig, RequestBuilder};
//!
//! let builder = RequestBuilder::from_config(ClientConfig::default())?;
//! let request = builder.build_get("/v1/manga/getDetail?mangaId=1").await?;
//! let response = builder.execute(&request).await?;
//! # let _ = response;
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_code)]
#![warn(rust_2018_idioms)]

pub mod config;
pub mod crypto;
pub mod error;
pub mod identity;
pub mod request;
pub mod session;
pub mod signing;
pub mod transport;

pub use config::ClientConfig;
pub use error::{Error, Result};
pub use identity::DeviceIdentity;
pub use request::RequestBuilder;
pub use session::{Credential, CredentialStore, SessionManager};
pub use signing::{CanonicalRequest, Method, SignedRequest, Signer};
pub use transport::{HttpTransport, TransportResponse};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_builds_signer() {
        let config = ClientConfig::default();
        let signer = Signer::new(config.gsn_salt);

        let mut request = CanonicalRequest::get("http://api.test/v1/list").unwrap();
        request.set_param("a", "1");
        assert_eq!(signer.sign(request).signature().len(), 32);
    }
}
