//! Assembly of signed requests from process-wide context.

use std::sync::Arc;

use uuid::Uuid;

use crate::config::ClientConfig;
use crate::error::Result;
use crate::identity::DeviceIdentity;
use crate::request::headers::device_headers;
use crate::request::params::{fixed_params, last_used_time, request_timestamp};
use crate::signing::{CanonicalRequest, Method, SignedRequest, Signer};

/// Builds fully parameterized, signed requests.
///
/// Holds the values fixed for the process lifetime: configuration, device
/// identity and the "last used" timestamp. Does not touch credentials.
pub struct RequestFactory {
    config: Arc<ClientConfig>,
    identity: Arc<DeviceIdentity>,
    last_used_time: String,
    signer: Signer,
}

impl RequestFactory {
    /// Create a factory, taking the "last used" timestamp from the clock now.
    pub fn new(config: Arc<ClientConfig>, identity: Arc<DeviceIdentity>) -> Self {
        Self::with_last_used_time(config, identity, last_used_time())
    }

    /// Create a factory with an explicit "last used" timestamp.
    pub fn with_last_used_time(
        config: Arc<ClientConfig>,
        identity: Arc<DeviceIdentity>,
        last_used_time: String,
    ) -> Self {
        let signer = Signer::new(config.gsn_salt.clone());
        Self {
            config,
            identity,
            last_used_time,
            signer,
        }
    }

    /// Client configuration.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Device identity of this process.
    pub fn identity(&self) -> &DeviceIdentity {
        &self.identity
    }

    /// Process-start timestamp in milliseconds.
    pub fn last_used_time(&self) -> &str {
        &self.last_used_time
    }

    /// Signer bound to the configured salt.
    pub fn signer(&self) -> &Signer {
        &self.signer
    }

    /// Resolve `url` against the base URL unless it is already absolute.
    pub fn resolve_url(&self, url: &str) -> String {
        if url::Url::parse(url).is_ok() {
            url.to_string()
        } else {
            format!("{}/{}", self.config.base_url(), url.trim_start_matches('/'))
        }
    }

    /// Parameterize `url` for `user_id` with an explicit `gts` timestamp.
    pub fn prepare_at(
        &self,
        method: Method,
        url: &str,
        body: Option<Vec<u8>>,
        user_id: &str,
        timestamp: &str,
    ) -> Result<CanonicalRequest> {
        let mut request = CanonicalRequest::new(method, &self.resolve_url(url))?;
        if let Some(body) = body {
            request.set_body(body)?;
        }
        for (name, value) in fixed_params(
            &self.config,
            &self.identity,
            &self.last_used_time,
            user_id,
            timestamp,
        ) {
            request.set_param(name, value);
        }
        for (name, value) in device_headers(
            &self.config,
            &self.identity,
            &self.last_used_time,
            user_id,
            Uuid::new_v4(),
        ) {
            request.add_header(name, value);
        }
        Ok(request)
    }

    /// Parameterize and sign `url` for `user_id` at the current time.
    pub fn signed(
        &self,
        method: Method,
        url: &str,
        body: Option<Vec<u8>>,
        user_id: &str,
    ) -> Result<SignedRequest> {
        let request = self.prepare_at(method, url, body, user_id, &request_timestamp())?;
        Ok(self.signer.sign(request))
    }
}
