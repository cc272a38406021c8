//! Request signer.

use std::time::Duration;

use url::Url;

use crate::crypto::md5_hex;
use crate::signing::canonical::{CanonicalRequest, Method};
use crate::signing::GSN_PARAM;

/// Response caching the transport should apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CachePolicy {
    /// Response may be reused for the given duration
    MaxAge(Duration),
    /// Response must not be cached
    NoStore,
}

impl CachePolicy {
    /// `Cache-Control` header value for this policy.
    pub fn header_value(&self) -> String {
        match self {
            CachePolicy::MaxAge(age) => format!("max-age={}", age.as_secs()),
            CachePolicy::NoStore => "no-cache, no-store".to_string(),
        }
    }
}

/// Computes `gsn` signatures with a fixed salt.
///
/// Signing is pure and needs no locking; one signer can be shared freely.
#[derive(Debug, Clone)]
pub struct Signer {
    salt: String,
}

impl Signer {
    /// Create a signer with the given salt.
    pub fn new(salt: impl Into<String>) -> Self {
        Self { salt: salt.into() }
    }

    /// Lower-case hex MD5 of the canonical string of `request`.
    pub fn signature(&self, request: &CanonicalRequest) -> String {
        md5_hex(request.canonical_string(&self.salt).as_bytes())
    }

    /// Sign `request`, dropping any stale `gsn` parameter first.
    pub fn sign(&self, mut request: CanonicalRequest) -> SignedRequest {
        request.remove_param(GSN_PARAM);
        let signature = self.signature(&request);
        tracing::debug!(
            method = %request.method(),
            url = %request.base_url(),
            params = request.params().len(),
            "signed request"
        );
        SignedRequest {
            request,
            signature,
            cache_policy: None,
        }
    }
}

/// A request carrying its `gsn` signature; the only form handed to a transport.
///
/// Parameters and body are frozen. Headers and cache policy may still be
/// adjusted since the signature does not cover them.
#[derive(Debug, Clone, PartialEq)]
pub struct SignedRequest {
    request: CanonicalRequest,
    signature: String,
    cache_policy: Option<CachePolicy>,
}

impl SignedRequest {
    /// HTTP method.
    pub fn method(&self) -> Method {
        self.request.method()
    }

    /// Computed signature.
    pub fn signature(&self) -> &str {
        &self.signature
    }

    /// Look up a signed query parameter (including `gsn`).
    pub fn param(&self, name: &str) -> Option<&str> {
        if name == GSN_PARAM {
            return Some(&self.signature);
        }
        self.request.param(name)
    }

    /// Query pairs in the order they are sent: sorted by name, `gsn` last.
    pub fn query_pairs(&self) -> Vec<(&str, &str)> {
        let mut pairs: Vec<(&str, &str)> = self
            .request
            .params()
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect();
        pairs.sort_unstable_by(|a, b| a.0.cmp(b.0));
        pairs.push((GSN_PARAM, &self.signature));
        pairs
    }

    /// Full URL including the signed query string.
    pub fn url(&self) -> Url {
        let mut url = self.request.base_url().clone();
        {
            let mut query = url.query_pairs_mut();
            for (name, value) in self.query_pairs() {
                query.append_pair(name, value);
            }
        }
        url
    }

    /// Body text, if any.
    pub fn body(&self) -> Option<&str> {
        self.request.body()
    }

    /// Headers in insertion order.
    pub fn headers(&self) -> &[(String, String)] {
        self.request.headers()
    }

    /// First header with `name`, compared case-insensitively.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers()
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Append a header.
    pub fn add_header(&mut self, name: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.request.headers_mut().push((name.into(), value.into()));
        self
    }

    /// Cache policy for the response, if set.
    pub fn cache_policy(&self) -> Option<CachePolicy> {
        self.cache_policy
    }

    /// Set the cache policy for the response.
    pub fn set_cache_policy(&mut self, policy: CachePolicy) -> &mut Self {
        self.cache_policy = Some(policy);
        self
    }

    /// Canonical form the signature was computed over.
    pub fn canonical(&self) -> &CanonicalRequest {
        &self.request
    }
}
