//! In-flight request representation and its canonical string.

use std::collections::HashMap;

use url::Url;

use crate::error::{Error, Result};
use crate::signing::encode::url_encode;
use crate::signing::{BODY_PARAM, GSN_PARAM};

/// HTTP method of a signable request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    /// GET
    Get,
    /// POST
    Post,
}

impl Method {
    /// Upper-case method name as it enters the canonical string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
        }
    }
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A fully parameterized request that has not been signed yet.
///
/// Query parameters form an unordered map; repeated keys are not supported
/// and the last value set wins.
#[derive(Debug, Clone, PartialEq)]
pub struct CanonicalRequest {
    method: Method,
    base_url: Url,
    params: HashMap<String, String>,
    body: Option<String>,
    headers: Vec<(String, String)>,
}

impl CanonicalRequest {
    /// Create a request, moving any query string of `url` into the parameter map.
    pub fn new(method: Method, url: &str) -> Result<Self> {
        let mut base_url = Url::parse(url)
            .map_err(|e| Error::invalid_request(format!("invalid URL {}: {}", url, e)))?;
        if base_url.cannot_be_a_base() {
            return Err(Error::invalid_request(format!("not a base URL: {}", url)));
        }

        let params = base_url
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();
        base_url.set_query(None);
        base_url.set_fragment(None);

        Ok(Self {
            method,
            base_url,
            params,
            body: None,
            headers: Vec::new(),
        })
    }

    /// Create a GET request.
    pub fn get(url: &str) -> Result<Self> {
        Self::new(Method::Get, url)
    }

    /// Create a POST request.
    pub fn post(url: &str) -> Result<Self> {
        Self::new(Method::Post, url)
    }

    /// HTTP method.
    pub fn method(&self) -> Method {
        self.method
    }

    /// URL without query string.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Set a query parameter, replacing any previous value.
    pub fn set_param(&mut self, name: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.params.insert(name.into(), value.into());
        self
    }

    /// Remove a query parameter.
    pub fn remove_param(&mut self, name: &str) -> Option<String> {
        self.params.remove(name)
    }

    /// Look up a query parameter.
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.get(name).map(String::as_str)
    }

    /// All query parameters.
    pub fn params(&self) -> &HashMap<String, String> {
        &self.params
    }

    /// Attach a body. The body must be UTF-8 because it is signed as text.
    pub fn set_body(&mut self, body: impl Into<Vec<u8>>) -> Result<&mut Self> {
        let text = String::from_utf8(body.into())
            .map_err(|_| Error::invalid_request("request body is not valid UTF-8"))?;
        self.body = Some(text);
        Ok(self)
    }

    /// Body text, if any.
    pub fn body(&self) -> Option<&str> {
        self.body.as_deref()
    }

    /// Append a header. Headers are not covered by the signature.
    pub fn add_header(&mut self, name: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Headers in insertion order.
    pub fn headers(&self) -> &[(String, String)] {
        &self.headers
    }

    /// Canonical string of this request under `salt`.
    pub fn canonical_string(&self, salt: &str) -> String {
        canonical_string(
            salt,
            self.method,
            self.params.iter().map(|(k, v)| (k.as_str(), v.as_str())),
            self.body.as_deref(),
        )
    }

    pub(crate) fn headers_mut(&mut self) -> &mut Vec<(String, String)> {
        &mut self.headers
    }
}

/// Build the string that gets hashed into the signature.
///
/// `salt + METHOD + name1 + enc(value1) + ... + salt`, names in byte order.
/// A body enters as the pseudo-parameter `body`, shadowing a query parameter
/// of the same name. Any `gsn` parameter is skipped.
pub fn canonical_string<'a, I>(salt: &str, method: Method, params: I, body: Option<&'a str>) -> String
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    let mut entries: Vec<(&str, &str)> = params
        .into_iter()
        .filter(|(name, _)| *name != GSN_PARAM && !(body.is_some() && *name == BODY_PARAM))
        .collect();
    if let Some(body) = body {
        entries.push((BODY_PARAM, body));
    }
    entries.sort_unstable_by(|a, b| a.0.cmp(b.0));

    let mut out = String::with_capacity(salt.len() * 2 + 16 + entries.len() * 24);
    out.push_str(salt);
    out.push_str(method.as_str());
    for (name, value) in entries {
        out.push_str(name);
        out.push_str(&url_encode(value));
    }
    out.push_str(salt);
    out
}
