//! Bearer credential of an anonymous session.

use std::fmt;

use zeroize::{Zeroize, ZeroizeOnDrop};

/// Bearer credential and the anonymous user it belongs to.
///
/// Never expires on its own; it is replaced only after being cleared.
/// The bearer parameter is zeroized on drop and redacted from `Debug`.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct Credential {
    auth_scheme: String,
    auth_parameter: String,
    anonymous_user_id: String,
}

impl Credential {
    /// Create a credential.
    pub fn new(
        auth_scheme: impl Into<String>,
        auth_parameter: impl Into<String>,
        anonymous_user_id: impl Into<String>,
    ) -> Self {
        Self {
            auth_scheme: auth_scheme.into(),
            auth_parameter: auth_parameter.into(),
            anonymous_user_id: anonymous_user_id.into(),
        }
    }

    /// Rebuild a credential from its persisted form.
    ///
    /// `token` is split at the first space into scheme and parameter.
    /// Returns `None` when either value is empty, which counts as a cache miss.
    pub fn from_token(token: &str, anonymous_user_id: &str) -> Option<Self> {
        if token.is_empty() || anonymous_user_id.is_empty() {
            return None;
        }
        let (scheme, parameter) = token.split_once(' ').unwrap_or((token, ""));
        Some(Self::new(scheme, parameter, anonymous_user_id))
    }

    /// Authorization scheme, e.g. `YQ_TOKEN`.
    pub fn auth_scheme(&self) -> &str {
        &self.auth_scheme
    }

    /// Bearer parameter.
    pub fn auth_parameter(&self) -> &str {
        &self.auth_parameter
    }

    /// Anonymous user id (decimal integer).
    pub fn anonymous_user_id(&self) -> &str {
        &self.anonymous_user_id
    }

    /// `Authorization` header value, `"<scheme> <parameter>"`.
    ///
    /// This is also the persisted token string.
    pub fn authorization(&self) -> String {
        if self.auth_parameter.is_empty() {
            self.auth_scheme.clone()
        } else {
            format!("{} {}", self.auth_scheme, self.auth_parameter)
        }
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("auth_scheme", &self.auth_scheme)
            .field("auth_parameter", &"<redacted>")
            .field("anonymous_user_id", &self.anonymous_user_id)
            .finish()
    }
}
