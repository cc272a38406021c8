//! One-time anonymous registration.
//!
//! ```text
//! Client                                        Registration endpoint
//!   |  POST createAnonyUser2 (signed, no-store)          |
//!   |  {"keys":[{key: RSA(primary),   keyType: "0"},     |
//!   |           {key: RSA(secondary), keyType: "2"},     |
//!   |           {key: RSA(uuid),      keyType: "-1"}]}   |
//!   |--------------------------------------------------->|
//!   |  {"response":{"tokenResult":{scheme,parameter},    |
//!   |               "userId": n, ...}}                   |
//!   |<---------------------------------------------------|
//! ```

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::crypto::IdentityCipher;
use crate::error::{Error, Result};
use crate::request::{RequestFactory, ANONYMOUS_USER_ID};
use crate::session::credential::Credential;
use crate::signing::{CachePolicy, Method};
use crate::transport::HttpTransport;

/// `keyType` of the encrypted primary id
pub const KEY_TYPE_PRIMARY: &str = "0";

/// `keyType` of the encrypted secondary id
pub const KEY_TYPE_SECONDARY: &str = "2";

/// `keyType` of the encrypted per-registration UUID
pub const KEY_TYPE_INSTALLATION: &str = "-1";

/// Request body of the registration call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegistrationBody {
    pub keys: Vec<RegistrationKey>,
}

/// One encrypted identity secret.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegistrationKey {
    /// Base64 RSA ciphertext
    pub key: String,
    #[serde(rename = "keyType")]
    pub key_type: String,
}

#[derive(Debug, Deserialize)]
struct RegistrationEnvelope {
    response: AnonymousUser,
}

/// Anonymous user record returned by the registration endpoint.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnonymousUser {
    #[serde(default)]
    pub init_device_key: String,
    #[serde(default)]
    pub nick_name: String,
    pub token_result: TokenResult,
    pub user_id: i64,
    #[serde(default)]
    pub user_name: String,
}

/// Bearer token pieces.
#[derive(Debug, Deserialize)]
pub struct TokenResult {
    pub parameter: String,
    pub scheme: String,
}

/// Parse a registration response body into a credential.
pub fn parse_registration(body: &[u8]) -> Result<Credential> {
    let envelope: RegistrationEnvelope =
        serde_json::from_slice(body).map_err(|e| Error::bootstrap_parse(e.to_string()))?;
    let user = envelope.response;

    if user.token_result.scheme.is_empty() {
        return Err(Error::bootstrap_parse("empty token scheme"));
    }
    // The persisted token is split at its first space.
    if user.token_result.scheme.contains(char::is_whitespace) {
        return Err(Error::bootstrap_parse("token scheme contains whitespace"));
    }
    if user.token_result.parameter.is_empty() {
        return Err(Error::bootstrap_parse("empty token parameter"));
    }

    tracing::debug!(
        user_id = user.user_id,
        nick_name = %user.nick_name,
        "registration response parsed"
    );

    Ok(Credential::new(
        user.token_result.scheme.as_str(),
        user.token_result.parameter.as_str(),
        user.user_id.to_string(),
    ))
}

/// Performs the anonymous-registration exchange.
pub struct Bootstrapper {
    factory: Arc<RequestFactory>,
    cipher: IdentityCipher,
    transport: Arc<dyn HttpTransport>,
}

impl Bootstrapper {
    /// Create a bootstrapper.
    pub fn new(
        factory: Arc<RequestFactory>,
        cipher: IdentityCipher,
        transport: Arc<dyn HttpTransport>,
    ) -> Self {
        Self {
            factory,
            cipher,
            transport,
        }
    }

    /// Encrypt the three identity secrets, in wire order.
    ///
    /// The `keyType "-1"` UUID is drawn fresh for every registration.
    pub fn registration_body(&self) -> Result<RegistrationBody> {
        let identity = self.factory.identity();
        let registration_id = Uuid::new_v4().to_string();

        let keys = [
            (identity.primary_id(), KEY_TYPE_PRIMARY),
            (identity.secondary_id(), KEY_TYPE_SECONDARY),
            (registration_id.as_str(), KEY_TYPE_INSTALLATION),
        ]
        .into_iter()
        .map(|(secret, key_type)| {
            Ok(RegistrationKey {
                key: self.cipher.encrypt(secret)?,
                key_type: key_type.to_string(),
            })
        })
        .collect::<Result<Vec<_>>>()?;

        Ok(RegistrationBody { keys })
    }

    /// Register anonymously and return the issued credential.
    ///
    /// The caller persists the result. Nothing is retried here.
    pub async fn bootstrap(&self) -> Result<Credential> {
        let body = serde_json::to_vec(&self.registration_body()?)
            .map_err(|e| Error::invalid_request(e.to_string()))?;
        let url = self.factory.config().bootstrap_url();

        let mut request = self
            .factory
            .signed(Method::Post, &url, Some(body), ANONYMOUS_USER_ID)?;
        request.set_cache_policy(CachePolicy::NoStore);

        tracing::debug!(url = %url, "requesting anonymous registration");
        let response = self.transport.execute(&request).await?;
        if !response.is_success() {
            return Err(Error::Status {
                status: response.status,
            });
        }

        parse_registration(&response.body)
    }
}
