//! The two entry points: signed GET and signed POST.

use std::sync::Arc;
use std::time::Duration;

use crate::config::ClientConfig;
use crate::crypto::IdentityCipher;
use crate::error::{Error, Result};
use crate::identity::DeviceIdentity;
use crate::request::factory::RequestFactory;
use crate::session::{Bootstrapper, CredentialStore, SessionManager};
use crate::signing::{CachePolicy, Method, SignedRequest};
use crate::transport::{HttpTransport, TransportResponse};

/// How long GET responses may be served from cache.
pub const GET_CACHE_MAX_AGE: Duration = Duration::from_secs(10 * 60);

/// Builds signed requests for the content API and dispatches them.
pub struct RequestBuilder {
    factory: Arc<RequestFactory>,
    session: Arc<SessionManager>,
    transport: Arc<dyn HttpTransport>,
}

impl RequestBuilder {
    /// Wire up a builder from its parts.
    ///
    /// The embedded public key is decoded here, so a corrupt key fails
    /// construction rather than the first bootstrap.
    pub fn new(
        config: ClientConfig,
        identity: DeviceIdentity,
        store: CredentialStore,
        transport: Arc<dyn HttpTransport>,
    ) -> Result<Self> {
        config.validate().map_err(Error::config)?;
        let cipher = IdentityCipher::from_base64_der(&config.public_key)?;
        let factory = Arc::new(RequestFactory::new(Arc::new(config), Arc::new(identity)));
        Ok(Self::from_parts(factory, cipher, store, transport))
    }

    /// Wire up a builder around an existing factory.
    pub fn from_parts(
        factory: Arc<RequestFactory>,
        cipher: IdentityCipher,
        store: CredentialStore,
        transport: Arc<dyn HttpTransport>,
    ) -> Self {
        let bootstrapper = Bootstrapper::new(Arc::clone(&factory), cipher, Arc::clone(&transport));
        Self {
            factory,
            session: Arc::new(SessionManager::new(store, bootstrapper)),
            transport,
        }
    }

    /// Builder with a fresh identity, the configured store and a `reqwest` transport.
    #[cfg(feature = "reqwest-transport")]
    pub fn from_config(config: ClientConfig) -> Result<Self> {
        let store = match &config.store_path {
            Some(path) => CredentialStore::open_file(path.clone())?,
            None => CredentialStore::in_memory(),
        };
        let transport = Arc::new(crate::transport::ReqwestTransport::new()?);
        Self::new(config, DeviceIdentity::generate(), store, transport)
    }

    /// Signed GET for `url`, bootstrapping a session first if none is cached.
    ///
    /// Carries the `Authorization` header and a ten-minute cache lifetime.
    pub async fn build_get(&self, url: &str) -> Result<SignedRequest> {
        let credential = self.session.credential().await?;
        let mut request = self.factory.signed(
            Method::Get,
            url,
            None,
            credential.anonymous_user_id(),
        )?;
        request
            .add_header("Authorization", credential.authorization())
            .set_cache_policy(CachePolicy::MaxAge(GET_CACHE_MAX_AGE));
        Ok(request)
    }

    /// Signed POST of `body` to `url`. Never bootstraps and is never cached.
    pub fn build_post(&self, url: &str, body: impl Into<Vec<u8>>) -> Result<SignedRequest> {
        let user_id = self.session.user_id()?;
        let mut request = self
            .factory
            .signed(Method::Post, url, Some(body.into()), &user_id)?;
        request.set_cache_policy(CachePolicy::NoStore);
        Ok(request)
    }

    /// Send a signed request.
    ///
    /// A 401/403 answer is reported as [`Error::Unauthorized`]. If the request
    /// carried the credential that is still cached, that credential is
    /// cleared so the next [`build_get`](Self::build_get) registers again.
    /// A rejection of an older credential, or of a request without an
    /// `Authorization` header, leaves the store alone.
    pub async fn execute(&self, request: &SignedRequest) -> Result<TransportResponse> {
        let response = self.transport.execute(request).await?;
        if response.is_auth_failure() {
            tracing::warn!(status = response.status, "request rejected as unauthorized");
            if let Some(authorization) = request.header("Authorization") {
                self.session.clear_if(authorization).await?;
            }
            return Err(Error::Unauthorized);
        }
        Ok(response)
    }

    /// Session manager shared by this builder.
    pub fn session(&self) -> &SessionManager {
        &self.session
    }

    /// Request factory shared by this builder.
    pub fn factory(&self) -> &RequestFactory {
        &self.factory
    }
}
