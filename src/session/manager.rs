//! Process-wide credential lifecycle.

use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::Mutex;

use crate::error::Result;
use crate::request::ANONYMOUS_USER_ID;
use crate::session::bootstrap::Bootstrapper;
use crate::session::credential::Credential;
use crate::session::store::CredentialStore;

/// Owns the credential store and serializes bootstraps.
///
/// Concurrent callers that find the store empty queue on one async mutex;
/// the first performs the registration call, the rest re-check the store
/// and reuse its result. At most one bootstrap is in flight.
pub struct SessionManager {
    store: CredentialStore,
    bootstrapper: Bootstrapper,
    gate: Mutex<()>,
    bootstraps: AtomicU64,
}

impl SessionManager {
    /// Create a session manager.
    pub fn new(store: CredentialStore, bootstrapper: Bootstrapper) -> Self {
        Self {
            store,
            bootstrapper,
            gate: Mutex::new(()),
            bootstraps: AtomicU64::new(0),
        }
    }

    /// Cached credential, bootstrapping and persisting one on a miss.
    pub async fn credential(&self) -> Result<Credential> {
        if let Some(credential) = self.store.load()? {
            return Ok(credential);
        }

        let _guard = self.gate.lock().await;

        // Another caller may have finished while we waited.
        if let Some(credential) = self.store.load()? {
            return Ok(credential);
        }

        let credential = self.bootstrapper.bootstrap().await?;
        self.store.save(&credential)?;
        self.bootstraps.fetch_add(1, Ordering::Relaxed);

        tracing::info!(
            user_id = credential.anonymous_user_id(),
            "anonymous session established"
        );
        Ok(credential)
    }

    /// Cached credential without bootstrapping.
    pub fn cached(&self) -> Result<Option<Credential>> {
        self.store.load()
    }

    /// Anonymous user id to report, `-1` before a session exists.
    pub fn user_id(&self) -> Result<String> {
        Ok(self
            .store
            .user_id()?
            .unwrap_or_else(|| ANONYMOUS_USER_ID.to_string()))
    }

    /// Drop the cached credential; the next [`credential`](Self::credential) call bootstraps.
    pub fn clear(&self) -> Result<()> {
        self.store.clear()?;
        tracing::warn!("anonymous session cleared");
        Ok(())
    }

    /// Drop the cached credential only if its `Authorization` value is `authorization`.
    ///
    /// Runs under the bootstrap gate, so a rejection of a superseded
    /// credential never wipes the one that replaced it. Returns whether
    /// the store was cleared.
    pub async fn clear_if(&self, authorization: &str) -> Result<bool> {
        let _guard = self.gate.lock().await;

        match self.store.load()? {
            Some(current) if current.authorization() == authorization => {
                self.store.clear()?;
                tracing::warn!("anonymous session cleared");
                Ok(true)
            }
            _ => {
                tracing::debug!("rejected credential already superseded");
                Ok(false)
            }
        }
    }

    /// Number of successful bootstraps performed by this manager.
    pub fn bootstrap_count(&self) -> u64 {
        self.bootstraps.load(Ordering::Relaxed)
    }

    /// Underlying credential store.
    pub fn store(&self) -> &CredentialStore {
        &self.store
    }
}
