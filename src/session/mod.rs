//! Anonymous session management.
//!
//! A session is a bearer credential obtained by registering the synthetic
//! device identity once. It is cached in a preference store and reused for
//! every request until explicitly cleared.
//!
//! ## Lifecycle
//!
//! ```text
//!  build_get ──► SessionManager::credential
//!                   │
//!                   ├── store hit ──────────────────────► Credential
//!                   │
//!                   └── miss ──► [single-flight gate]
//!                                   ├── re-check store ─► Credential
//!                                   └── Bootstrapper ──► store.save ──► Credential
//! ```

mod bootstrap;
mod credential;
mod manager;
mod store;

pub use bootstrap::{
    parse_registration, AnonymousUser, Bootstrapper, RegistrationBody, RegistrationKey,
    TokenResult, KEY_TYPE_INSTALLATION, KEY_TYPE_PRIMARY, KEY_TYPE_SECONDARY,
};
pub use credential::Credential;
pub use manager::SessionManager;
pub use store::{
    CredentialStore, FilePreferences, MemoryPreferences, PreferenceStore, TOKEN_KEY, USER_ID_KEY,
};
