//! Request canonicalization and `gsn` signing.
//!
//! The API verifies every request by recomputing an MD5 digest over a
//! canonical string built from the method, the query parameters sorted by
//! name, and the body, wrapped in a shared salt:
//!
//! ```text
//! salt | METHOD | name1 enc(v1) | name2 enc(v2) | ... | salt
//!                  └──── names in byte order, gsn skipped ────┘
//! ```
//!
//! The digest is appended as the `gsn` query parameter.

mod canonical;
mod encode;
mod signer;

pub use canonical::{canonical_string, CanonicalRequest, Method};
pub use encode::url_encode;
pub use signer::{CachePolicy, SignedRequest, Signer};

/// Name of the signature query parameter
pub const GSN_PARAM: &str = "gsn";

/// Pseudo-parameter name under which a body enters the canonical string
pub const BODY_PARAM: &str = "body";
