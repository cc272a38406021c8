//! Cryptographic primitives for session bootstrap and signing.
//!
//! This module provides:
//! - RSA PKCS#1 v1.5 encryption of identity secrets
//! - MD5 hex digests for request signatures
//! - Secure random number generation

mod cipher;
mod digest;
mod random;

pub use cipher::IdentityCipher;
pub use digest::{md5, md5_hex, MD5_SIZE};
pub use random::{random_digits, SecureRandom};

/// Bytes PKCS#1 v1.5 encryption padding consumes out of the modulus
pub const PKCS1_V15_OVERHEAD: usize = 11;
