//! RSA PKCS#1 v1.5 encryption of identity secrets.
//!
//! The registration endpoint only accepts identity material encrypted
//! under its fixed public key. Ciphertext is shipped as standard base64.

use base64::{engine::general_purpose::STANDARD, Engine};
use rsa::pkcs8::DecodePublicKey;
use rsa::traits::PublicKeyParts;
use rsa::{Pkcs1v15Encrypt, RsaPublicKey};

use crate::crypto::random::SecureRandom;
use crate::crypto::PKCS1_V15_OVERHEAD;
use crate::error::{Error, Result};

/// Public key wrapper that encrypts short secrets for the registration endpoint.
#[derive(Clone, Debug)]
pub struct IdentityCipher {
    key: RsaPublicKey,
}

impl IdentityCipher {
    /// Decode a base64 SubjectPublicKeyInfo (X.509) DER key.
    pub fn from_base64_der(encoded: &str) -> Result<Self> {
        let der = STANDARD
            .decode(encoded.trim())
            .map_err(|e| Error::KeyDecode(format!("invalid base64: {}", e)))?;
        Self::from_der(&der)
    }

    /// Decode a SubjectPublicKeyInfo DER key.
    pub fn from_der(der: &[u8]) -> Result<Self> {
        let key = RsaPublicKey::from_public_key_der(der)
            .map_err(|e| Error::KeyDecode(e.to_string()))?;
        Ok(Self { key })
    }

    /// Wrap an already decoded key.
    pub fn from_key(key: RsaPublicKey) -> Self {
        Self { key }
    }

    /// Modulus size in bytes (also the ciphertext length).
    pub fn modulus_len(&self) -> usize {
        self.key.size()
    }

    /// Longest plaintext PKCS#1 v1.5 padding can carry under this key.
    pub fn max_plaintext_len(&self) -> usize {
        self.modulus_len().saturating_sub(PKCS1_V15_OVERHEAD)
    }

    /// Encrypt `secret` and return the base64 ciphertext.
    pub fn encrypt(&self, secret: &str) -> Result<String> {
        let mut rng = SecureRandom::rng();
        let ciphertext = self
            .key
            .encrypt(&mut rng, Pkcs1v15Encrypt, secret.as_bytes())
            .map_err(|e| Error::Encryption(e.to_string()))?;
        Ok(STANDARD.encode(ciphertext))
    }
}
