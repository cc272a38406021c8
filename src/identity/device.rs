//! Synthetic device fingerprint.

use rand::RngCore;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::crypto::{random_digits, SecureRandom};
use crate::identity::luhn;
use crate::identity::{PRIMARY_ID_BODY_LEN, SECONDARY_ID_BYTES};

/// Pseudo device fingerprint presented to the registration endpoint.
///
/// Generated once per process and shared read-only afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceIdentity {
    /// 15-digit numeric identifier ending in a checksum digit
    primary_id: String,
    /// Upper-case hex identifier without leading zeros
    secondary_id: String,
    /// Installation-scoped random UUID
    installation_id: Uuid,
}

impl DeviceIdentity {
    /// Generate a fresh identity from the OS entropy source.
    pub fn generate() -> Self {
        Self::generate_with(&mut SecureRandom::rng())
    }

    /// Generate an identity from the given random source.
    pub fn generate_with<R: RngCore + ?Sized>(rng: &mut R) -> Self {
        let primary_id = generate_primary_id(rng);
        let secondary_id = generate_secondary_id(rng);

        let mut uuid_bytes = [0u8; 16];
        rng.fill_bytes(&mut uuid_bytes);
        let installation_id = uuid::Builder::from_random_bytes(uuid_bytes).into_uuid();

        Self {
            primary_id,
            secondary_id,
            installation_id,
        }
    }

    /// Numeric identifier (`keyType` 0, `gdi`).
    pub fn primary_id(&self) -> &str {
        &self.primary_id
    }

    /// Hex identifier (`keyType` 2).
    pub fn secondary_id(&self) -> &str {
        &self.secondary_id
    }

    /// Installation UUID (`keyType` -1).
    pub fn installation_id(&self) -> Uuid {
        self.installation_id
    }
}

/// Draw 14 random digits and append their checksum digit.
pub fn generate_primary_id<R: RngCore + ?Sized>(rng: &mut R) -> String {
    let mut id = random_digits(rng, PRIMARY_ID_BODY_LEN);
    let check = luhn::check_digit_of(id.bytes().map(|b| b - b'0'));
    id.push(char::from(b'0' + check));
    id
}

/// Append the checksum digit to a 14-digit seed.
///
/// Returns `None` unless `seed` is exactly 14 ASCII digits.
pub fn primary_id_from_seed(seed: &str) -> Option<String> {
    if seed.len() != PRIMARY_ID_BODY_LEN {
        return None;
    }
    luhn::append_check_digit(seed)
}

/// Hex-encode 8 random bytes, strip leading zeros and upper-case the result.
pub fn generate_secondary_id<R: RngCore + ?Sized>(rng: &mut R) -> String {
    let mut bytes = [0u8; SECONDARY_ID_BYTES];
    rng.fill_bytes(&mut bytes);
    secondary_id_from_bytes(&bytes)
}

/// Render 8 bytes the way [`generate_secondary_id`] does.
pub fn secondary_id_from_bytes(bytes: &[u8; SECONDARY_ID_BYTES]) -> String {
    hex::encode(bytes).trim_start_matches('0').to_uppercase()
}
