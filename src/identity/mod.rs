//! Device identity synthesis.
//!
//! The registration endpoint expects the fingerprint of an Android handset:
//! an IMEI-like numeric id with a Luhn check digit, an Android-id-like hex
//! string and an installation UUID. All three are random; none is tied to
//! the real host.

mod device;
pub mod luhn;

pub use device::{
    generate_primary_id, generate_secondary_id, primary_id_from_seed, secondary_id_from_bytes,
    DeviceIdentity,
};

/// Random digits preceding the check digit of the primary id
pub const PRIMARY_ID_BODY_LEN: usize = 14;

/// Random bytes behind the secondary id
pub const SECONDARY_ID_BYTES: usize = 8;
