//! MD5 digests for request signatures.
//!
//! MD5 is what the API verifies against; it is not used for anything
//! that needs collision resistance.

use md5::{Digest, Md5};

/// Size of an MD5 digest in bytes
pub const MD5_SIZE: usize = 16;

/// Compute the MD5 digest of `input`.
pub fn md5(input: &[u8]) -> [u8; MD5_SIZE] {
    Md5::digest(input).into()
}

/// Compute the lower-case hex MD5 digest of `input`.
pub fn md5_hex(input: &[u8]) -> String {
    hex::encode(md5(input))
}
