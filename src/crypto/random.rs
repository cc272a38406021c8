//! Entropy for identity synthesis and RSA padding.
//!
//! Production code draws from the operating system; tests inject a seeded
//! generator through the `*_with` constructors.

use rand::{CryptoRng, Rng, RngCore};
use rand_core::OsRng;

/// Handle to the OS entropy source.
pub struct SecureRandom;

impl SecureRandom {
    /// RNG backed by the OS (getrandom).
    pub fn rng() -> impl RngCore + CryptoRng {
        OsRng
    }
}

/// Draw `len` decimal digits from `rng`, each uniform over `0..10`.
pub fn random_digits<R: RngCore + ?Sized>(rng: &mut R, len: usize) -> String {
    (0..len)
        .map(|_| char::from(b'0' + rng.gen_range(0..10u8)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_os_rng_produces_distinct_output() {
        let mut rng = SecureRandom::rng();
        let mut a = [0u8; 32];
        let mut b = [0u8; 32];
        rng.fill_bytes(&mut a);
        rng.fill_bytes(&mut b);
        assert_ne!(a, b);
    }

    #[test]
    fn test_random_digits() {
        let digits = random_digits(&mut SecureRandom::rng(), 14);

        assert_eq!(digits.len(), 14);
        assert!(digits.bytes().all(|b| b.is_ascii_digit()));
    }

    #[test]
    fn test_random_digits_deterministic() {
        let a = random_digits(&mut StdRng::seed_from_u64(7), 20);
        let b = random_digits(&mut StdRng::seed_from_u64(7), 20);
        assert_eq!(a, b);
        assert_eq!(random_digits(&mut StdRng::seed_from_u64(7), 0), "");
    }
}
