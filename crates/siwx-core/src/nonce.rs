//! Random nonce generation.

use rand::distributions::{Alphanumeric, DistString};

/// Default entropy target for generated nonces, in bits.
pub const DEFAULT_NONCE_ENTROPY_BITS: u32 = 96;

/// Size of the nonce alphabet (`[A-Za-z0-9]`).
const ALPHABET_SIZE: f64 = 62.0;

/// Number of alphanumeric characters needed to carry `bits` of entropy.
///
/// 96 bits needs 17 characters.
pub fn nonce_length_for_entropy(bits: u32) -> usize {
    (f64::from(bits) / ALPHABET_SIZE.log2()).ceil() as usize
}

/// Generate an alphanumeric nonce carrying at least `bits` of entropy.
///
/// Uses the thread-local CSPRNG.
pub fn generate_nonce(bits: u32) -> String {
    let len = nonce_length_for_entropy(bits);
    Alphanumeric.sample_string(&mut rand::thread_rng(), len)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fields::MIN_NONCE_LENGTH;

    #[test]
    fn test_length_for_default_entropy() {
        assert_eq!(nonce_length_for_entropy(DEFAULT_NONCE_ENTROPY_BITS), 17);
        assert_eq!(nonce_length_for_entropy(0), 0);
    }

    #[test]
    fn test_generated_nonce_shape() {
        let nonce = generate_nonce(DEFAULT_NONCE_ENTROPY_BITS);
        assert_eq!(nonce.len(), 17);
        assert!(nonce.len() >= MIN_NONCE_LENGTH);
        assert!(nonce.chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn test_nonces_differ() {
        let a = generate_nonce(DEFAULT_NONCE_ENTROPY_BITS);
        let b = generate_nonce(DEFAULT_NONCE_ENTROPY_BITS);
        assert_ne!(a, b);
    }
}
