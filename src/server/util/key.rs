//! Licence key generation.

use rand::Rng;

const KEY_LENGTH: usize = 32;

/// Generates a random 32-character alphanumeric licence key.
///
/// Uses uppercase letters, lowercase letters and digits drawn from the thread-local
/// cryptographically secure generator.
pub fn generate_license_key() -> String {
    const CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ\
                             abcdefghijklmnopqrstuvwxyz\
                             0123456789";

    let mut rng = rand::rng();

    (0..KEY_LENGTH)
        .map(|_| {
            let idx = rng.random_range(0..CHARSET.len());
            CHARSET[idx] as char
        })
        .collect()
}
