//! Cryptographic utility functions

use rand::RngCore;
use subtle::ConstantTimeEq;

/// Size of generated HS256 signing keys in bytes
pub const SIGNING_KEY_LEN: usize = 32;

/// Generate a cryptographically secure random key
pub fn generate_key(len: usize) -> Vec<u8> {
    let mut key = vec![0u8; len];
    rand::thread_rng().fill_bytes(&mut key);
    key
}

/// Generate a cryptographically secure random hex token
pub fn generate_token(byte_len: usize) -> String {
    encode_hex(&generate_key(byte_len))
}

/// Constant-time string comparison
pub fn constant_time_eq(a: &str, b: &str) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.as_bytes().ct_eq(b.as_bytes()).into()
}

/// Lowercase hex, two digits per byte
pub fn encode_hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_keys_have_requested_length_and_differ() {
        let a = generate_key(SIGNING_KEY_LEN);
        let b = generate_key(SIGNING_KEY_LEN);
        assert_eq!(a.len(), SIGNING_KEY_LEN);
        assert_ne!(a, b);
    }

    #[test]
    fn token_is_hex_of_double_length() {
        let token = generate_token(16);
        assert_eq!(token.len(), 32);
        assert!(token.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn constant_time_eq_compares_content() {
        assert!(constant_time_eq("secret", "secret"));
        assert!(!constant_time_eq("secret", "secreT"));
        assert!(!constant_time_eq("secret", "secrets"));
    }

    #[test]
    fn encode_hex_known_values() {
        assert_eq!(encode_hex(&[0x00, 0xff, 0x1a]), "00ff1a");
        assert_eq!(encode_hex(&[]), "");
    }
}
