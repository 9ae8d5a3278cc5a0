//! Key derivation for block encryption.
//!
//! The key is a single SHA-256 pass over `password || salt`. This is fast
//! and offers no resistance to offline guessing: a stolen file can be
//! brute-forced at hash speed. It is kept as-is because the derivation is
//! part of the on-disk format; changing it would make existing files
//! unreadable. Use high-entropy passwords.

use sha2::{Digest, Sha256};
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Length of a salt in bytes.
pub const SALT_LENGTH: usize = 16;

/// Length of derived key in bytes (32 bytes = 256 bits for AES-256).
pub const KEY_LENGTH: usize = 32;

/// A symmetric key derived from a password and salt.
///
/// Key material is zeroized from memory when dropped.
#[derive(Clone, ZeroizeOnDrop)]
pub struct DerivedKey {
    key: [u8; KEY_LENGTH],
}

impl DerivedKey {
    pub(crate) fn from_bytes(bytes: [u8; KEY_LENGTH]) -> Self {
        Self { key: bytes }
    }

    /// Get a reference to the raw key bytes.
    ///
    /// # Security
    ///
    /// Avoid storing or logging this value. Use only for immediate encryption operations.
    pub fn as_bytes(&self) -> &[u8; KEY_LENGTH] {
        &self.key
    }
}

impl std::fmt::Debug for DerivedKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DerivedKey")
            .field("key", &"[REDACTED]")
            .finish()
    }
}

/// Derive an AES-256 key from a password and salt.
///
/// Same password + salt always produces the same key. Empty passwords are
/// accepted; the format places no constraint on them.
///
/// # Examples
///
/// ```
/// use jdat_core::crypto::derive_key;
///
/// let salt = [7u8; 16];
/// let key = derive_key("my-password", &salt);
/// assert_eq!(key.as_bytes().len(), 32);
/// ```
pub fn derive_key(password: &str, salt: &[u8; SALT_LENGTH]) -> DerivedKey {
    let mut hasher = Sha256::new();
    hasher.update(password.as_bytes());
    hasher.update(salt);
    let mut digest = hasher.finalize();

    let mut key = DerivedKey::from_bytes([0u8; KEY_LENGTH]);
    key.key.copy_from_slice(&digest);
    digest.as_mut_slice().zeroize();
    key
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_derivation_deterministic() {
        let salt = *b"unique-salt-1234";

        let key1 = derive_key("test-password", &salt);
        let key2 = derive_key("test-password", &salt);

        assert_eq!(key1.as_bytes(), key2.as_bytes());
    }

    #[test]
    fn test_different_salt_different_key() {
        let key1 = derive_key("test-password", b"salt1-1234567890");
        let key2 = derive_key("test-password", b"salt2-1234567890");

        assert_ne!(key1.as_bytes(), key2.as_bytes());
    }

    #[test]
    fn test_different_password_different_key() {
        let salt = *b"fixed-salt-12345";

        let key1 = derive_key("password-one", &salt);
        let key2 = derive_key("password-two", &salt);

        assert_ne!(key1.as_bytes(), key2.as_bytes());
    }

    #[test]
    fn test_matches_sha256_of_password_then_salt() {
        let salt = [0u8; SALT_LENGTH];
        let key = derive_key("abc", &salt);

        let mut material = b"abc".to_vec();
        material.extend_from_slice(&salt);
        let expected = Sha256::digest(&material);

        assert_eq!(&key.as_bytes()[..], expected.as_slice());
    }

    #[test]
    fn test_empty_password_allowed() {
        let key = derive_key("", &[1u8; SALT_LENGTH]);
        assert_eq!(key.as_bytes().len(), KEY_LENGTH);
    }

    #[test]
    fn test_derived_key_debug_redacts() {
        let key = derive_key("test-password", b"salt-12345678901");

        let debug_output = format!("{:?}", key);
        assert!(debug_output.contains("REDACTED"));

        let key_hex = hex::encode(&key.as_bytes()[..4]);
        assert!(!debug_output.contains(&key_hex));
    }
}
