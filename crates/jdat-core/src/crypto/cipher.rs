//! AES-256-GCM encryption of block payloads.
//!
//! A packed blob is `salt(16) || nonce(12) || ciphertext || tag(16)`,
//! encoded with standard base64. Every call to [`encrypt`] draws a fresh
//! salt and nonce, so the derived key never sees the same nonce twice.

use aes_gcm::aead::{Aead, KeyInit};
use aes_gcm::{Aes256Gcm, Nonce};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use tracing::debug;

use super::key::{derive_key, SALT_LENGTH};
use crate::error::{JdatError, Result};

/// Length of a GCM nonce in bytes.
pub const NONCE_LENGTH: usize = 12;

/// Length of the GCM authentication tag in bytes.
pub const TAG_LENGTH: usize = 16;

/// Bytes preceding the ciphertext in a packed blob.
pub const HEADER_LENGTH: usize = SALT_LENGTH + NONCE_LENGTH;

fn random_bytes<const N: usize>() -> Result<[u8; N]> {
    let mut bytes = [0u8; N];
    getrandom::getrandom(&mut bytes)
        .map_err(|e| JdatError::Crypto(format!("Random generator unavailable: {}", e)))?;
    Ok(bytes)
}

/// Encrypt a payload under a password.
///
/// # Returns
///
/// Returns the base64 packed blob, suitable for storing as block content.
///
/// # Examples
///
/// ```
/// use jdat_core::crypto::{decrypt, encrypt};
///
/// let blob = encrypt("secret data", "my-password").unwrap();
/// assert_ne!(blob, "secret data");
/// assert_eq!(decrypt(&blob, "my-password").unwrap(), "secret data");
/// ```
pub fn encrypt(plaintext: &str, password: &str) -> Result<String> {
    let salt: [u8; SALT_LENGTH] = random_bytes()?;
    let nonce_bytes: [u8; NONCE_LENGTH] = random_bytes()?;
    let key = derive_key(password, &salt);

    let cipher = Aes256Gcm::new_from_slice(key.as_bytes())
        .map_err(|e| JdatError::Crypto(format!("Failed to create cipher: {}", e)))?;
    let ciphertext = cipher
        .encrypt(Nonce::from_slice(&nonce_bytes), plaintext.as_bytes())
        .map_err(|_| JdatError::Crypto("Encryption failed".to_string()))?;

    let mut packed = Vec::with_capacity(HEADER_LENGTH + ciphertext.len());
    packed.extend_from_slice(&salt);
    packed.extend_from_slice(&nonce_bytes);
    packed.extend_from_slice(&ciphertext);

    debug!(plaintext_len = plaintext.len(), packed_len = packed.len(), "encrypted payload");
    Ok(STANDARD.encode(packed))
}

/// Decrypt a base64 packed blob with a password.
///
/// # Errors
///
/// Returns `JdatError::AuthenticationFailed` if:
/// - The password is incorrect
/// - The blob is not valid base64, is truncated, or was tampered with
/// - The recovered plaintext is not UTF-8
///
/// These cases are indistinguishable to the caller.
pub fn decrypt(blob: &str, password: &str) -> Result<String> {
    let packed = STANDARD
        .decode(blob.trim())
        .map_err(|_| JdatError::AuthenticationFailed)?;

    // Too short to hold salt and nonce: same signal as a bad tag.
    if packed.len() < HEADER_LENGTH {
        debug!(packed_len = packed.len(), "packed blob shorter than header");
        return Err(JdatError::AuthenticationFailed);
    }

    let (salt, rest) = packed.split_at(SALT_LENGTH);
    let (nonce_bytes, ciphertext) = rest.split_at(NONCE_LENGTH);
    let salt: [u8; SALT_LENGTH] = salt
        .try_into()
        .map_err(|_| JdatError::AuthenticationFailed)?;
    let key = derive_key(password, &salt);

    let cipher =
        Aes256Gcm::new_from_slice(key.as_bytes()).map_err(|_| JdatError::AuthenticationFailed)?;
    let plaintext = cipher
        .decrypt(Nonce::from_slice(nonce_bytes), ciphertext)
        .map_err(|_| JdatError::AuthenticationFailed)?;

    String::from_utf8(plaintext).map_err(|_| JdatError::AuthenticationFailed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encrypt_decrypt_round_trip() {
        let plaintext = "Hello, World! This is secret data.";

        let blob = encrypt(plaintext, "test-password-123").unwrap();
        let decrypted = decrypt(&blob, "test-password-123").unwrap();

        assert_eq!(decrypted, plaintext);
    }

    #[test]
    fn test_packed_layout_length() {
        let plaintext = "  name: Alice\n  age: 30";
        let blob = encrypt(plaintext, "secret123").unwrap();
        let packed = STANDARD.decode(&blob).unwrap();

        assert_eq!(packed.len(), HEADER_LENGTH + plaintext.len() + TAG_LENGTH);
    }

    #[test]
    fn test_wrong_password_fails_decryption() {
        let blob = encrypt("secret data", "correct-password").unwrap();

        let result = decrypt(&blob, "wrong-password");
        assert!(matches!(result, Err(JdatError::AuthenticationFailed)));
    }

    #[test]
    fn test_corrupted_data_fails_decryption() {
        let blob = encrypt("secret data", "test-password").unwrap();
        let mut packed = STANDARD.decode(&blob).unwrap();
        let len = packed.len();
        packed[len - 1] ^= 0xFF;

        let result = decrypt(&STANDARD.encode(packed), "test-password");
        assert!(matches!(result, Err(JdatError::AuthenticationFailed)));
    }

    #[test]
    fn test_truncated_blob_is_authentication_failure() {
        let short = STANDARD.encode([0u8; HEADER_LENGTH - 1]);
        assert!(matches!(
            decrypt(&short, "pw"),
            Err(JdatError::AuthenticationFailed)
        ));

        let header_only = STANDARD.encode([0u8; HEADER_LENGTH]);
        assert!(matches!(
            decrypt(&header_only, "pw"),
            Err(JdatError::AuthenticationFailed)
        ));
    }

    #[test]
    fn test_invalid_base64_is_authentication_failure() {
        assert!(matches!(
            decrypt("not base64 at all!!", "pw"),
            Err(JdatError::AuthenticationFailed)
        ));
    }

    #[test]
    fn test_surrounding_whitespace_is_ignored() {
        let blob = encrypt("payload", "pw").unwrap();
        let padded = format!("\n  {}\n", blob);
        assert_eq!(decrypt(&padded, "pw").unwrap(), "payload");
    }

    #[test]
    fn test_same_plaintext_encrypts_differently() {
        let blob1 = encrypt("same plaintext", "same-password").unwrap();
        let blob2 = encrypt("same plaintext", "same-password").unwrap();

        assert_ne!(blob1, blob2);
    }

    #[test]
    fn test_empty_payload_round_trip() {
        let blob = encrypt("", "pw").unwrap();
        assert_eq!(decrypt(&blob, "pw").unwrap(), "");
    }

    #[test]
    fn test_unicode_payload_round_trip() {
        let plaintext = "clé: données chiffrées 🔒";
        let blob = encrypt(plaintext, "mot de passe").unwrap();
        assert_eq!(decrypt(&blob, "mot de passe").unwrap(), plaintext);
    }
}
