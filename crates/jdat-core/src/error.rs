//! Error types for JDAT core operations.
//!
//! This module defines the error hierarchy for all core operations.
//! Errors are descriptive at the core level; the CLI layer maps these
//! to user-friendly messages.
//!
//! Two failure modes are deliberately *not* variants:
//! - unparseable fragments are skipped by the parser, never reported;
//! - a packed ciphertext that is too short to hold salt and nonce is
//!   reported as [`JdatError::AuthenticationFailed`] like any other
//!   decryption failure.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for JDAT operations.
pub type Result<T> = std::result::Result<T, JdatError>;

/// Core error type for JDAT operations.
#[derive(Debug, Error)]
pub enum JdatError {
    /// Load from a path that does not exist
    #[error("File not found: {}", .0.display())]
    FileNotFound(PathBuf),

    /// `add` with a link already present in the file
    #[error("A block with link '{0}' already exists")]
    DuplicateLink(String),

    /// Lookup target is absent
    #[error("Block not found: {0}")]
    BlockNotFound(String),

    /// Encrypt requested on an encrypted block
    #[error("Block '{0}' is already encrypted")]
    AlreadyEncrypted(String),

    /// Decrypt requested on a clear block
    #[error("Block '{0}' is not encrypted")]
    NotEncrypted(String),

    /// Key/value access while the content is ciphertext
    #[error("Block '{0}' is encrypted; decrypt it before reading its fields")]
    StructuralAccessOnEncrypted(String),

    /// Key/value mutation on a block without structured content
    #[error("Block '{0}' does not hold structured data")]
    NotStructured(String),

    /// Wrong password or corrupted/truncated ciphertext
    #[error("Incorrect password or corrupted data")]
    AuthenticationFailed,

    /// Encryption machinery failure (RNG, cipher setup)
    #[error("Encryption error: {0}")]
    Crypto(String),

    /// Invalid user input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Save requested without any destination
    #[error("No file path set")]
    MissingPath,

    /// I/O error
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
}

impl JdatError {
    /// Whether this error came from a password/ciphertext check.
    pub fn is_authentication_failure(&self) -> bool {
        matches!(self, JdatError::AuthenticationFailed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_authentication_failure_message_is_generic() {
        let err = JdatError::AuthenticationFailed;
        assert_eq!(err.to_string(), "Incorrect password or corrupted data");
        assert!(err.is_authentication_failure());
    }

    #[test]
    fn test_io_error_converts() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: JdatError = io.into();
        assert!(matches!(err, JdatError::Io { .. }));
        assert!(!err.is_authentication_failure());
    }

    #[test]
    fn test_file_not_found_shows_path() {
        let err = JdatError::FileNotFound(PathBuf::from("/tmp/missing.jdat"));
        assert!(err.to_string().contains("/tmp/missing.jdat"));
    }
}
