//! Per-block authenticated encryption.
//!
//! - **AES-256-GCM**: authenticated encryption, no associated data
//! - **SHA-256**: key derivation over `password || salt`
//!
//! ## Security Model
//!
//! - Each block is encrypted independently; there is no session key
//! - A fresh random salt and nonce are drawn for every encryption
//! - Derived keys are zeroized from memory on drop
//! - Decryption failures are undifferentiated (no padding/format oracle)
//!
//! ## Threat Model
//!
//! We defend against:
//! - Reading an encrypted block without the password
//! - Undetected tampering with an encrypted block
//!
//! We do NOT defend against:
//! - Offline brute force of weak passwords (the derivation is a single hash)
//! - Compromised OS / keylogger
//! - Block metadata disclosure (name, link and kind stay in clear text)

pub mod cipher;
pub mod key;

pub use cipher::{decrypt, encrypt, HEADER_LENGTH, NONCE_LENGTH, TAG_LENGTH};
pub use key::{derive_key, DerivedKey, KEY_LENGTH, SALT_LENGTH};
