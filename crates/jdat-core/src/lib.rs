//! # JDAT Core
//!
//! Core library for JDAT - a plain-text document format made of named,
//! linked blocks, each of which can be encrypted on its own.
//!
//! This crate provides the data model, the text grammar and the block
//! encryption, independent of any command-line or interactive front end.
//! Passwords and paths are always explicit parameters.
//!
//! ## Architecture
//!
//! - **block**: block model, kinds, structured key/value view
//! - **format**: parser and canonical serializer
//! - **crypto**: AES-256-GCM with a salted SHA-256 key per block
//! - **file**: the document registry (lookup, add/remove, encrypt/decrypt, load/save)
//! - **fs**: atomic writes
//!
//! ## Example
//!
//! ```
//! use jdat_core::JdatFile;
//!
//! let mut file = JdatFile::parse("(n:user l:u1 t:1 {\n  name: Alice\n})\n");
//! file.encrypt_block("u1", "secret123").unwrap();
//! assert!(file.get_by_link("u1").unwrap().is_encrypted());
//!
//! file.decrypt_block("u1", "secret123").unwrap();
//! assert_eq!(file.get_by_link("u1").unwrap().get("name").unwrap(), Some("Alice"));
//! ```

pub mod block;
pub mod crypto;
pub mod error;
pub mod file;
pub mod format;
pub mod fs;

pub use block::{Block, BlockKind, BlockSummary, StructuredView};
pub use error::{JdatError, Result};
pub use file::JdatFile;

/// Core version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Conventional file extension, without the dot.
pub const FILE_EXTENSION: &str = "jdat";
