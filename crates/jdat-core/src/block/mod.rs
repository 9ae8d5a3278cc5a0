//! Block model.
//!
//! A [`Block`] is one named, linked content unit. Structured blocks expose a
//! lazily built key/value view over their content. The view is a cache: every
//! path that replaces `content` clears it, and every key mutation rewrites
//! `content` from the view before returning.

mod kind;
pub mod structured;

use std::borrow::Cow;

use once_cell::unsync::OnceCell;
use serde::Serialize;

use crate::error::{JdatError, Result};

pub use kind::BlockKind;
pub use structured::StructuredView;

use structured::{parse_lines, render_lines, validate_entry};

/// One content unit of a JDAT file.
#[derive(Debug, Clone)]
pub struct Block {
    name: String,
    link: String,
    kind: BlockKind,
    content: String,
    encrypted: bool,
    view: OnceCell<StructuredView>,
}

/// Listing row for a block (no content).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BlockSummary {
    pub name: String,
    pub link: String,
    pub kind: BlockKind,
    pub encrypted: bool,
}

impl Block {
    /// Create a clear (unencrypted) block.
    pub fn new(
        name: impl Into<String>,
        link: impl Into<String>,
        kind: BlockKind,
        content: impl Into<String>,
    ) -> Self {
        Self::from_parts(name.into(), link.into(), kind, content.into(), false)
    }

    pub(crate) fn from_parts(
        name: String,
        link: String,
        kind: BlockKind,
        content: String,
        encrypted: bool,
    ) -> Self {
        Self {
            name,
            link,
            kind,
            content,
            encrypted,
            view: OnceCell::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn link(&self) -> &str {
        &self.link
    }

    pub fn kind(&self) -> BlockKind {
        self.kind
    }

    /// Raw payload: key/value lines, opaque text, or a packed ciphertext.
    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn is_encrypted(&self) -> bool {
        self.encrypted
    }

    pub fn summary(&self) -> BlockSummary {
        BlockSummary {
            name: self.name.clone(),
            link: self.link.clone(),
            kind: self.kind,
            encrypted: self.encrypted,
        }
    }

    /// Ordered key/value view of the content.
    ///
    /// Built on first access and cached. Non-structured blocks have an empty
    /// view.
    ///
    /// # Errors
    ///
    /// Returns `JdatError::StructuralAccessOnEncrypted` while the block is
    /// encrypted.
    pub fn structured(&self) -> Result<&StructuredView> {
        self.ensure_clear()?;
        Ok(self.view.get_or_init(|| self.build_view()))
    }

    /// Look up a key in the structured view.
    pub fn get(&self, key: &str) -> Result<Option<&str>> {
        Ok(self.structured()?.get(key).map(String::as_str))
    }

    /// Look up a key, falling back to `default` when absent.
    pub fn get_or<'a>(&'a self, key: &str, default: &'a str) -> Result<&'a str> {
        Ok(self.get(key)?.unwrap_or(default))
    }

    /// Set a key on a structured block and rebuild its content.
    ///
    /// An existing key keeps its position; a new key is appended.
    ///
    /// # Errors
    ///
    /// - `StructuralAccessOnEncrypted` if the block is encrypted
    /// - `NotStructured` for raw or unknown kinds
    /// - `InvalidInput` if the entry would not fit on one `key: value` line
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.ensure_clear()?;
        if !self.kind.is_structured() {
            return Err(JdatError::NotStructured(self.link.clone()));
        }
        let (key, value) = (key.trim(), value.trim());
        validate_entry(key, value)?;

        let mut view = self
            .view
            .take()
            .unwrap_or_else(|| parse_lines(&self.content));
        view.insert(key.to_string(), value.to_string());
        self.content = render_lines(&view);
        self.view = OnceCell::from(view);
        Ok(())
    }

    /// Replace the content verbatim. Clears the structured view.
    pub fn set_content(&mut self, content: impl Into<String>) {
        self.content = content.into();
        self.invalidate_view();
    }

    /// Rewrite structured content in canonical form from its view.
    ///
    /// No-op for encrypted and non-structured blocks.
    pub fn flush(&mut self) {
        if self.encrypted || !self.kind.is_structured() {
            return;
        }
        let view = self
            .view
            .take()
            .unwrap_or_else(|| parse_lines(&self.content));
        self.content = render_lines(&view);
        self.view = OnceCell::from(view);
    }

    /// Content as it is written to disk.
    ///
    /// Structured blocks render from their view; raw text and ciphertext
    /// lose surrounding whitespace only.
    pub fn canonical_content(&self) -> Cow<'_, str> {
        if !self.encrypted && self.kind.is_structured() {
            Cow::Owned(render_lines(self.view.get_or_init(|| self.build_view())))
        } else {
            Cow::Borrowed(self.content.trim())
        }
    }

    pub(crate) fn seal(&mut self, blob: String) {
        self.content = blob;
        self.encrypted = true;
        self.invalidate_view();
    }

    pub(crate) fn unseal(&mut self, plaintext: String) {
        self.content = plaintext;
        self.encrypted = false;
        self.invalidate_view();
    }

    pub(crate) fn is_view_cached(&self) -> bool {
        self.view.get().is_some()
    }

    fn invalidate_view(&mut self) {
        self.view.take();
    }

    fn build_view(&self) -> StructuredView {
        if self.kind.is_structured() {
            parse_lines(&self.content)
        } else {
            StructuredView::new()
        }
    }

    fn ensure_clear(&self) -> Result<()> {
        if self.encrypted {
            return Err(JdatError::StructuralAccessOnEncrypted(self.link.clone()));
        }
        Ok(())
    }
}

/// Equality over the persisted fields; the cached view is ignored.
impl PartialEq for Block {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
            && self.link == other.link
            && self.kind == other.kind
            && self.content == other.content
            && self.encrypted == other.encrypted
    }
}

impl Eq for Block {}

#[cfg(test)]
mod tests {
    use super::*;

    fn user_block() -> Block {
        Block::new(
            "user",
            "u1",
            BlockKind::Structured,
            "\n  name: Alice\n  age: 30\n",
        )
    }

    #[test]
    fn test_structured_view_is_lazy() {
        let block = user_block();
        assert!(!block.is_view_cached());

        assert_eq!(block.get("name").unwrap(), Some("Alice"));
        assert!(block.is_view_cached());
    }

    #[test]
    fn test_get_or_default() {
        let block = user_block();
        assert_eq!(block.get_or("age", "0").unwrap(), "30");
        assert_eq!(block.get_or("email", "n/a").unwrap(), "n/a");
    }

    #[test]
    fn test_set_overwrites_in_place() {
        let mut block = user_block();
        block.set("name", "Bob").unwrap();
        block.set("email", "bob@example.com").unwrap();
        block.set("name", "Carol").unwrap();

        let keys: Vec<&str> = block
            .structured()
            .unwrap()
            .keys()
            .map(String::as_str)
            .collect();
        assert_eq!(keys, vec!["name", "age", "email"]);
        assert_eq!(
            block.content(),
            "  name: Carol\n  age: 30\n  email: bob@example.com"
        );
    }

    #[test]
    fn test_set_content_invalidates_view() {
        let mut block = user_block();
        assert_eq!(block.get("name").unwrap(), Some("Alice"));

        block.set_content("name: Dave");
        assert!(!block.is_view_cached());
        assert_eq!(block.get("name").unwrap(), Some("Dave"));
        assert_eq!(block.get("age").unwrap(), None);
    }

    #[test]
    fn test_set_on_raw_block_rejected() {
        let mut block = Block::new("script", "s1", BlockKind::Raw, "print('hi')");
        assert!(matches!(
            block.set("k", "v"),
            Err(JdatError::NotStructured(_))
        ));
        assert_eq!(block.get("k").unwrap(), None);
    }

    #[test]
    fn test_unknown_kind_behaves_as_raw() {
        let block = Block::new("x", "x1", BlockKind::Unknown(5), "a: b");
        assert!(block.structured().unwrap().is_empty());
        assert_eq!(block.canonical_content(), "a: b");
    }

    #[test]
    fn test_structural_access_on_encrypted_rejected() {
        let mut block = user_block();
        block.seal("Zm9v".to_string());

        assert!(matches!(
            block.get("name"),
            Err(JdatError::StructuralAccessOnEncrypted(_))
        ));
        assert!(matches!(
            block.set("name", "x"),
            Err(JdatError::StructuralAccessOnEncrypted(_))
        ));
    }

    #[test]
    fn test_invalid_entry_rejected() {
        let mut block = user_block();
        assert!(matches!(
            block.set("bad:key", "v"),
            Err(JdatError::InvalidInput(_))
        ));
        assert!(matches!(
            block.set("key", "line\nbreak"),
            Err(JdatError::InvalidInput(_))
        ));
        assert_eq!(block.get("name").unwrap(), Some("Alice"));
    }

    #[test]
    fn test_flush_canonicalizes_structured_content() {
        let mut block = user_block();
        block.flush();
        assert_eq!(block.content(), "  name: Alice\n  age: 30");
    }

    #[test]
    fn test_canonical_content_trims_raw_text() {
        let block = Block::new("code", "c1", BlockKind::Raw, "\n  indented\nline\n");
        assert_eq!(block.canonical_content(), "indented\nline");
        assert_eq!(block.content(), "\n  indented\nline\n");
    }

    #[test]
    fn test_equality_ignores_cache() {
        let a = user_block();
        let b = user_block();
        let _ = a.get("name").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_summary() {
        let summary = user_block().summary();
        assert_eq!(summary.link, "u1");
        assert_eq!(summary.kind, BlockKind::Structured);
        assert!(!summary.encrypted);
    }
}
