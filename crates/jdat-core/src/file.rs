//! In-memory JDAT document.
//!
//! [`JdatFile`] owns the ordered blocks and comments of one document and is
//! the only place where cipher calls are applied to block content.
//!
//! Link uniqueness is enforced by [`JdatFile::add_block`] only. Parsed files
//! may carry duplicate links; every lookup resolves to the first match in
//! block order.

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::block::{Block, BlockKind, BlockSummary};
use crate::crypto;
use crate::error::{JdatError, Result};
use crate::format::{
    self,
    parser::{BLOCK_CLOSE, BLOCK_OPEN, COMMENT_CLOSE, COMMENT_OPEN},
};
use crate::fs::write_atomic;

/// One logical `.jdat` document.
#[derive(Debug, Clone, Default)]
pub struct JdatFile {
    path: Option<PathBuf>,
    blocks: Vec<Block>,
    comments: Vec<String>,
}

impl JdatFile {
    /// Create an empty document with no path.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty document that will save to `path`.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
            ..Self::default()
        }
    }

    /// Build a document from text. Never fails; malformed segments are dropped.
    pub fn parse(text: &str) -> Self {
        let parsed = format::parse(text);
        Self {
            path: None,
            blocks: parsed.blocks,
            comments: parsed.comments,
        }
    }

    /// Read and parse a document from disk.
    ///
    /// # Errors
    ///
    /// Returns `JdatError::FileNotFound` if the path does not exist, or
    /// `JdatError::Io` if it cannot be read as UTF-8 text.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(JdatError::FileNotFound(path.to_path_buf()));
        }
        let text = std::fs::read_to_string(path)?;
        let mut file = Self::parse(&text);
        file.path = Some(path.to_path_buf());
        info!(path = %path.display(), blocks = file.blocks.len(), "loaded document");
        Ok(file)
    }

    /// Write the document to `path`, or to the stored path when `None`.
    ///
    /// A given path becomes the stored path on success.
    ///
    /// # Errors
    ///
    /// Returns `JdatError::MissingPath` when no path is available.
    pub fn save(&mut self, path: Option<&Path>) -> Result<()> {
        let target = match path {
            Some(path) => path.to_path_buf(),
            None => self.path.clone().ok_or(JdatError::MissingPath)?,
        };
        write_atomic(&target, self.to_jdat().as_bytes())?;
        info!(path = %target.display(), blocks = self.blocks.len(), "saved document");
        self.path = Some(target);
        Ok(())
    }

    /// Canonical text form of the whole document.
    pub fn to_jdat(&self) -> String {
        format::serialize(&self.comments, &self.blocks)
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn set_path(&mut self, path: impl Into<PathBuf>) {
        self.path = Some(path.into());
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn comments(&self) -> &[String] {
        &self.comments
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty() && self.comments.is_empty()
    }

    // --- Lookup ---

    pub fn get_by_link(&self, link: &str) -> Option<&Block> {
        self.blocks.iter().find(|block| block.link() == link)
    }

    pub fn get_by_link_mut(&mut self, link: &str) -> Option<&mut Block> {
        self.blocks.iter_mut().find(|block| block.link() == link)
    }

    pub fn get_by_name(&self, name: &str) -> Option<&Block> {
        self.blocks.iter().find(|block| block.name() == name)
    }

    /// Find a block by link, then by name.
    pub fn resolve(&self, target: &str) -> Option<&Block> {
        self.resolve_index(target).and_then(|index| self.blocks.get(index))
    }

    /// Mutable variant of [`JdatFile::resolve`].
    pub fn resolve_mut(&mut self, target: &str) -> Option<&mut Block> {
        let index = self.resolve_index(target)?;
        self.blocks.get_mut(index)
    }

    /// Position of the block [`JdatFile::resolve`] would return.
    ///
    /// Use the index with the `*_at` mutators when the target may be a name:
    /// re-resolving that block by its link can land on an earlier block that
    /// shares the link.
    pub fn resolve_index(&self, target: &str) -> Option<usize> {
        self.position_by_link(target)
            .or_else(|| self.blocks.iter().position(|block| block.name() == target))
    }

    fn position_by_link(&self, link: &str) -> Option<usize> {
        self.blocks.iter().position(|block| block.link() == link)
    }

    /// Blocks whose name or link contains `query`, ignoring case.
    pub fn find(&self, query: &str) -> Vec<&Block> {
        let needle = query.to_lowercase();
        self.blocks
            .iter()
            .filter(|block| {
                block.name().to_lowercase().contains(&needle)
                    || block.link().to_lowercase().contains(&needle)
            })
            .collect()
    }

    pub fn list_blocks(&self) -> Vec<BlockSummary> {
        self.blocks.iter().map(Block::summary).collect()
    }

    // --- Mutation ---

    /// Append a new clear block.
    ///
    /// # Errors
    ///
    /// - `DuplicateLink` if a block already uses `link`
    /// - `InvalidInput` if `name` or `link` is empty or contains whitespace,
    ///   or if `content` contains the block terminator
    pub fn add_block(
        &mut self,
        name: &str,
        link: &str,
        kind: BlockKind,
        content: &str,
    ) -> Result<&mut Block> {
        validate_token("name", name)?;
        validate_token("link", link)?;
        if self.get_by_link(link).is_some() {
            return Err(JdatError::DuplicateLink(link.to_string()));
        }
        validate_content(content)?;

        debug!(link, kind = kind.code(), "adding block");
        self.blocks.push(Block::new(name, link, kind, content));
        let index = self.blocks.len() - 1;
        Ok(&mut self.blocks[index])
    }

    /// Remove the first block with `link`. Returns whether one was removed.
    pub fn remove_block(&mut self, link: &str) -> bool {
        match self.position_by_link(link) {
            Some(index) => {
                self.blocks.remove(index);
                debug!(link, "removed block");
                true
            }
            None => false,
        }
    }

    /// Replace the content of the block with `link` verbatim.
    ///
    /// # Errors
    ///
    /// - `BlockNotFound` if no block has `link`
    /// - `InvalidInput` if `content` contains the block terminator
    pub fn set_block_content(&mut self, link: &str, content: &str) -> Result<()> {
        let index = self.require_index(link)?;
        self.set_content_at(index, content)
    }

    /// Replace the content of the block at `index` verbatim.
    ///
    /// # Errors
    ///
    /// - `BlockNotFound` if `index` is out of range
    /// - `InvalidInput` if `content` contains the block terminator
    pub fn set_content_at(&mut self, index: usize, content: &str) -> Result<()> {
        validate_content(content)?;
        self.block_at_mut(index)?.set_content(content);
        Ok(())
    }

    /// Append a free-form comment.
    ///
    /// # Errors
    ///
    /// `InvalidInput` if `text` contains a comment or block delimiter. Comments
    /// are written ahead of every block, so a block header inside one would
    /// load back as a block of its own.
    pub fn add_comment(&mut self, text: &str) -> Result<()> {
        for marker in [COMMENT_OPEN, COMMENT_CLOSE, BLOCK_OPEN] {
            if text.contains(marker) {
                return Err(JdatError::InvalidInput(format!(
                    "Comment cannot contain '{}'",
                    marker
                )));
            }
        }
        self.comments.push(text.trim().to_string());
        Ok(())
    }

    // --- Encryption ---

    /// Encrypt the content of the block with `link`.
    ///
    /// Structured content is flushed to canonical form first, so decryption
    /// yields `  key: value` lines.
    ///
    /// # Errors
    ///
    /// - `BlockNotFound` if no block has `link`
    /// - `AlreadyEncrypted` if the block is already encrypted
    pub fn encrypt_block(&mut self, link: &str, password: &str) -> Result<()> {
        let index = self.require_index(link)?;
        self.encrypt_at(index, password)
    }

    /// Encrypt the block at `index`. Errors as [`JdatFile::encrypt_block`].
    pub fn encrypt_at(&mut self, index: usize, password: &str) -> Result<()> {
        let block = self.block_at_mut(index)?;
        if block.is_encrypted() {
            return Err(JdatError::AlreadyEncrypted(block.link().to_string()));
        }
        block.flush();
        let blob = crypto::encrypt(block.content(), password)?;
        block.seal(blob);
        info!(link = block.link(), index, "encrypted block");
        Ok(())
    }

    /// Decrypt the content of the block with `link`.
    ///
    /// On failure the block is left exactly as it was.
    ///
    /// # Errors
    ///
    /// - `BlockNotFound` if no block has `link`
    /// - `NotEncrypted` if the block is in clear text
    /// - `AuthenticationFailed` for a wrong password or damaged ciphertext
    pub fn decrypt_block(&mut self, link: &str, password: &str) -> Result<()> {
        let index = self.require_index(link)?;
        self.decrypt_at(index, password)
    }

    /// Decrypt the block at `index`. Errors as [`JdatFile::decrypt_block`].
    pub fn decrypt_at(&mut self, index: usize, password: &str) -> Result<()> {
        let block = self.block_at_mut(index)?;
        if !block.is_encrypted() {
            return Err(JdatError::NotEncrypted(block.link().to_string()));
        }
        let plaintext = crypto::decrypt(block.content(), password)?;
        block.unseal(plaintext);
        info!(link = block.link(), index, "decrypted block");
        Ok(())
    }

    fn require_index(&self, link: &str) -> Result<usize> {
        self.position_by_link(link)
            .ok_or_else(|| JdatError::BlockNotFound(link.to_string()))
    }

    fn block_at_mut(&mut self, index: usize) -> Result<&mut Block> {
        self.blocks
            .get_mut(index)
            .ok_or_else(|| JdatError::BlockNotFound(format!("#{}", index)))
    }
}

fn validate_token(field: &str, value: &str) -> Result<()> {
    if value.is_empty() {
        return Err(JdatError::InvalidInput(format!("Block {} cannot be empty", field)));
    }
    if value.chars().any(char::is_whitespace) {
        return Err(JdatError::InvalidInput(format!(
            "Block {} '{}' cannot contain whitespace",
            field, value
        )));
    }
    // COMMENT_CLOSE ends with BLOCK_CLOSE, so two checks cover all three.
    for marker in [COMMENT_OPEN, BLOCK_CLOSE] {
        if value.contains(marker) {
            return Err(JdatError::InvalidInput(format!(
                "Block {} '{}' cannot contain '{}'",
                field, value, marker
            )));
        }
    }
    Ok(())
}

fn validate_content(content: &str) -> Result<()> {
    if content.contains(BLOCK_CLOSE) {
        return Err(JdatError::InvalidInput(format!(
            "Content cannot contain the block terminator '{}'",
            BLOCK_CLOSE
        )));
    }
    Ok(())
}
