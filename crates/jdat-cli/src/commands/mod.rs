pub mod blocks;
pub mod crypto;
pub mod edit;
pub mod file;
pub mod misc;

use jdat_core::{Block, JdatFile};

use crate::errors::CliError;

/// Resolve a link or name to the position of an existing block.
///
/// Mutations go through the index so a name target hits that exact block
/// even when an earlier block shares its link.
pub(crate) fn resolve_index(file: &JdatFile, target: &str) -> anyhow::Result<usize> {
    file.resolve_index(target)
        .ok_or_else(|| block_not_found(target))
}

pub(crate) fn resolve_block<'f>(file: &'f JdatFile, target: &str) -> anyhow::Result<&'f Block> {
    file.resolve(target).ok_or_else(|| block_not_found(target))
}

pub(crate) fn resolve_block_mut<'f>(
    file: &'f mut JdatFile,
    target: &str,
) -> anyhow::Result<&'f mut Block> {
    file.resolve_mut(target)
        .ok_or_else(|| block_not_found(target))
}

fn block_not_found(target: &str) -> anyhow::Error {
    CliError::not_found(
        format!("No block with link or name '{}'", target),
        "Run `jdat list` to see block links.",
    )
    .into()
}
