//! Filesystem utilities for atomic saves.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Write `contents` to `destination` through a temp file in the same directory.
///
/// Readers never observe a half-written document: the temp file is fully
/// written and synced before it replaces the destination.
pub fn write_atomic(destination: &Path, contents: &[u8]) -> io::Result<()> {
    let temp_path = temp_path_for(destination);
    if let Err(err) = write_synced(&temp_path, contents) {
        let _ = fs::remove_file(&temp_path);
        return Err(err);
    }
    rename_with_fallback(&temp_path, destination)
}

fn write_synced(path: &Path, contents: &[u8]) -> io::Result<()> {
    let mut file = fs::File::create(path)?;
    file.write_all(contents)?;
    file.sync_all()
}

fn temp_path_for(destination: &Path) -> PathBuf {
    let file_name = destination
        .file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_else(|| "document".to_string());
    destination.with_file_name(format!(".{}.{}.tmp", file_name, std::process::id()))
}

/// Atomically rename a file, with fallback for platforms where rename fails if target exists.
///
/// On some platforms (notably Windows), `fs::rename` fails if the destination already exists.
/// This function handles that case by removing the destination first and retrying.
///
/// If the rename ultimately fails, the temp file is cleaned up.
pub fn rename_with_fallback(temp_path: &Path, destination: &Path) -> io::Result<()> {
    if let Err(initial_err) = fs::rename(temp_path, destination) {
        // Best-effort replace on platforms where rename fails if target exists.
        let _ = fs::remove_file(destination);
        fs::rename(temp_path, destination).map_err(|retry_err| {
            let _ = fs::remove_file(temp_path);
            io::Error::new(
                retry_err.kind(),
                format!(
                    "Atomic rename failed (initial: {}, retry: {})",
                    initial_err, retry_err
                ),
            )
        })?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_write_atomic_creates_file() {
        let dir = tempdir().unwrap();
        let dest = dir.path().join("notes.jdat");

        write_atomic(&dest, b"({<hello>})\n").unwrap();

        assert_eq!(fs::read_to_string(&dest).unwrap(), "({<hello>})\n");
        assert!(!temp_path_for(&dest).exists());
    }

    #[test]
    fn test_write_atomic_overwrites_existing() {
        let dir = tempdir().unwrap();
        let dest = dir.path().join("notes.jdat");
        fs::write(&dest, "old").unwrap();

        write_atomic(&dest, b"new").unwrap();

        assert_eq!(fs::read_to_string(&dest).unwrap(), "new");
    }

    #[test]
    fn test_write_atomic_missing_directory_fails_cleanly() {
        let dir = tempdir().unwrap();
        let dest = dir.path().join("missing").join("notes.jdat");

        assert!(write_atomic(&dest, b"x").is_err());
        assert!(!dest.exists());
    }

    #[test]
    fn test_rename_overwrites_existing() {
        let dir = tempdir().unwrap();
        let temp = dir.path().join("temp.txt");
        let dest = dir.path().join("dest.txt");
        fs::write(&dest, "old").unwrap();
        fs::write(&temp, "new").unwrap();

        rename_with_fallback(&temp, &dest).unwrap();

        assert!(!temp.exists());
        assert_eq!(fs::read_to_string(&dest).unwrap(), "new");
    }
}
