//! Path resolution for config and document files.

use std::path::{Path, PathBuf};

use jdat_core::FILE_EXTENSION;

use crate::cli::Cli;
use crate::config::{default_config_path, JdatConfig};
use crate::errors::CliError;

/// Resolve the config file path, checking JDAT_CONFIG env var first.
pub fn resolve_config_path() -> anyhow::Result<PathBuf> {
    if let Ok(value) = std::env::var("JDAT_CONFIG") {
        if !value.trim().is_empty() {
            return Ok(PathBuf::from(value));
        }
    }
    default_config_path()
}

/// Resolve the document path from `--file`/`JDAT_FILE`, then the config file.
pub fn resolve_file_path(cli: &Cli, config: &JdatConfig) -> anyhow::Result<PathBuf> {
    if let Some(path) = cli.file.as_deref().filter(|p| !p.trim().is_empty()) {
        return Ok(PathBuf::from(path));
    }
    if let Some(path) = config.file.path.as_deref().filter(|p| !p.trim().is_empty()) {
        return Ok(PathBuf::from(path));
    }
    Err(CliError::not_found(
        "No document selected",
        "Pass --file <PATH>, set JDAT_FILE, or set [file] path in the config file.",
    )
    .into())
}

/// Append the `.jdat` extension when `path` has none.
pub fn normalize_new_path(path: &str) -> PathBuf {
    let path = Path::new(path);
    if path.extension().is_some_and(|ext| ext == FILE_EXTENSION) {
        path.to_path_buf()
    } else {
        let mut name = path.as_os_str().to_os_string();
        name.push(".");
        name.push(FILE_EXTENSION);
        PathBuf::from(name)
    }
}

/// Error message when the document file is missing.
pub fn missing_file_message(path: &Path) -> String {
    format!("No document found at {}", path.display())
}

/// Hint shown with [`missing_file_message`].
pub fn missing_file_hint(path: &Path) -> String {
    format!("Run `jdat new {}` to create it.", path.display())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FileSection;
    use clap::Parser;

    #[test]
    fn test_normalize_appends_extension() {
        assert_eq!(normalize_new_path("notes"), PathBuf::from("notes.jdat"));
        assert_eq!(normalize_new_path("notes.txt"), PathBuf::from("notes.txt.jdat"));
        assert_eq!(normalize_new_path("dir/notes.jdat"), PathBuf::from("dir/notes.jdat"));
    }

    #[test]
    fn test_flag_wins_over_config() {
        let cli = Cli::parse_from(["jdat", "--file", "flag.jdat", "list"]);
        let config = JdatConfig {
            file: FileSection {
                path: Some("config.jdat".to_string()),
            },
            ..Default::default()
        };
        assert_eq!(
            resolve_file_path(&cli, &config).unwrap(),
            PathBuf::from("flag.jdat")
        );
    }

    #[test]
    fn test_config_used_without_flag() {
        let mut cli = Cli::parse_from(["jdat", "list"]);
        cli.file = None;
        let config = JdatConfig {
            file: FileSection {
                path: Some("config.jdat".to_string()),
            },
            ..Default::default()
        };
        assert_eq!(
            resolve_file_path(&cli, &config).unwrap(),
            PathBuf::from("config.jdat")
        );
    }

    #[test]
    fn test_missing_path_is_not_found() {
        let mut cli = Cli::parse_from(["jdat", "list"]);
        cli.file = None;
        let err = resolve_file_path(&cli, &JdatConfig::default()).unwrap_err();
        let cli_err = err.downcast_ref::<CliError>().unwrap();
        assert!(matches!(cli_err, CliError::NotFound { .. }));
    }
}
