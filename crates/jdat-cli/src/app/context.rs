//! Application context for the JDAT CLI.
//!
//! Combines CLI arguments with the lazily-loaded config file.

use std::io::IsTerminal;
use std::path::{Path, PathBuf};

use jdat_core::{JdatError, JdatFile};
use once_cell::unsync::OnceCell;
use tracing::debug;

use crate::cli::Cli;
use crate::config::{read_config, JdatConfig};
use crate::errors::CliError;
use crate::ui::UiContext;

use super::resolver::{missing_file_hint, missing_file_message, resolve_config_path, resolve_file_path};

/// Application context that bundles CLI args with configuration.
pub struct AppContext<'a> {
    cli: &'a Cli,
    config: OnceCell<JdatConfig>,
}

impl<'a> AppContext<'a> {
    pub fn new(cli: &'a Cli) -> Self {
        Self {
            cli,
            config: OnceCell::new(),
        }
    }

    pub fn quiet(&self) -> bool {
        self.cli.quiet
    }

    /// Whether a human can answer prompts.
    pub fn interactive(&self) -> bool {
        std::io::stdin().is_terminal()
    }

    /// Get the configuration, loading it on first use.
    ///
    /// A missing config file yields the defaults.
    pub fn config(&self) -> anyhow::Result<&JdatConfig> {
        self.config.get_or_try_init(|| {
            let path = resolve_config_path()?;
            if path.exists() {
                debug!(path = %path.display(), "loading config");
                read_config(&path)
            } else {
                Ok(JdatConfig::default())
            }
        })
    }

    /// Build the UI context for a command.
    ///
    /// Falls back to defaults when the config cannot be read, so errors
    /// can still be rendered.
    pub fn ui_context(&self, json: bool) -> UiContext {
        let config_ascii = self.config().map(|c| c.ui.ascii).unwrap_or(false);
        UiContext::from_env(json, self.cli.no_color, self.cli.ascii || config_ascii)
    }

    pub fn file_path(&self) -> anyhow::Result<PathBuf> {
        resolve_file_path(self.cli, self.config()?)
    }

    /// Load the selected document.
    pub fn load_document(&self) -> anyhow::Result<JdatFile> {
        let path = self.file_path()?;
        JdatFile::load(&path).map_err(|err| match err {
            JdatError::FileNotFound(_) => {
                CliError::not_found(missing_file_message(&path), missing_file_hint(&path)).into()
            }
            other => other.into(),
        })
    }

    /// Save a document back to the path it was loaded from.
    pub fn save_document(&self, file: &mut JdatFile) -> anyhow::Result<()> {
        file.save(None)?;
        Ok(())
    }
}

/// Display form of a document path for headers.
pub fn display_path(file: &JdatFile) -> Option<String> {
    file.path().map(Path::display).map(|p| p.to_string())
}
