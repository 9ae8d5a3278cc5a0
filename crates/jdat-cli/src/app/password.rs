//! Password input for block encryption.
//!
//! `JDAT_PASSWORD` takes precedence over the interactive prompt. Without a
//! TTY the variable is required.

use dialoguer::Password;
use zeroize::Zeroizing;

use crate::errors::CliError;

const PASSWORD_ENV: &str = "JDAT_PASSWORD";

fn password_from_env() -> Option<Zeroizing<String>> {
    std::env::var(PASSWORD_ENV)
        .ok()
        .filter(|value| !value.is_empty())
        .map(Zeroizing::new)
}

fn no_tty_error() -> anyhow::Error {
    CliError::invalid_input(format!(
        "No password provided and no TTY available. Set {}.",
        PASSWORD_ENV
    ))
    .into()
}

/// Prompt for the password of an existing encrypted block.
pub fn prompt_password(interactive: bool) -> anyhow::Result<Zeroizing<String>> {
    if let Some(password) = password_from_env() {
        return Ok(password);
    }
    if !interactive {
        return Err(no_tty_error());
    }
    Password::new()
        .with_prompt("Password")
        .interact()
        .map(Zeroizing::new)
        .map_err(|e| anyhow::anyhow!("Failed to read password: {}", e))
}

/// Prompt for a new password with confirmation.
pub fn prompt_new_password(interactive: bool) -> anyhow::Result<Zeroizing<String>> {
    if let Some(password) = password_from_env() {
        return Ok(password);
    }
    if !interactive {
        return Err(no_tty_error());
    }
    Password::new()
        .with_prompt("New password")
        .with_confirmation("Confirm password", "Passwords do not match")
        .interact()
        .map(Zeroizing::new)
        .map_err(|e| anyhow::anyhow!("Failed to read password: {}", e))
}
