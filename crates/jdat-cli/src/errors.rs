//! CLI error types and exit codes.
//!
//! Handlers return `anyhow::Result`; at the top level the error chain is
//! inspected for a [`CliError`] or a core [`JdatError`] to pick the exit
//! code and a hint.

use std::fmt;

use jdat_core::JdatError;

pub mod exit_codes {
    pub const FAILURE: i32 = 1;
    pub const INVALID_INPUT: i32 = 2;
    pub const NOT_FOUND: i32 = 3;
    pub const AUTH_FAILED: i32 = 4;
}

/// CLI-specific errors with associated exit codes.
#[derive(Debug)]
pub enum CliError {
    /// Document, block or key not found
    NotFound { message: String, hint: String },

    /// Invalid user input
    InvalidInput(String),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::NotFound { message, .. } => write!(f, "{}", message),
            CliError::InvalidInput(message) => write!(f, "{}", message),
        }
    }
}

impl std::error::Error for CliError {}

impl CliError {
    pub fn not_found(message: impl Into<String>, hint: impl Into<String>) -> Self {
        CliError::NotFound {
            message: message.into(),
            hint: hint.into(),
        }
    }

    pub fn invalid_input(message: impl Into<String>) -> Self {
        CliError::InvalidInput(message.into())
    }

    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::NotFound { .. } => exit_codes::NOT_FOUND,
            CliError::InvalidInput(_) => exit_codes::INVALID_INPUT,
        }
    }

    fn hint(&self) -> Option<&str> {
        match self {
            CliError::NotFound { hint, .. } => Some(hint),
            CliError::InvalidInput(_) => None,
        }
    }
}

/// Exit code for any error that reached `main`.
pub fn exit_code(err: &anyhow::Error) -> i32 {
    if let Some(cli_err) = err.downcast_ref::<CliError>() {
        return cli_err.exit_code();
    }
    match err.downcast_ref::<JdatError>() {
        Some(JdatError::AuthenticationFailed) => exit_codes::AUTH_FAILED,
        Some(JdatError::FileNotFound(_)) | Some(JdatError::BlockNotFound(_)) => {
            exit_codes::NOT_FOUND
        }
        Some(JdatError::InvalidInput(_))
        | Some(JdatError::DuplicateLink(_))
        | Some(JdatError::AlreadyEncrypted(_))
        | Some(JdatError::NotEncrypted(_))
        | Some(JdatError::StructuralAccessOnEncrypted(_))
        | Some(JdatError::NotStructured(_)) => exit_codes::INVALID_INPUT,
        _ => exit_codes::FAILURE,
    }
}

/// Suggest a next step for an error, if one is known.
pub fn error_hint(err: &anyhow::Error) -> Option<String> {
    if let Some(cli_err) = err.downcast_ref::<CliError>() {
        return cli_err.hint().map(str::to_string);
    }
    let hint = match err.downcast_ref::<JdatError>()? {
        JdatError::BlockNotFound(_) => "Run `jdat list` to see block links.".to_string(),
        JdatError::DuplicateLink(link) => format!(
            "Pick another --link, or run `jdat remove {}` first.",
            link
        ),
        JdatError::AuthenticationFailed => {
            "Check the password. JDAT_PASSWORD overrides the prompt.".to_string()
        }
        JdatError::StructuralAccessOnEncrypted(link) => {
            format!("Run `jdat decrypt {}` first.", link)
        }
        JdatError::NotStructured(_) => {
            "Only data blocks (t:1) have keys. Use `jdat edit` for other blocks.".to_string()
        }
        JdatError::MissingPath => "Pass --file or set JDAT_FILE.".to_string(),
        _ => return None,
    };
    Some(hint)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_error_exit_codes() {
        let err = anyhow::Error::new(CliError::not_found("missing", "Hint"));
        assert_eq!(exit_code(&err), exit_codes::NOT_FOUND);

        let err = anyhow::Error::new(CliError::invalid_input("bad"));
        assert_eq!(exit_code(&err), exit_codes::INVALID_INPUT);
    }

    #[test]
    fn test_core_error_exit_codes() {
        let err = anyhow::Error::new(JdatError::AuthenticationFailed);
        assert_eq!(exit_code(&err), exit_codes::AUTH_FAILED);

        let err = anyhow::Error::new(JdatError::BlockNotFound("x".to_string()));
        assert_eq!(exit_code(&err), exit_codes::NOT_FOUND);

        let err = anyhow::anyhow!("something else");
        assert_eq!(exit_code(&err), exit_codes::FAILURE);
    }

    #[test]
    fn test_hints() {
        let err = anyhow::Error::new(JdatError::StructuralAccessOnEncrypted("u1".to_string()));
        assert_eq!(error_hint(&err).as_deref(), Some("Run `jdat decrypt u1` first."));

        let err = anyhow::Error::new(CliError::not_found("missing", "Run `jdat new`."));
        assert_eq!(error_hint(&err).as_deref(), Some("Run `jdat new`."));

        assert!(error_hint(&anyhow::anyhow!("plain")).is_none());
    }
}
