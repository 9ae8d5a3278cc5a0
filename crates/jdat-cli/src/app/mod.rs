//! Application-level utilities for the JDAT CLI.
//!
//! - Application context for unified CLI + config handling
//! - Path resolution for config and document files
//! - Password prompting

mod context;
mod password;
mod resolver;

pub use context::{display_path, AppContext};
pub use password::{prompt_new_password, prompt_password};
pub use resolver::normalize_new_path;
