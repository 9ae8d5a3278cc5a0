//! Key/value line codec for structured block content.

use indexmap::IndexMap;

use crate::error::{JdatError, Result};
use crate::format::parser::BLOCK_CLOSE;

/// Ordered key -> value view of a structured block.
pub type StructuredView = IndexMap<String, String>;

/// Indent emitted before every `key: value` line.
pub const LINE_INDENT: &str = "  ";

/// Parse `key: value` lines.
///
/// Blank lines and lines without `:` are ignored. A repeated key keeps its
/// first position and takes the last value.
pub fn parse_lines(content: &str) -> StructuredView {
    let mut view = StructuredView::new();
    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if let Some((key, value)) = line.split_once(':') {
            view.insert(key.trim().to_string(), value.trim().to_string());
        }
    }
    view
}

/// Render a view back to canonical content, one indented line per entry.
pub fn render_lines(view: &StructuredView) -> String {
    view.iter()
        .map(|(key, value)| format!("{}{}: {}", LINE_INDENT, key, value))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Reject keys and values that would not survive a render/parse cycle.
pub fn validate_entry(key: &str, value: &str) -> Result<()> {
    if key.trim().is_empty() {
        return Err(JdatError::InvalidInput("Key cannot be empty".to_string()));
    }
    if key.contains(':') {
        return Err(JdatError::InvalidInput(format!(
            "Key '{}' cannot contain ':'",
            key
        )));
    }
    let is_break = |c: char| c == '\n' || c == '\r';
    if key.contains(is_break) || value.contains(is_break) {
        return Err(JdatError::InvalidInput(
            "Keys and values must fit on a single line".to_string(),
        ));
    }
    if key.contains(BLOCK_CLOSE) || value.contains(BLOCK_CLOSE) {
        return Err(JdatError::InvalidInput(format!(
            "Keys and values cannot contain the block terminator '{}'",
            BLOCK_CLOSE
        )));
    }
    Ok(())
}
