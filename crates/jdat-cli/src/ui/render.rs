//! Rendering primitives for CLI output.

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::{ASCII_MARKDOWN, NOTHING, UTF8_FULL};
use comfy_table::{Attribute, Cell, ContentArrangement, Table as ComfyTable};

use super::context::UiContext;
use super::mode::OutputMode;
use super::theme::{styled, styles, Badge};

/// Render a header line for a command.
///
/// Pretty mode: "JDAT · command" with the document path on a second line
/// Plain mode: "jdat command"
pub fn header(ctx: &UiContext, command: &str, path: Option<&str>) -> String {
    match ctx.mode {
        OutputMode::Pretty => {
            let title = styled("JDAT", styles::bold(), ctx.color);
            let mut out = format!("{} \u{00B7} {}", title, command);
            if let Some(p) = path {
                out.push('\n');
                out.push_str(&kv(ctx, "Path", &shorten_path(p, 50)));
            }
            out
        }
        OutputMode::Plain => format!("jdat {}", command),
        OutputMode::Json => String::new(),
    }
}

fn shorten_path(path: &str, max: usize) -> String {
    let count = path.chars().count();
    if count <= max {
        return path.to_string();
    }
    let tail: String = path.chars().skip(count - (max - 3)).collect();
    format!("...{}", tail)
}

/// Render a divider line.
pub fn divider(ctx: &UiContext) -> String {
    if ctx.mode.is_pretty() && ctx.unicode {
        "\u{2500}".repeat(ctx.width.min(60))
    } else {
        "---".to_string()
    }
}

/// Render a badge with optional message.
pub fn badge(ctx: &UiContext, kind: Badge, message: &str) -> String {
    let colored_badge = styled(kind.display(ctx.unicode), kind.style(), ctx.color);
    if message.is_empty() {
        colored_badge
    } else {
        format!("{} {}", colored_badge, message)
    }
}

/// Render a key-value pair.
///
/// Pretty mode: "Key: value" with dim key
/// Plain mode: "key=value"
pub fn kv(ctx: &UiContext, key: &str, value: &str) -> String {
    if ctx.mode.is_pretty() {
        let styled_key = styled(&format!("{}:", key), styles::dim(), ctx.color);
        format!("{} {}", styled_key, value)
    } else {
        format!("{}={}", key.to_lowercase().replace(' ', "_"), value)
    }
}

/// Render a hint line.
pub fn hint(ctx: &UiContext, text: &str) -> String {
    if ctx.mode.is_pretty() {
        let label = styled("Hint:", styles::dim(), ctx.color);
        format!("{} {}", label, text)
    } else {
        format!("hint={}", text)
    }
}

/// Render a receipt (summary block after an action).
///
/// Pretty mode: Badge + indented key-value pairs
/// Plain mode: status=ok + key=value lines
pub fn receipt(ctx: &UiContext, title: &str, items: &[(&str, &str)]) -> String {
    let mut lines = Vec::new();

    if ctx.mode.is_pretty() {
        lines.push(badge(ctx, Badge::Ok, title));
        for (key, value) in items {
            lines.push(format!("  {}", kv(ctx, key, value)));
        }
    } else {
        lines.push("status=ok".to_string());
        for (key, value) in items {
            lines.push(kv(ctx, key, value));
        }
    }

    lines.join("\n")
}

/// Column definition for table rendering.
#[derive(Debug, Clone)]
pub struct Column {
    pub header: &'static str,
}

impl Column {
    pub const fn new(header: &'static str) -> Self {
        Self { header }
    }
}

/// Render a bordered table.
///
/// Pretty mode: Styled table with borders
/// Plain mode: Space-separated values (no header)
pub fn table(ctx: &UiContext, columns: &[Column], rows: &[Vec<String>]) -> String {
    if !ctx.mode.is_pretty() {
        return plain_rows(rows);
    }

    let mut table = ComfyTable::new();
    if ctx.unicode {
        table
            .load_preset(UTF8_FULL)
            .apply_modifier(UTF8_ROUND_CORNERS);
    } else {
        table.load_preset(ASCII_MARKDOWN);
    }
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_width(ctx.width.min(u16::MAX as usize) as u16);

    let headers: Vec<&str> = columns.iter().map(|c| c.header).collect();
    table.set_header(headers);
    for row in rows {
        table.add_row(row);
    }

    table.to_string()
}

/// Render a simple table without borders (for block listings).
pub fn simple_table(ctx: &UiContext, columns: &[Column], rows: &[Vec<String>]) -> String {
    if !ctx.mode.is_pretty() {
        return plain_rows(rows);
    }

    let mut table = ComfyTable::new();
    table.load_preset(NOTHING);
    table.set_content_arrangement(ContentArrangement::Dynamic);

    // Dim via comfy-table attributes so column widths stay correct
    let header_cells: Vec<Cell> = columns
        .iter()
        .map(|c| {
            let mut cell = Cell::new(c.header);
            if ctx.color {
                cell = cell.add_attribute(Attribute::Dim);
            }
            cell
        })
        .collect();
    table.set_header(header_cells);

    for i in 0..columns.len() {
        if let Some(column) = table.column_mut(i) {
            column.set_padding((0, 2));
        }
    }

    for row in rows {
        table.add_row(row);
    }

    table.to_string()
}

fn plain_rows(rows: &[Vec<String>]) -> String {
    rows.iter()
        .map(|row| row.join(" "))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Print a message to stdout unless in JSON mode.
pub fn print(ctx: &UiContext, message: &str) {
    if !ctx.mode.is_json() {
        println!("{}", message);
    }
}

/// Print an empty line (only in pretty mode).
pub fn blank_line(ctx: &UiContext) {
    if ctx.mode.is_pretty() {
        println!();
    }
}

/// Format an error message with optional hint.
///
/// Pretty mode: "[ERR] message" with optional "Hint: ..." on next line
/// Plain mode: "error=message" with optional "hint=suggestion"
pub fn error_message(ctx: &UiContext, message: &str, error_hint: Option<&str>) -> String {
    let mut lines = Vec::new();

    if ctx.mode.is_pretty() {
        lines.push(badge(ctx, Badge::Err, message));
        if let Some(h) = error_hint {
            lines.push(hint(ctx, h));
        }
    } else {
        lines.push(format!("error={}", message));
        if let Some(h) = error_hint {
            lines.push(format!("hint={}", h));
        }
    }

    lines.join("\n")
}

/// Print an error message to stderr with optional hint.
pub fn print_error(ctx: &UiContext, message: &str, error_hint: Option<&str>) {
    eprintln!("{}", error_message(ctx, message, error_hint));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain_ctx() -> UiContext {
        UiContext {
            color: false,
            unicode: false,
            width: 80,
            mode: OutputMode::Plain,
        }
    }

    fn pretty_ctx() -> UiContext {
        UiContext {
            color: false,
            unicode: true,
            width: 80,
            mode: OutputMode::Pretty,
        }
    }

    #[test]
    fn test_header_pretty() {
        let h = header(&pretty_ctx(), "list", Some("/tmp/notes.jdat"));
        assert!(h.starts_with("JDAT \u{00B7} list"));
        assert!(h.contains("Path: /tmp/notes.jdat"));
    }

    #[test]
    fn test_header_plain() {
        assert_eq!(header(&plain_ctx(), "list", Some("/tmp/x.jdat")), "jdat list");
    }

    #[test]
    fn test_long_paths_are_shortened() {
        let long = format!("/{}", "a".repeat(80));
        let short = shorten_path(&long, 50);
        assert_eq!(short.chars().count(), 50);
        assert!(short.starts_with("..."));
    }

    #[test]
    fn test_kv_plain_normalizes_key() {
        assert_eq!(kv(&plain_ctx(), "Block Kind", "raw"), "block_kind=raw");
    }

    #[test]
    fn test_receipt_plain() {
        let out = receipt(&plain_ctx(), "Added block", &[("Link", "u1")]);
        assert_eq!(out, "status=ok\nlink=u1");
    }

    #[test]
    fn test_receipt_pretty() {
        let out = receipt(&pretty_ctx(), "Added block", &[("Link", "u1")]);
        assert!(out.contains("[\u{2713}] Added block"));
        assert!(out.contains("  Link: u1"));
    }

    #[test]
    fn test_table_plain_has_no_header() {
        let rows = vec![vec!["name".to_string(), "Alice".to_string()]];
        let out = table(&plain_ctx(), &[Column::new("KEY"), Column::new("VALUE")], &rows);
        assert_eq!(out, "name Alice");
    }

    #[test]
    fn test_simple_table_pretty_has_header() {
        let rows = vec![vec!["u1".to_string(), "user".to_string()]];
        let out = simple_table(&pretty_ctx(), &[Column::new("LINK"), Column::new("NAME")], &rows);
        assert!(out.contains("LINK"));
        assert!(out.contains("u1"));
    }

    #[test]
    fn test_error_message_formats() {
        let out = error_message(&plain_ctx(), "boom", Some("try again"));
        assert_eq!(out, "error=boom\nhint=try again");

        let out = error_message(&pretty_ctx(), "boom", None);
        assert_eq!(out, "[\u{2717}] boom");
    }
}
