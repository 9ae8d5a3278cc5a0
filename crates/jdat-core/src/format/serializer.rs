//! Canonical JDAT text rendering.
//!
//! Output is every comment followed by every block, one blank line between
//! parts, ending with a single newline. Brace spacing in block headers is
//! part of the format:
//!
//! ```text
//! (n:user l:u1 t:1 {          structured, clear
//! (n:code l:c1 t:2{           raw, clear
//! (n:user l:u1 t:1 encrypted{ any kind, encrypted
//! ```

use crate::block::Block;

use super::parser::{BLOCK_CLOSE, COMMENT_CLOSE, COMMENT_OPEN, ENCRYPTED_MARKER};

/// Render a whole document.
pub fn serialize(comments: &[String], blocks: &[Block]) -> String {
    let mut parts = Vec::with_capacity(comments.len() + blocks.len());
    parts.extend(comments.iter().map(|comment| render_comment(comment)));
    parts.extend(blocks.iter().map(render_block));

    let mut out = parts.join("\n\n");
    out.push('\n');
    out
}

pub fn render_comment(comment: &str) -> String {
    format!("{}{}{}", COMMENT_OPEN, comment.trim(), COMMENT_CLOSE)
}

pub fn render_block(block: &Block) -> String {
    let opening = if block.is_encrypted() {
        format!(" {}{{", ENCRYPTED_MARKER)
    } else if block.kind().is_structured() {
        " {".to_string()
    } else {
        "{".to_string()
    };

    format!(
        "(n:{} l:{} t:{}{}\n{}\n{}",
        block.name(),
        block.link(),
        block.kind().code(),
        opening,
        block.canonical_content(),
        BLOCK_CLOSE
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::block::BlockKind;
    use crate::format::parse;

    #[test]
    fn test_render_structured_block() {
        let block = Block::new("user", "u1", BlockKind::Structured, "name: Alice\nage: 30");
        assert_eq!(
            render_block(&block),
            "(n:user l:u1 t:1 {\n  name: Alice\n  age: 30\n})"
        );
    }

    #[test]
    fn test_render_raw_block() {
        let block = Block::new("code", "c1", BlockKind::Raw, "\nfn main() {}\n");
        assert_eq!(render_block(&block), "(n:code l:c1 t:2{\nfn main() {}\n})");
    }

    #[test]
    fn test_render_unknown_kind_keeps_code() {
        let block = Block::new("x", "x1", BlockKind::Unknown(9), "payload");
        assert_eq!(render_block(&block), "(n:x l:x1 t:9{\npayload\n})");
    }

    #[test]
    fn test_render_encrypted_block() {
        let doc = parse("(n:user l:u1 t:1 encrypted{\nQUJD\n})");
        assert_eq!(
            render_block(&doc.blocks[0]),
            "(n:user l:u1 t:1 encrypted{\nQUJD\n})"
        );
    }

    #[test]
    fn test_render_comment_trims() {
        assert_eq!(render_comment("  note  "), "({<note>})");
    }

    #[test]
    fn test_serialize_comments_first() {
        let doc = parse("(n:a l:a1 t:2{x})\n({< after >})");
        let text = serialize(&doc.comments, &doc.blocks);
        assert_eq!(text, "({<after>})\n\n(n:a l:a1 t:2{\nx\n})\n");
    }

    #[test]
    fn test_serialize_empty_document() {
        assert_eq!(serialize(&[], &[]), "\n");
    }

    #[test]
    fn test_serialize_reflects_structured_edits() {
        let mut doc = parse("(n:user l:u1 t:1 {\n  name: Alice\n})");
        doc.blocks[0].set("name", "Bob").unwrap();
        let text = serialize(&doc.comments, &doc.blocks);
        assert_eq!(text, "(n:user l:u1 t:1 {\n  name: Bob\n})\n");
    }

    #[test]
    fn test_reserialize_is_stable() {
        let input = "({< header >})\n(n:user l:u1 t:1 {\n name:Alice\n\n})\n(n:code l:c1 t:2{\n\nlet x = 1;\n\n})";
        let once = parse(input);
        let first = serialize(&once.comments, &once.blocks);
        let twice = parse(&first);
        let second = serialize(&twice.comments, &twice.blocks);
        assert_eq!(first, second);
    }
}
