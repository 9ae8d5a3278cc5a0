//! JDAT text scanner.
//!
//! Two independent passes run over the whole input:
//!
//! - comments: `({<` text `>})`
//! - blocks: `(n:NAME l:LINK t:DIGITS [encrypted]{CONTENT})`
//!
//! Matching is leftmost-first and non-overlapping; content ends at the first
//! `})` after the opening brace and is never scanned again. Anything that does
//! not match is skipped without error.

use tracing::{debug, trace};

use crate::block::{Block, BlockKind};

pub const COMMENT_OPEN: &str = "({<";
pub const COMMENT_CLOSE: &str = ">})";
pub const BLOCK_OPEN: &str = "(n:";
pub const BLOCK_CLOSE: &str = "})";
pub const ENCRYPTED_MARKER: &str = "encrypted";

/// Blocks and comments recovered from a document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedDocument {
    pub blocks: Vec<Block>,
    pub comments: Vec<String>,
}

/// Parse a complete document.
pub fn parse(text: &str) -> ParsedDocument {
    let document = ParsedDocument {
        comments: parse_comments(text),
        blocks: parse_blocks(text),
    };
    debug!(
        blocks = document.blocks.len(),
        comments = document.comments.len(),
        "parsed document"
    );
    document
}

/// Collect every comment, trimmed, in order of appearance.
pub fn parse_comments(text: &str) -> Vec<String> {
    let mut comments = Vec::new();
    let mut cursor = 0;

    while let Some(offset) = text[cursor..].find(COMMENT_OPEN) {
        let body_start = cursor + offset + COMMENT_OPEN.len();
        let Some(body_len) = text[body_start..].find(COMMENT_CLOSE) else {
            debug!(offset = cursor + offset, "skipping unterminated comment");
            break;
        };
        comments.push(text[body_start..body_start + body_len].trim().to_string());
        cursor = body_start + body_len + COMMENT_CLOSE.len();
    }

    comments
}

/// Collect every well-formed block in order of appearance.
pub fn parse_blocks(text: &str) -> Vec<Block> {
    let mut blocks = Vec::new();
    let mut cursor = 0;

    while let Some(offset) = text[cursor..].find(BLOCK_OPEN) {
        let start = cursor + offset;
        match match_block(text, start) {
            Match::Block(block, end) => {
                trace!(link = block.link(), "parsed block");
                blocks.push(block);
                cursor = end;
            }
            Match::Malformed => {
                debug!(offset = start, "skipping malformed block header");
                cursor = start + 1;
            }
            Match::Unterminated => {
                // No `})` remains, so no later candidate can close either.
                debug!(offset = start, "skipping unterminated block");
                break;
            }
        }
    }

    blocks
}

enum Match {
    Block(Block, usize),
    Malformed,
    Unterminated,
}

fn match_block(text: &str, start: usize) -> Match {
    let mut scanner = Scanner::new(text, start);

    let Some(header) = scan_header(&mut scanner) else {
        return Match::Malformed;
    };

    let content_start = scanner.pos;
    let Some(content_len) = text[content_start..].find(BLOCK_CLOSE) else {
        return Match::Unterminated;
    };
    let content = &text[content_start..content_start + content_len];

    let block = Block::from_parts(
        header.name.to_string(),
        header.link.to_string(),
        BlockKind::from_code(header.code),
        content.to_string(),
        header.encrypted,
    );
    Match::Block(block, content_start + content_len + BLOCK_CLOSE.len())
}

struct Header<'a> {
    name: &'a str,
    link: &'a str,
    code: u32,
    encrypted: bool,
}

/// Everything from `(n:` up to and including the opening brace.
fn scan_header<'a>(scanner: &mut Scanner<'a>) -> Option<Header<'a>> {
    scanner.expect(BLOCK_OPEN)?;
    let name = scanner.token()?;
    scanner.whitespace1()?;
    scanner.expect("l:")?;
    let link = scanner.token()?;
    scanner.whitespace1()?;
    scanner.expect("t:")?;
    let code = scanner.digits()?.parse::<u32>().ok()?;
    scanner.whitespace();
    let encrypted = scanner.eat(ENCRYPTED_MARKER);
    scanner.whitespace();
    scanner.expect("{")?;
    Some(Header {
        name,
        link,
        code,
        encrypted,
    })
}

/// Byte cursor over the header of a single block candidate.
struct Scanner<'a> {
    text: &'a str,
    pos: usize,
}

impl<'a> Scanner<'a> {
    fn new(text: &'a str, pos: usize) -> Self {
        Self { text, pos }
    }

    fn rest(&self) -> &'a str {
        &self.text[self.pos..]
    }

    fn eat(&mut self, literal: &str) -> bool {
        if self.rest().starts_with(literal) {
            self.pos += literal.len();
            true
        } else {
            false
        }
    }

    fn expect(&mut self, literal: &str) -> Option<()> {
        self.eat(literal).then_some(())
    }

    /// Consume characters while `pred` holds; returns the consumed slice.
    fn take_while(&mut self, pred: impl Fn(char) -> bool) -> &'a str {
        let rest = self.rest();
        let len = rest
            .char_indices()
            .find(|&(_, c)| !pred(c))
            .map(|(idx, _)| idx)
            .unwrap_or(rest.len());
        self.pos += len;
        &rest[..len]
    }

    /// One or more non-whitespace characters.
    fn token(&mut self) -> Option<&'a str> {
        let token = self.take_while(|c| !c.is_whitespace());
        (!token.is_empty()).then_some(token)
    }

    fn digits(&mut self) -> Option<&'a str> {
        let digits = self.take_while(|c| c.is_ascii_digit());
        (!digits.is_empty()).then_some(digits)
    }

    fn whitespace(&mut self) {
        self.take_while(char::is_whitespace);
    }

    fn whitespace1(&mut self) -> Option<()> {
        let skipped = self.take_while(char::is_whitespace);
        (!skipped.is_empty()).then_some(())
    }
}
