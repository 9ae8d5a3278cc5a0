//! The JDAT text grammar.
//!
//! - **parser**: lenient scanner producing blocks and comments
//! - **serializer**: canonical renderer
//!
//! `serialize(parse(text))` is not byte-identical to `text`: comments move to
//! the top and structured content is re-indented. Block content survives a
//! re-parse unchanged only when the input is already canonical; a raw body
//! written inline as `t:2{x}` comes back as `"\nx\n"`. What always holds is
//! the fixed point: serializing a re-parsed document reproduces the same text.

pub mod parser;
pub mod serializer;

pub use parser::{parse, ParsedDocument};
pub use serializer::{render_block, render_comment, serialize};
