//! Block content kinds.

use std::fmt;

use serde::{Serialize, Serializer};

/// How a block's content is interpreted.
///
/// Codes other than 1 and 2 are kept as [`BlockKind::Unknown`] so they
/// survive a load/save cycle; they behave like [`BlockKind::Raw`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlockKind {
    /// Key/value lines (`t:1`)
    Structured,
    /// Opaque text or code (`t:2`)
    Raw,
    /// Any other numeric code
    Unknown(u32),
}

impl BlockKind {
    pub const STRUCTURED_CODE: u32 = 1;
    pub const RAW_CODE: u32 = 2;

    pub fn from_code(code: u32) -> Self {
        match code {
            Self::STRUCTURED_CODE => Self::Structured,
            Self::RAW_CODE => Self::Raw,
            other => Self::Unknown(other),
        }
    }

    pub fn code(&self) -> u32 {
        match self {
            Self::Structured => Self::STRUCTURED_CODE,
            Self::Raw => Self::RAW_CODE,
            Self::Unknown(code) => *code,
        }
    }

    pub fn is_structured(&self) -> bool {
        matches!(self, Self::Structured)
    }

    /// Short human label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Structured => "data",
            Self::Raw => "raw",
            Self::Unknown(_) => "unknown",
        }
    }
}

impl fmt::Display for BlockKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unknown(code) => write!(f, "unknown (t:{})", code),
            other => write!(f, "{} (t:{})", other.label(), other.code()),
        }
    }
}

impl Serialize for BlockKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_u32(self.code())
    }
}
