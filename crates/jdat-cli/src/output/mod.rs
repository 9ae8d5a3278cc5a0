//! JSON output for blocks.

use jdat_core::{Block, BlockSummary};
use serde_json::{Map, Value};

/// Convert a block to JSON for output.
///
/// `data` holds the key/value view for clear data blocks and is `null`
/// otherwise. `content` is the canonical text, or the base64 blob when
/// encrypted.
pub fn block_json(block: &Block) -> Value {
    let data = match block.structured() {
        Ok(view) if block.kind().is_structured() => Value::Object(
            view.iter()
                .map(|(k, v)| (k.clone(), Value::String(v.clone())))
                .collect::<Map<String, Value>>(),
        ),
        _ => Value::Null,
    };
    serde_json::json!({
        "name": block.name(),
        "link": block.link(),
        "kind": block.kind().code(),
        "kind_name": block.kind().label(),
        "encrypted": block.is_encrypted(),
        "data": data,
        "content": block.canonical_content(),
    })
}

/// Convert listing rows to a JSON array.
pub fn summaries_json(summaries: &[BlockSummary]) -> anyhow::Result<String> {
    Ok(serde_json::to_string_pretty(summaries)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use jdat_core::BlockKind;

    #[test]
    fn test_structured_block_json() {
        let block = Block::new("user", "u1", BlockKind::Structured, "name: Alice\nage: 30");
        let value = block_json(&block);

        assert_eq!(value["link"], "u1");
        assert_eq!(value["kind"], 1);
        assert_eq!(value["kind_name"], "data");
        assert_eq!(value["encrypted"], false);
        assert_eq!(value["data"]["name"], "Alice");
        assert_eq!(value["data"]["age"], "30");
        assert_eq!(value["content"], "  name: Alice\n  age: 30");
    }

    #[test]
    fn test_raw_block_json_has_no_data() {
        let block = Block::new("script", "s1", BlockKind::Raw, "  echo hi  ");
        let value = block_json(&block);

        assert!(value["data"].is_null());
        assert_eq!(value["content"], "echo hi");
    }

    #[test]
    fn test_summaries_json_uses_kind_codes() {
        let block = Block::new("script", "s1", BlockKind::Raw, "x");
        let text = summaries_json(&[block.summary()]).unwrap();
        let value: Value = serde_json::from_str(&text).unwrap();

        assert_eq!(value[0]["link"], "s1");
        assert_eq!(value[0]["kind"], 2);
        assert_eq!(value[0]["encrypted"], false);
    }
}
