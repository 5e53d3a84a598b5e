//! Raw JSON exchange format.
//!
//! Mirrors the block/entity representation the stored documents were
//! originally written in, field for field, so existing slots load unchanged.

use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::{Block, BlockKey, BlockType, Document};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawContent {
    pub blocks: Vec<RawBlock>,
    #[serde(default)]
    pub entity_map: BTreeMap<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawBlock {
    #[serde(default)]
    pub key: String,
    #[serde(default)]
    pub text: String,
    #[serde(rename = "type", default)]
    pub block_type: BlockType,
    #[serde(default)]
    pub depth: u32,
    #[serde(default)]
    pub inline_style_ranges: Vec<Value>,
    #[serde(default)]
    pub entity_ranges: Vec<Value>,
    #[serde(default)]
    pub data: Map<String, Value>,
}

impl Document {
    /// Convert to the raw exchange representation.
    pub fn to_raw(&self) -> RawContent {
        RawContent {
            blocks: self
                .blocks()
                .iter()
                .map(|block| RawBlock {
                    key: block.key.as_str().to_string(),
                    text: block.text.clone(),
                    block_type: block.block_type.clone(),
                    depth: block.depth,
                    inline_style_ranges: Vec::new(),
                    entity_ranges: Vec::new(),
                    data: block.data.clone(),
                })
                .collect(),
            entity_map: BTreeMap::new(),
        }
    }

    /// Build a document from the raw exchange representation.
    ///
    /// Inline style and entity ranges are not modelled and are dropped.
    /// Blank or repeated keys are replaced with fresh ones.
    pub fn from_raw(raw: RawContent) -> Self {
        if !raw.entity_map.is_empty() {
            tracing::warn!(
                entities = raw.entity_map.len(),
                "ignoring entity map in stored document"
            );
        }
        let mut seen = HashSet::new();
        let mut needs_key = Vec::new();
        let mut blocks = Vec::with_capacity(raw.blocks.len());
        for (idx, raw_block) in raw.blocks.into_iter().enumerate() {
            if !raw_block.inline_style_ranges.is_empty() || !raw_block.entity_ranges.is_empty() {
                tracing::warn!(
                    key = %raw_block.key,
                    "ignoring inline style and entity ranges in stored block"
                );
            }
            if raw_block.key.is_empty() || !seen.insert(raw_block.key.clone()) {
                needs_key.push(idx);
            }
            blocks.push(Block {
                key: BlockKey::new(raw_block.key),
                text: raw_block.text,
                block_type: raw_block.block_type,
                depth: raw_block.depth,
                data: raw_block.data,
            });
        }

        let mut doc = Self::from_blocks(blocks);
        for idx in needs_key {
            let key = doc.generate_key();
            tracing::debug!(index = idx, key = %key, "assigned fresh key to stored block");
            let block = Block {
                key,
                ..doc.blocks()[idx].clone()
            };
            doc = doc.with_block(idx, block);
        }
        doc
    }

    /// Serialize to the canonical JSON text stored in a slot.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(&self.to_raw())
    }

    /// Parse the canonical JSON text stored in a slot.
    ///
    /// # Errors
    ///
    /// Returns an error if `json` is not a valid raw document.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        let raw: RawContent = serde_json::from_str(json)?;
        Ok(Self::from_raw(raw))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_json_uses_exchange_field_names() {
        let doc = Document::from_blocks(vec![Block::new(
            BlockKey::new("abc12"),
            "Title",
            BlockType::HeaderOne,
        )]);
        let value: Value = serde_json::from_str(&doc.to_json().unwrap()).unwrap();
        let block = &value["blocks"][0];
        assert_eq!(block["key"], "abc12");
        assert_eq!(block["text"], "Title");
        assert_eq!(block["type"], "header-one");
        assert_eq!(block["depth"], 0);
        assert!(block["inlineStyleRanges"].as_array().unwrap().is_empty());
        assert!(block["entityRanges"].as_array().unwrap().is_empty());
        assert!(block["data"].as_object().unwrap().is_empty());
        assert!(value["entityMap"].as_object().unwrap().is_empty());
    }

    #[test]
    fn test_from_json_reads_stored_document() {
        let json = r#"{"blocks":[
            {"key":"k1","text":"Heading","type":"header-one","depth":0,"inlineStyleRanges":[],"entityRanges":[],"data":{}},
            {"key":"k2","text":"red","type":"RED_LINE","depth":0,"inlineStyleRanges":[],"entityRanges":[],"data":{}}
        ],"entityMap":{}}"#;
        let doc = Document::from_json(json).unwrap();
        assert_eq!(doc.block_count(), 2);
        assert_eq!(doc.blocks()[0].block_type, BlockType::HeaderOne);
        assert_eq!(doc.blocks()[1].key, BlockKey::new("k2"));
        assert_eq!(doc.blocks()[1].text, "red");
    }

    #[test]
    fn test_from_json_defaults_missing_fields() {
        let doc = Document::from_json(r#"{"blocks":[{"key":"x","text":"hi"}]}"#).unwrap();
        assert_eq!(doc.first_block().block_type, BlockType::Unstyled);
        assert_eq!(doc.first_block().depth, 0);
    }

    #[test]
    fn test_from_json_replaces_blank_and_duplicate_keys() {
        let json = r#"{"blocks":[
            {"key":"dup","text":"a","type":"unstyled"},
            {"key":"dup","text":"b","type":"unstyled"},
            {"key":"","text":"c","type":"unstyled"}
        ]}"#;
        let doc = Document::from_json(json).unwrap();
        let keys: HashSet<_> = doc.blocks().iter().map(|b| b.key.clone()).collect();
        assert_eq!(keys.len(), 3);
        assert_eq!(doc.first_block().key, BlockKey::new("dup"));
        assert_eq!(doc.plain_text(), "a\nb\nc");
    }

    #[test]
    fn test_from_json_with_no_blocks_is_empty_document() {
        let doc = Document::from_json(r#"{"blocks":[],"entityMap":{}}"#).unwrap();
        assert_eq!(doc.block_count(), 1);
        assert!(doc.first_block().text.is_empty());
    }

    #[test]
    fn test_unknown_block_type_survives_round_trip() {
        let json = r#"{"blocks":[{"key":"q","text":"quote","type":"blockquote","depth":1,"data":{"x":1}}]}"#;
        let doc = Document::from_json(json).unwrap();
        let reloaded = Document::from_json(&doc.to_json().unwrap()).unwrap();
        assert_eq!(
            reloaded.first_block().block_type,
            BlockType::Other("blockquote".to_string())
        );
        assert_eq!(reloaded.first_block().depth, 1);
        assert_eq!(reloaded.first_block().data.get("x"), Some(&Value::from(1)));
    }

    #[test]
    fn test_malformed_json_is_an_error() {
        assert!(Document::from_json("not json").is_err());
        assert!(Document::from_json(r#"{"entityMap":{}}"#).is_err());
        assert!(Document::from_json(r#"{"blocks":[{"text":5}]}"#).is_err());
    }
}
