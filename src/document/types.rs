//! Core document types.

use std::fmt;
use std::ops::Range;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use serde_json::{Map, Value};

static NEXT_KEY: AtomicU64 = AtomicU64::new(1);

/// Length of generated block keys.
const KEY_LEN: usize = 5;

/// Stable identity of a block.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BlockKey(String);

impl BlockKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn generated(seed: u64) -> Self {
        const ALPHABET: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";
        // Spread sequential seeds across the key space so keys don't read as counters
        let mut n = seed.wrapping_mul(0x9E37_79B9_7F4A_7C15) % 36_u64.pow(KEY_LEN as u32);
        let mut out = [b'0'; KEY_LEN];
        for slot in out.iter_mut().rev() {
            *slot = ALPHABET[(n % 36) as usize];
            n /= 36;
        }
        Self(out.iter().map(|&b| char::from(b)).collect())
    }
}

impl fmt::Display for BlockKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Block-level type tag.
///
/// The tag is a presentation hint only. `BOLD`, `RED_LINE` and `UNDERLINE`
/// read like character styles but are used as whole-block types. Tags outside
/// the known vocabulary are kept verbatim in [`BlockType::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, serde::Serialize, serde::Deserialize)]
#[serde(from = "String", into = "String")]
pub enum BlockType {
    #[default]
    Unstyled,
    HeaderOne,
    Bold,
    RedLine,
    Underline,
    Other(String),
}

impl BlockType {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Unstyled => "unstyled",
            Self::HeaderOne => "header-one",
            Self::Bold => "BOLD",
            Self::RedLine => "RED_LINE",
            Self::Underline => "UNDERLINE",
            Self::Other(tag) => tag,
        }
    }

    /// Parse a tag, falling back to [`BlockType::Other`] for unknown tags.
    pub fn parse(tag: &str) -> Self {
        match tag {
            "unstyled" => Self::Unstyled,
            "header-one" => Self::HeaderOne,
            "BOLD" => Self::Bold,
            "RED_LINE" => Self::RedLine,
            "UNDERLINE" => Self::Underline,
            other => Self::Other(other.to_string()),
        }
    }
}

impl From<String> for BlockType {
    fn from(tag: String) -> Self {
        Self::parse(&tag)
    }
}

impl From<BlockType> for String {
    fn from(block_type: BlockType) -> Self {
        block_type.as_str().to_string()
    }
}

impl fmt::Display for BlockType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One line/paragraph of the document.
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    pub key: BlockKey,
    pub text: String,
    pub block_type: BlockType,
    /// Nesting depth, carried through load/save untouched
    pub depth: u32,
    /// Opaque per-block metadata, carried through load/save untouched
    pub data: Map<String, Value>,
}

impl Block {
    pub fn new(key: BlockKey, text: impl Into<String>, block_type: BlockType) -> Self {
        Self {
            key,
            text: text.into(),
            block_type,
            depth: 0,
            data: Map::new(),
        }
    }

    pub fn unstyled(key: BlockKey) -> Self {
        Self::new(key, String::new(), BlockType::Unstyled)
    }

    /// Length of the text in characters.
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }

    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    #[must_use]
    pub fn with_type(mut self, block_type: BlockType) -> Self {
        self.block_type = block_type;
        self
    }
}

/// Byte index of a character offset, or `None` when past the end.
pub fn byte_index(text: &str, char_offset: usize) -> Option<usize> {
    if char_offset == 0 {
        return Some(0);
    }
    text.char_indices()
        .map(|(i, _)| i)
        .chain(std::iter::once(text.len()))
        .nth(char_offset)
}

/// An immutable, non-empty sequence of blocks.
///
/// Edits never mutate a `Document`; they build a new one. Clones share
/// block storage.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    blocks: Arc<[Block]>,
}

impl Document {
    /// A document holding one empty `unstyled` block.
    pub fn empty() -> Self {
        let scratch = Self {
            blocks: Arc::from(Vec::new()),
        };
        let key = scratch.generate_key();
        Self {
            blocks: Arc::from(vec![Block::unstyled(key)]),
        }
    }

    /// Build a document from blocks. An empty list yields [`Document::empty`].
    pub fn from_blocks(blocks: Vec<Block>) -> Self {
        if blocks.is_empty() {
            return Self::empty();
        }
        Self {
            blocks: Arc::from(blocks),
        }
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn block_count(&self) -> usize {
        self.blocks.len()
    }

    pub fn block_for_key(&self, key: &BlockKey) -> Option<&Block> {
        self.blocks.iter().find(|block| &block.key == key)
    }

    pub fn index_of(&self, key: &BlockKey) -> Option<usize> {
        self.blocks.iter().position(|block| &block.key == key)
    }

    pub fn first_block(&self) -> &Block {
        &self.blocks[0]
    }

    pub fn contains_key(&self, key: &BlockKey) -> bool {
        self.block_for_key(key).is_some()
    }

    /// A key not used by any block in this document.
    pub fn generate_key(&self) -> BlockKey {
        loop {
            let key = BlockKey::generated(NEXT_KEY.fetch_add(1, Ordering::Relaxed));
            if !self.contains_key(&key) {
                return key;
            }
        }
    }

    /// Block texts joined with newlines.
    pub fn plain_text(&self) -> String {
        self.blocks
            .iter()
            .map(|block| block.text.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// New document with `range` of blocks replaced by `replacement`.
    #[must_use]
    pub fn splice(&self, range: Range<usize>, replacement: Vec<Block>) -> Self {
        let mut blocks = self.blocks.to_vec();
        blocks.splice(range, replacement);
        Self::from_blocks(blocks)
    }

    /// New document with the block at `index` replaced.
    #[must_use]
    pub fn with_block(&self, index: usize, block: Block) -> Self {
        self.splice(index..index + 1, vec![block])
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::empty()
    }
}
