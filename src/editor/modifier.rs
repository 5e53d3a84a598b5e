//! Pure mutation primitives.
//!
//! Every function takes a document and a selection and returns a new
//! document (plus the selection that should follow the edit). Inputs are
//! never modified.

use serde_json::Map;

use crate::document::{Block, BlockType, Document, byte_index};

use super::EditError;
use super::selection::{Bound, Selection};

/// Set the type of every block the selection touches.
///
/// # Errors
///
/// Returns [`EditError::UnknownBlock`] if the selection is not in `doc`.
pub fn set_block_type(
    doc: &Document,
    selection: &Selection,
    block_type: &BlockType,
) -> Result<Document, EditError> {
    let (start, end) = selection.bounds(doc)?;
    let retyped = doc.blocks()[start.index..=end.index]
        .iter()
        .map(|block| block.clone().with_type(block_type.clone()))
        .collect();
    Ok(doc.splice(start.index..end.index + 1, retyped))
}

/// Replace the selected range with `text`.
///
/// A range spanning several blocks collapses them into the first one, which
/// keeps its key and type. Returns the caret placed after the inserted text.
///
/// # Errors
///
/// Returns [`EditError::UnknownBlock`] or [`EditError::OffsetOutOfRange`]
/// when the selection does not fit `doc`.
pub fn replace_text(
    doc: &Document,
    selection: &Selection,
    text: &str,
) -> Result<(Document, Selection), EditError> {
    let (start, end) = selection.bounds(doc)?;
    let first = &doc.blocks()[start.index];
    let last = &doc.blocks()[end.index];
    let head_end = text_byte(first, &start)?;
    let tail_start = text_byte(last, &end)?;

    let mut merged = String::with_capacity(head_end + text.len() + last.text.len() - tail_start);
    merged.push_str(&first.text[..head_end]);
    merged.push_str(text);
    merged.push_str(&last.text[tail_start..]);

    let replacement = first.clone().with_text(merged);
    let doc = doc.splice(start.index..end.index + 1, vec![replacement]);
    let caret = Selection::collapsed(start.key, start.offset + text.chars().count());
    Ok((doc, caret))
}

/// Delete the selected range.
///
/// # Errors
///
/// Same as [`replace_text`].
pub fn remove_range(
    doc: &Document,
    selection: &Selection,
) -> Result<(Document, Selection), EditError> {
    replace_text(doc, selection, "")
}

/// Split the block at the caret, removing any selected range first.
///
/// The new second block gets a fresh key and inherits the type and depth of
/// the block it was split from. Returns a caret at the start of it.
///
/// # Errors
///
/// Returns [`EditError::UnknownBlock`] or [`EditError::OffsetOutOfRange`]
/// when the selection does not fit `doc`.
pub fn split_block(
    doc: &Document,
    selection: &Selection,
) -> Result<(Document, Selection), EditError> {
    let (doc, caret) = if selection.is_collapsed() {
        (doc.clone(), selection.clone())
    } else {
        remove_range(doc, selection)?
    };
    let (at, _) = caret.bounds(&doc)?;
    let block = &doc.blocks()[at.index];
    let split = text_byte(block, &at)?;

    let above = block.clone().with_text(&block.text[..split]);
    let below = Block {
        key: doc.generate_key(),
        text: block.text[split..].to_string(),
        block_type: block.block_type.clone(),
        depth: block.depth,
        data: Map::new(),
    };
    let caret = Selection::collapsed(below.key.clone(), 0);
    let doc = doc.splice(at.index..at.index + 1, vec![above, below]);
    Ok((doc, caret))
}

fn text_byte(block: &Block, bound: &Bound) -> Result<usize, EditError> {
    byte_index(&block.text, bound.offset).ok_or_else(|| EditError::OffsetOutOfRange {
        key: block.key.clone(),
        offset: bound.offset,
        len: block.char_len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::BlockKey;
    use crate::editor::selection::Position;

    fn doc(blocks: &[(&str, &str, BlockType)]) -> Document {
        Document::from_blocks(
            blocks
                .iter()
                .map(|(key, text, ty)| Block::new(BlockKey::new(*key), *text, ty.clone()))
                .collect(),
        )
    }

    fn key(k: &str) -> BlockKey {
        BlockKey::new(k)
    }

    #[test]
    fn test_set_block_type_on_caret_block_only() {
        let d = doc(&[("a", "one", BlockType::Unstyled), ("b", "two", BlockType::Unstyled)]);
        let out = set_block_type(&d, &Selection::collapsed(key("b"), 1), &BlockType::Bold).unwrap();
        assert_eq!(out.blocks()[0].block_type, BlockType::Unstyled);
        assert_eq!(out.blocks()[1].block_type, BlockType::Bold);
        assert_eq!(d.blocks()[1].block_type, BlockType::Unstyled);
    }

    #[test]
    fn test_set_block_type_over_range() {
        let d = doc(&[
            ("a", "one", BlockType::Unstyled),
            ("b", "two", BlockType::Unstyled),
            ("c", "three", BlockType::Unstyled),
        ]);
        let sel = Selection::range(Position::new(key("a"), 1), Position::new(key("b"), 0));
        let out = set_block_type(&d, &sel, &BlockType::Underline).unwrap();
        assert_eq!(out.blocks()[0].block_type, BlockType::Underline);
        assert_eq!(out.blocks()[1].block_type, BlockType::Underline);
        assert_eq!(out.blocks()[2].block_type, BlockType::Unstyled);
    }

    #[test]
    fn test_replace_text_inserts_at_caret() {
        let d = doc(&[("a", "hllo", BlockType::Unstyled)]);
        let (out, caret) = replace_text(&d, &Selection::collapsed(key("a"), 1), "e").unwrap();
        assert_eq!(out.first_block().text, "hello");
        assert_eq!(caret, Selection::collapsed(key("a"), 2));
    }

    #[test]
    fn test_replace_text_removes_range_in_block() {
        let d = doc(&[("a", "**x", BlockType::Unstyled)]);
        let (out, caret) = replace_text(&d, &Selection::within(&key("a"), 0, 2), "").unwrap();
        assert_eq!(out.first_block().text, "x");
        assert_eq!(caret, Selection::collapsed(key("a"), 0));
    }

    #[test]
    fn test_replace_text_across_blocks_merges_into_first() {
        let d = doc(&[
            ("a", "hello", BlockType::HeaderOne),
            ("b", "big", BlockType::Unstyled),
            ("c", "world", BlockType::Bold),
        ]);
        let sel = Selection::range(Position::new(key("a"), 2), Position::new(key("c"), 3));
        let (out, caret) = replace_text(&d, &sel, "-").unwrap();
        assert_eq!(out.block_count(), 1);
        assert_eq!(out.first_block().text, "he-ld");
        assert_eq!(out.first_block().key, key("a"));
        assert_eq!(out.first_block().block_type, BlockType::HeaderOne);
        assert_eq!(caret, Selection::collapsed(key("a"), 3));
    }

    #[test]
    fn test_replace_text_counts_characters_not_bytes() {
        let d = doc(&[("a", "café", BlockType::Unstyled)]);
        let (out, caret) = replace_text(&d, &Selection::collapsed(key("a"), 4), "é").unwrap();
        assert_eq!(out.first_block().text, "caféé");
        assert_eq!(caret.focus.offset, 5);
    }

    #[test]
    fn test_replace_text_past_end_is_out_of_range() {
        let d = doc(&[("a", "*", BlockType::Unstyled)]);
        let err = replace_text(&d, &Selection::within(&key("a"), 0, 2), "").unwrap_err();
        assert_eq!(
            err,
            EditError::OffsetOutOfRange {
                key: key("a"),
                offset: 2,
                len: 1
            }
        );
    }

    #[test]
    fn test_split_block_in_middle() {
        let d = doc(&[("a", "hello world", BlockType::Bold)]);
        let (out, caret) = split_block(&d, &Selection::collapsed(key("a"), 5)).unwrap();
        assert_eq!(out.block_count(), 2);
        assert_eq!(out.blocks()[0].text, "hello");
        assert_eq!(out.blocks()[1].text, " world");
        assert_eq!(out.blocks()[1].block_type, BlockType::Bold);
        assert_ne!(out.blocks()[1].key, key("a"));
        assert_eq!(caret, Selection::collapsed(out.blocks()[1].key.clone(), 0));
    }

    #[test]
    fn test_split_block_at_end_creates_empty_block() {
        let d = doc(&[("a", "hi", BlockType::Unstyled), ("b", "next", BlockType::Unstyled)]);
        let (out, _) = split_block(&d, &Selection::collapsed(key("a"), 2)).unwrap();
        assert_eq!(out.plain_text(), "hi\n\nnext");
    }

    #[test]
    fn test_split_block_removes_selection_first() {
        let d = doc(&[("a", "abcdef", BlockType::Unstyled)]);
        let (out, _) = split_block(&d, &Selection::within(&key("a"), 1, 3)).unwrap();
        assert_eq!(out.plain_text(), "a\ndef");
    }
}
