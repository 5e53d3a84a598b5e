//! Caret positions and selections over a document.

use crate::document::{BlockKey, Document};

use super::EditError;

/// A caret position: block identity plus character offset into its text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Position {
    pub key: BlockKey,
    pub offset: usize,
}

impl Position {
    pub const fn new(key: BlockKey, offset: usize) -> Self {
        Self { key, offset }
    }
}

/// An anchor/focus range over a document. Collapsed when both ends match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub anchor: Position,
    pub focus: Position,
}

impl Selection {
    /// A caret with no extent.
    pub fn collapsed(key: BlockKey, offset: usize) -> Self {
        let pos = Position::new(key, offset);
        Self {
            anchor: pos.clone(),
            focus: pos,
        }
    }

    pub const fn range(anchor: Position, focus: Position) -> Self {
        Self { anchor, focus }
    }

    /// A range inside a single block.
    pub fn within(key: &BlockKey, start: usize, end: usize) -> Self {
        Self::range(Position::new(key.clone(), start), Position::new(key.clone(), end))
    }

    pub fn is_collapsed(&self) -> bool {
        self.anchor == self.focus
    }

    /// The ends of the selection in document order, with their block indices.
    ///
    /// # Errors
    ///
    /// Returns [`EditError::UnknownBlock`] if either end names a block that
    /// is not in `doc`.
    pub fn bounds(&self, doc: &Document) -> Result<(Bound, Bound), EditError> {
        let anchor = Bound::locate(doc, &self.anchor)?;
        let focus = Bound::locate(doc, &self.focus)?;
        if (focus.index, focus.offset) < (anchor.index, anchor.offset) {
            Ok((focus, anchor))
        } else {
            Ok((anchor, focus))
        }
    }

    /// The start of the selection in document order.
    ///
    /// # Errors
    ///
    /// Returns [`EditError::UnknownBlock`] if either end is not in `doc`.
    pub fn start(&self, doc: &Document) -> Result<Bound, EditError> {
        self.bounds(doc).map(|(start, _)| start)
    }
}

/// One end of a selection resolved against a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bound {
    pub index: usize,
    pub key: BlockKey,
    pub offset: usize,
}

impl Bound {
    fn locate(doc: &Document, pos: &Position) -> Result<Self, EditError> {
        let index = doc
            .index_of(&pos.key)
            .ok_or_else(|| EditError::UnknownBlock(pos.key.clone()))?;
        Ok(Self {
            index,
            key: pos.key.clone(),
            offset: pos.offset,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{Block, BlockType};

    fn two_block_doc() -> Document {
        Document::from_blocks(vec![
            Block::new(BlockKey::new("a"), "hello", BlockType::Unstyled),
            Block::new(BlockKey::new("b"), "world", BlockType::Unstyled),
        ])
    }

    #[test]
    fn test_collapsed_selection() {
        let sel = Selection::collapsed(BlockKey::new("a"), 3);
        assert!(sel.is_collapsed());
        assert!(!Selection::within(&BlockKey::new("a"), 0, 2).is_collapsed());
    }

    #[test]
    fn test_bounds_orders_backward_selection() {
        let doc = two_block_doc();
        let sel = Selection::range(
            Position::new(BlockKey::new("b"), 2),
            Position::new(BlockKey::new("a"), 4),
        );
        let (start, end) = sel.bounds(&doc).unwrap();
        assert_eq!((start.index, start.offset), (0, 4));
        assert_eq!((end.index, end.offset), (1, 2));
    }

    #[test]
    fn test_bounds_orders_within_one_block() {
        let doc = two_block_doc();
        let sel = Selection::within(&BlockKey::new("a"), 4, 1);
        let (start, end) = sel.bounds(&doc).unwrap();
        assert_eq!(start.offset, 1);
        assert_eq!(end.offset, 4);
    }

    #[test]
    fn test_bounds_rejects_unknown_block() {
        let doc = two_block_doc();
        let sel = Selection::collapsed(BlockKey::new("missing"), 0);
        assert_eq!(
            sel.bounds(&doc),
            Err(EditError::UnknownBlock(BlockKey::new("missing")))
        );
    }
}
