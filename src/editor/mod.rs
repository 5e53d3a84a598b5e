//! Editing layer over the block document.
//!
//! - [`EditorState`]: immutable session snapshots with undo/redo
//! - [`modifier`]: pure document mutation primitives
//! - [`commands`]: default insertion, deletion and caret motion
//! - [`autoformat`]: markdown-style shortcuts and the Enter handler

pub mod autoformat;
pub mod commands;
pub mod modifier;
mod selection;
mod state;

pub use autoformat::{Autoformat, HandleValue, SpanPolicy, handle_return};
pub use commands::Direction;
pub use selection::{Bound, Position, Selection};
pub use state::{ChangeType, EditorState};

use crate::document::BlockKey;

/// Errors raised when a selection does not fit the document it is applied to.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EditError {
    #[error("no block with key {0}")]
    UnknownBlock(BlockKey),
    #[error("offset {offset} is outside block {key} (length {len})")]
    OffsetOutOfRange {
        key: BlockKey,
        offset: usize,
        len: usize,
    },
}
