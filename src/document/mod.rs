//! Block document model.
//!
//! A [`Document`] is an immutable, ordered list of [`Block`]s. Every edit
//! produces a new document value; see [`crate::editor`] for the mutation
//! primitives and undo history built on top of it.

mod raw;
mod types;

pub use raw::{RawBlock, RawContent};
pub use types::{Block, BlockKey, BlockType, Document, byte_index};
