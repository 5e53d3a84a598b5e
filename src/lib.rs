// Only allow lints that are either transitive-dependency noise or
// genuinely opinionated style choices that don't indicate real issues.
#![allow(
    // Transitive dependency version mismatches we can't control
    clippy::multiple_crate_versions,
    // module_name_repetitions is pure style preference (e.g. storage::StorageError)
    clippy::module_name_repetitions
)]

//! # Blockpad
//!
//! A terminal rich-text editor with block-level autoformatting.
//!
//! Typing a trigger prefix followed by a space restyles the current block:
//! - `#` makes a heading
//! - `*` makes the block bold
//! - `**` makes the block red
//! - `***` underlines the block
//!
//! The document lives in a named local storage slot and is written back only
//! when the user saves.
//!
//! ## Architecture
//!
//! Blockpad uses The Elm Architecture (TEA) pattern:
//! - **Model**: Application state
//! - **Message**: Events and actions
//! - **Update**: Pure state transitions
//! - **View**: Render to terminal
//!
//! ## Modules
//!
//! - [`app`]: Main application loop and state
//! - [`config`]: Persistent command-line defaults
//! - [`document`]: Block document model and its raw JSON form
//! - [`editor`]: Editor state, history, commands and autoformat rules
//! - [`storage`]: Slot persistence
//! - [`ui`]: Terminal UI components

pub mod app;
pub mod config;
pub mod document;
pub mod editor;
pub mod storage;
pub mod ui;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::app::{App, Message, Model};
    pub use crate::document::{Block, BlockType, Document};
    pub use crate::editor::{Autoformat, EditorState, SpanPolicy};
    pub use crate::storage::SlotStore;
}
