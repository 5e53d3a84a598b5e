//! Terminal UI components.
//!
//! - [`style`]: block class resolution and terminal styles
//! - layout helpers shared by rendering and mouse hit-testing

pub mod style;

mod render;
mod status;

pub use render::{
    ScreenLayout, first_visible_block, line_number_width, offset_for_column, render,
    screen_layout, visible_start,
};

/// Static header label.
pub const HEADER_TITLE: &str = "Editor by Sparsh";
/// Label of the save button in the header.
pub const SAVE_LABEL: &str = "[ Save ]";
