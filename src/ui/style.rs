//! Block styling.
//!
//! [`block_class`] resolves a block type to its display class name; the
//! terminal styles are derived from that class.

use ratatui::style::{Color, Modifier, Style};

use crate::document::BlockType;

/// Display class name for a block type. Empty for unstyled blocks.
pub const fn block_class(block_type: &BlockType) -> &'static str {
    match block_type {
        BlockType::RedLine => "red-text",
        BlockType::Underline => "underline",
        BlockType::Bold => "bold",
        _ => "",
    }
}

/// Terminal style for a display class.
pub fn style_for_class(class: &str) -> Style {
    match class {
        "red-text" => Style::default().fg(Color::Red),
        "underline" => Style::default().add_modifier(Modifier::UNDERLINED),
        "bold" => Style::default().add_modifier(Modifier::BOLD),
        _ => Style::default(),
    }
}

/// Terminal style for a whole block.
///
/// Headings carry no class; they get heading styling of their own.
pub fn style_for_block(block_type: &BlockType) -> Style {
    match block_type {
        BlockType::HeaderOne => Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
        other => style_for_class(block_class(other)),
    }
}

pub fn header_style() -> Style {
    Style::default()
        .bg(Color::Indexed(236))
        .fg(Color::White)
        .add_modifier(Modifier::BOLD)
}

pub fn save_button_style(dirty: bool) -> Style {
    let style = Style::default().fg(Color::Black).add_modifier(Modifier::BOLD);
    if dirty {
        style.bg(Color::Yellow)
    } else {
        style.bg(Color::Green)
    }
}

pub fn cursor_style(base: Style) -> Style {
    base.bg(Color::White).fg(Color::Black)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_known_types_map_to_classes() {
        assert_eq!(block_class(&BlockType::RedLine), "red-text");
        assert_eq!(block_class(&BlockType::Underline), "underline");
        assert_eq!(block_class(&BlockType::Bold), "bold");
    }

    #[test]
    fn test_unstyled_and_heading_have_no_class() {
        assert_eq!(block_class(&BlockType::Unstyled), "");
        assert_eq!(block_class(&BlockType::HeaderOne), "");
        assert_eq!(block_class(&BlockType::Other("blockquote".into())), "");
    }

    #[test]
    fn test_class_styles() {
        assert_eq!(style_for_block(&BlockType::RedLine).fg, Some(Color::Red));
        assert!(
            style_for_block(&BlockType::Underline)
                .add_modifier
                .contains(Modifier::UNDERLINED)
        );
        assert!(
            style_for_block(&BlockType::Bold)
                .add_modifier
                .contains(Modifier::BOLD)
        );
        assert_eq!(style_for_block(&BlockType::Unstyled), Style::default());
        assert!(
            style_for_block(&BlockType::HeaderOne)
                .add_modifier
                .contains(Modifier::BOLD)
        );
    }

    proptest! {
        #[test]
        fn unknown_tags_resolve_to_empty_class(tag in "[a-zA-Z_-]{0,16}") {
            prop_assume!(!matches!(tag.as_str(), "RED_LINE" | "UNDERLINE" | "BOLD"));
            prop_assert_eq!(block_class(&BlockType::parse(&tag)), "");
        }
    }
}
