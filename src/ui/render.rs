use ratatui::layout::Margin;
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use unicode_width::UnicodeWidthChar;

use crate::app::Model;
use crate::document::byte_index;
use crate::editor::commands::caret;

use super::{HEADER_TITLE, SAVE_LABEL, status, style};

/// Screen regions, shared by rendering and mouse hit-testing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenLayout {
    pub header: Rect,
    pub save_button: Rect,
    pub editor: Rect,
    pub editor_inner: Rect,
    pub toast: Option<Rect>,
    pub status: Rect,
}

pub fn screen_layout(area: Rect, toast_active: bool) -> ScreenLayout {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(u16::from(toast_active)),
            Constraint::Length(1),
        ])
        .split(area);
    let header = chunks[0];
    let label_width = u16::try_from(SAVE_LABEL.len()).unwrap_or(u16::MAX);
    let save_button = Rect {
        x: header.right().saturating_sub(label_width + 1).max(header.x),
        width: label_width.min(header.width),
        ..header
    };
    let editor = chunks[1];
    ScreenLayout {
        header,
        save_button,
        editor,
        editor_inner: editor.inner(Margin::new(1, 1)),
        toast: toast_active.then_some(chunks[2]),
        status: chunks[3],
    }
}

/// First visible block index so that `cursor_block` stays on screen.
pub const fn visible_start(scroll: usize, cursor_block: usize, rows: usize) -> usize {
    if rows == 0 {
        scroll
    } else if cursor_block < scroll {
        cursor_block
    } else if cursor_block >= scroll + rows {
        cursor_block + 1 - rows
    } else {
        scroll
    }
}

/// First block drawn in the editor viewport.
pub fn first_visible_block(model: &Model) -> usize {
    let count = model.editor.current_content().block_count();
    model.scroll_offset.min(count.saturating_sub(1))
}

/// Calculate the width needed for line numbers.
pub const fn line_number_width(total_lines: usize) -> u16 {
    if total_lines < 10 {
        1
    } else if total_lines < 100 {
        2
    } else if total_lines < 1_000 {
        3
    } else if total_lines < 10_000 {
        4
    } else if total_lines < 100_000 {
        5
    } else {
        6
    }
}

/// Character offset under a display column of `text`.
pub fn offset_for_column(text: &str, column: usize) -> usize {
    let mut used = 0;
    for (idx, ch) in text.chars().enumerate() {
        let width = ch.width().unwrap_or(0);
        if used + width > column {
            return idx;
        }
        used += width;
    }
    text.chars().count()
}

/// Render the complete UI.
pub fn render(model: &Model, frame: &mut Frame) {
    let layout = screen_layout(frame.area(), model.active_toast().is_some());

    render_header(model, frame, &layout);
    render_editor(model, frame, &layout);

    if let Some(area) = layout.toast {
        status::render_toast_bar(model, frame, area);
    }
    status::render_status_bar(model, frame, layout.status);
}

fn render_header(model: &Model, frame: &mut Frame, layout: &ScreenLayout) {
    let title = Paragraph::new(format!(" {HEADER_TITLE}")).style(style::header_style());
    frame.render_widget(title, layout.header);
    let button = Paragraph::new(SAVE_LABEL).style(style::save_button_style(model.is_dirty()));
    frame.render_widget(button, layout.save_button);
}

fn render_editor(model: &Model, frame: &mut Frame, layout: &ScreenLayout) {
    let doc = model.editor.current_content();
    let blocks = doc.blocks();
    let (cursor_block, cursor_offset) = caret(&model.editor);
    let rows = layout.editor_inner.height as usize;
    let start = first_visible_block(model);
    let end = (start + rows).min(blocks.len());
    let gutter_width = line_number_width(blocks.len()) as usize;

    let mut content: Vec<Line> = Vec::with_capacity(end.saturating_sub(start));
    for (idx, block) in blocks.iter().enumerate().take(end).skip(start) {
        let block_style = style::style_for_block(&block.block_type);
        let line_num = format!("{:>gutter_width$} ", idx + 1);
        let mut spans = vec![Span::styled(line_num, Style::default().fg(Color::DarkGray))];

        if idx == cursor_block {
            let split = byte_index(&block.text, cursor_offset).unwrap_or(block.text.len());
            let (before, rest) = block.text.split_at(split);
            let mut rest_chars = rest.chars();
            let under_cursor = rest_chars.next().map_or_else(|| " ".to_string(), String::from);
            let after = rest_chars.as_str();

            if !before.is_empty() {
                spans.push(Span::styled(before.to_string(), block_style));
            }
            spans.push(Span::styled(under_cursor, style::cursor_style(block_style)));
            if !after.is_empty() {
                spans.push(Span::styled(after.to_string(), block_style));
            }
        } else {
            spans.push(Span::styled(block.text.clone(), block_style));
        }

        content.push(Line::from(spans));
    }

    let frame_block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" {} ", model.slot))
        .border_style(Style::default().fg(Color::DarkGray));
    frame.render_widget(Clear, layout.editor);
    frame.render_widget(Paragraph::new(content).block(frame_block), layout.editor);
}
