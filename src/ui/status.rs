use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

use crate::app::{Model, ToastLevel};
use crate::editor::commands::caret;

pub fn render_status_bar(model: &Model, frame: &mut Frame, area: Rect) {
    let doc = model.editor.current_content();
    let (block_idx, offset) = caret(&model.editor);
    let block_type = &doc.blocks()[block_idx].block_type;
    let dirty_indicator = if model.is_dirty() { " [modified]" } else { "" };

    let status = format!(
        " EDIT  {}{}  Blk {}/{}, Col {}  [{}]  Ctrl+S:save  Ctrl+Z:undo  Ctrl+Q:quit",
        model.slot,
        dirty_indicator,
        block_idx + 1,
        doc.block_count(),
        offset + 1,
        block_type,
    );

    let status_bar =
        Paragraph::new(status).style(Style::default().bg(Color::Magenta).fg(Color::White));

    frame.render_widget(status_bar, area);
}

pub fn render_toast_bar(model: &Model, frame: &mut Frame, area: Rect) {
    let Some((message, level)) = model.active_toast() else {
        return;
    };
    let (prefix, style) = match level {
        ToastLevel::Info => (
            "[info]",
            Style::default().bg(Color::DarkGray).fg(Color::White),
        ),
        ToastLevel::Warning => (
            "[warn]",
            Style::default().bg(Color::Yellow).fg(Color::Black),
        ),
        ToastLevel::Error => ("[error]", Style::default().bg(Color::Red).fg(Color::White)),
    };
    let toast = Paragraph::new(format!("{prefix} {message}")).style(style);
    frame.render_widget(toast, area);
}
