use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::layout::Rect;

use crate::app::{App, Message, Model};
use crate::editor::Direction;
use crate::ui::{first_visible_block, line_number_width, offset_for_column, screen_layout};

use super::event_loop::ResizeDebouncer;

/// Blocks scrolled per mouse wheel notch.
const WHEEL_STEP: usize = 3;

impl App {
    pub(super) fn handle_event(
        event: &Event,
        model: &Model,
        now_ms: u64,
        resize_debouncer: &mut ResizeDebouncer,
    ) -> Option<Message> {
        match event {
            Event::Key(key) => Self::handle_key(*key, model),
            Event::Mouse(mouse) => Self::handle_mouse(*mouse, model),
            Event::Resize(w, h) => {
                tracing::trace!(width = w, height = h, "resize queued");
                resize_debouncer.queue(*w, *h, now_ms);
                None
            }
            _ => None,
        }
    }

    pub(super) fn handle_key(key: KeyEvent, model: &Model) -> Option<Message> {
        if key.kind != KeyEventKind::Press {
            return None;
        }
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

        match key.code {
            // Application
            KeyCode::Char('s') if ctrl => Some(Message::Save),
            KeyCode::Char('z') if ctrl => Some(Message::Undo),
            KeyCode::Char('y') if ctrl => Some(Message::Redo),
            KeyCode::Char('q' | 'c') if ctrl => Some(Message::Quit),

            // Caret
            KeyCode::Home if ctrl => Some(Message::MoveToStart),
            KeyCode::End if ctrl => Some(Message::MoveToEnd),
            KeyCode::Home => Some(Message::MoveHome),
            KeyCode::End => Some(Message::MoveEnd),
            KeyCode::Up => Some(Message::MoveCursor(Direction::Up)),
            KeyCode::Down => Some(Message::MoveCursor(Direction::Down)),
            KeyCode::Left => Some(Message::MoveCursor(Direction::Left)),
            KeyCode::Right => Some(Message::MoveCursor(Direction::Right)),
            KeyCode::PageUp => Some(Message::ScrollUp(model.editor_rows().max(1))),
            KeyCode::PageDown => Some(Message::ScrollDown(model.editor_rows().max(1))),

            // Editing
            KeyCode::Enter => Some(Message::Return),
            KeyCode::Backspace => Some(Message::Backspace),
            KeyCode::Delete => Some(Message::DeleteForward),
            KeyCode::Char(c) if !ctrl && !key.modifiers.contains(KeyModifiers::ALT) => {
                Some(Message::InsertChar(c))
            }

            _ => None,
        }
    }

    pub(super) fn handle_mouse(mouse: MouseEvent, model: &Model) -> Option<Message> {
        let (width, height) = model.terminal_size;
        let layout = screen_layout(
            Rect::new(0, 0, width, height),
            model.active_toast().is_some(),
        );

        match mouse.kind {
            MouseEventKind::ScrollUp => Some(Message::ScrollUp(WHEEL_STEP)),
            MouseEventKind::ScrollDown => Some(Message::ScrollDown(WHEEL_STEP)),
            MouseEventKind::Down(MouseButton::Left) => {
                if point_in_rect(mouse.column, mouse.row, layout.save_button) {
                    return Some(Message::Save);
                }
                if point_in_rect(mouse.column, mouse.row, layout.editor_inner) {
                    return Some(caret_for_click(model, layout.editor_inner, mouse));
                }
                None
            }
            _ => None,
        }
    }
}

/// Map a click inside the editor to a `(block, offset)` caret move.
fn caret_for_click(model: &Model, inner: Rect, mouse: MouseEvent) -> Message {
    let blocks = model.editor.current_content().blocks();
    let row = usize::from(mouse.row - inner.y);
    let index = (first_visible_block(model) + row).min(blocks.len().saturating_sub(1));
    let gutter = usize::from(line_number_width(blocks.len())) + 1;
    let column = usize::from(mouse.column - inner.x).saturating_sub(gutter);
    let offset = blocks
        .get(index)
        .map_or(0, |block| offset_for_column(&block.text, column));
    Message::MoveTo(index, offset)
}

fn point_in_rect(col: u16, row: u16, rect: Rect) -> bool {
    col >= rect.x
        && col < rect.x + rect.width
        && row >= rect.y
        && row < rect.y + rect.height
}
