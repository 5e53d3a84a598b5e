use crate::app::{Model, ToastLevel};
use crate::editor::{
    Direction, EditError, EditorState, HandleValue, commands, handle_return,
};

/// All possible events and actions in the application.
///
/// These represent user input, system events, and internal actions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    // Editing
    /// Type a character at the caret (autoformat gets first look)
    InsertChar(char),
    /// Enter: split the block, the new block is unstyled
    Return,
    /// Delete character before caret (Backspace)
    Backspace,
    /// Delete character at caret (Delete)
    DeleteForward,
    /// Undo the last committed change
    Undo,
    /// Redo the last undone change
    Redo,

    // Caret
    /// Move caret in a direction
    MoveCursor(Direction),
    /// Move caret to beginning of block (Home)
    MoveHome,
    /// Move caret to end of block (End)
    MoveEnd,
    /// Move caret to start of document (Ctrl+Home)
    MoveToStart,
    /// Move caret to end of document (Ctrl+End)
    MoveToEnd,
    /// Move caret to (block, offset), e.g. from a mouse click
    MoveTo(usize, usize),

    // Viewport
    /// Scroll editor viewport up by n blocks
    ScrollUp(usize),
    /// Scroll editor viewport down by n blocks
    ScrollDown(usize),

    // Persistence
    /// Save the document to its storage slot
    Save,

    // Window
    /// Terminal resized
    Resize(u16, u16),
    /// Redraw screen
    Redraw,

    // Application
    /// Quit the application
    Quit,
}

/// Pure function that updates the model based on a message.
///
/// This is the core of TEA - all state transitions happen here.
/// No side effects should occur in this function; saving happens in
/// the side-effect handler after `update` returns.
pub fn update(mut model: Model, msg: Message) -> Model {
    // Save preserves the quit flag so Ctrl+S can complete a pending quit.
    if !matches!(msg, Message::Quit | Message::Save) {
        model.quit_confirmed = false;
    }

    match msg {
        Message::InsertChar(ch) => {
            let result = model
                .autoformat
                .handle_before_input(ch, &model.editor)
                .and_then(|handled| {
                    handled_or(handled, &model.editor, |state| {
                        commands::insert_characters(state, ch.encode_utf8(&mut [0; 4]))
                    })
                });
            apply_edit(&mut model, result);
        }
        Message::Return => {
            let result = handle_return(&model.editor).map(|handled| match handled {
                HandleValue::Handled(next) => next,
                HandleValue::NotHandled => model.editor.clone(),
            });
            apply_edit(&mut model, result);
        }
        Message::Backspace => {
            let result = commands::backspace(&model.editor);
            apply_edit(&mut model, result);
        }
        Message::DeleteForward => {
            let result = commands::delete_forward(&model.editor);
            apply_edit(&mut model, result);
        }
        Message::Undo => {
            if model.editor.can_undo() {
                model.editor = model.editor.undo();
                model.ensure_cursor_visible();
            }
        }
        Message::Redo => {
            if model.editor.can_redo() {
                model.editor = model.editor.redo();
                model.ensure_cursor_visible();
            }
        }
        Message::MoveCursor(dir) => {
            model.editor = commands::move_cursor(&model.editor, dir);
            model.ensure_cursor_visible();
        }
        Message::MoveHome => {
            model.editor = commands::move_home(&model.editor);
        }
        Message::MoveEnd => {
            model.editor = commands::move_end(&model.editor);
        }
        Message::MoveToStart => {
            model.editor = commands::move_to_start(&model.editor);
            model.ensure_cursor_visible();
        }
        Message::MoveToEnd => {
            model.editor = commands::move_to_end(&model.editor);
            model.ensure_cursor_visible();
        }
        Message::MoveTo(block, offset) => {
            model.editor = commands::move_to(&model.editor, block, offset);
            model.ensure_cursor_visible();
        }
        Message::ScrollUp(n) => {
            model.scroll_offset = model.scroll_offset.saturating_sub(n);
        }
        Message::ScrollDown(n) => {
            model.scroll_offset = (model.scroll_offset + n).min(model.max_scroll_offset());
        }
        // Handled by the side-effect pass
        Message::Save | Message::Redraw => {}
        Message::Resize(width, height) => {
            model.terminal_size = (width, height);
            model.ensure_cursor_visible();
        }
        Message::Quit => {
            if model.is_dirty() && !model.quit_confirmed {
                model.show_toast(
                    ToastLevel::Warning,
                    "Unsaved changes! Press Ctrl+Q again to quit, or Ctrl+S to save",
                );
                model.quit_confirmed = true;
            } else {
                model.should_quit = true;
            }
        }
    }
    model
}

/// Use the handled state, or run the default edit when the handler passed.
fn handled_or(
    value: HandleValue,
    state: &EditorState,
    default: impl FnOnce(&EditorState) -> Result<EditorState, EditError>,
) -> Result<EditorState, EditError> {
    match value {
        HandleValue::Handled(next) => Ok(next),
        HandleValue::NotHandled => default(state),
    }
}

/// Commit an edit result; failed edits leave the state untouched.
fn apply_edit(model: &mut Model, result: Result<EditorState, EditError>) {
    match result {
        Ok(next) => {
            model.editor = next;
            model.ensure_cursor_visible();
        }
        Err(err) => {
            tracing::warn!(error = %err, "edit rejected");
            model.show_toast(ToastLevel::Error, format!("Edit failed: {err}"));
        }
    }
}
