//! Default editing behaviour: plain insertion, deletion and caret motion.

use super::modifier;
use super::selection::{Position, Selection};
use super::state::{ChangeType, EditorState};
use super::EditError;

/// Direction for cursor movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// Insert `text` at the selection, replacing any selected range.
///
/// # Errors
///
/// Returns an error if the selection does not fit the document.
pub fn insert_characters(state: &EditorState, text: &str) -> Result<EditorState, EditError> {
    let (content, caret) =
        modifier::replace_text(state.current_content(), state.selection(), text)?;
    Ok(state.push(content, caret, ChangeType::InsertCharacters))
}

/// Delete backwards (Backspace).
///
/// At the start of a block the block is merged into the one above it.
///
/// # Errors
///
/// Returns an error if the selection does not fit the document.
pub fn backspace(state: &EditorState) -> Result<EditorState, EditError> {
    if !state.selection().is_collapsed() {
        return remove_selection(state);
    }
    let doc = state.current_content();
    let (at, _) = state.selection().bounds(doc)?;
    let range = if at.offset > 0 {
        Selection::within(&at.key, at.offset - 1, at.offset)
    } else if at.index > 0 {
        let above = &doc.blocks()[at.index - 1];
        Selection::range(
            Position::new(above.key.clone(), above.char_len()),
            Position::new(at.key, 0),
        )
    } else {
        return Ok(state.clone());
    };
    let (content, caret) = modifier::remove_range(doc, &range)?;
    Ok(state.push(content, caret, ChangeType::BackspaceCharacter))
}

/// Delete forwards (Delete).
///
/// At the end of a block the block below is merged into it.
///
/// # Errors
///
/// Returns an error if the selection does not fit the document.
pub fn delete_forward(state: &EditorState) -> Result<EditorState, EditError> {
    if !state.selection().is_collapsed() {
        return remove_selection(state);
    }
    let doc = state.current_content();
    let (at, _) = state.selection().bounds(doc)?;
    let len = doc.blocks()[at.index].char_len();
    let range = if at.offset < len {
        Selection::within(&at.key, at.offset, at.offset + 1)
    } else if let Some(below) = doc.blocks().get(at.index + 1) {
        Selection::range(
            Position::new(at.key, at.offset),
            Position::new(below.key.clone(), 0),
        )
    } else {
        return Ok(state.clone());
    };
    let (content, caret) = modifier::remove_range(doc, &range)?;
    Ok(state.push(content, caret, ChangeType::DeleteCharacter))
}

fn remove_selection(state: &EditorState) -> Result<EditorState, EditError> {
    let (content, caret) = modifier::remove_range(state.current_content(), state.selection())?;
    Ok(state.push(content, caret, ChangeType::RemoveRange))
}

/// Move the caret one step, collapsing any selection.
pub fn move_cursor(state: &EditorState, direction: Direction) -> EditorState {
    let doc = state.current_content();
    let (index, offset) = caret(state);
    let len_at = |i: usize| doc.blocks()[i].char_len();
    let (index, offset) = match direction {
        Direction::Left if offset > 0 => (index, offset - 1),
        Direction::Left if index > 0 => (index - 1, len_at(index - 1)),
        Direction::Right if offset < len_at(index) => (index, offset + 1),
        Direction::Right if index + 1 < doc.block_count() => (index + 1, 0),
        Direction::Up if index > 0 => (index - 1, offset.min(len_at(index - 1))),
        Direction::Down if index + 1 < doc.block_count() => {
            (index + 1, offset.min(len_at(index + 1)))
        }
        _ => (index, offset),
    };
    move_to(state, index, offset)
}

/// Caret to the start of the current block (Home).
pub fn move_home(state: &EditorState) -> EditorState {
    let (index, _) = caret(state);
    move_to(state, index, 0)
}

/// Caret to the end of the current block (End).
pub fn move_end(state: &EditorState) -> EditorState {
    let (index, _) = caret(state);
    move_to(state, index, usize::MAX)
}

/// Caret to the start of the document (Ctrl+Home).
pub fn move_to_start(state: &EditorState) -> EditorState {
    move_to(state, 0, 0)
}

/// Caret to the end of the document (Ctrl+End).
pub fn move_to_end(state: &EditorState) -> EditorState {
    move_to(state, usize::MAX, usize::MAX)
}

/// Caret to a block index and character offset, clamped to the document.
pub fn move_to(state: &EditorState, index: usize, offset: usize) -> EditorState {
    let doc = state.current_content();
    let index = index.min(doc.block_count() - 1);
    let block = &doc.blocks()[index];
    let offset = offset.min(block.char_len());
    state.force_selection(Selection::collapsed(block.key.clone(), offset))
}

/// Block index and offset of the caret (the selection focus).
///
/// Falls back to the start of the document if the focus names a block that
/// no longer exists.
pub fn caret(state: &EditorState) -> (usize, usize) {
    let doc = state.current_content();
    let focus = &state.selection().focus;
    doc.index_of(&focus.key).map_or((0, 0), |index| {
        (index, focus.offset.min(doc.blocks()[index].char_len()))
    })
}
