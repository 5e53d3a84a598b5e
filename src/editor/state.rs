//! Editor session snapshots with undo and redo history.

use std::sync::Arc;

use crate::document::Document;

use super::selection::Selection;

/// Reason attached to each committed snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeType {
    InsertCharacters,
    BackspaceCharacter,
    DeleteCharacter,
    ChangeBlockType,
    SplitBlock,
    RemoveRange,
}

impl ChangeType {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::InsertCharacters => "insert-characters",
            Self::BackspaceCharacter => "backspace-character",
            Self::DeleteCharacter => "delete-character",
            Self::ChangeBlockType => "change-block-type",
            Self::SplitBlock => "split-block",
            Self::RemoveRange => "remove-range",
        }
    }

    /// Runs of these changes collapse into one undo step.
    const fn coalesces(self) -> bool {
        matches!(
            self,
            Self::InsertCharacters | Self::BackspaceCharacter | Self::DeleteCharacter
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
struct Snapshot {
    content: Document,
    selection: Selection,
}

#[derive(Debug)]
struct HistoryNode {
    snapshot: Snapshot,
    rest: History,
}

/// Persistent stack of snapshots. Clones share structure.
#[derive(Debug, Clone, Default)]
struct History(Option<Arc<HistoryNode>>);

impl History {
    fn push(&self, snapshot: Snapshot) -> Self {
        Self(Some(Arc::new(HistoryNode {
            snapshot,
            rest: self.clone(),
        })))
    }

    fn pop(&self) -> Option<(Snapshot, Self)> {
        self.0
            .as_ref()
            .map(|node| (node.snapshot.clone(), node.rest.clone()))
    }

    fn len(&self) -> usize {
        let mut len = 0;
        let mut cur = self.0.as_ref();
        while let Some(node) = cur {
            len += 1;
            cur = node.rest.0.as_ref();
        }
        len
    }
}

impl Drop for History {
    // Unlink iteratively so long histories don't recurse on drop.
    fn drop(&mut self) {
        let mut next = self.0.take();
        while let Some(node) = next {
            match Arc::try_unwrap(node) {
                Ok(mut node) => next = node.rest.0.take(),
                Err(_) => break,
            }
        }
    }
}

/// Editor session state: the current document snapshot, the selection and
/// undo/redo history.
///
/// Every transition returns a new `EditorState`; existing values never
/// change.
#[derive(Debug, Clone)]
pub struct EditorState {
    content: Document,
    selection: Selection,
    undo_stack: History,
    redo_stack: History,
    last_change: Option<ChangeType>,
}

impl EditorState {
    /// A session over an empty document.
    pub fn create_empty() -> Self {
        Self::create_with_content(Document::empty())
    }

    /// A session over `content` with the caret at the start of the first block.
    pub fn create_with_content(content: Document) -> Self {
        let selection = Selection::collapsed(content.first_block().key.clone(), 0);
        Self {
            content,
            selection,
            undo_stack: History::default(),
            redo_stack: History::default(),
            last_change: None,
        }
    }

    pub const fn current_content(&self) -> &Document {
        &self.content
    }

    pub const fn selection(&self) -> &Selection {
        &self.selection
    }

    pub const fn last_change(&self) -> Option<ChangeType> {
        self.last_change
    }

    pub fn can_undo(&self) -> bool {
        self.undo_stack.0.is_some()
    }

    pub fn can_redo(&self) -> bool {
        self.redo_stack.0.is_some()
    }

    pub fn undo_depth(&self) -> usize {
        self.undo_stack.len()
    }

    /// Commit `content` as the next snapshot.
    #[must_use]
    pub fn push(&self, content: Document, selection_after: Selection, change: ChangeType) -> Self {
        let boundary = self.last_change != Some(change) || !change.coalesces();
        let undo_stack = if boundary {
            self.undo_stack.push(self.snapshot())
        } else {
            self.undo_stack.clone()
        };
        tracing::debug!(
            change = change.as_str(),
            blocks = content.block_count(),
            boundary,
            "commit snapshot"
        );
        Self {
            content,
            selection: selection_after,
            undo_stack,
            redo_stack: History::default(),
            last_change: Some(change),
        }
    }

    /// Move the selection without changing content. Ends any coalescing run.
    #[must_use]
    pub fn force_selection(&self, selection: Selection) -> Self {
        Self {
            selection,
            last_change: None,
            ..self.clone()
        }
    }

    /// Restore the previous snapshot, if any.
    #[must_use]
    pub fn undo(&self) -> Self {
        let Some((previous, undo_stack)) = self.undo_stack.pop() else {
            return self.clone();
        };
        Self {
            redo_stack: self.redo_stack.push(self.snapshot()),
            content: previous.content,
            selection: previous.selection,
            undo_stack,
            last_change: None,
        }
    }

    /// Re-apply the most recently undone snapshot, if any.
    #[must_use]
    pub fn redo(&self) -> Self {
        let Some((next, redo_stack)) = self.redo_stack.pop() else {
            return self.clone();
        };
        Self {
            undo_stack: self.undo_stack.push(self.snapshot()),
            content: next.content,
            selection: next.selection,
            redo_stack,
            last_change: None,
        }
    }

    fn snapshot(&self) -> Snapshot {
        Snapshot {
            content: self.content.clone(),
            selection: self.selection.clone(),
        }
    }
}

impl Default for EditorState {
    fn default() -> Self {
        Self::create_empty()
    }
}
