use std::time::{Duration, Instant};

use crate::config::default_storage_path;
use crate::document::Document;
use crate::editor::commands::caret;
use crate::editor::{Autoformat, EditorState};
use crate::storage::{DEFAULT_SLOT, SlotStore};
use crate::ui::{screen_layout, visible_start};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Info,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
struct Toast {
    level: ToastLevel,
    message: String,
    expires_at: Instant,
}

/// The complete application state.
///
/// All state lives here - no global or scattered state.
pub struct Model {
    /// Current editor snapshot and history
    pub editor: EditorState,
    /// Autoformat rule engine applied to typed characters
    pub autoformat: Autoformat,
    /// Local storage holding the document slot
    pub store: SlotStore,
    /// Slot name the document is saved under
    pub slot: String,
    /// Content as of the last load or save
    saved_content: Document,
    /// First block shown in the editor viewport
    pub scroll_offset: usize,
    /// Terminal size (columns, rows)
    pub terminal_size: (u16, u16),
    toast: Option<Toast>,
    /// Set after first quit attempt with unsaved changes; allows second quit to proceed
    pub quit_confirmed: bool,
    /// Whether the app should quit
    pub should_quit: bool,
}

impl std::fmt::Debug for Model {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Model")
            .field("slot", &self.slot)
            .field("store", &self.store.path())
            .field("blocks", &self.editor.current_content().block_count())
            .field("dirty", &self.is_dirty())
            .finish_non_exhaustive()
    }
}

impl Model {
    /// Create a model editing `document`, loaded from `slot` of `store`.
    pub fn new(
        store: SlotStore,
        slot: impl Into<String>,
        document: Document,
        terminal_size: (u16, u16),
    ) -> Self {
        Self {
            editor: EditorState::create_with_content(document.clone()),
            autoformat: Autoformat::default(),
            store,
            slot: slot.into(),
            saved_content: document,
            scroll_offset: 0,
            terminal_size,
            toast: None,
            quit_confirmed: false,
            should_quit: false,
        }
    }

    #[must_use]
    pub const fn with_autoformat(mut self, autoformat: Autoformat) -> Self {
        self.autoformat = autoformat;
        self
    }

    /// Whether the content differs from what is in the slot.
    pub fn is_dirty(&self) -> bool {
        self.editor.current_content() != &self.saved_content
    }

    /// Record the current content as saved.
    pub fn mark_saved(&mut self) {
        self.saved_content = self.editor.current_content().clone();
    }

    /// Number of block rows the editor viewport shows.
    pub fn editor_rows(&self) -> usize {
        let (width, height) = self.terminal_size;
        let area = ratatui::layout::Rect::new(0, 0, width, height);
        screen_layout(area, self.toast.is_some()).editor_inner.height as usize
    }

    pub(super) fn ensure_cursor_visible(&mut self) {
        let (block_idx, _) = caret(&self.editor);
        self.scroll_offset = visible_start(self.scroll_offset, block_idx, self.editor_rows());
    }

    pub(super) fn max_scroll_offset(&self) -> usize {
        self.editor.current_content().block_count().saturating_sub(1)
    }

    pub(super) fn show_toast(&mut self, level: ToastLevel, message: impl Into<String>) {
        self.toast = Some(Toast {
            level,
            message: message.into(),
            expires_at: Instant::now() + Duration::from_secs(4),
        });
    }

    pub(super) fn expire_toast(&mut self, now: Instant) -> bool {
        if self
            .toast
            .as_ref()
            .is_some_and(|toast| toast.expires_at <= now)
        {
            self.toast = None;
            return true;
        }
        false
    }

    pub fn active_toast(&self) -> Option<(&str, ToastLevel)> {
        self.toast
            .as_ref()
            .map(|toast| (toast.message.as_str(), toast.level))
    }
}

impl Default for Model {
    fn default() -> Self {
        Self::new(
            SlotStore::new(default_storage_path()),
            DEFAULT_SLOT,
            Document::empty(),
            (80, 24),
        )
    }
}
