use crate::app::{App, Message, Model, ToastLevel};
use crate::storage;

impl App {
    pub(super) fn handle_message_side_effects(model: &mut Model, msg: &Message) {
        if let Message::Save = msg {
            Self::save_document(model);
        }
    }

    fn save_document(model: &mut Model) {
        let doc = model.editor.current_content().clone();
        match storage::save(&model.store, &model.slot, &doc) {
            Ok(()) => {
                tracing::info!(
                    slot = %model.slot,
                    blocks = doc.block_count(),
                    path = %model.store.path().display(),
                    "document saved"
                );
                model.mark_saved();
                model.show_toast(ToastLevel::Info, format!("Saved to {}", model.slot));
                if model.quit_confirmed {
                    model.should_quit = true;
                }
            }
            Err(err) => {
                tracing::error!(slot = %model.slot, error = %err, "save failed");
                model.show_toast(ToastLevel::Error, format!("Save failed: {err}"));
            }
        }
    }
}
