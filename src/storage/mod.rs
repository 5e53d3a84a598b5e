//! Persistence of the document in a named local storage slot.
//!
//! The slot holds the document's raw JSON form (see
//! [`crate::document::RawContent`]). It is read once at startup and written
//! only on an explicit save.

mod slot_store;

pub use slot_store::SlotStore;

use std::path::PathBuf;

use crate::document::Document;

/// Slot the editor reads and writes unless configured otherwise.
pub const DEFAULT_SLOT: &str = "editor_text";

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("failed to access storage {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("storage file {} is not a slot map", path.display())]
    CorruptStore {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("slot {slot:?} does not hold a valid document")]
    Malformed {
        slot: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to encode document")]
    Encode(#[source] serde_json::Error),
}

/// Load the document stored in `slot`, or an empty document if the slot is
/// unset.
///
/// # Errors
///
/// Returns [`StorageError::Malformed`] if the slot holds anything other than
/// a raw document, or a store error if the store itself cannot be read.
pub fn load(store: &SlotStore, slot: &str) -> Result<Document, StorageError> {
    let Some(json) = store.get_item(slot)?.filter(|json| !json.is_empty()) else {
        tracing::debug!(slot, "slot empty, starting with a blank document");
        return Ok(Document::empty());
    };
    let doc = Document::from_json(&json).map_err(|source| StorageError::Malformed {
        slot: slot.to_string(),
        source,
    })?;
    tracing::debug!(slot, blocks = doc.block_count(), "loaded document");
    Ok(doc)
}

/// Serialize `doc` and overwrite `slot` with it.
///
/// # Errors
///
/// Returns an error if encoding fails or the store cannot be written.
pub fn save(store: &SlotStore, slot: &str, doc: &Document) -> Result<(), StorageError> {
    let json = doc.to_json().map_err(StorageError::Encode)?;
    store.set_item(slot, &json)?;
    tracing::debug!(slot, blocks = doc.block_count(), bytes = json.len(), "saved document");
    Ok(())
}
