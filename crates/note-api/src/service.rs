//! Note operations composed from the backend contract.

use std::sync::Arc;

use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

use note_storage_core::{Note, NoteBackend, NotePayload};

use crate::error::{ApiError, Result};

/// The note operations: list, get-one, create, update.
///
/// Holds the one backend instance selected at startup and never inspects
/// backend-specific error types; everything it sees is already translated
/// to the contract's error surface.
#[derive(Clone)]
pub struct NoteService {
    backend: Arc<dyn NoteBackend>,
}

impl NoteService {
    pub fn new(backend: Arc<dyn NoteBackend>) -> Self {
        Self { backend }
    }

    pub fn backend_name(&self) -> &'static str {
        self.backend.backend_name()
    }

    /// Fetch every stored note.
    ///
    /// A backend failure aborts the whole operation; no partial list is
    /// returned. A key that enumerates but reads back absent is skipped,
    /// since enumeration and lookup are not atomic on every medium.
    #[instrument(skip(self), fields(count = tracing::field::Empty))]
    pub async fn list(&self) -> Result<Vec<Note>> {
        let keys = self.backend.keys().await?;
        let mut notes = Vec::with_capacity(keys.len());

        for id in keys {
            match self.backend.get(&id).await? {
                Some(note) => notes.push(note),
                None => warn!("Note {} listed but no longer present", id),
            }
        }

        tracing::Span::current().record("count", notes.len());
        debug!("Fetched {} notes", notes.len());
        Ok(notes)
    }

    /// Fetch one note; absent maps to `NotFound`.
    #[instrument(skip(self))]
    pub async fn get(&self, id: &str) -> Result<Note> {
        self.backend.get(id).await?.ok_or(ApiError::NotFound)
    }

    /// Store the payload under a fresh id and return that id.
    ///
    /// Ids are random UUIDs; no uniqueness probe against the backend. If the
    /// write fails, the caller must not assume the note exists.
    #[instrument(skip(self, payload))]
    pub async fn create(&self, payload: &NotePayload) -> Result<String> {
        let id = Uuid::new_v4().to_string();
        self.backend.set(&id, payload).await?;
        info!(note_id = %id, "Note created");
        Ok(id)
    }

    /// Replace the content stored under `id`.
    ///
    /// Upsert: no existence check, a missing id is silently created.
    #[instrument(skip(self, payload))]
    pub async fn update(&self, id: &str, payload: &NotePayload) -> Result<()> {
        self.backend.set(id, payload).await?;
        debug!("Updated note {}", id);
        Ok(())
    }
}
