//! In-process storage backend for note-api.
//!
//! The default variant: a concurrent map scoped to the process. Data is lost
//! on restart; that is the documented trade-off for running without any
//! external service.

use async_trait::async_trait;
use dashmap::DashMap;
use tracing::{debug, instrument};

use note_storage_core::{Note, NoteBackend, NotePayload, StorageError};

/// In-memory storage backend.
///
/// Backed by a sharded concurrent map, so `get`/`set`/`keys` from different
/// requests never need an exclusive lock over the whole store. A `set` that
/// has returned is visible to every subsequent `get`.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    notes: DashMap<String, Note>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl NoteBackend for MemoryBackend {
    fn backend_name(&self) -> &'static str {
        "memory"
    }

    #[instrument(skip(self), level = "debug")]
    async fn keys(&self) -> Result<Vec<String>, StorageError> {
        let keys: Vec<String> = self.notes.iter().map(|e| e.key().clone()).collect();
        debug!("Enumerated {} keys", keys.len());
        Ok(keys)
    }

    #[instrument(skip(self), level = "debug")]
    async fn get(&self, id: &str) -> Result<Option<Note>, StorageError> {
        Ok(self.notes.get(id).map(|e| e.value().clone()))
    }

    #[instrument(skip(self, payload), level = "debug")]
    async fn set(&self, id: &str, payload: &NotePayload) -> Result<(), StorageError> {
        self.notes
            .insert(id.to_string(), Note::from_payload(id, payload));
        debug!("Stored note {}", id);
        Ok(())
    }
}
