use async_trait::async_trait;

use crate::error::StorageError;
use crate::model::{Note, NotePayload};

/// Storage backend abstraction for notes.
///
/// Every variant (in-process map, Redis, object store) implements these
/// operations with identical observable semantics. The process constructs
/// exactly one backend at startup and shares it across requests as
/// `Arc<dyn NoteBackend>`; implementations own their client handle and must
/// be safe for concurrent use.
#[async_trait]
pub trait NoteBackend: Send + Sync {
    /// Returns the backend identifier (e.g., "memory", "redis", "s3").
    fn backend_name(&self) -> &'static str;

    /// Enumerate every stored note id.
    ///
    /// Unordered, possibly empty. No pagination at this layer; backends that
    /// page natively drain all pages before returning.
    async fn keys(&self) -> Result<Vec<String>, StorageError>;

    /// Look up a note by id.
    ///
    /// `Ok(None)` is the absent marker. A missing id is a normal outcome of
    /// this call and must never surface as an error, whatever the medium's
    /// native miss behavior looks like.
    async fn get(&self, id: &str) -> Result<Option<Note>, StorageError>;

    /// Store a note, replacing any existing value at `id`.
    ///
    /// Idempotent, last-writer-wins; there is no optimistic concurrency
    /// check and no field-level update.
    async fn set(&self, id: &str, payload: &NotePayload) -> Result<(), StorageError>;
}
