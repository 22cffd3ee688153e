use serde::{Deserialize, Serialize};

/// A stored note.
///
/// The `id` is generated by the service on create, never supplied by the
/// caller. `content` is opaque text; no size or encoding validation happens
/// at this layer. The JSON form of this struct is the persisted layout for
/// backends that store bytes (Redis values, S3 object bodies), so the shape
/// must round-trip without loss.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    pub id: String,
    pub content: String,
}

/// The caller-supplied body for create and update.
///
/// The same shape serves both operations; the only difference is which id the
/// service pairs it with (generated vs. path-supplied).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotePayload {
    pub content: String,
}

impl Note {
    /// Pair a payload with an id.
    pub fn from_payload(id: impl Into<String>, payload: &NotePayload) -> Self {
        Self {
            id: id.into(),
            content: payload.content.clone(),
        }
    }
}
