use thiserror::Error;

/// Errors that can occur in the storage layer.
///
/// Absence of a key is not an error: lookups return `Ok(None)` for a missing
/// id on every backend. Implementations translate their native failures into
/// these variants before returning, so nothing backend-specific crosses the
/// trait boundary.
#[derive(Error, Debug)]
pub enum StorageError {
    /// The storage medium could not complete the operation (network, I/O,
    /// auth failure at the medium level).
    #[error("backend unavailable: {0}")]
    Unavailable(String),

    /// A stored value could not be encoded or decoded.
    #[error("serialization error: {0}")]
    Serialization(String),
}
