//! Network storage backends for note-api.
//!
//! Two variants, both presenting the same `NoteBackend` contract as the
//! in-process map:
//! - `RedisBackend`: one key per note in a Redis database
//! - `S3Backend`: one object per note in an S3-compatible bucket
//!
//! Both translate their medium's native "not found" into `Ok(None)` and any
//! transport failure into `StorageError::Unavailable` before returning.

mod kv;
mod s3;

pub use kv::RedisBackend;
pub use s3::S3Backend;
