use async_trait::async_trait;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::Client as S3Client;
use tracing::{debug, instrument};

use note_storage_core::{Note, NoteBackend, NotePayload, StorageError};

/// All note objects live under this prefix in the bucket.
const OBJECT_PREFIX: &str = "notes/";

/// S3 object storage backend.
///
/// Storage layout:
/// ```text
/// {bucket}/
///   notes/
///     {id}.json    # JSON-serialized Note
/// ```
///
/// Works against AWS S3 and S3-compatible stores (R2, MinIO) via an endpoint
/// override on the client.
#[derive(Clone)]
pub struct S3Backend {
    client: S3Client,
    bucket: String,
}

impl S3Backend {
    pub fn new(client: S3Client, bucket: String) -> Self {
        Self { client, bucket }
    }

    fn object_key(id: &str) -> String {
        format!("{}{}.json", OBJECT_PREFIX, id)
    }

    fn id_from_object_key(key: &str) -> Option<&str> {
        key.strip_prefix(OBJECT_PREFIX)?.strip_suffix(".json")
    }

    fn decode(body: &[u8]) -> Result<Note, StorageError> {
        serde_json::from_slice(body)
            .map_err(|e| StorageError::Serialization(format!("failed to decode note: {}", e)))
    }

    async fn get_object(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError> {
        let result = self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await;

        match result {
            Ok(output) => {
                let bytes = output
                    .body
                    .collect()
                    .await
                    .map_err(|e| {
                        StorageError::Unavailable(format!("failed to read object body: {}", e))
                    })?
                    .into_bytes();
                Ok(Some(bytes.to_vec()))
            }
            Err(e) => {
                let service_error = e.into_service_error();
                if service_error.is_no_such_key() {
                    Ok(None)
                } else {
                    Err(StorageError::Unavailable(format!(
                        "get_object error: {}",
                        service_error
                    )))
                }
            }
        }
    }
}

#[async_trait]
impl NoteBackend for S3Backend {
    fn backend_name(&self) -> &'static str {
        "s3"
    }

    #[instrument(skip(self), level = "debug")]
    async fn keys(&self) -> Result<Vec<String>, StorageError> {
        let mut ids = Vec::new();
        let mut continuation_token: Option<String> = None;

        loop {
            let mut request = self
                .client
                .list_objects_v2()
                .bucket(&self.bucket)
                .prefix(OBJECT_PREFIX);

            if let Some(token) = continuation_token.take() {
                request = request.continuation_token(token);
            }

            let output = request.send().await.map_err(|e| {
                StorageError::Unavailable(format!("list_objects error: {}", e))
            })?;

            if let Some(contents) = output.contents {
                ids.extend(
                    contents
                        .iter()
                        .filter_map(|obj| obj.key.as_deref())
                        .filter_map(Self::id_from_object_key)
                        .map(str::to_string),
                );
            }

            if output.is_truncated.unwrap_or(false) {
                continuation_token = output.next_continuation_token;
            } else {
                break;
            }
        }

        debug!("Enumerated {} keys", ids.len());
        Ok(ids)
    }

    #[instrument(skip(self), level = "debug")]
    async fn get(&self, id: &str) -> Result<Option<Note>, StorageError> {
        let body = self.get_object(&Self::object_key(id)).await?;
        body.as_deref().map(Self::decode).transpose()
    }

    #[instrument(skip(self, payload), level = "debug")]
    async fn set(&self, id: &str, payload: &NotePayload) -> Result<(), StorageError> {
        let body = serde_json::to_vec(&Note::from_payload(id, payload))
            .map_err(|e| StorageError::Serialization(format!("failed to encode note: {}", e)))?;

        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(Self::object_key(id))
            .body(ByteStream::from(body))
            .send()
            .await
            .map_err(|e| StorageError::Unavailable(format!("put_object error: {}", e)))?;

        debug!("Stored note {}", id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn object_key_layout() {
        assert_eq!(S3Backend::object_key("abc"), "notes/abc.json");
    }

    #[test]
    fn id_from_object_key_inverts_object_key() {
        assert_eq!(
            S3Backend::id_from_object_key(&S3Backend::object_key("abc")),
            Some("abc")
        );
        assert_eq!(S3Backend::id_from_object_key("notes/abc.txt"), None);
        assert_eq!(S3Backend::id_from_object_key("other/abc.json"), None);
    }

    #[test]
    fn decode_reads_stored_body() {
        let note = S3Backend::decode(br#"{"id":"n-1","content":"buy milk"}"#).unwrap();
        assert_eq!(note.id, "n-1");
        assert_eq!(note.content, "buy milk");
    }

    #[test]
    fn decode_rejects_garbage() {
        assert!(matches!(
            S3Backend::decode(b"not json"),
            Err(StorageError::Serialization(_))
        ));
    }
}
