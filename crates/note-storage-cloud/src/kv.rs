use async_trait::async_trait;
use redis::aio::ConnectionManager;
use redis::AsyncCommands;
use tracing::{debug, instrument};

use note_storage_core::{Note, NoteBackend, NotePayload, StorageError};

/// Keys are namespaced so the service can share a Redis database with other
/// tenants of the instance. The prefix never leaks above the trait: `keys`
/// strips it before returning ids.
const KEY_PREFIX: &str = "note:";

/// SCAN batch size hint.
const SCAN_COUNT: usize = 100;

/// Redis storage backend.
///
/// One contract call is one round trip. The connection manager multiplexes
/// all in-flight requests over a shared connection and reconnects on its own;
/// no retry policy is layered on top of it here.
#[derive(Clone)]
pub struct RedisBackend {
    manager: ConnectionManager,
}

impl RedisBackend {
    /// Connect to the Redis instance at `url`.
    pub async fn connect(url: &str) -> Result<Self, StorageError> {
        let client = redis::Client::open(url)
            .map_err(|e| StorageError::Unavailable(format!("invalid Redis URL: {}", e)))?;

        let manager = client
            .get_connection_manager()
            .await
            .map_err(|e| StorageError::Unavailable(format!("Redis connection failed: {}", e)))?;

        Ok(Self { manager })
    }

    fn note_key(id: &str) -> String {
        format!("{}{}", KEY_PREFIX, id)
    }

    fn id_from_key(key: &str) -> Option<&str> {
        key.strip_prefix(KEY_PREFIX)
    }

    fn encode(id: &str, payload: &NotePayload) -> Result<String, StorageError> {
        serde_json::to_string(&Note::from_payload(id, payload))
            .map_err(|e| StorageError::Serialization(format!("failed to encode note: {}", e)))
    }

    fn decode(value: &str) -> Result<Note, StorageError> {
        serde_json::from_str(value)
            .map_err(|e| StorageError::Serialization(format!("failed to decode note: {}", e)))
    }
}

#[async_trait]
impl NoteBackend for RedisBackend {
    fn backend_name(&self) -> &'static str {
        "redis"
    }

    #[instrument(skip(self), level = "debug")]
    async fn keys(&self) -> Result<Vec<String>, StorageError> {
        let mut conn = self.manager.clone();
        let pattern = format!("{}*", KEY_PREFIX);
        let mut ids = Vec::new();
        let mut cursor: u64 = 0;

        // SCAN instead of KEYS: enumeration must not block the server.
        loop {
            let (next, batch): (u64, Vec<String>) = redis::cmd("SCAN")
                .arg(cursor)
                .arg("MATCH")
                .arg(&pattern)
                .arg("COUNT")
                .arg(SCAN_COUNT)
                .query_async(&mut conn)
                .await
                .map_err(|e| StorageError::Unavailable(format!("Redis SCAN failed: {}", e)))?;

            ids.extend(
                batch
                    .iter()
                    .filter_map(|key| Self::id_from_key(key))
                    .map(str::to_string),
            );

            cursor = next;
            if cursor == 0 {
                break;
            }
        }

        debug!("Enumerated {} keys", ids.len());
        Ok(ids)
    }

    #[instrument(skip(self), level = "debug")]
    async fn get(&self, id: &str) -> Result<Option<Note>, StorageError> {
        let mut conn = self.manager.clone();

        // A nil reply is a cache miss, not a failure.
        let value: Option<String> = conn
            .get(Self::note_key(id))
            .await
            .map_err(|e| StorageError::Unavailable(format!("Redis GET failed: {}", e)))?;

        value.as_deref().map(Self::decode).transpose()
    }

    #[instrument(skip(self, payload), level = "debug")]
    async fn set(&self, id: &str, payload: &NotePayload) -> Result<(), StorageError> {
        let mut conn = self.manager.clone();
        let value = Self::encode(id, payload)?;

        conn.set::<_, _, ()>(Self::note_key(id), value)
            .await
            .map_err(|e| StorageError::Unavailable(format!("Redis SET failed: {}", e)))?;

        debug!("Stored note {}", id);
        Ok(())
    }
}
