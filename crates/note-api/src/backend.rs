//! Backend selection.
//!
//! One configuration read decides the variant, in `main`, before the
//! listener starts. Every handler then shares the single constructed
//! instance for the process lifetime; there is no lazy initialization and
//! no runtime swap.

use std::sync::Arc;

use aws_config::{BehaviorVersion, Region};
use tracing::{info, warn};

use note_storage_cloud::{RedisBackend, S3Backend};
use note_storage_core::NoteBackend;
use note_storage_memory::MemoryBackend;

use crate::config::Config;

/// Construct the configured storage backend.
///
/// Unrecognized values fall back to the in-process map rather than failing
/// startup; the choice is logged either way.
pub async fn build_backend(config: &Config) -> anyhow::Result<Arc<dyn NoteBackend>> {
    let backend: Arc<dyn NoteBackend> = match config.backend.as_str() {
        "redis" => Arc::new(RedisBackend::connect(&config.redis_url).await?),
        "s3" => Arc::new(S3Backend::new(
            build_s3_client(config).await,
            config.s3_bucket.clone(),
        )),
        "memory" => Arc::new(MemoryBackend::new()),
        other => {
            warn!("Unrecognized backend {:?}, falling back to memory", other);
            Arc::new(MemoryBackend::new())
        }
    };

    info!("Using backend: {}", backend.backend_name());
    Ok(backend)
}

/// Build the S3 client from the standard AWS provider chain, with an
/// optional endpoint override for S3-compatible stores.
async fn build_s3_client(config: &Config) -> aws_sdk_s3::Client {
    let mut loader =
        aws_config::defaults(BehaviorVersion::latest()).region(Region::new(config.s3_region.clone()));
    if let Some(endpoint) = config.s3_endpoint.clone() {
        loader = loader.endpoint_url(endpoint);
    }
    let shared_config = loader.load().await;

    let s3_config = aws_sdk_s3::config::Builder::from(&shared_config)
        .force_path_style(config.s3_force_path_style)
        .build();

    aws_sdk_s3::Client::from_conf(s3_config)
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;

    #[tokio::test]
    async fn default_backend_is_memory() {
        let config = Config::parse_from(["note-api"]);
        let backend = build_backend(&config).await.unwrap();
        assert_eq!(backend.backend_name(), "memory");
    }

    #[tokio::test]
    async fn unrecognized_backend_falls_back_to_memory() {
        let config = Config::parse_from(["note-api", "--backend", "cassandra"]);
        let backend = build_backend(&config).await.unwrap();
        assert_eq!(backend.backend_name(), "memory");
    }
}
