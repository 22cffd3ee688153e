use clap::Parser;

/// Configuration for the note-api server.
#[derive(Parser, Debug, Clone)]
#[command(name = "note-api")]
#[command(about = "HTTP service storing short text notes over pluggable storage backends")]
pub struct Config {
    /// Host to bind to
    #[arg(long, default_value = "0.0.0.0", env = "NOTE_API_HOST")]
    pub host: String,

    /// Port to bind to
    #[arg(long, default_value = "8000", env = "NOTE_API_PORT")]
    pub port: u16,

    /// Storage backend: memory, redis, or s3.
    /// Anything else falls back to memory with a warning.
    #[arg(long, default_value = "memory", env = "BACKEND")]
    pub backend: String,

    /// Redis connection URL (redis backend)
    #[arg(long, default_value = "redis://127.0.0.1:6379", env = "REDIS_URL")]
    pub redis_url: String,

    /// Bucket holding note objects (s3 backend)
    #[arg(long, default_value = "notes", env = "S3_BUCKET")]
    pub s3_bucket: String,

    /// Region for the bucket (s3 backend)
    #[arg(long, default_value = "us-east-1", env = "S3_REGION")]
    pub s3_region: String,

    /// Endpoint override for S3-compatible stores like MinIO or R2 (s3 backend)
    #[arg(long, env = "S3_ENDPOINT")]
    pub s3_endpoint: Option<String>,

    /// Use path-style addressing; most S3-compatible stores need this (s3 backend)
    #[arg(long, env = "S3_FORCE_PATH_STYLE")]
    pub s3_force_path_style: bool,

    /// Emit logs as JSON
    #[arg(long, env = "LOG_JSON")]
    pub log_json: bool,
}
