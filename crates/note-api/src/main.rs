//! HTTP service storing short text notes over pluggable storage backends.
//!
//! This binary:
//! - Reads configuration once at startup (flags with env fallbacks)
//! - Constructs the configured storage backend (memory, redis, or s3)
//! - Serves the note operations (list, get, create, update) over HTTP
//! - Instruments every operation with tracing spans and structured logs

use axum::routing::get;
use axum::Router;
use clap::Parser;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod backend;
mod config;
mod error;
mod handlers;
mod service;

use backend::build_backend;
use config::Config;
use handlers::{
    create_note_handler, get_note_handler, health_handler, list_notes_handler, root_handler,
    update_note_handler, AppState,
};
use service::NoteService;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    init_tracing(config.log_json);

    info!("Starting note-api v{}", env!("CARGO_PKG_VERSION"));
    info!("  Host: {}", config.host);
    info!("  Port: {}", config.port);

    // The backend is resolved exactly once, before any request is served.
    let storage = build_backend(&config).await?;
    let state = AppState {
        service: NoteService::new(storage),
    };

    let addr = format!("{}:{}", config.host, config.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Listening on http://{}", addr);

    axum::serve(listener, app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");
    Ok(())
}

/// Build the router with its middleware stack.
fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(root_handler))
        .route("/health", get(health_handler))
        .route("/notes", get(list_notes_handler).post(create_note_handler))
        .route(
            "/notes/{id}",
            get(get_note_handler).put(update_note_handler),
        )
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Initialize the tracing subscriber.
///
/// `RUST_LOG` controls the filter; `--log-json` switches the output format
/// for log collectors that ingest structured records.
fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    if json {
        tracing_subscriber::fmt().with_env_filter(filter).json().init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
        info!("Received Ctrl+C, initiating shutdown");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
        info!("Received SIGTERM, initiating shutdown");
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
