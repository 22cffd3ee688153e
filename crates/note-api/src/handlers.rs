//! HTTP handlers for the note service.
//!
//! Implements:
//! - GET  /          - redirect to /notes
//! - GET  /health    - health check
//! - GET  /notes     - list all notes
//! - POST /notes     - create a note, returns the generated id
//! - GET  /notes/{id}  - fetch one note
//! - PUT  /notes/{id}  - replace a note's content (upsert)

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Redirect;
use axum::Json;
use serde::Serialize;

use note_storage_core::{Note, NotePayload};

use crate::error::Result;
use crate::service::NoteService;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub service: NoteService,
}

/// Health check response.
#[derive(Serialize)]
pub struct HealthResponse {
    pub healthy: bool,
    pub version: &'static str,
    pub backend: &'static str,
}

/// GET / - the service's only page is the note listing.
pub async fn root_handler() -> Redirect {
    Redirect::temporary("/notes")
}

/// GET /health
pub async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        healthy: true,
        version: env!("CARGO_PKG_VERSION"),
        backend: state.service.backend_name(),
    })
}

/// GET /notes - every stored note; an empty store yields an empty array.
pub async fn list_notes_handler(State(state): State<AppState>) -> Result<Json<Vec<Note>>> {
    Ok(Json(state.service.list().await?))
}

/// GET /notes/{id}
pub async fn get_note_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Note>> {
    Ok(Json(state.service.get(&id).await?))
}

/// POST /notes - returns the generated id.
pub async fn create_note_handler(
    State(state): State<AppState>,
    Json(payload): Json<NotePayload>,
) -> Result<(StatusCode, Json<String>)> {
    let id = state.service.create(&payload).await?;
    Ok((StatusCode::CREATED, Json(id)))
}

/// PUT /notes/{id} - upsert; no body on success.
pub async fn update_note_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<NotePayload>,
) -> Result<StatusCode> {
    state.service.update(&id, &payload).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use async_trait::async_trait;
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use axum::Router;
    use tower::ServiceExt;

    use note_storage_core::{NoteBackend, StorageError};
    use note_storage_memory::MemoryBackend;

    use super::*;
    use crate::app;

    fn memory_app() -> Router {
        app(AppState {
            service: NoteService::new(Arc::new(MemoryBackend::new())),
        })
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn json_request(method: &str, uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn get_request(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    #[tokio::test]
    async fn root_redirects_to_notes() {
        let response = memory_app().oneshot(get_request("/")).await.unwrap();

        assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
        assert_eq!(response.headers().get(header::LOCATION).unwrap(), "/notes");
    }

    #[tokio::test]
    async fn health_reports_backend() {
        let response = memory_app().oneshot(get_request("/health")).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["healthy"], true);
        assert_eq!(body["backend"], "memory");
    }

    #[tokio::test]
    async fn empty_store_lists_as_empty_array() {
        let response = memory_app().oneshot(get_request("/notes")).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await, serde_json::json!([]));
    }

    #[tokio::test]
    async fn create_then_fetch_and_update() {
        let app = memory_app();

        let response = app
            .clone()
            .oneshot(json_request("POST", "/notes", r#"{"content":"buy milk"}"#))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        let id = body_json(response).await.as_str().unwrap().to_string();

        let response = app
            .clone()
            .oneshot(get_request(&format!("/notes/{}", id)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let note = body_json(response).await;
        assert_eq!(note["id"], id.as_str());
        assert_eq!(note["content"], "buy milk");

        let response = app
            .clone()
            .oneshot(json_request(
                "PUT",
                &format!("/notes/{}", id),
                r#"{"content":"buy almond milk"}"#,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NO_CONTENT);

        let response = app.oneshot(get_request("/notes")).await.unwrap();
        let notes = body_json(response).await;
        assert_eq!(notes.as_array().unwrap().len(), 1);
        assert_eq!(notes[0]["content"], "buy almond milk");
    }

    #[tokio::test]
    async fn missing_note_is_a_404() {
        let response = memory_app()
            .oneshot(get_request("/notes/nonexistent-id"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_json(response).await["code"], "NOT_FOUND");
    }

    /// Backend whose medium is always down.
    struct UnavailableBackend;

    #[async_trait]
    impl NoteBackend for UnavailableBackend {
        fn backend_name(&self) -> &'static str {
            "unavailable"
        }

        async fn keys(&self) -> std::result::Result<Vec<String>, StorageError> {
            Err(StorageError::Unavailable("connection refused".into()))
        }

        async fn get(&self, _id: &str) -> std::result::Result<Option<Note>, StorageError> {
            Err(StorageError::Unavailable("connection refused".into()))
        }

        async fn set(
            &self,
            _id: &str,
            _payload: &NotePayload,
        ) -> std::result::Result<(), StorageError> {
            Err(StorageError::Unavailable("connection refused".into()))
        }
    }

    #[tokio::test]
    async fn backend_failure_maps_to_bad_gateway_without_detail() {
        let app = app(AppState {
            service: NoteService::new(Arc::new(UnavailableBackend)),
        });

        let response = app.oneshot(get_request("/notes")).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);

        let body = body_json(response).await;
        assert_eq!(body["code"], "BACKEND_UNAVAILABLE");
        // The medium detail must not leak to the caller.
        assert!(!body["error"].as_str().unwrap().contains("connection refused"));
    }
}
