use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_macros::debug_handler;
use utoipa::OpenApi;

use std::sync::Arc;

use crate::{
    dto::{ErrorResponse, HealthResponse, NoteDraftRequest, NoteResponse},
    service::NoteStore,
};

#[derive(OpenApi)]
#[openapi(
    paths(
        health_check,
        create_note,
        update_note,
        delete_note,
        get_one_note,
        get_all_notes
    ),
    components(schemas(NoteResponse, NoteDraftRequest, ErrorResponse, HealthResponse)),
    tags(
        (name = "notes", description = "Notes management API"),
        (name = "health", description = "Service liveness")
    )
)]
pub struct ApiDoc;

fn not_found(id: i64) -> Response {
    (StatusCode::NOT_FOUND, Json(ErrorResponse::note_not_found(id))).into_response()
}

fn unprocessable(detail: String) -> Response {
    (StatusCode::UNPROCESSABLE_ENTITY, Json(ErrorResponse::new(detail))).into_response()
}

fn internal_error(detail: &str) -> Response {
    (StatusCode::INTERNAL_SERVER_ERROR, Json(ErrorResponse::new(detail))).into_response()
}

#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "Service is up", body = HealthResponse)
    ),
    tag = "health"
)]
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        message: "Healthy".to_string(),
    })
}

#[utoipa::path(
    post,
    path = "/notes",
    request_body = NoteDraftRequest,
    responses(
        (status = 201, description = "Note created successfully", body = NoteResponse),
        (status = 422, description = "Invalid note fields", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "notes"
)]
#[debug_handler]
pub async fn create_note(
    State(store): State<Arc<NoteStore>>,
    Json(payload): Json<NoteDraftRequest>,
) -> Response {
    let draft = match payload.validate() {
        Ok(draft) => draft,
        Err(detail) => return unprocessable(detail),
    };

    match store.add(draft).await {
        Ok(note) => (StatusCode::CREATED, Json(NoteResponse::from(note))).into_response(),
        Err(e) => {
            tracing::error!("failed to create note entry: {}", e);
            internal_error("Failed to create note")
        }
    }
}

#[utoipa::path(
    put,
    path = "/notes/{id}",
    params(
        ("id" = i64, Path, description = "Note ID")
    ),
    request_body = NoteDraftRequest,
    responses(
        (status = 200, description = "Note updated successfully", body = NoteResponse),
        (status = 404, description = "Note not found", body = ErrorResponse),
        (status = 422, description = "Invalid note fields", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "notes"
)]
#[debug_handler]
pub async fn update_note(
    State(store): State<Arc<NoteStore>>,
    Path(id): Path<i64>,
    Json(payload): Json<NoteDraftRequest>,
) -> Response {
    let draft = match payload.validate() {
        Ok(draft) => draft,
        Err(detail) => return unprocessable(detail),
    };

    match store.update(id, draft).await {
        Ok(Some(note)) => (StatusCode::OK, Json(NoteResponse::from(note))).into_response(),
        Ok(None) => not_found(id),
        Err(e) => {
            tracing::error!("failed to update note entry {}: {}", id, e);
            internal_error("Failed to update note")
        }
    }
}

#[utoipa::path(
    delete,
    path = "/notes/{id}",
    params(
        ("id" = i64, Path, description = "Note ID")
    ),
    responses(
        (status = 204, description = "Note deleted successfully"),
        (status = 404, description = "Note not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "notes"
)]
#[debug_handler]
pub async fn delete_note(State(store): State<Arc<NoteStore>>, Path(id): Path<i64>) -> Response {
    match store.delete(id).await {
        Ok(true) => StatusCode::NO_CONTENT.into_response(),
        Ok(false) => not_found(id),
        Err(e) => {
            tracing::error!("failed to delete note entry {}: {}", id, e);
            internal_error("Failed to delete note")
        }
    }
}

#[utoipa::path(
    get,
    path = "/notes/{id}",
    params(
        ("id" = i64, Path, description = "Note ID")
    ),
    responses(
        (status = 200, description = "Note found", body = NoteResponse),
        (status = 404, description = "Note not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "notes"
)]
#[debug_handler]
pub async fn get_one_note(State(store): State<Arc<NoteStore>>, Path(id): Path<i64>) -> Response {
    match store.get(id).await {
        Ok(Some(note)) => (StatusCode::OK, Json(NoteResponse::from(note))).into_response(),
        Ok(None) => not_found(id),
        Err(e) => {
            tracing::error!("failed to get note entry {}: {}", id, e);
            internal_error("Failed to get note")
        }
    }
}

#[utoipa::path(
    get,
    path = "/notes",
    responses(
        (status = 200, description = "List of all notes", body = Vec<NoteResponse>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "notes"
)]
#[debug_handler]
pub async fn get_all_notes(State(store): State<Arc<NoteStore>>) -> Response {
    match store.list().await {
        Ok(notes) => {
            let notes: Vec<NoteResponse> = notes.into_iter().map(NoteResponse::from).collect();
            (StatusCode::OK, Json(notes)).into_response()
        }
        Err(e) => {
            tracing::error!("failed to get note entries: {}", e);
            internal_error("Failed to get all notes")
        }
    }
}
