use axum::{Router, routing::get};

use std::{fs, io, path::Path, sync::Arc};

use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{handlers::rest, service::NoteStore};

pub const OPENAPI_PATH: &str = "/api-doc/openapi.json";

/// Builds the HTTP router around a shared store.
pub fn router(store: Arc<NoteStore>) -> Router {
    Router::new()
        .route("/", get(rest::health_check))
        .route("/notes", get(rest::get_all_notes).post(rest::create_note))
        .route(
            "/notes/{id}",
            get(rest::get_one_note)
                .put(rest::update_note)
                .delete(rest::delete_note),
        )
        .merge(SwaggerUi::new("/swagger-ui").url(OPENAPI_PATH, rest::ApiDoc::openapi()))
        .with_state(store)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

/// Writes the pretty-printed OpenAPI document to `path`, creating parent
/// directories as needed.
///
/// # Errors
///
/// Fails if the document cannot be serialized or the file cannot be written.
pub fn write_openapi(path: &Path) -> io::Result<()> {
    let doc = rest::ApiDoc::openapi()
        .to_pretty_json()
        .map_err(io::Error::other)?;

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    fs::write(path, doc)
}
