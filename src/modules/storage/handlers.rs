use super::local_storage::LocalFileStorage;
use crate::shared::errors::{AppError, AppResult};
use axum::extract::Path;
use axum::http::header;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Extension, Router};
use std::sync::Arc;

pub fn router() -> Router {
    Router::new().route("/media/*path", get(handle_get_media))
}

fn content_type_for(path: &str) -> &'static str {
    let ext = path.rsplit('.').next().unwrap_or("").to_ascii_lowercase();
    match ext.as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "svg" => "image/svg+xml",
        _ => "application/octet-stream",
    }
}

/// Serve files written by `LocalFileStorage`
pub async fn handle_get_media(
    Path(path): Path<String>,
    Extension(storage): Extension<Arc<LocalFileStorage>>,
) -> AppResult<impl IntoResponse> {
    let bytes = storage
        .read(&path)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("File '{}' not found", path)))?;
    Ok(([(header::CONTENT_TYPE, content_type_for(&path))], bytes))
}
