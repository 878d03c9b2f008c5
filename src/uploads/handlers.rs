use axum::{
    extract::{DefaultBodyLimit, Multipart, State},
    routing::post,
    Json, Router,
};
use serde::Serialize;
use tracing::{instrument, warn};

use super::services::{is_allowed_image, store_image, UploadItem};
use crate::{
    error::{AppError, AppResult},
    state::AppState,
};

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub url: String,
}

pub fn upload_routes(max_bytes: usize) -> Router<AppState> {
    Router::new()
        .route("/upload", post(upload))
        .layer(DefaultBodyLimit::max(max_bytes))
}

/// POST /upload (multipart), single field `file`.
#[instrument(skip(state, mp))]
pub async fn upload(
    State(state): State<AppState>,
    mut mp: Multipart,
) -> AppResult<Json<UploadResponse>> {
    while let Some(field) = mp.next_field().await? {
        if field.name() != Some("file") {
            continue;
        }

        let content_type = field.content_type().unwrap_or_default().to_string();
        if !is_allowed_image(&content_type) {
            warn!(%content_type, "upload rejected");
            return Err(AppError::Validation(
                "Only image files are allowed!".into(),
            ));
        }
        let file_name = field.file_name().unwrap_or_default().to_string();
        let body = field.bytes().await?;

        let url = store_image(
            state.storage.as_ref(),
            &state.config.upload.public_path,
            UploadItem {
                file_name,
                content_type,
                body,
            },
        )
        .await?;
        return Ok(Json(UploadResponse { url }));
    }

    Err(AppError::Validation("No file uploaded".into()))
}
