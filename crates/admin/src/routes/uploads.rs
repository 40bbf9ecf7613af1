//! Image upload endpoint used by the form pages.

use axum::{
    Json, Router,
    extract::{DefaultBodyLimit, Multipart, State},
    routing::post,
};
use serde::Serialize;
use tracing::instrument;

use crate::error::{AppError, Result};
use crate::middleware::auth::RequireAdminAuth;
use crate::state::AppState;

/// Largest accepted request body.
const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Multipart field carrying the file.
const FILE_FIELD: &str = "file";

/// Response body for a stored upload.
#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub url: String,
}

/// Build the upload router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/uploads", post(upload))
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
}

/// Only images are stored.
fn is_image(content_type: Option<&str>) -> bool {
    content_type.is_some_and(|ct| ct.starts_with("image/"))
}

/// Store an uploaded image and return its public URL.
#[instrument(skip(_admin, state, multipart))]
async fn upload(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }

        let file_name = field.file_name().unwrap_or_default().to_owned();
        let content_type = field.content_type().map(ToOwned::to_owned);
        if !is_image(content_type.as_deref()) {
            return Err(AppError::BadRequest("only images can be uploaded".to_string()));
        }

        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::BadRequest(e.to_string()))?;
        if bytes.is_empty() {
            return Err(AppError::BadRequest("empty file".to_string()));
        }

        let url = state
            .storage()
            .upload(&file_name, content_type.as_deref(), bytes.to_vec())
            .await?;

        return Ok(Json(UploadResponse { url }));
    }

    Err(AppError::BadRequest("missing file".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_images_accepted() {
        assert!(is_image(Some("image/jpeg")));
        assert!(is_image(Some("image/webp")));
        assert!(!is_image(Some("application/pdf")));
        assert!(!is_image(None));
    }
}
