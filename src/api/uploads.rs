//! Image upload endpoint.

use axum::{
    body::Bytes,
    extract::State,
    http::{header, HeaderMap},
};
use serde::Serialize;

use super::{error, success, ApiResult};
use crate::errors::AppError;
use crate::flows::ImageUpload;
use crate::AppState;

/// An uploaded image, ready to attach to a request or offer.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadedImage {
    pub data_uri: String,
    pub content_type: String,
    pub size: usize,
}

/// POST /api/uploads - Encode a raw image body as a data URI.
pub async fn upload_image(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> ApiResult<UploadedImage> {
    let revision_id = state.feed.read().await.revision_id();

    if body.is_empty() {
        return error(
            AppError::Upload("Upload body is empty".to_string()),
            revision_id,
        );
    }

    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok());
    let upload = ImageUpload::new(content_type, body.to_vec());
    tracing::debug!("Encoded {} byte {} upload", upload.bytes.len(), upload.content_type);

    success(
        UploadedImage {
            data_uri: upload.to_data_uri(),
            size: upload.bytes.len(),
            content_type: upload.content_type,
        },
        revision_id,
    )
}
