//! Image attachments held as in-memory data URIs.
//!
//! No size or MIME type validation is performed; anything the browser hands
//! over is accepted and encoded as-is.

use std::path::Path;

use base64::{engine::general_purpose::STANDARD, Engine as _};

use crate::errors::AppError;

const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

/// Raw image bytes together with their MIME type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageUpload {
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl ImageUpload {
    pub fn new(content_type: Option<&str>, bytes: Vec<u8>) -> Self {
        let content_type = content_type
            .map(str::trim)
            .filter(|ct| !ct.is_empty())
            .unwrap_or(DEFAULT_CONTENT_TYPE)
            .to_string();
        Self {
            content_type,
            bytes,
        }
    }

    /// `data:<mime>;base64,<payload>`
    pub fn to_data_uri(&self) -> String {
        format!("data:{};base64,{}", self.content_type, STANDARD.encode(&self.bytes))
    }

    /// Decode a base64 data URI back into bytes.
    pub fn from_data_uri(uri: &str) -> Result<Self, AppError> {
        let rest = uri
            .strip_prefix("data:")
            .ok_or_else(|| AppError::Upload("Image must be a data URI".to_string()))?;
        let (meta, payload) = rest
            .split_once(',')
            .ok_or_else(|| AppError::Upload("Malformed data URI".to_string()))?;
        let content_type = meta
            .strip_suffix(";base64")
            .ok_or_else(|| AppError::Upload("Data URI must be base64 encoded".to_string()))?;
        let bytes = STANDARD
            .decode(payload)
            .map_err(|e| AppError::Upload(format!("Invalid base64 image payload: {}", e)))?;

        // Keep the MIME type exactly as written, even when empty.
        Ok(Self {
            content_type: content_type.to_string(),
            bytes,
        })
    }
}

/// Read an image file into memory. Completes once the whole file is read.
pub async fn read_image(path: impl AsRef<Path>) -> Result<ImageUpload, AppError> {
    let path = path.as_ref();
    let bytes = tokio::fs::read(path).await?;
    tracing::debug!("Read {} bytes from {}", bytes.len(), path.display());
    let mime = mime_guess::from_path(path).first_or_octet_stream();
    Ok(ImageUpload::new(Some(mime.essence_str()), bytes))
}
