//! REST API module.
//!
//! Contains all API routes and handlers following the frontend contract.

mod feed;
mod offers;
mod requests;
mod session;
mod uploads;

pub use feed::*;
pub use offers::*;
pub use requests::*;
pub use session::*;
pub use uploads::*;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::errors::{AppError, AppErrorWithRevision};
use crate::flows::Notice;

/// Success response envelope.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse<T: Serialize> {
    pub success: bool,
    pub data: T,
    pub revision_id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice: Option<Notice>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn new(data: T, revision_id: i64) -> Self {
        Self {
            success: true,
            data,
            revision_id,
            notice: None,
        }
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}

/// Response type that can be either success or error.
pub type ApiResult<T> = Result<ApiResponse<T>, AppErrorWithRevision>;

/// Create a successful API response.
pub fn success<T: Serialize>(data: T, revision_id: i64) -> ApiResult<T> {
    Ok(ApiResponse::new(data, revision_id))
}

/// Create a successful API response carrying a toast.
pub fn success_with_notice<T: Serialize>(data: T, revision_id: i64, notice: Notice) -> ApiResult<T> {
    Ok(ApiResponse {
        notice: Some(notice),
        ..ApiResponse::new(data, revision_id)
    })
}

/// Create an error API response.
pub fn error<T: Serialize>(err: AppError, revision_id: i64) -> ApiResult<T> {
    error_with_notice(err, revision_id, None)
}

/// Create an error API response, optionally carrying a toast.
pub fn error_with_notice<T: Serialize>(
    err: AppError,
    revision_id: i64,
    notice: Option<Notice>,
) -> ApiResult<T> {
    Err(AppErrorWithRevision {
        error: err,
        revision_id,
        notice,
    })
}
