//! Request API endpoints.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Json,
};

use super::{error, error_with_notice, success, success_with_notice, ApiResult};
use crate::errors::AppError;
use crate::feed::RequestCard;
use crate::flows::RequestForm;
use crate::models::{CreateRequestRequest, Request};
use crate::AppState;

/// GET /api/requests - List all requests, most recent first.
pub async fn list_requests(State(state): State<AppState>) -> ApiResult<Vec<Request>> {
    let feed = state.feed.read().await;
    success(feed.requests().to_vec(), feed.revision_id())
}

/// GET /api/requests/:id - Get a single request as a card.
pub async fn get_request(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<RequestCard> {
    let feed = state.feed.read().await;
    let revision_id = feed.revision_id();

    match feed.request(&id) {
        Some(request) => success(RequestCard::from(request), revision_id),
        None => error(
            AppError::NotFound(format!("Request {} not found", id)),
            revision_id,
        ),
    }
}

/// POST /api/requests - Post a new request.
pub async fn create_request(
    State(state): State<AppState>,
    payload: Result<Json<CreateRequestRequest>, JsonRejection>,
) -> ApiResult<Request> {
    let mut feed = state.feed.write().await;
    let revision_id = feed.revision_id();

    let Json(payload) = match payload {
        Ok(payload) => payload,
        Err(rejection) => return error(rejection.into(), revision_id),
    };

    let mut form = match RequestForm::from_payload(payload) {
        Ok(form) => form,
        Err(e) => return error(e, revision_id),
    };

    match form.submit(|request| feed.on_request_created(request)) {
        Ok(submitted) => success_with_notice(submitted.entity, feed.revision_id(), submitted.notice),
        Err(e) => {
            let (err, notice) = e.into_parts();
            error_with_notice(err, revision_id, notice)
        }
    }
}

/// POST /api/requests/:id/offer-target - The "Make Offer" click.
pub async fn set_offer_target(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Request> {
    let mut feed = state.feed.write().await;
    let revision_id = feed.revision_id();

    match feed.make_offer(&id) {
        Ok(request) => success(request.clone(), revision_id),
        Err(e) => error(e, revision_id),
    }
}
