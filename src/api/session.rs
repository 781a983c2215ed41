//! Session API endpoints: filter and modal state.

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};

use super::{error, success, ApiResult};
use crate::models::{CategoryFilter, SelectCategoryRequest, SessionState};
use crate::AppState;

/// GET /api/session - Current filter, modal state and offer target.
pub async fn get_session(State(state): State<AppState>) -> ApiResult<SessionState> {
    let feed = state.feed.read().await;
    success(feed.session(), feed.revision_id())
}

/// PUT /api/session/category - Select the category filter.
pub async fn select_category(
    State(state): State<AppState>,
    request: Result<Json<SelectCategoryRequest>, JsonRejection>,
) -> ApiResult<SessionState> {
    let mut feed = state.feed.write().await;
    let revision_id = feed.revision_id();

    let Json(request) = match request {
        Ok(request) => request,
        Err(rejection) => return error(rejection.into(), revision_id),
    };

    match request.category.parse::<CategoryFilter>() {
        Ok(filter) => {
            feed.select_category(filter);
            success(feed.session(), revision_id)
        }
        Err(e) => error(e, revision_id),
    }
}

/// POST /api/session/request-modal - Open the "Create New Request" modal.
pub async fn open_request_modal(State(state): State<AppState>) -> ApiResult<SessionState> {
    let mut feed = state.feed.write().await;
    feed.open_request_modal();
    success(feed.session(), feed.revision_id())
}

/// DELETE /api/session/modal - Close any open modal.
pub async fn close_modals(State(state): State<AppState>) -> ApiResult<SessionState> {
    let mut feed = state.feed.write().await;
    feed.close_modals();
    success(feed.session(), feed.revision_id())
}
