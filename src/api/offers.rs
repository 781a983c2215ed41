//! Offer API endpoints.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::HeaderMap,
    Json,
};

use super::{error, error_with_notice, success, success_with_notice, ApiResult};
use crate::errors::AppError;
use crate::flows::OfferForm;
use crate::models::{CreateOfferRequest, LenderIdentity, Offer, OfferTagOptions};
use crate::AppState;

/// Header naming the lender making an offer.
pub const LENDER_ID_HEADER: &str = "x-lender-id";

/// GET /api/offers - List all offers, most recent first.
pub async fn list_offers(State(state): State<AppState>) -> ApiResult<Vec<Offer>> {
    let feed = state.feed.read().await;
    success(feed.offers().to_vec(), feed.revision_id())
}

/// GET /api/requests/:id/offers - List offers made for one request.
pub async fn list_request_offers(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Vec<Offer>> {
    let feed = state.feed.read().await;
    let revision_id = feed.revision_id();

    if feed.request(&id).is_none() {
        return error(
            AppError::NotFound(format!("Request {} not found", id)),
            revision_id,
        );
    }

    success(
        feed.offers_for(&id).into_iter().cloned().collect(),
        revision_id,
    )
}

/// GET /api/offer-tags - Quick toggles and the tag vocabulary.
pub async fn list_offer_tags(State(state): State<AppState>) -> ApiResult<OfferTagOptions> {
    let revision_id = state.feed.read().await.revision_id();
    success(OfferTagOptions::default(), revision_id)
}

/// POST /api/requests/:id/offers - Make an offer on a request.
pub async fn create_offer(
    State(state): State<AppState>,
    Path(id): Path<String>,
    headers: HeaderMap,
    payload: Result<Json<CreateOfferRequest>, JsonRejection>,
) -> ApiResult<Offer> {
    let lender = lender_from_headers(&headers, &state.config.lender);

    let mut feed = state.feed.write().await;
    let revision_id = feed.revision_id();

    // Read-only lookup: a rejected offer must not touch the session.
    if feed.request(&id).is_none() {
        return error(
            AppError::NotFound(format!("Request {} not found", id)),
            revision_id,
        );
    }

    let Json(payload) = match payload {
        Ok(payload) => payload,
        Err(rejection) => return error(rejection.into(), revision_id),
    };

    let mut form = match OfferForm::from_payload(id, lender, payload) {
        Ok(form) => form,
        Err(e) => return error(e, revision_id),
    };

    match form.submit(|offer| feed.on_offer_created(offer)) {
        Ok(submitted) => success_with_notice(submitted.entity, feed.revision_id(), submitted.notice),
        Err(e) => {
            let (err, notice) = e.into_parts();
            error_with_notice(err, revision_id, notice)
        }
    }
}

/// The lender named in the request headers, or the configured default.
fn lender_from_headers(headers: &HeaderMap, default: &LenderIdentity) -> LenderIdentity {
    let id = headers
        .get(LENDER_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty());

    match id {
        Some(id) => LenderIdentity {
            id: id.to_string(),
            display_name: default.display_name.clone(),
        },
        None => default.clone(),
    }
}
