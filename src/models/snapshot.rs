//! Full marketplace state dump and session view.

use serde::{Deserialize, Serialize};

use super::{CategoryFilter, Offer, Request};

/// All marketplace data at a given revision.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub generated_at: String,
    pub revision_id: i64,
    pub requests: Vec<Request>,
    pub offers: Vec<Offer>,
}

/// Open/closed state of each modal.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ModalState {
    pub create_request_open: bool,
    pub create_offer_open: bool,
}

/// UI session state owned by the feed controller.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionState {
    pub selected_category: CategoryFilter,
    pub modals: ModalState,
    /// Request currently targeted for an offer.
    pub offer_target: Option<Request>,
}

/// Body for `PUT /api/session/category`.
#[derive(Debug, Clone, Deserialize)]
pub struct SelectCategoryRequest {
    pub category: String,
}
