//! Feed/filter controller.
//!
//! Owns every piece of mutable marketplace state and exposes it only through
//! action handlers. The creation flows report completion into
//! [`FeedController::on_request_created`] and [`FeedController::on_offer_created`].

use chrono::Utc;
use serde::Serialize;

use super::RequestCard;
use crate::errors::AppError;
use crate::models::{CategoryFilter, ModalState, Offer, Request, SessionState, Snapshot};

/// Shown instead of the grid when no request matches the filter.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct EmptyState {
    pub title: &'static str,
    pub hint: &'static str,
}

impl Default for EmptyState {
    fn default() -> Self {
        Self {
            title: "No requests found",
            hint: "Try selecting a different category or check back later.",
        }
    }
}

/// What the feed page renders for the current filter.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedView {
    pub selected_category: CategoryFilter,
    pub visible_count: usize,
    pub summary: String,
    pub requests: Vec<RequestCard>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub empty_state: Option<EmptyState>,
}

#[derive(Debug)]
pub struct FeedController {
    requests: Vec<Request>,
    offers: Vec<Offer>,
    selected_category: CategoryFilter,
    modals: ModalState,
    offer_target: Option<String>,
    revision_id: i64,
    generated_at: String,
}

impl FeedController {
    pub fn new(requests: Vec<Request>) -> Self {
        Self {
            requests,
            offers: Vec::new(),
            selected_category: CategoryFilter::All,
            modals: ModalState::default(),
            offer_target: None,
            revision_id: 0,
            generated_at: Utc::now().to_rfc3339(),
        }
    }

    pub fn revision_id(&self) -> i64 {
        self.revision_id
    }

    fn bump_revision(&mut self) -> i64 {
        self.revision_id += 1;
        self.generated_at = Utc::now().to_rfc3339();
        self.revision_id
    }

    pub fn selected_category(&self) -> CategoryFilter {
        self.selected_category
    }

    pub fn select_category(&mut self, filter: CategoryFilter) {
        tracing::debug!("Category filter set to {}", filter);
        self.selected_category = filter;
    }

    /// Requests matching the current filter, in collection order.
    pub fn visible_requests(&self) -> Vec<&Request> {
        self.requests
            .iter()
            .filter(|r| self.selected_category.matches(r.category))
            .collect()
    }

    pub fn feed(&self) -> FeedView {
        let requests: Vec<RequestCard> = self
            .visible_requests()
            .into_iter()
            .map(RequestCard::from)
            .collect();
        let visible_count = requests.len();

        FeedView {
            selected_category: self.selected_category,
            visible_count,
            summary: format!("{} active requests", visible_count),
            empty_state: requests.is_empty().then(EmptyState::default),
            requests,
        }
    }

    pub fn requests(&self) -> &[Request] {
        &self.requests
    }

    pub fn request(&self, id: &str) -> Option<&Request> {
        self.requests.iter().find(|r| r.id == id)
    }

    pub fn offers(&self) -> &[Offer] {
        &self.offers
    }

    pub fn offers_for(&self, request_id: &str) -> Vec<&Offer> {
        self.offers
            .iter()
            .filter(|o| o.request_id == request_id)
            .collect()
    }

    pub fn modals(&self) -> ModalState {
        self.modals
    }

    pub fn offer_target(&self) -> Option<&Request> {
        self.offer_target.as_deref().and_then(|id| self.request(id))
    }

    pub fn open_request_modal(&mut self) {
        self.modals.create_request_open = true;
    }

    pub fn close_modals(&mut self) {
        self.modals = ModalState::default();
    }

    /// "Make offer" click: target the request and open the offer modal.
    pub fn make_offer(&mut self, request_id: &str) -> Result<&Request, AppError> {
        let Some(index) = self.requests.iter().position(|r| r.id == request_id) else {
            tracing::warn!("Offer requested for unknown request {}", request_id);
            return Err(AppError::NotFound(format!(
                "Request {} not found",
                request_id
            )));
        };

        self.offer_target = Some(request_id.to_string());
        self.modals.create_offer_open = true;
        Ok(&self.requests[index])
    }

    /// Completion handler of the request creation flow.
    pub fn on_request_created(&mut self, request: Request) -> Result<(), AppError> {
        if self.request(&request.id).is_some() {
            return Err(AppError::Conflict(format!(
                "Request {} already exists",
                request.id
            )));
        }

        tracing::info!("Request {} posted in {}", request.id, request.category);
        self.requests.insert(0, request);
        self.modals.create_request_open = false;
        self.bump_revision();
        Ok(())
    }

    /// Completion handler of the offer creation flow. The referenced request
    /// must exist; a miss means an offer was built for a request this
    /// controller never owned.
    pub fn on_offer_created(&mut self, offer: Offer) -> Result<(), AppError> {
        let Some(request) = self.requests.iter_mut().find(|r| r.id == offer.request_id) else {
            tracing::error!(
                "Offer {} references unknown request {}",
                offer.id,
                offer.request_id
            );
            return Err(AppError::NotFound(format!(
                "Request {} not found",
                offer.request_id
            )));
        };

        request.offers_count += 1;
        tracing::info!(
            "Offer {} received for request {} ({} offers)",
            offer.id,
            request.id,
            request.offers_count
        );

        self.offers.insert(0, offer);
        self.modals.create_offer_open = false;
        self.bump_revision();
        Ok(())
    }

    pub fn session(&self) -> SessionState {
        SessionState {
            selected_category: self.selected_category,
            modals: self.modals,
            offer_target: self.offer_target().cloned(),
        }
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            generated_at: self.generated_at.clone(),
            revision_id: self.revision_id,
            requests: self.requests.clone(),
            offers: self.offers.clone(),
        }
    }
}
