//! Offer creation form.

use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use chrono::{SecondsFormat, Utc};
use tokio::task::JoinSet;

use super::{images, next_offer_id, ImageUpload, Notice, SubmitError, Submitted};
use crate::errors::{AppError, ValidationErrors};
use crate::models::{
    is_vocabulary_tag, CreateOfferRequest, LenderIdentity, Offer, OfferStatus, AVAILABLE_NOW_TAG,
    CAN_DELIVER_TAG,
};

const MIN_DESCRIPTION_CHARS: usize = 10;
const MAX_DESCRIPTION_CHARS: usize = 500;

/// Draft state of the "Make an Offer" form, bound to one request.
#[derive(Debug)]
pub struct OfferForm {
    request_id: String,
    lender: LenderIdentity,
    price: String,
    description: String,
    images: Vec<String>,
    available_now: bool,
    can_deliver: bool,
    tags: Vec<String>,
    submitting: Arc<AtomicBool>,
}

/// Sets the submitting flag for its lifetime and clears it on drop.
struct SubmittingGuard(Arc<AtomicBool>);

impl SubmittingGuard {
    fn engage(flag: &Arc<AtomicBool>) -> Self {
        flag.store(true, Ordering::SeqCst);
        Self(Arc::clone(flag))
    }
}

impl Drop for SubmittingGuard {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

impl OfferForm {
    pub fn new(request_id: impl Into<String>, lender: LenderIdentity) -> Self {
        Self {
            request_id: request_id.into(),
            lender,
            price: String::new(),
            description: String::new(),
            images: Vec::new(),
            available_now: false,
            can_deliver: false,
            tags: Vec::new(),
            submitting: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Build a form from a submitted payload. Images must be base64 data URIs
    /// and tags must come from the offer vocabulary.
    pub fn from_payload(
        request_id: impl Into<String>,
        lender: LenderIdentity,
        payload: CreateOfferRequest,
    ) -> Result<Self, AppError> {
        let mut form = Self::new(request_id, lender);
        form.price = payload.price;
        form.description = payload.description;
        form.available_now = payload.available_now;
        form.can_deliver = payload.can_deliver;

        for uri in &payload.images {
            form.add_image(ImageUpload::from_data_uri(uri)?);
        }

        let mut errors = ValidationErrors::new();
        for tag in payload.tags {
            if !is_vocabulary_tag(&tag) {
                errors.add("tags", format!("Unknown offer tag: {}", tag));
            } else if !form.tags.contains(&tag) {
                form.tags.push(tag);
            }
        }
        errors.into_result()?;

        Ok(form)
    }

    pub fn request_id(&self) -> &str {
        &self.request_id
    }

    pub fn set_price(&mut self, price: impl Into<String>) {
        self.price = price.into();
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.description = description.into();
    }

    pub fn images(&self) -> &[String] {
        &self.images
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting.load(Ordering::SeqCst)
    }

    /// Shared handle to the submitting indicator, for observers.
    pub fn submitting_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.submitting)
    }

    pub fn add_image(&mut self, upload: ImageUpload) {
        self.images.push(upload.to_data_uri());
    }

    pub fn remove_image(&mut self, index: usize) -> Option<String> {
        (index < self.images.len()).then(|| self.images.remove(index))
    }

    /// Read every file concurrently and append each image as its own read
    /// completes. Failed reads are returned and leave the images untouched.
    pub async fn load_images(&mut self, paths: Vec<PathBuf>) -> Vec<AppError> {
        let mut reads = JoinSet::new();
        for path in paths {
            reads.spawn(async move {
                let result = images::read_image(&path).await;
                (path, result)
            });
        }

        let mut failures = Vec::new();
        while let Some(joined) = reads.join_next().await {
            match joined {
                Ok((_, Ok(upload))) => self.add_image(upload),
                Ok((path, Err(e))) => {
                    tracing::warn!("Failed to read image {}: {}", path.display(), e);
                    failures.push(e);
                }
                Err(e) => {
                    tracing::error!("Image read task failed: {}", e);
                    failures.push(AppError::Internal(format!("Image read task failed: {}", e)));
                }
            }
        }
        failures
    }

    pub fn toggle_available_now(&mut self) {
        self.available_now = !self.available_now;
    }

    pub fn toggle_can_deliver(&mut self) {
        self.can_deliver = !self.can_deliver;
    }

    /// Select or deselect a vocabulary tag.
    pub fn toggle_tag(&mut self, tag: &str) -> Result<(), AppError> {
        if !is_vocabulary_tag(tag) {
            return Err(AppError::BadRequest(format!("Unknown offer tag: {}", tag)));
        }
        if let Some(pos) = self.tags.iter().position(|t| t == tag) {
            self.tags.remove(pos);
        } else {
            self.tags.push(tag.to_string());
        }
        Ok(())
    }

    /// Toggle tags first, then selected vocabulary tags in selection order.
    pub fn offer_tags(&self) -> Vec<String> {
        let toggles = [
            (self.available_now, AVAILABLE_NOW_TAG),
            (self.can_deliver, CAN_DELIVER_TAG),
        ];
        toggles
            .into_iter()
            .filter(|(on, _)| *on)
            .map(|(_, tag)| tag.to_string())
            .chain(self.tags.iter().cloned())
            .collect()
    }

    fn validate(&self) -> Result<f64, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        let price = match self.price.trim() {
            "" => {
                errors.add("price", "Price is required");
                None
            }
            raw => match raw.parse::<f64>() {
                Ok(value) if value.is_finite() && value > 0.0 => Some(value),
                _ => {
                    errors.add("price", "Price must be a valid number greater than 0");
                    None
                }
            },
        };

        let length = self.description.chars().count();
        if length < MIN_DESCRIPTION_CHARS {
            errors.add("description", "Description must be at least 10 characters");
        } else if length > MAX_DESCRIPTION_CHARS {
            errors.add("description", "Description must be less than 500 characters");
        }

        match price {
            Some(price) if errors.is_empty() => Ok(price),
            _ => Err(errors),
        }
    }

    fn synthesize(&self, price: f64) -> Result<Offer, AppError> {
        if self.request_id.is_empty() {
            return Err(AppError::Internal(
                "Offer form is not bound to a request".to_string(),
            ));
        }

        Ok(Offer {
            id: next_offer_id(),
            request_id: self.request_id.clone(),
            lender_id: self.lender.id.clone(),
            lender_name: self.lender.display_name.clone(),
            price,
            description: self.description.clone(),
            images: self.images.clone(),
            tags: self.offer_tags(),
            created_at: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
            status: OfferStatus::Pending,
        })
    }

    /// Validate, synthesize an offer and hand it to `on_created`.
    ///
    /// The submitting indicator is raised for the duration of the call and
    /// cleared on every exit path. The form is reset only on success.
    pub fn submit<F>(&mut self, on_created: F) -> Result<Submitted<Offer>, SubmitError>
    where
        F: FnOnce(Offer) -> Result<(), AppError>,
    {
        let _submitting = SubmittingGuard::engage(&self.submitting);

        let price = self.validate().map_err(|errors| {
            tracing::debug!("Offer form rejected: {}", errors);
            SubmitError::Invalid {
                errors,
                notice: None,
            }
        })?;

        let created = self
            .synthesize(price)
            .and_then(|offer| on_created(offer.clone()).map(|()| offer));

        match created {
            Ok(offer) => {
                self.reset();
                Ok(Submitted {
                    entity: offer,
                    notice: Notice::offer_submitted(),
                })
            }
            Err(source) => {
                tracing::warn!(
                    "Failed to submit offer for request {}: {}",
                    self.request_id,
                    source
                );
                Err(SubmitError::Failed {
                    source,
                    notice: Notice::offer_failed(),
                })
            }
        }
    }

    /// Clear every field and selection; the target request and lender stay.
    pub fn reset(&mut self) {
        self.price.clear();
        self.description.clear();
        self.images.clear();
        self.available_now = false;
        self.can_deliver = false;
        self.tags.clear();
    }
}
