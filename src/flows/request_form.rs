//! Request creation form.

use std::path::Path;

use rand::Rng;

use super::{images, next_request_id, ImageUpload, Notice, SubmitError, Submitted};
use crate::errors::{AppError, ValidationErrors};
use crate::models::{Category, CreateRequestRequest, Request, Urgency};

/// Shown on freshly created requests.
pub const JUST_NOW: &str = "just now";

/// Upper bound (exclusive) of the mocked distance in meters.
const MAX_MOCK_DISTANCE: u32 = 100;

/// Draft state of the "Create New Request" form.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequestForm {
    title: String,
    description: String,
    category: String,
    urgency: Urgency,
    price: String,
    tags: Vec<String>,
    current_tag: String,
    image: Option<String>,
}

/// Required fields after validation.
struct ValidatedRequest {
    title: String,
    description: String,
    category: Category,
    price: f64,
}

impl RequestForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a form from a submitted payload, going through the same tag and
    /// image operations the interactive form uses.
    pub fn from_payload(payload: CreateRequestRequest) -> Result<Self, AppError> {
        let mut form = Self {
            title: payload.title,
            description: payload.description,
            category: payload.category,
            urgency: payload.urgency,
            price: payload.price,
            ..Self::default()
        };

        for tag in &payload.tags {
            form.add_tag(tag);
        }

        if let Some(uri) = payload.image.filter(|uri| !uri.is_empty()) {
            form.set_image(ImageUpload::from_data_uri(&uri)?);
        }

        Ok(form)
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.description = description.into();
    }

    pub fn set_category(&mut self, category: impl Into<String>) {
        self.category = category.into();
    }

    pub fn set_urgency(&mut self, urgency: Urgency) {
        self.urgency = urgency;
    }

    pub fn set_price(&mut self, price: impl Into<String>) {
        self.price = price.into();
    }

    pub fn set_current_tag(&mut self, text: impl Into<String>) {
        self.current_tag = text.into();
    }

    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    pub fn image(&self) -> Option<&str> {
        self.image.as_deref()
    }

    pub fn urgency(&self) -> Urgency {
        self.urgency
    }

    /// Add a trimmed tag. Empty and duplicate tags are rejected.
    pub fn add_tag(&mut self, text: &str) -> bool {
        let tag = text.trim();
        if tag.is_empty() || self.tags.iter().any(|t| t == tag) {
            return false;
        }
        self.tags.push(tag.to_string());
        self.current_tag.clear();
        true
    }

    /// Add whatever is in the tag input.
    pub fn add_current_tag(&mut self) -> bool {
        let text = std::mem::take(&mut self.current_tag);
        let added = self.add_tag(&text);
        if !added {
            self.current_tag = text;
        }
        added
    }

    pub fn remove_tag(&mut self, tag: &str) {
        self.tags.retain(|t| t != tag);
    }

    /// Replace the selected image.
    pub fn set_image(&mut self, upload: ImageUpload) {
        self.image = Some(upload.to_data_uri());
    }

    pub fn clear_image(&mut self) {
        self.image = None;
    }

    /// Read an image file and select it once the read has completed.
    /// A failed read keeps the previous selection.
    pub async fn load_image(&mut self, path: impl AsRef<Path>) -> Result<(), AppError> {
        let upload = images::read_image(path).await?;
        self.set_image(upload);
        Ok(())
    }

    fn validate(&self) -> Result<ValidatedRequest, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        let title = self.title.trim();
        if title.is_empty() {
            errors.add("title", "Title is required");
        }
        let description = self.description.trim();
        if description.is_empty() {
            errors.add("description", "Description is required");
        }

        let category = match self.category.trim() {
            "" => {
                errors.add("category", "Category is required");
                None
            }
            label => match label.parse::<Category>() {
                Ok(category) => Some(category),
                Err(_) => {
                    errors.add("category", format!("Unknown category: {}", label));
                    None
                }
            },
        };

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

        match (category, price) {
            (Some(category), Some(price)) if errors.is_empty() => Ok(ValidatedRequest {
                title: self.title.clone(),
                description: self.description.clone(),
                category,
                price,
            }),
            _ => Err(errors),
        }
    }

    /// Validate, synthesize a request and hand it to `on_created`.
    ///
    /// The form is reset only when the callback succeeds.
    pub fn submit<F>(&mut self, on_created: F) -> Result<Submitted<Request>, SubmitError>
    where
        F: FnOnce(Request) -> Result<(), AppError>,
    {
        let fields = self.validate().map_err(|errors| {
            tracing::debug!("Request form rejected: {}", errors);
            SubmitError::Invalid {
                errors,
                notice: Some(Notice::missing_information()),
            }
        })?;

        let request = Request {
            id: next_request_id(),
            title: fields.title,
            description: fields.description,
            category: fields.category,
            urgency: self.urgency,
            price: fields.price,
            distance: rand::thread_rng().gen_range(0..MAX_MOCK_DISTANCE),
            time_ago: JUST_NOW.to_string(),
            image: self.image.clone(),
            tags: self.tags.clone(),
            offers_count: 0,
            is_new: true,
        };

        if let Err(source) = on_created(request.clone()) {
            tracing::warn!("Failed to post request {}: {}", request.id, source);
            return Err(SubmitError::Failed {
                source,
                notice: Notice::request_failed(),
            });
        }

        self.reset();

        Ok(Submitted {
            entity: request,
            notice: Notice::request_created(),
        })
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
