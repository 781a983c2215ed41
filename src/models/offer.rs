//! Offer model matching the frontend Offer interface.

use serde::{Deserialize, Serialize};

/// Tag added by the "Available now" quick toggle.
pub const AVAILABLE_NOW_TAG: &str = "Available now";

/// Tag added by the "Can deliver" quick toggle.
pub const CAN_DELIVER_TAG: &str = "Can deliver";

/// Descriptive tags a lender can attach to an offer.
pub const OFFER_TAG_VOCABULARY: [&str; 8] = [
    "Like new condition",
    "Slightly used",
    "Available immediately",
    "Can meet anywhere on campus",
    "Flexible timing",
    "Original packaging",
    "With accessories",
    "Battery included",
];

pub fn is_vocabulary_tag(tag: &str) -> bool {
    OFFER_TAG_VOCABULARY.contains(&tag)
}

/// Lifecycle of an offer. Only `Pending` is ever produced.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum OfferStatus {
    #[default]
    Pending,
    Accepted,
    Rejected,
}

/// A proposal to fulfil a specific request.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Offer {
    pub id: String,
    pub request_id: String,
    pub lender_id: String,
    /// Anonymised until the offer is accepted.
    pub lender_name: String,
    pub price: f64,
    pub description: String,
    pub images: Vec<String>,
    pub tags: Vec<String>,
    pub created_at: String,
    pub status: OfferStatus,
}

/// Who is making an offer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LenderIdentity {
    pub id: String,
    pub display_name: String,
}

/// Request body for making an offer; mirrors the offer form fields.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOfferRequest {
    /// Raw text from the price input.
    #[serde(default)]
    pub price: String,
    #[serde(default)]
    pub description: String,
    /// Data URIs of attached photos.
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub available_now: bool,
    #[serde(default)]
    pub can_deliver: bool,
    /// Tags picked from the vocabulary.
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Toggle tags and vocabulary exposed to the offer form.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OfferTagOptions {
    pub toggles: Vec<&'static str>,
    pub vocabulary: Vec<&'static str>,
}

impl Default for OfferTagOptions {
    fn default() -> Self {
        Self {
            toggles: vec![AVAILABLE_NOW_TAG, CAN_DELIVER_TAG],
            vocabulary: OFFER_TAG_VOCABULARY.to_vec(),
        }
    }
}
