//! Toast-style notifications returned alongside a flow's outcome.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum NoticeVariant {
    #[default]
    Default,
    Destructive,
}

/// Informational message for the notification surface.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Notice {
    pub title: String,
    pub description: String,
    pub variant: NoticeVariant,
}

impl Notice {
    pub fn success(title: &str, description: &str) -> Self {
        Self {
            title: title.to_string(),
            description: description.to_string(),
            variant: NoticeVariant::Default,
        }
    }

    pub fn error(title: &str, description: &str) -> Self {
        Self {
            title: title.to_string(),
            description: description.to_string(),
            variant: NoticeVariant::Destructive,
        }
    }

    pub fn request_created() -> Self {
        Self::success(
            "Request Created!",
            "Your request has been posted to the campus.",
        )
    }

    pub fn missing_information() -> Self {
        Self::error("Missing Information", "Please fill in all required fields.")
    }

    pub fn request_failed() -> Self {
        Self::error("Error", "Failed to post request. Please try again.")
    }

    pub fn offer_submitted() -> Self {
        Self::success("Offer submitted!", "Your offer has been sent to the requester.")
    }

    pub fn offer_failed() -> Self {
        Self::error("Error", "Failed to submit offer. Please try again.")
    }
}
