//! Display data derived from a request for the feed cards.

use serde::Serialize;

use crate::models::{Category, Request, Urgency};

pub const CURRENCY_PREFIX: &str = "₹";

/// Badge classes per category.
pub fn category_style(category: Category) -> &'static str {
    match category {
        Category::Electronics => "bg-campus-blue/10 text-campus-blue",
        Category::Books => "bg-campus-green/10 text-campus-green",
        Category::Food => "bg-campus-orange/10 text-campus-orange",
        Category::Transport => "bg-campus-purple/10 text-campus-purple",
        Category::Other => "bg-muted text-muted-foreground",
    }
}

/// Badge classes for an arbitrary category label; unmapped labels get the `Other` style.
pub fn category_style_for_label(label: &str) -> &'static str {
    category_style(label.parse().unwrap_or(Category::Other))
}

pub fn urgency_style(urgency: Urgency) -> &'static str {
    match urgency {
        Urgency::Low => "bg-accent text-accent-foreground",
        Urgency::Medium => "bg-campus-orange-light text-campus-orange",
        Urgency::High => "bg-destructive/10 text-destructive",
    }
}

/// A request plus everything the card needs to render it.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestCard {
    #[serde(flatten)]
    pub request: Request,
    pub category_style: &'static str,
    pub urgency_style: &'static str,
    pub show_new_badge: bool,
    pub price_label: String,
    pub distance_label: String,
    /// Only present when at least one offer was received.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offers_label: Option<String>,
}

impl From<&Request> for RequestCard {
    fn from(request: &Request) -> Self {
        Self {
            category_style: category_style(request.category),
            urgency_style: urgency_style(request.urgency),
            show_new_badge: request.is_new,
            price_label: format!("{}{}", CURRENCY_PREFIX, request.price),
            distance_label: format!("{}m away", request.distance),
            offers_label: (request.offers_count > 0)
                .then(|| format!("{} offers", request.offers_count)),
            request: request.clone(),
        }
    }
}
