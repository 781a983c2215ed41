//! Feed API endpoints.

use axum::extract::{Query, State};
use serde::{Deserialize, Serialize};

use super::{error, success, ApiResult};
use crate::feed::{category_style_for_label, FeedView};
use crate::models::{CategoryFilter, Snapshot};
use crate::AppState;

/// Feed query parameters.
#[derive(Debug, Deserialize)]
pub struct FeedQuery {
    /// Select this filter before rendering (`all` or a category name).
    pub category: Option<String>,
}

/// The feed page.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedPage {
    pub location_label: String,
    #[serde(flatten)]
    pub feed: FeedView,
}

/// A filter chip.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryOption {
    pub value: CategoryFilter,
    pub label: &'static str,
    pub style: &'static str,
    pub selected: bool,
}

/// GET /api/feed - Render the feed, optionally switching the category filter.
pub async fn get_feed(
    State(state): State<AppState>,
    Query(params): Query<FeedQuery>,
) -> ApiResult<FeedPage> {
    let mut feed = state.feed.write().await;
    let revision_id = feed.revision_id();

    if let Some(raw) = params.category.as_deref() {
        match raw.parse::<CategoryFilter>() {
            Ok(filter) => feed.select_category(filter),
            Err(e) => return error(e, revision_id),
        }
    }

    success(
        FeedPage {
            location_label: state.config.location_label.clone(),
            feed: feed.feed(),
        },
        revision_id,
    )
}

/// GET /api/categories - List the category filter options.
pub async fn list_categories(State(state): State<AppState>) -> ApiResult<Vec<CategoryOption>> {
    let feed = state.feed.read().await;
    let selected = feed.selected_category();

    let options = CategoryFilter::options()
        .into_iter()
        .map(|filter| CategoryOption {
            value: filter,
            label: filter.display_label(),
            style: category_style_for_label(filter.as_str()),
            selected: filter == selected,
        })
        .collect();

    success(options, feed.revision_id())
}

/// GET /api/snapshot - Dump all requests and offers.
pub async fn get_snapshot(State(state): State<AppState>) -> ApiResult<Snapshot> {
    let feed = state.feed.read().await;
    success(feed.snapshot(), feed.revision_id())
}
