//! CampusCircle Backend
//!
//! A campus marketplace REST backend: a feed of requests, offers against them,
//! and category filtering, all held in memory.

pub mod api;
pub mod config;
pub mod errors;
pub mod feed;
pub mod flows;
pub mod models;

use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    routing::{delete, get, post, put},
    Router,
};
use tokio::sync::RwLock;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use config::Config;
use feed::{seed_requests, FeedController};

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub feed: Arc<RwLock<FeedController>>,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let requests = if config.seed {
            seed_requests()
        } else {
            Vec::new()
        };

        Self {
            feed: Arc::new(RwLock::new(FeedController::new(requests))),
            config: Arc::new(config),
        }
    }
}

/// Create the application router with all routes.
pub fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let body_limit = state.config.max_upload_bytes;

    // API routes
    let api_routes = Router::new()
        // Feed
        .route("/feed", get(api::get_feed))
        .route("/categories", get(api::list_categories))
        .route("/snapshot", get(api::get_snapshot))
        // Requests
        .route("/requests", get(api::list_requests).post(api::create_request))
        .route("/requests/{id}", get(api::get_request))
        .route(
            "/requests/{id}/offers",
            get(api::list_request_offers).post(api::create_offer),
        )
        .route("/requests/{id}/offer-target", post(api::set_offer_target))
        // Offers
        .route("/offers", get(api::list_offers))
        .route("/offer-tags", get(api::list_offer_tags))
        // Session
        .route("/session", get(api::get_session))
        .route("/session/category", put(api::select_category))
        .route("/session/request-modal", post(api::open_request_modal))
        .route("/session/modal", delete(api::close_modals))
        // Uploads
        .route("/uploads", post(api::upload_image));

    // Health check
    let health_routes = Router::new().route("/health", get(health_check));

    Router::new()
        .nest("/api", api_routes)
        .merge(health_routes)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors)
                .layer(DefaultBodyLimit::max(body_limit)),
        )
        .with_state(state)
}

/// Health check endpoint.
async fn health_check() -> &'static str {
    "OK"
}

#[cfg(test)]
mod tests;
