//! Router construction.
//!
//! Builds the axum router with all routes and middleware.

use std::sync::Arc;

use axum::Router;
use axum::routing::post;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

/// Create the application router.
pub(crate) fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route(
            "/discord2contentapi",
            post(handlers::convert::discord_to_markup),
        )
        .route(
            "/contentapi2discord",
            post(handlers::convert::markup_to_discord),
        )
        .fallback(handlers::convert::not_found)
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()))
        .with_state(state)
}
