pub mod auth;
pub mod handlers;
pub mod types;

use std::sync::Arc;

use axum::{
    routing::{get, post, put},
    Router,
};

pub use auth::{AuthManager, Officer};
pub use handlers::AppState;

/// Create the claims API router. Every claim route resolves the acting
/// officer from the Authorization header; the jurisdiction filter is applied
/// inside the store, never left to the client.
pub fn claims_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/health", get(handlers::health))
        .route("/api/login", post(handlers::login))
        .route("/api/whoami", get(handlers::whoami))
        .route("/api/claims", post(handlers::submit_claim).get(handlers::list_claims))
        .route("/api/claims/:id", get(handlers::get_claim))
        .route("/api/claims/:id/map", put(handlers::save_map_data))
        .route("/api/claims/:id/begin-review", post(handlers::begin_review))
        .route("/api/claims/:id/forward", post(handlers::forward_claim))
        .route("/api/claims/:id/reject", post(handlers::reject_claim))
        .route("/api/claims/:id/approve", post(handlers::approve_claim))
}
