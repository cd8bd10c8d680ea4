mod api;
mod claims;
mod db;
mod error;
mod jurisdiction;

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use api::AppState;

#[tokio::main]
async fn main() {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "fra_claims_server=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Get storage path from environment or use default
    let storage_path = std::env::var("FRA_STORAGE_PATH")
        .map(PathBuf::from)
        .unwrap_or_else(|_| std::env::temp_dir().join("fra-claims-storage"));

    // Initialize database
    let db_path = storage_path.join("fra-claims.db");
    let db = db::init_database(&db_path)
        .await
        .expect("Failed to initialize database");
    let db = Arc::new(db);
    tracing::info!("Database initialized at {:?}", db_path);

    let state = Arc::new(AppState::new(db));

    // Ensure bootstrap super-admin exists; real officer accounts are
    // provisioned out of band.
    let admin_user =
        std::env::var("FRA_ADMIN_USERNAME").unwrap_or_else(|_| "admin".to_string());
    let admin_pass =
        std::env::var("FRA_ADMIN_PASSWORD").unwrap_or_else(|_| "admin".to_string());
    state.auth.ensure_admin(&admin_user, &admin_pass);

    let app = api::claims_router()
        .with_state(state)
        .layer(TraceLayer::new_for_http());

    let addr: SocketAddr = std::env::var("FRA_BIND_ADDR")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or_else(|| SocketAddr::from(([127, 0, 0, 1], 8080)));
    tracing::info!("FRA claims server starting on http://{}", addr);
    tracing::info!("API Endpoints:");
    tracing::info!("  POST /api/login                    - Officer login");
    tracing::info!("  GET  /api/claims                   - List claims in jurisdiction");
    tracing::info!("  PUT  /api/claims/:id/map           - Record Gram Sabha mapping");
    tracing::info!("  POST /api/claims/:id/forward       - Forward to the next stage");
    tracing::info!("  POST /api/claims/:id/reject        - Reject (terminal)");
    tracing::info!("  POST /api/claims/:id/approve       - Grant title (district)");

    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}
