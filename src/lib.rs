pub mod billing;
pub mod config;
pub mod error;
pub mod handlers;
pub mod identity;
pub mod middleware;
pub mod records;
pub mod store;

use axum::{
    middleware::from_fn,
    routing::{get, post},
    Router,
};
use serde_json::{json, Value};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

/// Assemble the full application router.
pub fn app() -> Router {
    Router::new()
        // Public
        .route("/", get(root))
        .route("/health", get(health))
        // Authenticated API
        .merge(api_routes())
        // Global middleware
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

/// Routes behind bearer authentication. Each one is a fixed pipeline:
/// authenticate, require an owner id, map the body where there is one, make
/// exactly one gateway call, translate the outcome into one response.
fn api_routes() -> Router {
    use handlers::{billing, deals, surveys};

    Router::new()
        .route("/save", post(deals::save))
        .route("/get-deals", get(deals::list))
        .route("/get-deal/:deal_id", get(deals::get))
        .route("/save-survey", post(surveys::save))
        .route("/create-checkout-session", post(billing::create_checkout_session))
        .route_layer(from_fn(middleware::bearer_auth_middleware))
}

async fn root() -> axum::response::Json<Value> {
    let version = env!("CARGO_PKG_VERSION");

    axum::response::Json(json!({
        "name": "DealDesk API",
        "version": version,
        "endpoints": {
            "home": "/ (public)",
            "health": "/health (public)",
            "save": "POST /save (authenticated)",
            "deals": "GET /get-deals, GET /get-deal/:dealId (authenticated)",
            "survey": "POST /save-survey (authenticated)",
            "checkout": "POST /create-checkout-session (authenticated)",
        }
    }))
}

async fn health() -> impl axum::response::IntoResponse {
    let now = chrono::Utc::now();

    match store::health_check().await {
        Ok(_) => (
            axum::http::StatusCode::OK,
            axum::response::Json(json!({
                "status": "ok",
                "database": "ok",
                "timestamp": now,
            })),
        ),
        Err(e) => {
            tracing::warn!("health check failed: {}", e);
            (
                axum::http::StatusCode::SERVICE_UNAVAILABLE,
                axum::response::Json(json!({
                    "error": "database unavailable",
                    "status": "degraded",
                    "timestamp": now,
                })),
            )
        }
    }
}
