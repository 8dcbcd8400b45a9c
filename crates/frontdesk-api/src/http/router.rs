//! Axum router configuration with middleware.
//!
//! Public chat routes carry no auth; the admin listing and history
//! clearing require the admin cookie (enforced by the `AdminSession`
//! extractor on those handlers). Middleware: permissive CORS (the widget
//! is embedded on a separate marketing site origin) and request tracing.

use axum::Router;
use axum::routing::{delete, get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::http::handlers;
use crate::state::AppState;

/// Build the complete router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/chat/session", post(handlers::session::start_session))
        .route(
            "/chat/messages",
            get(handlers::message::list_messages).post(handlers::message::send_message),
        )
        .route("/chat/sessions", get(handlers::session::list_sessions))
        .route(
            "/chat/sessions/{id}/messages",
            delete(handlers::session::clear_history),
        )
        .route(
            "/admin/auth",
            post(handlers::auth::login).delete(handlers::auth::logout),
        )
        .route("/health", get(health_check))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// GET /health - Simple health check endpoint (no auth required).
async fn health_check() -> axum::Json<serde_json::Value> {
    axum::Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
