use crate::app::{handlers, AppState};
use axum::routing::get;
use axum::Router;
use tower_http::trace::TraceLayer;

/// - `GET /api/windows11` -- Windows 11 servicing channels
/// - `GET /api/windows10` -- Windows 10 servicing channels
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/api/windows11", get(handlers::windows11))
        .route("/api/windows10", get(handlers::windows10))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
