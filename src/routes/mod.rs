pub mod app;

use axum::{Router, middleware, routing::get};
use http::{HeaderValue, header};
use std::sync::Arc;
use tower_http::set_header::SetResponseHeaderLayer;

use crate::handlers::api::health_check;
use crate::middleware::session_middleware;
use crate::state::AppState;

/// Assemble the complete application: session-bound views plus the public health
/// check, wrapped in security headers.
pub fn build_router(state: Arc<AppState>) -> Router {
    let app_routes = app::create_app_router().layer(middleware::from_fn_with_state(
        state.clone(),
        session_middleware,
    ));

    // Public health check route (no session)
    let public_routes = Router::new().route("/health", get(health_check));

    let security_headers = tower::ServiceBuilder::new()
        .layer(SetResponseHeaderLayer::overriding(
            header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::X_FRAME_OPTIONS,
            HeaderValue::from_static("DENY"),
        ));

    public_routes
        .merge(app_routes)
        .with_state(state)
        .layer(security_headers)
}
