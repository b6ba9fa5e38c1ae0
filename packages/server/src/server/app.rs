//! Application setup and server configuration.

use std::sync::Arc;

use axum::{
    http::{
        header::{AUTHORIZATION, CONTENT_TYPE},
        HeaderValue, Method,
    },
    middleware,
    routing::{get, post, put},
    Router,
};
use sqlx::PgPool;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::kernel::ServerDeps;
use crate::server::middleware::staff_auth_middleware;
use crate::server::routes::{donations, donors, health};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub deps: Arc<ServerDeps>,
    /// Present in production; absent when the app runs against in-memory
    /// stores (the health probe then skips the database check).
    pub db_pool: Option<PgPool>,
    pub staff_api_token: String,
}

/// Build the Axum application router.
///
/// Staff routes carry the bearer-token gate; donor-facing routes and the
/// health probe are open.
pub fn build_app(state: AppState, allowed_origins: Vec<String>) -> Router {
    let cors = if allowed_origins.is_empty() {
        // Development default - allow any origin
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods([Method::GET, Method::POST, Method::PUT])
            .allow_headers([AUTHORIZATION, CONTENT_TYPE])
    } else {
        let origins: Vec<HeaderValue> = allowed_origins
            .iter()
            .filter_map(|origin| origin.parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods([Method::GET, Method::POST, Method::PUT])
            .allow_headers([AUTHORIZATION, CONTENT_TYPE])
    };

    let staff_routes = Router::new()
        .route(
            "/api/staff/donations/requests",
            get(donations::get_all_requests),
        )
        .route(
            "/api/staff/donations/:id/status",
            put(donations::update_request_status),
        )
        .route(
            "/api/staff/donations/:id/appointment",
            post(donations::schedule_appointment_handler),
        )
        .route(
            "/api/staff/donations/:id/health-check",
            post(donations::record_health_check_handler),
        )
        .route(
            "/api/staff/donations/:id/collect",
            post(donations::collect_handler),
        )
        .route(
            "/api/staff/donations/:id/test-result",
            post(donations::test_result_handler),
        )
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            staff_auth_middleware,
        ));

    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/donors", post(donors::register_donor))
        .route("/api/donations/request", post(donations::request_donation))
        .route(
            "/api/donations/history/:donor_id",
            get(donations::donation_history_handler),
        )
        .merge(staff_routes)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
