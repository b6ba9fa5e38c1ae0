use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::server::app::AppState;

/// Middleware gating staff-only routes.
///
/// Expects `Authorization: Bearer <STAFF_API_TOKEN>`. Authentication of
/// donors and finer-grained roles belong to an upstream gateway; this layer
/// only keeps the lifecycle mutations off the public surface.
pub async fn staff_auth_middleware(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let authorized = request
        .headers()
        .get("authorization")
        .and_then(|h| h.to_str().ok())
        .map(|h| h.strip_prefix("Bearer ").unwrap_or(h))
        .map(|token| !state.staff_api_token.is_empty() && token == state.staff_api_token)
        .unwrap_or(false);

    if !authorized {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "error": "Staff authorization required" })),
        )
            .into_response();
    }

    next.run(request).await
}
