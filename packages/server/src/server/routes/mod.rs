// HTTP routes

pub mod donations;
pub mod donors;
pub mod health;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::common::DonationError;

/// Wrapper turning the domain error taxonomy into HTTP responses
pub struct ApiError(pub DonationError);

impl From<DonationError> for ApiError {
    fn from(err: DonationError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            DonationError::NotFound(_) | DonationError::DonorNotFound(_) => StatusCode::NOT_FOUND,
            DonationError::InvalidState { .. } => StatusCode::CONFLICT,
            DonationError::InvalidInput(_) => StatusCode::UNPROCESSABLE_ENTITY,
            DonationError::Inventory(_) => StatusCode::BAD_GATEWAY,
            DonationError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!("Request failed: {}", self.0);
        }

        (status, Json(json!({ "error": self.0.to_string() }))).into_response()
    }
}

/// Edge-validation failure: 422 with the given message
pub(crate) fn unprocessable(message: impl Into<String>) -> ApiError {
    ApiError(DonationError::InvalidInput(message.into()))
}
