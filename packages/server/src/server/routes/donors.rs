use axum::{extract::State, http::StatusCode, Json};
use serde::Deserialize;

use super::{unprocessable, ApiError};
use crate::common::DonationError;
use crate::domains::donation::data::DonorData;
use crate::domains::donor::NewDonor;
use crate::server::app::AppState;

#[derive(Deserialize)]
pub struct RegisterDonorBody {
    pub email: String,
    pub full_name: String,
    pub blood_group: Option<String>,
}

/// Register a donor record.
///
/// Identity proper (credentials, KYC) lives upstream; this endpoint only
/// creates the donor row the lifecycle references.
pub async fn register_donor(
    State(state): State<AppState>,
    Json(body): Json<RegisterDonorBody>,
) -> Result<(StatusCode, Json<DonorData>), ApiError> {
    if !body.email.contains('@') {
        return Err(unprocessable("A valid email address is required"));
    }
    if body.full_name.trim().is_empty() {
        return Err(unprocessable("Full name must not be empty"));
    }

    let donor = state
        .deps
        .donors
        .create(NewDonor {
            email: body.email.trim().to_string(),
            full_name: body.full_name.trim().to_string(),
            blood_group: body.blood_group.filter(|g| !g.trim().is_empty()),
        })
        .await
        .map_err(DonationError::Store)?;

    Ok((StatusCode::CREATED, Json(DonorData::from(&donor))))
}
