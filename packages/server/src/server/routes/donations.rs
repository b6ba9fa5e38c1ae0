use axum::{
    extract::{Path, State},
    Json,
};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use uuid::Uuid;

use super::{unprocessable, ApiError};
use crate::domains::donation::actions;
use crate::domains::donation::actions::BloodTestResultInput;
use crate::domains::donation::data::DonationProcessData;
use crate::domains::donation::models::{DonationStatus, HealthCheckInput};
use crate::server::app::AppState;

#[derive(Deserialize)]
pub struct RequestDonationBody {
    pub donor_id: Uuid,
}

/// A donor opens a new donation request
pub async fn request_donation(
    State(state): State<AppState>,
    Json(body): Json<RequestDonationBody>,
) -> Result<Json<DonationProcessData>, ApiError> {
    let data = actions::create_donation_request(body.donor_id, &state.deps).await?;
    Ok(Json(data))
}

/// A donor's own donation history, newest first
pub async fn donation_history_handler(
    State(state): State<AppState>,
    Path(donor_id): Path<Uuid>,
) -> Result<Json<Vec<DonationProcessData>>, ApiError> {
    let history = actions::donation_history(donor_id, &state.deps).await?;
    Ok(Json(history))
}

/// Staff: every donation request in the system
pub async fn get_all_requests(
    State(state): State<AppState>,
) -> Result<Json<Vec<DonationProcessData>>, ApiError> {
    let requests = actions::all_donation_requests(&state.deps).await?;
    Ok(Json(requests))
}

#[derive(Deserialize)]
pub struct UpdateStatusBody {
    pub new_status: DonationStatus,
    pub note: Option<String>,
}

/// Staff: approve or reject a pending request
pub async fn update_request_status(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<UpdateStatusBody>,
) -> Result<Json<DonationProcessData>, ApiError> {
    let data =
        actions::update_donation_status(id, body.new_status, body.note, &state.deps).await?;
    Ok(Json(data))
}

#[derive(Deserialize)]
pub struct ScheduleAppointmentBody {
    pub scheduled_at: DateTime<Utc>,
    pub location: String,
}

/// Staff: schedule the donation visit
pub async fn schedule_appointment_handler(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<ScheduleAppointmentBody>,
) -> Result<Json<DonationProcessData>, ApiError> {
    let location = body.location.trim();
    if location.is_empty() {
        return Err(unprocessable("Location must not be empty"));
    }

    let data =
        actions::schedule_appointment(id, body.scheduled_at, location, &state.deps).await?;
    Ok(Json(data))
}

/// Staff: record the screening outcome
pub async fn record_health_check_handler(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(input): Json<HealthCheckInput>,
) -> Result<Json<DonationProcessData>, ApiError> {
    input.validate().map_err(unprocessable)?;

    let data = actions::record_health_check(id, input, &state.deps).await?;
    Ok(Json(data))
}

#[derive(Deserialize)]
pub struct CollectBody {
    pub collected_volume_ml: i32,
}

/// Staff: confirm blood was drawn
pub async fn collect_handler(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<CollectBody>,
) -> Result<Json<DonationProcessData>, ApiError> {
    if body.collected_volume_ml <= 0 {
        return Err(unprocessable("Collected volume must be positive"));
    }

    let data = actions::mark_blood_collected(id, body.collected_volume_ml, &state.deps).await?;
    Ok(Json(data))
}

/// Staff: record the laboratory verdict
pub async fn test_result_handler(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(input): Json<BloodTestResultInput>,
) -> Result<Json<DonationProcessData>, ApiError> {
    let data = actions::record_blood_test_result(id, input, &state.deps).await?;
    Ok(Json(data))
}
