//! Schedule the donation visit for an approved request

use chrono::{DateTime, Utc};
use tracing::info;
use uuid::Uuid;

use super::{respond, state_conflict};
use crate::common::{DonationError, DonationResult};
use crate::domains::donation::data::DonationProcessData;
use crate::domains::donation::models::DonationStatus;
use crate::kernel::ServerDeps;

/// Attach a visit date/location to an `appointment_pending` process and move
/// it to `appointment_scheduled`. The appointment record itself belongs to
/// the appointment store; the lifecycle only holds the reference.
pub async fn schedule_appointment(
    process_id: Uuid,
    scheduled_at: DateTime<Utc>,
    location: &str,
    deps: &ServerDeps,
) -> DonationResult<DonationProcessData> {
    let process = deps
        .processes
        .find_by_id(process_id)
        .await?
        .ok_or(DonationError::NotFound(process_id))?;

    let current = process.current_status()?;
    if current != DonationStatus::AppointmentPending {
        return Err(DonationError::InvalidState {
            expected: DonationStatus::AppointmentPending,
            actual: current,
        });
    }

    info!(
        "Scheduling appointment for donation process {} at {}",
        process_id, location
    );

    let appointment = deps
        .appointments
        .schedule(process_id, scheduled_at, location)
        .await?;

    let note = format!(
        "Appointment scheduled for {} at {}.",
        appointment.scheduled_at.format("%d/%m/%Y %H:%M"),
        appointment.location
    );

    let Some(updated) = deps
        .processes
        .update_status_if(
            process_id,
            DonationStatus::AppointmentPending,
            DonationStatus::AppointmentScheduled,
            Some(&note),
        )
        .await?
    else {
        return Err(state_conflict(process_id, DonationStatus::AppointmentPending, deps).await);
    };

    respond::to_response(&updated, deps).await
}
