//! Approve or reject a pending donation request

use tracing::info;
use uuid::Uuid;

use super::{respond, state_conflict};
use crate::common::{DonationError, DonationResult};
use crate::domains::donation::data::DonationProcessData;
use crate::domains::donation::models::DonationStatus;
use crate::kernel::ServerDeps;

/// Staff decision on a `pending_approval` request.
///
/// The only legal targets are `rejected` and `appointment_pending`; anything
/// else is invalid input. The supplied note replaces whatever was there.
pub async fn update_donation_status(
    process_id: Uuid,
    new_status: DonationStatus,
    note: Option<String>,
    deps: &ServerDeps,
) -> DonationResult<DonationProcessData> {
    let process = deps
        .processes
        .find_by_id(process_id)
        .await?
        .ok_or(DonationError::NotFound(process_id))?;

    let current = process.current_status()?;
    if current != DonationStatus::PendingApproval {
        return Err(DonationError::InvalidState {
            expected: DonationStatus::PendingApproval,
            actual: current,
        });
    }

    if !matches!(
        new_status,
        DonationStatus::Rejected | DonationStatus::AppointmentPending
    ) {
        return Err(DonationError::InvalidInput(format!(
            "Only 'rejected' or 'appointment_pending' are allowed from 'pending_approval', got '{}'",
            new_status
        )));
    }

    info!("Moving donation process {} to {}", process_id, new_status);

    let Some(updated) = deps
        .processes
        .update_status_if(
            process_id,
            DonationStatus::PendingApproval,
            new_status,
            note.as_deref(),
        )
        .await?
    else {
        return Err(state_conflict(process_id, DonationStatus::PendingApproval, deps).await);
    };

    respond::to_response(&updated, deps).await
}
