//! Record the pre-donation medical screening

use tracing::info;
use uuid::Uuid;

use super::{respond, state_conflict};
use crate::common::{DonationError, DonationResult};
use crate::domains::donation::data::DonationProcessData;
use crate::domains::donation::models::{DonationStatus, HealthCheckInput};
use crate::kernel::ServerDeps;

/// Screening outcome for an `appointment_scheduled` process.
///
/// The first screening creates the owned health-check record; a repeat while
/// still scheduled updates it in place (one sub-record per process, always).
/// Eligibility decides between `health_check_passed` and
/// `health_check_failed` - both leave the screening window, so a second call
/// after either outcome fails the status guard.
pub async fn record_health_check(
    process_id: Uuid,
    input: HealthCheckInput,
    deps: &ServerDeps,
) -> DonationResult<DonationProcessData> {
    let process = deps
        .processes
        .find_by_id(process_id)
        .await?
        .ok_or(DonationError::NotFound(process_id))?;

    let current = process.current_status()?;
    if current != DonationStatus::AppointmentScheduled {
        return Err(DonationError::InvalidState {
            expected: DonationStatus::AppointmentScheduled,
            actual: current,
        });
    }

    let new_status = if input.is_eligible {
        DonationStatus::HealthCheckPassed
    } else {
        DonationStatus::HealthCheckFailed
    };

    let note = if input.is_eligible {
        "Health check recorded. Result: Passed.".to_string()
    } else {
        format!(
            "Health check recorded. Result: Failed. {}",
            input.notes.clone().unwrap_or_default()
        )
    };

    info!(
        "Recording health check for donation process {}: eligible={}",
        process_id, input.is_eligible
    );

    let Some((updated, _check)) = deps
        .processes
        .record_health_check(
            process_id,
            DonationStatus::AppointmentScheduled,
            &input,
            new_status,
            &note,
        )
        .await?
    else {
        return Err(state_conflict(process_id, DonationStatus::AppointmentScheduled, deps).await);
    };

    respond::to_response(&updated, deps).await
}
