//! Record the physical blood collection

use tracing::info;
use uuid::Uuid;

use super::{respond, state_conflict};
use crate::common::{DonationError, DonationResult};
use crate::domains::donation::data::DonationProcessData;
use crate::domains::donation::models::DonationStatus;
use crate::kernel::ServerDeps;

/// Mark blood as drawn from a `health_check_passed` process.
///
/// `collected_volume_ml` is written exactly once here; the status guard is
/// what makes it immutable (a second call finds `blood_collected` and
/// fails).
pub async fn mark_blood_collected(
    process_id: Uuid,
    volume_ml: i32,
    deps: &ServerDeps,
) -> DonationResult<DonationProcessData> {
    let process = deps
        .processes
        .find_by_id(process_id)
        .await?
        .ok_or(DonationError::NotFound(process_id))?;

    let current = process.current_status()?;
    if current != DonationStatus::HealthCheckPassed {
        return Err(DonationError::InvalidState {
            expected: DonationStatus::HealthCheckPassed,
            actual: current,
        });
    }

    info!(
        "Recording collection of {}ml for donation process {}",
        volume_ml, process_id
    );

    let note = format!("Blood collected ({}ml). Awaiting test results.", volume_ml);

    let Some(updated) = deps
        .processes
        .set_collected_if(
            process_id,
            DonationStatus::HealthCheckPassed,
            volume_ml,
            &note,
        )
        .await?
    else {
        return Err(state_conflict(process_id, DonationStatus::HealthCheckPassed, deps).await);
    };

    respond::to_response(&updated, deps).await
}
