//! Record the laboratory test result and close out the donation

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{error, info};
use uuid::Uuid;

use super::{respond, state_conflict};
use crate::common::{DonationError, DonationResult};
use crate::domains::donation::data::DonationProcessData;
use crate::domains::donation::models::DonationStatus;
use crate::domains::donation::notifications::dispatch_test_result_email;
use crate::kernel::ServerDeps;

/// Laboratory verdict for a collected unit
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BloodTestResultInput {
    pub is_safe: bool,
    pub blood_unit_id: Option<String>,
    pub notes: Option<String>,
}

/// Final lifecycle step for a `blood_collected` process.
///
/// Safe panel: the unit is admitted to inventory first - without a
/// successful admission the process never reaches `completed` - then the
/// donor's eligibility is cleared and `last_donation_date` stamped.
/// Unsafe panel: the process moves to `testing_failed` and inventory is
/// never touched. Either way the donor is notified after the transition is
/// persisted; a dispatch failure never rolls it back.
pub async fn record_blood_test_result(
    process_id: Uuid,
    input: BloodTestResultInput,
    deps: &ServerDeps,
) -> DonationResult<DonationProcessData> {
    let process = deps
        .processes
        .find_by_id(process_id)
        .await?
        .ok_or(DonationError::NotFound(process_id))?;

    let current = process.current_status()?;
    if current != DonationStatus::BloodCollected {
        return Err(DonationError::InvalidState {
            expected: DonationStatus::BloodCollected,
            actual: current,
        });
    }

    let donor = deps
        .donors
        .find_donor(process.donor_id)
        .await?
        .ok_or(DonationError::DonorNotFound(process.donor_id))?;

    let updated = if input.is_safe {
        let unit_id = input
            .blood_unit_id
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .ok_or_else(|| {
                DonationError::InvalidInput(
                    "A blood unit id is required for a safe test result".to_string(),
                )
            })?;

        deps.inventory
            .admit_unit(&process, unit_id, donor.blood_group.as_deref())
            .await
            .map_err(|e| {
                error!(
                    "Inventory admission failed for donation process {}: {}",
                    process_id, e
                );
                DonationError::Inventory(e)
            })?;

        info!(
            "Blood unit {} admitted; completing donation process {}",
            unit_id, process_id
        );

        let note = format!("Blood unit {} passed tests and added to inventory.", unit_id);
        let Some(updated) = deps
            .processes
            .update_status_if(
                process_id,
                DonationStatus::BloodCollected,
                DonationStatus::Completed,
                Some(&note),
            )
            .await?
        else {
            return Err(state_conflict(process_id, DonationStatus::BloodCollected, deps).await);
        };

        // The donor sits out until re-screened.
        let mut donor = donor.clone();
        donor.is_ready_to_donate = false;
        donor.last_donation_date = Some(Utc::now().date_naive());
        deps.donors.save(&donor).await?;

        updated
    } else {
        let reason = input.notes.as_deref().unwrap_or("not specified");
        let note = match input.blood_unit_id.as_deref() {
            Some(unit_id) => format!("Blood unit {} failed testing. Reason: {}", unit_id, reason),
            None => format!("Blood failed testing. Reason: {}", reason),
        };

        info!(
            "Blood test failed for donation process {}; reason: {}",
            process_id, reason
        );

        let Some(updated) = deps
            .processes
            .update_status_if(
                process_id,
                DonationStatus::BloodCollected,
                DonationStatus::TestingFailed,
                Some(&note),
            )
            .await?
        else {
            return Err(state_conflict(process_id, DonationStatus::BloodCollected, deps).await);
        };

        updated
    };

    // Status is committed; notification is best-effort from here on.
    let appointment = deps.appointments.find_latest_for_process(process_id).await?;
    dispatch_test_result_email(
        deps.mailer.as_ref(),
        &donor,
        appointment.as_ref(),
        input.is_safe,
        input.notes.as_deref(),
    )
    .await;

    respond::to_response(&updated, deps).await
}
