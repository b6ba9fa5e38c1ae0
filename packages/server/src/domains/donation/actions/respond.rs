//! Shared response assembly for all lifecycle operations.

use crate::common::{DonationError, DonationResult};
use crate::domains::donation::data::DonationProcessData;
use crate::domains::donation::models::DonationProcess;
use crate::kernel::ServerDeps;

/// Build the denormalized process view: donor summary plus appointment and
/// health-check details when present.
pub async fn to_response(
    process: &DonationProcess,
    deps: &ServerDeps,
) -> DonationResult<DonationProcessData> {
    let donor = deps
        .donors
        .find_donor(process.donor_id)
        .await?
        .ok_or(DonationError::DonorNotFound(process.donor_id))?;

    let appointment = deps.appointments.find_latest_for_process(process.id).await?;
    let health_check = deps.processes.find_health_check(process.id).await?;

    DonationProcessData::assemble(
        process,
        &donor,
        appointment.as_ref(),
        health_check.as_ref(),
    )
    .map_err(DonationError::Store)
}
