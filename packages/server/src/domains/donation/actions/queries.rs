//! Donation query actions
//!
//! Read-only views, newest first, with donor/appointment/health-check
//! detail attached to every row.

use uuid::Uuid;

use super::respond;
use crate::common::{DonationError, DonationResult};
use crate::domains::donation::data::DonationProcessData;
use crate::kernel::ServerDeps;

/// A donor's own donation history
pub async fn donation_history(
    donor_id: Uuid,
    deps: &ServerDeps,
) -> DonationResult<Vec<DonationProcessData>> {
    deps.donors
        .find_donor(donor_id)
        .await?
        .ok_or(DonationError::DonorNotFound(donor_id))?;

    let mut history = Vec::new();
    for process in deps.processes.find_by_donor(donor_id).await? {
        history.push(respond::to_response(&process, deps).await?);
    }
    Ok(history)
}

/// Staff view over every donation request
pub async fn all_donation_requests(deps: &ServerDeps) -> DonationResult<Vec<DonationProcessData>> {
    let mut requests = Vec::new();
    for process in deps.processes.find_all().await? {
        requests.push(respond::to_response(&process, deps).await?);
    }
    Ok(requests)
}
