//! Open a new donation process

use tracing::info;
use uuid::Uuid;

use super::respond;
use crate::common::{DonationError, DonationResult};
use crate::domains::donation::data::DonationProcessData;
use crate::kernel::ServerDeps;

/// A donor requests to donate: opens a fresh process in `pending_approval`.
/// A donor may have any number of processes; each is independent.
pub async fn create_donation_request(
    donor_id: Uuid,
    deps: &ServerDeps,
) -> DonationResult<DonationProcessData> {
    let donor = deps
        .donors
        .find_donor(donor_id)
        .await?
        .ok_or(DonationError::DonorNotFound(donor_id))?;

    info!("Opening donation process for donor {}", donor.id);

    let process = deps.processes.insert(donor.id).await?;
    respond::to_response(&process, deps).await
}
