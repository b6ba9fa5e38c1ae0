//! Donation lifecycle actions
//!
//! One file per operation. Every mutating action follows the same shape:
//! load, check the status guard, apply the compare-and-swap mutation, run
//! side effects, assemble the denormalized response.

pub mod collect;
pub mod create_request;
pub mod queries;
pub mod record_health_check;
pub mod record_test_result;
pub mod respond;
pub mod schedule_appointment;
pub mod update_status;

pub use collect::mark_blood_collected;
pub use create_request::create_donation_request;
pub use queries::{all_donation_requests, donation_history};
pub use record_health_check::record_health_check;
pub use record_test_result::{record_blood_test_result, BloodTestResultInput};
pub use schedule_appointment::schedule_appointment;
pub use update_status::update_donation_status;

use uuid::Uuid;

use crate::common::DonationError;
use crate::domains::donation::models::DonationStatus;
use crate::kernel::ServerDeps;

/// Error for a compare-and-swap miss: the process left `expected` between
/// the guard check and the update (or was never there). Re-reads the row so
/// the error names the actual status.
pub(crate) async fn state_conflict(
    id: Uuid,
    expected: DonationStatus,
    deps: &ServerDeps,
) -> DonationError {
    match deps.processes.find_by_id(id).await {
        Ok(Some(process)) => match process.current_status() {
            Ok(actual) => DonationError::InvalidState { expected, actual },
            Err(e) => DonationError::Store(e),
        },
        Ok(None) => DonationError::NotFound(id),
        Err(e) => DonationError::Store(e),
    }
}
