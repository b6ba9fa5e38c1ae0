use thiserror::Error;
use uuid::Uuid;

use crate::domains::donation::models::DonationStatus;

/// Error taxonomy for the donation lifecycle.
///
/// `Inventory` is fatal to the test-result operation: a process must never
/// reach `completed` without a successful admission. Notification dispatch
/// failures are not represented here at all - they are logged and swallowed
/// at the call site.
#[derive(Error, Debug)]
pub enum DonationError {
    #[error("Donation process not found: {0}")]
    NotFound(Uuid),

    #[error("Donor not found: {0}")]
    DonorNotFound(Uuid),

    #[error("Invalid state: operation requires status '{expected}', but process is '{actual}'")]
    InvalidState {
        expected: DonationStatus,
        actual: DonationStatus,
    },

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Inventory admission failed: {0}")]
    Inventory(#[source] anyhow::Error),

    #[error("Store error: {0}")]
    Store(#[from] anyhow::Error),
}

pub type DonationResult<T> = Result<T, DonationError>;
