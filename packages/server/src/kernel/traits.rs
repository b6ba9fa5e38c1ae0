// Trait definitions for dependency injection
//
// These are INFRASTRUCTURE traits only - no business logic. The lifecycle
// actions own the guards and side-effect ordering; the traits give them
// swappable collaborators (Postgres in production, in-memory doubles in
// tests).
//
// Naming convention: Base* for trait names (e.g., BaseMailer)

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domains::appointment::Appointment;
use crate::domains::donation::models::{
    DonationProcess, DonationStatus, HealthCheck, HealthCheckInput,
};
use crate::domains::donor::{Donor, NewDonor};
use crate::domains::inventory::BloodUnit;

// =============================================================================
// Donor Store (identity collaborator)
// =============================================================================

#[async_trait]
pub trait BaseDonorStore: Send + Sync {
    async fn find_donor(&self, id: Uuid) -> Result<Option<Donor>>;

    async fn create(&self, new: NewDonor) -> Result<Donor>;

    /// Persist the donor's mutable fields (eligibility flags included)
    async fn save(&self, donor: &Donor) -> Result<Donor>;
}

// =============================================================================
// Appointment Store (scheduling collaborator)
// =============================================================================

#[async_trait]
pub trait BaseAppointmentStore: Send + Sync {
    async fn schedule(
        &self,
        process_id: Uuid,
        scheduled_at: DateTime<Utc>,
        location: &str,
    ) -> Result<Appointment>;

    /// Most recently scheduled appointment for a process
    async fn find_latest_for_process(&self, process_id: Uuid) -> Result<Option<Appointment>>;
}

// =============================================================================
// Process Store (lifecycle persistence)
// =============================================================================

/// Persistence contract for donation processes.
///
/// All guarded methods are compare-and-swap on the current status: they
/// return `Ok(None)` when the process was not in `expected`, which callers
/// surface as a state-precondition failure. The process id is the unit of
/// mutual exclusion; different ids never contend.
#[async_trait]
pub trait BaseProcessStore: Send + Sync {
    async fn insert(&self, donor_id: Uuid) -> Result<DonationProcess>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<DonationProcess>>;

    /// Newest first
    async fn find_by_donor(&self, donor_id: Uuid) -> Result<Vec<DonationProcess>>;

    /// Newest first
    async fn find_all(&self) -> Result<Vec<DonationProcess>>;

    async fn update_status_if(
        &self,
        id: Uuid,
        expected: DonationStatus,
        new_status: DonationStatus,
        note: Option<&str>,
    ) -> Result<Option<DonationProcess>>;

    async fn set_collected_if(
        &self,
        id: Uuid,
        expected: DonationStatus,
        volume_ml: i32,
        note: &str,
    ) -> Result<Option<DonationProcess>>;

    /// Status transition plus health-check upsert, applied atomically
    async fn record_health_check(
        &self,
        id: Uuid,
        expected: DonationStatus,
        input: &HealthCheckInput,
        new_status: DonationStatus,
        note: &str,
    ) -> Result<Option<(DonationProcess, HealthCheck)>>;

    async fn find_health_check(&self, process_id: Uuid) -> Result<Option<HealthCheck>>;
}

// =============================================================================
// Inventory Service (stock collaborator)
// =============================================================================

#[async_trait]
pub trait BaseInventoryService: Send + Sync {
    /// Admit a verified unit tied to its source process.
    ///
    /// Failure here is fatal to the caller - a process must not complete
    /// without its unit on record.
    async fn admit_unit(
        &self,
        process: &DonationProcess,
        unit_id: &str,
        blood_group: Option<&str>,
    ) -> Result<BloodUnit>;
}

// =============================================================================
// Mailer (notification collaborator)
// =============================================================================

#[async_trait]
pub trait BaseMailer: Send + Sync {
    /// Deliver a plain-text message. Best-effort: callers log failures and
    /// move on.
    async fn send(&self, to: &str, subject: &str, body: &str) -> Result<()>;
}
