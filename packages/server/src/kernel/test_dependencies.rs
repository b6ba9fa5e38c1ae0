// Test dependencies - in-memory doubles for the infrastructure traits
//
// Backs the lifecycle with mutex-guarded maps honoring the same
// compare-and-swap contract as the Postgres stores, plus mock collaborators
// that record their calls. Lets the full lifecycle run in tests without a
// database or a mail relay.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::deps::ServerDeps;
use super::traits::{
    BaseAppointmentStore, BaseDonorStore, BaseInventoryService, BaseMailer, BaseProcessStore,
};
use crate::domains::appointment::Appointment;
use crate::domains::donation::models::{
    DonationProcess, DonationStatus, HealthCheck, HealthCheckInput,
};
use crate::domains::donor::{Donor, NewDonor};
use crate::domains::inventory::BloodUnit;

// =============================================================================
// In-memory donor store
// =============================================================================

#[derive(Default)]
pub struct InMemoryDonorStore {
    donors: Mutex<HashMap<Uuid, Donor>>,
}

impl InMemoryDonorStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BaseDonorStore for InMemoryDonorStore {
    async fn find_donor(&self, id: Uuid) -> Result<Option<Donor>> {
        Ok(self.donors.lock().unwrap().get(&id).cloned())
    }

    async fn create(&self, new: NewDonor) -> Result<Donor> {
        let donor = Donor {
            id: Uuid::new_v4(),
            email: new.email,
            full_name: new.full_name,
            blood_group: new.blood_group,
            is_ready_to_donate: true,
            last_donation_date: None,
            created_at: Utc::now(),
        };
        self.donors.lock().unwrap().insert(donor.id, donor.clone());
        Ok(donor)
    }

    async fn save(&self, donor: &Donor) -> Result<Donor> {
        let mut donors = self.donors.lock().unwrap();
        if !donors.contains_key(&donor.id) {
            anyhow::bail!("donor {} does not exist", donor.id);
        }
        donors.insert(donor.id, donor.clone());
        Ok(donor.clone())
    }
}

// =============================================================================
// In-memory appointment store
// =============================================================================

#[derive(Default)]
pub struct InMemoryAppointmentStore {
    appointments: Mutex<Vec<Appointment>>,
}

impl InMemoryAppointmentStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BaseAppointmentStore for InMemoryAppointmentStore {
    async fn schedule(
        &self,
        process_id: Uuid,
        scheduled_at: DateTime<Utc>,
        location: &str,
    ) -> Result<Appointment> {
        let appointment = Appointment {
            id: Uuid::new_v4(),
            process_id,
            scheduled_at,
            location: location.to_string(),
            created_at: Utc::now(),
        };
        self.appointments.lock().unwrap().push(appointment.clone());
        Ok(appointment)
    }

    async fn find_latest_for_process(&self, process_id: Uuid) -> Result<Option<Appointment>> {
        Ok(self
            .appointments
            .lock()
            .unwrap()
            .iter()
            .filter(|a| a.process_id == process_id)
            .max_by_key(|a| a.scheduled_at)
            .cloned())
    }
}

// =============================================================================
// In-memory process store
// =============================================================================

/// Processes are kept in insertion order; the single mutex makes every
/// guarded method atomic, matching the row-level CAS of the Postgres store.
#[derive(Default)]
pub struct InMemoryProcessStore {
    processes: Mutex<Vec<DonationProcess>>,
    health_checks: Mutex<HashMap<Uuid, HealthCheck>>,
}

impl InMemoryProcessStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn cas(
        &self,
        id: Uuid,
        expected: DonationStatus,
        mutate: impl FnOnce(&mut DonationProcess),
    ) -> Option<DonationProcess> {
        let mut processes = self.processes.lock().unwrap();
        let process = processes.iter_mut().find(|p| p.id == id)?;
        if process.status != expected.to_string() {
            return None;
        }
        mutate(process);
        Some(process.clone())
    }
}

#[async_trait]
impl BaseProcessStore for InMemoryProcessStore {
    async fn insert(&self, donor_id: Uuid) -> Result<DonationProcess> {
        let process = DonationProcess {
            id: Uuid::new_v4(),
            donor_id,
            status: DonationStatus::PendingApproval.to_string(),
            note: None,
            collected_volume_ml: None,
            created_at: Utc::now(),
        };
        self.processes.lock().unwrap().push(process.clone());
        Ok(process)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<DonationProcess>> {
        Ok(self
            .processes
            .lock()
            .unwrap()
            .iter()
            .find(|p| p.id == id)
            .cloned())
    }

    async fn find_by_donor(&self, donor_id: Uuid) -> Result<Vec<DonationProcess>> {
        Ok(self
            .processes
            .lock()
            .unwrap()
            .iter()
            .rev()
            .filter(|p| p.donor_id == donor_id)
            .cloned()
            .collect())
    }

    async fn find_all(&self) -> Result<Vec<DonationProcess>> {
        Ok(self
            .processes
            .lock()
            .unwrap()
            .iter()
            .rev()
            .cloned()
            .collect())
    }

    async fn update_status_if(
        &self,
        id: Uuid,
        expected: DonationStatus,
        new_status: DonationStatus,
        note: Option<&str>,
    ) -> Result<Option<DonationProcess>> {
        Ok(self.cas(id, expected, |p| {
            p.status = new_status.to_string();
            p.note = note.map(str::to_string);
        }))
    }

    async fn set_collected_if(
        &self,
        id: Uuid,
        expected: DonationStatus,
        volume_ml: i32,
        note: &str,
    ) -> Result<Option<DonationProcess>> {
        Ok(self.cas(id, expected, |p| {
            p.status = DonationStatus::BloodCollected.to_string();
            p.collected_volume_ml = Some(volume_ml);
            p.note = Some(note.to_string());
        }))
    }

    async fn record_health_check(
        &self,
        id: Uuid,
        expected: DonationStatus,
        input: &HealthCheckInput,
        new_status: DonationStatus,
        note: &str,
    ) -> Result<Option<(DonationProcess, HealthCheck)>> {
        let Some(process) = self.cas(id, expected, |p| {
            p.status = new_status.to_string();
            p.note = Some(note.to_string());
        }) else {
            return Ok(None);
        };

        let mut checks = self.health_checks.lock().unwrap();
        let check = match checks.get(&id) {
            // Update in place; the original check_date survives.
            Some(existing) => HealthCheck {
                id: existing.id,
                process_id: id,
                is_eligible: input.is_eligible,
                blood_pressure_systolic: input.blood_pressure_systolic,
                blood_pressure_diastolic: input.blood_pressure_diastolic,
                hemoglobin_level: input.hemoglobin_level,
                weight: input.weight,
                heart_rate: input.heart_rate,
                temperature: input.temperature,
                notes: input.notes.clone(),
                check_date: existing.check_date,
            },
            None => HealthCheck {
                id: Uuid::new_v4(),
                process_id: id,
                is_eligible: input.is_eligible,
                blood_pressure_systolic: input.blood_pressure_systolic,
                blood_pressure_diastolic: input.blood_pressure_diastolic,
                hemoglobin_level: input.hemoglobin_level,
                weight: input.weight,
                heart_rate: input.heart_rate,
                temperature: input.temperature,
                notes: input.notes.clone(),
                check_date: Utc::now(),
            },
        };
        checks.insert(id, check.clone());

        Ok(Some((process, check)))
    }

    async fn find_health_check(&self, process_id: Uuid) -> Result<Option<HealthCheck>> {
        Ok(self.health_checks.lock().unwrap().get(&process_id).cloned())
    }
}

// =============================================================================
// Mock inventory service
// =============================================================================

/// Arguments captured from an admit call
#[derive(Debug, Clone)]
pub struct AdmitCallArgs {
    pub unit_id: String,
    pub process_id: Uuid,
    pub blood_group: Option<String>,
}

#[derive(Default)]
pub struct MockInventoryService {
    admit_calls: Mutex<Vec<AdmitCallArgs>>,
    failing: Mutex<bool>,
}

impl MockInventoryService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent admit call fail
    pub fn set_failing(&self, failing: bool) {
        *self.failing.lock().unwrap() = failing;
    }

    /// Get all admit calls with their arguments
    pub fn admit_calls(&self) -> Vec<AdmitCallArgs> {
        self.admit_calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl BaseInventoryService for MockInventoryService {
    async fn admit_unit(
        &self,
        process: &DonationProcess,
        unit_id: &str,
        blood_group: Option<&str>,
    ) -> Result<BloodUnit> {
        if *self.failing.lock().unwrap() {
            anyhow::bail!("inventory service unavailable");
        }

        self.admit_calls.lock().unwrap().push(AdmitCallArgs {
            unit_id: unit_id.to_string(),
            process_id: process.id,
            blood_group: blood_group.map(str::to_string),
        });

        Ok(BloodUnit {
            id: Uuid::new_v4(),
            unit_id: unit_id.to_string(),
            process_id: process.id,
            blood_group: blood_group.map(str::to_string),
            volume_ml: process.collected_volume_ml,
            admitted_at: Utc::now(),
        })
    }
}

// =============================================================================
// Mock mailer
// =============================================================================

/// A message captured from a send call
#[derive(Debug, Clone)]
pub struct SentMail {
    pub to: String,
    pub subject: String,
    pub body: String,
}

#[derive(Default)]
pub struct MockMailer {
    sent: Mutex<Vec<SentMail>>,
    failing: Mutex<bool>,
}

impl MockMailer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent send call fail
    pub fn set_failing(&self, failing: bool) {
        *self.failing.lock().unwrap() = failing;
    }

    /// Get all messages that were sent
    pub fn sent(&self) -> Vec<SentMail> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl BaseMailer for MockMailer {
    async fn send(&self, to: &str, subject: &str, body: &str) -> Result<()> {
        if *self.failing.lock().unwrap() {
            anyhow::bail!("mail relay unavailable");
        }

        self.sent.lock().unwrap().push(SentMail {
            to: to.to_string(),
            subject: subject.to_string(),
            body: body.to_string(),
        });
        Ok(())
    }
}

// =============================================================================
// Bundled test dependencies
// =============================================================================

/// `ServerDeps` wired to in-memory stores, with handles onto the mocks so
/// tests can inspect collaborator calls.
pub struct TestDeps {
    pub deps: ServerDeps,
    pub inventory: Arc<MockInventoryService>,
    pub mailer: Arc<MockMailer>,
}

impl TestDeps {
    pub fn new() -> Self {
        let inventory = Arc::new(MockInventoryService::new());
        let mailer = Arc::new(MockMailer::new());
        let deps = ServerDeps::new(
            Arc::new(InMemoryDonorStore::new()),
            Arc::new(InMemoryAppointmentStore::new()),
            Arc::new(InMemoryProcessStore::new()),
            inventory.clone(),
            mailer.clone(),
        );
        Self {
            deps,
            inventory,
            mailer,
        }
    }
}

impl Default for TestDeps {
    fn default() -> Self {
        Self::new()
    }
}
