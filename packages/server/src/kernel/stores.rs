//! Postgres-backed implementations of the infrastructure traits.
//!
//! Thin bridges: all SQL stays in the model modules; these types only carry
//! the pool handle and satisfy the trait contracts.

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use super::traits::{
    BaseAppointmentStore, BaseDonorStore, BaseInventoryService, BaseProcessStore,
};
use crate::domains::appointment::Appointment;
use crate::domains::donation::models::{
    DonationProcess, DonationStatus, HealthCheck, HealthCheckInput,
};
use crate::domains::donor::{Donor, NewDonor};
use crate::domains::inventory::BloodUnit;

pub struct PgDonorStore {
    pool: PgPool,
}

impl PgDonorStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BaseDonorStore for PgDonorStore {
    async fn find_donor(&self, id: Uuid) -> Result<Option<Donor>> {
        Donor::find_by_id(id, &self.pool).await
    }

    async fn create(&self, new: NewDonor) -> Result<Donor> {
        Donor::insert(&new, &self.pool).await
    }

    async fn save(&self, donor: &Donor) -> Result<Donor> {
        donor.save(&self.pool).await
    }
}

pub struct PgAppointmentStore {
    pool: PgPool,
}

impl PgAppointmentStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BaseAppointmentStore for PgAppointmentStore {
    async fn schedule(
        &self,
        process_id: Uuid,
        scheduled_at: DateTime<Utc>,
        location: &str,
    ) -> Result<Appointment> {
        Appointment::insert(process_id, scheduled_at, location, &self.pool).await
    }

    async fn find_latest_for_process(&self, process_id: Uuid) -> Result<Option<Appointment>> {
        Appointment::find_latest_for_process(process_id, &self.pool).await
    }
}

pub struct PgProcessStore {
    pool: PgPool,
}

impl PgProcessStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BaseProcessStore for PgProcessStore {
    async fn insert(&self, donor_id: Uuid) -> Result<DonationProcess> {
        DonationProcess::insert(donor_id, &self.pool).await
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<DonationProcess>> {
        DonationProcess::find_by_id(id, &self.pool).await
    }

    async fn find_by_donor(&self, donor_id: Uuid) -> Result<Vec<DonationProcess>> {
        DonationProcess::find_by_donor(donor_id, &self.pool).await
    }

    async fn find_all(&self) -> Result<Vec<DonationProcess>> {
        DonationProcess::find_all(&self.pool).await
    }

    async fn update_status_if(
        &self,
        id: Uuid,
        expected: DonationStatus,
        new_status: DonationStatus,
        note: Option<&str>,
    ) -> Result<Option<DonationProcess>> {
        DonationProcess::update_status_if(id, expected, new_status, note, &self.pool).await
    }

    async fn set_collected_if(
        &self,
        id: Uuid,
        expected: DonationStatus,
        volume_ml: i32,
        note: &str,
    ) -> Result<Option<DonationProcess>> {
        DonationProcess::set_collected_if(id, expected, volume_ml, note, &self.pool).await
    }

    async fn record_health_check(
        &self,
        id: Uuid,
        expected: DonationStatus,
        input: &HealthCheckInput,
        new_status: DonationStatus,
        note: &str,
    ) -> Result<Option<(DonationProcess, HealthCheck)>> {
        DonationProcess::record_health_check(id, expected, input, new_status, note, &self.pool)
            .await
    }

    async fn find_health_check(&self, process_id: Uuid) -> Result<Option<HealthCheck>> {
        HealthCheck::find_for_process(process_id, &self.pool).await
    }
}

pub struct PgInventoryService {
    pool: PgPool,
}

impl PgInventoryService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BaseInventoryService for PgInventoryService {
    async fn admit_unit(
        &self,
        process: &DonationProcess,
        unit_id: &str,
        blood_group: Option<&str>,
    ) -> Result<BloodUnit> {
        BloodUnit::insert(
            unit_id,
            process.id,
            blood_group,
            process.collected_volume_ml,
            &self.pool,
        )
        .await
    }
}
