use anyhow::Result;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use super::donation_status::DonationStatus;
use super::health_check::{HealthCheck, HealthCheckInput};

/// Donation process model - SQL persistence layer
///
/// The aggregate root of the lifecycle. `note` is overwritten by every
/// transition; `collected_volume_ml` is written once at collection. Rows are
/// never deleted - a process is the permanent record of one donation
/// attempt.
#[derive(sqlx::FromRow, Debug, Clone)]
pub struct DonationProcess {
    pub id: Uuid,
    pub donor_id: Uuid,
    pub status: String, // Maps to DonationStatus
    pub note: Option<String>,
    pub collected_volume_ml: Option<i32>,
    pub created_at: DateTime<Utc>,
}

impl DonationProcess {
    /// Typed view of the status column.
    pub fn current_status(&self) -> Result<DonationStatus> {
        self.status.parse()
    }

    /// Open a new process in `pending_approval`
    pub async fn insert(donor_id: Uuid, pool: &PgPool) -> Result<Self> {
        sqlx::query_as::<_, Self>(
            "INSERT INTO donation_processes (donor_id, status)
             VALUES ($1, $2)
             RETURNING *",
        )
        .bind(donor_id)
        .bind(DonationStatus::PendingApproval.to_string())
        .fetch_one(pool)
        .await
        .map_err(Into::into)
    }

    /// Find process by ID
    pub async fn find_by_id(id: Uuid, pool: &PgPool) -> Result<Option<Self>> {
        sqlx::query_as::<_, Self>("SELECT * FROM donation_processes WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await
            .map_err(Into::into)
    }

    /// A donor's processes, newest first
    pub async fn find_by_donor(donor_id: Uuid, pool: &PgPool) -> Result<Vec<Self>> {
        sqlx::query_as::<_, Self>(
            "SELECT * FROM donation_processes
             WHERE donor_id = $1
             ORDER BY created_at DESC",
        )
        .bind(donor_id)
        .fetch_all(pool)
        .await
        .map_err(Into::into)
    }

    /// All processes, newest first
    pub async fn find_all(pool: &PgPool) -> Result<Vec<Self>> {
        sqlx::query_as::<_, Self>("SELECT * FROM donation_processes ORDER BY created_at DESC")
            .fetch_all(pool)
            .await
            .map_err(Into::into)
    }

    /// Guarded status transition.
    ///
    /// The WHERE clause compares the stored status, so of two racing
    /// transitions on one process only one row update succeeds; the loser
    /// gets `None` and must surface a state-precondition failure.
    pub async fn update_status_if(
        id: Uuid,
        expected: DonationStatus,
        new_status: DonationStatus,
        note: Option<&str>,
        pool: &PgPool,
    ) -> Result<Option<Self>> {
        sqlx::query_as::<_, Self>(
            "UPDATE donation_processes
             SET status = $3, note = $4
             WHERE id = $1 AND status = $2
             RETURNING *",
        )
        .bind(id)
        .bind(expected.to_string())
        .bind(new_status.to_string())
        .bind(note)
        .fetch_optional(pool)
        .await
        .map_err(Into::into)
    }

    /// Guarded collection step: sets the volume once and moves to
    /// `blood_collected`.
    pub async fn set_collected_if(
        id: Uuid,
        expected: DonationStatus,
        volume_ml: i32,
        note: &str,
        pool: &PgPool,
    ) -> Result<Option<Self>> {
        sqlx::query_as::<_, Self>(
            "UPDATE donation_processes
             SET status = $3, collected_volume_ml = $4, note = $5
             WHERE id = $1 AND status = $2
             RETURNING *",
        )
        .bind(id)
        .bind(expected.to_string())
        .bind(DonationStatus::BloodCollected.to_string())
        .bind(volume_ml)
        .bind(note)
        .fetch_optional(pool)
        .await
        .map_err(Into::into)
    }

    /// Guarded screening step: status transition and health-check upsert in
    /// one transaction, so the guard and the sub-record write cannot be
    /// interleaved with another transition on the same process.
    pub async fn record_health_check(
        id: Uuid,
        expected: DonationStatus,
        input: &HealthCheckInput,
        new_status: DonationStatus,
        note: &str,
        pool: &PgPool,
    ) -> Result<Option<(Self, HealthCheck)>> {
        let mut tx = pool.begin().await?;

        let process = sqlx::query_as::<_, Self>(
            "UPDATE donation_processes
             SET status = $3, note = $4
             WHERE id = $1 AND status = $2
             RETURNING *",
        )
        .bind(id)
        .bind(expected.to_string())
        .bind(new_status.to_string())
        .bind(note)
        .fetch_optional(&mut *tx)
        .await?;

        let Some(process) = process else {
            tx.rollback().await?;
            return Ok(None);
        };

        let health_check = HealthCheck::upsert(id, input, &mut tx).await?;
        tx.commit().await?;

        Ok(Some((process, health_check)))
    }
}
