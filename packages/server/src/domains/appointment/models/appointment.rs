use anyhow::Result;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

/// Appointment model - SQL persistence layer
///
/// Owned by the appointment subsystem; the donation lifecycle only reads it
/// (most recently scheduled visit wins when composing notifications).
#[derive(sqlx::FromRow, Debug, Clone)]
pub struct Appointment {
    pub id: Uuid,
    pub process_id: Uuid,
    pub scheduled_at: DateTime<Utc>,
    pub location: String,
    pub created_at: DateTime<Utc>,
}

impl Appointment {
    /// Insert a new appointment for a donation process
    pub async fn insert(
        process_id: Uuid,
        scheduled_at: DateTime<Utc>,
        location: &str,
        pool: &PgPool,
    ) -> Result<Self> {
        sqlx::query_as::<_, Self>(
            "INSERT INTO appointments (process_id, scheduled_at, location)
             VALUES ($1, $2, $3)
             RETURNING *",
        )
        .bind(process_id)
        .bind(scheduled_at)
        .bind(location)
        .fetch_one(pool)
        .await
        .map_err(Into::into)
    }

    /// Most recently scheduled appointment for a process, if any
    pub async fn find_latest_for_process(process_id: Uuid, pool: &PgPool) -> Result<Option<Self>> {
        sqlx::query_as::<_, Self>(
            "SELECT * FROM appointments
             WHERE process_id = $1
             ORDER BY scheduled_at DESC
             LIMIT 1",
        )
        .bind(process_id)
        .fetch_optional(pool)
        .await
        .map_err(Into::into)
    }
}
