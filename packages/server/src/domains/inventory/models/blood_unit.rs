use anyhow::Result;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

/// Blood unit model - SQL persistence layer
///
/// One row per unit admitted to inventory after a clean laboratory panel.
/// `unit_id` is the externally printed bag label and must be unique.
#[derive(sqlx::FromRow, Debug, Clone)]
pub struct BloodUnit {
    pub id: Uuid,
    pub unit_id: String,
    pub process_id: Uuid,
    pub blood_group: Option<String>,
    pub volume_ml: Option<i32>,
    pub admitted_at: DateTime<Utc>,
}

impl BloodUnit {
    /// Admit a unit into inventory
    pub async fn insert(
        unit_id: &str,
        process_id: Uuid,
        blood_group: Option<&str>,
        volume_ml: Option<i32>,
        pool: &PgPool,
    ) -> Result<Self> {
        sqlx::query_as::<_, Self>(
            "INSERT INTO blood_units (unit_id, process_id, blood_group, volume_ml)
             VALUES ($1, $2, $3, $4)
             RETURNING *",
        )
        .bind(unit_id)
        .bind(process_id)
        .bind(blood_group)
        .bind(volume_ml)
        .fetch_one(pool)
        .await
        .map_err(Into::into)
    }

    /// Find a unit by its bag label
    pub async fn find_by_unit_id(unit_id: &str, pool: &PgPool) -> Result<Option<Self>> {
        sqlx::query_as::<_, Self>("SELECT * FROM blood_units WHERE unit_id = $1")
            .bind(unit_id)
            .fetch_optional(pool)
            .await
            .map_err(Into::into)
    }

    /// All admitted units, newest first
    pub async fn find_all(pool: &PgPool) -> Result<Vec<Self>> {
        sqlx::query_as::<_, Self>("SELECT * FROM blood_units ORDER BY admitted_at DESC")
            .fetch_all(pool)
            .await
            .map_err(Into::into)
    }
}
