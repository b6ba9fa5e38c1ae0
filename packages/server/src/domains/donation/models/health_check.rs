use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{Postgres, Transaction};
use uuid::Uuid;

/// Health check model - SQL persistence layer
///
/// One-to-one sub-record owned by its donation process (`process_id` is
/// unique). The first screening creates the row; repeated screenings update
/// it in place. `check_date` is set at creation and never changes.
#[derive(sqlx::FromRow, Debug, Clone)]
pub struct HealthCheck {
    pub id: Uuid,
    pub process_id: Uuid,
    pub is_eligible: bool,
    pub blood_pressure_systolic: i32,
    pub blood_pressure_diastolic: i32,
    pub hemoglobin_level: f64,
    pub weight: f64,
    pub heart_rate: i32,
    pub temperature: f64,
    pub notes: Option<String>,
    pub check_date: DateTime<Utc>,
}

/// Screening measurements as submitted by medical staff
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthCheckInput {
    pub is_eligible: bool,
    pub blood_pressure_systolic: i32,
    pub blood_pressure_diastolic: i32,
    pub hemoglobin_level: f64,
    pub weight: f64,
    pub heart_rate: i32,
    pub temperature: f64,
    pub notes: Option<String>,
}

impl HealthCheckInput {
    /// Range checks for the vital signs, mirroring the intake form limits.
    pub fn validate(&self) -> Result<(), String> {
        if !(90..=180).contains(&self.blood_pressure_systolic) {
            return Err("Systolic pressure must be between 90 and 180 mmHg".into());
        }
        if !(60..=100).contains(&self.blood_pressure_diastolic) {
            return Err("Diastolic pressure must be between 60 and 100 mmHg".into());
        }
        if !(12.0..=18.5).contains(&self.hemoglobin_level) {
            return Err("Hemoglobin level must be between 12.0 and 18.5 g/dL".into());
        }
        if self.weight < 45.0 {
            return Err("Weight must be at least 45 kg".into());
        }
        if !(50..=100).contains(&self.heart_rate) {
            return Err("Heart rate must be between 50 and 100 bpm".into());
        }
        if !(36.0..=37.5).contains(&self.temperature) {
            return Err("Temperature must be between 36.0 and 37.5 \u{b0}C".into());
        }
        Ok(())
    }
}

impl HealthCheck {
    /// Create or update the single health check for a process.
    ///
    /// `check_date` is written only on insert; the conflict arm leaves it
    /// untouched.
    pub async fn upsert(
        process_id: Uuid,
        input: &HealthCheckInput,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<Self> {
        sqlx::query_as::<_, Self>(
            "INSERT INTO health_checks (
                process_id,
                is_eligible,
                blood_pressure_systolic,
                blood_pressure_diastolic,
                hemoglobin_level,
                weight,
                heart_rate,
                temperature,
                notes
             )
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
             ON CONFLICT (process_id) DO UPDATE SET
                is_eligible = EXCLUDED.is_eligible,
                blood_pressure_systolic = EXCLUDED.blood_pressure_systolic,
                blood_pressure_diastolic = EXCLUDED.blood_pressure_diastolic,
                hemoglobin_level = EXCLUDED.hemoglobin_level,
                weight = EXCLUDED.weight,
                heart_rate = EXCLUDED.heart_rate,
                temperature = EXCLUDED.temperature,
                notes = EXCLUDED.notes
             RETURNING *",
        )
        .bind(process_id)
        .bind(input.is_eligible)
        .bind(input.blood_pressure_systolic)
        .bind(input.blood_pressure_diastolic)
        .bind(input.hemoglobin_level)
        .bind(input.weight)
        .bind(input.heart_rate)
        .bind(input.temperature)
        .bind(&input.notes)
        .fetch_one(&mut **tx)
        .await
        .map_err(Into::into)
    }

    /// The health check attached to a process, if screening has happened
    pub async fn find_for_process(process_id: Uuid, pool: &sqlx::PgPool) -> Result<Option<Self>> {
        sqlx::query_as::<_, Self>("SELECT * FROM health_checks WHERE process_id = $1")
            .bind(process_id)
            .fetch_optional(pool)
            .await
            .map_err(Into::into)
    }
}
