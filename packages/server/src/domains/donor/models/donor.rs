use anyhow::Result;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::PgPool;
use uuid::Uuid;

/// Donor model - SQL persistence layer
///
/// `is_ready_to_donate` and `last_donation_date` are the eligibility flags
/// the lifecycle updates when a donation completes. `blood_group` stays
/// unset until the laboratory determines it.
#[derive(sqlx::FromRow, Debug, Clone)]
pub struct Donor {
    pub id: Uuid,
    pub email: String,
    pub full_name: String,
    pub blood_group: Option<String>,
    pub is_ready_to_donate: bool,
    pub last_donation_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
}

/// Fields required to register a donor
#[derive(Debug, Clone)]
pub struct NewDonor {
    pub email: String,
    pub full_name: String,
    pub blood_group: Option<String>,
}

impl Donor {
    /// Find donor by ID
    pub async fn find_by_id(id: Uuid, pool: &PgPool) -> Result<Option<Self>> {
        sqlx::query_as::<_, Self>("SELECT * FROM donors WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await
            .map_err(Into::into)
    }

    /// Insert new donor
    pub async fn insert(new: &NewDonor, pool: &PgPool) -> Result<Self> {
        sqlx::query_as::<_, Self>(
            "INSERT INTO donors (email, full_name, blood_group)
             VALUES ($1, $2, $3)
             RETURNING *",
        )
        .bind(&new.email)
        .bind(&new.full_name)
        .bind(&new.blood_group)
        .fetch_one(pool)
        .await
        .map_err(Into::into)
    }

    /// Persist the donor's mutable fields
    pub async fn save(&self, pool: &PgPool) -> Result<Self> {
        sqlx::query_as::<_, Self>(
            "UPDATE donors
             SET email = $2,
                 full_name = $3,
                 blood_group = $4,
                 is_ready_to_donate = $5,
                 last_donation_date = $6
             WHERE id = $1
             RETURNING *",
        )
        .bind(self.id)
        .bind(&self.email)
        .bind(&self.full_name)
        .bind(&self.blood_group)
        .bind(self.is_ready_to_donate)
        .bind(self.last_donation_date)
        .fetch_one(pool)
        .await
        .map_err(Into::into)
    }
}
