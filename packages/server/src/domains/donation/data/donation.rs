use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domains::appointment::Appointment;
use crate::domains::donation::models::{DonationProcess, DonationStatus, HealthCheck};
use crate::domains::donor::Donor;

/// Public API representation of a donation process.
///
/// Denormalized view: the process's own fields plus a donor summary and the
/// appointment/health-check summaries when they exist. Absent sub-objects
/// are absent fields, never errors. Every field is mapped by hand - no
/// blanket property copying.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DonationProcessData {
    pub id: Uuid,
    pub status: DonationStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub collected_volume_ml: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub donor: DonorData,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub appointment: Option<AppointmentData>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub health_check: Option<HealthCheckData>,
}

/// Donor summary attached to every process view
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DonorData {
    pub id: Uuid,
    pub email: String,
    pub full_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blood_group: Option<String>,
    pub is_ready_to_donate: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_donation_date: Option<NaiveDate>,
}

/// Appointment summary
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppointmentData {
    pub id: Uuid,
    pub scheduled_at: DateTime<Utc>,
    pub location: String,
}

/// Health check summary
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthCheckData {
    pub id: Uuid,
    pub is_eligible: bool,
    pub blood_pressure_systolic: i32,
    pub blood_pressure_diastolic: i32,
    pub hemoglobin_level: f64,
    pub weight: f64,
    pub heart_rate: i32,
    pub temperature: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub check_date: DateTime<Utc>,
}

impl From<&Donor> for DonorData {
    fn from(donor: &Donor) -> Self {
        Self {
            id: donor.id,
            email: donor.email.clone(),
            full_name: donor.full_name.clone(),
            blood_group: donor.blood_group.clone(),
            is_ready_to_donate: donor.is_ready_to_donate,
            last_donation_date: donor.last_donation_date,
        }
    }
}

impl From<&Appointment> for AppointmentData {
    fn from(appointment: &Appointment) -> Self {
        Self {
            id: appointment.id,
            scheduled_at: appointment.scheduled_at,
            location: appointment.location.clone(),
        }
    }
}

impl From<&HealthCheck> for HealthCheckData {
    fn from(check: &HealthCheck) -> Self {
        Self {
            id: check.id,
            is_eligible: check.is_eligible,
            blood_pressure_systolic: check.blood_pressure_systolic,
            blood_pressure_diastolic: check.blood_pressure_diastolic,
            hemoglobin_level: check.hemoglobin_level,
            weight: check.weight,
            heart_rate: check.heart_rate,
            temperature: check.temperature,
            notes: check.notes.clone(),
            check_date: check.check_date,
        }
    }
}

impl DonationProcessData {
    pub fn assemble(
        process: &DonationProcess,
        donor: &Donor,
        appointment: Option<&Appointment>,
        health_check: Option<&HealthCheck>,
    ) -> anyhow::Result<Self> {
        Ok(Self {
            id: process.id,
            status: process.current_status()?,
            note: process.note.clone(),
            collected_volume_ml: process.collected_volume_ml,
            created_at: process.created_at,
            donor: DonorData::from(donor),
            appointment: appointment.map(AppointmentData::from),
            health_check: health_check.map(HealthCheckData::from),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn donor() -> Donor {
        Donor {
            id: Uuid::new_v4(),
            email: "donor@example.org".into(),
            full_name: "Alex Donor".into(),
            blood_group: None,
            is_ready_to_donate: true,
            last_donation_date: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn absent_sub_objects_are_absent_fields() {
        let process = DonationProcess {
            id: Uuid::new_v4(),
            donor_id: Uuid::new_v4(),
            status: "pending_approval".into(),
            note: None,
            collected_volume_ml: None,
            created_at: Utc::now(),
        };

        let data = DonationProcessData::assemble(&process, &donor(), None, None).unwrap();
        assert_eq!(data.status, DonationStatus::PendingApproval);

        let json = serde_json::to_value(&data).unwrap();
        assert!(json.get("appointment").is_none());
        assert!(json.get("health_check").is_none());
        assert!(json.get("note").is_none());
        assert_eq!(json["status"], "pending_approval");
    }

    #[test]
    fn corrupt_status_is_an_error_not_a_panic() {
        let process = DonationProcess {
            id: Uuid::new_v4(),
            donor_id: Uuid::new_v4(),
            status: "garbage".into(),
            note: None,
            collected_volume_ml: None,
            created_at: Utc::now(),
        };

        assert!(DonationProcessData::assemble(&process, &donor(), None, None).is_err());
    }
}
