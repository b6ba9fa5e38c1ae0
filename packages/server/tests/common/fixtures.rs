//! Shared fixtures: in-memory dependencies and processes driven to a given
//! lifecycle stage through the real actions.

use chrono::{TimeZone, Utc};

use server_core::domains::donation::actions;
use server_core::domains::donation::data::DonationProcessData;
use server_core::domains::donation::models::{DonationStatus, HealthCheckInput};
use server_core::domains::donor::{Donor, NewDonor};
use server_core::kernel::test_dependencies::TestDeps;

pub const CLINIC: &str = "Central Clinic";

pub async fn register_donor(deps: &TestDeps, email: &str, blood_group: Option<&str>) -> Donor {
    deps.deps
        .donors
        .create(NewDonor {
            email: email.to_string(),
            full_name: "Alex Donor".to_string(),
            blood_group: blood_group.map(str::to_string),
        })
        .await
        .unwrap()
}

pub fn passing_vitals() -> HealthCheckInput {
    HealthCheckInput {
        is_eligible: true,
        blood_pressure_systolic: 120,
        blood_pressure_diastolic: 80,
        hemoglobin_level: 14.2,
        weight: 70.0,
        heart_rate: 72,
        temperature: 36.6,
        notes: None,
    }
}

pub fn failing_vitals(notes: &str) -> HealthCheckInput {
    HealthCheckInput {
        is_eligible: false,
        notes: Some(notes.to_string()),
        ..passing_vitals()
    }
}

/// New process straight from the donor's request (`pending_approval`)
pub async fn process_pending(deps: &TestDeps, donor: &Donor) -> DonationProcessData {
    actions::create_donation_request(donor.id, &deps.deps)
        .await
        .unwrap()
}

/// Process approved and with a visit on the books (`appointment_scheduled`)
pub async fn process_scheduled(deps: &TestDeps, donor: &Donor) -> DonationProcessData {
    let process = process_pending(deps, donor).await;
    actions::update_donation_status(
        process.id,
        DonationStatus::AppointmentPending,
        Some("Approved".to_string()),
        &deps.deps,
    )
    .await
    .unwrap();
    actions::schedule_appointment(
        process.id,
        Utc.with_ymd_and_hms(2025, 6, 1, 9, 0, 0).unwrap(),
        CLINIC,
        &deps.deps,
    )
    .await
    .unwrap()
}

/// Process past a clean screening (`health_check_passed`)
pub async fn process_health_passed(deps: &TestDeps, donor: &Donor) -> DonationProcessData {
    let process = process_scheduled(deps, donor).await;
    actions::record_health_check(process.id, passing_vitals(), &deps.deps)
        .await
        .unwrap()
}

/// Process with blood in the bag (`blood_collected`, 450 ml)
pub async fn process_collected(deps: &TestDeps, donor: &Donor) -> DonationProcessData {
    let process = process_health_passed(deps, donor).await;
    actions::mark_blood_collected(process.id, 450, &deps.deps)
        .await
        .unwrap()
}
