//! HTTP-layer tests: routing, staff gating, edge validation, and error-code
//! mapping, exercised with `tower::ServiceExt::oneshot` against the real
//! router wired to in-memory dependencies.

mod common;

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use common::{process_health_passed, process_scheduled, register_donor};
use server_core::kernel::test_dependencies::TestDeps;
use server_core::server::app::{build_app, AppState};

const STAFF_TOKEN: &str = "staff-secret";

fn app(deps: &TestDeps) -> Router {
    let state = AppState {
        deps: Arc::new(deps.deps.clone()),
        db_pool: None,
        staff_api_token: STAFF_TOKEN.to_string(),
    };
    build_app(state, vec![])
}

async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    let request = match body {
        Some(v) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(v.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, value)
}

#[tokio::test]
async fn health_endpoint_reports_ok_without_a_database() {
    let deps = TestDeps::new();
    let app = app(&deps);

    let (status, body) = send(&app, "GET", "/health", None, None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["database"]["status"], "not_configured");
}

#[tokio::test]
async fn staff_routes_require_the_bearer_token() {
    let deps = TestDeps::new();
    let app = app(&deps);

    let (status, _) = send(&app, "GET", "/api/staff/donations/requests", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = send(
        &app,
        "GET",
        "/api/staff/donations/requests",
        Some("wrong-token"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, body) = send(
        &app,
        "GET",
        "/api/staff/donations/requests",
        Some(STAFF_TOKEN),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn full_lifecycle_over_http() {
    let deps = TestDeps::new();
    let app = app(&deps);

    // Register a donor
    let (status, donor) = send(
        &app,
        "POST",
        "/api/donors",
        None,
        Some(json!({ "email": "donor@example.org", "full_name": "Alex Donor", "blood_group": "O+" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let donor_id = donor["id"].as_str().unwrap().to_string();

    // Donor requests to donate
    let (status, process) = send(
        &app,
        "POST",
        "/api/donations/request",
        None,
        Some(json!({ "donor_id": donor_id })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(process["status"], "pending_approval");
    let process_id = process["id"].as_str().unwrap().to_string();

    // Staff approves
    let (status, process) = send(
        &app,
        "PUT",
        &format!("/api/staff/donations/{}/status", process_id),
        Some(STAFF_TOKEN),
        Some(json!({ "new_status": "appointment_pending", "note": "Approved" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(process["status"], "appointment_pending");

    // Staff schedules the visit
    let (status, process) = send(
        &app,
        "POST",
        &format!("/api/staff/donations/{}/appointment", process_id),
        Some(STAFF_TOKEN),
        Some(json!({ "scheduled_at": "2025-06-01T09:00:00Z", "location": "Central Clinic" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(process["status"], "appointment_scheduled");
    assert_eq!(process["appointment"]["location"], "Central Clinic");

    // Screening passes
    let (status, process) = send(
        &app,
        "POST",
        &format!("/api/staff/donations/{}/health-check", process_id),
        Some(STAFF_TOKEN),
        Some(json!({
            "is_eligible": true,
            "blood_pressure_systolic": 120,
            "blood_pressure_diastolic": 80,
            "hemoglobin_level": 14.2,
            "weight": 70.0,
            "heart_rate": 72,
            "temperature": 36.6
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(process["status"], "health_check_passed");
    assert_eq!(process["health_check"]["is_eligible"], true);

    // Blood drawn
    let (status, process) = send(
        &app,
        "POST",
        &format!("/api/staff/donations/{}/collect", process_id),
        Some(STAFF_TOKEN),
        Some(json!({ "collected_volume_ml": 450 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(process["status"], "blood_collected");
    assert_eq!(process["collected_volume_ml"], 450);

    // Clean panel closes it out
    let (status, process) = send(
        &app,
        "POST",
        &format!("/api/staff/donations/{}/test-result", process_id),
        Some(STAFF_TOKEN),
        Some(json!({ "is_safe": true, "blood_unit_id": "U1" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(process["status"], "completed");

    assert_eq!(deps.inventory.admit_calls().len(), 1);
    assert_eq!(deps.mailer.sent().len(), 1);

    // The donor sees the finished donation in their history
    let (status, history) = send(
        &app,
        "GET",
        &format!("/api/donations/history/{}", donor_id),
        None,
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let history = history.as_array().unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0]["status"], "completed");
    assert_eq!(history[0]["donor"]["is_ready_to_donate"], false);
}

#[tokio::test]
async fn out_of_range_vitals_are_rejected_at_the_edge() {
    let deps = TestDeps::new();
    let donor = register_donor(&deps, "donor@example.org", None).await;
    let process = process_scheduled(&deps, &donor).await;
    let app = app(&deps);

    let (status, body) = send(
        &app,
        "POST",
        &format!("/api/staff/donations/{}/health-check", process.id),
        Some(STAFF_TOKEN),
        Some(json!({
            "is_eligible": true,
            "blood_pressure_systolic": 250,
            "blood_pressure_diastolic": 80,
            "hemoglobin_level": 14.2,
            "weight": 70.0,
            "heart_rate": 72,
            "temperature": 36.6
        })),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["error"].as_str().unwrap().contains("Systolic"));

    // The guard never ran; the process is still scheduled.
    let stored = deps
        .deps
        .processes
        .find_by_id(process.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.status, "appointment_scheduled");
}

#[tokio::test]
async fn non_positive_volume_is_rejected_at_the_edge() {
    let deps = TestDeps::new();
    let donor = register_donor(&deps, "donor@example.org", None).await;
    let process = process_health_passed(&deps, &donor).await;
    let app = app(&deps);

    let (status, _) = send(
        &app,
        "POST",
        &format!("/api/staff/donations/{}/collect", process.id),
        Some(STAFF_TOKEN),
        Some(json!({ "collected_volume_ml": 0 })),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn wrong_state_maps_to_conflict() {
    let deps = TestDeps::new();
    let donor = register_donor(&deps, "donor@example.org", None).await;
    let process = process_scheduled(&deps, &donor).await;
    let app = app(&deps);

    // Collecting before the screening is a state-precondition failure.
    let (status, body) = send(
        &app,
        "POST",
        &format!("/api/staff/donations/{}/collect", process.id),
        Some(STAFF_TOKEN),
        Some(json!({ "collected_volume_ml": 450 })),
    )
    .await;

    assert_eq!(status, StatusCode::CONFLICT);
    let message = body["error"].as_str().unwrap();
    assert!(message.contains("health_check_passed"));
    assert!(message.contains("appointment_scheduled"));
}

#[tokio::test]
async fn unknown_process_maps_to_not_found() {
    let deps = TestDeps::new();
    let app = app(&deps);

    let (status, _) = send(
        &app,
        "POST",
        &format!("/api/staff/donations/{}/collect", uuid::Uuid::new_v4()),
        Some(STAFF_TOKEN),
        Some(json!({ "collected_volume_ml": 450 })),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}
