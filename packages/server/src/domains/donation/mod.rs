//! Donation domain - the lifecycle core
//!
//! A donation process moves forward through a closed set of statuses:
//!
//! ```text
//! pending_approval -> {rejected | appointment_pending}
//! appointment_pending -> appointment_scheduled
//! appointment_scheduled -> {health_check_passed | health_check_failed}
//! health_check_passed -> blood_collected
//! blood_collected -> {completed | testing_failed}
//! ```
//!
//! Every mutation is guarded on the current status; guard and mutation are
//! applied as one compare-and-swap against the store, so concurrent
//! transitions on the same process id cannot both succeed.

pub mod actions;
pub mod data;
pub mod models;
pub mod notifications;

pub use models::{DonationProcess, DonationStatus, HealthCheck, HealthCheckInput};
