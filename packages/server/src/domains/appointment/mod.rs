//! Appointment domain - visit scheduling for approved donation requests

pub mod models;

pub use models::appointment::Appointment;
