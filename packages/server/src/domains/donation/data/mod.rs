pub mod donation;

pub use donation::{AppointmentData, DonationProcessData, DonorData, HealthCheckData};
