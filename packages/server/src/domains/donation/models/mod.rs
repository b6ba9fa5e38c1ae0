pub mod donation_process;
pub mod donation_status;
pub mod health_check;

pub use donation_process::DonationProcess;
pub use donation_status::DonationStatus;
pub use health_check::{HealthCheck, HealthCheckInput};
