//! Inventory domain - admitted blood units

pub mod models;

pub use models::blood_unit::BloodUnit;
