//! Donor domain - the identity-store side of the donation lifecycle

pub mod models;

pub use models::donor::{Donor, NewDonor};
