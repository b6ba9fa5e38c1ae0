pub mod donor;

pub use donor::{Donor, NewDonor};
