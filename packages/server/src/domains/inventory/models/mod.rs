pub mod blood_unit;

pub use blood_unit::BloodUnit;
