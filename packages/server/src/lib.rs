// LifeDrop - blood donation coordination backend
//
// This crate provides the backend API for tracking blood donations from a
// donor's initial request through screening, collection, laboratory testing,
// and inventory admission.
//
// The donation lifecycle state machine lives in domains/donation; external
// collaborators (donor identity, appointments, inventory, mail) sit behind
// the trait seams in kernel/.

pub mod common;
pub mod config;
pub mod domains;
pub mod kernel;
pub mod server;

pub use config::*;
