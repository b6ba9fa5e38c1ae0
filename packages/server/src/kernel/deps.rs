//! Server dependencies (using traits for testability)
//!
//! The central dependency container used by all lifecycle actions. Every
//! collaborator is an `Arc<dyn Base*>` so tests can swap in the in-memory
//! doubles from `test_dependencies`.

use std::sync::Arc;

use sqlx::PgPool;

use super::stores::{PgAppointmentStore, PgDonorStore, PgInventoryService, PgProcessStore};
use super::traits::{
    BaseAppointmentStore, BaseDonorStore, BaseInventoryService, BaseMailer, BaseProcessStore,
};

/// Collaborators the donation lifecycle depends on
#[derive(Clone)]
pub struct ServerDeps {
    pub donors: Arc<dyn BaseDonorStore>,
    pub appointments: Arc<dyn BaseAppointmentStore>,
    pub processes: Arc<dyn BaseProcessStore>,
    pub inventory: Arc<dyn BaseInventoryService>,
    pub mailer: Arc<dyn BaseMailer>,
}

impl ServerDeps {
    pub fn new(
        donors: Arc<dyn BaseDonorStore>,
        appointments: Arc<dyn BaseAppointmentStore>,
        processes: Arc<dyn BaseProcessStore>,
        inventory: Arc<dyn BaseInventoryService>,
        mailer: Arc<dyn BaseMailer>,
    ) -> Self {
        Self {
            donors,
            appointments,
            processes,
            inventory,
            mailer,
        }
    }

    /// Production wiring: every store backed by the shared Postgres pool.
    pub fn postgres(pool: PgPool, mailer: Arc<dyn BaseMailer>) -> Self {
        Self {
            donors: Arc::new(PgDonorStore::new(pool.clone())),
            appointments: Arc::new(PgAppointmentStore::new(pool.clone())),
            processes: Arc::new(PgProcessStore::new(pool.clone())),
            inventory: Arc::new(PgInventoryService::new(pool)),
            mailer,
        }
    }
}
