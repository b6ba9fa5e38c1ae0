// Kernel - infrastructure seams and dependency wiring

pub mod deps;
pub mod mailer;
pub mod stores;
pub mod test_dependencies;
pub mod traits;

pub use deps::ServerDeps;
pub use mailer::{LogMailer, MailApiClient};
pub use stores::{PgAppointmentStore, PgDonorStore, PgInventoryService, PgProcessStore};
pub use traits::{
    BaseAppointmentStore, BaseDonorStore, BaseInventoryService, BaseMailer, BaseProcessStore,
};
