// Infrastructure: dependency container, service traits, background tasks
pub mod deps;
pub mod scheduled_tasks;
pub mod test_dependencies;
pub mod traits;

pub use deps::{MailerAdapter, ServerDeps};
pub use scheduled_tasks::start_scheduler;
pub use test_dependencies::MockMailer;
pub use traits::*;
