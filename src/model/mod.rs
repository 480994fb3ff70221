pub mod project;
pub mod role;
pub mod task;
pub mod timestamp;
pub mod user;

pub use project::Project;
pub use role::Role;
pub use task::Task;
pub use user::{UserId, UserRecord};
