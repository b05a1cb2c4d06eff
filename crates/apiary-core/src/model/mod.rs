//! Domain entities shared by the storage ports and the HTTP layer.

pub mod audit;
pub mod group;
pub mod project;
pub mod user;

pub use audit::{AuditKind, NewAuditEntry};
pub use group::{Group, GroupChanges, Member, NewGroup};
pub use project::Project;
pub use user::{UserProfile, UserSnapshot};
