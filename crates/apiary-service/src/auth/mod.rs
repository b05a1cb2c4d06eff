//! Authentication and authorization flow.
//!
//! ## Module Organization
//!
//! - `action`: Actions checked against a caller's group role (`view`, `edit`, `danger`)
//! - `authenticate`: Caller resolution (single user, trusted header)
//! - `caller`: The authenticated caller and its depot representation
//! - `casbin`: Casbin enforcer initialization from the embedded model and policy
//! - `depot`: Helpers for extracting the caller from Salvo requests
//! - `resolver`: Group role resolution port and its store-backed implementation
//! - `service`: Role/action enforcement (`Authorizer`)

pub mod action;
pub mod authenticate;
pub mod caller;
pub mod casbin;
pub mod depot;
pub mod resolver;
pub mod service;

#[cfg(test)]
mod casbin_test;

pub use action::Action;
pub use caller::{Caller, DepotUser};
pub use depot::get_caller_from_depot;
pub use resolver::{GroupRoleResolver, RoleResolver, role_in_group};
pub use service::{Authorizer, AuthzResult};
