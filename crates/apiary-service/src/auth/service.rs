//! Role/action enforcement backed by Casbin.

use std::sync::Arc;

use casbin::CoreApi;

use apiary_core::types::GroupRole;

use crate::error::{ServiceError, ServiceResult};

use super::action::Action;

/// Result of an authorization check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthzResult {
    /// Access is allowed.
    Allowed,
    /// Access is denied.
    Denied,
}

impl AuthzResult {
    /// Returns `true` if access is allowed.
    #[must_use]
    pub const fn is_allowed(&self) -> bool {
        matches!(self, Self::Allowed)
    }
}

/// Checks whether a group role may perform an action.
#[derive(Clone)]
pub struct Authorizer {
    enforcer: Arc<casbin::Enforcer>,
}

impl Authorizer {
    /// Create a new authorizer with the given Casbin enforcer.
    #[must_use]
    pub fn new(enforcer: Arc<casbin::Enforcer>) -> Self {
        Self { enforcer }
    }

    /// ## Errors
    ///
    /// Returns `CasbinError` if Casbin evaluation fails.
    pub fn check(&self, role: GroupRole, action: Action) -> ServiceResult<AuthzResult> {
        let allowed = self
            .enforcer
            .enforce((role.as_str(), action.as_casbin_action()))
            .map_err(ServiceError::CasbinError)?;

        tracing::debug!(
            role = %role,
            action = %action,
            allowed = allowed,
            "Authorization check"
        );

        Ok(if allowed {
            AuthzResult::Allowed
        } else {
            AuthzResult::Denied
        })
    }
}
