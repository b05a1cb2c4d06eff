//! Resolution of a caller's role inside a group.

use std::sync::Arc;

use salvo::async_trait;

use apiary_core::model::Group;
use apiary_core::types::{GroupId, GroupRole};

use crate::error::ServiceResult;
use crate::store::GroupStore;

use super::{Action, Authorizer, Caller};

/// ## Summary
/// Computes the role of `caller` relative to `group`.
///
/// Global admins resolve to `Admin`, the creator to `Owner`, listed members to
/// their member role and everyone else (including callers of a missing group)
/// to `Member`.
#[must_use]
pub fn role_in_group(caller: &Caller, group: Option<&Group>) -> GroupRole {
    if caller.is_admin() {
        return GroupRole::Admin;
    }

    let Some(group) = group else {
        return GroupRole::Member;
    };

    if group.uid == caller.uid {
        return GroupRole::Owner;
    }

    group
        .member(caller.uid)
        .map_or(GroupRole::Member, |member| member.role.into())
}

/// Role lookups and action checks for group endpoints.
#[async_trait]
pub trait RoleResolver: Send + Sync {
    /// ## Errors
    /// Returns the store error if the group cannot be loaded.
    async fn group_role(&self, caller: &Caller, id: GroupId) -> ServiceResult<GroupRole>;

    /// ## Summary
    /// Returns whether `caller` may perform `action` on group `id`.
    ///
    /// ## Errors
    /// Returns the store error or a casbin evaluation error.
    async fn check(&self, caller: &Caller, id: GroupId, action: Action) -> ServiceResult<bool>;
}

/// Store-backed resolver enforcing actions through casbin.
pub struct GroupRoleResolver {
    groups: Arc<dyn GroupStore>,
    authorizer: Authorizer,
}

impl GroupRoleResolver {
    #[must_use]
    pub fn new(groups: Arc<dyn GroupStore>, authorizer: Authorizer) -> Self {
        Self { groups, authorizer }
    }
}

#[async_trait]
impl RoleResolver for GroupRoleResolver {
    async fn group_role(&self, caller: &Caller, id: GroupId) -> ServiceResult<GroupRole> {
        if caller.is_admin() {
            return Ok(GroupRole::Admin);
        }

        let group = self.groups.get(id).await?;
        Ok(role_in_group(caller, group.as_ref()))
    }

    #[tracing::instrument(skip(self, caller), fields(uid = caller.uid))]
    async fn check(&self, caller: &Caller, id: GroupId, action: Action) -> ServiceResult<bool> {
        let role = self.group_role(caller, id).await?;
        Ok(self.authorizer.check(role, action)?.is_allowed())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use apiary_core::model::Member;
    use apiary_core::types::{GroupType, MemberRole, UserRole};
    use chrono::Utc;

    fn caller(uid: i32, role: UserRole) -> Caller {
        Caller {
            uid,
            username: format!("user{uid}"),
            email: format!("user{uid}@example.com"),
            role,
        }
    }

    fn group() -> Group {
        Group {
            id: 1,
            group_name: "platform".to_string(),
            group_desc: None,
            uid: 10,
            group_type: GroupType::Normal,
            add_time: Utc::now(),
            up_time: Utc::now(),
            members: vec![Member {
                uid: 11,
                role: MemberRole::Guest,
                username: "user11".to_string(),
                email: "user11@example.com".to_string(),
            }],
        }
    }

    #[test]
    fn role_tiers() {
        let g = group();

        assert_eq!(role_in_group(&caller(1, UserRole::Admin), Some(&g)), GroupRole::Admin);
        assert_eq!(role_in_group(&caller(10, UserRole::Member), Some(&g)), GroupRole::Owner);
        assert_eq!(role_in_group(&caller(11, UserRole::Member), Some(&g)), GroupRole::Guest);
        assert_eq!(role_in_group(&caller(12, UserRole::Member), Some(&g)), GroupRole::Member);
        assert_eq!(role_in_group(&caller(10, UserRole::Member), None), GroupRole::Member);
    }
}
