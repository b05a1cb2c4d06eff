//! Storage ports used by the group service.
//!
//! Each port is an object-safe async trait so that the Postgres adapters and
//! the in-memory adapters can be swapped behind an `Arc<dyn ...>`.

use salvo::async_trait;
use serde::Serialize;

use apiary_core::model::{Group, GroupChanges, Member, NewGroup, Project, UserProfile};
use apiary_core::types::{GroupId, MemberRole, ProjectId, UserId};

use crate::error::ServiceResult;

#[cfg(any(test, feature = "memory-store"))]
pub mod memory;
pub mod pg;

/// Outcome of a write that targets existing records.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct UpdateResult {
    pub matched: u64,
    pub modified: u64,
}

/// Outcome of a delete.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DeleteResult {
    pub deleted: u64,
}

#[async_trait]
pub trait GroupStore: Send + Sync {
    async fn get(&self, id: GroupId) -> ServiceResult<Option<Group>>;

    async fn find_private(&self, uid: UserId) -> ServiceResult<Option<Group>>;

    /// All groups in store (creation) order.
    async fn list(&self) -> ServiceResult<Vec<Group>>;

    async fn count_by_name(&self, name: &str) -> ServiceResult<u64>;

    async fn find_member(&self, id: GroupId, uid: UserId) -> ServiceResult<Option<Member>>;

    async fn create(&self, group: NewGroup) -> ServiceResult<Group>;

    /// Appends members, skipping uids already present.
    async fn add_members(&self, id: GroupId, members: &[Member]) -> ServiceResult<UpdateResult>;

    async fn change_member_role(
        &self,
        id: GroupId,
        uid: UserId,
        role: MemberRole,
    ) -> ServiceResult<UpdateResult>;

    async fn remove_member(&self, id: GroupId, uid: UserId) -> ServiceResult<UpdateResult>;

    async fn update(&self, id: GroupId, changes: GroupChanges) -> ServiceResult<UpdateResult>;

    async fn delete(&self, id: GroupId) -> ServiceResult<DeleteResult>;
}

#[async_trait]
pub trait ProjectStore: Send + Sync {
    async fn list_by_group(&self, group_id: GroupId) -> ServiceResult<Vec<Project>>;

    async fn count_public(&self, group_id: GroupId) -> ServiceResult<u64>;

    /// Counts projects of the group whose member list contains `uid`.
    async fn count_with_member(&self, group_id: GroupId, uid: UserId) -> ServiceResult<u64>;

    async fn delete_by_group(&self, group_id: GroupId) -> ServiceResult<DeleteResult>;
}

#[async_trait]
pub trait InterfaceStore: Send + Sync {
    async fn delete_interfaces_by_project(&self, project_id: ProjectId)
    -> ServiceResult<DeleteResult>;
}

#[async_trait]
pub trait InterfaceCaseStore: Send + Sync {
    async fn delete_cases_by_project(&self, project_id: ProjectId) -> ServiceResult<DeleteResult>;
}

#[async_trait]
pub trait InterfaceColStore: Send + Sync {
    async fn delete_collections_by_project(
        &self,
        project_id: ProjectId,
    ) -> ServiceResult<DeleteResult>;
}

#[async_trait]
pub trait UserStore: Send + Sync {
    async fn find_by_id(&self, uid: UserId) -> ServiceResult<Option<UserProfile>>;
}
