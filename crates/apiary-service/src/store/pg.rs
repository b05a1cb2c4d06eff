//! Postgres adapters for the storage ports.

use std::sync::Arc;

use diesel_async::scoped_futures::ScopedFutureExt;
use salvo::async_trait;

use apiary_core::model::{
    Group, GroupChanges, Member, NewAuditEntry, NewGroup, Project, UserProfile,
};
use apiary_core::types::{GroupId, MemberRole, ProjectId, UserId};
use apiary_db::db::DbProvider;
use apiary_db::db::query::{audit, group as group_q, interface, project, user};
use apiary_db::db::transaction::with_transaction;
use apiary_db::model::audit::NewAuditRow;
use apiary_db::model::group::{GroupChangeset, NewGroupRow, NewMemberRow};

use crate::audit::AuditSink;
use crate::error::ServiceResult;

use super::{
    DeleteResult, GroupStore, InterfaceCaseStore, InterfaceColStore, InterfaceStore,
    ProjectStore, UpdateResult, UserStore,
};

fn count(n: impl TryInto<u64>) -> u64 {
    n.try_into().unwrap_or_default()
}

fn touched(n: usize) -> UpdateResult {
    UpdateResult {
        matched: count(n),
        modified: count(n),
    }
}

/// Every storage port backed by one connection provider.
#[derive(Clone)]
pub struct PgStore {
    provider: Arc<dyn DbProvider>,
}

impl PgStore {
    #[must_use]
    pub fn new(provider: Arc<dyn DbProvider>) -> Self {
        Self { provider }
    }
}

#[async_trait]
impl GroupStore for PgStore {
    #[tracing::instrument(skip(self))]
    async fn get(&self, id: GroupId) -> ServiceResult<Option<Group>> {
        let mut conn = self.provider.get_connection().await?;

        let Some(row) = group_q::get_group(&mut conn, id).await? else {
            return Ok(None);
        };
        let members = group_q::load_members(&mut conn, row.id).await?;

        Ok(Some(row.into_group(members)))
    }

    #[tracing::instrument(skip(self))]
    async fn find_private(&self, uid: UserId) -> ServiceResult<Option<Group>> {
        let mut conn = self.provider.get_connection().await?;

        let Some(row) = group_q::get_private_group(&mut conn, uid).await? else {
            return Ok(None);
        };
        let members = group_q::load_members(&mut conn, row.id).await?;

        Ok(Some(row.into_group(members)))
    }

    #[tracing::instrument(skip(self))]
    async fn list(&self) -> ServiceResult<Vec<Group>> {
        let mut conn = self.provider.get_connection().await?;

        let rows = group_q::list_groups(&mut conn).await?;
        let members = group_q::load_members_grouped(&mut conn, &rows).await?;

        Ok(rows
            .into_iter()
            .zip(members)
            .map(|(row, members)| row.into_group(members))
            .collect())
    }

    #[tracing::instrument(skip(self))]
    async fn count_by_name(&self, name: &str) -> ServiceResult<u64> {
        let mut conn = self.provider.get_connection().await?;
        Ok(count(group_q::count_by_name(&mut conn, name).await?))
    }

    #[tracing::instrument(skip(self))]
    async fn find_member(&self, id: GroupId, uid: UserId) -> ServiceResult<Option<Member>> {
        let mut conn = self.provider.get_connection().await?;
        Ok(group_q::find_member(&mut conn, id, uid)
            .await?
            .map(Member::from))
    }

    #[tracing::instrument(skip(self, group), fields(group_name = %group.group_name))]
    async fn create(&self, group: NewGroup) -> ServiceResult<Group> {
        let mut conn = self.provider.get_connection().await?;

        let created = with_transaction(&mut conn, move |tx| {
            async move {
                let row = group_q::insert_group(
                    tx,
                    &NewGroupRow {
                        group_name: &group.group_name,
                        group_desc: group.group_desc.as_deref(),
                        owner_uid: group.uid,
                        group_type: group.group_type.into(),
                        add_time: group.now,
                        up_time: group.now,
                    },
                )
                .await?;

                let members: Vec<NewMemberRow<'_>> = group
                    .members
                    .iter()
                    .map(|member| NewMemberRow::from_member(row.id, member))
                    .collect();
                group_q::insert_members(tx, &members).await?;

                let members = group_q::load_members(tx, row.id).await?;
                Ok(row.into_group(members))
            }
            .scope_boxed()
        })
        .await?;

        tracing::info!(group_id = created.id, "Group created");
        Ok(created)
    }

    #[tracing::instrument(skip(self, members), fields(count = members.len()))]
    async fn add_members(&self, id: GroupId, members: &[Member]) -> ServiceResult<UpdateResult> {
        let mut conn = self.provider.get_connection().await?;

        if group_q::get_group(&mut conn, id).await?.is_none() {
            return Ok(UpdateResult::default());
        }

        let rows: Vec<NewMemberRow<'_>> = members
            .iter()
            .map(|member| NewMemberRow::from_member(id, member))
            .collect();
        let inserted = group_q::insert_members(&mut conn, &rows).await?;

        Ok(UpdateResult {
            matched: 1,
            modified: count(inserted),
        })
    }

    #[tracing::instrument(skip(self))]
    async fn change_member_role(
        &self,
        id: GroupId,
        uid: UserId,
        role: MemberRole,
    ) -> ServiceResult<UpdateResult> {
        let mut conn = self.provider.get_connection().await?;
        let updated = group_q::update_member_role(&mut conn, id, uid, role.into()).await?;
        Ok(touched(updated))
    }

    #[tracing::instrument(skip(self))]
    async fn remove_member(&self, id: GroupId, uid: UserId) -> ServiceResult<UpdateResult> {
        let mut conn = self.provider.get_connection().await?;
        let removed = group_q::delete_member(&mut conn, id, uid).await?;
        Ok(touched(removed))
    }

    #[tracing::instrument(skip(self, changes))]
    async fn update(&self, id: GroupId, changes: GroupChanges) -> ServiceResult<UpdateResult> {
        let mut conn = self.provider.get_connection().await?;
        let changeset = GroupChangeset {
            group_name: &changes.group_name,
            group_desc: changes.group_desc.as_deref(),
            up_time: changes.up_time,
        };
        let updated = group_q::update_group(&mut conn, id, &changeset).await?;
        Ok(touched(updated))
    }

    #[tracing::instrument(skip(self))]
    async fn delete(&self, id: GroupId) -> ServiceResult<DeleteResult> {
        let mut conn = self.provider.get_connection().await?;

        let deleted = with_transaction(&mut conn, move |tx| {
            async move { Ok(group_q::delete_group(tx, id).await?) }.scope_boxed()
        })
        .await?;

        Ok(DeleteResult {
            deleted: count(deleted),
        })
    }
}

#[async_trait]
impl ProjectStore for PgStore {
    #[tracing::instrument(skip(self))]
    async fn list_by_group(&self, group_id: GroupId) -> ServiceResult<Vec<Project>> {
        let mut conn = self.provider.get_connection().await?;
        Ok(project::list_by_group(&mut conn, group_id)
            .await?
            .into_iter()
            .map(Project::from)
            .collect())
    }

    #[tracing::instrument(skip(self))]
    async fn count_public(&self, group_id: GroupId) -> ServiceResult<u64> {
        let mut conn = self.provider.get_connection().await?;
        Ok(count(project::count_public(&mut conn, group_id).await?))
    }

    #[tracing::instrument(skip(self))]
    async fn count_with_member(&self, group_id: GroupId, uid: UserId) -> ServiceResult<u64> {
        let mut conn = self.provider.get_connection().await?;
        Ok(count(
            project::count_with_member(&mut conn, group_id, uid).await?,
        ))
    }

    #[tracing::instrument(skip(self))]
    async fn delete_by_group(&self, group_id: GroupId) -> ServiceResult<DeleteResult> {
        let mut conn = self.provider.get_connection().await?;
        Ok(DeleteResult {
            deleted: count(project::delete_by_group(&mut conn, group_id).await?),
        })
    }
}

#[async_trait]
impl InterfaceStore for PgStore {
    #[tracing::instrument(skip(self))]
    async fn delete_interfaces_by_project(
        &self,
        project_id: ProjectId,
    ) -> ServiceResult<DeleteResult> {
        let mut conn = self.provider.get_connection().await?;
        Ok(DeleteResult {
            deleted: count(interface::delete_interfaces(&mut conn, project_id).await?),
        })
    }
}

#[async_trait]
impl InterfaceCaseStore for PgStore {
    #[tracing::instrument(skip(self))]
    async fn delete_cases_by_project(&self, project_id: ProjectId) -> ServiceResult<DeleteResult> {
        let mut conn = self.provider.get_connection().await?;
        Ok(DeleteResult {
            deleted: count(interface::delete_cases(&mut conn, project_id).await?),
        })
    }
}

#[async_trait]
impl InterfaceColStore for PgStore {
    #[tracing::instrument(skip(self))]
    async fn delete_collections_by_project(
        &self,
        project_id: ProjectId,
    ) -> ServiceResult<DeleteResult> {
        let mut conn = self.provider.get_connection().await?;
        Ok(DeleteResult {
            deleted: count(interface::delete_collections(&mut conn, project_id).await?),
        })
    }
}

#[async_trait]
impl UserStore for PgStore {
    #[tracing::instrument(skip(self))]
    async fn find_by_id(&self, uid: UserId) -> ServiceResult<Option<UserProfile>> {
        let mut conn = self.provider.get_connection().await?;
        Ok(user::get_user(&mut conn, uid)
            .await?
            .map(UserProfile::from))
    }
}

#[async_trait]
impl AuditSink for PgStore {
    #[tracing::instrument(skip(self, entry), fields(typeid = entry.typeid))]
    async fn record(&self, entry: &NewAuditEntry) -> ServiceResult<()> {
        let mut conn = self.provider.get_connection().await?;
        audit::insert_entry(&mut conn, &NewAuditRow::from(entry)).await?;
        Ok(())
    }
}
