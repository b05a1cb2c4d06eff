//! Project group operations.
//!
//! `GroupService` validates parameters, checks the caller's permissions, calls
//! the storage ports and records activity entries. Every failure is returned as
//! a `GroupError`, which carries the response code of the envelope.

pub mod activity;
pub mod error;
pub mod params;
pub mod response;


use std::collections::HashSet;
use std::sync::Arc;

use chrono::Utc;
use tracing::Instrument;

use apiary_core::config::{CascadeMode, GroupsConfig};
use apiary_core::model::{Group, GroupChanges, Member, NewGroup, UserSnapshot};
use apiary_core::types::{GroupId, GroupRole, GroupType, MemberRole, ProjectId, UserId};

use crate::audit::{AuditSink, group_entry, record_quietly};
use crate::auth::{Action, Authorizer, Caller, GroupRoleResolver, RoleResolver};
use crate::error::ServiceResult;
use crate::store::{
    DeleteResult, GroupStore, InterfaceCaseStore, InterfaceColStore, InterfaceStore,
    ProjectStore, UpdateResult, UserStore,
};

pub use error::{GroupError, GroupResult};
use params::{
    AddGroupParams, AddMemberParams, DelMemberParams, GroupIdParams, MemberRoleParams,
    UpdateGroupParams,
};
use response::{AddMemberOutcome, GroupSummary, GroupView};

const GROUP_ID_REQUIRED: &str = "group id is required";
const MEMBER_UID_REQUIRED: &str = "member uid is required";
const MEMBER_UIDS_REQUIRED: &str = "member uids are required";
const GROUP_NAME_REQUIRED: &str = "group name is required";

/// The ports a `GroupService` talks to.
#[derive(Clone)]
pub struct GroupPorts {
    pub groups: Arc<dyn GroupStore>,
    pub projects: Arc<dyn ProjectStore>,
    pub interfaces: Arc<dyn InterfaceStore>,
    pub cases: Arc<dyn InterfaceCaseStore>,
    pub collections: Arc<dyn InterfaceColStore>,
    pub users: Arc<dyn UserStore>,
    pub audit: Arc<dyn AuditSink>,
    pub roles: Arc<dyn RoleResolver>,
}

impl GroupPorts {
    /// ## Summary
    /// Wires every port to one store and resolves roles through casbin.
    #[must_use]
    pub fn from_store<S>(store: Arc<S>, enforcer: Arc<casbin::Enforcer>) -> Self
    where
        S: GroupStore
            + ProjectStore
            + InterfaceStore
            + InterfaceCaseStore
            + InterfaceColStore
            + UserStore
            + AuditSink
            + 'static,
    {
        let groups: Arc<dyn GroupStore> = store.clone();
        let roles = GroupRoleResolver::new(Arc::clone(&groups), Authorizer::new(enforcer));

        Self {
            groups,
            projects: store.clone(),
            interfaces: store.clone(),
            cases: store.clone(),
            collections: store.clone(),
            users: store.clone(),
            audit: store,
            roles: Arc::new(roles),
        }
    }
}

#[derive(Debug, Clone)]
pub struct GroupOptions {
    /// Display name of every private group.
    pub private_label: String,
    pub cascade: CascadeMode,
}

impl Default for GroupOptions {
    fn default() -> Self {
        Self::from(&GroupsConfig::default())
    }
}

impl From<&GroupsConfig> for GroupOptions {
    fn from(config: &GroupsConfig) -> Self {
        Self {
            private_label: config.private_label.clone(),
            cascade: config.cascade,
        }
    }
}

/// Stores whose rows are removed per project when a group is deleted.
#[derive(Clone)]
struct CascadePorts {
    interfaces: Arc<dyn InterfaceStore>,
    cases: Arc<dyn InterfaceCaseStore>,
    collections: Arc<dyn InterfaceColStore>,
}

impl CascadePorts {
    async fn delete_project_children(&self, project_id: ProjectId) -> ServiceResult<()> {
        let interfaces = self.interfaces.delete_interfaces_by_project(project_id).await?;
        let cases = self.cases.delete_cases_by_project(project_id).await?;
        let collections = self
            .collections
            .delete_collections_by_project(project_id)
            .await?;

        tracing::debug!(
            project_id,
            interfaces = interfaces.deleted,
            cases = cases.deleted,
            collections = collections.deleted,
            "Project children deleted"
        );
        Ok(())
    }
}

#[derive(Clone)]
pub struct GroupService {
    ports: GroupPorts,
    options: GroupOptions,
}

impl GroupService {
    #[must_use]
    pub fn new(ports: GroupPorts, options: GroupOptions) -> Self {
        Self { ports, options }
    }

    fn cascade_ports(&self) -> CascadePorts {
        CascadePorts {
            interfaces: Arc::clone(&self.ports.interfaces),
            cases: Arc::clone(&self.ports.cases),
            collections: Arc::clone(&self.ports.collections),
        }
    }

    fn private_view(&self, mut group: Group) -> GroupView {
        group.group_name.clone_from(&self.options.private_label);
        GroupView {
            group,
            role: GroupRole::Owner,
        }
    }

    async fn record(&self, caller: &Caller, group_id: GroupId, content: String) {
        record_quietly(
            self.ports.audit.as_ref(),
            group_entry(caller, group_id, content),
        )
        .await;
    }

    /// ## Summary
    /// Resolves `uid` to a snapshot carrying `role`, defaulting to `dev`.
    ///
    /// ## Errors
    /// Returns the user store error.
    pub async fn get_userdata(
        &self,
        uid: UserId,
        role: Option<MemberRole>,
    ) -> ServiceResult<Option<UserSnapshot>> {
        Ok(self
            .ports
            .users
            .find_by_id(uid)
            .await?
            .map(|profile| UserSnapshot::new(profile, role.unwrap_or_default())))
    }

    /// Current username of a member, or the one captured when it was added.
    async fn member_name(&self, member: &Member) -> String {
        match self.get_userdata(member.uid, None).await {
            Ok(Some(user)) => user.username,
            Ok(None) => member.username.clone(),
            Err(e) => {
                tracing::warn!(error = %e, uid = member.uid, "Failed to resolve member");
                member.username.clone()
            }
        }
    }

    /// ## Summary
    /// Loads one group with the caller's role attached.
    ///
    /// ## Errors
    /// `Validation` without an id, `NotFound` for an unknown group and
    /// `Lookup` when the store fails.
    #[tracing::instrument(skip(self, caller), fields(uid = caller.uid))]
    pub async fn get(&self, caller: &Caller, params: GroupIdParams) -> GroupResult<GroupView> {
        let id = params.id.ok_or(GroupError::Validation(GROUP_ID_REQUIRED))?;

        let mut group = self
            .ports
            .groups
            .get(id)
            .await
            .map_err(GroupError::Lookup)?
            .ok_or(GroupError::NotFound("group does not exist"))?;

        let role = self
            .ports
            .roles
            .group_role(caller, id)
            .await
            .map_err(GroupError::Lookup)?;

        if group.is_private() {
            group.group_name.clone_from(&self.options.private_label);
        }

        Ok(GroupView { group, role })
    }

    /// ## Summary
    /// Creates a normal group owned by the caller. Admin only.
    ///
    /// ## Errors
    /// `NotAdmin`, `Validation` for an empty name, `Conflict` for a taken
    /// name and `Persistence` when the store fails.
    #[tracing::instrument(skip(self, caller, params), fields(uid = caller.uid))]
    pub async fn add(&self, caller: &Caller, params: AddGroupParams) -> GroupResult<GroupSummary> {
        if !caller.is_admin() {
            return Err(GroupError::NotAdmin);
        }

        let group_name = params
            .group_name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .ok_or(GroupError::Validation(GROUP_NAME_REQUIRED))?
            .to_string();

        let mut owners: Vec<Member> = Vec::new();
        for uid in params.owner_uids {
            if owners.iter().any(|m| m.uid == uid) {
                continue;
            }
            if let Some(user) = self.get_userdata(uid, Some(MemberRole::Owner)).await? {
                owners.push(user.into());
            }
        }

        // Not atomic with the insert below.
        if self.ports.groups.count_by_name(&group_name).await? > 0 {
            return Err(GroupError::Conflict);
        }

        let group = self
            .ports
            .groups
            .create(NewGroup {
                group_name,
                group_desc: params.group_desc,
                uid: caller.uid,
                group_type: GroupType::Normal,
                members: owners,
                now: Utc::now(),
            })
            .await?;

        tracing::info!(group_id = group.id, "Group added");
        self.record(
            caller,
            group.id,
            activity::group_created((caller.uid, &caller.username), group.id, &group.group_name),
        )
        .await;

        Ok(group.into())
    }

    /// ## Summary
    /// Adds users to a group with one role, reporting which were added, already
    /// present or unknown. Global admins are never added.
    ///
    /// ## Errors
    /// `Validation` for missing uids or id, `Persistence` when the store fails.
    #[tracing::instrument(skip(self, caller, params), fields(uid = caller.uid))]
    pub async fn add_member(
        &self,
        caller: &Caller,
        params: AddMemberParams,
    ) -> GroupResult<AddMemberOutcome> {
        if params.member_uids.is_empty() {
            return Err(GroupError::Validation(MEMBER_UIDS_REQUIRED));
        }
        let id = params.id.ok_or(GroupError::Validation(GROUP_ID_REQUIRED))?;
        let role = MemberRole::normalize(params.role.as_deref());

        let mut seen = HashSet::new();
        let mut add_members = Vec::new();
        let mut exist_members = Vec::new();
        let mut no_members = Vec::new();

        for uid in params.member_uids {
            if !seen.insert(uid) {
                continue;
            }

            if let Some(existing) = self.ports.groups.find_member(id, uid).await? {
                exist_members.push(existing);
                continue;
            }

            match self.get_userdata(uid, Some(role)).await? {
                None => no_members.push(uid),
                Some(user) if user.global_role.is_admin() => {
                    tracing::debug!(member_uid = uid, "Skipping global admin");
                }
                Some(user) => add_members.push(Member::from(user)),
            }
        }

        let result = self.ports.groups.add_members(id, &add_members).await?;

        if result.matched == 0 {
            tracing::debug!(group_id = id, "Group not found, no members added");
        } else if !add_members.is_empty() {
            let content = activity::members_added(
                (caller.uid, &caller.username),
                add_members.iter().map(|m| (m.uid, m.username.as_str())),
                role,
            );
            self.record(caller, id, content).await;
        }

        Ok(AddMemberOutcome {
            result,
            add_members,
            exist_members,
            no_members,
        })
    }

    /// Looks up the target member, then requires `danger` on the group.
    async fn authorize_member_change(
        &self,
        caller: &Caller,
        id: Option<GroupId>,
        member_uid: Option<UserId>,
    ) -> GroupResult<(GroupId, Member)> {
        let member_uid = member_uid.ok_or(GroupError::Validation(MEMBER_UID_REQUIRED))?;
        let id = id.ok_or(GroupError::Validation(GROUP_ID_REQUIRED))?;

        let member = self
            .ports
            .groups
            .find_member(id, member_uid)
            .await?
            .ok_or(GroupError::NotFound("group member does not exist"))?;

        if !self.ports.roles.check(caller, id, Action::Danger).await? {
            return Err(GroupError::DangerDenied);
        }

        Ok((id, member))
    }

    /// ## Summary
    /// Changes the role of an existing member.
    ///
    /// ## Errors
    /// `Validation`, `NotFound` for a non-member (before any permission
    /// check), `DangerDenied` and `Persistence`.
    #[tracing::instrument(skip(self, caller, params), fields(uid = caller.uid))]
    pub async fn change_member_role(
        &self,
        caller: &Caller,
        params: MemberRoleParams,
    ) -> GroupResult<UpdateResult> {
        let (id, member) = self
            .authorize_member_change(caller, params.id, params.member_uid)
            .await?;
        let role = MemberRole::normalize(params.role.as_deref());

        let result = self
            .ports
            .groups
            .change_member_role(id, member.uid, role)
            .await?;

        let name = self.member_name(&member).await;
        self.record(
            caller,
            id,
            activity::member_role_changed((caller.uid, &caller.username), (member.uid, &name), role),
        )
        .await;

        Ok(result)
    }

    /// ## Summary
    /// Returns the members of a group.
    ///
    /// ## Errors
    /// `Validation` without an id, `NotFound` for an unknown group and
    /// `Persistence` when the store fails.
    #[tracing::instrument(skip(self))]
    pub async fn get_member_list(&self, params: GroupIdParams) -> GroupResult<Vec<Member>> {
        let id = params.id.ok_or(GroupError::Validation(GROUP_ID_REQUIRED))?;

        let group = self
            .ports
            .groups
            .get(id)
            .await?
            .ok_or(GroupError::NotFound("group does not exist"))?;

        Ok(group.members)
    }

    /// ## Summary
    /// Removes a member from a group.
    ///
    /// ## Errors
    /// Same as `change_member_role`.
    #[tracing::instrument(skip(self, caller, params), fields(uid = caller.uid))]
    pub async fn del_member(
        &self,
        caller: &Caller,
        params: DelMemberParams,
    ) -> GroupResult<UpdateResult> {
        let (id, member) = self
            .authorize_member_change(caller, params.id, params.member_uid)
            .await?;

        let result = self.ports.groups.remove_member(id, member.uid).await?;

        let name = self.member_name(&member).await;
        self.record(
            caller,
            id,
            activity::member_removed((caller.uid, &caller.username), (member.uid, &name)),
        )
        .await;

        Ok(result)
    }

    /// ## Summary
    /// Returns the private group of `caller`, creating it if it does not exist.
    ///
    /// ## Errors
    /// Returns the store error if the group can neither be found nor created.
    async fn ensure_private_group(&self, caller: &Caller) -> ServiceResult<Group> {
        if let Some(group) = self.ports.groups.find_private(caller.uid).await? {
            return Ok(group);
        }

        match self
            .ports
            .groups
            .create(NewGroup::private_for(caller.uid, Utc::now()))
            .await
        {
            Ok(group) => {
                tracing::info!(group_id = group.id, "Private group created");
                Ok(group)
            }
            // Lost a race with a concurrent request for the same user.
            Err(e) => match self.ports.groups.find_private(caller.uid).await? {
                Some(group) => Ok(group),
                None => Err(e),
            },
        }
    }

    /// Whether a caller without a role in the group can still see it.
    async fn visible_to_member(&self, caller: &Caller, id: GroupId) -> ServiceResult<bool> {
        if self.ports.projects.count_public(id).await? > 0 {
            return Ok(true);
        }
        Ok(self.ports.projects.count_with_member(id, caller.uid).await? > 0)
    }

    /// ## Summary
    /// Lists the groups the caller can see: their private group first, then the
    /// groups they hold a role in, then groups with projects open to them.
    ///
    /// ## Errors
    /// `Persistence` when a store fails.
    #[tracing::instrument(skip(self, caller), fields(uid = caller.uid))]
    pub async fn list(&self, caller: &Caller) -> GroupResult<Vec<GroupView>> {
        let groups = self.ports.groups.list().await?;
        let private = self.ensure_private_group(caller).await?;

        let mut privileged = Vec::new();
        let mut visible = Vec::new();

        for group in groups {
            if group.is_private() {
                continue;
            }

            let role = self.ports.roles.group_role(caller, group.id).await?;
            if role != GroupRole::Member {
                privileged.push(GroupView { group, role });
            } else if self.visible_to_member(caller, group.id).await? {
                visible.push(GroupView { group, role });
            }
        }

        let mut result = Vec::with_capacity(1 + privileged.len() + visible.len());
        result.push(self.private_view(private));
        result.extend(privileged);
        result.extend(visible);

        tracing::debug!(count = result.len(), "Groups listed");
        Ok(result)
    }

    /// ## Summary
    /// Deletes a group, its projects and their interfaces, cases and
    /// collections. Admin only.
    ///
    /// ## Errors
    /// `NotAdmin`, `InvalidParam` without an id and `Persistence` when a
    /// store fails.
    #[tracing::instrument(skip(self, caller, params), fields(uid = caller.uid))]
    pub async fn del(&self, caller: &Caller, params: GroupIdParams) -> GroupResult<DeleteResult> {
        if !caller.is_admin() {
            return Err(GroupError::NotAdmin);
        }
        let id = params.id.ok_or(GroupError::InvalidParam(GROUP_ID_REQUIRED))?;

        let projects = self.ports.projects.list_by_group(id).await?;
        let cascade = self.cascade_ports();

        match self.options.cascade {
            CascadeMode::Sequenced => {
                for project in &projects {
                    cascade.delete_project_children(project.id).await?;
                }
            }
            CascadeMode::Detached => {
                for project in &projects {
                    let cascade = cascade.clone();
                    let project_id = project.id;
                    tokio::spawn(
                        async move {
                            if let Err(e) = cascade.delete_project_children(project_id).await {
                                tracing::error!(error = %e, "Project cascade failed");
                            }
                        }
                        .instrument(tracing::info_span!("group_cascade", group_id = id, project_id)),
                    );
                }
            }
        }

        if !projects.is_empty() {
            let removed = self.ports.projects.delete_by_group(id).await?;
            tracing::debug!(group_id = id, projects = removed.deleted, "Projects deleted");
        }

        let result = self.ports.groups.delete(id).await?;
        tracing::info!(group_id = id, deleted = result.deleted, "Group deleted");
        Ok(result)
    }

    /// ## Summary
    /// Renames a group and replaces its description.
    ///
    /// ## Errors
    /// `InvalidParam` for a missing id or empty name, `DangerDenied` and
    /// `Persistence`.
    #[tracing::instrument(skip(self, caller, params), fields(uid = caller.uid))]
    pub async fn up(&self, caller: &Caller, params: UpdateGroupParams) -> GroupResult<UpdateResult> {
        let id = params.id.ok_or(GroupError::InvalidParam(GROUP_ID_REQUIRED))?;

        if !self.ports.roles.check(caller, id, Action::Danger).await? {
            return Err(GroupError::DangerDenied);
        }

        let group_name = params
            .group_name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .ok_or(GroupError::InvalidParam(GROUP_NAME_REQUIRED))?
            .to_string();

        let content = activity::group_updated((caller.uid, &caller.username), id, &group_name);
        let result = self
            .ports
            .groups
            .update(
                id,
                GroupChanges {
                    group_name,
                    group_desc: params.group_desc,
                    up_time: Utc::now(),
                },
            )
            .await?;

        self.record(caller, id, content).await;
        Ok(result)
    }
}
