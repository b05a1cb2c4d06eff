//! In-memory adapters for the storage ports.
//!
//! Used by tests of this crate and, through the `memory-store` feature, by the
//! handler tests of the app crate.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use salvo::async_trait;

use apiary_core::model::{
    Group, GroupChanges, Member, NewAuditEntry, NewGroup, Project, UserProfile,
};
use apiary_core::types::{
    GroupId, GroupType, MemberRole, ProjectId, ProjectVisibility, UserId, UserRole,
};

use crate::audit::AuditSink;
use crate::error::{ServiceError, ServiceResult};

use super::{
    DeleteResult, GroupStore, InterfaceCaseStore, InterfaceColStore, InterfaceStore,
    ProjectStore, UpdateResult, UserStore,
};

#[derive(Debug, Clone)]
struct StoredProject {
    project: Project,
    members: Vec<UserId>,
}

#[derive(Debug, Default)]
struct State {
    next_group_id: GroupId,
    next_project_id: ProjectId,
    users: HashMap<UserId, UserProfile>,
    groups: Vec<Group>,
    projects: Vec<StoredProject>,
    interfaces: HashMap<ProjectId, u64>,
    cases: HashMap<ProjectId, u64>,
    collections: HashMap<ProjectId, u64>,
    audit: Vec<NewAuditEntry>,
}

impl State {
    fn group_mut(&mut self, id: GroupId) -> Option<&mut Group> {
        self.groups.iter_mut().find(|g| g.id == id)
    }
}

/// Implements every storage port and the audit sink over one shared state.
#[derive(Debug, Default)]
pub struct MemoryStore {
    state: Mutex<State>,
    fail_reads: AtomicBool,
    fail_writes: AtomicBool,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn read(&self) -> ServiceResult<MutexGuard<'_, State>> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(ServiceError::InvariantViolation("memory store read failure"));
        }
        Ok(self.lock())
    }

    fn write(&self) -> ServiceResult<MutexGuard<'_, State>> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(ServiceError::InvariantViolation("memory store write failure"));
        }
        Ok(self.lock())
    }

    /// Makes every subsequent read fail.
    pub fn set_fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    /// Makes every subsequent write fail.
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    pub fn add_user(&self, uid: UserId, username: &str, role: UserRole) -> UserProfile {
        let profile = UserProfile {
            uid,
            username: username.to_string(),
            email: format!("{username}@example.com"),
            role,
        };
        self.lock().users.insert(uid, profile.clone());
        profile
    }

    /// Inserts a project; `members` is the project's access list.
    pub fn add_project(
        &self,
        group_id: GroupId,
        name: &str,
        visibility: ProjectVisibility,
        members: &[UserId],
    ) -> ProjectId {
        let mut state = self.lock();
        state.next_project_id += 1;
        let id = state.next_project_id;
        state.projects.push(StoredProject {
            project: Project {
                id,
                group_id,
                name: name.to_string(),
                visibility,
            },
            members: members.to_vec(),
        });
        id
    }

    pub fn add_interfaces(&self, project_id: ProjectId, n: u64) {
        *self.lock().interfaces.entry(project_id).or_default() += n;
    }

    pub fn add_cases(&self, project_id: ProjectId, n: u64) {
        *self.lock().cases.entry(project_id).or_default() += n;
    }

    pub fn add_collections(&self, project_id: ProjectId, n: u64) {
        *self.lock().collections.entry(project_id).or_default() += n;
    }

    #[must_use]
    pub fn interface_count(&self, project_id: ProjectId) -> u64 {
        self.lock().interfaces.get(&project_id).copied().unwrap_or(0)
    }

    #[must_use]
    pub fn case_count(&self, project_id: ProjectId) -> u64 {
        self.lock().cases.get(&project_id).copied().unwrap_or(0)
    }

    #[must_use]
    pub fn collection_count(&self, project_id: ProjectId) -> u64 {
        self.lock().collections.get(&project_id).copied().unwrap_or(0)
    }

    #[must_use]
    pub fn project_count(&self, group_id: GroupId) -> usize {
        self.lock()
            .projects
            .iter()
            .filter(|p| p.project.group_id == group_id)
            .count()
    }

    #[must_use]
    pub fn group_count(&self) -> usize {
        self.lock().groups.len()
    }

    #[must_use]
    pub fn audit_entries(&self) -> Vec<NewAuditEntry> {
        self.lock().audit.clone()
    }
}

#[async_trait]
impl GroupStore for MemoryStore {
    async fn get(&self, id: GroupId) -> ServiceResult<Option<Group>> {
        Ok(self.read()?.groups.iter().find(|g| g.id == id).cloned())
    }

    async fn find_private(&self, uid: UserId) -> ServiceResult<Option<Group>> {
        Ok(self
            .read()?
            .groups
            .iter()
            .find(|g| g.uid == uid && g.group_type == GroupType::Private)
            .cloned())
    }

    async fn list(&self) -> ServiceResult<Vec<Group>> {
        Ok(self.read()?.groups.clone())
    }

    async fn count_by_name(&self, name: &str) -> ServiceResult<u64> {
        let n = self
            .read()?
            .groups
            .iter()
            .filter(|g| g.group_name == name)
            .count();
        Ok(u64::try_from(n).unwrap_or_default())
    }

    async fn find_member(&self, id: GroupId, uid: UserId) -> ServiceResult<Option<Member>> {
        Ok(self
            .read()?
            .groups
            .iter()
            .find(|g| g.id == id)
            .and_then(|g| g.member(uid).cloned()))
    }

    async fn create(&self, group: NewGroup) -> ServiceResult<Group> {
        let mut state = self.write()?;

        // Mirrors the unique index on private groups.
        if group.group_type == GroupType::Private
            && state
                .groups
                .iter()
                .any(|g| g.uid == group.uid && g.group_type == GroupType::Private)
        {
            return Err(ServiceError::Conflict(format!(
                "private group of user {} already exists",
                group.uid
            )));
        }

        state.next_group_id += 1;
        let mut members: Vec<Member> = Vec::with_capacity(group.members.len());
        for member in group.members {
            if !members.iter().any(|m| m.uid == member.uid) {
                members.push(member);
            }
        }

        let created = Group {
            id: state.next_group_id,
            group_name: group.group_name,
            group_desc: group.group_desc,
            uid: group.uid,
            group_type: group.group_type,
            add_time: group.now,
            up_time: group.now,
            members,
        };
        state.groups.push(created.clone());
        Ok(created)
    }

    async fn add_members(&self, id: GroupId, members: &[Member]) -> ServiceResult<UpdateResult> {
        let mut state = self.write()?;
        let Some(group) = state.group_mut(id) else {
            return Ok(UpdateResult::default());
        };

        let mut modified = 0;
        for member in members {
            if group.member(member.uid).is_none() {
                group.members.push(member.clone());
                modified += 1;
            }
        }

        Ok(UpdateResult {
            matched: 1,
            modified,
        })
    }

    async fn change_member_role(
        &self,
        id: GroupId,
        uid: UserId,
        role: MemberRole,
    ) -> ServiceResult<UpdateResult> {
        let mut state = self.write()?;
        let member = state
            .group_mut(id)
            .and_then(|g| g.members.iter_mut().find(|m| m.uid == uid));

        Ok(match member {
            Some(member) => {
                member.role = role;
                UpdateResult {
                    matched: 1,
                    modified: 1,
                }
            }
            None => UpdateResult::default(),
        })
    }

    async fn remove_member(&self, id: GroupId, uid: UserId) -> ServiceResult<UpdateResult> {
        let mut state = self.write()?;
        let Some(group) = state.group_mut(id) else {
            return Ok(UpdateResult::default());
        };

        let before = group.members.len();
        group.members.retain(|m| m.uid != uid);
        let removed = u64::from(group.members.len() != before);

        Ok(UpdateResult {
            matched: removed,
            modified: removed,
        })
    }

    async fn update(&self, id: GroupId, changes: GroupChanges) -> ServiceResult<UpdateResult> {
        let mut state = self.write()?;
        let Some(group) = state.group_mut(id) else {
            return Ok(UpdateResult::default());
        };

        group.group_name = changes.group_name;
        group.group_desc = changes.group_desc;
        group.up_time = changes.up_time;

        Ok(UpdateResult {
            matched: 1,
            modified: 1,
        })
    }

    async fn delete(&self, id: GroupId) -> ServiceResult<DeleteResult> {
        let mut state = self.write()?;
        let before = state.groups.len();
        state.groups.retain(|g| g.id != id);
        Ok(DeleteResult {
            deleted: u64::from(state.groups.len() != before),
        })
    }
}

#[async_trait]
impl ProjectStore for MemoryStore {
    async fn list_by_group(&self, group_id: GroupId) -> ServiceResult<Vec<Project>> {
        Ok(self
            .read()?
            .projects
            .iter()
            .filter(|p| p.project.group_id == group_id)
            .map(|p| p.project.clone())
            .collect())
    }

    async fn count_public(&self, group_id: GroupId) -> ServiceResult<u64> {
        let n = self
            .read()?
            .projects
            .iter()
            .filter(|p| {
                p.project.group_id == group_id
                    && p.project.visibility == ProjectVisibility::Public
            })
            .count();
        Ok(u64::try_from(n).unwrap_or_default())
    }

    async fn count_with_member(&self, group_id: GroupId, uid: UserId) -> ServiceResult<u64> {
        let n = self
            .read()?
            .projects
            .iter()
            .filter(|p| p.project.group_id == group_id && p.members.contains(&uid))
            .count();
        Ok(u64::try_from(n).unwrap_or_default())
    }

    async fn delete_by_group(&self, group_id: GroupId) -> ServiceResult<DeleteResult> {
        let mut state = self.write()?;
        let before = state.projects.len();
        state.projects.retain(|p| p.project.group_id != group_id);
        let removed = before - state.projects.len();
        Ok(DeleteResult {
            deleted: u64::try_from(removed).unwrap_or_default(),
        })
    }
}

#[async_trait]
impl InterfaceStore for MemoryStore {
    async fn delete_interfaces_by_project(
        &self,
        project_id: ProjectId,
    ) -> ServiceResult<DeleteResult> {
        let deleted = self.write()?.interfaces.remove(&project_id).unwrap_or(0);
        Ok(DeleteResult { deleted })
    }
}

#[async_trait]
impl InterfaceCaseStore for MemoryStore {
    async fn delete_cases_by_project(&self, project_id: ProjectId) -> ServiceResult<DeleteResult> {
        let deleted = self.write()?.cases.remove(&project_id).unwrap_or(0);
        Ok(DeleteResult { deleted })
    }
}

#[async_trait]
impl InterfaceColStore for MemoryStore {
    async fn delete_collections_by_project(
        &self,
        project_id: ProjectId,
    ) -> ServiceResult<DeleteResult> {
        let deleted = self.write()?.collections.remove(&project_id).unwrap_or(0);
        Ok(DeleteResult { deleted })
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn find_by_id(&self, uid: UserId) -> ServiceResult<Option<UserProfile>> {
        Ok(self.read()?.users.get(&uid).cloned())
    }
}

#[async_trait]
impl AuditSink for MemoryStore {
    async fn record(&self, entry: &NewAuditEntry) -> ServiceResult<()> {
        self.write()?.audit.push(entry.clone());
        Ok(())
    }
}
