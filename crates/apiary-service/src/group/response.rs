use serde::Serialize;

use apiary_core::model::{Group, Member};
use apiary_core::types::{GroupId, GroupRole, GroupType, UserId};

use crate::store::UpdateResult;

/// A group together with the caller's role in it.
#[derive(Debug, Clone, Serialize)]
pub struct GroupView {
    #[serde(flatten)]
    pub group: Group,
    pub role: GroupRole,
}

/// Projection returned by `add`.
#[derive(Debug, Clone, Serialize)]
pub struct GroupSummary {
    #[serde(rename = "_id")]
    pub id: GroupId,
    pub group_name: String,
    pub group_desc: Option<String>,
    pub uid: UserId,
    pub members: Vec<Member>,
    #[serde(rename = "type")]
    pub group_type: GroupType,
}

impl From<Group> for GroupSummary {
    fn from(group: Group) -> Self {
        Self {
            id: group.id,
            group_name: group.group_name,
            group_desc: group.group_desc,
            uid: group.uid,
            members: group.members,
            group_type: group.group_type,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct AddMemberOutcome {
    pub result: UpdateResult,
    pub add_members: Vec<Member>,
    pub exist_members: Vec<Member>,
    pub no_members: Vec<UserId>,
}
