use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::{GroupId, GroupType, MemberRole, UserId};

/// Membership entry with the username/email captured when the member was added.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    pub uid: UserId,
    pub role: MemberRole,
    pub username: String,
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    #[serde(rename = "_id")]
    pub id: GroupId,
    pub group_name: String,
    pub group_desc: Option<String>,
    pub uid: UserId,
    #[serde(rename = "type")]
    pub group_type: GroupType,
    #[serde(with = "chrono::serde::ts_seconds")]
    pub add_time: DateTime<Utc>,
    #[serde(with = "chrono::serde::ts_seconds")]
    pub up_time: DateTime<Utc>,
    pub members: Vec<Member>,
}

impl Group {
    #[must_use]
    pub const fn is_private(&self) -> bool {
        matches!(self.group_type, GroupType::Private)
    }

    #[must_use]
    pub fn member(&self, uid: UserId) -> Option<&Member> {
        self.members.iter().find(|m| m.uid == uid)
    }
}

#[derive(Debug, Clone)]
pub struct NewGroup {
    pub group_name: String,
    pub group_desc: Option<String>,
    pub uid: UserId,
    pub group_type: GroupType,
    pub members: Vec<Member>,
    pub now: DateTime<Utc>,
}

impl NewGroup {
    /// The implicit personal workspace of `uid`.
    #[must_use]
    pub fn private_for(uid: UserId, now: DateTime<Utc>) -> Self {
        Self {
            group_name: format!("User-{uid}"),
            group_desc: None,
            uid,
            group_type: GroupType::Private,
            members: Vec::new(),
            now,
        }
    }
}

#[derive(Debug, Clone)]
pub struct GroupChanges {
    pub group_name: String,
    pub group_desc: Option<String>,
    pub up_time: DateTime<Utc>,
}
