use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::types::{GroupId, UserId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditKind {
    Group,
}

impl AuditKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Group => "group",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewAuditEntry {
    pub content: String,
    #[serde(rename = "type")]
    pub kind: AuditKind,
    pub uid: UserId,
    pub username: String,
    pub typeid: GroupId,
    #[serde(with = "chrono::serde::ts_seconds")]
    pub add_time: DateTime<Utc>,
}
