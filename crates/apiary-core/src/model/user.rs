use serde::{Deserialize, Serialize};

use crate::model::group::Member;
use crate::types::{MemberRole, UserId, UserRole};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub uid: UserId,
    pub username: String,
    pub email: String,
    pub role: UserRole,
}

/// A user resolved for a prospective group role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSnapshot {
    #[serde(rename = "_role")]
    pub global_role: UserRole,
    pub role: MemberRole,
    pub uid: UserId,
    pub username: String,
    pub email: String,
}

impl UserSnapshot {
    #[must_use]
    pub fn new(profile: UserProfile, role: MemberRole) -> Self {
        Self {
            global_role: profile.role,
            role,
            uid: profile.uid,
            username: profile.username,
            email: profile.email,
        }
    }
}

impl From<UserSnapshot> for Member {
    fn from(snapshot: UserSnapshot) -> Self {
        Self {
            uid: snapshot.uid,
            role: snapshot.role,
            username: snapshot.username,
            email: snapshot.email,
        }
    }
}
