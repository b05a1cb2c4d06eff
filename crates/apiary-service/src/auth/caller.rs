use serde::Serialize;

use apiary_core::model::UserProfile;
use apiary_core::types::{UserId, UserRole};

/// The user on whose behalf a request runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Caller {
    pub uid: UserId,
    pub username: String,
    pub email: String,
    pub role: UserRole,
}

impl Caller {
    #[must_use]
    pub const fn is_admin(&self) -> bool {
        self.role.is_admin()
    }
}

impl From<UserProfile> for Caller {
    fn from(profile: UserProfile) -> Self {
        Self {
            uid: profile.uid,
            username: profile.username,
            email: profile.email,
            role: profile.role,
        }
    }
}

/// What the auth middleware stores in the depot.
#[derive(Debug, Clone)]
pub enum DepotUser {
    User(Caller),
    Public,
}
