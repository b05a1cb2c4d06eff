use serde::{Deserialize, Serialize};

pub type GroupId = i32;
pub type UserId = i32;
pub type ProjectId = i32;

/// Role a member holds inside a group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MemberRole {
    Owner,
    #[default]
    Dev,
    Guest,
}

impl MemberRole {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Owner => "owner",
            Self::Dev => "dev",
            Self::Guest => "guest",
        }
    }

    /// Parses an exact role string.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "owner" => Some(Self::Owner),
            "dev" => Some(Self::Dev),
            "guest" => Some(Self::Guest),
            _ => None,
        }
    }

    /// Maps any absent or unrecognized role to `Dev`.
    #[must_use]
    pub fn normalize(value: Option<&str>) -> Self {
        value.and_then(Self::parse).unwrap_or_default()
    }

    /// Human-readable label used in activity entries.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Owner => "Owner",
            Self::Dev => "Developer",
            Self::Guest => "Guest",
        }
    }
}

impl std::fmt::Display for MemberRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Account-wide role of a user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    Admin,
    #[default]
    Member,
}

impl UserRole {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Member => "member",
        }
    }

    #[must_use]
    pub const fn is_admin(self) -> bool {
        matches!(self, Self::Admin)
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Role of a caller relative to one group.
///
/// `Member` is the catch-all tier for callers with no relation to the group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GroupRole {
    Admin,
    Owner,
    Dev,
    Guest,
    Member,
}

impl GroupRole {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Owner => "owner",
            Self::Dev => "dev",
            Self::Guest => "guest",
            Self::Member => "member",
        }
    }
}

impl From<MemberRole> for GroupRole {
    fn from(role: MemberRole) -> Self {
        match role {
            MemberRole::Owner => Self::Owner,
            MemberRole::Dev => Self::Dev,
            MemberRole::Guest => Self::Guest,
        }
    }
}

impl std::fmt::Display for GroupRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GroupType {
    #[default]
    Normal,
    Private,
}

impl GroupType {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::Private => "private",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectVisibility {
    Public,
    #[default]
    Private,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_known_roles() {
        assert_eq!(MemberRole::normalize(Some("owner")), MemberRole::Owner);
        assert_eq!(MemberRole::normalize(Some("dev")), MemberRole::Dev);
        assert_eq!(MemberRole::normalize(Some("guest")), MemberRole::Guest);
    }

    #[test]
    fn test_normalize_falls_back_to_dev() {
        assert_eq!(MemberRole::normalize(None), MemberRole::Dev);
        assert_eq!(MemberRole::normalize(Some("")), MemberRole::Dev);
        assert_eq!(MemberRole::normalize(Some("admin")), MemberRole::Dev);
        assert_eq!(MemberRole::normalize(Some("Owner")), MemberRole::Dev);
    }

    #[test]
    fn test_group_role_from_member_role() {
        assert_eq!(GroupRole::from(MemberRole::Owner), GroupRole::Owner);
        assert_eq!(GroupRole::from(MemberRole::Guest).as_str(), "guest");
    }

    #[test]
    fn test_role_serialization() {
        assert_eq!(
            serde_json::to_string(&MemberRole::Guest).unwrap(),
            "\"guest\""
        );
        assert_eq!(serde_json::to_string(&GroupType::Private).unwrap(), "\"private\"");
        assert_eq!(serde_json::to_string(&GroupRole::Member).unwrap(), "\"member\"");
    }
}
