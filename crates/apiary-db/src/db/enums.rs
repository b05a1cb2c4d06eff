//! Database enum types with Diesel serialization.
//!
//! Each enum mirrors a CHECK constraint on a `TEXT` column and converts to and
//! from the matching `apiary_core::types` enum.

use diesel::deserialize::{self, FromSql, FromSqlRow};
use diesel::expression::AsExpression;
use diesel::pg::{Pg, PgValue};
use diesel::serialize::{self, IsNull, Output, ToSql};
use diesel::sql_types::Text;
use std::fmt;
use std::io::Write;

use apiary_core::types as core;

/// Maps to `project_group.group_type`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, AsExpression, FromSqlRow)]
#[diesel(sql_type = Text)]
pub enum GroupType {
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

impl ToSql<Text, Pg> for GroupType {
    fn to_sql<'b>(&'b self, out: &mut Output<'b, '_, Pg>) -> serialize::Result {
        out.write_all(self.as_str().as_bytes())?;
        Ok(IsNull::No)
    }
}

impl FromSql<Text, Pg> for GroupType {
    fn from_sql(bytes: PgValue<'_>) -> deserialize::Result<Self> {
        match bytes.as_bytes() {
            b"normal" => Ok(Self::Normal),
            b"private" => Ok(Self::Private),
            _ => Err("Unrecognized enum variant".into()),
        }
    }
}

impl From<GroupType> for core::GroupType {
    fn from(db_type: GroupType) -> Self {
        match db_type {
            GroupType::Normal => Self::Normal,
            GroupType::Private => Self::Private,
        }
    }
}

impl From<core::GroupType> for GroupType {
    fn from(core_type: core::GroupType) -> Self {
        match core_type {
            core::GroupType::Normal => Self::Normal,
            core::GroupType::Private => Self::Private,
        }
    }
}

/// Maps to `group_member.role` and `project_member.role`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, AsExpression, FromSqlRow)]
#[diesel(sql_type = Text)]
pub enum MemberRole {
    Owner,
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
}

impl ToSql<Text, Pg> for MemberRole {
    fn to_sql<'b>(&'b self, out: &mut Output<'b, '_, Pg>) -> serialize::Result {
        out.write_all(self.as_str().as_bytes())?;
        Ok(IsNull::No)
    }
}

impl FromSql<Text, Pg> for MemberRole {
    fn from_sql(bytes: PgValue<'_>) -> deserialize::Result<Self> {
        match bytes.as_bytes() {
            b"owner" => Ok(Self::Owner),
            b"dev" => Ok(Self::Dev),
            b"guest" => Ok(Self::Guest),
            _ => Err("Unrecognized enum variant".into()),
        }
    }
}

impl From<MemberRole> for core::MemberRole {
    fn from(db_role: MemberRole) -> Self {
        match db_role {
            MemberRole::Owner => Self::Owner,
            MemberRole::Dev => Self::Dev,
            MemberRole::Guest => Self::Guest,
        }
    }
}

impl From<core::MemberRole> for MemberRole {
    fn from(core_role: core::MemberRole) -> Self {
        match core_role {
            core::MemberRole::Owner => Self::Owner,
            core::MemberRole::Dev => Self::Dev,
            core::MemberRole::Guest => Self::Guest,
        }
    }
}

/// Maps to `app_user.role`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, AsExpression, FromSqlRow)]
#[diesel(sql_type = Text)]
pub enum UserRole {
    Admin,
    Member,
}

impl ToSql<Text, Pg> for UserRole {
    fn to_sql<'b>(&'b self, out: &mut Output<'b, '_, Pg>) -> serialize::Result {
        let s = match self {
            Self::Admin => "admin",
            Self::Member => "member",
        };
        out.write_all(s.as_bytes())?;
        Ok(IsNull::No)
    }
}

impl FromSql<Text, Pg> for UserRole {
    fn from_sql(bytes: PgValue<'_>) -> deserialize::Result<Self> {
        match bytes.as_bytes() {
            b"admin" => Ok(Self::Admin),
            b"member" => Ok(Self::Member),
            _ => Err("Unrecognized enum variant".into()),
        }
    }
}

impl From<UserRole> for core::UserRole {
    fn from(db_role: UserRole) -> Self {
        match db_role {
            UserRole::Admin => Self::Admin,
            UserRole::Member => Self::Member,
        }
    }
}

/// Maps to `project.visibility`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, AsExpression, FromSqlRow)]
#[diesel(sql_type = Text)]
pub enum ProjectVisibility {
    Public,
    Private,
}

impl ProjectVisibility {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Public => "public",
            Self::Private => "private",
        }
    }
}

impl ToSql<Text, Pg> for ProjectVisibility {
    fn to_sql<'b>(&'b self, out: &mut Output<'b, '_, Pg>) -> serialize::Result {
        out.write_all(self.as_str().as_bytes())?;
        Ok(IsNull::No)
    }
}

impl FromSql<Text, Pg> for ProjectVisibility {
    fn from_sql(bytes: PgValue<'_>) -> deserialize::Result<Self> {
        match bytes.as_bytes() {
            b"public" => Ok(Self::Public),
            b"private" => Ok(Self::Private),
            _ => Err("Unrecognized enum variant".into()),
        }
    }
}

impl From<ProjectVisibility> for core::ProjectVisibility {
    fn from(db_visibility: ProjectVisibility) -> Self {
        match db_visibility {
            ProjectVisibility::Public => Self::Public,
            ProjectVisibility::Private => Self::Private,
        }
    }
}

impl fmt::Display for GroupType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for MemberRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_member_role_round_trips_through_core() {
        for role in [
            core::MemberRole::Owner,
            core::MemberRole::Dev,
            core::MemberRole::Guest,
        ] {
            let db_role = MemberRole::from(role);
            assert_eq!(db_role.as_str(), role.as_str());
            assert_eq!(core::MemberRole::from(db_role), role);
        }
    }

    #[test]
    fn test_group_type_strings_match_core() {
        assert_eq!(GroupType::from(core::GroupType::Private).as_str(), "private");
        assert_eq!(GroupType::Normal.to_string(), core::GroupType::Normal.as_str());
    }
}
