use diesel::{pg::Pg, prelude::*};

use crate::db::{enums, schema};
use apiary_core::model::{Group, Member};

#[derive(Debug, Clone, PartialEq, Eq, Queryable, Selectable, Identifiable)]
#[diesel(table_name = schema::project_group)]
#[diesel(check_for_backend(Pg))]
pub struct GroupRow {
    pub id: i32,
    pub group_name: String,
    pub group_desc: Option<String>,
    pub owner_uid: i32,
    pub group_type: enums::GroupType,
    pub add_time: chrono::DateTime<chrono::Utc>,
    pub up_time: chrono::DateTime<chrono::Utc>,
}

impl GroupRow {
    /// Attaches the ordered member rows of this group.
    #[must_use]
    pub fn into_group(self, members: Vec<MemberRow>) -> Group {
        Group {
            id: self.id,
            group_name: self.group_name,
            group_desc: self.group_desc,
            uid: self.owner_uid,
            group_type: self.group_type.into(),
            add_time: self.add_time,
            up_time: self.up_time,
            members: members.into_iter().map(Member::from).collect(),
        }
    }
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = schema::project_group)]
pub struct NewGroupRow<'a> {
    pub group_name: &'a str,
    pub group_desc: Option<&'a str>,
    pub owner_uid: i32,
    pub group_type: enums::GroupType,
    pub add_time: chrono::DateTime<chrono::Utc>,
    pub up_time: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = schema::project_group)]
#[diesel(treat_none_as_null = true)]
pub struct GroupChangeset<'a> {
    pub group_name: &'a str,
    pub group_desc: Option<&'a str>,
    pub up_time: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Queryable, Selectable, Identifiable, Associations)]
#[diesel(table_name = schema::group_member)]
#[diesel(primary_key(group_id, uid))]
#[diesel(check_for_backend(Pg))]
#[diesel(belongs_to(GroupRow, foreign_key = group_id))]
pub struct MemberRow {
    pub group_id: i32,
    pub uid: i32,
    pub role: enums::MemberRole,
    pub username: String,
    pub email: String,
}

impl From<MemberRow> for Member {
    fn from(row: MemberRow) -> Self {
        Self {
            uid: row.uid,
            role: row.role.into(),
            username: row.username,
            email: row.email,
        }
    }
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = schema::group_member)]
pub struct NewMemberRow<'a> {
    pub group_id: i32,
    pub uid: i32,
    pub role: enums::MemberRole,
    pub username: &'a str,
    pub email: &'a str,
}

impl<'a> NewMemberRow<'a> {
    #[must_use]
    pub fn from_member(group_id: i32, member: &'a Member) -> Self {
        Self {
            group_id,
            uid: member.uid,
            role: member.role.into(),
            username: &member.username,
            email: &member.email,
        }
    }
}
