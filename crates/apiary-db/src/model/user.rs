use diesel::{pg::Pg, prelude::*};

use crate::db::{enums, schema};
use apiary_core::model::UserProfile;

#[derive(Debug, Clone, PartialEq, Eq, Queryable, Selectable, Identifiable)]
#[diesel(table_name = schema::app_user)]
#[diesel(check_for_backend(Pg))]
pub struct UserRow {
    pub id: i32,
    pub username: String,
    pub email: String,
    pub role: enums::UserRole,
}

impl From<UserRow> for UserProfile {
    fn from(row: UserRow) -> Self {
        Self {
            uid: row.id,
            username: row.username,
            email: row.email,
            role: row.role.into(),
        }
    }
}
