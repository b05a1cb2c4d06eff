use diesel::prelude::*;

use crate::db::schema;
use apiary_core::model::NewAuditEntry;

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = schema::audit_log)]
pub struct NewAuditRow<'a> {
    pub content: &'a str,
    pub log_type: &'a str,
    pub uid: i32,
    pub username: &'a str,
    pub typeid: i32,
    pub add_time: chrono::DateTime<chrono::Utc>,
}

impl<'a> From<&'a NewAuditEntry> for NewAuditRow<'a> {
    fn from(entry: &'a NewAuditEntry) -> Self {
        Self {
            content: &entry.content,
            log_type: entry.kind.as_str(),
            uid: entry.uid,
            username: &entry.username,
            typeid: entry.typeid,
            add_time: entry.add_time,
        }
    }
}
