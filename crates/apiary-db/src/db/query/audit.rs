//! Query functions for the activity log.

use diesel_async::{AsyncPgConnection, RunQueryDsl};

use crate::db::schema::audit_log;
use crate::model::audit::NewAuditRow;

/// ## Summary
/// Appends one activity entry.
///
/// ## Errors
/// Returns a database error if the insert fails.
pub async fn insert_entry(
    conn: &mut AsyncPgConnection,
    entry: &NewAuditRow<'_>,
) -> diesel::QueryResult<usize> {
    diesel::insert_into(audit_log::table)
        .values(entry)
        .execute(conn)
        .await
}
