//! Query functions for projects.

use diesel::prelude::*;
use diesel_async::{AsyncPgConnection, RunQueryDsl};

use crate::db::enums::ProjectVisibility;
use crate::db::schema::{project, project_member};
use crate::model::project::ProjectRow;

/// ## Summary
/// Lists the projects of a group.
///
/// ## Errors
/// Returns a database error if the query fails.
pub async fn list_by_group(
    conn: &mut AsyncPgConnection,
    group_id: i32,
) -> QueryResult<Vec<ProjectRow>> {
    project::table
        .filter(project::group_id.eq(group_id))
        .order(project::id.asc())
        .select(ProjectRow::as_select())
        .load(conn)
        .await
}

/// ## Summary
/// Counts the public projects of a group.
///
/// ## Errors
/// Returns a database error if the query fails.
pub async fn count_public(conn: &mut AsyncPgConnection, group_id: i32) -> QueryResult<i64> {
    project::table
        .filter(project::group_id.eq(group_id))
        .filter(project::visibility.eq(ProjectVisibility::Public))
        .count()
        .get_result(conn)
        .await
}

/// ## Summary
/// Counts the projects of a group whose member list contains `uid`.
///
/// ## Errors
/// Returns a database error if the query fails.
pub async fn count_with_member(
    conn: &mut AsyncPgConnection,
    group_id: i32,
    uid: i32,
) -> QueryResult<i64> {
    project::table
        .inner_join(project_member::table)
        .filter(project::group_id.eq(group_id))
        .filter(project_member::uid.eq(uid))
        .count()
        .get_result(conn)
        .await
}

/// ## Summary
/// Deletes every project of a group.
///
/// ## Errors
/// Returns a database error if the delete fails.
pub async fn delete_by_group(conn: &mut AsyncPgConnection, group_id: i32) -> QueryResult<usize> {
    diesel::delete(project::table.filter(project::group_id.eq(group_id)))
        .execute(conn)
        .await
}
