//! Query functions for the per-project children removed by the group cascade.

use diesel::prelude::*;
use diesel_async::{AsyncPgConnection, RunQueryDsl};

use crate::db::schema::{interface, interface_case, interface_col};

/// ## Summary
/// Deletes the interfaces of a project.
///
/// ## Errors
/// Returns a database error if the delete fails.
pub async fn delete_interfaces(
    conn: &mut AsyncPgConnection,
    project_id: i32,
) -> QueryResult<usize> {
    diesel::delete(interface::table.filter(interface::project_id.eq(project_id)))
        .execute(conn)
        .await
}

/// ## Summary
/// Deletes the interface test cases of a project.
///
/// ## Errors
/// Returns a database error if the delete fails.
pub async fn delete_cases(conn: &mut AsyncPgConnection, project_id: i32) -> QueryResult<usize> {
    diesel::delete(interface_case::table.filter(interface_case::project_id.eq(project_id)))
        .execute(conn)
        .await
}

/// ## Summary
/// Deletes the interface collections of a project.
///
/// ## Errors
/// Returns a database error if the delete fails.
pub async fn delete_collections(
    conn: &mut AsyncPgConnection,
    project_id: i32,
) -> QueryResult<usize> {
    diesel::delete(interface_col::table.filter(interface_col::project_id.eq(project_id)))
        .execute(conn)
        .await
}
