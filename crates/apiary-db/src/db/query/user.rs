//! Query functions for users.

use diesel::prelude::*;
use diesel_async::{AsyncPgConnection, RunQueryDsl};

use crate::db::schema::app_user;
use crate::model::user::UserRow;

/// ## Summary
/// Retrieves a user by ID.
///
/// ## Errors
/// Returns a database error if the query fails.
pub async fn get_user(conn: &mut AsyncPgConnection, id: i32) -> QueryResult<Option<UserRow>> {
    app_user::table
        .filter(app_user::id.eq(id))
        .select(UserRow::as_select())
        .first(conn)
        .await
        .optional()
}
