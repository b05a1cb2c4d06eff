//! Query functions for project groups and their members.

use diesel::prelude::*;
use diesel_async::{AsyncPgConnection, RunQueryDsl};

use crate::db::enums::{GroupType, MemberRole};
use crate::db::schema::{group_member, project_group};
use crate::model::group::{GroupChangeset, GroupRow, MemberRow, NewGroupRow, NewMemberRow};

type BoxedQuery<'a, T> = project_group::BoxedQuery<'a, diesel::pg::Pg, T>;

/// ## Summary
/// Returns a query to select all groups in creation order.
#[must_use]
pub fn all() -> BoxedQuery<'static, diesel::dsl::AsSelect<GroupRow, diesel::pg::Pg>> {
    project_group::table
        .select(GroupRow::as_select())
        .order(project_group::id.asc())
        .into_boxed()
}

/// ## Summary
/// Returns a query to find a group by ID.
#[must_use]
pub fn by_id(id: i32) -> BoxedQuery<'static, diesel::dsl::AsSelect<GroupRow, diesel::pg::Pg>> {
    all().filter(project_group::id.eq(id))
}

/// ## Summary
/// Returns a query to find the private group owned by `uid`.
#[must_use]
pub fn private_of(uid: i32) -> BoxedQuery<'static, diesel::dsl::AsSelect<GroupRow, diesel::pg::Pg>> {
    all()
        .filter(project_group::owner_uid.eq(uid))
        .filter(project_group::group_type.eq(GroupType::Private))
}

/// ## Summary
/// Retrieves a group row by ID.
///
/// ## Errors
/// Returns a database error if the query fails.
pub async fn get_group(
    conn: &mut AsyncPgConnection,
    id: i32,
) -> QueryResult<Option<GroupRow>> {
    by_id(id).get_result::<GroupRow>(conn).await.optional()
}

/// ## Summary
/// Retrieves the private group row of a user.
///
/// ## Errors
/// Returns a database error if the query fails.
pub async fn get_private_group(
    conn: &mut AsyncPgConnection,
    uid: i32,
) -> QueryResult<Option<GroupRow>> {
    private_of(uid)
        .get_result::<GroupRow>(conn)
        .await
        .optional()
}

/// ## Summary
/// Lists all group rows.
///
/// ## Errors
/// Returns a database error if the query fails.
pub async fn list_groups(conn: &mut AsyncPgConnection) -> QueryResult<Vec<GroupRow>> {
    all().get_results::<GroupRow>(conn).await
}

/// ## Summary
/// Counts groups with exactly this name.
///
/// ## Errors
/// Returns a database error if the query fails.
pub async fn count_by_name(conn: &mut AsyncPgConnection, name: &str) -> QueryResult<i64> {
    project_group::table
        .filter(project_group::group_name.eq(name))
        .count()
        .get_result(conn)
        .await
}

/// ## Summary
/// Loads the members of one group in insertion order.
///
/// ## Errors
/// Returns a database error if the query fails.
pub async fn load_members(
    conn: &mut AsyncPgConnection,
    group_id: i32,
) -> QueryResult<Vec<MemberRow>> {
    group_member::table
        .filter(group_member::group_id.eq(group_id))
        .order(group_member::seq.asc())
        .select(MemberRow::as_select())
        .load(conn)
        .await
}

/// ## Summary
/// Loads the members of several groups, grouped in the order of `groups`.
///
/// ## Errors
/// Returns a database error if the query fails.
pub async fn load_members_grouped(
    conn: &mut AsyncPgConnection,
    groups: &[GroupRow],
) -> QueryResult<Vec<Vec<MemberRow>>> {
    let members = MemberRow::belonging_to(groups)
        .order(group_member::seq.asc())
        .select(MemberRow::as_select())
        .load(conn)
        .await?;

    Ok(members.grouped_by(groups))
}

/// ## Summary
/// Finds one member of a group.
///
/// ## Errors
/// Returns a database error if the query fails.
pub async fn find_member(
    conn: &mut AsyncPgConnection,
    group_id: i32,
    uid: i32,
) -> QueryResult<Option<MemberRow>> {
    group_member::table
        .filter(group_member::group_id.eq(group_id))
        .filter(group_member::uid.eq(uid))
        .select(MemberRow::as_select())
        .first(conn)
        .await
        .optional()
}

/// ## Summary
/// Inserts a new group and returns the inserted record.
///
/// ## Errors
/// Returns a database error if the insert fails.
pub async fn insert_group(
    conn: &mut AsyncPgConnection,
    new_group: &NewGroupRow<'_>,
) -> QueryResult<GroupRow> {
    diesel::insert_into(project_group::table)
        .values(new_group)
        .returning(GroupRow::as_returning())
        .get_result(conn)
        .await
}

/// ## Summary
/// Inserts members, skipping users that are already in the group.
///
/// ## Errors
/// Returns a database error if the insert fails.
pub async fn insert_members(
    conn: &mut AsyncPgConnection,
    members: &[NewMemberRow<'_>],
) -> QueryResult<usize> {
    if members.is_empty() {
        return Ok(0);
    }

    diesel::insert_into(group_member::table)
        .values(members)
        .on_conflict_do_nothing()
        .execute(conn)
        .await
}

/// ## Summary
/// Sets the role of one member.
///
/// ## Errors
/// Returns a database error if the update fails.
pub async fn update_member_role(
    conn: &mut AsyncPgConnection,
    group_id: i32,
    uid: i32,
    role: MemberRole,
) -> QueryResult<usize> {
    diesel::update(group_member::table)
        .filter(group_member::group_id.eq(group_id))
        .filter(group_member::uid.eq(uid))
        .set(group_member::role.eq(role))
        .execute(conn)
        .await
}

/// ## Summary
/// Removes one member from a group.
///
/// ## Errors
/// Returns a database error if the delete fails.
pub async fn delete_member(
    conn: &mut AsyncPgConnection,
    group_id: i32,
    uid: i32,
) -> QueryResult<usize> {
    diesel::delete(
        group_member::table
            .filter(group_member::group_id.eq(group_id))
            .filter(group_member::uid.eq(uid)),
    )
    .execute(conn)
    .await
}

/// ## Summary
/// Updates the name and description of a group.
///
/// ## Errors
/// Returns a database error if the update fails.
pub async fn update_group(
    conn: &mut AsyncPgConnection,
    id: i32,
    changes: &GroupChangeset<'_>,
) -> QueryResult<usize> {
    diesel::update(project_group::table.filter(project_group::id.eq(id)))
        .set(changes)
        .execute(conn)
        .await
}

/// ## Summary
/// Deletes a group and its member rows.
///
/// ## Errors
/// Returns a database error if the delete fails.
pub async fn delete_group(conn: &mut AsyncPgConnection, id: i32) -> QueryResult<usize> {
    diesel::delete(group_member::table.filter(group_member::group_id.eq(id)))
        .execute(conn)
        .await?;

    diesel::delete(project_group::table.filter(project_group::id.eq(id)))
        .execute(conn)
        .await
}
