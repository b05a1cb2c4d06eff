// Mirrors migrations/2026-01-01-000000_create_groups/up.sql.

diesel::table! {
    app_user (id) {
        id -> Int4,
        username -> Text,
        email -> Text,
        role -> Text,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    project_group (id) {
        id -> Int4,
        group_name -> Text,
        group_desc -> Nullable<Text>,
        owner_uid -> Int4,
        group_type -> Text,
        add_time -> Timestamptz,
        up_time -> Timestamptz,
    }
}

diesel::table! {
    group_member (group_id, uid) {
        group_id -> Int4,
        uid -> Int4,
        role -> Text,
        username -> Text,
        email -> Text,
        seq -> Int8,
    }
}

diesel::table! {
    project (id) {
        id -> Int4,
        group_id -> Int4,
        name -> Text,
        visibility -> Text,
        add_time -> Timestamptz,
        up_time -> Timestamptz,
    }
}

diesel::table! {
    project_member (project_id, uid) {
        project_id -> Int4,
        uid -> Int4,
        role -> Text,
    }
}

diesel::table! {
    interface (id) {
        id -> Int4,
        project_id -> Int4,
        title -> Text,
        method -> Text,
        path -> Text,
    }
}

diesel::table! {
    interface_case (id) {
        id -> Int4,
        project_id -> Int4,
        col_id -> Int4,
        casename -> Text,
    }
}

diesel::table! {
    interface_col (id) {
        id -> Int4,
        project_id -> Int4,
        name -> Text,
    }
}

diesel::table! {
    audit_log (id) {
        id -> Int4,
        content -> Text,
        log_type -> Text,
        uid -> Int4,
        username -> Text,
        typeid -> Int4,
        add_time -> Timestamptz,
    }
}

diesel::joinable!(group_member -> project_group (group_id));
diesel::joinable!(project -> project_group (group_id));
diesel::joinable!(project_member -> project (project_id));

diesel::allow_tables_to_appear_in_same_query!(
    app_user,
    project_group,
    group_member,
    project,
    project_member,
    interface,
    interface_case,
    interface_col,
    audit_log,
);
