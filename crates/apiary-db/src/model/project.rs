use diesel::{pg::Pg, prelude::*};

use crate::db::{enums, schema};
use apiary_core::model::Project;

#[derive(Debug, Clone, PartialEq, Eq, Queryable, Selectable, Identifiable)]
#[diesel(table_name = schema::project)]
#[diesel(check_for_backend(Pg))]
pub struct ProjectRow {
    pub id: i32,
    pub group_id: i32,
    pub name: String,
    pub visibility: enums::ProjectVisibility,
}

impl From<ProjectRow> for Project {
    fn from(row: ProjectRow) -> Self {
        Self {
            id: row.id,
            group_id: row.group_id,
            name: row.name,
            visibility: row.visibility.into(),
        }
    }
}
