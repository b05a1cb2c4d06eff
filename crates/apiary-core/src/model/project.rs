use serde::{Deserialize, Serialize};

use crate::types::{GroupId, ProjectId, ProjectVisibility};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    #[serde(rename = "_id")]
    pub id: ProjectId,
    pub group_id: GroupId,
    pub name: String,
    pub visibility: ProjectVisibility,
}
