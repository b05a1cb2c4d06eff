//! Request parameters of the group endpoints.
//!
//! Every field is optional at the type level so that presence checks happen
//! in the service in a fixed order.

use serde::Deserialize;

use apiary_core::de::{id_list, opt_id};
use apiary_core::types::{GroupId, UserId};

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct GroupIdParams {
    #[serde(deserialize_with = "opt_id")]
    pub id: Option<GroupId>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AddGroupParams {
    pub group_name: Option<String>,
    pub group_desc: Option<String>,
    #[serde(deserialize_with = "id_list")]
    pub owner_uids: Vec<UserId>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AddMemberParams {
    #[serde(deserialize_with = "opt_id")]
    pub id: Option<GroupId>,
    #[serde(deserialize_with = "id_list")]
    pub member_uids: Vec<UserId>,
    pub role: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct MemberRoleParams {
    #[serde(deserialize_with = "opt_id")]
    pub id: Option<GroupId>,
    #[serde(deserialize_with = "opt_id")]
    pub member_uid: Option<UserId>,
    pub role: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct DelMemberParams {
    #[serde(deserialize_with = "opt_id")]
    pub id: Option<GroupId>,
    #[serde(deserialize_with = "opt_id")]
    pub member_uid: Option<UserId>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct UpdateGroupParams {
    #[serde(deserialize_with = "opt_id")]
    pub id: Option<GroupId>,
    pub group_name: Option<String>,
    pub group_desc: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_member_params_accept_string_ids() {
        let params: AddMemberParams =
            serde_json::from_str(r#"{"id": "3", "member_uids": [4, "5"], "role": "owner"}"#)
                .unwrap();

        assert_eq!(params.id, Some(3));
        assert_eq!(params.member_uids, vec![4, 5]);
        assert_eq!(params.role.as_deref(), Some("owner"));
    }

    #[test]
    fn empty_body_leaves_everything_absent() {
        let params: UpdateGroupParams = serde_json::from_str("{}").unwrap();

        assert!(params.id.is_none());
        assert!(params.group_name.is_none());
        assert!(params.group_desc.is_none());
    }
}
