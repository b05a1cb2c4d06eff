//! Tests for the embedded group-role policy.

use casbin::CoreApi;

use super::casbin::init_casbin;

async fn allowed(role: &str, action: &str) -> bool {
    let enforcer = init_casbin().await.unwrap();
    enforcer.enforce((role, action)).unwrap()
}

#[test_log::test(tokio::test)]
async fn owner_inherits_every_action() {
    for action in ["view", "edit", "danger"] {
        assert!(allowed("owner", action).await, "owner should be granted {action}");
        assert!(allowed("admin", action).await, "admin should be granted {action}");
    }
}

#[test_log::test(tokio::test)]
async fn dev_cannot_perform_danger() {
    assert!(allowed("dev", "view").await);
    assert!(allowed("dev", "edit").await);
    assert!(!allowed("dev", "danger").await);
}

#[test_log::test(tokio::test)]
async fn guest_only_views() {
    assert!(allowed("guest", "view").await);
    assert!(!allowed("guest", "edit").await);
    assert!(!allowed("guest", "danger").await);
}

#[test_log::test(tokio::test)]
async fn member_tier_is_granted_nothing() {
    for action in ["view", "edit", "danger"] {
        assert!(!allowed("member", action).await);
    }
}
