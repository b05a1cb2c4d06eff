//! Handler tests for the group endpoints.

use std::sync::Arc;

use salvo::http::StatusCode;
use salvo::test::{ResponseExt, TestClient};
use salvo::{Router, Service};
use serde_json::{Value, json};

use apiary_core::config::{
    AuthConfig, AuthMethod, DatabaseConfig, GroupsConfig, HeaderAuthConfig, LoggingConfig,
    ServerConfig, Settings,
};
use apiary_core::constants::DEFAULT_AUTH_HEADER;
use apiary_core::types::{ProjectVisibility, UserRole};
use apiary_service::auth::casbin::init_casbin;
use apiary_service::group::{GroupOptions, GroupPorts, GroupService};
use apiary_service::store::memory::MemoryStore;

use crate::app::api::routes;
use crate::config::ConfigHandler;
use crate::group_handler::GroupServiceHandler;
use crate::user_store_handler::UserStoreHandler;

const BASE: &str = "http://127.0.0.1:5800/api";
const ADMIN: &str = "1";
const ALICE: &str = "2";
const BOB: &str = "3";

fn header_settings() -> Settings {
    Settings {
        database: DatabaseConfig {
            url: "postgres://localhost/apiary_test".to_string(),
            max_connections: 1,
        },
        auth: AuthConfig {
            method: AuthMethod::Header,
            single_user: None,
            header: Some(HeaderAuthConfig {
                name: DEFAULT_AUTH_HEADER.to_string(),
            }),
        },
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 5800,
        },
        logging: LoggingConfig {
            level: "debug".to_string(),
        },
        groups: GroupsConfig::default(),
    }
}

async fn setup() -> (Service, Arc<MemoryStore>) {
    let settings = header_settings();
    let store = Arc::new(MemoryStore::new());
    store.add_user(1, "root", UserRole::Admin);
    store.add_user(2, "alice", UserRole::Member);
    store.add_user(3, "bob", UserRole::Member);

    let enforcer = Arc::new(init_casbin().await.unwrap());
    let service = GroupService::new(
        GroupPorts::from_store(Arc::clone(&store), enforcer),
        GroupOptions::from(&settings.groups),
    );

    let router = Router::new()
        .hoop(ConfigHandler { settings })
        .hoop(UserStoreHandler {
            users: store.clone(),
        })
        .hoop(GroupServiceHandler {
            service: Arc::new(service),
        })
        .push(routes());

    (Service::new(router), store)
}

async fn get_as(service: &Service, uid: &str, path: &str) -> Value {
    TestClient::get(format!("{BASE}{path}"))
        .add_header(DEFAULT_AUTH_HEADER, uid, true)
        .send(service)
        .await
        .take_json::<Value>()
        .await
        .unwrap()
}

async fn post_as(service: &Service, uid: &str, path: &str, body: Value) -> Value {
    TestClient::post(format!("{BASE}{path}"))
        .add_header(DEFAULT_AUTH_HEADER, uid, true)
        .json(&body)
        .send(service)
        .await
        .take_json::<Value>()
        .await
        .unwrap()
}

async fn create_group(service: &Service, name: &str) -> i64 {
    let body = post_as(
        service,
        ADMIN,
        "/group/add",
        json!({"group_name": name, "owner_uids": [2]}),
    )
    .await;
    assert_eq!(body["errcode"], 0, "{body}");
    body["data"]["_id"].as_i64().unwrap()
}

#[test_log::test(tokio::test)]
async fn public_requests_must_log_in() {
    let (service, _store) = setup().await;

    let mut res = TestClient::get(format!("{BASE}/group/list"))
        .send(&service)
        .await;
    assert_eq!(res.status_code, Some(StatusCode::OK));
    let body: Value = res.take_json().await.unwrap();
    assert_eq!(body["errcode"], 40011);
    assert!(body["data"].is_null());

    let body = get_as(&service, "999", "/group/list").await;
    assert_eq!(body["errcode"], 40011);
}

#[test_log::test(tokio::test)]
async fn list_starts_with_private_group() {
    let (service, _store) = setup().await;

    let body = get_as(&service, ALICE, "/group/list").await;
    assert_eq!(body["errcode"], 0);
    assert_eq!(body["errmsg"], "success");

    let groups = body["data"].as_array().unwrap();
    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0]["group_name"], "Personal Space");
    assert_eq!(groups[0]["role"], "owner");
    assert_eq!(groups[0]["type"], "private");
}

#[test_log::test(tokio::test)]
async fn add_returns_projection_and_rejects_duplicates() {
    let (service, store) = setup().await;

    let body = post_as(
        &service,
        ADMIN,
        "/group/add",
        json!({"group_name": "core", "group_desc": "backend", "owner_uids": ["2", 99]}),
    )
    .await;
    assert_eq!(body["errcode"], 0);
    let data = body["data"].as_object().unwrap();
    let mut keys: Vec<_> = data.keys().map(String::as_str).collect();
    keys.sort_unstable();
    assert_eq!(keys, vec!["_id", "group_desc", "group_name", "members", "type", "uid"]);
    assert_eq!(data["members"][0]["uid"], 2);
    assert_eq!(data["members"][0]["role"], "owner");

    let body = post_as(&service, ADMIN, "/group/add", json!({"group_name": "core"})).await;
    assert_eq!(body["errcode"], 401);
    assert_eq!(store.group_count(), 1);

    let body = post_as(&service, ALICE, "/group/add", json!({"group_name": "other"})).await;
    assert_eq!(body["errcode"], 401);
}

#[test_log::test(tokio::test)]
async fn get_validates_id() {
    let (service, _store) = setup().await;
    let id = create_group(&service, "core").await;

    let body = get_as(&service, BOB, "/group/get").await;
    assert_eq!(body["errcode"], 400);

    let body = get_as(&service, BOB, "/group/get?id=abc").await;
    assert_eq!(body["errcode"], 400);

    let body = get_as(&service, BOB, &format!("/group/get?id={id}")).await;
    assert_eq!(body["errcode"], 0);
    assert_eq!(body["data"]["role"], "member");
    assert_eq!(body["data"]["group_name"], "core");
}

#[test_log::test(tokio::test)]
async fn add_member_partitions_request() {
    let (service, _store) = setup().await;
    let id = create_group(&service, "core").await;

    let body = post_as(
        &service,
        ALICE,
        "/group/add_member",
        json!({"id": id.to_string(), "member_uids": [2, "3", 404, 1], "role": "owner"}),
    )
    .await;
    assert_eq!(body["errcode"], 0);
    let data = &body["data"];
    assert_eq!(data["add_members"].as_array().unwrap().len(), 1);
    assert_eq!(data["add_members"][0]["uid"], 3);
    assert_eq!(data["add_members"][0]["role"], "owner");
    assert_eq!(data["exist_members"][0]["uid"], 2);
    assert_eq!(data["no_members"], json!([404]));

    let body = get_as(&service, BOB, &format!("/group/get_member_list?id={id}")).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 2);

    let body = post_as(&service, ALICE, "/group/add_member", json!({"id": id})).await;
    assert_eq!(body["errcode"], 400);
}

#[test_log::test(tokio::test)]
async fn member_changes_require_danger() {
    let (service, _store) = setup().await;
    let id = create_group(&service, "core").await;

    let body = post_as(
        &service,
        BOB,
        "/group/change_member_role",
        json!({"id": id, "member_uid": 3, "role": "guest"}),
    )
    .await;
    assert_eq!(body["errcode"], 400);
    assert_eq!(body["errmsg"], "group member does not exist");

    let body = post_as(
        &service,
        BOB,
        "/group/del_member",
        json!({"id": id, "member_uid": 2}),
    )
    .await;
    assert_eq!(body["errcode"], 405);

    let body = post_as(
        &service,
        ALICE,
        "/group/change_member_role",
        json!({"id": id, "member_uid": 2, "role": "guest"}),
    )
    .await;
    assert_eq!(body["errcode"], 0);
    assert_eq!(body["data"]["modified"], 1);
}

#[test_log::test(tokio::test)]
async fn up_and_del() {
    let (service, store) = setup().await;
    let id = create_group(&service, "core").await;
    let project = store.add_project(
        i32::try_from(id).unwrap(),
        "api",
        ProjectVisibility::Public,
        &[],
    );
    store.add_interfaces(project, 3);

    let body = post_as(&service, ALICE, "/group/up", json!({"group_name": "x"})).await;
    assert_eq!(body["errcode"], 402);

    let body = post_as(
        &service,
        ALICE,
        "/group/up",
        json!({"id": id, "group_name": "platform", "group_desc": "all of it"}),
    )
    .await;
    assert_eq!(body["errcode"], 0);

    let body = post_as(&service, ALICE, "/group/del", json!({"id": id})).await;
    assert_eq!(body["errcode"], 401);

    let body = post_as(&service, ADMIN, "/group/del", json!({})).await;
    assert_eq!(body["errcode"], 402);

    let body = post_as(&service, ADMIN, "/group/del", json!({"id": id})).await;
    assert_eq!(body["errcode"], 0);
    assert_eq!(body["data"]["deleted"], 1);
    assert_eq!(store.interface_count(project), 0);
    assert_eq!(store.group_count(), 0);
}

#[test_log::test(tokio::test)]
async fn malformed_body_is_a_validation_error() {
    let (service, _store) = setup().await;

    let body = TestClient::post(format!("{BASE}/group/up"))
        .add_header(DEFAULT_AUTH_HEADER, ALICE, true)
        .raw_json("{not json")
        .send(&service)
        .await
        .take_json::<Value>()
        .await
        .unwrap();
    assert_eq!(body["errcode"], 400);
}

#[test_log::test(tokio::test)]
async fn missing_service_is_a_server_error() {
    let router = Router::new()
        .hoop(ConfigHandler {
            settings: header_settings(),
        })
        .hoop(UserStoreHandler {
            users: Arc::new(MemoryStore::new()),
        })
        .push(routes());

    let res = TestClient::get(format!("{BASE}/group/list"))
        .send(router)
        .await;
    assert_eq!(res.status_code, Some(StatusCode::INTERNAL_SERVER_ERROR));
}

#[test_log::test(tokio::test)]
async fn app_endpoints() {
    let (service, _store) = setup().await;

    let text = TestClient::get(format!("{BASE}/app/healthcheck"))
        .send(&service)
        .await
        .take_string()
        .await
        .unwrap();
    assert_eq!(text, "OK");

    let body = get_as(&service, BOB, "/app/whoami").await;
    assert_eq!(body["uid"], 3);
    assert_eq!(body["username"], "bob");

    let body = TestClient::get(format!("{BASE}/app/whoami"))
        .send(&service)
        .await
        .take_json::<Value>()
        .await
        .unwrap();
    assert_eq!(body["status"], "public");
}
