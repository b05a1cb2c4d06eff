//! Tests for configuration module.

use super::*;

fn from_toml(source: &str) -> Settings {
    Config::builder()
        .set_default("server.host", "0.0.0.0")
        .and_then(|b| b.set_default("server.port", 8698))
        .and_then(|b| b.set_default("database.max_connections", 4))
        .and_then(|b| b.set_default("logging.level", "debug"))
        .and_then(|b| b.set_default("groups.private_label", DEFAULT_PRIVATE_GROUP_LABEL))
        .and_then(|b| b.set_default("groups.cascade", "sequenced"))
        .expect("defaults are valid")
        .add_source(config::File::from_str(source, config::FileFormat::Toml))
        .build()
        .expect("config builds")
        .try_deserialize::<Settings>()
        .expect("settings deserialize")
}

#[test_log::test]
fn test_minimal_toml_uses_defaults() {
    tracing::debug!("Loading minimal settings");

    let settings = from_toml(
        r#"
        [database]
        url = "postgres://localhost/apiary"

        [auth]
        method = "single_user"
        single_user = { uid = 1 }
        "#,
    );

    assert_eq!(settings.server.bind_addr(), "0.0.0.0:8698");
    assert_eq!(settings.database.max_connections, 4);
    assert_eq!(settings.logging.level, "debug");
    assert_eq!(settings.groups.private_label, DEFAULT_PRIVATE_GROUP_LABEL);
    assert_eq!(settings.groups.cascade, CascadeMode::Sequenced);
    assert_eq!(settings.auth.method, AuthMethod::SingleUser);
    assert_eq!(settings.auth.single_user.map(|u| u.uid), Some(1));
}

#[test]
fn test_detached_cascade_and_header_auth() {
    let settings = from_toml(
        r#"
        [database]
        url = "postgres://localhost/apiary"

        [auth]
        method = "header"
        header = { name = "x-forwarded-uid" }

        [groups]
        private_label = "My Space"
        cascade = "detached"
        "#,
    );

    assert_eq!(settings.auth.method, AuthMethod::Header);
    assert_eq!(settings.auth.header_name(), "x-forwarded-uid");
    assert_eq!(settings.groups.private_label, "My Space");
    assert_eq!(settings.groups.cascade, CascadeMode::Detached);
}

#[test]
fn test_header_name_falls_back_to_default() {
    let config = AuthConfig {
        method: AuthMethod::Header,
        single_user: None,
        header: None,
    };

    assert_eq!(config.header_name(), DEFAULT_AUTH_HEADER);
}

#[test]
fn test_groups_config_default() {
    let groups = GroupsConfig::default();

    assert_eq!(groups.private_label, DEFAULT_PRIVATE_GROUP_LABEL);
    assert_eq!(groups.cascade, CascadeMode::Sequenced);
}
