use super::*;

fn single_user_settings(uid: i32) -> Settings {
    Settings {
        database: DatabaseConfig {
            url: "postgres://localhost/apiary_test".to_string(),
            max_connections: 1,
        },
        auth: AuthConfig {
            method: AuthMethod::SingleUser,
            single_user: Some(SingleUserAuthConfig { uid }),
            header: None,
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

#[test]
fn test_missing_config_is_an_invariant_violation() {
    let depot = salvo::Depot::new();

    let err = get_config_from_depot(&depot).unwrap_err();
    assert!(matches!(
        err,
        AppError::CoreError(apiary_core::error::CoreError::InvariantViolation(_))
    ));
}

#[test]
fn test_injected_config_is_returned() {
    let mut depot = salvo::Depot::new();
    depot.inject(Arc::new(single_user_settings(7)));

    let settings = get_config_from_depot(&depot).unwrap();
    assert_eq!(settings.auth.single_user.as_ref().map(|u| u.uid), Some(7));
}
