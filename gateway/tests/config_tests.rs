use gateway::config::GatewayConfig;
use gateway::constants::env;
use serial_test::serial;

const REQUIRED: [(&str, &str); 4] = [
    (env::MONGODB_CONNECTION_URL, "mongodb://localhost:27017"),
    (env::DATABASE_NAME, "catalyst"),
    (env::COLLECTION_NAME, "documents"),
    (env::SECRET_KEY, "s3cret"),
];

fn clear_env() {
    for (key, _) in REQUIRED {
        std::env::remove_var(key);
    }
    std::env::remove_var(env::SERVER_PORT);
}

#[test]
#[serial]
fn test_load_config_from_env() {
    clear_env();
    for (key, value) in REQUIRED {
        std::env::set_var(key, value);
    }
    std::env::set_var(env::SERVER_PORT, "9090");

    let config = GatewayConfig::from_env().expect("Failed to load config");
    assert_eq!(config.connection_url, "mongodb://localhost:27017");
    assert_eq!(config.database_name, "catalyst");
    assert_eq!(config.collection_name, "documents");
    assert_eq!(config.secret_key, "s3cret");
    assert_eq!(config.server_port, 9090);

    clear_env();
}

#[test]
#[serial]
fn test_missing_env_is_error() {
    clear_env();
    assert!(GatewayConfig::from_env().is_err());
}
