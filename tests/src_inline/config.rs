use super::*;

#[test]
fn test_defaults() {
    let config = AppConfig::default();
    assert_eq!(config.storage_path, PathBuf::from("roster.csv"));
    assert_eq!(config.autosave_interval(), Duration::from_secs(60));
    assert_eq!(config.shutdown_join_timeout(), Duration::from_secs(5));
    assert_eq!(config.capacity, 50);
    assert_eq!(config.seed, SeedPolicy::Demo);
    assert!(config.validate().is_ok());
}

#[test]
fn test_partial_json_keeps_defaults() {
    let config = AppConfig::from_json_str(
        r#"{ "storage_path": "/tmp/class.csv", "seed": "empty" }"#,
        Path::new("gradebook.json"),
    )
    .unwrap();
    assert_eq!(config.storage_path, PathBuf::from("/tmp/class.csv"));
    assert_eq!(config.seed, SeedPolicy::Empty);
    assert_eq!(config.autosave_interval_secs, 60);
}

#[test]
fn test_zero_interval_is_rejected() {
    let err = AppConfig::from_json_str(
        r#"{ "autosave_interval_secs": 0 }"#,
        Path::new("gradebook.json"),
    )
    .unwrap_err();
    assert!(matches!(err, ConfigError::Invalid(_)));
}

#[test]
fn test_unknown_fields_are_rejected() {
    let err = AppConfig::from_json_str(r#"{ "autosave": 5 }"#, Path::new("gradebook.json"))
        .unwrap_err();
    assert!(matches!(err, ConfigError::Parse { .. }));
}

#[test]
fn test_load_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("gradebook.json");
    std::fs::write(&path, r#"{ "capacity": 10, "autosave_interval_secs": 30 }"#).unwrap();
    let config = AppConfig::load(&path).unwrap();
    assert_eq!(config.capacity, 10);
    assert_eq!(config.autosave_interval(), Duration::from_secs(30));

    let missing = AppConfig::load(&dir.path().join("nope.json")).unwrap_err();
    assert!(matches!(missing, ConfigError::Read { .. }));
}

#[test]
fn test_capacity_above_roster_limit_is_rejected() {
    let err = AppConfig::from_json_str(r#"{ "capacity": 1000 }"#, Path::new("gradebook.json"))
        .unwrap_err();
    assert!(matches!(err, ConfigError::Invalid(_)));

    let config =
        AppConfig::from_json_str(r#"{ "capacity": 50 }"#, Path::new("gradebook.json")).unwrap();
    assert_eq!(config.capacity, DEFAULT_CAPACITY);
}
