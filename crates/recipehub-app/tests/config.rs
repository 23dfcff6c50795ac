use recipehub_app::config::{
    DEFAULT_API_BASE_URL, DEFAULT_STALE_SECS, RecipeHubConfig, delete_config_in,
    load_config_from, load_or_default_in, save_config_to, set_api_base_url_in,
};

#[test]
fn save_then_load() {
    let dir = tempfile::tempdir().unwrap();
    let config = RecipeHubConfig {
        api_base_url: "https://recipes.example.com".to_string(),
        stale_secs: 5,
        ..RecipeHubConfig::default()
    };

    save_config_to(dir.path(), &config).unwrap();
    let loaded = load_config_from(&dir.path().join("config.json")).unwrap();

    assert_eq!(loaded.config_version, 1);
    assert_eq!(loaded.api_base_url, "https://recipes.example.com");
    assert_eq!(loaded.stale_time(), std::time::Duration::from_secs(5));
    assert!(!dir.path().join("config.json.tmp").exists());
}

#[test]
fn unversioned_config_is_migrated() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");
    std::fs::write(
        &path,
        r#"{"base_url": "http://10.0.0.2:8000"}"#,
    )
    .unwrap();

    let loaded = load_config_from(&path).unwrap();

    assert_eq!(loaded.config_version, 1);
    assert_eq!(loaded.api_base_url, "http://10.0.0.2:8000");
    assert_eq!(loaded.stale_secs, DEFAULT_STALE_SECS);
}

#[test]
fn newer_config_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");
    std::fs::write(
        &path,
        r#"{"config_version": 99, "api_base_url": "http://x"}"#,
    )
    .unwrap();

    let err = load_config_from(&path).unwrap_err();
    assert!(err.to_string().contains("newer than this build supports"));
}

#[test]
fn missing_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    assert!(load_config_from(&dir.path().join("config.json")).is_err());
}

#[test]
fn defaults_point_at_local_backend() {
    let config = RecipeHubConfig::default();
    assert_eq!(config.api_base_url, DEFAULT_API_BASE_URL);
    assert_eq!(config.stale_secs, DEFAULT_STALE_SECS);
}

#[test]
fn set_url_persists_and_keeps_other_fields() {
    let dir = tempfile::tempdir().unwrap();
    let config = RecipeHubConfig {
        stale_secs: 7,
        ..RecipeHubConfig::default()
    };
    save_config_to(dir.path(), &config).unwrap();

    let updated = set_api_base_url_in(dir.path(), "https://recipes.example.com/").unwrap();
    assert_eq!(updated.api_base_url, "https://recipes.example.com");

    let loaded = load_config_from(&dir.path().join("config.json")).unwrap();
    assert_eq!(loaded.api_base_url, "https://recipes.example.com");
    assert_eq!(loaded.stale_secs, 7);
}

#[test]
fn set_url_rejects_bad_urls_without_writing() {
    let dir = tempfile::tempdir().unwrap();

    assert!(set_api_base_url_in(dir.path(), "ftp://recipes.example.com").is_err());
    assert!(!dir.path().join("config.json").exists());
}

#[test]
fn delete_removes_the_saved_config() {
    let dir = tempfile::tempdir().unwrap();
    set_api_base_url_in(dir.path(), "http://10.0.0.2:8000").unwrap();

    assert!(delete_config_in(dir.path()).unwrap());
    assert!(!delete_config_in(dir.path()).unwrap());

    let config = load_or_default_in(dir.path()).unwrap();
    assert_eq!(config.api_base_url, DEFAULT_API_BASE_URL);
}
