use super::*;

#[test]
fn default_config_matches_spec_defaults() {
    let config = Config::default();
    assert_eq!(config.http.port, DEFAULT_HTTP_PORT);
    assert_eq!(config.limits.default_step_timeout_secs, 10);
    assert_eq!(config.limits.max_loop_iterations, 100);
    assert_eq!(config.limits.poll_interval_ms, 100);
    assert_eq!(config.limits.vision_poll_interval_ms, 200);
}

#[test]
fn load_with_no_path_returns_defaults() {
    let config = Config::load(None).unwrap();
    assert_eq!(config.http.host, DEFAULT_HTTP_HOST);
}

#[test]
fn load_from_file_overrides_only_given_fields() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");
    std::fs::write(&path, r#"{"http":{"port":9000}}"#).unwrap();
    let config = Config::load(Some(&path)).unwrap();
    assert_eq!(config.http.port, 9000);
    assert_eq!(config.http.host, DEFAULT_HTTP_HOST);
    assert_eq!(config.limits.max_loop_iterations, 100);
}
