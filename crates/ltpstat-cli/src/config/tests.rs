use super::*;
use ltpstat_test_utils::Workspace;

#[test]
fn test_explicit_path_wins() {
    let ws = Workspace::new();
    ws.write(DEFAULT_CONFIG_FILE, "");
    let explicit = ws.join("custom.yaml");
    let source = resolve_source(Some(&explicit), Some("from-env.toml"), ws.path());
    assert_eq!(source, ConfigSource::Explicit(explicit));
}

#[test]
fn test_env_before_working_dir() {
    let ws = Workspace::new();
    ws.write(DEFAULT_CONFIG_FILE, "");
    let source = resolve_source(None, Some("from-env.toml"), ws.path());
    assert_eq!(source, ConfigSource::Env(PathBuf::from("from-env.toml")));
}

#[test]
fn test_empty_env_is_ignored() {
    let ws = Workspace::new();
    assert_eq!(resolve_source(None, Some(""), ws.path()), ConfigSource::Defaults);
}

#[test]
fn test_working_dir_file_then_defaults() {
    let ws = Workspace::new();
    assert_eq!(resolve_source(None, None, ws.path()), ConfigSource::Defaults);
    let local = ws.write(DEFAULT_CONFIG_FILE, "[rank]\nfailure_count_weight = 0.9\n");
    let source = resolve_source(None, None, ws.path());
    assert_eq!(source, ConfigSource::WorkingDir(local));
    let config = load_from(&source).unwrap();
    assert_eq!(config.rank.failure_count_weight, 0.9);
}

#[test]
fn test_defaults_use_packaged_weight() {
    let config = load_from(&ConfigSource::Defaults).unwrap();
    assert_eq!(config.rank.failure_count_weight, 0.3);
}

#[test]
fn test_missing_explicit_file_is_an_error() {
    let ws = Workspace::new();
    let err = load_from(&ConfigSource::Explicit(ws.join("nope.toml"))).unwrap_err();
    assert!(err.to_string().contains("Config file not found"));
}

#[test]
fn test_bad_toml_reports_path() {
    let ws = Workspace::new();
    let path = ws.write("broken.toml", "[rank\nfailure_count_weight = ");
    let err = load_from(&ConfigSource::Explicit(path)).unwrap_err();
    assert!(err.to_string().contains("broken.toml"));
}
