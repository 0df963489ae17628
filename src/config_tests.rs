use super::{
    default_config, load_config, resolve_config, validate_config, AppConfig, ConfigSources,
    CONFIG_SCHEMA_VERSION,
};
use std::path::{Path, PathBuf};

fn write_file(path: &Path, contents: &str) {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).expect("create parent directory");
    }
    std::fs::write(path, contents.as_bytes()).expect("write file");
}

#[test]
fn defaults_point_at_the_working_directory() {
    let config = default_config();
    assert_eq!(config.schema_version, CONFIG_SCHEMA_VERSION);
    assert_eq!(config.catalog_path, PathBuf::from("flows.csv"));
    assert_eq!(config.report_dir, PathBuf::from("."));
    assert_eq!(config.import_dir, PathBuf::from("."));
    validate_config(&config).expect("defaults are valid");
}

#[test]
fn missing_fields_take_defaults() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("config.json");
    write_file(&path, r#"{"schema_version": 1, "report_dir": "reports"}"#);
    let config = load_config(&path).expect("load config");
    assert_eq!(config.report_dir, PathBuf::from("reports"));
    assert_eq!(config.catalog_path, PathBuf::from("flows.csv"));
    assert_eq!(config.import_dir, PathBuf::from("."));
}

#[test]
fn validate_rejects_unknown_schema_and_empty_catalog() {
    let config = AppConfig {
        schema_version: 2,
        ..default_config()
    };
    let err = validate_config(&config).expect_err("schema mismatch");
    assert!(err.to_string().contains("schema_version 2"));

    let config = AppConfig {
        catalog_path: PathBuf::new(),
        ..default_config()
    };
    assert!(validate_config(&config).is_err());
}

#[test]
fn catalog_flag_beats_environment_and_file() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("config.json");
    write_file(
        &path,
        r#"{"schema_version": 1, "catalog_path": "from-file.csv", "import_dir": "inbox"}"#,
    );

    let mut sources = ConfigSources {
        config_flag: Some(path.clone()),
        ..ConfigSources::default()
    };
    let config = resolve_config(&sources).expect("file only");
    assert_eq!(config.catalog_path, PathBuf::from("from-file.csv"));
    assert_eq!(config.import_dir, PathBuf::from("inbox"));

    sources.catalog_env = Some(PathBuf::from("from-env.csv"));
    let config = resolve_config(&sources).expect("env override");
    assert_eq!(config.catalog_path, PathBuf::from("from-env.csv"));

    sources.catalog_flag = Some(PathBuf::from("from-flag.csv"));
    let config = resolve_config(&sources).expect("flag override");
    assert_eq!(config.catalog_path, PathBuf::from("from-flag.csv"));
    assert_eq!(config.import_dir, PathBuf::from("inbox"));
}

#[test]
fn user_config_is_optional_but_explicit_config_is_not() {
    let dir = tempfile::tempdir().expect("tempdir");
    let sources = ConfigSources {
        user_config: Some(dir.path().join("flowmaker/config.json")),
        ..ConfigSources::default()
    };
    assert_eq!(resolve_config(&sources).expect("defaults"), default_config());

    let sources = ConfigSources {
        config_env: Some(dir.path().join("missing.json")),
        ..ConfigSources::default()
    };
    let err = resolve_config(&sources).expect_err("missing explicit config");
    assert!(format!("{err:#}").contains("missing.json"));
}
