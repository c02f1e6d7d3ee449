//! Integration tests for configuration management

use grade_book::config::{Config, ConfigOverrides};
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// Helper to create a temporary config directory
fn setup_temp_config() -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config_file = temp_dir.path().join("config.toml");
    (temp_dir, config_file)
}

#[test]
fn test_config_from_defaults() {
    let config = Config::from_defaults();

    assert!(
        !config.logging.level.is_empty(),
        "Default log level should not be empty"
    );
    assert!(!config.paths.data_dir.is_empty());
    assert_eq!(config.paths.students_file, "students.json");
    assert_eq!(config.paths.courses_file, "courses.json");
    assert!(!config.paths.reports_dir.is_empty());
}

#[test]
fn test_config_from_toml_basic() {
    let toml_str = r#"
[logging]
level = "info"
file = "/tmp/test.log"
verbose = true

[paths]
data_dir = "/srv/grades"
students_file = "s.json"
courses_file = "c.json"
reports_dir = "/srv/reports"
"#;

    let config = Config::from_toml(toml_str).expect("Failed to parse TOML");

    assert_eq!(config.logging.level, "info");
    assert_eq!(config.logging.file, "/tmp/test.log");
    assert!(config.logging.verbose);
    assert_eq!(config.students_path(), PathBuf::from("/srv/grades/s.json"));
    assert_eq!(config.courses_path(), PathBuf::from("/srv/grades/c.json"));
    assert_eq!(config.paths.reports_dir, "/srv/reports");
}

#[test]
fn test_config_from_toml_partial() {
    let toml_str = r#"
[logging]
level = "warn"
"#;

    let config = Config::from_toml(toml_str).expect("Failed to parse partial TOML");

    assert_eq!(config.logging.level, "warn");
    assert!(config.logging.file.is_empty());
    assert!(!config.logging.verbose);
    assert!(config.paths.data_dir.is_empty());
    // Empty file names fall back to the standard document names
    assert_eq!(config.students_path(), PathBuf::from("students.json"));
}

#[test]
fn test_config_variable_expansion() {
    let toml_str = r#"
[logging]
file = "$GRADE_BOOK/logs/gradebook.log"

[paths]
data_dir = "$GRADE_BOOK/data"
"#;

    let config = Config::from_toml(toml_str).expect("Failed to parse TOML");
    let dir = Config::get_gradebook_dir();

    assert!(!config.logging.file.contains("$GRADE_BOOK"));
    assert!(!config.paths.data_dir.contains("$GRADE_BOOK"));
    assert_eq!(PathBuf::from(&config.paths.data_dir), dir.join("data"));
}

#[test]
fn test_config_get_set() {
    let mut config = Config::from_defaults();

    config.set("level", "DEBUG").expect("Failed to set level");
    config.set("verbose", "true").expect("Failed to set verbose");
    config
        .set("data-dir", "/tmp/grades")
        .expect("Failed to set data dir");

    assert_eq!(config.get("level"), Some("debug".to_string()));
    assert_eq!(config.get("verbose"), Some("true".to_string()));
    assert_eq!(config.get("data_dir"), Some("/tmp/grades".to_string()));
    assert_eq!(config.get("nonexistent"), None);
}

#[test]
fn test_config_set_rejects_bad_values() {
    let mut config = Config::from_defaults();

    assert!(config.set("verbose", "maybe").is_err());
    assert!(config.set("level", "loud").is_err());
    assert!(config.set("nonexistent", "x").is_err());
}

#[test]
fn test_config_unset() {
    let defaults = Config::from_defaults();
    let mut config = defaults.clone();

    config.set("reports_dir", "/tmp/elsewhere").unwrap();
    config
        .unset("reports_dir", &defaults)
        .expect("Failed to unset reports_dir");

    assert_eq!(config.paths.reports_dir, defaults.paths.reports_dir);
    assert!(config.unset("nonexistent", &defaults).is_err());
}

#[test]
fn test_config_save_and_load() {
    let (_temp_dir, config_file) = setup_temp_config();

    let mut config = Config::from_defaults();
    config.set("level", "info").expect("Failed to set level");
    config.set("students_file", "roster.json").unwrap();

    let toml_str = toml::to_string_pretty(&config).expect("Failed to serialize");
    fs::write(&config_file, toml_str).expect("Failed to write config");

    let content = fs::read_to_string(&config_file).expect("Failed to read config");
    let loaded_config = Config::from_toml(&content).expect("Failed to parse loaded config");

    assert_eq!(loaded_config.logging.level, "info");
    assert_eq!(loaded_config.paths.students_file, "roster.json");
}

#[test]
fn test_config_overrides_apply() {
    let mut config = Config::from_defaults();

    let overrides = ConfigOverrides {
        level: Some("error".to_string()),
        file: Some("/custom/path.log".to_string()),
        verbose: Some(true),
        data_dir: Some("/custom/data".to_string()),
        students_file: Some("s.json".to_string()),
        courses_file: Some("c.json".to_string()),
        reports_dir: Some("./custom_reports".to_string()),
    };

    config.apply_overrides(&overrides);

    assert_eq!(config.logging.level, "error");
    assert_eq!(config.logging.file, "/custom/path.log");
    assert!(config.logging.verbose);
    assert_eq!(config.students_path(), PathBuf::from("/custom/data/s.json"));
    assert_eq!(config.courses_path(), PathBuf::from("/custom/data/c.json"));
    assert_eq!(config.paths.reports_dir, "./custom_reports");
}

#[test]
fn test_config_overrides_partial() {
    let mut config = Config::from_defaults();
    let before = config.clone();

    let overrides = ConfigOverrides {
        level: Some("debug".to_string()),
        ..ConfigOverrides::default()
    };

    config.apply_overrides(&overrides);

    assert_eq!(config.logging.level, "debug");
    assert_eq!(config.paths, before.paths);
}

#[test]
fn test_config_display_format() {
    let config = Config::from_defaults();
    let display_str = format!("{config}");

    assert!(display_str.contains("[logging]"));
    assert!(display_str.contains("[paths]"));
    assert!(display_str.contains("level"));
    assert!(display_str.contains("students_file"));
    assert!(display_str.contains("reports_dir"));
}

#[test]
fn test_merge_defaults_adds_missing_fields() {
    let toml_str = r#"
[logging]
level = "error"
file = ""
verbose = false

[paths]
data_dir = ""
reports_dir = ""
"#;

    let mut config = Config::from_toml(toml_str).expect("Failed to parse minimal config");
    let defaults = Config::from_defaults();

    let changed = config.merge_defaults(&defaults);

    assert!(
        changed,
        "merge_defaults should return true when fields are added"
    );
    assert_eq!(config.paths.students_file, defaults.paths.students_file);
    assert_eq!(config.paths.data_dir, defaults.paths.data_dir);
}

#[test]
fn test_merge_defaults_preserves_existing() {
    let toml_str = r#"
[logging]
level = "error"
file = "/my/custom/path.log"
verbose = false

[paths]
data_dir = "/my/data"
students_file = "mine.json"
courses_file = "ours.json"
reports_dir = "/my/reports"
"#;

    let mut config = Config::from_toml(toml_str).expect("Failed to parse config");
    let defaults = Config::from_defaults();

    config.merge_defaults(&defaults);

    assert_eq!(config.logging.level, "error");
    assert_eq!(config.logging.file, "/my/custom/path.log");
    assert_eq!(config.paths.data_dir, "/my/data");
    assert_eq!(config.paths.students_file, "mine.json");
}

#[test]
fn test_get_gradebook_dir() {
    let dir = Config::get_gradebook_dir();

    assert!(dir.to_string_lossy().contains("gradebook"));
    assert_ne!(dir, PathBuf::from("."));
}

#[test]
fn test_get_config_file_path() {
    let path = Config::get_config_file_path();

    let path_str = path.to_string_lossy();
    assert!(path_str.ends_with("config.toml") || path_str.ends_with("dconfig.toml"));
}
