//! Tests for config functionality.

use crate::config::types::default_exclude;
use crate::config::Config;
use crate::diff::ContextMargins;

#[test]
fn test_default_config() {
    let config = Config::default();

    assert_eq!(config.before_lines, 0);
    assert_eq!(config.after_lines, 0);
    assert_eq!(config.elision_marker, " // ...");
    assert!(config.include.is_empty());
    assert_eq!(config.exclude, default_exclude());
    assert_eq!(config.max_files, 10);
    assert_eq!(config.max_size_kb, 100);
    assert_eq!(config.base, None);
    assert_eq!(config.head, "HEAD");
    assert_eq!(config.rules_dir, ".cursor/rules");
}

#[test]
fn test_parse_minimal_yaml() {
    let config = Config::from_yaml("").unwrap();
    assert_eq!(config, Config::default());
}

#[test]
fn test_parse_partial_yaml() {
    let yaml = r#"
before_lines: 3
max_files: 25
"#;
    let config = Config::from_yaml(yaml).unwrap();

    // Specified values should be used
    assert_eq!(config.before_lines, 3);
    assert_eq!(config.max_files, 25);

    // Unspecified values should use defaults
    assert_eq!(config.after_lines, 0);
    assert_eq!(config.exclude, default_exclude());
    assert_eq!(config.head, "HEAD");
}

#[test]
fn test_parse_full_yaml() {
    let yaml = r#"
before_lines: 2
after_lines: 4
elision_marker: "..."
include:
  - "*.rs"
  - "src/**"
exclude:
  - "target/**"
max_files: 3
max_size_kb: 8
base: origin/develop
head: feature
rules_dir: docs/rules
"#;
    let config = Config::from_yaml(yaml).unwrap();

    assert_eq!(config.margins(), ContextMargins::new(2, 4));
    assert_eq!(config.render_options().elision_marker, "...");
    assert_eq!(config.include, vec!["*.rs", "src/**"]);
    assert_eq!(config.exclude, vec!["target/**"]);
    assert_eq!(config.max_files, 3);
    assert_eq!(config.max_size_kb, 8);
    assert_eq!(config.base.as_deref(), Some("origin/develop"));
    assert_eq!(config.head, "feature");
    assert_eq!(config.rules_dir, "docs/rules");
}

#[test]
fn test_parse_yaml_with_unknown_fields() {
    // Unknown fields should be silently ignored for forward compatibility
    let yaml = r#"
after_lines: 5
model: some-model
future_feature_x:
  nested: true
"#;
    let config = Config::from_yaml(yaml).unwrap();

    assert_eq!(config.after_lines, 5);
    assert_eq!(config.max_files, 10);
}

#[test]
fn test_parse_invalid_yaml() {
    let result = Config::from_yaml("before_lines: [not, a, number]");

    assert!(result.is_err());
    assert!(result
        .unwrap_err()
        .to_string()
        .contains("failed to parse config YAML"));
}

#[test]
fn test_validate_zero_max_files() {
    let result = Config::from_yaml("max_files: 0");

    assert!(result.is_err());
    assert!(result.unwrap_err().to_string().contains("max_files"));
}

#[test]
fn test_validate_zero_max_size() {
    let result = Config::from_yaml("max_size_kb: 0");

    assert!(result.is_err());
    assert!(result.unwrap_err().to_string().contains("max_size_kb"));
}

#[test]
fn test_validate_empty_elision_marker() {
    let result = Config::from_yaml("elision_marker: \"\"");

    assert!(result.is_err());
    assert!(result.unwrap_err().to_string().contains("elision_marker"));
}

#[test]
fn test_validate_invalid_glob() {
    let yaml = r#"
exclude:
  - "src/[unclosed"
"#;
    let result = Config::from_yaml(yaml);

    assert!(result.is_err());
    let err = result.unwrap_err();
    assert!(err.to_string().contains("invalid glob"));
}

#[test]
fn test_to_yaml() {
    let config = Config {
        before_lines: 1,
        base: Some("main".to_string()),
        ..Config::default()
    };
    let yaml = config.to_yaml().unwrap();

    // Should be valid YAML that can be parsed back
    let parsed = Config::from_yaml(&yaml).unwrap();
    assert_eq!(parsed, config);
}

#[test]
fn test_config_load_from_file() {
    use std::io::Write;
    use tempfile::NamedTempFile;

    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "after_lines: 7").unwrap();
    writeln!(file, "head: trunk").unwrap();

    let config = Config::load(file.path()).unwrap();
    assert_eq!(config.after_lines, 7);
    assert_eq!(config.head, "trunk");
}

#[test]
fn test_config_load_missing_file() {
    let result = Config::load("/nonexistent/path/config.yaml");
    assert!(result.is_err());
    let err = result.unwrap_err();
    assert!(err.to_string().contains("failed to read config file"));
}

#[test]
fn test_config_load_or_default_missing_file() {
    let config = Config::load_or_default("/nonexistent/path/config.yaml").unwrap();
    assert_eq!(config, Config::default());
}
