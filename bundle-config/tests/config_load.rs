use bundle_config::{BundleConfigLoader, DEFAULT_BUNDLE_URL, DEFAULT_DUMP_FILE, LogFormat};
use serial_test::serial;
use std::{fs, path::PathBuf};
use tempfile::TempDir;

/// Helper to write a YAML file in a temp dir and return its path.
fn write_yaml(tmp: &TempDir, name: &str, yaml: &str) -> PathBuf {
    let p = tmp.path().join(name);
    fs::write(&p, yaml).expect("write yaml");
    p
}

#[test]
#[serial]
fn test_config_load() {
    let tmp = TempDir::new().unwrap();

    let file_yaml = r#"
url: "https://www.example.com/books/${BUNDLE_SLUG}"
charity_names:
  - "Books for Everyone"
output_dir: "reports"
logging:
  format: json
  emit_stderr: true
"#;
    let p = write_yaml(&tmp, "bundle.yaml", file_yaml);

    let config = temp_env::with_var("BUNDLE_SLUG", Some("rust-mega-pack"), || {
        BundleConfigLoader::new()
            .with_file(p)
            .load()
            .expect("load bundle config")
    });

    assert_eq!(config.url, "https://www.example.com/books/rust-mega-pack");
    assert_eq!(config.charity_names, vec!["Books for Everyone".to_string()]);
    assert_eq!(config.output_dir, Some(PathBuf::from("reports")));
    assert_eq!(config.logging.format, LogFormat::Json);
    assert!(config.logging.emit_stderr);
    assert_eq!(config.dump_file, DEFAULT_DUMP_FILE);
}

#[test]
#[serial]
fn defaults_apply_without_sources() {
    let tmp = TempDir::new().unwrap();
    let config = BundleConfigLoader::new()
        .with_optional_file(tmp.path().join("missing.yaml"))
        .load()
        .expect("optional file may be absent");

    assert_eq!(config.url, DEFAULT_BUNDLE_URL);
    assert!(config.charity_names.iter().any(|c| c == "Code for America"));
    assert!(config.charity_names.iter().any(|c| c == "GameHeads"));
    assert_eq!(config.http.timeout_secs, 15);
    assert_eq!(config.logging.filter, "info");
    assert!(config.output_dir.is_none());
}

#[test]
#[serial]
fn required_file_must_exist() {
    let tmp = TempDir::new().unwrap();
    let result = BundleConfigLoader::new()
        .with_file(tmp.path().join("missing.yaml"))
        .load();
    assert!(result.is_err());
}

#[test]
#[serial]
fn environment_overrides_file() {
    let config = temp_env::with_vars(
        [
            ("BUNDLE__URL", Some("https://env.example.com/books/from-env")),
            ("BUNDLE__CHARITY_NAMES", Some("Alpha Fund,Beta Trust")),
            ("BUNDLE__HTTP__TIMEOUT_SECS", Some("42")),
        ],
        || {
            BundleConfigLoader::new()
                .with_yaml_str("url: https://file.example.com/books/from-file")
                .load()
                .expect("env overlay")
        },
    );

    assert_eq!(config.url, "https://env.example.com/books/from-env");
    assert_eq!(
        config.charity_names,
        vec!["Alpha Fund".to_string(), "Beta Trust".to_string()]
    );
    assert_eq!(config.http.timeout_secs, 42);
}

#[test]
#[serial]
fn unknown_log_format_is_rejected() {
    let result = BundleConfigLoader::new()
        .with_yaml_str("logging:\n  format: xml\n")
        .load();
    assert!(result.is_err());

    let config = temp_env::with_var("BUNDLE__LOGGING__FORMAT", Some("json"), || {
        BundleConfigLoader::new().load().expect("env log format")
    });
    assert_eq!(config.logging.format, LogFormat::Json);
}
