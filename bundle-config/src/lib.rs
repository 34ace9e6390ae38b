//! Loader for run configuration with YAML + environment overlays.
//!
//! Sources are merged in the order they are attached; the `BUNDLE__` environment
//! overlay is attached last by [`BundleConfigLoader::load`] so it always wins.
//! Nested keys use `__` as separator (`BUNDLE__HTTP__TIMEOUT_SECS=30`) and
//! `BUNDLE__CHARITY_NAMES` takes a comma-separated list.
pub use bundle_common::observability::{LogFormat, LoggingSettings};
use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use serde_json::Value;
use std::path::{Path, PathBuf};

const MAXIMUM_ENV_EXPANSION_DEPTH: usize = 8;

pub const DEFAULT_BUNDLE_URL: &str =
    "https://www.humblebundle.com/books/data-visualization-oreilly-books";
pub const DEFAULT_DUMP_FILE: &str = "data_structure.json";

/// Everything one extraction run needs.
#[derive(Debug, Clone, Deserialize)]
pub struct BundleConfig {
    #[serde(default = "default_url")]
    pub url: String,
    /// Names of charity tiers listed alongside the real items.
    #[serde(default = "default_charity_names")]
    pub charity_names: Vec<String>,
    /// Directory for the report and the payload dump; current directory when unset.
    #[serde(default)]
    pub output_dir: Option<PathBuf>,
    #[serde(default = "default_dump_file")]
    pub dump_file: String,
    #[serde(default)]
    pub http: HttpSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

impl Default for BundleConfig {
    fn default() -> Self {
        Self {
            url: default_url(),
            charity_names: default_charity_names(),
            output_dir: None,
            dump_file: default_dump_file(),
            http: HttpSettings::default(),
            logging: LoggingSettings::default(),
        }
    }
}

impl BundleConfig {
    /// Resolve a file name against the configured output directory.
    pub fn output_path(&self, file_name: &str) -> PathBuf {
        match &self.output_dir {
            Some(dir) => dir.join(file_name),
            None => PathBuf::from(file_name),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct HttpSettings {
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for HttpSettings {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_url() -> String {
    DEFAULT_BUNDLE_URL.into()
}
fn default_charity_names() -> Vec<String> {
    [
        "Code for America",
        "CodeForAmerica",
        "codeforamerica",
        "GameHeads",
        "Gameheads",
        "gameheads",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}
fn default_dump_file() -> String {
    DEFAULT_DUMP_FILE.into()
}
fn default_timeout_secs() -> u64 {
    15
}

fn expand_env_in_value(v: &mut Value) {
    match v {
        Value::String(s) => {
            if s.contains('$') {
                let mut cur = std::mem::take(s);
                for _ in 0..MAXIMUM_ENV_EXPANSION_DEPTH {
                    let expanded = match shellexpand::env(&cur) {
                        Ok(cow) => cow.into_owned(),
                        Err(_) => cur.clone(),
                    };
                    if expanded == cur {
                        break;
                    }
                    cur = expanded;
                }
                *s = cur;
            }
        }
        Value::Array(arr) => arr.iter_mut().for_each(expand_env_in_value),
        Value::Object(obj) => obj.values_mut().for_each(expand_env_in_value),
        _ => {}
    }
}

/// Builder hides the `config` crate wiring (YAML + env overrides).
pub struct BundleConfigLoader {
    builder: config::ConfigBuilder<config::builder::DefaultState>,
}

impl Default for BundleConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl BundleConfigLoader {
    /// Start from built-in defaults; `BUNDLE__` env overrides apply on [`load`](Self::load).
    ///
    /// ```
    /// use bundle_config::{BundleConfigLoader, DEFAULT_DUMP_FILE};
    ///
    /// let config = BundleConfigLoader::new()
    ///     .with_yaml_str("url: https://example.com/books/sample-bundle")
    ///     .load()
    ///     .expect("valid config");
    ///
    /// assert_eq!(config.url, "https://example.com/books/sample-bundle");
    /// assert_eq!(config.dump_file, DEFAULT_DUMP_FILE);
    /// assert!(!config.charity_names.is_empty());
    /// ```
    pub fn new() -> Self {
        Self {
            builder: Config::builder(),
        }
    }

    /// Attach a YAML/TOML/JSON file; the `config` crate infers format by suffix.
    pub fn with_file<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.builder = self
            .builder
            .add_source(File::from(path.as_ref()).required(true));
        self
    }

    /// Like [`with_file`](Self::with_file), but a missing file is skipped.
    pub fn with_optional_file<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.builder = self
            .builder
            .add_source(File::from(path.as_ref()).required(false));
        self
    }

    /// Allow tests/CLI to merge inline YAML snippets.
    ///
    /// ```
    /// use bundle_config::BundleConfigLoader;
    ///
    /// let cfg = BundleConfigLoader::new()
    ///     .with_yaml_str(
    ///         r#"
    /// charity_names: ["Example Charity"]
    /// http:
    ///   timeout_secs: 3
    /// "#,
    ///     )
    ///     .load()
    ///     .unwrap();
    ///
    /// assert_eq!(cfg.charity_names, vec!["Example Charity".to_string()]);
    /// assert_eq!(cfg.http.timeout_secs, 3);
    /// ```
    pub fn with_yaml_str(mut self, yaml: &str) -> Self {
        self.builder = self
            .builder
            .add_source(File::from_str(yaml, config::FileFormat::Yaml));
        self
    }

    /// Consume the builder and deserialize the merged sources into strongly typed config.
    ///
    /// `${VAR}` placeholders are expanded before materialising the structs.
    pub fn load(self) -> Result<BundleConfig, ConfigError> {
        let cfg = self
            .builder
            .add_source(
                Environment::with_prefix("BUNDLE")
                    .prefix_separator("__")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("charity_names")
                    .try_parsing(true),
            )
            .build()?;

        // Convert to serde_json::Value first
        let mut v: Value = cfg.try_deserialize()?;
        expand_env_in_value(&mut v);

        let typed: BundleConfig =
            serde_json::from_value(v).map_err(|e| ConfigError::Message(e.to_string()))?;

        Ok(typed)
    }
}
