use std::path::{Path, PathBuf};

use clap::ValueEnum;
use schemars::JsonSchema;
use serde::Deserialize;

use super::dirs;

/// Default number of days to look back when no start date is entered.
pub const DEFAULT_LOOKBACK_DAYS: u32 = 90;

/// Top-level configuration for jira-tasks.
#[derive(Debug, Default, Deserialize, JsonSchema, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Issue viewer settings.
    #[serde(default)]
    pub viewer: ViewerConfig,
}

/// Issue viewer configuration.
#[derive(Debug, Deserialize, JsonSchema, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ViewerConfig {
    /// Column layout of the issue table (default: "standard").
    #[serde(default)]
    pub layout: ColumnLayout,

    /// Days to look back when the start date is left empty (default: 90).
    #[serde(default = "default_lookback_days")]
    #[schemars(default = "default_lookback_days")]
    pub lookback_days: u32,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            layout: ColumnLayout::default(),
            lookback_days: default_lookback_days(),
        }
    }
}

/// Column layout of the issue table.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, JsonSchema, ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum ColumnLayout {
    /// Key, Summary, Type, Status, Link, Created, Updated.
    #[default]
    Standard,
    /// Link (labelled with the key), Summary, Type, Status, Created, Updated.
    Linked,
}

fn default_lookback_days() -> u32 {
    DEFAULT_LOOKBACK_DAYS
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid config file {path}: {message}")]
    ParseError { path: PathBuf, message: String },

    /// Required JIRA_* variable is unset or empty
    #[error("Missing required environment variable {0} (set it in the environment or a .env file)")]
    MissingEnvVar(&'static str),

    /// Credentials were rejected or the server could not be reached
    #[error("JIRA connection error: {0}")]
    Connection(String),
}

const CONFIG_FILE_NAMES: [&str; 2] = ["config.yaml", "config.yml"];

/// Reads the user config from the app config directory, falling back to defaults.
pub fn load_config() -> anyhow::Result<Config> {
    match dirs::app_config_dir() {
        Some(dir) => load_config_from_dir(&dir),
        None => Ok(Config::default()),
    }
}

/// Reads the first of `config.yaml` / `config.yml` present in `dir`.
pub fn load_config_from_dir(dir: &Path) -> anyhow::Result<Config> {
    for path in CONFIG_FILE_NAMES.map(|name| dir.join(name)) {
        let content = match std::fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => continue,
            Err(source) => return Err(ConfigError::ReadError { path, source }.into()),
        };
        let config = serde_yaml::from_str(&content).map_err(|e| ConfigError::ParseError {
            message: e.to_string(),
            path,
        })?;
        return Ok(config);
    }
    Ok(Config::default())
}

/// JSON Schema of [`Config`], printed by `jt config schema`.
pub fn generate_schema() -> schemars::Schema {
    schemars::schema_for!(Config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;
    use rstest::rstest;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn config_default_has_expected_values() {
        let config = Config::default();

        assert_eq!(config.viewer.layout, ColumnLayout::Standard);
        assert_eq!(config.viewer.lookback_days, 90);
    }

    #[test]
    fn parse_full_yaml_config() {
        let yaml = indoc! {"
            viewer:
              layout: linked
              lookback_days: 30
        "};
        let config: Config = serde_yaml::from_str(yaml).unwrap();

        assert_eq!(config.viewer.layout, ColumnLayout::Linked);
        assert_eq!(config.viewer.lookback_days, 30);
    }

    #[test]
    fn parse_partial_yaml_uses_defaults() {
        let yaml = indoc! {"
            viewer:
              layout: linked
        "};
        let config: Config = serde_yaml::from_str(yaml).unwrap();

        assert_eq!(config.viewer.layout, ColumnLayout::Linked);
        assert_eq!(config.viewer.lookback_days, DEFAULT_LOOKBACK_DAYS);
    }

    #[test]
    fn parse_empty_yaml_uses_all_defaults() {
        let config: Config = serde_yaml::from_str("{}").unwrap();
        assert_eq!(config, Config::default());
    }

    #[rstest]
    #[case::unknown_top_level("jira:\n  server: x\n")]
    #[case::unknown_viewer_field("viewer:\n  columns: 3\n")]
    #[case::unknown_layout("viewer:\n  layout: compact\n")]
    fn parse_rejects_invalid_config(#[case] yaml: &str) {
        assert!(serde_yaml::from_str::<Config>(yaml).is_err());
    }

    #[test]
    fn load_from_dir_without_file_returns_default() {
        let dir = TempDir::new().unwrap();
        let config = load_config_from_dir(dir.path()).unwrap();
        assert_eq!(config, Config::default());
    }

    #[rstest]
    #[case::yaml("config.yaml")]
    #[case::yml("config.yml")]
    fn load_from_dir_reads_either_extension(#[case] filename: &str) {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(filename), "viewer:\n  lookback_days: 14\n").unwrap();

        let config = load_config_from_dir(dir.path()).unwrap();

        assert_eq!(config.viewer.lookback_days, 14);
    }

    #[test]
    fn load_from_dir_reports_parse_error_with_path() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.yaml");
        fs::write(&path, "viewer: [").unwrap();

        let err = load_config_from_dir(dir.path()).unwrap_err();

        let message = err.to_string();
        assert!(message.starts_with("Invalid config file"), "{message}");
        assert!(message.contains(&path.display().to_string()), "{message}");
    }
}
