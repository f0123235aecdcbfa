//! Configuration management for the markup bridge.
//!
//! Parses `mbridge.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ## Environment Variable Expansion
//!
//! `server.host` supports environment variable expansion:
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default

mod expand;

use std::path::{Path, PathBuf};

use serde::Deserialize;

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override server host.
    pub host: Option<String>,
    /// Override server port.
    pub port: Option<u16>,
    /// Override the default markup dialect.
    pub default_dialect: Option<String>,
    /// Override strict rendering.
    pub strict_render: Option<bool>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "mbridge.toml";

/// Configuration error type.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Config file could not be read.
    #[error("Failed to read config file {path}: {source}")]
    Io {
        /// Path of the offending file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Config file is not valid TOML.
    #[error("Failed to parse config file {path}: {source}")]
    Parse {
        /// Path of the offending file.
        path: PathBuf,
        /// Underlying TOML error.
        #[source]
        source: toml::de::Error,
    },

    /// Environment variable referenced in the config is not set.
    #[error("Invalid value for {field}: {message}")]
    EnvVar {
        /// Dotted config field name.
        field: String,
        /// Explanation of the failure.
        message: String,
    },
}

/// Application configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Server configuration.
    pub server: ServerConfig,
    /// Markup conversion configuration.
    pub markup: MarkupConfig,

    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

/// Server configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Server host address.
    pub host: String,
    /// Server port.
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_owned(),
            port: 7878,
        }
    }
}

/// Markup conversion configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct MarkupConfig {
    /// Dialect applied when a request omits `lang`.
    pub default_dialect: String,
    /// Fail requests containing constructs markdown cannot express,
    /// instead of degrading them.
    pub strict_render: bool,
}

impl Default for MarkupConfig {
    fn default() -> Self {
        Self {
            default_dialect: "12y2".to_owned(),
            strict_render: false,
        }
    }
}

impl Config {
    /// Load configuration.
    ///
    /// An explicit `path` wins; otherwise `mbridge.toml` is auto-discovered
    /// upward from the current directory, falling back to defaults when no
    /// file exists. CLI settings are applied last.
    pub fn load(path: Option<&Path>, cli: Option<&CliSettings>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => match discover() {
                Some(path) => Self::from_file(&path)?,
                None => Self::default(),
            },
        };

        config.server.host = expand::expand_env(&config.server.host, "server.host")?;

        if let Some(cli) = cli {
            config.apply_cli(cli);
        }
        Ok(config)
    }

    /// Load configuration from a specific file.
    fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mut config: Self =
            toml::from_str(&contents).map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        config.config_path = Some(path.to_path_buf());
        Ok(config)
    }

    /// Apply CLI overrides.
    fn apply_cli(&mut self, cli: &CliSettings) {
        if let Some(host) = &cli.host {
            self.server.host.clone_from(host);
        }
        if let Some(port) = cli.port {
            self.server.port = port;
        }
        if let Some(dialect) = &cli.default_dialect {
            self.markup.default_dialect.clone_from(dialect);
        }
        if let Some(strict) = cli.strict_render {
            self.markup.strict_render = strict;
        }
    }
}

/// Search for `mbridge.toml` in the current directory and its ancestors.
fn discover() -> Option<PathBuf> {
    let mut dir = std::env::current_dir().ok()?;
    loop {
        let candidate = dir.join(CONFIG_FILENAME);
        if candidate.is_file() {
            return Some(candidate);
        }
        if !dir.pop() {
            return None;
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 7878);
        assert_eq!(config.markup.default_dialect, "12y2");
        assert!(!config.markup.strict_render);
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mbridge.toml");
        std::fs::write(
            &path,
            "[server]\nhost = \"0.0.0.0\"\nport = 9000\n\n[markup]\ndefault_dialect = \"12y\"\n",
        )
        .unwrap();

        let config = Config::load(Some(&path), None).unwrap();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.markup.default_dialect, "12y");
        assert_eq!(config.config_path, Some(path));
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mbridge.toml");
        std::fs::write(&path, "[server]\nport = 9000\n").unwrap();

        let config = Config::load(Some(&path), None).unwrap();
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.markup.default_dialect, "12y2");
    }

    #[test]
    fn test_cli_overrides_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mbridge.toml");
        std::fs::write(&path, "[server]\nport = 9000\n").unwrap();

        let cli = CliSettings {
            port: Some(7000),
            strict_render: Some(true),
            ..CliSettings::default()
        };
        let config = Config::load(Some(&path), Some(&cli)).unwrap();
        assert_eq!(config.server.port, 7000);
        assert!(config.markup.strict_render);
    }

    #[test]
    fn test_invalid_toml_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mbridge.toml");
        std::fs::write(&path, "[server\nport = ").unwrap();

        let err = Config::load(Some(&path), None).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn test_missing_file_error() {
        let err = Config::load(Some(Path::new("/nonexistent/mbridge.toml")), None).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn test_host_env_expansion() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mbridge.toml");
        std::fs::write(&path, "[server]\nhost = \"${MBRIDGE_UNSET_HOST:-0.0.0.0}\"\n").unwrap();

        let config = Config::load(Some(&path), None).unwrap();
        assert_eq!(config.server.host, "0.0.0.0");
    }
}
