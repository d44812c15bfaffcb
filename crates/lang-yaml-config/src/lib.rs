use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Environment variable that overrides the config file location.
pub const CONFIG_PATH_ENV: &str = "LANG_YAML_CONFIG";

pub const DEFAULT_INDENT_UNIT: u32 = 2;
pub const DEFAULT_TAB_SIZE: u32 = 4;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {config_path}: {source}")]
    ConfigReadError {
        config_path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {config_path}: {source}")]
    ConfigParseError {
        config_path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Invalid config file at {config_path}: {field} must be at least 1")]
    ZeroWidth {
        config_path: PathBuf,
        field: &'static str,
    },
}

/// Editor settings used by the indentation and column services.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Columns added per indentation level
    pub indent_unit: u32,
    /// Column width of a tab character
    pub tab_size: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            indent_unit: DEFAULT_INDENT_UNIT,
            tab_size: DEFAULT_TAB_SIZE,
        }
    }
}

impl Config {
    pub fn load_from_path<P: AsRef<Path>>(config_path: P) -> Result<Option<Self>, ConfigError> {
        let config_path = config_path.as_ref();
        if !config_path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(config_path).map_err(|source| {
            ConfigError::ConfigReadError {
                config_path: config_path.to_path_buf(),
                source,
            }
        })?;

        let config: Config =
            toml::from_str(&content).map_err(|source| ConfigError::ConfigParseError {
                config_path: config_path.to_path_buf(),
                source,
            })?;

        config.validate(config_path)?;
        Ok(Some(config))
    }

    pub fn load() -> Result<Option<Self>, ConfigError> {
        let config_path = Self::config_path();
        Self::load_from_path(&config_path)
    }

    /// Load from `config_path`, falling back to the defaults when the file
    /// doesn't exist.
    pub fn load_or_default<P: AsRef<Path>>(config_path: P) -> Result<Self, ConfigError> {
        Ok(Self::load_from_path(config_path)?.unwrap_or_default())
    }

    /// Render the configuration as TOML.
    pub fn to_toml(&self) -> String {
        // Two integer fields always serialize
        toml::to_string(self).unwrap_or_default()
    }

    /// The config file location: `$LANG_YAML_CONFIG` if set, otherwise
    /// `~/.config/lang-yaml/config.toml`.
    pub fn config_path() -> PathBuf {
        if let Ok(custom) = std::env::var(CONFIG_PATH_ENV) {
            let custom = PathBuf::from(custom);
            return Self::expand_path(&custom).unwrap_or(custom);
        }
        let config_dir = shellexpand::tilde("~/.config/lang-yaml");
        PathBuf::from(config_dir.as_ref()).join("config.toml")
    }

    /// Expand shell variables and tilde in a user supplied path.
    pub fn expand_path(path: &Path) -> Option<PathBuf> {
        let path_str = path.to_string_lossy();
        match shellexpand::full(&path_str) {
            Ok(expanded) => Some(PathBuf::from(expanded.as_ref())),
            Err(_) => None,
        }
    }

    fn validate(&self, config_path: &Path) -> Result<(), ConfigError> {
        let zero = if self.indent_unit == 0 {
            Some("indent_unit")
        } else if self.tab_size == 0 {
            Some("tab_size")
        } else {
            None
        };
        match zero {
            Some(field) => Err(ConfigError::ZeroWidth {
                config_path: config_path.to_path_buf(),
                field,
            }),
            None => Ok(()),
        }
    }
}
