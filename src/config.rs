use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::palette::{Integration, PaletteSettings};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("{0}")]
    Validation(String),
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    pub palette: PaletteConfig,
    pub logging: LoggingConfig,
}

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct PaletteConfig {
    /// Activate the palette at start-up.
    pub enabled: bool,
    pub trigger: char,
    /// Counts as whitespace when finding the end of a fragment. Empty
    /// disables it.
    pub boundary_escape: String,
    pub integration: Integration,
}

impl Default for PaletteConfig {
    fn default() -> Self {
        let settings = PaletteSettings::default();
        Self {
            enabled: true,
            trigger: settings.trigger,
            boundary_escape: settings.boundary_escape.map(String::from).unwrap_or_default(),
            integration: Integration::default(),
        }
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive used when `RUST_LOG` is not set.
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl Config {
    /// `<config dir>/pure-format/config.toml`
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("pure-format").join("config.toml"))
    }

    /// Loads the default config file, falling back to defaults when it is
    /// missing or broken.
    pub fn load_or_default() -> Self {
        if let Some(path) = Self::default_config_path()
            && path.exists()
        {
            match Self::load_from_file(&path) {
                Ok(config) => return config,
                Err(err) => {
                    tracing::warn!(
                        "Failed to load config from {}: {}, using defaults",
                        path.display(),
                        err
                    );
                }
            }
        }
        Self::default()
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&contents)
    }

    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let palette = &self.palette;
        if palette.trigger.is_whitespace() {
            return Err(ConfigError::Validation(
                "palette.trigger must not be whitespace".to_string(),
            ));
        }
        if palette.boundary_escape.chars().count() > 1 {
            return Err(ConfigError::Validation(format!(
                "palette.boundary_escape must be a single character, got {:?}",
                palette.boundary_escape
            )));
        }
        if palette.boundary_escape.starts_with(palette.trigger) {
            return Err(ConfigError::Validation(format!(
                "palette.trigger {:?} cannot also be the boundary escape",
                palette.trigger
            )));
        }
        Ok(())
    }

    pub fn palette_settings(&self) -> PaletteSettings {
        PaletteSettings {
            trigger: self.palette.trigger,
            boundary_escape: self.palette.boundary_escape.chars().next(),
        }
    }
}
