//! Subcommand implementations.

pub mod chat;
pub mod config_cmd;
pub mod doctor;

use std::path::PathBuf;

use parley_config::{AppConfig, BackendKind, ConfigError};

/// Global flags that take precedence over the file and the environment.
#[derive(Debug, Default)]
pub struct Overrides {
    pub config: Option<PathBuf>,
    pub backend: Option<String>,
    pub base_url: Option<String>,
    pub model: Option<String>,
}

impl Overrides {
    pub fn config_path(&self) -> PathBuf {
        self.config.clone().unwrap_or_else(AppConfig::config_path)
    }

    /// File, then environment, then flags; validated last.
    pub fn load(&self) -> Result<AppConfig, ConfigError> {
        let mut config = match &self.config {
            Some(path) => {
                let mut config = AppConfig::load_from(path)?;
                config.apply_env_overrides()?;
                config
            }
            None => AppConfig::load()?,
        };

        if let Some(kind) = &self.backend {
            config.backend.kind = kind.parse::<BackendKind>()?;
        }
        if let Some(url) = &self.base_url {
            config.backend.base_url = url.clone();
        }
        if let Some(model) = &self.model {
            config.backend.model = model.clone();
        }

        config.validate()?;
        Ok(config)
    }
}
