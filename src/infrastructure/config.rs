use crate::domain::{
    config::ClientConfig,
    error::{TaskError, TaskResult},
};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Configuration manager
///
/// Resolves the client configuration from built-in defaults, the global
/// config file and finally the environment, in that order.
pub struct ConfigManager {
    global_config_path: Option<PathBuf>,
}

impl ConfigManager {
    /// Create new configuration manager
    pub fn new() -> Self {
        Self {
            global_config_path: Self::get_global_config_path(),
        }
    }

    /// Create a manager reading its global config from `path`
    pub fn with_global_path(path: impl Into<PathBuf>) -> Self {
        Self {
            global_config_path: Some(path.into()),
        }
    }

    /// Load configuration, applying process environment overrides
    pub fn load_config(&self, explicit_path: Option<&Path>) -> TaskResult<ClientConfig> {
        self.load_config_with_env(explicit_path, |name| std::env::var(name).ok())
    }

    /// Load configuration, resolving environment variables through `lookup`
    pub fn load_config_with_env<F>(
        &self,
        explicit_path: Option<&Path>,
        lookup: F,
    ) -> TaskResult<ClientConfig>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = match explicit_path {
            Some(path) => self.load_config_from_path(path)?,
            None => match &self.global_config_path {
                Some(path) if path.exists() => self.load_config_from_path(path)?,
                _ => ClientConfig::default(),
            },
        };

        config.connection.apply_env(lookup);
        debug!(address = %config.connection.address, "Resolved data service address");
        Ok(config)
    }

    /// Global configuration path, `~/.config/elos/task.toml`
    fn get_global_config_path() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(".config").join("elos").join("task.toml"))
    }

    /// Load configuration from specific path
    pub fn load_config_from_path(&self, path: &Path) -> TaskResult<ClientConfig> {
        let content = fs::read_to_string(path).map_err(|e| TaskError::Config {
            message: format!("Failed to read config file {}: {}", path.display(), e),
        })?;

        toml::from_str(&content).map_err(|e| TaskError::Config {
            message: format!("Failed to parse config file {}: {}", path.display(), e),
        })
    }

    /// Get the global config path
    pub fn get_global_config_path_ref(&self) -> Option<&PathBuf> {
        self.global_config_path.as_ref()
    }
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self::new()
    }
}
