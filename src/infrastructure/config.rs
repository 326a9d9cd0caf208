use crate::domain::{config::RowdeskConfig, error::{RowdeskError, RowdeskResult}};
use std::path::{Path, PathBuf};
use std::fs;

/// Configuration manager
pub struct ConfigManager {
    global_config_path: PathBuf,
    project_config_path: Option<PathBuf>,
}

impl ConfigManager {
    /// Create new configuration manager
    pub fn new() -> RowdeskResult<Self> {
        let global_config_path = Self::get_global_config_path()?;
        let project_config_path = Self::find_project_config_path();

        Ok(Self {
            global_config_path,
            project_config_path,
        })
    }

    /// Build a manager over explicit paths
    pub fn with_paths(global_config_path: PathBuf, project_config_path: Option<PathBuf>) -> Self {
        Self {
            global_config_path,
            project_config_path,
        }
    }

    /// Load configuration: defaults, then the global file, then the project
    /// file. A later file replaces the earlier one.
    pub fn load_config(&self) -> RowdeskResult<RowdeskConfig> {
        let mut config = RowdeskConfig::default();

        if self.global_config_path.exists() {
            config = self.load_config_from_path(&self.global_config_path)?;
            tracing::debug!(path = %self.global_config_path.display(), "global config loaded");
        }

        if let Some(project_path) = &self.project_config_path {
            if project_path.exists() {
                config = self.load_config_from_path(project_path)?;
                tracing::debug!(path = %project_path.display(), "project config loaded");
            }
        }

        Ok(config)
    }

    /// Get global configuration path
    fn get_global_config_path() -> RowdeskResult<PathBuf> {
        Ok(Self::config_home()?.join("config.toml"))
    }

    fn config_home() -> RowdeskResult<PathBuf> {
        let home = dirs::home_dir().ok_or_else(|| RowdeskError::Config {
            message: "Could not determine home directory".to_string(),
        })?;

        Ok(home.join(".config").join("rowdesk"))
    }

    /// Default directory for the interactive session's log files
    pub fn default_log_dir() -> RowdeskResult<PathBuf> {
        Ok(Self::config_home()?.join("logs"))
    }

    /// Find project configuration path by walking up directory tree
    fn find_project_config_path() -> Option<PathBuf> {
        let current_dir = std::env::current_dir().ok()?;
        let mut path = current_dir.as_path();

        loop {
            let config_path = path.join(".rowdesk").join("config.toml");
            if config_path.exists() {
                return Some(config_path);
            }

            path = path.parent()?;
        }
    }

    /// Load configuration from specific path
    pub fn load_config_from_path(&self, path: &Path) -> RowdeskResult<RowdeskConfig> {
        let content = fs::read_to_string(path).map_err(|e| RowdeskError::Config {
            message: format!("Failed to read config file {}: {}", path.display(), e),
        })?;

        toml::from_str(&content).map_err(|e| RowdeskError::Config {
            message: format!("Failed to parse config file {}: {}", path.display(), e),
        })
    }

    /// Save configuration to specific path
    pub fn save_config_to_path(&self, path: &Path, config: &RowdeskConfig) -> RowdeskResult<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| RowdeskError::Config {
                message: format!("Failed to create config directory: {}", e),
            })?;
        }

        let content = toml::to_string_pretty(config).map_err(|e| RowdeskError::Config {
            message: format!("Failed to serialize config: {}", e),
        })?;

        fs::write(path, content).map_err(|e| RowdeskError::Config {
            message: format!("Failed to write config file {}: {}", path.display(), e),
        })
    }

    /// Create default project configuration under `path/.rowdesk`
    pub fn init_project_config(&self, path: &Path) -> RowdeskResult<PathBuf> {
        let config_file = path.join(".rowdesk").join("config.toml");

        if config_file.exists() {
            return Err(RowdeskError::Config {
                message: "Project configuration already exists".to_string(),
            });
        }

        self.save_config_to_path(&config_file, &RowdeskConfig::default())?;

        Ok(config_file)
    }

    /// Get the global config path
    pub fn get_global_config_path_ref(&self) -> &PathBuf {
        &self.global_config_path
    }
}
