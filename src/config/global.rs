use crate::config::schema::LauncherConfig;
use crate::config::validate_launcher_config;
use crate::core::error::Result;
use directories::ProjectDirs;
use std::path::{Path, PathBuf};
use tokio::fs;

const GLOBAL_CONFIG_FILE: &str = "config.toml";

/// User-level fallback config, consulted when no project `launcher.toml` is found.
pub struct GlobalConfigManager {
    config_path: PathBuf,
}

impl GlobalConfigManager {
    pub fn new() -> Result<Self> {
        let config_dir = Self::get_config_dir()?;
        let config_path = config_dir.join(GLOBAL_CONFIG_FILE);

        Ok(Self { config_path })
    }

    fn get_config_dir() -> Result<PathBuf> {
        if let Some(proj_dirs) = ProjectDirs::from("com", "datalens", "datalens-launcher") {
            Ok(proj_dirs.config_dir().to_path_buf())
        } else {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
            Ok(PathBuf::from(home).join(".datalens-launcher"))
        }
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    pub fn exists(&self) -> bool {
        self.config_path.exists()
    }

    pub async fn load(&self) -> Result<Option<LauncherConfig>> {
        if !self.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(&self.config_path).await?;
        let config: LauncherConfig = toml::from_str(&content)?;
        validate_launcher_config(&config)?;
        Ok(Some(config))
    }
}
