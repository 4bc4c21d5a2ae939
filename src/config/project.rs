use crate::config::schema::LauncherConfig;
use crate::config::validate_launcher_config;
use crate::core::error::{LauncherError, Result};
use std::path::{Path, PathBuf};
use tokio::fs;

pub const PROJECT_CONFIG_FILE: &str = "launcher.toml";

pub struct ProjectConfigManager {
    config_path: PathBuf,
}

impl ProjectConfigManager {
    pub fn new(project_dir: &Path) -> Self {
        Self {
            config_path: project_dir.join(PROJECT_CONFIG_FILE),
        }
    }

    pub fn from_file(config_path: PathBuf) -> Self {
        Self { config_path }
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    /// Directory that relative paths in the file are resolved against.
    pub fn base_dir(&self) -> PathBuf {
        self.config_path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."))
    }

    pub fn exists(&self) -> bool {
        self.config_path.exists()
    }

    pub async fn load(&self) -> Result<LauncherConfig> {
        if !self.exists() {
            return Err(LauncherError::Config(format!(
                "Config file not found: {}",
                self.config_path.display()
            )));
        }

        let content = fs::read_to_string(&self.config_path).await?;
        let config: LauncherConfig = toml::from_str(&content)?;
        validate_launcher_config(&config)?;
        Ok(config)
    }

    pub async fn save(&self, config: &LauncherConfig) -> Result<()> {
        validate_launcher_config(config)?;
        let content = toml::to_string_pretty(config)?;
        fs::write(&self.config_path, content).await?;
        Ok(())
    }

    pub async fn create(&self, config: &LauncherConfig, force: bool) -> Result<()> {
        if self.exists() && !force {
            return Err(LauncherError::Config(format!(
                "{} already exists. Use --force to overwrite it.",
                self.config_path.display()
            )));
        }

        self.save(config).await
    }

    pub fn find_project_root(start_dir: &Path) -> Option<PathBuf> {
        let mut current = start_dir;

        loop {
            let config_path = current.join(PROJECT_CONFIG_FILE);
            if config_path.exists() {
                return Some(current.to_path_buf());
            }

            current = current.parent()?;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn loads_partial_file_with_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let mgr = ProjectConfigManager::new(dir.path());

        let toml = r#"
[venv]
path = "env"

[console]
pause_on_exit = false
"#;
        tokio::fs::write(mgr.config_path(), toml).await.unwrap();

        let config = mgr.load().await.unwrap();
        assert_eq!(config.venv.path, "env");
        assert_eq!(config.app.entry, "app.py");
        assert!(!config.console.pause_on_exit);
    }

    #[tokio::test]
    async fn invalid_values_fail_on_load() {
        let dir = tempfile::tempdir().unwrap();
        let mgr = ProjectConfigManager::new(dir.path());

        let toml = r#"
[app]
runner = "bin/streamlit"
"#;
        tokio::fs::write(mgr.config_path(), toml).await.unwrap();

        let msg = mgr.load().await.unwrap_err().to_string();
        assert!(msg.contains("app.runner"), "unexpected error: {}", msg);
    }

    #[tokio::test]
    async fn create_refuses_to_overwrite_without_force() {
        let dir = tempfile::tempdir().unwrap();
        let mgr = ProjectConfigManager::new(dir.path());
        let config = LauncherConfig::default();

        mgr.create(&config, false).await.unwrap();
        assert!(mgr.create(&config, false).await.is_err());
        mgr.create(&config, true).await.unwrap();

        assert_eq!(mgr.load().await.unwrap(), config);
    }

    #[test]
    fn finds_config_in_ancestor() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(PROJECT_CONFIG_FILE), "").unwrap();
        let nested = dir.path().join("src").join("pages");
        std::fs::create_dir_all(&nested).unwrap();

        let root = ProjectConfigManager::find_project_root(&nested).unwrap();
        assert_eq!(root, dir.path());
    }
}
