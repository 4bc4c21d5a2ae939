pub mod global;
pub mod project;
pub mod schema;
pub mod validation;

use crate::core::error::Result;
use crate::core::resolve_path;
use std::fmt;
use std::path::{Path, PathBuf};

pub use global::GlobalConfigManager;
pub use project::{ProjectConfigManager, PROJECT_CONFIG_FILE};
pub use schema::{ConfigOverrides, LauncherConfig};
pub use validation::{validate_command_name, validate_launcher_config};

#[derive(Debug, Clone, PartialEq)]
pub enum ConfigSource {
    Explicit(PathBuf),
    Project(PathBuf),
    Global(PathBuf),
    Defaults,
}

impl fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigSource::Explicit(path) => write!(f, "{} (--config)", path.display()),
            ConfigSource::Project(path) => write!(f, "{}", path.display()),
            ConfigSource::Global(path) => write!(f, "{} (user config)", path.display()),
            ConfigSource::Defaults => write!(f, "built-in defaults"),
        }
    }
}

/// A validated config plus the directory its relative paths hang off.
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub config: LauncherConfig,
    pub source: ConfigSource,
    pub base_dir: PathBuf,
}

impl ResolvedConfig {
    pub fn project_root(&self) -> PathBuf {
        resolve_path(&self.base_dir, &self.config.project.root)
    }
}

/// Resolve config: explicit file, nearest `launcher.toml`, user config, then defaults.
pub async fn resolve_config(
    explicit: Option<&Path>,
    start_dir: &Path,
    overrides: &ConfigOverrides,
) -> Result<ResolvedConfig> {
    let (mut config, source, base_dir) = if let Some(path) = explicit {
        let path = resolve_path(start_dir, &path.to_string_lossy());
        let mgr = ProjectConfigManager::from_file(path.clone());
        let config = mgr.load().await?;
        (config, ConfigSource::Explicit(path), mgr.base_dir())
    } else if let Some(root) = ProjectConfigManager::find_project_root(start_dir) {
        let mgr = ProjectConfigManager::new(&root);
        let config = mgr.load().await?;
        (config, ConfigSource::Project(mgr.config_path().to_path_buf()), root)
    } else {
        match load_global().await? {
            Some((config, path)) => (config, ConfigSource::Global(path), start_dir.to_path_buf()),
            None => (
                LauncherConfig::default(),
                ConfigSource::Defaults,
                start_dir.to_path_buf(),
            ),
        }
    };

    config.apply_overrides(overrides);
    validate_launcher_config(&config)?;

    // CLI --root is relative to where the user stands, not to the config file.
    let base_dir = if overrides.root.is_some() {
        start_dir.to_path_buf()
    } else {
        base_dir
    };

    tracing::debug!("Resolved config from {}", source);

    Ok(ResolvedConfig {
        config,
        source,
        base_dir,
    })
}

async fn load_global() -> Result<Option<(LauncherConfig, PathBuf)>> {
    let mgr = match GlobalConfigManager::new() {
        Ok(mgr) => mgr,
        Err(_) => return Ok(None),
    };
    let path = mgr.config_path().to_path_buf();
    Ok(mgr.load().await?.map(|config| (config, path)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn project_file_roots_relative_paths_at_its_directory() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(PROJECT_CONFIG_FILE),
            "[project]\nroot = \"web\"\n",
        )
        .unwrap();
        let nested = dir.path().join("notebooks");
        std::fs::create_dir_all(&nested).unwrap();

        let resolved = resolve_config(None, &nested, &ConfigOverrides::default())
            .await
            .unwrap();

        assert_eq!(
            resolved.source,
            ConfigSource::Project(dir.path().join(PROJECT_CONFIG_FILE))
        );
        assert_eq!(resolved.project_root(), dir.path().join("web"));
    }

    #[tokio::test]
    async fn explicit_file_wins_over_project_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(PROJECT_CONFIG_FILE), "").unwrap();
        let other = dir.path().join("alt.toml");
        std::fs::write(&other, "[app]\nentry = \"dashboard.py\"\n").unwrap();

        let resolved = resolve_config(Some(&other), dir.path(), &ConfigOverrides::default())
            .await
            .unwrap();

        assert_eq!(resolved.source, ConfigSource::Explicit(other));
        assert_eq!(resolved.config.app.entry, "dashboard.py");
    }

    #[tokio::test]
    async fn cli_root_is_relative_to_start_dir() {
        let dir = tempfile::tempdir().unwrap();
        let cfg_dir = dir.path().join("cfg");
        std::fs::create_dir_all(&cfg_dir).unwrap();
        let cfg = cfg_dir.join(PROJECT_CONFIG_FILE);
        std::fs::write(&cfg, "").unwrap();

        let overrides = ConfigOverrides {
            root: Some("app".to_string()),
            ..Default::default()
        };
        let resolved = resolve_config(Some(&cfg), dir.path(), &overrides)
            .await
            .unwrap();

        assert_eq!(resolved.project_root(), dir.path().join("app"));
    }

    #[tokio::test]
    async fn invalid_override_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(PROJECT_CONFIG_FILE), "").unwrap();

        let overrides = ConfigOverrides {
            interpreter: Some("../python".to_string()),
            ..Default::default()
        };
        assert!(resolve_config(None, dir.path(), &overrides).await.is_err());
    }
}
