use crate::config::{LauncherConfig, ProjectConfigManager};
use crate::core::error::Result;
use crate::core::ensure_dir_exists;
use crate::python::VirtualEnv;
use colored::Colorize;
use std::env;
use std::path::PathBuf;

pub async fn execute(dir: Option<PathBuf>, name: Option<String>, force: bool) -> Result<()> {
    let current_dir = env::current_dir()?;
    let target_dir = match dir {
        Some(dir) if dir.is_absolute() => dir,
        Some(dir) => current_dir.join(dir),
        None => current_dir,
    };
    ensure_dir_exists(&target_dir).await?;

    let mut config = LauncherConfig::default();
    if let Some(name) = name {
        config.project.name = name;
    }

    let mgr = ProjectConfigManager::new(&target_dir);
    mgr.create(&config, force).await?;

    println!(
        "{} Wrote {}",
        "✓".green().bold(),
        mgr.config_path().display().to_string().yellow()
    );

    let venv = VirtualEnv::new(&target_dir, &config.venv.path);
    if !venv.exists() {
        println!(
            "{} No virtual environment at {} yet",
            "ℹ".blue().bold(),
            venv.path().display().to_string().yellow()
        );
    }

    println!(
        "  Start the app with {}",
        "datalens-launcher run".cyan()
    );

    Ok(())
}
