use crate::config::schema::LauncherConfig;
use crate::core::error::{LauncherError, Result};

pub fn validate_command_name(field: &str, name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(LauncherError::Config(format!("{} cannot be empty", field)));
    }

    if name.starts_with('-') {
        return Err(LauncherError::Config(format!(
            "{} cannot start with '-'",
            field
        )));
    }

    if name.chars().any(|c| c == '/' || c == '\\') {
        return Err(LauncherError::Config(format!(
            "{} must be a command name (no path separators)",
            field
        )));
    }

    Ok(())
}

pub fn validate_launcher_config(config: &LauncherConfig) -> Result<()> {
    if config.project.name.trim().is_empty() {
        return Err(LauncherError::Config(
            "project.name cannot be empty".to_string(),
        ));
    }

    if config.project.root.trim().is_empty() {
        return Err(LauncherError::Config(
            "project.root cannot be empty".to_string(),
        ));
    }

    if config.venv.path.trim().is_empty() {
        return Err(LauncherError::Config(
            "venv.path cannot be empty".to_string(),
        ));
    }

    if config.app.entry.trim().is_empty() {
        return Err(LauncherError::Config(
            "app.entry cannot be empty".to_string(),
        ));
    }

    validate_command_name("app.interpreter", &config.app.interpreter)?;
    validate_command_name("app.runner", &config.app.runner)?;

    Ok(())
}
