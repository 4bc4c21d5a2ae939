use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LauncherError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Project root not found: {}", .0.display())]
    PathNotFound(PathBuf),

    #[error("Virtual environment activation failed: {0}")]
    EnvironmentActivation(String),

    #[error("Application process failed: {0}")]
    ChildProcessFailure(String),

    #[error("Console error: {0}")]
    Console(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Toml(#[from] toml::de::Error),

    #[error(transparent)]
    TomlSerialize(#[from] toml::ser::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, LauncherError>;
