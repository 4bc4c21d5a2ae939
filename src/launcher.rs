//! The four launch steps: enter the project root, activate the virtual
//! environment, run the app in the foreground, then pause.
//!
//! Each step consumes the previous step's output, so they cannot run out of
//! order. Nothing here touches the launcher's own working directory or
//! environment; both are applied to the child command only.

use crate::config::{LauncherConfig, ResolvedConfig};
use crate::console::{Console, PAUSE_PROMPT, STOP_HINT};
use crate::core::error::{LauncherError, Result};
use crate::python::{run_foreground, ActivatedEnv, AppCommand, AppExit, VirtualEnv};
use colored::Colorize;
use std::path::{Path, PathBuf};

/// Project root confirmed to exist.
#[derive(Debug, Clone)]
pub struct ProjectDir {
    root: PathBuf,
}

impl ProjectDir {
    pub fn path(&self) -> &Path {
        &self.root
    }
}

/// Project root with its virtual environment activated.
#[derive(Debug, Clone)]
pub struct Activation {
    pub dir: ProjectDir,
    pub env: ActivatedEnv,
}

pub struct Launcher {
    config: LauncherConfig,
    project_root: PathBuf,
}

impl Launcher {
    pub fn new(resolved: &ResolvedConfig) -> Self {
        Self {
            config: resolved.config.clone(),
            project_root: resolved.project_root(),
        }
    }

    pub fn with_root(config: LauncherConfig, project_root: PathBuf) -> Self {
        Self {
            config,
            project_root,
        }
    }

    pub async fn enter_project_root(&self) -> Result<ProjectDir> {
        let root = match tokio::fs::canonicalize(&self.project_root).await {
            Ok(root) if root.is_dir() => root,
            _ => return Err(LauncherError::PathNotFound(self.project_root.clone())),
        };

        tracing::debug!("Project root: {}", root.display());
        Ok(ProjectDir { root })
    }

    pub fn activate(&self, dir: ProjectDir) -> Result<Activation> {
        let venv = VirtualEnv::new(dir.path(), &self.config.venv.path);
        let env = venv.activate()?;
        Ok(Activation { dir, env })
    }

    pub fn app_command(&self, activation: &Activation) -> Result<AppCommand> {
        let interpreter = activation.env.resolve_program(&self.config.app.interpreter)?;
        Ok(AppCommand::module_run(
            interpreter,
            &self.config.app.runner,
            &self.config.app.entry,
            &self.config.app.args,
            activation.dir.path(),
        ))
    }

    pub async fn launch(&self, activation: &Activation) -> Result<AppExit> {
        let app = self.app_command(activation)?;
        tracing::info!("Running {}", app.display());

        let exit = run_foreground(&app, &activation.env).await?;
        if exit.success() {
            tracing::info!("{} exited ({})", self.config.project.name, exit.describe());
        } else {
            tracing::warn!("{} exited ({})", self.config.project.name, exit.describe());
        }
        Ok(exit)
    }

    /// Run all steps. Errors from the first three steps return before the closing
    /// message; the app's own exit status never does.
    pub async fn run<C: Console>(&self, console: &mut C) -> Result<AppExit> {
        let dir = self.enter_project_root().await?;
        let activation = self.activate(dir)?;

        console.status(&format!(
            "{} Starting {}...",
            "→".blue().bold(),
            self.config.project.name.cyan()
        ));

        let exit = self.launch(&activation).await?;

        console.status(STOP_HINT);
        self.pause(console).await?;
        Ok(exit)
    }

    /// Run and settle on the launcher's own exit code. A failed launch is
    /// reported and still pauses before yielding 1.
    pub async fn run_to_exit_code<C: Console>(
        &self,
        console: &mut C,
        propagate_exit_code: bool,
    ) -> Result<i32> {
        match self.run(console).await {
            Ok(exit) if propagate_exit_code => Ok(exit.exit_code()),
            Ok(_) => Ok(0),
            Err(e) => {
                tracing::debug!("Launch failed: {:?}", e);
                console.error(&e.to_string());
                self.pause(console).await?;
                Ok(1)
            }
        }
    }

    pub async fn pause<C: Console>(&self, console: &mut C) -> Result<()> {
        if self.config.console.pause_on_exit {
            console.wait_for_key(PAUSE_PROMPT).await?;
        }
        Ok(())
    }
}
