use serde::{Deserialize, Serialize};

pub const DEFAULT_PROJECT_NAME: &str = "Data Profiling AI Assistant";
pub const DEFAULT_VENV_PATH: &str = ".venv";
pub const DEFAULT_INTERPRETER: &str = "python";
pub const DEFAULT_RUNNER: &str = "streamlit";
pub const DEFAULT_ENTRY: &str = "app.py";

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct LauncherConfig {
    #[serde(default)]
    pub project: ProjectSection,
    #[serde(default)]
    pub venv: VenvSection,
    #[serde(default)]
    pub app: AppSection,
    #[serde(default)]
    pub console: ConsoleSection,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ProjectSection {
    #[serde(default = "default_project_name")]
    pub name: String,
    /// Project root; relative values are taken from the directory holding the config file.
    #[serde(default = "default_root")]
    pub root: String,
}

impl Default for ProjectSection {
    fn default() -> Self {
        Self {
            name: default_project_name(),
            root: default_root(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct VenvSection {
    #[serde(default = "default_venv_path")]
    pub path: String,
}

impl Default for VenvSection {
    fn default() -> Self {
        Self {
            path: default_venv_path(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct AppSection {
    #[serde(default = "default_interpreter")]
    pub interpreter: String,
    #[serde(default = "default_runner")]
    pub runner: String,
    #[serde(default = "default_entry")]
    pub entry: String,
    #[serde(default)]
    pub args: Vec<String>,
}

impl Default for AppSection {
    fn default() -> Self {
        Self {
            interpreter: default_interpreter(),
            runner: default_runner(),
            entry: default_entry(),
            args: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ConsoleSection {
    #[serde(default = "default_pause_on_exit")]
    pub pause_on_exit: bool,
}

impl Default for ConsoleSection {
    fn default() -> Self {
        Self {
            pause_on_exit: default_pause_on_exit(),
        }
    }
}

fn default_project_name() -> String {
    DEFAULT_PROJECT_NAME.to_string()
}

fn default_root() -> String {
    ".".to_string()
}

fn default_venv_path() -> String {
    DEFAULT_VENV_PATH.to_string()
}

fn default_interpreter() -> String {
    DEFAULT_INTERPRETER.to_string()
}

fn default_runner() -> String {
    DEFAULT_RUNNER.to_string()
}

fn default_entry() -> String {
    DEFAULT_ENTRY.to_string()
}

fn default_pause_on_exit() -> bool {
    true
}

/// Command-line values that take precedence over the loaded file.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub root: Option<String>,
    pub venv: Option<String>,
    pub entry: Option<String>,
    pub runner: Option<String>,
    pub interpreter: Option<String>,
    pub extra_args: Vec<String>,
    pub no_pause: bool,
}

impl LauncherConfig {
    pub fn apply_overrides(&mut self, overrides: &ConfigOverrides) {
        if let Some(root) = &overrides.root {
            self.project.root = root.clone();
        }
        if let Some(venv) = &overrides.venv {
            self.venv.path = venv.clone();
        }
        if let Some(entry) = &overrides.entry {
            self.app.entry = entry.clone();
        }
        if let Some(runner) = &overrides.runner {
            self.app.runner = runner.clone();
        }
        if let Some(interpreter) = &overrides.interpreter {
            self.app.interpreter = interpreter.clone();
        }
        self.app.args.extend(overrides.extra_args.iter().cloned());
        if overrides.no_pause {
            self.console.pause_on_exit = false;
        }
    }
}
