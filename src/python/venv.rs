use crate::core::error::{LauncherError, Result};
use crate::core::{find_on_path, resolve_path};
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use tokio::process::Command;

/// A virtual environment directory that has not been activated yet.
#[derive(Debug, Clone)]
pub struct VirtualEnv {
    venv_path: PathBuf,
}

impl VirtualEnv {
    pub fn new(project_root: &Path, relative: &str) -> Self {
        Self {
            venv_path: resolve_path(project_root, relative),
        }
    }

    pub fn path(&self) -> &Path {
        &self.venv_path
    }

    pub fn exists(&self) -> bool {
        self.venv_path.is_dir()
    }

    pub fn bin_dir(&self) -> PathBuf {
        if cfg!(windows) {
            self.venv_path.join("Scripts")
        } else {
            self.venv_path.join("bin")
        }
    }

    /// The script a shell would source to activate this environment.
    pub fn activation_script(&self) -> PathBuf {
        if cfg!(windows) {
            self.bin_dir().join("activate.bat")
        } else {
            self.bin_dir().join("activate")
        }
    }

    pub fn activate(&self) -> Result<ActivatedEnv> {
        self.activate_with_path(std::env::var_os("PATH"))
    }

    /// Build the activated environment on top of `base_path` instead of the process `PATH`.
    pub fn activate_with_path(&self, base_path: Option<OsString>) -> Result<ActivatedEnv> {
        if !self.exists() {
            return Err(LauncherError::EnvironmentActivation(format!(
                "virtual environment not found at {}",
                self.venv_path.display()
            )));
        }

        let script = self.activation_script();
        if !script.is_file() {
            return Err(LauncherError::EnvironmentActivation(format!(
                "activation script missing: {}",
                script.display()
            )));
        }

        let bin_dir = self.bin_dir();
        let mut entries = vec![bin_dir.clone()];
        if let Some(base) = base_path.as_deref() {
            entries.extend(std::env::split_paths(base));
        }
        let path_var = std::env::join_paths(entries).map_err(|e| {
            LauncherError::EnvironmentActivation(format!("cannot build PATH: {}", e))
        })?;

        tracing::debug!(
            "Activated {} (PATH head {})",
            self.venv_path.display(),
            bin_dir.display()
        );

        Ok(ActivatedEnv {
            venv_path: self.venv_path.clone(),
            bin_dir,
            path_var,
        })
    }
}

/// Environment overlay produced by activation; applied per child command.
#[derive(Debug, Clone)]
pub struct ActivatedEnv {
    venv_path: PathBuf,
    bin_dir: PathBuf,
    path_var: OsString,
}

impl ActivatedEnv {
    pub fn env_vars(&self) -> Vec<(String, OsString)> {
        vec![
            (
                "VIRTUAL_ENV".to_string(),
                self.venv_path.clone().into_os_string(),
            ),
            ("PATH".to_string(), self.path_var.clone()),
        ]
    }

    /// Look a command up the way the activated shell would.
    pub fn resolve_program(&self, program: &str) -> Result<PathBuf> {
        find_on_path(program, &self.path_var).ok_or_else(|| {
            LauncherError::EnvironmentActivation(format!(
                "'{}' not found on the activated PATH (expected in {})",
                program,
                self.bin_dir.display()
            ))
        })
    }

    pub fn apply(&self, command: &mut Command) {
        for (key, value) in self.env_vars() {
            command.env(key, value);
        }
        command.env_remove("PYTHONHOME");
    }

    /// A command for `program` with this environment applied.
    pub fn command(&self, program: &Path) -> Command {
        let mut command = Command::new(program);
        self.apply(&mut command);
        command
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::path::write_executable;
    use std::ffi::OsStr;

    fn fake_venv(root: &Path) -> VirtualEnv {
        let venv = VirtualEnv::new(root, ".venv");
        std::fs::create_dir_all(venv.bin_dir()).unwrap();
        std::fs::write(venv.activation_script(), "").unwrap();
        venv
    }

    #[test]
    fn layout_follows_platform() {
        let venv = VirtualEnv::new(Path::new("/srv/app"), ".venv");
        assert_eq!(venv.path(), Path::new("/srv/app/.venv"));

        #[cfg(unix)]
        assert!(venv.activation_script().ends_with(".venv/bin/activate"));

        #[cfg(windows)]
        assert!(venv
            .activation_script()
            .ends_with(".venv\\Scripts\\activate.bat"));
    }

    #[test]
    fn missing_directory_fails_activation() {
        let dir = tempfile::tempdir().unwrap();
        let venv = VirtualEnv::new(dir.path(), ".venv");
        let err = venv.activate_with_path(None).unwrap_err();
        assert!(matches!(err, LauncherError::EnvironmentActivation(_)));
    }

    #[test]
    fn missing_activation_script_fails_activation() {
        let dir = tempfile::tempdir().unwrap();
        let venv = VirtualEnv::new(dir.path(), ".venv");
        std::fs::create_dir_all(venv.bin_dir()).unwrap();

        match venv.activate_with_path(None).unwrap_err() {
            LauncherError::EnvironmentActivation(msg) => assert!(msg.contains("activat")),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn activation_prepends_bin_dir() {
        let dir = tempfile::tempdir().unwrap();
        let venv = fake_venv(dir.path());
        let other = tempfile::tempdir().unwrap();
        let base = std::env::join_paths([other.path()]).unwrap();

        let env = venv.activate_with_path(Some(base)).unwrap();
        let vars = env.env_vars();
        assert_eq!(vars[0].0, "VIRTUAL_ENV");
        assert_eq!(PathBuf::from(&vars[0].1), venv.path());

        assert_eq!(vars[1].0, "PATH");
        let entries: Vec<PathBuf> = std::env::split_paths(&vars[1].1).collect();
        assert_eq!(entries, vec![venv.bin_dir(), other.path().to_path_buf()]);
    }

    #[test]
    fn programs_resolve_inside_environment_first() {
        let dir = tempfile::tempdir().unwrap();
        let venv = fake_venv(dir.path());
        let name = if cfg!(windows) { "python.exe" } else { "python" };
        write_executable(&venv.bin_dir().join(name), "");

        let env = venv.activate_with_path(None).unwrap();
        let python = env.resolve_program("python").unwrap();
        assert!(python.starts_with(venv.bin_dir()));
        assert!(env.resolve_program("no-such-runner").is_err());
    }

    #[test]
    fn commands_carry_the_activated_environment() {
        let dir = tempfile::tempdir().unwrap();
        let venv = fake_venv(dir.path());
        let env = venv.activate_with_path(None).unwrap();

        let command = env.command(&venv.bin_dir().join("python"));
        let envs: Vec<(&OsStr, Option<&OsStr>)> = command.as_std().get_envs().collect();

        assert!(envs.contains(&(OsStr::new("VIRTUAL_ENV"), Some(venv.path().as_os_str()))));
        assert!(envs.contains(&(OsStr::new("PYTHONHOME"), None)));
        assert!(envs.iter().any(|(key, _)| *key == OsStr::new("PATH")));
    }
}
