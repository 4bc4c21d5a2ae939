use crate::core::error::{LauncherError, Result};
use crate::python::venv::ActivatedEnv;
use std::path::{Path, PathBuf};
use std::process::{ExitStatus, Stdio};

/// `<interpreter> -m <runner> run <entry> [args...]`
#[derive(Debug, Clone, PartialEq)]
pub struct AppCommand {
    pub program: PathBuf,
    pub args: Vec<String>,
    pub current_dir: PathBuf,
}

impl AppCommand {
    pub fn module_run(
        interpreter: PathBuf,
        runner: &str,
        entry: &str,
        extra_args: &[String],
        current_dir: &Path,
    ) -> Self {
        let mut args = vec![
            "-m".to_string(),
            runner.to_string(),
            "run".to_string(),
            entry.to_string(),
        ];
        args.extend(extra_args.iter().cloned());

        Self {
            program: interpreter,
            args,
            current_dir: current_dir.to_path_buf(),
        }
    }

    pub fn display(&self) -> String {
        let mut parts = vec![self.program.display().to_string()];
        parts.extend(self.args.iter().cloned());
        parts.join(" ")
    }
}

/// How the application process ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppExit {
    pub code: Option<i32>,
    pub signal: Option<i32>,
    pub interrupted: bool,
}

impl AppExit {
    fn from_status(status: ExitStatus, interrupted: bool) -> Self {
        #[cfg(unix)]
        let signal = {
            use std::os::unix::process::ExitStatusExt;
            status.signal()
        };
        #[cfg(not(unix))]
        let signal = None;

        Self {
            code: status.code(),
            signal,
            interrupted,
        }
    }

    pub fn success(&self) -> bool {
        self.code == Some(0)
    }

    pub fn exit_code(&self) -> i32 {
        match (self.code, self.signal) {
            (Some(code), _) => code,
            (None, Some(signal)) => 128 + signal,
            (None, None) => 1,
        }
    }

    pub fn describe(&self) -> String {
        let base = match (self.code, self.signal) {
            (Some(code), _) => format!("exit code {}", code),
            (None, Some(signal)) => format!("signal {}", signal),
            (None, None) => "unknown status".to_string(),
        };
        if self.interrupted {
            format!("{} after interrupt", base)
        } else {
            base
        }
    }
}

/// Run `app` in the foreground with the console inherited, waiting until it exits.
///
/// Ctrl+C reaches the child through the shared process group; the launcher only
/// notes it and keeps waiting so it can still reach its closing prompt.
pub async fn run_foreground(app: &AppCommand, env: &ActivatedEnv) -> Result<AppExit> {
    let mut command = env.command(&app.program);
    command
        .args(&app.args)
        .current_dir(&app.current_dir)
        .stdin(Stdio::inherit())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .kill_on_drop(true);

    let mut child = command.spawn().map_err(|e| {
        LauncherError::ChildProcessFailure(format!("failed to start {}: {}", app.display(), e))
    })?;

    tracing::debug!("Spawned pid {:?}", child.id());

    let mut interrupted = false;
    let mut listening = true;
    let status = loop {
        tokio::select! {
            status = child.wait() => {
                break status.map_err(|e| {
                    LauncherError::ChildProcessFailure(format!("failed to wait for {}: {}", app.display(), e))
                })?;
            }
            signal = tokio::signal::ctrl_c(), if listening => {
                match signal {
                    Ok(()) => {
                        interrupted = true;
                        tracing::info!("Interrupt received, waiting for the app to exit");
                    }
                    Err(e) => {
                        tracing::warn!("Cannot listen for Ctrl+C: {}", e);
                        listening = false;
                    }
                }
            }
        }
    };

    Ok(AppExit::from_status(status, interrupted))
}
