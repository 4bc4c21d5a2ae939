use crate::core::error::{LauncherError, Result};
use std::process::Output;
use tokio::process::Command;

pub struct ProcessExecutor;

impl ProcessExecutor {
    pub async fn execute(mut command: Command) -> Result<Output> {
        let program = command.as_std().get_program().to_string_lossy().to_string();

        let output = command
            .output()
            .await
            .map_err(|e| LauncherError::ChildProcessFailure(format!("{}: {}", program, e)))?;

        Ok(output)
    }

    pub async fn execute_with_output(command: Command) -> Result<String> {
        let program = command.as_std().get_program().to_string_lossy().to_string();
        let output = Self::execute(command).await?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(LauncherError::ChildProcessFailure(format!(
                "{} failed: {}",
                program,
                stderr.trim()
            )));
        }

        // Older interpreters print --version to stderr.
        let stdout = String::from_utf8_lossy(&output.stdout).trim().to_string();
        if stdout.is_empty() {
            Ok(String::from_utf8_lossy(&output.stderr).trim().to_string())
        } else {
            Ok(stdout)
        }
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    #[tokio::test]
    async fn captures_stdout() {
        let mut command = Command::new("/bin/sh");
        command.args(["-c", "printf %s \"$LAUNCHER_CHECK\""]);
        command.env("LAUNCHER_CHECK", "ok");

        let output = ProcessExecutor::execute_with_output(command).await.unwrap();
        assert_eq!(output, "ok");
    }

    #[tokio::test]
    async fn falls_back_to_stderr() {
        let mut command = Command::new("/bin/sh");
        command.args(["-c", "echo 'Python 2.7.18' >&2"]);

        let output = ProcessExecutor::execute_with_output(command).await.unwrap();
        assert_eq!(output, "Python 2.7.18");
    }

    #[tokio::test]
    async fn non_zero_exit_is_an_error() {
        let mut command = Command::new("/bin/sh");
        command.args(["-c", "exit 3"]);

        let err = ProcessExecutor::execute_with_output(command)
            .await
            .unwrap_err();
        assert!(matches!(err, LauncherError::ChildProcessFailure(_)));
    }
}
