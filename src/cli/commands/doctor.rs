use crate::config::{resolve_config, ConfigOverrides};
use crate::core::error::Result;
use crate::core::ProcessExecutor;
use crate::python::VirtualEnv;
use colored::Colorize;
use std::env;
use std::path::PathBuf;

pub async fn execute(config_path: Option<PathBuf>, overrides: ConfigOverrides) -> Result<()> {
    println!("{}", "Running launch checks...".bold());
    println!();

    let current_dir = env::current_dir()?;
    let resolved = resolve_config(config_path.as_deref(), &current_dir, &overrides).await?;
    let config = &resolved.config;
    println!("Config: {}", resolved.source.to_string().cyan());

    let mut all_ok = true;

    // Project root
    print!("Checking project root... ");
    let root = resolved.project_root();
    if !root.is_dir() {
        println!("{} {}", "✗ Not found:".red(), root.display());
        println!();
        println!("{}", "Cannot continue without a project root.".yellow().bold());
        return Ok(());
    }
    println!("{} ({})", "✓".green(), root.display().to_string().yellow());

    // Entry module
    print!("Checking entry {}... ", config.app.entry.cyan());
    if root.join(&config.app.entry).is_file() {
        println!("{}", "✓".green());
    } else {
        println!("{}", "✗ Not found".red());
        all_ok = false;
    }

    // Virtual environment
    print!("Checking virtual environment... ");
    let venv = VirtualEnv::new(&root, &config.venv.path);
    let activated = match venv.activate() {
        Ok(env) => {
            println!("{} ({})", "✓".green(), venv.path().display().to_string().yellow());
            Some(env)
        }
        Err(e) => {
            println!("{} {}", "✗".red(), e);
            println!(
                "  Create it with {}",
                format!("python -m venv {}", config.venv.path).cyan()
            );
            all_ok = false;
            None
        }
    };

    if let Some(env) = activated {
        print!("Checking interpreter {}... ", config.app.interpreter.cyan());
        match env.resolve_program(&config.app.interpreter) {
            Ok(interpreter) => {
                let mut version = env.command(&interpreter);
                version.arg("--version");
                match ProcessExecutor::execute_with_output(version).await {
                    Ok(v) => println!("{} ({})", "✓".green(), v.trim().yellow()),
                    Err(_) => println!("{}", "✓".green()),
                }

                print!("Checking runner {}... ", config.app.runner.cyan());
                let mut check = env.command(&interpreter);
                check
                    .args(runner_check_args(&config.app.runner))
                    .current_dir(&root);
                match ProcessExecutor::execute(check).await {
                    Ok(output) if output.status.success() => println!("{}", "✓".green()),
                    _ => {
                        println!("{}", "✗ Not installed in the environment".red());
                        all_ok = false;
                    }
                }
            }
            Err(e) => {
                println!("{} {}", "✗".red(), e);
                all_ok = false;
            }
        }
    }

    println!();
    if all_ok {
        println!("{}", "All checks passed!".green().bold());
    } else {
        println!(
            "{}",
            "Some checks failed. Please fix the issues above."
                .yellow()
                .bold()
        );
    }

    Ok(())
}

const RUNNER_CHECK: &str =
    "import importlib.util, sys; sys.exit(0 if importlib.util.find_spec(sys.argv[1]) else 1)";

/// Interpreter arguments that exit 0 when `runner` is importable.
fn runner_check_args(runner: &str) -> [&str; 3] {
    ["-c", RUNNER_CHECK, runner]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn runner_name_is_passed_as_argument() {
        let args = runner_check_args("it's-not-code");
        assert_eq!(args[0], "-c");
        assert!(!args[1].contains("it's"));
        assert!(args[1].contains("sys.argv[1]"));
        assert_eq!(args[2], "it's-not-code");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn runner_check_ignores_pythonhome() {
        use crate::core::path::write_executable;

        let dir = tempfile::tempdir().unwrap();
        let venv = VirtualEnv::new(dir.path(), ".venv");
        std::fs::create_dir_all(venv.bin_dir()).unwrap();
        std::fs::write(venv.activation_script(), "").unwrap();
        let python = venv.bin_dir().join("python");
        // Succeeds only when PYTHONHOME is unset and the runner arrives as argv.
        write_executable(
            &python,
            "#!/bin/sh
[ -z \"${PYTHONHOME+x}\" ] && [ \"$3\" = streamlit ]
",
        );

        let env = venv.activate_with_path(None).unwrap();
        let mut check = tokio::process::Command::new(&python);
        check.env("PYTHONHOME", "/opt/elsewhere");
        env.apply(&mut check);
        check.args(runner_check_args("streamlit"));

        let output = ProcessExecutor::execute(check).await.unwrap();
        assert!(output.status.success());
    }
}
