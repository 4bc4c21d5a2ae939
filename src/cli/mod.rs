pub mod commands;

use crate::config::ConfigOverrides;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "datalens-launcher",
    version,
    about = "Launch the Data Profiling AI Assistant from its virtual environment",
    long_about = None
)]
pub struct Cli {
    /// Config file (default: nearest launcher.toml, then the user config)
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Defaults to `run` when omitted
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Values that override the config file for a single invocation.
#[derive(Args, Clone, Debug, Default)]
pub struct TargetArgs {
    /// Project root directory
    #[arg(long)]
    pub root: Option<String>,

    /// Virtual environment path, relative to the project root
    #[arg(long)]
    pub venv: Option<String>,

    /// Application entry file passed to the runner
    #[arg(long)]
    pub entry: Option<String>,

    /// Module run with `<interpreter> -m` (default: streamlit)
    #[arg(long)]
    pub runner: Option<String>,

    /// Interpreter looked up on the activated PATH (default: python)
    #[arg(long)]
    pub interpreter: Option<String>,
}

impl TargetArgs {
    pub fn into_overrides(self) -> ConfigOverrides {
        ConfigOverrides {
            root: self.root,
            venv: self.venv,
            entry: self.entry,
            runner: self.runner,
            interpreter: self.interpreter,
            ..Default::default()
        }
    }
}

#[derive(Args, Clone, Debug, Default)]
pub struct RunArgs {
    #[command(flatten)]
    pub target: TargetArgs,

    /// Exit right after the app stops instead of waiting for a key
    #[arg(long)]
    pub no_pause: bool,

    /// Exit with the app's exit code instead of 0
    #[arg(long)]
    pub propagate_exit_code: bool,

    /// Extra arguments for the runner (e.g. -- --server.port 8502)
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    pub args: Vec<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Activate the virtual environment and run the app
    Run(RunArgs),

    /// Write a launcher.toml with default settings
    Init {
        /// Directory to write launcher.toml into (default: current directory)
        #[arg(long)]
        dir: Option<PathBuf>,

        /// Display name of the application
        #[arg(short, long)]
        name: Option<String>,

        /// Overwrite an existing launcher.toml
        #[arg(long)]
        force: bool,
    },

    /// Check project root, virtual environment and interpreter without launching
    Doctor {
        #[command(flatten)]
        target: TargetArgs,
    },

    /// Show the resolved configuration
    Config {
        #[command(flatten)]
        target: TargetArgs,

        /// Print as JSON instead of TOML
        #[arg(long)]
        json: bool,
    },
}

pub async fn run(cli: Cli) -> crate::core::error::Result<()> {
    let config_path = cli.config;

    match cli.command.unwrap_or_else(|| Commands::Run(RunArgs::default())) {
        Commands::Run(args) => commands::run::execute(config_path, args).await,

        Commands::Init { dir, name, force } => commands::init::execute(dir, name, force).await,

        Commands::Doctor { target } => {
            commands::doctor::execute(config_path, target.into_overrides()).await
        }

        Commands::Config { target, json } => {
            commands::config::execute(config_path, target.into_overrides(), json).await
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_invocation_has_no_subcommand() {
        let cli = Cli::try_parse_from(["datalens-launcher"]).unwrap();
        assert!(cli.command.is_none());
        assert!(cli.config.is_none());
    }

    #[test]
    fn run_collects_trailing_runner_args() {
        let cli = Cli::try_parse_from([
            "datalens-launcher",
            "run",
            "--no-pause",
            "--venv",
            "env",
            "--",
            "--server.port",
            "8502",
        ])
        .unwrap();

        match cli.command {
            Some(Commands::Run(args)) => {
                assert!(args.no_pause);
                assert_eq!(args.target.venv.as_deref(), Some("env"));
                assert_eq!(args.args, vec!["--server.port", "8502"]);
            }
            _ => panic!("expected run"),
        }
    }

    #[test]
    fn global_config_flag_after_subcommand() {
        let cli =
            Cli::try_parse_from(["datalens-launcher", "doctor", "--config", "alt.toml"]).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("alt.toml")));
    }
}
