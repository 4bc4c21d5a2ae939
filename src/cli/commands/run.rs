use crate::cli::RunArgs;
use crate::config::resolve_config;
use crate::console::TerminalConsole;
use crate::core::error::Result;
use crate::launcher::Launcher;
use std::env;
use std::path::PathBuf;

pub async fn execute(config_path: Option<PathBuf>, args: RunArgs) -> Result<()> {
    let mut overrides = args.target.into_overrides();
    overrides.extra_args = args.args;
    overrides.no_pause = args.no_pause;

    let current_dir = env::current_dir()?;
    let resolved = resolve_config(config_path.as_deref(), &current_dir, &overrides).await?;
    tracing::debug!("Using config from {}", resolved.source);

    let launcher = Launcher::new(&resolved);
    let mut console = TerminalConsole::new();

    let code = launcher
        .run_to_exit_code(&mut console, args.propagate_exit_code)
        .await?;
    if code != 0 {
        std::process::exit(code);
    }
    Ok(())
}
