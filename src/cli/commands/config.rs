use crate::config::{resolve_config, ConfigOverrides};
use crate::core::error::Result;
use colored::Colorize;
use std::env;
use std::path::PathBuf;

pub async fn execute(
    config_path: Option<PathBuf>,
    overrides: ConfigOverrides,
    json: bool,
) -> Result<()> {
    let current_dir = env::current_dir()?;
    let resolved = resolve_config(config_path.as_deref(), &current_dir, &overrides).await?;

    if json {
        let value = serde_json::json!({
            "source": resolved.source.to_string(),
            "project_root": resolved.project_root(),
            "config": resolved.config,
        });
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }

    println!("{} {}", "# Source:".dimmed(), resolved.source);
    println!(
        "{} {}",
        "# Project root:".dimmed(),
        resolved.project_root().display()
    );
    print!("{}", toml::to_string_pretty(&resolved.config)?);

    Ok(())
}
