use crate::core::error::{LauncherError, Result};
use colored::Colorize;
use crossterm::event::{self, Event, KeyEventKind};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use std::future::Future;
use std::io::{IsTerminal, Write};

pub const STOP_HINT: &str = "To stop the app, press CTRL + C in this window.";
pub const PAUSE_PROMPT: &str = "Press any key to continue . . .";

/// Terminal I/O used by the launcher.
pub trait Console {
    fn status(&mut self, message: &str);

    fn error(&mut self, message: &str);

    /// Resolve once a single key has been pressed.
    fn wait_for_key(&mut self, prompt: &str) -> impl Future<Output = Result<()>> + Send;
}

#[derive(Debug, Default)]
pub struct TerminalConsole;

impl TerminalConsole {
    pub fn new() -> Self {
        Self
    }
}

impl Console for TerminalConsole {
    fn status(&mut self, message: &str) {
        println!("{}", message);
    }

    fn error(&mut self, message: &str) {
        eprintln!("{} {}", "Error:".red().bold(), message);
    }

    async fn wait_for_key(&mut self, prompt: &str) -> Result<()> {
        print!("{} ", prompt.dimmed());
        std::io::stdout().flush()?;

        if !std::io::stdin().is_terminal() {
            println!();
            tracing::debug!("stdin is not a terminal; skipping key wait");
            return Ok(());
        }

        tokio::task::spawn_blocking(read_key)
            .await
            .map_err(|e| LauncherError::Console(format!("key wait aborted: {}", e)))??;

        println!();
        Ok(())
    }
}

fn read_key() -> Result<()> {
    let _raw = RawModeGuard::enable()?;
    loop {
        let event = event::read().map_err(|e| LauncherError::Console(e.to_string()))?;
        if let Event::Key(key) = event {
            if key.kind == KeyEventKind::Press {
                return Ok(());
            }
        }
    }
}

struct RawModeGuard;

impl RawModeGuard {
    fn enable() -> Result<Self> {
        enable_raw_mode().map_err(|e| LauncherError::Console(format!("raw mode: {}", e)))?;
        Ok(Self)
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        disable_raw_mode().ok();
    }
}
