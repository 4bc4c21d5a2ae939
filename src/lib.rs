pub mod cli;
pub mod config;
pub mod console;
pub mod core;
pub mod launcher;
pub mod python;

pub use crate::core::error::{LauncherError, Result};
pub use launcher::Launcher;
