pub mod executor;
pub mod venv;

pub use executor::{run_foreground, AppCommand, AppExit};
pub use venv::{ActivatedEnv, VirtualEnv};
