pub mod error;
pub mod fs;
pub mod path;
pub mod process;

pub use error::{LauncherError, Result};
pub use fs::ensure_dir_exists;
pub use path::{find_on_path, resolve_path};
pub use process::ProcessExecutor;
