pub mod error;
pub mod path;
pub mod process;

pub use error::{LauncherError, Result};
pub use path::resolve_path;
pub use process::{exit_code_from_status, find_executable, is_executable};
