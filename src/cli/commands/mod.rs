pub mod check;
pub mod run;

use crate::cli::LaunchOptions;
use crate::config::{LaunchPlan, LauncherConfigManager};
use crate::core::error::Result;

/// Loads `launcher.toml` and merges the command-line overrides into it.
pub async fn load_plan(options: &LaunchOptions, worker: Vec<String>) -> Result<LaunchPlan> {
    let manager = match options.config.as_deref() {
        Some(path) => LauncherConfigManager::from_file(path)?,
        None => LauncherConfigManager::from_current_dir()?,
    };

    let config = manager.load().await?;
    LaunchPlan::build(config, manager.project_dir(), options.overrides(worker))
}
