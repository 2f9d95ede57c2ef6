pub mod project;
pub mod schema;
pub mod validation;

use crate::core::error::Result;
use crate::core::resolve_path;
use std::path::{Path, PathBuf};

pub use project::{LauncherConfigManager, CONFIG_FILE};
pub use schema::{EnvironmentConfig, LauncherConfig, WorkerConfig};
pub use validation::{validate_env_var_name, validate_launcher_config};

/// Command-line values that take precedence over `launcher.toml`.
#[derive(Debug, Clone, Default)]
pub struct LaunchOverrides {
    pub venv: Option<PathBuf>,
    pub working_dir: Option<PathBuf>,
    /// Worker command followed by its arguments.
    pub worker: Vec<String>,
}

/// Everything the launcher needs, with paths made concrete.
#[derive(Debug, Clone)]
pub struct LaunchPlan {
    pub venv_path: PathBuf,
    pub working_dir: PathBuf,
    pub command: String,
    pub args: Vec<String>,
    pub config: LauncherConfig,
}

impl LaunchPlan {
    pub fn build(
        mut config: LauncherConfig,
        project_dir: &Path,
        overrides: LaunchOverrides,
    ) -> Result<Self> {
        if let Some((command, args)) = overrides.worker.split_first() {
            config.worker.command = command.clone();
            config.worker.args = args.to_vec();
        }
        validate_launcher_config(&config)?;

        let venv_path = match overrides.venv {
            Some(path) => path,
            None => resolve_path(project_dir, &config.environment.path),
        };

        // The child chdirs before exec, so relative commands need an anchored cwd.
        let working_dir = match (overrides.working_dir, config.worker.working_dir.as_deref()) {
            (Some(dir), _) => std::path::absolute(dir)?,
            (None, Some(dir)) => std::path::absolute(resolve_path(project_dir, dir))?,
            (None, None) => std::path::absolute(project_dir)?,
        };

        Ok(Self {
            venv_path,
            working_dir,
            command: config.worker.command.clone(),
            args: config.worker.args.clone(),
            config,
        })
    }

    /// The worker invocation as a single display string.
    pub fn command_line(&self) -> String {
        std::iter::once(self.command.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }
}
