//! Bootstrap sequence: activate the virtual environment, then hand off to the
//! worker.
//!
//! The two phases run strictly in order. A failed activation ends the run
//! before any child process exists; once the worker starts, its exit status
//! is returned unchanged.

use crate::config::LaunchPlan;
use crate::core::error::{LauncherError, Result};
use crate::python::{activate_environment, EnvironmentContext, VenvExecutor};
use colored::Colorize;
use std::ffi::OsString;
use std::path::PathBuf;
use std::process::ExitStatus;
use tracing::debug;

pub struct Bootstrap {
    plan: LaunchPlan,
}

impl Bootstrap {
    pub fn new(plan: LaunchPlan) -> Self {
        Self { plan }
    }

    pub fn plan(&self) -> &LaunchPlan {
        &self.plan
    }

    /// Activates the environment and applies the worker's extra variables.
    ///
    /// Fails if any `worker.require_env` variable ends up missing.
    pub async fn prepare<I>(&self, base_env: I) -> Result<EnvironmentContext>
    where
        I: IntoIterator<Item = (OsString, OsString)>,
    {
        let context = activate_environment(&self.plan.venv_path, base_env)
            .await?
            .with_overrides(&self.plan.config.worker.environment);

        let missing = context.missing_vars(&self.plan.config.worker.require_env);
        if !missing.is_empty() {
            return Err(LauncherError::Config(format!(
                "Required environment variable(s) not set: {}",
                missing.join(", ")
            )));
        }

        Ok(context)
    }

    /// Resolves the worker executable without starting it.
    pub fn resolve_worker(&self, context: &EnvironmentContext) -> Result<PathBuf> {
        self.executor(context).resolve(&self.plan.command)
    }

    /// Runs both phases and returns the worker's exit status.
    pub async fn run<I>(&self, base_env: I) -> Result<ExitStatus>
    where
        I: IntoIterator<Item = (OsString, OsString)>,
    {
        println!(
            "{} Activating virtual environment at {}",
            "→".blue().bold(),
            self.plan.venv_path.display().to_string().yellow()
        );
        let context = self.prepare(base_env).await?;
        debug!("Environment ready: {}", context.root().display());

        println!(
            "{} Starting bot: {}",
            "→".blue().bold(),
            self.plan.command_line().cyan()
        );
        let status = self
            .executor(&context)
            .run_interactive(&self.plan.command, &self.plan.args)
            .await?;

        debug!("Bot finished with {}", status);
        Ok(status)
    }

    fn executor<'a>(&self, context: &'a EnvironmentContext) -> VenvExecutor<'a> {
        VenvExecutor::new(context, self.plan.working_dir.clone())
    }
}
