use crate::core::error::{LauncherError, Result};
use crate::core::{find_executable, is_executable, resolve_path};
use crate::python::activation::EnvironmentContext;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::process::{ExitStatus, Stdio};
use tokio::process::Command;
use tracing::{debug, warn};

/// Runs programs inside an activated virtual environment.
///
/// The child gets exactly the context's variables; the launcher's own
/// environment is never consulted after activation.
pub struct VenvExecutor<'a> {
    context: &'a EnvironmentContext,
    working_dir: PathBuf,
}

impl<'a> VenvExecutor<'a> {
    pub fn new(context: &'a EnvironmentContext, working_dir: PathBuf) -> Self {
        Self {
            context,
            working_dir,
        }
    }

    /// Locates `command` the way the activated shell would.
    pub fn resolve(&self, command: &str) -> Result<PathBuf> {
        let has_separator = Path::new(command).components().count() > 1;
        let executable = if has_separator {
            let candidate = resolve_path(&self.working_dir, command);
            candidate.is_file().then_some(candidate)
        } else {
            find_executable(command, self.context.search_path())
        };

        let executable =
            executable.ok_or_else(|| LauncherError::WorkerNotFound(command.to_string()))?;

        if !is_executable(&executable) {
            return Err(LauncherError::WorkerNotExecutable(
                executable.display().to_string(),
            ));
        }

        Ok(executable)
    }

    /// Runs `command` to completion with full stdio passthrough.
    pub async fn run_interactive(&self, command: &str, args: &[String]) -> Result<ExitStatus> {
        let executable = self.resolve(command)?;
        debug!("Resolved {} to {}", command, executable.display());

        let mut child = Command::new(&executable)
            .args(args)
            .env_clear()
            .envs(self.context.vars())
            .current_dir(&self.working_dir)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .spawn()
            .map_err(|e| match e.kind() {
                ErrorKind::NotFound => {
                    LauncherError::WorkerNotFound(executable.display().to_string())
                }
                ErrorKind::PermissionDenied => {
                    LauncherError::WorkerNotExecutable(executable.display().to_string())
                }
                _ => LauncherError::Launch(format!("Failed to execute {}: {}", command, e)),
            })?;

        if let Some(pid) = child.id() {
            debug!("Worker started (pid {})", pid);
        }

        let status = child
            .wait()
            .await
            .map_err(|e| LauncherError::Launch(format!("Failed to wait for {}: {}", command, e)))?;

        if status.code().is_none() {
            warn!("Worker terminated abnormally: {}", status);
        } else {
            debug!("Worker exited with {}", status);
        }
        Ok(status)
    }
}
