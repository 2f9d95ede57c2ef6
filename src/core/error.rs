use thiserror::Error;

/// Exit code for configuration problems and other launcher failures.
pub const EXIT_FAILURE: i32 = 1;
/// Exit code when the virtual environment could not be activated.
pub const EXIT_ACTIVATION_FAILED: i32 = 2;
/// Exit code when the worker was found but could not be started.
pub const EXIT_NOT_EXECUTABLE: i32 = 126;
/// Exit code when the worker command could not be found.
pub const EXIT_NOT_FOUND: i32 = 127;

#[derive(Error, Debug)]
pub enum LauncherError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Environment activation failed: {0}")]
    Activation(String),

    #[error("Worker command '{0}' not found")]
    WorkerNotFound(String),

    #[error("Worker command '{0}' is not executable")]
    WorkerNotExecutable(String),

    #[error("Failed to launch worker: {0}")]
    Launch(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Toml(#[from] toml::de::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl LauncherError {
    /// Process exit code the launcher terminates with for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            LauncherError::Activation(_) => EXIT_ACTIVATION_FAILED,
            LauncherError::WorkerNotFound(_) => EXIT_NOT_FOUND,
            LauncherError::WorkerNotExecutable(_) | LauncherError::Launch(_) => {
                EXIT_NOT_EXECUTABLE
            }
            _ => EXIT_FAILURE,
        }
    }
}

pub type Result<T> = std::result::Result<T, LauncherError>;
