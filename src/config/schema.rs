use serde::{Deserialize, Serialize};
use std::collections::HashMap;

pub const DEFAULT_VENV_PATH: &str = "venv";
pub const DEFAULT_WORKER_COMMAND: &str = "python";
pub const DEFAULT_WORKER_ENTRY: &str = "main.py";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct LauncherConfig {
    #[serde(default)]
    pub environment: EnvironmentConfig,
    #[serde(default)]
    pub worker: WorkerConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct EnvironmentConfig {
    #[serde(default = "default_venv_path")]
    pub path: String,
}

impl Default for EnvironmentConfig {
    fn default() -> Self {
        Self {
            path: default_venv_path(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct WorkerConfig {
    #[serde(default = "default_worker_command")]
    pub command: String,
    #[serde(default = "default_worker_args")]
    pub args: Vec<String>,
    #[serde(default)]
    pub working_dir: Option<String>,
    #[serde(default)]
    pub environment: HashMap<String, String>,
    #[serde(default)]
    pub require_env: Vec<String>,
}

impl Default for WorkerConfig {
    fn default() -> Self {
        Self {
            command: default_worker_command(),
            args: default_worker_args(),
            working_dir: None,
            environment: HashMap::new(),
            require_env: Vec::new(),
        }
    }
}

fn default_venv_path() -> String {
    DEFAULT_VENV_PATH.to_string()
}

fn default_worker_command() -> String {
    DEFAULT_WORKER_COMMAND.to_string()
}

fn default_worker_args() -> Vec<String> {
    vec![DEFAULT_WORKER_ENTRY.to_string()]
}
