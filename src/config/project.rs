use crate::config::schema::LauncherConfig;
use crate::config::validate_launcher_config;
use crate::core::error::{LauncherError, Result};
use anyhow::Context;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::debug;

pub const CONFIG_FILE: &str = "launcher.toml";

pub struct LauncherConfigManager {
    project_dir: PathBuf,
    config_path: PathBuf,
    required: bool,
}

impl LauncherConfigManager {
    pub fn new(project_dir: &Path) -> Self {
        Self {
            project_dir: project_dir.to_path_buf(),
            config_path: project_dir.join(CONFIG_FILE),
            required: false,
        }
    }

    /// Uses an explicitly named config file, which then must exist.
    pub fn from_file(config_path: &Path) -> Result<Self> {
        let config_path = std::path::absolute(config_path)?;
        let project_dir = config_path
            .parent()
            .map(Path::to_path_buf)
            .ok_or_else(|| {
                LauncherError::Config(format!(
                    "{} has no parent directory",
                    config_path.display()
                ))
            })?;

        Ok(Self {
            project_dir,
            config_path,
            required: true,
        })
    }

    pub fn from_current_dir() -> Result<Self> {
        let current_dir = std::env::current_dir()?;
        let project_dir = Self::find_project_root(&current_dir).unwrap_or(current_dir);
        Ok(Self::new(&project_dir))
    }

    pub fn project_dir(&self) -> &Path {
        &self.project_dir
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    pub fn exists(&self) -> bool {
        self.config_path.exists()
    }

    pub async fn load(&self) -> Result<LauncherConfig> {
        if !self.exists() {
            if self.required {
                return Err(LauncherError::Config(format!(
                    "Config file {} not found",
                    self.config_path.display()
                )));
            }
            debug!("No {} found, using defaults", CONFIG_FILE);
            return Ok(LauncherConfig::default());
        }

        let content = fs::read_to_string(&self.config_path)
            .await
            .with_context(|| format!("Failed to read {}", self.config_path.display()))?;
        let config: LauncherConfig = toml::from_str(&content)?;
        validate_launcher_config(&config)?;

        debug!("Loaded config from {}", self.config_path.display());
        Ok(config)
    }

    pub fn find_project_root(start_dir: &Path) -> Option<PathBuf> {
        let mut current = start_dir;

        loop {
            let config_path = current.join(CONFIG_FILE);
            if config_path.exists() {
                return Some(current.to_path_buf());
            }

            current = current.parent()?;
        }
    }
}
