use crate::config::schema::LauncherConfig;
use crate::core::error::{LauncherError, Result};

pub fn validate_env_var_name(field: &str, name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(LauncherError::Config(format!(
            "{} cannot contain empty variable names",
            field
        )));
    }

    if name.contains('=') || name.contains('\0') {
        return Err(LauncherError::Config(format!(
            "{} contains invalid variable name '{}'",
            field, name
        )));
    }

    Ok(())
}

pub fn validate_launcher_config(config: &LauncherConfig) -> Result<()> {
    if config.environment.path.trim().is_empty() {
        return Err(LauncherError::Config(
            "environment.path cannot be empty".to_string(),
        ));
    }

    if config.worker.command.trim().is_empty() {
        return Err(LauncherError::Config(
            "worker.command cannot be empty".to_string(),
        ));
    }

    if let Some(dir) = config.worker.working_dir.as_deref() {
        if dir.trim().is_empty() {
            return Err(LauncherError::Config(
                "worker.working_dir cannot be empty".to_string(),
            ));
        }
    }

    for (name, value) in &config.worker.environment {
        validate_env_var_name("worker.environment", name)?;
        if value.contains('\0') {
            return Err(LauncherError::Config(format!(
                "worker.environment.{} contains a NUL byte",
                name
            )));
        }
    }

    for name in &config.worker.require_env {
        validate_env_var_name("worker.require_env", name)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        validate_launcher_config(&LauncherConfig::default()).unwrap();
    }

    #[test]
    fn empty_command_is_rejected() {
        let mut config = LauncherConfig::default();
        config.worker.command = "  ".to_string();

        let err = validate_launcher_config(&config).unwrap_err();
        assert!(err.to_string().contains("worker.command"), "{}", err);
    }

    #[test]
    fn empty_venv_path_is_rejected() {
        let mut config = LauncherConfig::default();
        config.environment.path = String::new();

        let err = validate_launcher_config(&config).unwrap_err();
        assert!(err.to_string().contains("environment.path"), "{}", err);
    }

    #[test]
    fn bad_variable_names_are_rejected() {
        let mut config = LauncherConfig::default();
        config
            .worker
            .environment
            .insert("A=B".to_string(), "x".to_string());
        assert!(validate_launcher_config(&config).is_err());

        let mut config = LauncherConfig::default();
        config.worker.require_env.push(String::new());
        assert!(validate_launcher_config(&config).is_err());
    }
}
