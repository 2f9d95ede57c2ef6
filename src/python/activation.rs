use crate::core::error::{LauncherError, Result};
use std::collections::{BTreeMap, HashMap};
use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::debug;

const PYVENV_CFG: &str = "pyvenv.cfg";

/// Values read from a venv's `pyvenv.cfg`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VenvMetadata {
    pub home: Option<String>,
    pub version: Option<String>,
    pub prompt: Option<String>,
}

impl VenvMetadata {
    pub fn parse(content: &str) -> Self {
        let mut metadata = Self::default();

        for line in content.lines() {
            let Some((key, value)) = line.split_once('=') else {
                continue;
            };
            let value = unquote(value.trim());
            if value.is_empty() {
                continue;
            }

            match key.trim().to_ascii_lowercase().as_str() {
                "home" => metadata.home = Some(value.to_string()),
                "version" | "version_info" => metadata.version = Some(value.to_string()),
                "prompt" => metadata.prompt = Some(value.to_string()),
                _ => {}
            }
        }

        metadata
    }
}

fn unquote(value: &str) -> &str {
    for quote in ['\'', '"'] {
        if let Some(inner) = value
            .strip_prefix(quote)
            .and_then(|rest| rest.strip_suffix(quote))
        {
            return inner;
        }
    }
    value
}

/// An activated virtual environment.
///
/// Holds the complete set of variables a child process should see. Nothing
/// here touches the launcher's own process environment.
#[derive(Debug, Clone)]
pub struct EnvironmentContext {
    root: PathBuf,
    bin_dir: PathBuf,
    metadata: VenvMetadata,
    vars: BTreeMap<OsString, OsString>,
}

impl EnvironmentContext {
    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn bin_dir(&self) -> &Path {
        &self.bin_dir
    }

    pub fn metadata(&self) -> &VenvMetadata {
        &self.metadata
    }

    pub fn vars(&self) -> &BTreeMap<OsString, OsString> {
        &self.vars
    }

    pub fn get(&self, key: &str) -> Option<&OsStr> {
        self.vars.get(OsStr::new(key)).map(OsString::as_os_str)
    }

    /// The `PATH` the worker is resolved against.
    pub fn search_path(&self) -> Option<&OsStr> {
        let key = path_key(&self.vars);
        self.vars.get(&key).map(OsString::as_os_str)
    }

    /// Layers extra variables on top of the activated environment.
    pub fn with_overrides(mut self, overrides: &HashMap<String, String>) -> Self {
        for (key, value) in overrides {
            self.vars.insert(key.into(), value.into());
        }
        self
    }

    /// Names from `required` that are missing or empty.
    pub fn missing_vars<'a>(&self, required: &'a [String]) -> Vec<&'a str> {
        required
            .iter()
            .filter(|name| self.get(name).map_or(true, |value| value.is_empty()))
            .map(String::as_str)
            .collect()
    }
}

pub fn script_dir(venv_root: &Path) -> PathBuf {
    if cfg!(windows) {
        venv_root.join("Scripts")
    } else {
        venv_root.join("bin")
    }
}

fn path_key(vars: &BTreeMap<OsString, OsString>) -> OsString {
    if cfg!(windows) {
        if let Some(existing) = vars
            .keys()
            .find(|key| key.to_string_lossy().eq_ignore_ascii_case("PATH"))
        {
            return existing.clone();
        }
    }
    OsString::from("PATH")
}

/// Activates the virtual environment at `path` on top of `base_env`.
///
/// Mirrors the venv `activate` script: sets `VIRTUAL_ENV` and
/// `VIRTUAL_ENV_PROMPT`, prepends the script directory to `PATH` and drops
/// `PYTHONHOME`.
pub async fn activate_environment<I>(path: &Path, base_env: I) -> Result<EnvironmentContext>
where
    I: IntoIterator<Item = (OsString, OsString)>,
{
    debug!("Activating virtual environment at {}", path.display());

    let meta = fs::metadata(path).await.map_err(|e| {
        LauncherError::Activation(format!(
            "Virtual environment {} is not accessible: {}",
            path.display(),
            e
        ))
    })?;
    if !meta.is_dir() {
        return Err(LauncherError::Activation(format!(
            "{} is not a directory",
            path.display()
        )));
    }

    let root = std::path::absolute(path)?;

    let cfg_path = root.join(PYVENV_CFG);
    let content = fs::read_to_string(&cfg_path).await.map_err(|e| {
        LauncherError::Activation(format!(
            "{} is not a virtual environment ({}: {})",
            root.display(),
            PYVENV_CFG,
            e
        ))
    })?;
    let metadata = VenvMetadata::parse(&content);

    let bin_dir = script_dir(&root);
    if !fs::metadata(&bin_dir).await.is_ok_and(|m| m.is_dir()) {
        return Err(LauncherError::Activation(format!(
            "Script directory {} not found in virtual environment",
            bin_dir.display()
        )));
    }

    let mut vars: BTreeMap<OsString, OsString> = base_env.into_iter().collect();

    let key = path_key(&vars);
    let mut search_dirs = vec![bin_dir.clone()];
    if let Some(original) = vars.get(&key) {
        search_dirs.extend(std::env::split_paths(original));
    }
    let new_path = std::env::join_paths(search_dirs).map_err(|e| {
        LauncherError::Activation(format!("Cannot build PATH for {}: {}", root.display(), e))
    })?;

    let prompt = metadata.prompt.clone().unwrap_or_else(|| {
        root.file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "venv".to_string())
    });

    vars.insert(key, new_path);
    vars.insert("VIRTUAL_ENV".into(), root.clone().into_os_string());
    vars.insert("VIRTUAL_ENV_PROMPT".into(), prompt.into());
    vars.remove(OsStr::new("PYTHONHOME"));

    debug!(
        "Activated {} (python {})",
        root.display(),
        metadata.version.as_deref().unwrap_or("unknown")
    );

    Ok(EnvironmentContext {
        root,
        bin_dir,
        metadata,
        vars,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fake_venv(dir: &Path) -> PathBuf {
        let root = dir.join("venv");
        std::fs::create_dir_all(script_dir(&root)).unwrap();
        std::fs::write(
            root.join(PYVENV_CFG),
            "home = /usr/bin\ninclude-system-site-packages = false\nversion = 3.11.9\nprompt = 'telebot'\n",
        )
        .unwrap();
        root
    }

    fn base_env() -> Vec<(OsString, OsString)> {
        vec![
            ("PATH".into(), "/usr/local/bin".into()),
            ("PYTHONHOME".into(), "/opt/python".into()),
            ("BOT_TOKEN".into(), "secret".into()),
        ]
    }

    #[test]
    fn parses_pyvenv_cfg() {
        let meta = VenvMetadata::parse(
            "home = /usr/bin\nversion_info = 3.12.1\nprompt = \"bot\"\nbroken line\n",
        );

        assert_eq!(meta.home.as_deref(), Some("/usr/bin"));
        assert_eq!(meta.version.as_deref(), Some("3.12.1"));
        assert_eq!(meta.prompt.as_deref(), Some("bot"));
    }

    #[tokio::test]
    async fn activation_rebinds_search_path() {
        let dir = tempfile::tempdir().unwrap();
        let root = fake_venv(dir.path());

        let ctx = activate_environment(&root, base_env()).await.unwrap();

        let path: Vec<PathBuf> = std::env::split_paths(ctx.search_path().unwrap()).collect();
        assert_eq!(path[0], script_dir(&root));
        assert_eq!(path[1], PathBuf::from("/usr/local/bin"));
        assert_eq!(ctx.get("VIRTUAL_ENV"), Some(root.as_os_str()));
        assert_eq!(ctx.get("VIRTUAL_ENV_PROMPT"), Some(OsStr::new("telebot")));
        assert_eq!(ctx.get("PYTHONHOME"), None);
        assert_eq!(ctx.get("BOT_TOKEN"), Some(OsStr::new("secret")));
        assert_eq!(ctx.metadata().version.as_deref(), Some("3.11.9"));
    }

    #[tokio::test]
    async fn activation_without_base_path_still_sets_path() {
        let dir = tempfile::tempdir().unwrap();
        let root = fake_venv(dir.path());

        let ctx = activate_environment(&root, Vec::<(OsString, OsString)>::new()).await.unwrap();

        let path: Vec<PathBuf> = std::env::split_paths(ctx.search_path().unwrap()).collect();
        assert_eq!(path, vec![script_dir(&root)]);
    }

    #[tokio::test]
    async fn missing_directory_fails() {
        let dir = tempfile::tempdir().unwrap();

        let err = activate_environment(&dir.path().join("nope"), base_env())
            .await
            .unwrap_err();
        assert!(matches!(err, LauncherError::Activation(_)), "{:?}", err);
    }

    #[tokio::test]
    async fn directory_without_pyvenv_cfg_fails() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(script_dir(dir.path())).unwrap();

        let err = activate_environment(dir.path(), base_env()).await.unwrap_err();
        assert!(err.to_string().contains(PYVENV_CFG), "{}", err);
    }

    #[tokio::test]
    async fn missing_script_dir_fails() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(PYVENV_CFG), "home = /usr/bin\n").unwrap();

        let err = activate_environment(dir.path(), base_env()).await.unwrap_err();
        assert!(matches!(err, LauncherError::Activation(_)), "{:?}", err);
    }

    #[tokio::test]
    async fn file_instead_of_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("venv");
        std::fs::write(&file, "").unwrap();

        let err = activate_environment(&file, base_env()).await.unwrap_err();
        assert!(matches!(err, LauncherError::Activation(_)), "{:?}", err);
    }

    #[tokio::test]
    async fn overrides_and_required_vars() {
        let dir = tempfile::tempdir().unwrap();
        let root = fake_venv(dir.path());

        let mut extra = HashMap::new();
        extra.insert("LOG_LEVEL".to_string(), "debug".to_string());
        extra.insert("EMPTY".to_string(), String::new());
        let ctx = activate_environment(&root, base_env())
            .await
            .unwrap()
            .with_overrides(&extra);

        assert_eq!(ctx.get("LOG_LEVEL"), Some(OsStr::new("debug")));

        let required = vec![
            "BOT_TOKEN".to_string(),
            "EMPTY".to_string(),
            "DATABASE_URL".to_string(),
        ];
        assert_eq!(ctx.missing_vars(&required), vec!["EMPTY", "DATABASE_URL"]);
    }
}
