use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::process::ExitStatus;

/// Converts a child's exit status into the code the launcher exits with.
///
/// Normal exits are returned verbatim. On Unix a child killed by a signal maps
/// to `128 + signal`, the way shells report it.
pub fn exit_code_from_status(status: ExitStatus) -> i32 {
    if let Some(code) = status.code() {
        return code;
    }

    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = status.signal() {
            return 128 + signal;
        }
    }

    1
}

/// Looks a bare `command` name up in the directories of a `PATH`-style value.
pub fn find_executable(command: &str, search_path: Option<&OsStr>) -> Option<PathBuf> {
    let search_path = search_path?;
    std::env::split_paths(search_path)
        .filter(|dir| !dir.as_os_str().is_empty())
        .flat_map(|dir| candidate_names(command).map(move |name| dir.join(name)))
        .find(|candidate| candidate.is_file())
}

#[cfg(windows)]
fn candidate_names(command: &str) -> impl Iterator<Item = String> {
    let has_extension = Path::new(command).extension().is_some();
    let mut names = vec![command.to_string()];
    if !has_extension {
        names.insert(0, format!("{}.exe", command));
    }
    names.into_iter()
}

#[cfg(not(windows))]
fn candidate_names(command: &str) -> impl Iterator<Item = String> {
    std::iter::once(command.to_string())
}

#[cfg(unix)]
pub fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    std::fs::metadata(path)
        .map(|meta| meta.is_file() && meta.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
pub fn is_executable(path: &Path) -> bool {
    path.is_file()
}
