//! Interpreter resolution
//!
//! The disassembler needs a Python interpreter. It comes either from the
//! config (an executable or an installation root) or from `PATH`.

use crate::config::PythonConfig;
use std::path::{Path, PathBuf};

#[cfg(windows)]
const PATH_CANDIDATES: &[&str] = &["python.exe", "python3.exe"];
#[cfg(not(windows))]
const PATH_CANDIDATES: &[&str] = &["python3", "python"];

/// Executables looked for inside an installation root, in order
const ROOT_CANDIDATES: &[&str] = &[
    "bin/python3",
    "bin/python",
    "python.exe",
    "Scripts/python.exe",
];

/// Resolve the toolchain location for a project.
///
/// A configured interpreter is returned as-is, even if it does not exist;
/// a broken configured path is reported by the disassembler as a
/// compilation error rather than silently replaced by whatever is on `PATH`.
pub fn resolve(config: &PythonConfig) -> Option<PathBuf> {
    if let Some(configured) = &config.interpreter {
        return Some(configured.clone());
    }
    let found = std::env::var_os("PATH").and_then(|path| find_in_path(&path));
    if found.is_none() {
        tracing::debug!("No Python interpreter found on PATH");
    }
    found
}

/// Search a `PATH`-style list of directories for a Python interpreter
pub fn find_in_path(path: &std::ffi::OsStr) -> Option<PathBuf> {
    for dir in std::env::split_paths(path) {
        for name in PATH_CANDIDATES {
            let candidate = dir.join(name);
            if candidate.is_file() {
                return Some(candidate);
            }
        }
    }
    None
}

/// Turn a toolchain location into the executable to launch.
///
/// Files are used directly. Directories are treated as an installation root
/// and searched for a known interpreter layout. Anything else is malformed.
pub fn interpreter_executable(toolchain: &Path) -> Option<PathBuf> {
    if toolchain.is_file() {
        return Some(toolchain.to_path_buf());
    }
    if toolchain.is_dir() {
        return ROOT_CANDIDATES
            .iter()
            .map(|candidate| toolchain.join(candidate))
            .find(|candidate| candidate.is_file());
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_configured_interpreter_wins() {
        let config = PythonConfig {
            interpreter: Some(PathBuf::from("/does/not/exist/python")),
            ..PythonConfig::default()
        };
        assert_eq!(
            resolve(&config),
            Some(PathBuf::from("/does/not/exist/python"))
        );
    }

    #[test]
    fn test_find_in_path() {
        let empty = TempDir::new().unwrap();
        let with_python = TempDir::new().unwrap();
        let exe = with_python.path().join(PATH_CANDIDATES[0]);
        std::fs::write(&exe, "").unwrap();

        let path = std::env::join_paths([empty.path(), with_python.path()]).unwrap();
        assert_eq!(find_in_path(&path), Some(exe));

        let path = std::env::join_paths([empty.path()]).unwrap();
        assert_eq!(find_in_path(&path), None);
    }

    #[test]
    fn test_interpreter_executable() {
        let root = TempDir::new().unwrap();
        // Empty installation root: malformed
        assert_eq!(interpreter_executable(root.path()), None);

        std::fs::create_dir_all(root.path().join("bin")).unwrap();
        let exe = root.path().join("bin/python");
        std::fs::write(&exe, "").unwrap();
        assert_eq!(interpreter_executable(root.path()), Some(exe.clone()));
        assert_eq!(interpreter_executable(&exe), Some(exe));

        assert_eq!(interpreter_executable(&root.path().join("missing")), None);
    }
}
