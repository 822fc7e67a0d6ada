pub mod host;
pub mod listeners;
pub mod panel;
pub mod registry;
pub mod standalone;

use std::path::Component;

/// Normalize a path by resolving `.` and `..` components without requiring the path to exist.
/// Used to compare document paths reported by the host with the bound file.
pub(crate) fn normalize_path(path: &std::path::Path) -> std::path::PathBuf {
    let mut components = Vec::new();

    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                // Keep ".." if we can't go up further (for relative paths)
                if let Some(Component::Normal(_)) = components.last() {
                    components.pop();
                } else {
                    components.push(component);
                }
            }
            _ => components.push(component),
        }
    }

    if components.is_empty() {
        std::path::PathBuf::from(".")
    } else {
        components.iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::{Path, PathBuf};

    #[test]
    fn test_normalize_path() {
        assert_eq!(
            normalize_path(Path::new("/proj/src/../src/./main.py")),
            PathBuf::from("/proj/src/main.py")
        );
        assert_eq!(normalize_path(Path::new("../a.py")), PathBuf::from("../a.py"));
        assert_eq!(normalize_path(Path::new("./")), PathBuf::from("."));
    }
}
