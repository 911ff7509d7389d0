//! Lexical path helpers.
//!
//! Nothing here touches the filesystem beyond reading the working directory
//! once when a relative root has to be anchored.

use crate::error::{CoreError, CoreResult};
use std::path::{Component, Path, PathBuf};

/// Removes `.` and resolves `..` components without consulting the filesystem.
pub fn normalize_lexically(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match out.components().next_back() {
                Some(Component::Normal(_)) => {
                    out.pop();
                }
                // `/..` is `/`
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => out.push(".."),
            },
            other => out.push(other.as_os_str()),
        }
    }
    out
}

/// Anchors a relative path at the current working directory and normalizes it.
pub fn absolutize(path: &Path) -> CoreResult<PathBuf> {
    if path.is_absolute() {
        return Ok(normalize_lexically(path));
    }
    let cwd = std::env::current_dir().map_err(|e| CoreError::io(".", e))?;
    Ok(normalize_lexically(&cwd.join(path)))
}

/// Anchors a relative path at `base` (which is expected to be absolute already).
pub fn resolve_against(base: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        normalize_lexically(path)
    } else {
        normalize_lexically(&base.join(path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_drops_dot_and_parent() {
        assert_eq!(
            normalize_lexically(Path::new("/src/tests/../../Artifacts/./debug")),
            PathBuf::from("/Artifacts/debug")
        );
        assert_eq!(normalize_lexically(Path::new("/..")), PathBuf::from("/"));
        assert_eq!(normalize_lexically(Path::new("../a/../b")), PathBuf::from("../b"));
    }

    #[test]
    fn test_resolve_against_keeps_absolute_paths() {
        assert_eq!(
            resolve_against(Path::new("/repo/tests"), Path::new("/elsewhere/x")),
            PathBuf::from("/elsewhere/x")
        );
        assert_eq!(
            resolve_against(Path::new("/repo/tests"), Path::new("../Artifacts")),
            PathBuf::from("/repo/Artifacts")
        );
    }

    #[test]
    fn test_absolutize_is_absolute() {
        let path = absolutize(Path::new("some/relative/dir")).unwrap();
        assert!(path.is_absolute());
        assert!(path.ends_with("some/relative/dir"));
    }
}
