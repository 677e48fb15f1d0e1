//! Path normalization and elision of paths outside the project.
//!
//! Tracebacks often run through the standard library or installed
//! dependencies. When elision is enabled, frames from files outside the
//! base directory are shortened to `.../<file name>` with the line number
//! replaced by `...`, keeping the project's own frames readable.

use std::env;
use std::fs;
use std::path::{Component, Path, PathBuf};

/// Marker that replaces an elided directory and line number.
pub const ELLIPSIS: &str = "...";

/// Default separator for relative locations, independent of the platform.
pub const DEFAULT_SEPARATOR: &str = "/";

/// Absolute, symlink-resolved, case-normalized form of a path.
///
/// Paths that don't exist are still normalized: the existing leading part
/// is resolved and the remainder appended as written.
pub fn normalize(path: impl AsRef<Path>) -> PathBuf {
    let path = path.as_ref();
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        match env::current_dir() {
            Ok(cwd) => cwd.join(path),
            Err(_) => path.to_path_buf(),
        }
    };
    normcase(resolve(&absolute))
}

/// Walk the path one component at a time, resolving symlinks before the
/// `..` that follows them is applied.
///
/// Once a component is missing the rest is normalized lexically.
fn resolve(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    let mut on_disk = true;
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if matches!(out.components().next_back(), Some(Component::Normal(_))) {
                    out.pop();
                }
            }
            Component::Normal(name) => {
                let next = out.join(name);
                out = match on_disk.then(|| fs::canonicalize(&next)) {
                    Some(Ok(real)) => real,
                    _ => {
                        on_disk = false;
                        next
                    }
                };
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}

#[cfg(windows)]
fn normcase(path: PathBuf) -> PathBuf {
    PathBuf::from(path.to_string_lossy().to_lowercase().replace('/', "\\"))
}

#[cfg(not(windows))]
fn normcase(path: PathBuf) -> PathBuf {
    path
}

fn segments(path: &Path) -> Vec<String> {
    path.components()
        .map(|component| match component {
            Component::RootDir => String::new(),
            other => other.as_os_str().to_string_lossy().into_owned(),
        })
        .collect()
}

/// Location of `target` relative to `base`, joined with `/`.
///
/// ```
/// use tintrace::paths::relative_location;
///
/// assert_eq!(relative_location("/z", "/a/b"), "../a/b");
/// ```
pub fn relative_location(base: impl AsRef<Path>, target: impl AsRef<Path>) -> String {
    relative_location_with(base, target, DEFAULT_SEPARATOR)
}

/// Like [`relative_location`] with a caller-chosen separator.
///
/// Returns `.` when both paths normalize to the same location.
pub fn relative_location_with(
    base: impl AsRef<Path>,
    target: impl AsRef<Path>,
    separator: &str,
) -> String {
    let base = segments(&normalize(base));
    let target = segments(&normalize(target));

    let common = base
        .iter()
        .zip(target.iter())
        .take_while(|(b, t)| b == t)
        .count();

    let parts: Vec<&str> = std::iter::repeat("..")
        .take(base.len() - common)
        .chain(target[common..].iter().map(String::as_str))
        .collect();

    if parts.is_empty() {
        ".".to_string()
    } else {
        parts.join(separator)
    }
}

/// Shorten a frame's path and line number if the path is outside `base`.
///
/// Inside the base directory the relative path and the original line number
/// are returned.
pub fn elide_foreign(base: impl AsRef<Path>, path: &str, line: &str) -> (String, String) {
    PathElider::new(base).elide(path, line)
}

/// Elides frame paths that fall outside a base directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathElider {
    base_dir: PathBuf,
    separator: String,
}

impl PathElider {
    pub fn new(base_dir: impl AsRef<Path>) -> Self {
        Self {
            base_dir: normalize(base_dir),
            separator: DEFAULT_SEPARATOR.to_string(),
        }
    }

    /// Use a different separator when joining relative locations.
    pub fn with_separator(mut self, separator: impl Into<String>) -> Self {
        self.separator = separator.into();
        self
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    pub fn relative_location(&self, target: impl AsRef<Path>) -> String {
        relative_location_with(&self.base_dir, target, &self.separator)
    }

    /// Display path and line number for a frame.
    pub fn elide(&self, path: &str, line: &str) -> (String, String) {
        let relative = self.relative_location(path);
        let separator = self.separator.as_str();
        if relative.split(separator).any(|part| part == "..") {
            let file_name = relative.rsplit(separator).next().unwrap_or_default();
            tracing::trace!(path, "eliding foreign path");
            (
                format!("{}{}{}", ELLIPSIS, self.separator, file_name),
                ELLIPSIS.to_string(),
            )
        } else {
            (relative, line.to_string())
        }
    }
}
