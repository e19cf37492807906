//! Path normalisation for home-relative, relative and absolute path specs.
use std::path::{Component, Path, PathBuf};

/// Join `parts` and normalise the result to an absolute, cleaned path.
///
/// A leading `~` is replaced by the invoking user's home directory and a
/// relative result is anchored at the current working directory.  This is
/// advisory normalisation: when the home or working directory cannot be
/// determined the best-effort joined path is returned instead of an error.
///
/// # Examples
///
/// ```
/// use skillkit::paths::resolve;
///
/// let p = resolve(&["/srv/tools/", "skills"]);
/// assert_eq!(p, std::path::PathBuf::from("/srv/tools/skills"));
/// ```
#[must_use]
pub fn resolve<P: AsRef<Path>>(parts: &[P]) -> PathBuf {
    let mut joined = PathBuf::new();
    for part in parts {
        joined.push(part);
    }

    let expanded = expand_home(&joined);
    let absolute = if expanded.is_absolute() {
        expanded
    } else {
        match std::env::current_dir() {
            Ok(cwd) => cwd.join(expanded),
            Err(_) => return clean(&expanded),
        }
    };
    clean(&absolute)
}

/// Replace a leading `~` component with the home directory.
fn expand_home(path: &Path) -> PathBuf {
    let mut components = path.components();
    match components.next() {
        Some(Component::Normal(first)) if first == "~" => dirs::home_dir().map_or_else(
            || path.to_path_buf(),
            |home| home.join(components.as_path()),
        ),
        _ => path.to_path_buf(),
    }
}

/// Lexically remove `.` and `..` components without touching the filesystem.
fn clean(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !out.pop() && !out.has_root() {
                    out.push(component);
                }
            }
            other => out.push(other),
        }
    }
    out
}

/// Compare two paths, normalising the `\\?\` prefix Windows adds to
/// extended-length paths returned by `read_link`.
#[must_use]
pub fn paths_equal(a: &Path, b: &Path) -> bool {
    dunce::simplified(a) == dunce::simplified(b)
}
