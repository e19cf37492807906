//! Safety-checked symlink primitives.
//!
//! Every function takes an already-resolved absolute path.  The only
//! mutation performed at a target is creating, replacing or removing a
//! symbolic link; a real file or directory occupying the target is reported
//! and left untouched.
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::LinkError;

/// Observed filesystem state at a link target.
///
/// # Examples
///
/// ```
/// use skillkit::links::LinkState;
/// use std::path::PathBuf;
///
/// let linked = LinkState::Symlink(PathBuf::from("/repo/skill/foo"));
/// assert!(linked.is_symlink());
/// assert!(!LinkState::Absent.is_symlink());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkState {
    /// Nothing exists at the path.
    Absent,
    /// A symbolic link whose destination is the contained path (empty when
    /// the link could not be read).
    Symlink(PathBuf),
    /// A real file or directory occupies the path.
    Blocked,
}

impl LinkState {
    /// Whether a symbolic link (healthy or not) occupies the path.
    #[must_use]
    pub const fn is_symlink(&self) -> bool {
        matches!(self, Self::Symlink(_))
    }
}

/// Observe the current state of `path` without following a final symlink.
#[must_use]
pub fn query(path: &Path) -> LinkState {
    match fs::symlink_metadata(path) {
        Err(_) => LinkState::Absent,
        Ok(meta) if meta.file_type().is_symlink() => {
            LinkState::Symlink(fs::read_link(path).unwrap_or_default())
        }
        Ok(_) => LinkState::Blocked,
    }
}

/// Create (or idempotently replace) the symlink `target → source`.
///
/// Safety checks always run before any mutation of `target`: the source
/// must exist, and a real directory or file at `target` aborts the call.
/// An existing symlink at `target` is removed regardless of where it points.
///
/// # Errors
///
/// Returns [`LinkError::SourceMissing`], [`LinkError::BlockedByDirectory`],
/// [`LinkError::BlockedByFile`], or [`LinkError::Io`] when a filesystem call
/// fails.
pub fn create(source: &Path, target: &Path) -> Result<(), LinkError> {
    if !source.exists() {
        return Err(LinkError::SourceMissing(source.to_path_buf()));
    }

    ensure_parent_dir(target)?;

    if let Ok(meta) = fs::symlink_metadata(target) {
        if meta.file_type().is_symlink() {
            remove_symlink(target, &meta)?;
        } else if meta.is_dir() {
            return Err(LinkError::BlockedByDirectory(target.to_path_buf()));
        } else {
            return Err(LinkError::BlockedByFile(target.to_path_buf()));
        }
    }

    create_symlink(source, target)
}

/// Remove the symlink at `target`.
///
/// A missing target is a successful no-op.
///
/// # Errors
///
/// Returns [`LinkError::NotASymlink`] when a real file or directory occupies
/// `target`, or [`LinkError::Io`] when the removal itself fails.
pub fn remove(target: &Path) -> Result<(), LinkError> {
    let meta = match fs::symlink_metadata(target) {
        Ok(meta) => meta,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(()),
        Err(e) => return Err(LinkError::io("inspect", target, e)),
    };

    if !meta.file_type().is_symlink() {
        return Err(LinkError::NotASymlink(target.to_path_buf()));
    }
    remove_symlink(target, &meta)
}

/// Ensure the parent directory of `path` exists.
fn ensure_parent_dir(path: &Path) -> Result<(), LinkError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| LinkError::io("create parent", parent, e))?;
    }
    Ok(())
}

/// Create a symlink at `link` pointing to `target`.
fn create_symlink(target: &Path, link: &Path) -> Result<(), LinkError> {
    #[cfg(unix)]
    let result = std::os::unix::fs::symlink(target, link);

    #[cfg(windows)]
    let result = if target.is_dir() {
        std::os::windows::fs::symlink_dir(target, link)
    } else {
        std::os::windows::fs::symlink_file(target, link)
    };

    result.map_err(|e| LinkError::io("create symlink", link, e))
}

/// Remove a symlink, handling platform differences.
///
/// On Windows, directory symlinks must be removed with `remove_dir`; the raw
/// `FILE_ATTRIBUTE_DIRECTORY` flag tells them apart from file symlinks.
fn remove_symlink(path: &Path, meta: &fs::Metadata) -> Result<(), LinkError> {
    let result = if is_dir_like(meta) {
        fs::remove_dir(path)
    } else {
        fs::remove_file(path)
    };
    result.map_err(|e| LinkError::io("remove symlink", path, e))
}

fn is_dir_like(meta: &fs::Metadata) -> bool {
    #[cfg(windows)]
    {
        use std::os::windows::fs::MetadataExt;
        meta.file_attributes() & 0x10 != 0 // FILE_ATTRIBUTE_DIRECTORY
    }
    #[cfg(not(windows))]
    {
        meta.is_dir()
    }
}
