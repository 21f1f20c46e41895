//! Relative path calculation between directories.
//!
//! Pure path arithmetic: nothing here touches the file system, and symlinks
//! are never resolved.

use std::ffi::OsString;
use std::path::{Component, Path, PathBuf};

use crate::error::Result;

/// Compute the relative path from `cwd` to `path`.
///
/// A relative `path` is first resolved against `cwd`, and `cwd` defaults to
/// the process working directory. When the two absolute paths share no
/// top-level component, the absolute destination is returned unchanged
/// rather than producing an up-to-root-and-back traversal.
///
/// # Arguments
/// * `path` - Destination path
/// * `cwd` - Base directory (default: the process working directory)
///
/// # Returns
/// The relative path from `cwd` to `path`, or the absolute destination for
/// the disjoint top-level case. Identical paths yield an empty path.
///
/// # Errors
/// Returns an error only when the process working directory is needed but
/// cannot be determined.
pub fn relpath(path: &Path, cwd: Option<&Path>) -> Result<PathBuf> {
    let cwd = match cwd {
        Some(dir) => absolutize(dir)?,
        None => std::env::current_dir()?,
    };
    let dest = if path.is_absolute() {
        normalize(path)
    } else {
        normalize(&cwd.join(path))
    };

    let curr_parts = normal_components(&cwd);
    let dest_parts = normal_components(&dest);

    // Paths that diverge at the top level stay absolute.
    if curr_parts.first() != dest_parts.first() {
        return Ok(dest);
    }

    let common = curr_parts
        .iter()
        .zip(dest_parts.iter())
        .take_while(|(a, b)| a == b)
        .count();

    let mut rel = PathBuf::new();
    for _ in common..curr_parts.len() {
        rel.push("..");
    }
    for part in &dest_parts[common..] {
        rel.push(part);
    }
    Ok(rel)
}

/// Resolve `path` to an absolute, lexically normalized form without
/// consulting the file system.
pub(crate) fn absolutize(path: &Path) -> Result<PathBuf> {
    let abs = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()?.join(path)
    };
    Ok(normalize(&abs))
}

/// Fold `.` and `..` components lexically.
fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !out.pop() {
                    out.push("..");
                }
            }
            other => out.push(other),
        }
    }
    out
}

fn normal_components(path: &Path) -> Vec<OsString> {
    path.components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_os_string()),
            _ => None,
        })
        .collect()
}
