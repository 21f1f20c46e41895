//! Scoped working-directory changes.

use std::env;
use std::path::{Path, PathBuf};

use crate::error::Result;

/// Guard that restores the process working directory when dropped.
///
/// The previous working directory is restored on every exit path,
/// including unwinding from a panic inside the scope.
#[derive(Debug)]
pub struct CurrentDirGuard {
    original: PathBuf,
}

impl CurrentDirGuard {
    /// Record the current working directory and switch to `dir`.
    ///
    /// With `None` the working directory is left unchanged but still
    /// restored on drop, which keeps the scope safe against directory
    /// changes made inside it.
    ///
    /// # Errors
    /// Returns an error if the working directory cannot be read or the
    /// switch fails; the working directory is untouched in that case.
    pub fn change(dir: Option<&Path>) -> Result<Self> {
        let original = env::current_dir()?;
        if let Some(dir) = dir {
            env::set_current_dir(dir)?;
            log::debug!("changed working directory to {}", dir.display());
        }
        Ok(Self { original })
    }

    /// The directory that will be restored on drop.
    #[must_use]
    pub fn original(&self) -> &Path {
        &self.original
    }
}

impl Drop for CurrentDirGuard {
    fn drop(&mut self) {
        if let Err(e) = env::set_current_dir(&self.original) {
            log::warn!(
                "failed to restore working directory {}: {e}",
                self.original.display()
            );
        }
    }
}

/// Run `f` with the working directory temporarily switched to `dir`.
///
/// # Arguments
/// * `dir` - Directory to switch into, or `None` to keep the current one
/// * `f` - Closure executed inside the scope
///
/// # Errors
/// Returns an error if switching into `dir` fails; `f` is not run then.
pub fn with_chdir<T, F>(dir: Option<&Path>, f: F) -> Result<T>
where
    F: FnOnce() -> T,
{
    let _guard = CurrentDirGuard::change(dir)?;
    Ok(f())
}
