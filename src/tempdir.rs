//! Self-cleaning temporary directories.

use std::path::Path;

use crate::error::Result;

/// Handle to a unique temporary directory.
///
/// The directory exists from creation until the handle is released, either
/// explicitly through [`TempDir::close`] or when the handle goes out of
/// scope. Cleanup on drop is best-effort; `close` reports removal failures.
#[derive(Debug)]
pub struct TempDir {
    inner: tempfile::TempDir,
}

impl TempDir {
    /// Create a unique directory under the system temporary directory.
    pub fn new() -> Result<Self> {
        Ok(Self {
            inner: tempfile::TempDir::new()?,
        })
    }

    /// Start building a temporary directory with custom placement or affixes.
    #[must_use]
    pub fn builder<'a>() -> TempDirBuilder<'a> {
        TempDirBuilder::default()
    }

    /// Path of the directory.
    #[must_use]
    pub fn path(&self) -> &Path {
        self.inner.path()
    }

    /// Remove the directory tree now, reporting any failure.
    pub fn close(self) -> Result<()> {
        Ok(self.inner.close()?)
    }
}

/// Builder for [`TempDir`] with a caller-specified parent directory and
/// name affixes.
#[derive(Debug, Default)]
pub struct TempDirBuilder<'a> {
    parent: Option<&'a Path>,
    prefix: Option<&'a str>,
    suffix: Option<&'a str>,
}

impl<'a> TempDirBuilder<'a> {
    /// Create the directory under `parent` instead of the system temp dir.
    #[must_use]
    pub fn parent(mut self, parent: &'a Path) -> Self {
        self.parent = Some(parent);
        self
    }

    /// Prefix for the generated directory name.
    #[must_use]
    pub fn prefix(mut self, prefix: &'a str) -> Self {
        self.prefix = Some(prefix);
        self
    }

    /// Suffix for the generated directory name.
    #[must_use]
    pub fn suffix(mut self, suffix: &'a str) -> Self {
        self.suffix = Some(suffix);
        self
    }

    /// Create the directory.
    pub fn create(&self) -> Result<TempDir> {
        let mut builder = tempfile::Builder::new();
        if let Some(prefix) = self.prefix {
            builder.prefix(prefix);
        }
        if let Some(suffix) = self.suffix {
            builder.suffix(suffix);
        }
        let inner = match self.parent {
            Some(parent) => builder.tempdir_in(parent)?,
            None => builder.tempdir()?,
        };
        log::debug!("created temporary directory {}", inner.path().display());
        Ok(TempDir { inner })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exists_until_closed() -> anyhow::Result<()> {
        let tmp = TempDir::new()?;
        let path = tmp.path().to_path_buf();
        assert!(path.is_dir());
        tmp.close()?;
        assert!(!path.exists());
        Ok(())
    }

    #[test]
    fn test_removed_on_drop() {
        let path = {
            let tmp = TempDir::new().unwrap();
            tmp.path().to_path_buf()
        };
        assert!(!path.exists());
    }

    #[test]
    fn test_recreation_yields_distinct_path() {
        let first = TempDir::new().unwrap();
        let first_path = first.path().to_path_buf();
        first.close().unwrap();

        let second = TempDir::new().unwrap();
        assert_ne!(first_path, second.path());
    }

    #[test]
    fn test_builder_parent_and_affixes() -> anyhow::Result<()> {
        let parent = TempDir::new()?;
        let tmp = TempDir::builder()
            .parent(parent.path())
            .prefix("work-")
            .suffix(".stage")
            .create()?;

        assert_eq!(tmp.path().parent(), Some(parent.path()));
        let name = tmp.path().file_name().unwrap().to_string_lossy().into_owned();
        assert!(name.starts_with("work-"));
        assert!(name.ends_with(".stage"));
        Ok(())
    }

    #[test]
    fn test_builder_missing_parent_fails() {
        let result = TempDir::builder()
            .parent(Path::new("/no/such/parent"))
            .create();
        assert!(result.is_err());
    }
}
