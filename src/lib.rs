//! A Rust library of file system utilities for mission planning archives:
//! scoped working-directory changes, self-cleaning temporary directories,
//! glob validation, relative path math, gzip-transparent local copies,
//! backward line reading, and date-aware discovery of mission planning
//! files.

pub mod chdir;
pub mod error;
pub mod globfiles;
pub mod local_copy;
pub mod mpfiles;
pub mod relpath;
pub mod reverse;
pub mod tempdir;

// Re-export the most common types for easier use
// Core types
pub use error::{Error, Result};

// Scoped file system helpers
pub use chdir::{CurrentDirGuard, with_chdir};
pub use tempdir::{TempDir, TempDirBuilder};

// Path and file staging utilities
pub use globfiles::{get_globfile, get_globfiles};
pub use local_copy::{LocalCopyOptions, make_local_copy};
pub use relpath::relpath;
pub use reverse::ReverseLineReader;

// Mission planning file discovery
pub use mpfiles::{DEFAULT_ARCHIVE_ROOT, MpFile, MpScanner};
