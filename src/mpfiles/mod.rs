//! Dated mission planning file discovery.
//!
//! Mission planning products live under a conventional hierarchy:
//! `root/YYYY/MONDDYY/ofls?/...`: a year directory, a week directory
//! named by month, day and 2-digit year, a version directory, and
//! optionally a fixed subdirectory chain below that. [`MpScanner`] walks
//! the tree with level-by-level pruning, annotates every located file
//! with a date derived from its path, and memoizes results per query for
//! its own lifetime (scans of a deep archive are slow, repeat queries are
//! common).

mod date;
mod walker;

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use itertools::Itertools;
use regex::Regex;

use crate::error::Result;
use walker::{WalkState, Walker};

/// Default archive root for mission planning products.
pub const DEFAULT_ARCHIVE_ROOT: &str = "/data/mpcrit1/mplogs";

/// One located mission planning file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MpFile {
    /// Full path to the located file
    pub name: PathBuf,
    /// Canonical date string (`YYYY:DDD:12:00:00.000`) derived from the
    /// week and version path segments
    pub date: String,
}

/// One scan query. Keeping the parts separate avoids the collision
/// ambiguity of a concatenated string key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct ScanKey {
    rootdir: PathBuf,
    subdir: Option<String>,
    pattern: String,
}

/// Scanner over a mission planning archive with per-query memoization.
///
/// Cached entries persist for the lifetime of the scanner; there is no
/// eviction and no invalidation, so a scanner should not outlive the
/// archive state it has observed.
#[derive(Debug)]
pub struct MpScanner {
    root: PathBuf,
    cache: HashMap<ScanKey, Vec<MpFile>>,
}

impl MpScanner {
    /// Scanner over the archive rooted at `root`.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            cache: HashMap::new(),
        }
    }

    /// Archive root this scanner walks.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Number of memoized queries.
    #[must_use]
    pub fn cache_len(&self) -> usize {
        self.cache.len()
    }

    /// Drop all memoized results, forcing re-scans.
    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }

    /// Find every file under the archive whose basename matches
    /// `name_pattern` (a regex, anchored at the start of the name).
    ///
    /// `mpdir` selects a directory below the archive root to start from;
    /// `subdir` restricts matching to a fixed `/`-separated chain below
    /// each version directory (such as `mps/or`). Results are sorted
    /// ascending by derived date, version letter breaking ties within a
    /// week. Zero matches is not an error.
    ///
    /// Repeated calls with identical arguments return the memoized list
    /// without touching the file system.
    ///
    /// # Errors
    /// Returns an error only for an invalid `name_pattern`; unreadable or
    /// missing directories are logged and skipped.
    pub fn scan(
        &mut self,
        name_pattern: &str,
        subdir: Option<&str>,
        mpdir: Option<&str>,
    ) -> Result<Vec<MpFile>> {
        let rootdir = match mpdir {
            Some(dir) => self.root.join(dir),
            None => self.root.clone(),
        };
        let key = ScanKey {
            rootdir: rootdir.clone(),
            subdir: subdir.map(str::to_owned),
            pattern: name_pattern.to_owned(),
        };

        if let Some(hit) = self.cache.get(&key) {
            log::debug!("cache hit for {} ({name_pattern})", rootdir.display());
            return Ok(hit.clone());
        }

        let files = scan_uncached(&rootdir, name_pattern, subdir)?;
        self.cache.insert(key, files.clone());
        Ok(files)
    }
}

impl Default for MpScanner {
    fn default() -> Self {
        Self::new(DEFAULT_ARCHIVE_ROOT)
    }
}

fn scan_uncached(rootdir: &Path, name_pattern: &str, subdir: Option<&str>) -> Result<Vec<MpFile>> {
    log::info!("looking for files in {}", rootdir.display());
    let name_regex = Regex::new(name_pattern)?;
    let chain: Vec<String> = subdir
        .map(|s| {
            s.trim_end_matches('/')
                .split('/')
                .map(str::to_owned)
                .collect()
        })
        .unwrap_or_default();

    let mut walker = Walker::new(&chain, &name_regex);
    walker.walk(rootdir, WalkState::Root);
    let located = walker.into_located();

    // Paths the date cannot be derived from are dropped, not reported.
    let files = located
        .into_iter()
        .filter_map(|path| {
            date::derive_from_path(&path).map(|wd| (wd.sort_key(), wd.date_string(), path))
        })
        .sorted_by(|a, b| a.0.cmp(&b.0))
        .map(|(_, date, name)| MpFile { name, date })
        .collect_vec();

    if files.is_empty() {
        log::info!("no files matching {name_pattern} under {}", rootdir.display());
    } else {
        log::info!(
            "located {} file(s) matching {name_pattern} under {}",
            files.len(),
            rootdir.display()
        );
    }
    Ok(files)
}
