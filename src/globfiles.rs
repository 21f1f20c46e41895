//! Glob expansion with match-count validation.

use std::path::PathBuf;

use crate::error::{Error, Result};

/// Expand `pattern` and validate the number of matches.
///
/// Matches are returned in sorted order for deterministic processing.
/// Either bound may be `None` for "unbounded".
///
/// # Arguments
/// * `pattern` - Input file glob
/// * `min_files` - Minimum matching paths (`None` => no minimum)
/// * `max_files` - Maximum matching paths (`None` => no maximum)
///
/// # Errors
/// Returns an error if the pattern is invalid, a matched path cannot be
/// read, or the match count falls outside `[min_files, max_files]`.
pub fn get_globfiles(
    pattern: &str,
    min_files: Option<usize>,
    max_files: Option<usize>,
) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in glob::glob(pattern)? {
        files.push(entry?);
    }
    files.sort();

    let found = files.len();
    if let Some(min) = min_files {
        if found < min {
            return Err(Error::TooFewMatches {
                pattern: pattern.to_owned(),
                min,
                found,
            });
        }
    }
    if let Some(max) = max_files {
        if found > max {
            return Err(Error::TooManyMatches {
                pattern: pattern.to_owned(),
                max,
                found,
            });
        }
    }

    Ok(files)
}

/// Expand `pattern`, requiring exactly one match.
///
/// # Errors
/// Returns an error unless the pattern matches exactly one path.
pub fn get_globfile(pattern: &str) -> Result<PathBuf> {
    let mut files = get_globfiles(pattern, Some(1), Some(1))?;
    Ok(files.remove(0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;

    fn fixture() -> tempfile::TempDir {
        let dir = tempfile::TempDir::new().unwrap();
        File::create(dir.path().join("b.dat")).unwrap();
        File::create(dir.path().join("a.dat")).unwrap();
        File::create(dir.path().join("notes.txt")).unwrap();
        dir
    }

    #[test]
    fn test_in_bounds_returns_sorted_matches() {
        let dir = fixture();
        let pattern = format!("{}/*.dat", dir.path().display());
        let files = get_globfiles(&pattern, Some(1), Some(5)).unwrap();
        assert_eq!(files.len(), 2);
        assert!(files[0].ends_with("a.dat"));
        assert!(files[1].ends_with("b.dat"));
    }

    #[test]
    fn test_unbounded_allows_zero_matches() {
        let dir = fixture();
        let pattern = format!("{}/*.nope", dir.path().display());
        let files = get_globfiles(&pattern, None, None).unwrap();
        assert!(files.is_empty());
    }

    #[test]
    fn test_too_few_matches_fails() {
        let dir = fixture();
        let pattern = format!("{}/*.dat", dir.path().display());
        let err = get_globfiles(&pattern, Some(3), None).unwrap_err();
        assert!(matches!(err, Error::TooFewMatches { min: 3, found: 2, .. }));
    }

    #[test]
    fn test_too_many_matches_fails() {
        let dir = fixture();
        let pattern = format!("{}/*.dat", dir.path().display());
        let err = get_globfiles(&pattern, None, Some(1)).unwrap_err();
        assert!(matches!(err, Error::TooManyMatches { max: 1, found: 2, .. }));
    }

    #[test]
    fn test_single_file_helper() {
        let dir = fixture();
        let pattern = format!("{}/*.txt", dir.path().display());
        let file = get_globfile(&pattern).unwrap();
        assert!(file.ends_with("notes.txt"));

        let pattern = format!("{}/*.dat", dir.path().display());
        assert!(get_globfile(&pattern).is_err());
    }

    #[test]
    fn test_invalid_pattern_fails() {
        assert!(matches!(get_globfiles("[", None, None), Err(Error::Pattern(_))));
    }
}
