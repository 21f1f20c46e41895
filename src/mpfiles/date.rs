//! Date derivation from mission planning path segments.
//!
//! Week directories are named `MONDDYY` (month abbreviation, day of month,
//! 2-digit year) and sit directly above an `ofls?` version directory. The
//! date of a located file is carried entirely by those two path segments.

use std::path::Path;

use chrono::{Datelike, NaiveDate};
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// `MONDDYY/ofls?` fragment anywhere in a path.
    static ref WEEK_VERSION_RE: Regex =
        Regex::new(r"([A-Z]{3})(\d{2})(\d{2})[/\\]ofls(\w)").unwrap();
}

const MONTH_ABBREVS: [&str; 12] = [
    "JAN", "FEB", "MAR", "APR", "MAY", "JUN", "JUL", "AUG", "SEP", "OCT", "NOV", "DEC",
];

fn month_number(abbrev: &str) -> Option<u32> {
    MONTH_ABBREVS
        .iter()
        .position(|m| *m == abbrev)
        .map(|idx| idx as u32 + 1)
}

/// Expand a 2-digit year: values above 95 fall in the 1900s, the rest in
/// the 2000s.
pub(crate) fn expand_year(yy: u32) -> i32 {
    if yy > 95 { 1900 + yy as i32 } else { 2000 + yy as i32 }
}

/// Calendar date and version letter derived from a located file's path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct WeekDate {
    date: NaiveDate,
    version: char,
}

impl WeekDate {
    /// Build from week-name components; `None` when they do not form a
    /// real calendar date.
    pub(crate) fn from_components(mon: &str, day: u32, yy: u32, version: char) -> Option<Self> {
        let month = month_number(mon)?;
        let date = NaiveDate::from_ymd_opt(expand_year(yy), month, day)?;
        Some(Self { date, version })
    }

    /// Sortable key: `YYYY:DDD` (day-of-year form) plus the version letter,
    /// so same-week versions order by letter.
    pub(crate) fn sort_key(&self) -> String {
        format!("{:04}:{:03}{}", self.date.year(), self.date.ordinal(), self.version)
    }

    /// Canonical date string, `YYYY:DDD:12:00:00.000` (noon of the week day).
    pub(crate) fn date_string(&self) -> String {
        format!("{:04}:{:03}:12:00:00.000", self.date.year(), self.date.ordinal())
    }
}

/// Derive a [`WeekDate`] from the `MONDDYY/ofls?` fragment of `path`.
///
/// Paths without the fragment, and week names that are not real calendar
/// dates, yield `None` and are skipped by the caller.
pub(crate) fn derive_from_path(path: &Path) -> Option<WeekDate> {
    let text = path.to_string_lossy();
    let caps = WEEK_VERSION_RE.captures(&text)?;
    let mon = caps.get(1)?.as_str();
    let day: u32 = caps.get(2)?.as_str().parse().ok()?;
    let yy: u32 = caps.get(3)?.as_str().parse().ok()?;
    let version = caps.get(4)?.as_str().chars().next()?;
    WeekDate::from_components(mon, day, yy, version)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_two_digit_year_heuristic() {
        assert_eq!(expand_year(96), 1996);
        assert_eq!(expand_year(99), 1999);
        assert_eq!(expand_year(5), 2005);
        assert_eq!(expand_year(0), 2000);
        assert_eq!(expand_year(95), 2095);
    }

    #[test]
    fn test_derive_from_path() {
        let wd = derive_from_path(Path::new("/arc/2007/JAN0107/oflsa/C123.txt")).unwrap();
        assert_eq!(wd.sort_key(), "2007:001a");
        assert_eq!(wd.date_string(), "2007:001:12:00:00.000");
    }

    #[test]
    fn test_day_of_year_accounts_for_leap_years() {
        let wd = derive_from_path(Path::new("/arc/2008/MAR0108/oflsb/C1.txt")).unwrap();
        assert_eq!(wd.sort_key(), "2008:061b");

        let wd = derive_from_path(Path::new("/arc/2007/MAR0107/oflsb/C1.txt")).unwrap();
        assert_eq!(wd.sort_key(), "2007:060b");
    }

    #[test]
    fn test_nineties_week_resolves_to_1900s() {
        let wd = derive_from_path(Path::new("/arc/1996/DEC3096/oflsa/C1.txt")).unwrap();
        assert_eq!(wd.date_string(), "1996:365:12:00:00.000");
    }

    #[test]
    fn test_impossible_dates_are_rejected() {
        assert!(derive_from_path(Path::new("/arc/2007/FEB3107/oflsa/C1.txt")).is_none());
        assert!(derive_from_path(Path::new("/arc/2007/XXX0107/oflsa/C1.txt")).is_none());
        assert!(derive_from_path(Path::new("/arc/2007/notaweek/C1.txt")).is_none());
    }
}
