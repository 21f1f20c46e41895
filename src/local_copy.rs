//! Local copies and links of archive files, with gzip transparency.

use std::fs::{self, File};
use std::io::{self, BufReader};
use std::path::{Path, PathBuf};

use flate2::read::GzDecoder;

use crate::error::{Error, Result};
use crate::relpath::{absolutize, relpath};

#[cfg(unix)]
use std::os::unix::fs::symlink;
#[cfg(windows)]
use std::os::windows::fs::symlink_file as symlink;

/// Options for [`make_local_copy`].
#[derive(Debug, Clone)]
pub struct LocalCopyOptions {
    /// Output path (default: input basename with a trailing `.gz` stripped)
    pub outfile: Option<PathBuf>,
    /// Always copy instead of linking
    pub copy: bool,
    /// Link to the absolute input path instead of a relative one
    pub link_abs: bool,
    /// Overwrite an existing output path
    pub clobber: bool,
}

impl Default for LocalCopyOptions {
    fn default() -> Self {
        Self {
            outfile: None,
            copy: false,
            link_abs: false,
            clobber: true,
        }
    }
}

/// Make a local copy of or link to `infile`, gunzipping if necessary.
///
/// A `.gz` input is decompressed into the output; otherwise the output is
/// a byte copy when `copy` is set, or a symbolic link (relative by
/// default, absolute with `link_abs`).
///
/// # Arguments
/// * `infile` - Input file
/// * `options` - Output naming, copy/link mode and clobber behavior
///
/// # Returns
/// The output path.
///
/// # Errors
/// Fails if `infile` does not exist, if the output exists and `clobber`
/// is not set, or on any IO failure while producing the output.
pub fn make_local_copy(infile: &Path, options: &LocalCopyOptions) -> Result<PathBuf> {
    if !infile.exists() {
        return Err(Error::MissingInput(infile.to_path_buf()));
    }

    let outfile = match &options.outfile {
        Some(out) => out.clone(),
        None => default_output_name(infile),
    };

    if outfile.exists() {
        if options.clobber {
            fs::remove_file(&outfile)?;
        } else {
            return Err(Error::OutputExists(outfile));
        }
    }

    if is_gzipped(infile) {
        let mut decoder = GzDecoder::new(BufReader::new(File::open(infile)?));
        let mut out = File::create(&outfile)?;
        io::copy(&mut decoder, &mut out)?;
        log::debug!("decompressed {} to {}", infile.display(), outfile.display());
    } else if options.copy {
        fs::copy(infile, &outfile)?;
        log::debug!("copied {} to {}", infile.display(), outfile.display());
    } else {
        let infile_abs = absolutize(infile)?;
        let target = if options.link_abs {
            infile_abs
        } else {
            let link_dir = outfile.parent().unwrap_or_else(|| Path::new(""));
            relpath(&infile_abs, Some(link_dir))?
        };
        symlink(&target, &outfile)?;
        log::debug!("linked {} -> {}", outfile.display(), target.display());
    }

    Ok(outfile)
}

fn is_gzipped(path: &Path) -> bool {
    path.file_name()
        .is_some_and(|name| name.to_string_lossy().ends_with(".gz"))
}

/// Input basename with a trailing `.gz` stripped.
fn default_output_name(infile: &Path) -> PathBuf {
    let name = infile
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    PathBuf::from(name.strip_suffix(".gz").unwrap_or(&name))
}
