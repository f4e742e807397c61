/*!
 * Utility functions for flatdump
 */

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use walkdir::{DirEntry, WalkDir};

use crate::error::{FlatDumpError, Result};

/// Options shared by every directory listing in a run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListingOptions {
    /// Sort children by file name instead of raw listing order
    pub sort_entries: bool,
    /// Descend into symlinked directories
    pub follow_symlinks: bool,
}

impl Default for ListingOptions {
    fn default() -> Self {
        Self {
            sort_entries: true,
            follow_symlinks: false,
        }
    }
}

/// Children of one directory plus the entries that failed to resolve
#[derive(Debug, Default)]
pub struct Listing {
    /// Readable entries, in listing order
    pub entries: Vec<DirEntry>,
    /// Per-entry errors (entries that vanished or could not be stat'ed)
    pub errors: Vec<walkdir::Error>,
}

/// List the immediate children of `dir`
///
/// Fails only when `dir` itself cannot be read. Links are listed as links,
/// broken ones included; whether to walk through them is up to
/// [`is_descendable`].
pub fn list_children(dir: &Path, options: ListingOptions) -> Result<Listing> {
    let mut walker = WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(false);
    if options.sort_entries {
        walker = walker.sort_by_file_name();
    }

    let mut listing = Listing::default();
    for entry in walker {
        match entry {
            Ok(entry) => listing.entries.push(entry),
            Err(e) if e.depth() == 0 => return Err(FlatDumpError::from(e)),
            Err(e) => listing.errors.push(e),
        }
    }
    Ok(listing)
}

/// Whether a listed entry should be walked into
///
/// Real directories always qualify. Links to directories qualify only when
/// `options.follow_symlinks` is set; cycles are left to [`VisitedDirs`].
pub fn is_descendable(entry: &DirEntry, options: ListingOptions) -> bool {
    let file_type = entry.file_type();
    file_type.is_dir()
        || (options.follow_symlinks && file_type.is_symlink() && entry.path().is_dir())
}

/// Real paths of directories already walked, used to break symlink cycles
#[derive(Debug, Default)]
pub struct VisitedDirs {
    seen: HashSet<PathBuf>,
}

impl VisitedDirs {
    /// Create an empty set
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark `dir` visited; returns false if its real path was seen before
    pub fn first_visit(&mut self, dir: &Path) -> bool {
        match fs::canonicalize(dir) {
            Ok(real) => self.seen.insert(real),
            // Unresolvable: let the listing itself report the problem
            Err(_) => true,
        }
    }
}

/// Last path component as a lossy string
pub fn file_name_lossy(path: &Path) -> String {
    path.file_name()
        .unwrap_or_else(|| path.as_os_str())
        .to_string_lossy()
        .to_string()
}

/// Name of a directory for output purposes
///
/// Paths like `.` or `..` have no last component; their real path is used.
pub fn dir_display_name(dir: &Path) -> String {
    dir.file_name()
        .map(|name| name.to_string_lossy().to_string())
        .or_else(|| {
            fs::canonicalize(dir)
                .ok()
                .and_then(|real| real.file_name().map(|n| n.to_string_lossy().to_string()))
        })
        .unwrap_or_else(|| "root".to_string())
}

/// Format a human-readable file size
pub fn format_file_size(size: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if size >= GB {
        format!("{:.2} GB", size as f64 / GB as f64)
    } else if size >= MB {
        format!("{:.2} MB", size as f64 / MB as f64)
    } else if size >= KB {
        format!("{:.2} KB", size as f64 / KB as f64)
    } else {
        format!("{} bytes", size)
    }
}
