/*!
 * Directory scanning: grouping matching files by parent directory
 */

use std::path::Path;

use crate::error::{Failure, FailureKind, Result};
use crate::filter::FileFilter;
use crate::types::GroupMap;
use crate::utils::{is_descendable, list_children, Listing, ListingOptions, VisitedDirs};

/// Walks a directory tree and collects matching files per directory
#[derive(Debug, Clone, Copy, Default)]
pub struct Scanner {
    /// Listing options
    options: ListingOptions,
}

impl Scanner {
    /// Create a new scanner
    pub fn new(options: ListingOptions) -> Self {
        Self { options }
    }

    /// Scan `root` and return the matching files grouped by parent directory
    ///
    /// The walk is depth-first and pre-order: a directory's own files are
    /// recorded before any subdirectory is entered, so the map's key order is
    /// the order in which directories were first found. Only directories that
    /// directly hold a matching file become keys. Subdirectories that cannot
    /// be listed are pushed onto `failures` and skipped.
    pub fn scan(
        &self,
        root: &Path,
        filter: &dyn FileFilter,
        failures: &mut Vec<Failure>,
    ) -> Result<GroupMap> {
        crate::ensure!(root.is_dir(), NotFound, "{}", root.display());

        let mut groups = GroupMap::new();
        let mut visited = VisitedDirs::new();
        visited.first_visit(root);

        // The root must be listable; deeper failures are recoverable
        let listing = list_children(root, self.options)?;
        self.collect(root, listing, filter, &mut groups, &mut visited, failures);

        log::debug!(
            "Scan of {} found {} groups",
            root.display(),
            groups.len()
        );
        Ok(groups)
    }

    /// Scan one directory whose listing is already known, then recurse
    fn collect(
        &self,
        dir: &Path,
        listing: Listing,
        filter: &dyn FileFilter,
        groups: &mut GroupMap,
        visited: &mut VisitedDirs,
        failures: &mut Vec<Failure>,
    ) {
        for err in &listing.errors {
            log::warn!("Skipping entry in {}: {}", dir.display(), err);
            failures.push(Failure::from_walk(err, dir));
        }

        // Split into directories and files
        let (dirs, files): (Vec<_>, Vec<_>) = listing
            .entries
            .into_iter()
            .partition(|entry| is_descendable(entry, self.options));

        let matching: Vec<_> = files
            .into_iter()
            .map(|entry| entry.into_path())
            .filter(|path| path.is_file() && filter.matches(path))
            .collect();
        if !matching.is_empty() {
            log::debug!("{}: {} matching files", dir.display(), matching.len());
            groups.insert(dir.to_path_buf(), matching);
        }

        for entry in dirs {
            let sub = entry.path();
            if !visited.first_visit(sub) {
                log::debug!("Already visited {}, not descending", sub.display());
                continue;
            }
            match list_children(sub, self.options) {
                Ok(listing) => self.collect(sub, listing, filter, groups, visited, failures),
                Err(e) => {
                    log::warn!("Error scanning directory {}: {}", sub.display(), e);
                    failures.push(Failure::new(FailureKind::Scan, sub, e.to_string()));
                }
            }
        }
    }
}
