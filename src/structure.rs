/*!
 * Indented text rendering of a directory tree
 */

use std::fmt::Write as _;
use std::path::Path;

use crate::error::{Failure, FailureKind, Result};
use crate::types::EntryKind;
use crate::utils::{is_descendable, list_children, ListingOptions, VisitedDirs};

/// Spaces per nesting level
const INDENT: &str = "  ";

/// Renders `[Folder]` / `[File]` outlines of a directory
#[derive(Debug, Clone, Copy, Default)]
pub struct StructureRenderer {
    options: ListingOptions,
}

impl StructureRenderer {
    /// Create a new renderer
    pub fn new(options: ListingOptions) -> Self {
        Self { options }
    }

    /// Render the subtree below `dir`, starting at `indent_level`
    ///
    /// Each child gets one line; a folder's own children follow its line
    /// directly, one level deeper. Files and folders are not regrouped.
    /// Nested directories that cannot be listed keep their line, lose their
    /// children, and are recorded in `failures`.
    pub fn render(
        &self,
        dir: &Path,
        indent_level: usize,
        failures: &mut Vec<Failure>,
    ) -> Result<String> {
        crate::ensure!(dir.is_dir(), NotFound, "{}", dir.display());

        let mut visited = VisitedDirs::new();
        visited.first_visit(dir);

        let mut out = String::new();
        self.render_into(dir, indent_level, &mut out, &mut visited, failures)?;
        Ok(out)
    }

    fn render_into(
        &self,
        dir: &Path,
        indent_level: usize,
        out: &mut String,
        visited: &mut VisitedDirs,
        failures: &mut Vec<Failure>,
    ) -> Result<()> {
        let listing = list_children(dir, self.options)?;
        for err in &listing.errors {
            log::warn!("Skipping entry in {}: {}", dir.display(), err);
            failures.push(Failure::from_walk(err, dir));
        }

        let indent = INDENT.repeat(indent_level);
        for entry in listing.entries {
            let path = entry.path();
            let kind = if path.is_dir() {
                EntryKind::Folder
            } else {
                EntryKind::File
            };
            let _ = writeln!(
                out,
                "{}{} {}",
                indent,
                kind.tag(),
                entry.file_name().to_string_lossy()
            );

            if kind != EntryKind::Folder || !is_descendable(&entry, self.options) {
                continue;
            }
            if !visited.first_visit(path) {
                log::debug!("Already rendered {}, not descending", path.display());
                continue;
            }
            if let Err(e) = self.render_into(path, indent_level + 1, out, visited, failures) {
                log::warn!("Error listing directory {}: {}", path.display(), e);
                failures.push(Failure::new(FailureKind::Scan, path, e.to_string()));
            }
        }
        Ok(())
    }
}
