/*!
 * Selection of matching files
 */

use std::path::Path;

/// Suffix matched when none is configured
pub const DEFAULT_EXTENSION: &str = ".java";

/// Decides whether a file takes part in aggregation
pub trait FileFilter {
    /// Check a candidate file
    fn matches(&self, path: &Path) -> bool;
}

impl<F> FileFilter for F
where
    F: Fn(&Path) -> bool,
{
    fn matches(&self, path: &Path) -> bool {
        self(path)
    }
}

/// Matches files whose name ends with a fixed suffix
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuffixFilter {
    suffix: String,
}

impl SuffixFilter {
    /// Create a filter for `suffix`; a bare extension like `rs` gets a leading dot
    pub fn new(suffix: impl Into<String>) -> Self {
        let suffix = suffix.into();
        let suffix = if suffix.is_empty() || suffix.starts_with('.') {
            suffix
        } else {
            format!(".{}", suffix)
        };
        Self { suffix }
    }

    /// The suffix being matched
    pub fn suffix(&self) -> &str {
        &self.suffix
    }
}

impl Default for SuffixFilter {
    fn default() -> Self {
        Self::new(DEFAULT_EXTENSION)
    }
}

impl FileFilter for SuffixFilter {
    fn matches(&self, path: &Path) -> bool {
        path.file_name()
            .map(|name| name.to_string_lossy().ends_with(&self.suffix))
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_matches_java() {
        let filter = SuffixFilter::default();
        assert!(filter.matches(Path::new("src/Main.java")));
        assert!(!filter.matches(Path::new("src/Main.class")));
        assert!(!filter.matches(Path::new("src/java")));
    }

    #[test]
    fn test_bare_extension_gets_dot() {
        let filter = SuffixFilter::new("rs");
        assert_eq!(filter.suffix(), ".rs");
        assert!(filter.matches(Path::new("lib.rs")));
        assert!(!filter.matches(Path::new("libxrs")));
    }

    #[test]
    fn test_closure_is_a_filter() {
        let filter = |p: &Path| p.to_string_lossy().contains("keep");
        assert!(filter.matches(Path::new("a/keep.txt")));
        assert!(!filter.matches(Path::new("a/drop.txt")));
    }
}
