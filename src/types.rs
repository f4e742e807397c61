/*!
 * Core types and data structures for the flatdump application
 */

use std::path::PathBuf;
use std::time::{Duration, Instant};

use chrono::Local;
use indexmap::IndexMap;
use serde::Serialize;

use crate::error::Failure;

/// Matching files grouped by their parent directory, in first-seen order
pub type GroupMap = IndexMap<PathBuf, Vec<PathBuf>>;

/// Kind of an entry in the structure listing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    /// Directory (or a link to one)
    Folder,
    /// Anything else
    File,
}

impl EntryKind {
    /// Tag used in `folder_structure.txt`
    pub fn tag(self) -> &'static str {
        match self {
            EntryKind::Folder => "[Folder]",
            EntryKind::File => "[File]",
        }
    }
}

/// Which entry point produced a report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RunMode {
    /// One file into `single_java_file.txt`
    SingleFile,
    /// A directory tree into one text file per group
    Folder,
}

/// One output file written during a run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Artifact {
    /// Where it was written
    pub path: PathBuf,
    /// Number of source files it aggregates (0 for the structure listing)
    pub files: usize,
    /// Size in bytes
    pub bytes: u64,
}

/// Outcome of `process_single_file` / `process_folder`
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    /// Entry point used
    pub mode: RunMode,
    /// Input file or folder
    pub input: PathBuf,
    /// Directory holding the artifacts
    pub output_dir: PathBuf,
    /// Artifacts written, in write order
    pub artifacts: Vec<Artifact>,
    /// Recoverable failures, in the order they occurred
    pub failures: Vec<Failure>,
    /// Wall time of the run
    #[serde(serialize_with = "serialize_duration_ms", rename = "duration_ms")]
    pub duration: Duration,
    /// Local completion time, RFC 3339
    pub finished_at: Option<String>,
}

impl RunReport {
    /// Start an empty report
    pub fn new(mode: RunMode, input: PathBuf, output_dir: PathBuf) -> Self {
        Self {
            mode,
            input,
            output_dir,
            artifacts: Vec::new(),
            failures: Vec::new(),
            duration: Duration::ZERO,
            finished_at: None,
        }
    }

    /// Stamp duration and completion time
    pub fn finish(&mut self, started: Instant) {
        self.duration = started.elapsed();
        self.finished_at = Some(Local::now().to_rfc3339());
    }

    /// Whether every step succeeded
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }

    /// Number of source files aggregated across all artifacts
    pub fn files_aggregated(&self) -> usize {
        self.artifacts.iter().map(|a| a.files).sum()
    }
}

fn serialize_duration_ms<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.serialize_u64(duration.as_millis() as u64)
}
