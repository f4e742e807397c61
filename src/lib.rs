/*!
 * flatdump - Flatten a source tree into per-directory text files for LLM context
 *
 * Matching files are grouped by their parent directory and concatenated,
 * each behind a `File: <name>` header, into one text file per directory.
 * An indented `folder_structure.txt` records the layout of the tree.
 */

pub mod aggregator;
pub mod config;
pub mod error;
pub mod filter;
pub mod reader;
pub mod report;
pub mod scanner;
pub mod structure;
pub mod types;
pub mod utils;
pub mod writer;


// Re-export main components for easier access
pub use aggregator::{Aggregator, SINGLE_FILE_OUTPUT, STRUCTURE_FILE};
pub use config::{CollisionPolicy, Config};
pub use error::{Failure, FailureKind, FlatDumpError, Result};
pub use filter::{FileFilter, SuffixFilter};
pub use report::{ReportFormat, Reporter};
pub use scanner::Scanner;
pub use structure::StructureRenderer;
pub use types::{Artifact, GroupMap, RunMode, RunReport};
pub use writer::save_to_path;

/// Version of the library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
