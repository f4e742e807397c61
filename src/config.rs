/*!
 * Configuration handling for flatdump
 */

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use clap_complete::Shell;
use once_cell::sync::Lazy;

use crate::error::Result;
use crate::filter::{SuffixFilter, DEFAULT_EXTENSION};
use crate::report::ReportFormat;
use crate::utils::ListingOptions;

/// Output root used when none is given: desktop, then home, then cwd
pub static DEFAULT_OUTPUT_ROOT: Lazy<PathBuf> = Lazy::new(|| {
    dirs::desktop_dir()
        .or_else(dirs::home_dir)
        .unwrap_or_else(|| PathBuf::from("."))
});

/// Policy for two groups that map to the same output file name
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum CollisionPolicy {
    /// Rename every clashing group after its path relative to the input (default)
    Disambiguate,
    /// Later groups replace earlier ones
    Overwrite,
    /// Skip later groups and record a collision failure
    Error,
}

impl Default for CollisionPolicy {
    fn default() -> Self {
        Self::Disambiguate
    }
}

/// Command-line arguments for flatdump
#[derive(Parser, Debug, Clone)]
#[clap(
    name = "flatdump",
    version = env!("CARGO_PKG_VERSION"),
    about = "Flatten source files of a directory tree into per-directory text files",
    long_about = "Concatenates matching source files into one text file per directory, each file preceded by a `File: <name>` header, and writes an indented folder_structure.txt next to them. Given a single file, writes it to single_java_file.txt."
)]
pub struct Args {
    /// Source file or folder to process
    #[clap(required_unless_present = "generate")]
    pub input: Option<PathBuf>,

    /// Directory under which output is written (default: desktop)
    #[clap(short, long)]
    pub output: Option<PathBuf>,

    /// File name suffix that selects files to aggregate
    #[clap(short, long, default_value = DEFAULT_EXTENSION)]
    pub extension: String,

    /// Keep raw directory-listing order instead of sorting by name
    #[clap(long)]
    pub unsorted: bool,

    /// Descend into symlinked directories (each real directory is visited once)
    #[clap(long)]
    pub follow_symlinks: bool,

    /// What to do when two directories share an output file name
    #[clap(long, value_enum, default_value_t = CollisionPolicy::default())]
    pub collision: CollisionPolicy,

    /// Format of the run report
    #[clap(long, value_enum, default_value_t = ReportFormat::default())]
    pub format: ReportFormat,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[clap(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress logging, progress and the report
    #[clap(short, long)]
    pub quiet: bool,

    /// Generate shell completions
    #[clap(long = "generate", value_enum)]
    pub generate: Option<Shell>,
}

/// Run configuration passed explicitly to the aggregator
#[derive(Clone, Debug)]
pub struct Config {
    /// Base directory for all artifacts
    pub output_root: PathBuf,

    /// Selects the files to aggregate
    pub filter: SuffixFilter,

    /// Ordering and symlink handling for every directory listing
    pub listing: ListingOptions,

    /// Handling of clashing group output names
    pub collision_policy: CollisionPolicy,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            output_root: DEFAULT_OUTPUT_ROOT.clone(),
            filter: SuffixFilter::default(),
            listing: ListingOptions::default(),
            collision_policy: CollisionPolicy::default(),
        }
    }
}

impl Config {
    /// Create configuration from command-line arguments
    pub fn from_args(args: &Args) -> Self {
        Self {
            output_root: args
                .output
                .clone()
                .unwrap_or_else(|| DEFAULT_OUTPUT_ROOT.clone()),
            filter: SuffixFilter::new(args.extension.clone()),
            listing: ListingOptions {
                sort_entries: !args.unsorted,
                follow_symlinks: args.follow_symlinks,
            },
            collision_policy: args.collision,
        }
    }

    /// Use `root` as output root
    pub fn with_output_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.output_root = root.into();
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        crate::ensure!(
            !self.filter.suffix().is_empty(),
            Config,
            "file extension must not be empty"
        );
        crate::ensure!(
            !self.output_root.exists() || self.output_root.is_dir(),
            Config,
            "output root is not a directory: {}",
            self.output_root.display()
        );
        Ok(())
    }
}
