/*!
 * Aggregation of source files into flat text artifacts
 *
 * Two entry points: [`Aggregator::process_single_file`] writes one file with a
 * header into `single_java_file.txt`; [`Aggregator::process_folder`] writes
 * `folder_structure.txt` plus one text file per directory that directly holds
 * matching files. Both return a [`RunReport`]; only a missing input aborts
 * before any work, everything else is recorded as a [`Failure`] and the run
 * carries on.
 */

use std::collections::{HashMap, HashSet};
use std::path::{Component, Path, PathBuf};
use std::time::Instant;

use indicatif::ProgressBar;

use crate::config::{CollisionPolicy, Config};
use crate::error::{Failure, FailureKind, FlatDumpError, Result};
use crate::reader::read_content;
use crate::scanner::Scanner;
use crate::structure::StructureRenderer;
use crate::types::{GroupMap, RunMode, RunReport};
use crate::utils::{dir_display_name, file_name_lossy};
use crate::writer::save_artifact;

/// Output file of single-file mode
pub const SINGLE_FILE_OUTPUT: &str = "single_java_file.txt";

/// Structure artifact of folder mode
pub const STRUCTURE_FILE: &str = "folder_structure.txt";

/// Stem of [`STRUCTURE_FILE`]; no group may claim it
const STRUCTURE_STEM: &str = "folder_structure";

/// Joins relative path components of disambiguated group names
const PATH_JOINER: &str = "__";

/// Header written in front of every file's content
pub fn file_header(path: &Path) -> String {
    format!("File: {}\n\n", file_name_lossy(path))
}

/// Drives reading, scanning, rendering and writing for one run at a time
pub struct Aggregator {
    config: Config,
    progress: ProgressBar,
}

impl Aggregator {
    /// Create an aggregator with a hidden progress bar
    pub fn new(config: Config) -> Self {
        Self {
            config,
            progress: ProgressBar::hidden(),
        }
    }

    /// Report progress of folder runs on `progress`
    pub fn with_progress(mut self, progress: ProgressBar) -> Self {
        self.progress = progress;
        self
    }

    /// Configuration used for every run
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Write `file_path`, headed by its name, to `single_java_file.txt`
    ///
    /// An unreadable file still produces the header; the read failure is
    /// recorded in the report.
    pub fn process_single_file(&self, file_path: &Path) -> Result<RunReport> {
        let start = Instant::now();
        crate::ensure!(file_path.is_file(), NotFound, "{}", file_path.display());

        let output_root = &self.config.output_root;
        let mut report = RunReport::new(
            RunMode::SingleFile,
            file_path.to_path_buf(),
            output_root.clone(),
        );
        log::info!("Processing file {}", file_path.display());

        let mut content = file_header(file_path);
        match read_content(file_path) {
            Ok(text) => content.push_str(&text),
            Err(e) => record(&mut report.failures, &e, file_path),
        }

        match save_artifact(output_root, SINGLE_FILE_OUTPUT, &content, 1) {
            Ok(artifact) => report.artifacts.push(artifact),
            Err(e) => record(&mut report.failures, &e, output_root),
        }

        report.finish(start);
        Ok(report)
    }

    /// Aggregate every group below `folder_path` into `<output root>/<folder name>/`
    pub fn process_folder(&self, folder_path: &Path) -> Result<RunReport> {
        let start = Instant::now();
        crate::ensure!(folder_path.is_dir(), NotFound, "{}", folder_path.display());

        let folder_name = dir_display_name(folder_path);
        let main_save_path = self.config.output_root.join(&folder_name);
        let mut report = RunReport::new(
            RunMode::Folder,
            folder_path.to_path_buf(),
            main_save_path.clone(),
        );
        log::info!(
            "Processing folder {} into {}",
            folder_path.display(),
            main_save_path.display()
        );

        self.progress.set_message("Rendering folder structure");
        let renderer = StructureRenderer::new(self.config.listing);
        match renderer.render(folder_path, 0, &mut report.failures) {
            Ok(structure) => match save_artifact(&main_save_path, STRUCTURE_FILE, &structure, 0) {
                Ok(artifact) => report.artifacts.push(artifact),
                Err(e) => record(&mut report.failures, &e, &main_save_path),
            },
            Err(e) => record(&mut report.failures, &e, folder_path),
        }

        self.progress.set_message("Scanning for matching files");
        let scanner = Scanner::new(self.config.listing);
        let groups = match scanner.scan(folder_path, &self.config.filter, &mut report.failures) {
            Ok(groups) => groups,
            Err(e) => {
                record(&mut report.failures, &e, folder_path);
                GroupMap::new()
            }
        };

        self.progress.set_length(groups.len() as u64);
        let names = plan_output_names(
            folder_path,
            &folder_name,
            &groups,
            self.config.collision_policy,
        );
        let mut taken: HashSet<String> = HashSet::from([STRUCTURE_STEM.to_string()]);

        for ((dir, files), name) in groups.iter().zip(names) {
            self.progress.set_message(format!("{}.txt", name));
            let first_claim = taken.insert(name.clone());
            let filename = format!("{}.txt", name);

            if !first_claim {
                match self.config.collision_policy {
                    CollisionPolicy::Error => {
                        let message = format!(
                            "{} maps to {}, which is already taken",
                            dir.display(),
                            filename
                        );
                        log::warn!("{}", message);
                        report.failures.push(Failure::new(
                            FailureKind::Collision,
                            main_save_path.join(&filename),
                            message,
                        ));
                        self.progress.inc(1);
                        continue;
                    }
                    CollisionPolicy::Overwrite => {
                        log::warn!(
                            "{} overwrites an earlier {}",
                            dir.display(),
                            filename
                        );
                    }
                    // Names are unique by construction
                    CollisionPolicy::Disambiguate => {}
                }
            }

            let blob = combine_group(files, &mut report.failures);
            match save_artifact(&main_save_path, &filename, &blob, files.len()) {
                Ok(artifact) => report.artifacts.push(artifact),
                Err(e) => record(&mut report.failures, &e, dir),
            }
            self.progress.inc(1);
        }

        report.finish(start);
        log::info!(
            "Wrote {} artifacts with {} failures",
            report.artifacts.len(),
            report.failures.len()
        );
        Ok(report)
    }
}

/// Concatenate a group's files, each as header + content + blank line
///
/// Unreadable files keep their header and separator, with no content.
pub fn combine_group(files: &[PathBuf], failures: &mut Vec<Failure>) -> String {
    let mut combined = String::new();
    for file in files {
        combined.push_str(&file_header(file));
        match read_content(file) {
            Ok(text) => combined.push_str(&text),
            Err(e) => record(failures, &e, file),
        }
        combined.push_str("\n\n");
    }
    combined
}

/// Choose the output file stem of every group, in map order
///
/// A group is named after its directory; the input folder's own group is
/// named after the input folder. Under [`CollisionPolicy::Disambiguate`]
/// names shared by several groups, or equal to the structure file's stem,
/// become the directory's path relative to `root` joined with `__`, and any
/// clash left after that gets a `-2`, `-3`, ... suffix. Other policies keep
/// the plain names and let the caller deal with repeats.
pub fn plan_output_names(
    root: &Path,
    root_name: &str,
    groups: &GroupMap,
    policy: CollisionPolicy,
) -> Vec<String> {
    let base_name = |dir: &Path| {
        if dir == root {
            root_name.to_string()
        } else {
            file_name_lossy(dir)
        }
    };
    let bases: Vec<String> = groups.keys().map(|dir| base_name(dir.as_path())).collect();
    if policy != CollisionPolicy::Disambiguate {
        return bases;
    }

    let mut counts: HashMap<&str, usize> = HashMap::new();
    for base in &bases {
        *counts.entry(base.as_str()).or_default() += 1;
    }

    let mut taken: HashSet<String> = HashSet::from([STRUCTURE_STEM.to_string()]);
    groups
        .keys()
        .zip(&bases)
        .map(|(dir, base)| {
            let candidate = if counts[base.as_str()] > 1 || base == STRUCTURE_STEM {
                relative_name(root, root_name, dir)
            } else {
                base.clone()
            };

            let mut name = candidate.clone();
            let mut n = 2;
            while !taken.insert(name.clone()) {
                name = format!("{}-{}", candidate, n);
                n += 1;
            }
            if name != *base {
                log::debug!("Group {} written as {}.txt", dir.display(), name);
            }
            name
        })
        .collect()
}

/// `a/b/util` below `root` becomes `a__b__util`; `root` itself keeps `root_name`
fn relative_name(root: &Path, root_name: &str, dir: &Path) -> String {
    let parts: Vec<String> = dir
        .strip_prefix(root)
        .unwrap_or(dir)
        .components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy().to_string()),
            _ => None,
        })
        .collect();
    if parts.is_empty() {
        root_name.to_string()
    } else {
        parts.join(PATH_JOINER)
    }
}

fn record(failures: &mut Vec<Failure>, err: &FlatDumpError, context: &Path) {
    log::warn!("{}", err);
    failures.push(Failure::from_error(err, context));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn groups_of(dirs: &[&str]) -> GroupMap {
        dirs.iter()
            .map(|d| (PathBuf::from(d), vec![PathBuf::from(d).join("X.java")]))
            .collect()
    }

    #[test]
    fn test_unique_names_stay_plain() {
        let groups = groups_of(&["/p/app", "/p/app/model", "/p/app/util"]);
        let names = plan_output_names(
            Path::new("/p/app"),
            "app",
            &groups,
            CollisionPolicy::Disambiguate,
        );
        assert_eq!(names, vec!["app", "model", "util"]);
    }

    #[test]
    fn test_shared_basename_uses_relative_path() {
        let groups = groups_of(&["/p/app/a/util", "/p/app/b/util", "/p/app/c"]);
        let names = plan_output_names(
            Path::new("/p/app"),
            "app",
            &groups,
            CollisionPolicy::Disambiguate,
        );
        assert_eq!(names, vec!["a__util", "b__util", "c"]);
    }

    #[test]
    fn test_structure_stem_is_reserved() {
        let groups = groups_of(&["/p/app/folder_structure"]);
        let names = plan_output_names(
            Path::new("/p/app"),
            "app",
            &groups,
            CollisionPolicy::Disambiguate,
        );
        assert_eq!(names, vec!["folder_structure-2"]);
    }

    #[test]
    fn test_root_and_child_with_same_name() {
        let groups = groups_of(&["/p/util", "/p/util/util"]);
        let names = plan_output_names(
            Path::new("/p/util"),
            "util",
            &groups,
            CollisionPolicy::Disambiguate,
        );
        assert_eq!(names, vec!["util", "util-2"]);
    }

    #[test]
    fn test_other_policies_keep_basenames() {
        let groups = groups_of(&["/p/app/a/util", "/p/app/b/util"]);
        for policy in [CollisionPolicy::Overwrite, CollisionPolicy::Error] {
            let names = plan_output_names(Path::new("/p/app"), "app", &groups, policy);
            assert_eq!(names, vec!["util", "util"]);
        }
    }

    #[test]
    fn test_file_header() {
        assert_eq!(
            file_header(Path::new("/x/y/Foo.java")),
            "File: Foo.java\n\n"
        );
    }
}
