/*!
 * Persisting aggregated text to the output root
 */

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{FlatDumpError, Result};
use crate::types::Artifact;

/// Write `content` as `directory/filename`, creating `directory` if needed
///
/// An existing file of that name is replaced without warning. Nothing is
/// rolled back on failure; files written earlier in a run stay on disk.
pub fn save_to_path(directory: &Path, filename: &str, content: &str) -> Result<PathBuf> {
    fs::create_dir_all(directory).map_err(|source| FlatDumpError::DirCreation {
        path: directory.to_path_buf(),
        source,
    })?;

    let full_path = directory.join(filename);
    fs::write(&full_path, content).map_err(|source| FlatDumpError::Write {
        path: full_path.clone(),
        source,
    })?;

    log::info!("Saved {}", full_path.display());
    Ok(full_path)
}

/// Save and describe the result as an [`Artifact`]
pub fn save_artifact(
    directory: &Path,
    filename: &str,
    content: &str,
    files: usize,
) -> Result<Artifact> {
    let path = save_to_path(directory, filename, content)?;
    Ok(Artifact {
        path,
        files,
        bytes: content.len() as u64,
    })
}
