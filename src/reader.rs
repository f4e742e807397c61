/*!
 * Reading source file content
 */

use std::fs;
use std::path::Path;

use crate::error::{FlatDumpError, Result};

/// Read a file's entire content as UTF-8 text
///
/// Missing files, permission problems and invalid UTF-8 all come back as
/// [`FlatDumpError::Read`] carrying the path, so callers can skip the file
/// and keep going with the rest of their batch.
pub fn read_content(path: &Path) -> Result<String> {
    log::trace!("Reading {}", path.display());
    fs::read_to_string(path).map_err(|source| FlatDumpError::Read {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use tempfile::tempdir;

    #[test]
    fn test_reads_utf8() -> io::Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("Hello.java");
        fs::write(&path, "class Hello { String s = \"héllo\"; }")?;

        assert_eq!(
            read_content(&path).unwrap(),
            "class Hello { String s = \"héllo\"; }"
        );
        Ok(())
    }

    #[test]
    fn test_invalid_utf8_is_read_error() -> io::Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("Bad.java");
        fs::write(&path, [0x63, 0x6c, 0xff, 0xfe, 0x00])?;

        match read_content(&path) {
            Err(FlatDumpError::Read { path: p, source }) => {
                assert_eq!(p, path);
                assert_eq!(source.kind(), io::ErrorKind::InvalidData);
            }
            other => panic!("expected read error, got {:?}", other),
        }
        Ok(())
    }

    #[test]
    fn test_missing_file_is_read_error() {
        let err = read_content(Path::new("/definitely/not/here/X.java")).unwrap_err();
        assert!(matches!(err, FlatDumpError::Read { .. }));
    }
}
