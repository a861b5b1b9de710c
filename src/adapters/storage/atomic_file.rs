use std::fs;
use std::io::Write;
use std::path::Path;

use tempfile::NamedTempFile;

use crate::core::errors::{KeystoreError, Result};

/// Read a keystore source in one go; the handle is closed before returning.
pub fn read_source(path: &Path) -> Result<Vec<u8>> {
    let unreadable = |reason: String| KeystoreError::UnreadableSource {
        path: path.to_path_buf(),
        reason,
    };

    if !path.exists() {
        return Err(unreadable("file does not exist".into()));
    }
    if !path.is_file() {
        return Err(unreadable("not a regular file".into()));
    }
    fs::read(path).map_err(|e| unreadable(e.to_string()))
}

/// Replace `path` with `bytes` without ever exposing a partial file.
///
/// The data goes to a temporary file in the destination directory, is
/// flushed to disk, then renamed over the target. On any failure the
/// temporary file is removed and the target is untouched.
pub fn write_atomically(path: &Path, bytes: &[u8]) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let failure = |source: std::io::Error| KeystoreError::WriteFailure {
        path: path.to_path_buf(),
        source,
    };

    let mut tmp = NamedTempFile::new_in(dir).map_err(failure)?;
    tmp.write_all(bytes).map_err(failure)?;
    tmp.as_file().sync_all().map_err(failure)?;
    tmp.persist(path).map_err(|e| failure(e.error))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_source_is_unreadable() {
        let dir = tempfile::tempdir().unwrap();
        let result = read_source(&dir.path().join("absent.jks"));
        assert!(matches!(
            result,
            Err(KeystoreError::UnreadableSource { ref reason, .. }) if reason.contains("does not exist")
        ));
    }

    #[test]
    fn directory_source_is_unreadable() {
        let dir = tempfile::tempdir().unwrap();
        let result = read_source(dir.path());
        assert!(matches!(result, Err(KeystoreError::UnreadableSource { .. })));
    }

    #[test]
    fn write_replaces_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("store.p12");
        std::fs::write(&target, b"old").unwrap();

        write_atomically(&target, b"new contents").unwrap();

        assert_eq!(std::fs::read(&target).unwrap(), b"new contents");
        let leftovers = std::fs::read_dir(dir.path()).unwrap().count();
        assert_eq!(leftovers, 1);
    }

    #[test]
    fn write_into_missing_directory_fails_cleanly() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("no-such-dir").join("store.p12");

        let result = write_atomically(&target, b"data");

        assert!(matches!(result, Err(KeystoreError::WriteFailure { .. })));
        assert!(!target.exists());
    }
}
