//! File I/O utilities with atomic writes
//!
//! Provides safe file operations that won't leave half-written files behind.

use std::fs;
use std::io::{ErrorKind, Write};
use std::path::Path;

use serde::de::DeserializeOwned;
use tempfile::NamedTempFile;

use crate::error::{CredsyncError, CredsyncResult};

/// Read JSON from a file, returning a default value if file doesn't exist
pub fn read_json<T, P>(path: P) -> CredsyncResult<T>
where
    T: DeserializeOwned + Default,
    P: AsRef<Path>,
{
    let path = path.as_ref();

    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(T::default()),
        Err(e) => {
            return Err(CredsyncError::Io(format!(
                "Failed to read {}: {}",
                path.display(),
                e
            )))
        }
    };

    serde_json::from_str(&contents)
        .map_err(|e| CredsyncError::Json(format!("Failed to parse {}: {}", path.display(), e)))
}

/// Read a whole file as bytes, reporting absence as missing input
pub fn read_bytes_required<P: AsRef<Path>>(path: P) -> CredsyncResult<Vec<u8>> {
    let path = path.as_ref();

    fs::read(path).map_err(|e| {
        if e.kind() == ErrorKind::NotFound {
            CredsyncError::MissingInput(format!("{} not found", path.display()))
        } else {
            CredsyncError::Io(format!("Failed to read {}: {}", path.display(), e))
        }
    })
}

/// Write bytes to a file atomically (write to temp, then rename)
///
/// The temporary file lives in the destination directory so the rename never
/// crosses filesystems. Missing parent directories are created.
pub fn write_atomic<P: AsRef<Path>>(path: P, contents: &[u8]) -> CredsyncResult<()> {
    let path = path.as_ref();

    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    fs::create_dir_all(parent).map_err(|e| {
        CredsyncError::Io(format!(
            "Failed to create directory {}: {}",
            parent.display(),
            e
        ))
    })?;

    let mut temp = NamedTempFile::new_in(parent)
        .map_err(|e| CredsyncError::Io(format!("Failed to create temp file: {}", e)))?;

    temp.write_all(contents)
        .map_err(|e| CredsyncError::Io(format!("Failed to write data: {}", e)))?;

    temp.flush()
        .map_err(|e| CredsyncError::Io(format!("Failed to flush data: {}", e)))?;

    // Sync to disk before rename
    temp.as_file()
        .sync_all()
        .map_err(|e| CredsyncError::Io(format!("Failed to sync data: {}", e)))?;

    // The temp file is removed on drop if persisting fails
    temp.persist(path).map_err(|e| {
        CredsyncError::Io(format!(
            "Failed to move temp file into {}: {}",
            path.display(),
            e.error
        ))
    })?;

    Ok(())
}

/// Write text to a file atomically
pub fn write_text_atomic<P: AsRef<Path>>(path: P, contents: &str) -> CredsyncResult<()> {
    write_atomic(path, contents.as_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use tempfile::TempDir;

    #[derive(Debug, PartialEq, Deserialize, Default)]
    struct TestData {
        name: String,
        value: i32,
    }

    #[test]
    fn test_read_nonexistent_returns_default() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nonexistent.json");

        let data: TestData = read_json(&path).unwrap();
        assert_eq!(data, TestData::default());
    }

    #[test]
    fn test_read_invalid_json_fails() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("bad.json");
        fs::write(&path, "not json at all").unwrap();

        let result: CredsyncResult<TestData> = read_json(&path);
        assert!(matches!(result, Err(CredsyncError::Json(_))));
    }

    #[test]
    fn test_write_and_read_bytes() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("blob.bin");

        write_atomic(&path, &[0, 1, 2, 255]).unwrap();
        assert_eq!(read_bytes_required(&path).unwrap(), vec![0, 1, 2, 255]);
    }

    #[test]
    fn test_write_overwrites_and_leaves_no_temp_files() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join(".env");

        write_text_atomic(&path, "A=1").unwrap();
        write_text_atomic(&path, "A=2").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "A=2");
        let entries: Vec<_> = fs::read_dir(temp_dir.path()).unwrap().collect();
        assert_eq!(entries.len(), 1);
    }

    #[test]
    fn test_write_creates_parent_directories() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("dir").join("index.md");

        write_text_atomic(&path, "# Index").unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_read_bytes_required_missing() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join(".credentials.enc");

        let err = read_bytes_required(&path).unwrap_err();
        assert!(matches!(err, CredsyncError::MissingInput(_)));
        assert!(err.to_string().contains(".credentials.enc not found"));
    }
}
