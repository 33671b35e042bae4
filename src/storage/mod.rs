// src/storage/mod.rs
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::extractors::ExtractionResult;
use crate::utils::error::StorageError;

/// Reads the whole log into memory. Bytes that aren't valid UTF-8 are
/// replaced rather than rejected.
pub fn read_log(path: &Path) -> Result<String, StorageError> {
    let bytes = fs::read(path).map_err(|source| StorageError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::debug!("Read {} bytes from {}", bytes.len(), path.display());
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

pub struct StorageManager {
    base_dir: PathBuf,
}

impl StorageManager {
    /// Creates a new StorageManager with the specified base directory,
    /// creating the directory if it doesn't exist yet.
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self, StorageError> {
        let base_path = base_dir.as_ref().to_path_buf();

        fs::create_dir_all(&base_path).map_err(|source| StorageError::CreateDir {
            path: base_path.clone(),
            source,
        })?;

        Ok(Self { base_dir: base_path })
    }

    pub fn section_path(&self, result: &ExtractionResult) -> PathBuf {
        self.base_dir.join(format!("{}.txt", result.option.display_name()))
    }

    /// Writes the section text verbatim to `<DisplayName>.txt`, replacing any
    /// previous file. Empty sections still get a (zero-byte) file.
    pub fn save_section(&self, result: &ExtractionResult) -> Result<PathBuf, StorageError> {
        let file_path = self.section_path(result);

        let mut file = fs::File::create(&file_path).map_err(|source| StorageError::CreateFile {
            path: file_path.clone(),
            source,
        })?;

        file.write_all(result.text.as_bytes())
            .and_then(|_| file.flush())
            .map_err(|source| StorageError::Write {
                path: file_path.clone(),
                source,
            })?;

        tracing::info!("Saved section to {}", file_path.display());

        Ok(file_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::OptionId;

    #[test]
    fn test_new_creates_directory_idempotently() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join("out");

        StorageManager::new(&dir).unwrap();
        assert!(dir.is_dir());
        StorageManager::new(&dir).unwrap();
        assert!(dir.is_dir());
    }

    #[test]
    fn test_save_section_writes_verbatim() {
        let tmp = tempfile::tempdir().unwrap();
        let storage = StorageManager::new(tmp.path()).unwrap();
        let result = ExtractionResult { option: OptionId::Errors, text: "SIM_ERROR: x\n\tmore\n".to_string() };

        let path = storage.save_section(&result).unwrap();
        assert_eq!(path, tmp.path().join("Errors.txt"));
        assert_eq!(fs::read_to_string(&path).unwrap(), "SIM_ERROR: x\n\tmore\n");
    }

    #[test]
    fn test_save_section_truncates_existing_file() {
        let tmp = tempfile::tempdir().unwrap();
        fs::write(tmp.path().join("Warnings.txt"), "stale content").unwrap();
        let storage = StorageManager::new(tmp.path()).unwrap();

        let result = ExtractionResult { option: OptionId::Warnings, text: String::new() };
        let path = storage.save_section(&result).unwrap();
        assert_eq!(fs::metadata(path).unwrap().len(), 0);
    }

    #[test]
    fn test_read_log_reports_missing_file() {
        let tmp = tempfile::tempdir().unwrap();
        let err = read_log(&tmp.path().join("absent.log")).unwrap_err();
        match err {
            StorageError::Read { source, .. } => assert_eq!(source.kind(), std::io::ErrorKind::NotFound),
            other => panic!("expected Read error, got {:?}", other),
        }
    }

    #[test]
    fn test_read_log_tolerates_invalid_utf8() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("log.txt");
        fs::write(&path, b"SIM_ERROR: \xff\n").unwrap();
        assert!(read_log(&path).unwrap().starts_with("SIM_ERROR: "));
    }
}
