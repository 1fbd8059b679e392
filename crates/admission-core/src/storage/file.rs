//! # File-backed Session Store
//!
//! Keeps every session key in one JSON object on disk:
//!
//! ```json
//! { "admissionForm": "{\"fullName\":\"Asha\"}" }
//! ```
//!
//! A missing file reads as an empty store. Each write rewrites the file
//! through a sibling temporary file and a rename, so a crash mid-write
//! leaves the previous contents intact.

use super::SessionStore;
use crate::AdmissionError;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Maximum size of the session file (1 MB).
///
/// The record is a handful of short strings; anything larger is not ours.
const MAX_FILE_SIZE: u64 = 1024 * 1024;

/// A [`SessionStore`] persisted as a single JSON file.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    /// Use the file at `path`. The file is created on first write.
    #[must_use]
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_entries(&self) -> Result<BTreeMap<String, String>, AdmissionError> {
        let metadata = match std::fs::metadata(&self.path) {
            Ok(m) => m,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(e) => return Err(AdmissionError::Storage(format!("Stat session file: {}", e))),
        };

        if metadata.len() > MAX_FILE_SIZE {
            return Err(AdmissionError::Storage(format!(
                "Session file size {} bytes exceeds maximum allowed {} bytes",
                metadata.len(),
                MAX_FILE_SIZE
            )));
        }

        let data = std::fs::read(&self.path)
            .map_err(|e| AdmissionError::Storage(format!("Read session file: {}", e)))?;
        if data.is_empty() {
            return Ok(BTreeMap::new());
        }

        serde_json::from_slice(&data)
            .map_err(|e| AdmissionError::Serialization(format!("Parse session file: {}", e)))
    }

    fn write_entries(&self, entries: &BTreeMap<String, String>) -> Result<(), AdmissionError> {
        let data = serde_json::to_vec_pretty(entries)
            .map_err(|e| AdmissionError::Serialization(e.to_string()))?;

        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);

        std::fs::write(&tmp, &data)
            .map_err(|e| AdmissionError::Storage(format!("Write session file: {}", e)))?;
        std::fs::rename(&tmp, &self.path)
            .map_err(|e| AdmissionError::Storage(format!("Replace session file: {}", e)))
    }
}

impl SessionStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, AdmissionError> {
        Ok(self.read_entries()?.remove(key))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), AdmissionError> {
        let mut entries = self.read_entries()?;
        entries.insert(key.to_string(), value.to_string());
        self.write_entries(&entries)
    }

    fn remove(&mut self, key: &str) -> Result<(), AdmissionError> {
        let mut entries = self.read_entries()?;
        if entries.remove(key).is_none() {
            return Ok(());
        }
        self.write_entries(&entries)
    }
}
