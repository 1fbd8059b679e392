//! # Configuration
//!
//! Optional TOML file supplying defaults for the global CLI flags.
//!
//! ```toml
//! # admission.toml
//! backend = "file"
//! store = "/tmp/admission-session.json"
//! ```
//!
//! Precedence: command-line flag, then config file, then built-in default.

use admission_core::{AdmissionError, FileStore, MemoryStore, RedbStore, SessionStore};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Config file read when `--config` is not given, if it exists.
pub const DEFAULT_CONFIG_FILE: &str = "admission.toml";

/// Store path used when neither flag nor config names one.
pub const DEFAULT_STORE_PATH: &str = "admission.db";

/// Maximum config file size (64 KB).
const MAX_CONFIG_FILE_SIZE: u64 = 64 * 1024;

/// Session store backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    /// One JSON file of key/value pairs
    File,
    /// redb embedded database
    #[default]
    Redb,
    /// In-process only; nothing survives the command
    Memory,
}

impl Backend {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Backend::File => "file",
            Backend::Redb => "redb",
            Backend::Memory => "memory",
        }
    }
}

/// Contents of the config file. Every key is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub backend: Option<Backend>,
    pub store: Option<PathBuf>,
}

impl FileConfig {
    /// Parse config text.
    pub fn parse(text: &str) -> Result<Self, AdmissionError> {
        toml::from_str(text).map_err(|e| AdmissionError::Config(e.to_string()))
    }

    /// Load the config file.
    ///
    /// An explicit path must exist. Without one, [`DEFAULT_CONFIG_FILE`] is
    /// read if present and an empty config is used otherwise.
    pub fn load(explicit: Option<&Path>) -> Result<Self, AdmissionError> {
        let path = match explicit {
            Some(p) => p.to_path_buf(),
            None => {
                let default = PathBuf::from(DEFAULT_CONFIG_FILE);
                if !default.is_file() {
                    return Ok(Self::default());
                }
                default
            }
        };

        let metadata = std::fs::metadata(&path).map_err(|e| {
            AdmissionError::Config(format!("Cannot read config '{}': {}", path.display(), e))
        })?;
        if metadata.len() > MAX_CONFIG_FILE_SIZE {
            return Err(AdmissionError::Config(format!(
                "Config file size {} bytes exceeds maximum allowed {} bytes",
                metadata.len(),
                MAX_CONFIG_FILE_SIZE
            )));
        }

        let text = std::fs::read_to_string(&path).map_err(|e| {
            AdmissionError::Config(format!("Cannot read config '{}': {}", path.display(), e))
        })?;
        tracing::debug!(path = %path.display(), "loaded config file");
        Self::parse(&text)
    }
}

/// Fully resolved settings for one invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub backend: Backend,
    pub store: PathBuf,
}

impl Settings {
    /// Merge command-line flags over the config file.
    #[must_use]
    pub fn resolve(
        backend_flag: Option<Backend>,
        store_flag: Option<PathBuf>,
        file: FileConfig,
    ) -> Self {
        Self {
            backend: backend_flag.or(file.backend).unwrap_or_default(),
            store: store_flag
                .or(file.store)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_STORE_PATH)),
        }
    }

    /// Open the configured session store.
    pub fn open_store(&self) -> Result<Box<dyn SessionStore>, AdmissionError> {
        tracing::debug!(backend = self.backend.as_str(), store = %self.store.display(), "opening session store");
        let store: Box<dyn SessionStore> = match self.backend {
            Backend::File => Box::new(FileStore::new(&self.store)),
            Backend::Redb => Box::new(RedbStore::open(&self.store)?),
            Backend::Memory => Box::new(MemoryStore::new()),
        };
        Ok(store)
    }
}
