//! Registry persistence: the store trait and the JSON-file implementation.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;

use super::Registry;

/// Load/save failures. Any of these is fatal to a validation run.
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("failed to read registry {}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse registry {}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to serialize registry")]
    Serialize(#[source] serde_json::Error),
    #[error("failed to write registry {}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Whole-registry load and save.
pub trait RegistryStore {
    fn load(&self) -> Result<Registry, RegistryError>;
    fn save(&self, registry: &Registry) -> Result<(), RegistryError>;
}

/// Registry kept as a pretty-printed JSON array on disk (e.g. `data/blogs.json`).
#[derive(Debug, Clone)]
pub struct JsonRegistryStore {
    path: PathBuf,
}

impl JsonRegistryStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn write_err(&self, source: io::Error) -> RegistryError {
        RegistryError::Write {
            path: self.path.clone(),
            source,
        }
    }
}

impl RegistryStore for JsonRegistryStore {
    fn load(&self) -> Result<Registry, RegistryError> {
        let bytes = fs::read(&self.path).map_err(|source| RegistryError::Read {
            path: self.path.clone(),
            source,
        })?;
        serde_json::from_slice(&bytes).map_err(|source| RegistryError::Parse {
            path: self.path.clone(),
            source,
        })
    }

    /// Writes to a temp file next to the registry, then renames it over the original,
    /// so a failed save leaves the previous file intact.
    fn save(&self, registry: &Registry) -> Result<(), RegistryError> {
        let json = serde_json::to_string_pretty(registry).map_err(RegistryError::Serialize)?;

        let dir = match self.path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };
        let mut tmp = tempfile::NamedTempFile::new_in(dir).map_err(|e| self.write_err(e))?;
        tmp.write_all(json.as_bytes())
            .map_err(|e| self.write_err(e))?;
        tmp.as_file().sync_all().map_err(|e| self.write_err(e))?;
        if let Ok(meta) = fs::metadata(&self.path) {
            // Keep the original file mode rather than the temp file's 0600.
            let _ = tmp.as_file().set_permissions(meta.permissions());
        }
        tmp.persist(&self.path).map_err(|e| self.write_err(e.error))?;

        tracing::debug!(path = %self.path.display(), entries = registry.len(), "registry saved");
        Ok(())
    }
}
