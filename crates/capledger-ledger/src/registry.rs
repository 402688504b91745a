//! Reference tables for share classes and shareholders.
//!
//! Share classes and shareholders are slow-changing lookup data, not
//! events, so they live in plain JSON files beside the journal rather
//! than in the log itself. Each registry loads the whole file at open
//! time and rewrites it on change.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use capledger_core::{ShareClass, ShareClassId, Shareholder, ShareholderId};
use thiserror::Error;
use tracing::debug;

/// Errors from registry load/save and mutation.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// I/O failure reading or writing the registry file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// The registry file holds malformed JSON.
    #[error("registry file is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    /// Inserting an identifier that already exists.
    #[error("{kind} already exists: {id}")]
    Duplicate {
        /// What kind of record collided ("share class", "shareholder").
        kind: &'static str,
        /// The colliding identifier.
        id: String,
    },
}

/// Registry of share classes, persisted as `share_classes.json`.
pub struct ShareClassRegistry {
    path: PathBuf,
    entries: BTreeMap<ShareClassId, ShareClass>,
}

impl ShareClassRegistry {
    /// Opens the registry file at `path`, starting empty if it is absent.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, RegistryError> {
        let path = path.as_ref().to_path_buf();
        let entries = if path.exists() {
            let bytes = fs::read(&path)?;
            let list: Vec<ShareClass> = serde_json::from_slice(&bytes)?;
            list.into_iter().map(|c| (c.id.clone(), c)).collect()
        } else {
            BTreeMap::new()
        };
        debug!(path = %path.display(), entries = entries.len(), "share class registry opened");
        Ok(Self { path, entries })
    }

    /// Adds a new share class and persists the registry.
    pub fn insert(&mut self, class: ShareClass) -> Result<(), RegistryError> {
        if self.entries.contains_key(&class.id) {
            return Err(RegistryError::Duplicate {
                kind: "share class",
                id: class.id.to_string(),
            });
        }
        self.entries.insert(class.id.clone(), class);
        self.save()
    }

    /// Replaces an existing share class and persists the registry.
    /// Used for authorized-ceiling amendments; the caller checks the
    /// issued floor first.
    pub fn update(&mut self, class: ShareClass) -> Result<(), RegistryError> {
        self.entries.insert(class.id.clone(), class);
        self.save()
    }

    /// Looks up one share class.
    pub fn get(&self, id: &ShareClassId) -> Option<&ShareClass> {
        self.entries.get(id)
    }

    /// All share classes, ordered by identifier.
    pub fn list(&self) -> Vec<&ShareClass> {
        self.entries.values().collect()
    }

    fn save(&self) -> Result<(), RegistryError> {
        let list: Vec<&ShareClass> = self.entries.values().collect();
        fs::write(&self.path, serde_json::to_vec_pretty(&list)?)?;
        Ok(())
    }
}

/// Registry of shareholders, persisted as `shareholders.json`.
pub struct ShareholderRegistry {
    path: PathBuf,
    entries: BTreeMap<ShareholderId, Shareholder>,
}

impl ShareholderRegistry {
    /// Opens the registry file at `path`, starting empty if it is absent.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, RegistryError> {
        let path = path.as_ref().to_path_buf();
        let entries = if path.exists() {
            let bytes = fs::read(&path)?;
            let list: Vec<Shareholder> = serde_json::from_slice(&bytes)?;
            list.into_iter().map(|h| (h.id.clone(), h)).collect()
        } else {
            BTreeMap::new()
        };
        debug!(path = %path.display(), entries = entries.len(), "shareholder registry opened");
        Ok(Self { path, entries })
    }

    /// Adds a new shareholder and persists the registry.
    pub fn insert(&mut self, holder: Shareholder) -> Result<(), RegistryError> {
        if self.entries.contains_key(&holder.id) {
            return Err(RegistryError::Duplicate {
                kind: "shareholder",
                id: holder.id.to_string(),
            });
        }
        self.entries.insert(holder.id.clone(), holder);
        self.save()
    }

    /// Looks up one shareholder.
    pub fn get(&self, id: &ShareholderId) -> Option<&Shareholder> {
        self.entries.get(id)
    }

    /// All shareholders, ordered by identifier.
    pub fn list(&self) -> Vec<&Shareholder> {
        self.entries.values().collect()
    }

    fn save(&self) -> Result<(), RegistryError> {
        let list: Vec<&Shareholder> = self.entries.values().collect();
        fs::write(&self.path, serde_json::to_vec_pretty(&list)?)?;
        Ok(())
    }
}
