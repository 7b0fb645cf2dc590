//! # Term Store
//!
//! Flat JSON file holding the whole glossary.
//!
//! ## Requirements
//!
//! - Case-insensitive lookups without a secondary index
//! - At most one entry per lower-cased name
//! - Small shared dataset, a few hundred terms at most
//! - Missing file means an empty glossary, not an error
//!
//! ## Implementation
//!
//! - One JSON object: lower-cased name -> `{name, description}`
//! - Loaded from disk on every operation, nothing cached between requests
//! - Writes rewrite the full file through a temp file + rename
//! - A per-process mutex serializes operations, so requests in this process never lose updates
//! - Separate processes sharing the file still race, last write wins
use std::{
    io::{self, ErrorKind},
    path::{Path, PathBuf},
};

use terms::{Dictionary, Entry, term_key};
use thiserror::Error;
use tokio::{fs, sync::Mutex};
use tracing::{debug, error, info, warn};

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Invalid password")]
    Unauthorized,

    #[error("Name and description are required")]
    InvalidInput,

    #[error("No entry named {0:?}")]
    NotFound(String),

    #[error("Storage error: {0}")]
    Storage(#[from] io::Error),

    #[error("Corrupt dictionary file: {0}")]
    Corrupt(#[from] serde_json::Error),
}

/// Result of a successful upsert.
///
/// `persisted` is false when the entry was accepted but the file rewrite
/// failed. The caller decides whether that is visible to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Upserted {
    pub entry: Entry,
    pub persisted: bool,
}

pub struct TermStore {
    path: PathBuf,
    admin_password: String,
    lock: Mutex<()>,
}

impl TermStore {
    pub fn new(path: impl Into<PathBuf>, admin_password: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            admin_password: admin_password.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub async fn get_all(&self) -> Vec<Entry> {
        let _guard = self.lock.lock().await;

        self.load_or_empty().await.into_values().collect()
    }

    pub async fn get_by_key(&self, name: &str) -> Result<Entry, StoreError> {
        let _guard = self.lock.lock().await;

        self.load_or_empty()
            .await
            .remove(&term_key(name))
            .ok_or_else(|| StoreError::NotFound(name.to_string()))
    }

    pub fn verify_password(&self, supplied: Option<&str>) -> Result<(), StoreError> {
        match supplied {
            Some(password) if password == self.admin_password => Ok(()),
            _ => Err(StoreError::Unauthorized),
        }
    }

    pub async fn upsert(
        &self,
        name: Option<&str>,
        description: Option<&str>,
        supplied_password: Option<&str>,
    ) -> Result<Upserted, StoreError> {
        self.verify_password(supplied_password)?;

        let name = name.map(str::trim).unwrap_or_default();
        let description = description.map(str::trim).unwrap_or_default();

        if name.is_empty() || description.is_empty() {
            return Err(StoreError::InvalidInput);
        }

        let entry = Entry::new(name, description);

        let _guard = self.lock.lock().await;

        let mut dictionary = self.load_or_empty().await;
        dictionary.insert(entry.key(), entry.clone());

        let persisted = match self.save(&dictionary).await {
            Ok(()) => {
                info!("Stored {:?} ({} entries)", entry.name, dictionary.len());
                true
            }
            Err(e) => {
                error!("Error saving dictionary to {}: {e}", self.path.display());
                false
            }
        };

        Ok(Upserted { entry, persisted })
    }

    /// Degrades every read failure to an empty glossary.
    async fn load_or_empty(&self) -> Dictionary {
        match self.load().await {
            Ok(dictionary) => dictionary,
            Err(StoreError::Storage(e)) if e.kind() == ErrorKind::NotFound => {
                debug!("{} does not exist yet, treating as empty", self.path.display());
                Dictionary::new()
            }
            Err(e) => {
                warn!("Error loading dictionary from {}: {e}", self.path.display());
                Dictionary::new()
            }
        }
    }

    async fn load(&self) -> Result<Dictionary, StoreError> {
        let data = fs::read_to_string(&self.path).await?;

        Ok(serde_json::from_str(&data)?)
    }

    async fn save(&self, dictionary: &Dictionary) -> Result<(), StoreError> {
        let data = serde_json::to_string_pretty(dictionary)?;

        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");

        fs::write(&tmp, data).await?;
        fs::rename(&tmp, &self.path).await?;

        Ok(())
    }
}
