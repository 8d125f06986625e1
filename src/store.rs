//! Config Store Accessor and the process-wide content cache.
//!
//! The site is driven by four read-only JSON resources published by the
//! admin backend. [`ContentCache`] keeps the last successfully resolved value
//! of each one; every resolver reads from it by reference, never from the
//! network.
//!
//! ## Lifecycle
//!
//! ```text
//! ContentCache::default()        every slot empty ("no data yet")
//!   └─ refetch(&source)          the only invalidation path
//!        ├─ Ok(value)   → slot replaced, generation bumped (last resolved wins)
//!        └─ Err(_)      → slot keeps its last-known value, warning logged
//! ```
//!
//! Rendering before the first fetch is valid: resolvers see empty slots and
//! substitute their defaults.
//!
//! ## Sources
//!
//! Fetch plumbing lives behind [`SnapshotSource`]. The crate ships
//! [`DirSource`], which reads a directory of JSON files named after the
//! endpoints:
//!
//! ```text
//! snapshot/
//! ├── config.json             # GET /api/admin/config
//! ├── contact-settings.json   # GET /api/contact-settings
//! ├── footer-settings.json    # GET /api/footer-settings
//! └── photo-carousel.json     # GET /api/photo-carousel
//! ```

use crate::types::ConfigEntry;
use serde_json::Value;
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("resource not found: {0}")]
    Missing(PathBuf),
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// One of the read-only endpoints the site consumes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resource {
    Config,
    ContactSettings,
    FooterSettings,
    PhotoCarousel,
}

impl Resource {
    pub const ALL: [Resource; 4] = [
        Resource::Config,
        Resource::ContactSettings,
        Resource::FooterSettings,
        Resource::PhotoCarousel,
    ];

    pub fn endpoint(self) -> &'static str {
        match self {
            Resource::Config => "/api/admin/config",
            Resource::ContactSettings => "/api/contact-settings",
            Resource::FooterSettings => "/api/footer-settings",
            Resource::PhotoCarousel => "/api/photo-carousel",
        }
    }

    /// File name used by [`DirSource`].
    pub fn file_name(self) -> &'static str {
        match self {
            Resource::Config => "config.json",
            Resource::ContactSettings => "contact-settings.json",
            Resource::FooterSettings => "footer-settings.json",
            Resource::PhotoCarousel => "photo-carousel.json",
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.endpoint())
    }
}

/// Read-only view of the `key → value` configuration entries.
///
/// Built from the ordered entry list. When a key appears more than once the
/// first occurrence wins for every lookup; [`entries`](Self::entries) keeps
/// the original sequence.
#[derive(Debug, Clone, Default)]
pub struct ConfigStore {
    entries: Vec<ConfigEntry>,
    index: HashMap<String, usize>,
}

impl ConfigStore {
    pub fn from_entries(entries: Vec<ConfigEntry>) -> Self {
        let mut index = HashMap::with_capacity(entries.len());
        for (i, entry) in entries.iter().enumerate() {
            index.entry(entry.key.clone()).or_insert(i);
        }
        Self { entries, index }
    }

    /// Decode the raw `/api/admin/config` payload.
    ///
    /// A payload that is not an array yields an empty store; array elements
    /// without a string `key` are skipped.
    pub fn from_value(value: &Value) -> Self {
        let Some(items) = value.as_array() else {
            if !value.is_null() {
                warn!("config payload is not an array, treating as empty");
            }
            return Self::default();
        };
        let entries = items
            .iter()
            .filter_map(|item| match serde_json::from_value::<ConfigEntry>(item.clone()) {
                Ok(entry) => Some(entry),
                Err(e) => {
                    warn!(error = %e, "skipping malformed config entry");
                    None
                }
            })
            .collect();
        Self::from_entries(entries)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.index.get(key).map(|&i| &self.entries[i].value)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    /// First entry, in sequence order, whose key is any of `keys`.
    pub fn first_of(&self, keys: &[&str]) -> Option<&Value> {
        self.entries
            .iter()
            .find(|e| keys.contains(&e.key.as_str()))
            .map(|e| &e.value)
    }

    pub fn entries(&self) -> &[ConfigEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Seam standing in for the network fetch collaborator.
pub trait SnapshotSource {
    fn fetch(&self, resource: Resource) -> Result<Value, FetchError>;
}

/// Reads each resource from a JSON file in a directory.
#[derive(Debug, Clone)]
pub struct DirSource {
    root: PathBuf,
}

impl DirSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl SnapshotSource for DirSource {
    fn fetch(&self, resource: Resource) -> Result<Value, FetchError> {
        let path = self.root.join(resource.file_name());
        let content = match fs::read_to_string(&path) {
            Ok(c) => c,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(FetchError::Missing(path));
            }
            Err(e) => return Err(e.into()),
        };
        Ok(serde_json::from_str(&content)?)
    }
}

#[derive(Debug, Clone, Default)]
struct Slot {
    raw: Value,
    /// Revision of the cache when this slot was last replaced; 0 = never loaded.
    generation: u64,
}

/// Last-known value of every resource.
#[derive(Debug, Clone, Default)]
pub struct ContentCache {
    slots: [Slot; 4],
    config: ConfigStore,
    revision: u64,
}

impl ContentCache {
    /// Fetch every resource from `source` and apply the outcomes.
    ///
    /// Returns the number of resources that failed to resolve.
    pub fn refetch(&mut self, source: &dyn SnapshotSource) -> usize {
        Resource::ALL
            .into_iter()
            .filter(|&resource| !self.apply(resource, source.fetch(resource)))
            .count()
    }

    /// Apply one fetch outcome. Returns `true` when the slot was replaced.
    ///
    /// There is at most one request in flight per resource, so the response
    /// applied last is the freshest one.
    pub fn apply(&mut self, resource: Resource, outcome: Result<Value, FetchError>) -> bool {
        match outcome {
            Ok(value) => {
                self.revision += 1;
                if resource == Resource::Config {
                    self.config = ConfigStore::from_value(&value);
                }
                let slot = &mut self.slots[resource.index()];
                slot.raw = value;
                slot.generation = self.revision;
                debug!(%resource, generation = self.revision, "cache slot replaced");
                true
            }
            Err(FetchError::Missing(path)) => {
                debug!(%resource, path = %path.display(), "resource absent, keeping last-known value");
                false
            }
            Err(e) => {
                warn!(%resource, error = %e, "fetch failed, keeping last-known value");
                false
            }
        }
    }

    pub fn config(&self) -> &ConfigStore {
        &self.config
    }

    /// Raw payload of a resource; `Value::Null` until it first resolves.
    pub fn raw(&self, resource: Resource) -> &Value {
        &self.slots[resource.index()].raw
    }

    pub fn is_loaded(&self, resource: Resource) -> bool {
        self.slots[resource.index()].generation > 0
    }

    pub fn generation(&self, resource: Resource) -> u64 {
        self.slots[resource.index()].generation
    }

    /// SHA-256 over every slot's payload, as a hex string.
    ///
    /// Stable for identical content regardless of when it was fetched, so the
    /// generator can skip re-rendering an unchanged snapshot.
    pub fn fingerprint(&self) -> String {
        let mut hasher = Sha256::new();
        for resource in Resource::ALL {
            hasher.update(resource.endpoint().as_bytes());
            hasher.update(b"\0");
            hasher.update(self.raw(resource).to_string().as_bytes());
            hasher.update(b"\0");
        }
        format!("{:x}", hasher.finalize())
    }
}
