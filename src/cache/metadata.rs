//! Metadata Sidecars
//!
//! One JSON sidecar per cache identifier, tracking the sync state of a single
//! cached file. Sidecars are written atomically (temp file + rename) so a
//! crash mid-save never leaves a truncated record.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{CacheError, Result};
use crate::origin::{system_time_secs, OriginFile};

/// Kept slightly behind the wall clock so a timestamp recorded here always
/// compares strictly older than an origin stat taken in the same tick.
const SYNC_EPSILON_SECS: f64 = 0.001;

/// Current time in epoch seconds, minus the sync epsilon
pub(crate) fn recent_ts() -> f64 {
    system_time_secs(SystemTime::now()) - SYNC_EPSILON_SECS
}

/// Sync state of one cached file
///
/// All timestamps are epoch seconds with sub-second precision.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Metadata {
    /// Identifier shared with the cache file
    pub id: String,
    /// Absolute path of the origin file
    pub origin_path: String,
    /// The origin file's display name
    pub name: String,
    /// When the cache file was created; set once
    pub created_at: f64,
    /// When the cache was last reconciled with its origin; 0 if never
    pub last_sync: f64,
    /// Last known point at which either side held the authoritative content
    pub modified_at: f64,
}

/// Loads and persists metadata sidecars under one directory
#[derive(Debug, Clone)]
pub struct MetadataStore {
    metadata_dir: PathBuf,
}

impl MetadataStore {
    pub fn new(metadata_dir: PathBuf) -> Self {
        Self { metadata_dir }
    }

    /// Path of the sidecar for an identifier
    pub fn sidecar_path(&self, id: &str) -> PathBuf {
        self.metadata_dir.join(format!("{}.json", id))
    }

    /// Load the sidecar for `id`, if one exists
    ///
    /// Returns `Ok(None)` when no sidecar has been saved yet. A sidecar that
    /// exists but cannot be parsed is a `CorruptMetadata` error; the caller
    /// decides whether to fall back to a fresh record or abort.
    pub fn load(&self, id: &str) -> Result<Option<Metadata>> {
        let path = self.sidecar_path(id);
        if !path.is_file() {
            return Ok(None);
        }

        let raw = fs::read_to_string(&path)?;
        let metadata =
            serde_json::from_str(&raw).map_err(|source| CacheError::CorruptMetadata {
                path: path.clone(),
                source,
            })?;

        debug!(id = id, path = %path.display(), "Loaded metadata sidecar");

        Ok(Some(metadata))
    }

    /// Build the initial record for a freshly created cache file
    ///
    /// `created_at` comes from the cache file's own live filesystem stat.
    /// `last_sync` and `modified_at` start at 0: the entry has never been
    /// synced, so any origin mtime compares newer and the first
    /// reconciliation pulls.
    pub fn default<O: OriginFile>(
        &self,
        id: &str,
        origin: &O,
        cache_path: &Path,
    ) -> Result<Metadata> {
        let stat = fs::metadata(cache_path)?;
        let fallback = system_time_secs(stat.modified()?);
        let created_at = stat
            .created()
            .map(system_time_secs)
            .unwrap_or(fallback);

        Ok(Metadata {
            id: id.to_string(),
            origin_path: origin.path().to_string(),
            name: origin.name().to_string(),
            created_at,
            last_sync: 0.0,
            modified_at: 0.0,
        })
    }

    /// Write the sidecar for `metadata.id`, replacing any prior contents
    ///
    /// Writes to a temp file in the same directory and renames into place.
    pub fn save(&self, metadata: &Metadata) -> Result<()> {
        let path = self.sidecar_path(&metadata.id);
        let encoded =
            serde_json::to_vec(metadata).map_err(CacheError::Serialization)?;

        let mut tmp = tempfile::NamedTempFile::new_in(&self.metadata_dir)?;
        tmp.write_all(&encoded)?;
        tmp.persist(&path).map_err(|e| CacheError::Io(e.error))?;

        debug!(
            id = %metadata.id,
            origin = %metadata.origin_path,
            path = %path.display(),
            "Saved metadata sidecar"
        );

        Ok(())
    }
}
