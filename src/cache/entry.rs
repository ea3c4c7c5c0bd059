//! Cache Entries
//!
//! One `CacheEntry` per mirrored origin file. The entry owns the cached
//! bytes on disk and the in-memory metadata record, and decides on every
//! reconciliation whether to pull from the origin, push to it, or leave both
//! sides alone.
//!
//! Metadata mutations from `read`/`append`/`write`/`reconcile` are in-memory
//! only; callers persist them with an explicit [`CacheEntry::save`].

use std::fs::{self, File, OpenOptions};
use std::io::{Read, Write};
use std::path::PathBuf;

use tracing::{debug, info};

use crate::cache::cache_id;
use crate::cache::metadata::{recent_ts, Metadata, MetadataStore};
use crate::config::CacheConfig;
use crate::error::{CacheError, Result};
use crate::origin::OriginFile;

/// Outcome of one reconciliation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncAction {
    /// Origin is newer; its content overwrites the cache
    Pull,
    /// Cache is newer; its content overwrites the origin
    Push,
    /// Both sides agree; no bytes move
    NoOp,
}

impl SyncAction {
    /// Decide the action from the recorded timestamp and the origin's live
    /// mtime
    ///
    /// `recorded` is the metadata's `modified_at`, the last point at which
    /// either side was known authoritative. The cache file's own filesystem
    /// mtime is deliberately not consulted.
    pub fn decide(recorded: f64, origin_live: f64) -> Self {
        if recorded < origin_live {
            SyncAction::Pull
        } else if recorded > origin_live {
            SyncAction::Push
        } else {
            SyncAction::NoOp
        }
    }
}

/// A single cached file and its sync state
pub struct CacheEntry<O: OriginFile> {
    id: String,
    origin: O,
    name: String,
    cache_path: PathBuf,
    metadata: Metadata,
    store: MetadataStore,
}

impl<O: OriginFile> CacheEntry<O> {
    /// Open the cache entry for an origin file
    ///
    /// Creates the backing cache file empty if it does not exist yet, then
    /// rehydrates metadata from the sidecar or builds a fresh record.
    ///
    /// # Errors
    /// `CacheCreation` if the backing file cannot be created;
    /// `CorruptMetadata` if a sidecar exists but cannot be parsed.
    pub fn new(config: &CacheConfig, origin: O) -> Result<Self> {
        let id = cache_id(origin.path());
        let cache_path = config.cache_dir.join(&id);

        debug!(id = %id, origin = %origin.path(), "Opening cache entry");

        if cache_path.is_file() {
            debug!(id = %id, "Cache file already exists");
        } else {
            info!(id = %id, path = %cache_path.display(), "Creating cache file");
            File::create(&cache_path).map_err(|source| CacheError::CacheCreation {
                path: cache_path.clone(),
                source,
            })?;
        }

        let store = MetadataStore::new(config.metadata_dir.clone());
        let metadata = match store.load(&id)? {
            Some(metadata) => metadata,
            None => store.default(&id, &origin, &cache_path)?,
        };

        let name = origin.name().to_string();

        Ok(Self {
            id,
            origin,
            name,
            cache_path,
            metadata,
            store,
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Location of the cached bytes on disk
    pub fn cache_path(&self) -> &std::path::Path {
        &self.cache_path
    }

    /// The entry's current in-memory sync state
    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    /// The origin handle this entry mirrors
    pub fn origin(&self) -> &O {
        &self.origin
    }

    /// Synchronize cache and origin, then mark both sides current
    ///
    /// Compares the recorded `modified_at` against the origin's live mtime:
    /// an older record means the origin is authoritative (pull), a newer one
    /// means the cache is (push), equal means nothing moves. In every branch
    /// `last_sync` advances to now and `modified_at` is set equal to it, so
    /// repeating the call without an intervening change never moves new
    /// bytes.
    pub fn reconcile(&mut self) -> Result<SyncAction> {
        let stat = self.origin.stat()?;
        let action = SyncAction::decide(self.metadata.modified_at, stat.modified_at);

        match action {
            SyncAction::Pull => {
                info!(id = %self.id, origin = %self.metadata.origin_path,
                    "Origin newer, overwriting cache");
                let contents = self.origin.read(None)?;
                fs::write(&self.cache_path, &contents)?;
            }
            SyncAction::Push => {
                info!(id = %self.id, origin = %self.metadata.origin_path,
                    "Cache newer, overwriting origin");
                let contents = self.read(None)?;
                self.origin.write(&contents)?;
            }
            SyncAction::NoOp => {
                debug!(id = %self.id, "Cache and origin in sync");
            }
        }

        self.metadata.last_sync = recent_ts();
        self.metadata.modified_at = self.metadata.last_sync;

        Ok(action)
    }

    /// Read up to `size` bytes from the start of the cache, or everything
    pub fn read(&self, size: Option<usize>) -> Result<Vec<u8>> {
        let mut file = File::open(&self.cache_path)?;
        let mut contents = Vec::new();
        match size {
            Some(n) => {
                file.take(n as u64).read_to_end(&mut contents)?;
            }
            None => {
                file.read_to_end(&mut contents)?;
            }
        }

        Ok(contents)
    }

    /// Append to the cache without truncating existing content
    pub fn append(&mut self, content: &[u8]) -> Result<()> {
        let mut file = OpenOptions::new().append(true).open(&self.cache_path)?;
        file.write_all(content)?;

        self.metadata.modified_at = recent_ts();

        Ok(())
    }

    /// Overwrite the cache with new content
    pub fn write(&mut self, content: &[u8]) -> Result<()> {
        fs::write(&self.cache_path, content)?;

        self.metadata.modified_at = recent_ts();

        Ok(())
    }

    /// Persist the in-memory metadata to its sidecar
    pub fn save(&self) -> Result<()> {
        self.store.save(&self.metadata)
    }
}
