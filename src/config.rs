//! Cache Configuration
//!
//! Directory layout for cached bytes and metadata sidecars. Passed explicitly
//! into constructors so tests can point the cache at an isolated directory
//! instead of sharing process-wide paths.

use std::fs;
use std::path::PathBuf;

use tracing::info;

use crate::error::Result;

/// Where cached files and their metadata sidecars live
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// Directory holding one raw-bytes file per cache identifier
    pub cache_dir: PathBuf,
    /// Directory holding one JSON sidecar per cache identifier
    pub metadata_dir: PathBuf,
}

impl CacheConfig {
    /// Create a config rooted at the platform cache directory
    pub fn new() -> Self {
        let base = dirs::cache_dir()
            .unwrap_or_else(|| PathBuf::from("/tmp"))
            .join("mirrorcache");

        Self::with_dirs(base.join("cache"), base.join("metadata"))
    }

    /// Create a config with explicit directories
    ///
    /// # Arguments
    /// * `cache_dir` - directory for cached file contents
    /// * `metadata_dir` - directory for metadata sidecars
    pub fn with_dirs(cache_dir: PathBuf, metadata_dir: PathBuf) -> Self {
        Self {
            cache_dir,
            metadata_dir,
        }
    }

    /// Ensure both directories exist, creating them if needed
    pub fn ensure_dirs(&self) -> Result<()> {
        fs::create_dir_all(&self.cache_dir)?;
        fs::create_dir_all(&self.metadata_dir)?;

        info!(
            cache_dir = %self.cache_dir.display(),
            metadata_dir = %self.metadata_dir.display(),
            "Cache directories ready"
        );

        Ok(())
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self::new()
    }
}
