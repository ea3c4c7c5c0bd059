//! mirrorcache - content-addressed local mirror of remote files
//!
//! Each origin file (local, or remote behind any transport implementing
//! [`OriginFile`]) maps to a cache entry addressed by a hash of its absolute
//! path. Reads and writes go against the local copy; [`CacheEntry::reconcile`]
//! moves bytes between cache and origin by comparing the recorded sync state
//! with the origin's live modification time.
//!
//! ```no_run
//! use mirrorcache::{CacheConfig, CacheEntry, LocalFile};
//!
//! # fn main() -> mirrorcache::Result<()> {
//! let config = CacheConfig::new();
//! config.ensure_dirs()?;
//!
//! let origin = LocalFile::new("/srv/files/report.txt");
//! let mut entry = CacheEntry::new(&config, origin)?;
//! entry.reconcile()?;
//!
//! let contents = entry.read(None)?;
//! entry.append(b"\nnew line")?;
//! entry.save()?;
//! # Ok(())
//! # }
//! ```

pub mod cache;
pub mod config;
pub mod error;
pub mod origin;

pub use cache::{cache_id, CacheEntry, Metadata, MetadataStore, SyncAction};
pub use config::CacheConfig;
pub use error::{CacheError, Result};
pub use origin::{FileStat, LocalFile, OriginFile};
