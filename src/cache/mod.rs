//! Local file cache
//!
//! Content-addressed mirror of origin files. Each origin path maps to a
//! stable identifier; cached bytes live at `cache_dir/<id>` and sync state
//! lives in a JSON sidecar at `metadata_dir/<id>.json`.

pub mod entry;
pub mod metadata;

pub use entry::{CacheEntry, SyncAction};
pub use metadata::{Metadata, MetadataStore};

use sha1::{Digest, Sha1};

/// Derive the cache identifier for an origin path
///
/// Hex-encoded SHA-1 of the UTF-8 path bytes. Pure function of the path
/// string: the same path always yields the same identifier, and content
/// changes at that path never change it.
pub fn cache_id(path: &str) -> String {
    let mut hasher = Sha1::new();
    hasher.update(path.as_bytes());
    format!("{:x}", hasher.finalize())
}
