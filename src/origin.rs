//! Origin File Handles
//!
//! The abstract capability a cache entry mirrors. An origin may be a local
//! file or a remote one behind a transport; the cache only depends on this
//! trait. Implementations acquire any underlying descriptor per call and
//! release it before returning, so no handle is ever held across operations.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Read, Write};
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use tracing::debug;

/// Timestamps reported by an origin, in epoch seconds
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FileStat {
    /// When the file was created
    pub created_at: f64,
    /// When the file was last modified
    pub modified_at: f64,
}

/// Convert a filesystem timestamp to epoch seconds
pub(crate) fn system_time_secs(t: SystemTime) -> f64 {
    t.duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs_f64())
        .unwrap_or(0.0)
}

/// A file the cache mirrors
///
/// The cache never assumes the handle is local; a remote transport
/// implements the same contract.
pub trait OriginFile {
    /// The file's display name
    fn name(&self) -> &str;

    /// The file's absolute path (cache identity is derived from this)
    fn path(&self) -> &str;

    /// Live creation/modification timestamps
    fn stat(&self) -> io::Result<FileStat>;

    /// Whether the file can currently be read
    fn readable(&self) -> bool;

    /// Whether the file can currently be written
    fn writable(&self) -> bool;

    /// Read up to `size` bytes from the start, or everything if `size` is None
    fn read(&self, size: Option<usize>) -> io::Result<Vec<u8>>;

    /// Replace the file's contents with `data`
    fn write(&mut self, data: &[u8]) -> io::Result<()>;
}

/// Origin backed by the local filesystem
///
/// Doubles as the reference implementation for remote variants: every
/// operation opens the file, does its work, and drops the descriptor.
#[derive(Debug, Clone)]
pub struct LocalFile {
    path: PathBuf,
    name: String,
}

impl LocalFile {
    /// Wrap a local path as an origin handle
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        Self { path, name }
    }
}

impl OriginFile for LocalFile {
    fn name(&self) -> &str {
        &self.name
    }

    fn path(&self) -> &str {
        self.path.to_str().unwrap_or_default()
    }

    fn stat(&self) -> io::Result<FileStat> {
        let meta = fs::metadata(&self.path)?;
        let modified_at = system_time_secs(meta.modified()?);
        // Creation time is unavailable on some filesystems
        let created_at = meta
            .created()
            .map(system_time_secs)
            .unwrap_or(modified_at);

        Ok(FileStat {
            created_at,
            modified_at,
        })
    }

    fn readable(&self) -> bool {
        File::open(&self.path).is_ok()
    }

    fn writable(&self) -> bool {
        fs::metadata(&self.path)
            .map(|m| !m.permissions().readonly())
            .unwrap_or(false)
    }

    fn read(&self, size: Option<usize>) -> io::Result<Vec<u8>> {
        let mut file = File::open(&self.path)?;
        let mut contents = Vec::new();
        match size {
            Some(n) => {
                file.take(n as u64).read_to_end(&mut contents)?;
            }
            None => {
                file.read_to_end(&mut contents)?;
            }
        }

        debug!(path = %self.path.display(), bytes = contents.len(), "Read origin file");

        Ok(contents)
    }

    fn write(&mut self, data: &[u8]) -> io::Result<()> {
        let mut file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&self.path)?;
        file.write_all(data)?;

        debug!(path = %self.path.display(), bytes = data.len(), "Wrote origin file");

        Ok(())
    }
}
