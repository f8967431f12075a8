//! Zip packaging of optimized images.
//!
//! Entries are deflate-compressed. Entry names are unique within one archive:
//! a repeated name gets a numeric suffix before its extension.

use std::collections::HashSet;
use std::fs;
use std::io::{self, Seek, Write};
use std::path::Path;

use thiserror::Error;
use tracing::warn;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

/// Errors raised while writing the archive.
#[derive(Debug, Error)]
pub enum ArchiveError {
    #[error("Zip error: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// A zip archive being filled one optimized image at a time.
pub struct ArchiveWriter<W: Write + Seek> {
    zip: ZipWriter<W>,
    names: HashSet<String>,
}

impl<W: Write + Seek> ArchiveWriter<W> {
    /// Start a new archive on `inner`.
    pub fn new(inner: W) -> Self {
        Self {
            zip: ZipWriter::new(inner),
            names: HashSet::new(),
        }
    }

    /// Add `bytes` under `name`, returning the entry name actually used.
    pub fn add(&mut self, name: &str, bytes: &[u8]) -> Result<String, ArchiveError> {
        let entry = unique_name(name, &self.names);
        let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

        self.zip.start_file(entry.as_str(), options)?;
        self.zip.write_all(bytes)?;
        self.names.insert(entry.clone());
        Ok(entry)
    }

    /// Number of entries written so far.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Write the central directory and hand back the underlying writer.
    pub fn finish(self) -> Result<W, ArchiveError> {
        Ok(self.zip.finish()?)
    }
}

/// Pick a name not in `taken`: `name`, then `stem-2.ext`, `stem-3.ext`, ...
pub fn unique_name(name: &str, taken: &HashSet<String>) -> String {
    if !taken.contains(name) {
        return name.to_string();
    }

    let (stem, ext) = match name.rsplit_once('.') {
        Some((stem, ext)) => (stem, Some(ext)),
        None => (name, None),
    };

    (2..)
        .map(|n| match ext {
            Some(ext) => format!("{stem}-{n}.{ext}"),
            None => format!("{stem}-{n}"),
        })
        .find(|candidate| !taken.contains(candidate))
        .unwrap_or_else(|| name.to_string())
}

/// Delete an unusable archive file, returning false if it is still on disk.
///
/// A file that is already gone counts as discarded. Other failures are
/// logged and left for the user to clean up.
pub fn discard_archive(path: &Path) -> bool {
    match fs::remove_file(path) {
        Ok(()) => true,
        Err(e) if e.kind() == io::ErrorKind::NotFound => true,
        Err(e) => {
            warn!("Could not remove {}: {e}", path.display());
            false
        }
    }
}
