use serde::{Deserialize, Serialize};

use crate::error::{ConstructionError, StateError};
use crate::hash::FileHashes;

/// A file entry as it appears in the `files` array of `modrinth.index.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndexFile {
    pub path: String,
    pub hashes: FileHashes,
    pub downloads: Vec<String>,
    pub file_size: u64,
}

/// An externally hosted file that the launcher downloads when installing the pack.
///
/// Path, hashes and size are fixed at creation; download mirrors are added afterwards.
/// At least one mirror is required before the entry can be finalized with
/// [`FileEntry::to_index_file`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    path: String,
    hashes: FileHashes,
    file_size: u64,
    downloads: Vec<String>,
}

impl FileEntry {
    pub fn new(
        path: impl Into<String>,
        hashes: FileHashes,
        file_size: u64,
    ) -> Result<Self, ConstructionError> {
        let path = path.into();
        if path.is_empty() {
            return Err(ConstructionError::empty("path"));
        }

        Ok(Self {
            path,
            hashes,
            file_size,
            downloads: Vec::new(),
        })
    }

    /// Create an entry for `bytes`, computing its hashes and size.
    pub fn from_bytes(path: impl Into<String>, bytes: &[u8]) -> Result<Self, ConstructionError> {
        Self::new(path, FileHashes::compute(bytes), bytes.len() as u64)
    }

    /// Append a download mirror. Mirrors keep their insertion order.
    pub fn add_download(&mut self, uri: impl Into<String>) -> Result<(), ConstructionError> {
        let uri = uri.into();
        if uri.is_empty() {
            return Err(ConstructionError::empty("download URI"));
        }
        self.downloads.push(uri);
        Ok(())
    }

    /// Builder-style variant of [`Self::add_download`].
    pub fn with_download(mut self, uri: impl Into<String>) -> Result<Self, ConstructionError> {
        self.add_download(uri)?;
        Ok(self)
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn hashes(&self) -> &FileHashes {
        &self.hashes
    }

    pub fn file_size(&self) -> u64 {
        self.file_size
    }

    pub fn downloads(&self) -> &[String] {
        &self.downloads
    }

    /// Snapshot this entry as an index record.
    ///
    /// Fails if no download mirror has been added.
    pub fn to_index_file(&self) -> Result<IndexFile, StateError> {
        if self.downloads.is_empty() {
            return Err(StateError::NoDownloads {
                path: self.path.clone(),
            });
        }

        Ok(IndexFile {
            path: self.path.clone(),
            hashes: self.hashes.clone(),
            downloads: self.downloads.clone(),
            file_size: self.file_size,
        })
    }
}
