use std::io::{Read, Seek};
use zip::ZipArchive;

use crate::error::{Error, Result};
use crate::index::IndexDocument;
use crate::INDEX_FILE_NAME;

const MAX_PREALLOCATION: u64 = 1024 * 1024;

/// Reader for `.mrpack` archives.
pub struct MrpackReader<R: Read + Seek> {
    archive: ZipArchive<R>,
}

impl<R: Read + Seek> MrpackReader<R> {
    /// Open an archive from a reader.
    pub fn new(reader: R) -> Result<Self> {
        let archive = ZipArchive::new(reader)?;
        Ok(Self { archive })
    }

    /// Read and parse `modrinth.index.json`.
    pub fn read_index(&mut self) -> Result<IndexDocument> {
        let content = match self.read_entry(INDEX_FILE_NAME) {
            Ok(content) => content,
            Err(Error::Zip(zip::result::ZipError::FileNotFound)) => {
                return Err(Error::MissingIndex)
            }
            Err(e) => return Err(e),
        };

        let text = String::from_utf8(content).map_err(Error::IndexEncoding)?;
        // Strip UTF-8 BOM if present
        let text = text.trim_start_matches('\u{feff}');

        Ok(IndexDocument::from_json(text)?)
    }

    /// Names of every entry other than the index, in archive order.
    pub fn override_names(&self) -> Vec<String> {
        self.archive
            .file_names()
            .filter(|name| *name != INDEX_FILE_NAME && !name.ends_with('/'))
            .map(str::to_string)
            .collect()
    }

    /// Read the raw bytes of an entry.
    pub fn read_entry(&mut self, name: &str) -> Result<Vec<u8>> {
        let mut file = self.archive.by_name(name)?;
        // The declared size is untrusted, so it only caps the initial allocation
        let mut buffer = Vec::with_capacity(file.size().min(MAX_PREALLOCATION) as usize);
        file.read_to_end(&mut buffer)?;
        Ok(buffer)
    }

    /// Total number of entries, the index included.
    pub fn len(&self) -> usize {
        self.archive.len()
    }

    pub fn is_empty(&self) -> bool {
        self.archive.len() == 0
    }
}
