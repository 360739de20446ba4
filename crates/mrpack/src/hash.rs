use serde::{Deserialize, Serialize};
use sha1::{Digest, Sha1};
use sha2::Sha512;
use std::io::{self, Read};

/// Integrity hashes of a file listed in the index, as lowercase hex strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileHashes {
    pub sha1: String,
    pub sha512: String,
}

impl FileHashes {
    pub fn new(sha1: impl Into<String>, sha512: impl Into<String>) -> Self {
        Self {
            sha1: sha1.into(),
            sha512: sha512.into(),
        }
    }

    /// Hash an in-memory buffer.
    pub fn compute(bytes: &[u8]) -> Self {
        Self {
            sha1: hex::encode(Sha1::digest(bytes)),
            sha512: hex::encode(Sha512::digest(bytes)),
        }
    }

    /// Hash everything readable from `reader`, returning the hashes and the byte count.
    pub fn from_reader<R: Read>(mut reader: R) -> io::Result<(Self, u64)> {
        let mut sha1 = Sha1::new();
        let mut sha512 = Sha512::new();
        let mut buffer = [0u8; 64 * 1024];
        let mut size = 0u64;

        loop {
            let read = reader.read(&mut buffer)?;
            if read == 0 {
                break;
            }
            sha1.update(&buffer[..read]);
            sha512.update(&buffer[..read]);
            size += read as u64;
        }

        Ok((
            Self {
                sha1: hex::encode(sha1.finalize()),
                sha512: hex::encode(sha512.finalize()),
            },
            size,
        ))
    }
}
