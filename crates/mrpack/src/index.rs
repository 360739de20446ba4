use serde::{Deserialize, Serialize};

use crate::dependencies::DependencySet;
use crate::error::{ConstructionError, Result, StateError};
use crate::file::{FileEntry, IndexFile};

/// The game identifier written to every index.
pub const GAME: &str = "minecraft";

/// The only supported index format version.
pub const FORMAT_VERSION: u32 = 1;

/// The finalized contents of `modrinth.index.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndexDocument {
    pub game: String,
    pub format_version: u32,
    pub name: String,
    pub version: String,
    pub summary: String,
    pub dependencies: DependencySet,
    pub files: Vec<IndexFile>,
}

impl IndexDocument {
    /// Serialize to compact JSON, as written into the archive.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}

/// Accumulates the files of a modpack index.
///
/// A `Manifest` only exists with a non-empty name and version and a dependency set
/// that passed [`DependencySet::validate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Manifest {
    name: String,
    version: String,
    summary: String,
    dependencies: DependencySet,
    files: Vec<IndexFile>,
}

impl Manifest {
    /// Create a manifest.
    ///
    /// When `summary` is `None` (or empty) it is derived from the dependencies as
    /// `"<game version>, <Loader> <loader version>"`, or just the game version when no
    /// recognized loader is present.
    pub fn new(
        name: impl Into<String>,
        version: impl Into<String>,
        dependencies: DependencySet,
        summary: Option<String>,
    ) -> Result<Self> {
        let name = name.into();
        if name.is_empty() {
            return Err(ConstructionError::empty("name").into());
        }
        let version = version.into();
        if version.is_empty() {
            return Err(ConstructionError::empty("version").into());
        }

        dependencies.validate()?;

        let summary = match summary {
            Some(summary) if !summary.is_empty() => summary,
            _ => derive_summary(&dependencies),
        };

        Ok(Self {
            name,
            version,
            summary,
            dependencies,
            files: Vec::new(),
        })
    }

    /// Append a snapshot of `file`. Fails if the file has no download mirrors.
    pub fn add_file(&mut self, file: &FileEntry) -> Result<()> {
        self.files.push(file.to_index_file()?);
        Ok(())
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn summary(&self) -> &str {
        &self.summary
    }

    pub fn dependencies(&self) -> &DependencySet {
        &self.dependencies
    }

    pub fn files(&self) -> &[IndexFile] {
        &self.files
    }

    /// Produce the index document. Fails with [`StateError::NoFiles`] if no file was added.
    pub fn to_document(&self) -> Result<IndexDocument> {
        if self.files.is_empty() {
            return Err(StateError::NoFiles.into());
        }

        Ok(IndexDocument {
            game: GAME.to_string(),
            format_version: FORMAT_VERSION,
            name: self.name.clone(),
            version: self.version.clone(),
            summary: self.summary.clone(),
            dependencies: self.dependencies.clone(),
            files: self.files.clone(),
        })
    }
}

fn derive_summary(dependencies: &DependencySet) -> String {
    let game_version = dependencies.game_version().unwrap_or_default();
    match (dependencies.loader(), dependencies.loader_version()) {
        (Some(loader), Some(loader_version)) => {
            format!("{}, {} {}", game_version, loader, loader_version)
        }
        _ => game_version.to_string(),
    }
}
