use crate::builder::MrpackBuilder;
use crate::dependencies::DependencySet;
use crate::error::Result;
use crate::file::FileEntry;
use crate::index::Manifest;
use crate::overrides::{Override, OverrideRegistry};

/// Files and overrides collected for a named modpack before it is packed.
#[derive(Debug, Clone, Default)]
pub struct ModPackage {
    name: String,
    files: Vec<FileEntry>,
    overrides: OverrideRegistry,
}

impl ModPackage {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn add_file(&mut self, file: FileEntry) {
        self.files.push(file);
    }

    pub fn add_override(&mut self, entry: Override) {
        self.overrides.add(entry);
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn files(&self) -> &[FileEntry] {
        &self.files
    }

    pub fn overrides(&self) -> &OverrideRegistry {
        &self.overrides
    }

    pub fn files_len(&self) -> usize {
        self.files.len()
    }

    pub fn overrides_len(&self) -> usize {
        self.overrides.len()
    }

    /// Create a manifest for this package holding every collected file.
    pub fn manifest(
        &self,
        version: impl Into<String>,
        dependencies: DependencySet,
        summary: Option<String>,
    ) -> Result<Manifest> {
        let mut manifest = Manifest::new(self.name.as_str(), version, dependencies, summary)?;
        for file in &self.files {
            manifest.add_file(file)?;
        }
        Ok(manifest)
    }

    /// Finalize the manifest and hand everything to an [`MrpackBuilder`].
    pub fn into_builder(
        self,
        version: impl Into<String>,
        dependencies: DependencySet,
        summary: Option<String>,
    ) -> Result<MrpackBuilder> {
        let document = self.manifest(version, dependencies, summary)?.to_document()?;
        Ok(MrpackBuilder::new(document).with_overrides(self.overrides))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{Error, StateError};
    use crate::hash::FileHashes;
    use crate::reader::MrpackReader;
    use std::io::Cursor;

    fn create_file(path: &str) -> FileEntry {
        FileEntry::new(path, FileHashes::new("h1", "h2"), 1)
            .unwrap()
            .with_download("https://cdn.example/file")
            .unwrap()
    }

    #[test]
    fn test_counts() {
        let mut package = ModPackage::new("Pack");
        package.add_file(create_file("mods/a.jar"));
        package.add_file(create_file("mods/b.jar"));
        package.add_override(Override::text("overrides/a.txt", "a").unwrap());

        assert_eq!(package.name(), "Pack");
        assert_eq!(package.files_len(), 2);
        assert_eq!(package.overrides_len(), 1);
    }

    #[test]
    fn test_into_builder() {
        let mut package = ModPackage::new("Pack");
        package.add_file(create_file("mods/a.jar"));
        package.add_override(Override::text("overrides/a.txt", "a").unwrap());

        let bytes = package
            .into_builder("1.0.0", DependencySet::game("1.20.1"), None)
            .unwrap()
            .build()
            .unwrap();

        let mut reader = MrpackReader::new(Cursor::new(bytes)).unwrap();
        let index = reader.read_index().unwrap();
        assert_eq!(index.name, "Pack");
        assert_eq!(index.files.len(), 1);
        assert_eq!(reader.override_names(), vec!["overrides/a.txt"]);
    }

    #[test]
    fn test_empty_package_has_no_document() {
        let package = ModPackage::new("Pack");
        let manifest = package
            .manifest("1.0.0", DependencySet::game("1.20.1"), None)
            .unwrap();
        assert!(matches!(
            manifest.to_document(),
            Err(Error::State(StateError::NoFiles))
        ));
    }
}
