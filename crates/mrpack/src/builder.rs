use std::fmt;
use std::io::{Cursor, Seek, Write};
use zip::{write::SimpleFileOptions, CompressionMethod, ZipWriter};

use crate::error::Result;
use crate::index::IndexDocument;
use crate::overrides::{DefaultTomlFormatter, Override, OverrideRegistry, TomlFormatter};
use crate::INDEX_FILE_NAME;

/// Writes a `.mrpack` archive from an index document and a list of overrides.
pub struct MrpackBuilder {
    index: IndexDocument,
    overrides: Vec<Override>,
    toml_formatter: Box<dyn TomlFormatter>,
}

impl fmt::Debug for MrpackBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MrpackBuilder")
            .field("index", &self.index)
            .field("overrides", &self.overrides)
            .finish_non_exhaustive()
    }
}

impl MrpackBuilder {
    pub fn new(index: IndexDocument) -> Self {
        Self {
            index,
            overrides: Vec::new(),
            toml_formatter: Box::new(DefaultTomlFormatter),
        }
    }

    /// Replace the formatter used for TOML overrides.
    pub fn with_toml_formatter(mut self, formatter: impl TomlFormatter + 'static) -> Self {
        self.toml_formatter = Box::new(formatter);
        self
    }

    /// Queue an override. Overrides are written in the order they are added.
    pub fn add_override(&mut self, entry: Override) {
        self.overrides.push(entry);
    }

    /// Builder-style variant of [`Self::add_override`].
    pub fn with_override(mut self, entry: Override) -> Self {
        self.add_override(entry);
        self
    }

    /// Queue every override of a registry, keeping registration order.
    pub fn with_overrides(mut self, registry: OverrideRegistry) -> Self {
        self.overrides.extend(registry);
        self
    }

    pub fn index(&self) -> &IndexDocument {
        &self.index
    }

    pub fn overrides(&self) -> &[Override] {
        &self.overrides
    }

    /// Build the archive in memory.
    pub fn build(&self) -> Result<Vec<u8>> {
        let mut cursor = Cursor::new(Vec::new());
        self.build_to_writer(&mut cursor)?;
        Ok(cursor.into_inner())
    }

    /// Build the archive and write it to `writer`.
    ///
    /// Every entry is serialized before anything is written, so a failing override
    /// leaves `writer` untouched.
    pub fn build_to_writer<W: Write + Seek>(&self, writer: W) -> Result<()> {
        tracing::info!(
            "Building mrpack '{}' {} ({} files, {} overrides)",
            self.index.name,
            self.index.version,
            self.index.files.len(),
            self.overrides.len()
        );

        let entries = self.collect_entries()?;

        let mut zip = ZipWriter::new(writer);
        let options = SimpleFileOptions::default()
            .compression_method(CompressionMethod::Deflated)
            .unix_permissions(0o644);

        for (name, data) in &entries {
            tracing::debug!("Writing {} ({} bytes)", name, data.len());
            zip.start_file(name.as_str(), options)?;
            zip.write_all(data)?;
        }

        zip.finish()?.flush()?;

        Ok(())
    }

    fn collect_entries(&self) -> Result<Vec<(String, Vec<u8>)>> {
        let mut entries = Vec::with_capacity(self.overrides.len() + 1);
        entries.push((
            INDEX_FILE_NAME.to_string(),
            self.index.to_json()?.into_bytes(),
        ));

        for entry in &self.overrides {
            let data = entry.marshal_with(self.toml_formatter.as_ref())?;
            entries.push((entry.path().to_string(), data));
        }

        Ok(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{BoxError, Error, StateError};
    use crate::{DependencySet, FileEntry, FileHashes, Manifest, OverrideKind};
    use serde_json::json;
    use std::io::Read;
    use zip::ZipArchive;

    fn create_document() -> IndexDocument {
        let mut manifest =
            Manifest::new("T", "1.0.0", DependencySet::game("1.20.1"), None).unwrap();
        let file = FileEntry::new("mods/a.jar", FileHashes::new("h1", "h2"), 10)
            .unwrap()
            .with_download("https://cdn.example/a.jar")
            .unwrap();
        manifest.add_file(&file).unwrap();
        manifest.to_document().unwrap()
    }

    fn read_entry(archive: &mut ZipArchive<Cursor<Vec<u8>>>, name: &str) -> String {
        let mut content = String::new();
        archive
            .by_name(name)
            .unwrap()
            .read_to_string(&mut content)
            .unwrap();
        content
    }

    #[test]
    fn test_build_index_and_text_override() {
        let document = create_document();
        let mut builder = MrpackBuilder::new(document.clone());
        builder.add_override(Override::text("overrides/a.txt", "hello").unwrap());

        let bytes = builder.build().unwrap();
        let mut archive = ZipArchive::new(Cursor::new(bytes)).unwrap();

        assert_eq!(archive.len(), 2);

        let index = read_entry(&mut archive, INDEX_FILE_NAME);
        assert_eq!(IndexDocument::from_json(&index).unwrap(), document);
        assert_eq!(read_entry(&mut archive, "overrides/a.txt"), "hello");
    }

    #[test]
    fn test_build_preserves_override_order() {
        let builder = MrpackBuilder::new(create_document())
            .with_override(Override::text("overrides/z.txt", "z").unwrap())
            .with_override(
                Override::json("overrides/config.json", json!({ "b": 1, "a": 2 })).unwrap(),
            )
            .with_override(Override::bytes("overrides/raw.bin", vec![1u8, 2, 3]).unwrap());

        let bytes = builder.build().unwrap();
        let mut archive = ZipArchive::new(Cursor::new(bytes)).unwrap();

        let names: Vec<String> = (0..archive.len())
            .map(|i| archive.by_index(i).unwrap().name().to_string())
            .collect();
        assert_eq!(
            names,
            vec![
                INDEX_FILE_NAME,
                "overrides/z.txt",
                "overrides/config.json",
                "overrides/raw.bin"
            ]
        );
        assert_eq!(
            read_entry(&mut archive, "overrides/config.json"),
            r#"{"b":1,"a":2}"#
        );
    }

    #[test]
    fn test_build_without_overrides() {
        let bytes = MrpackBuilder::new(create_document()).build().unwrap();
        let archive = ZipArchive::new(Cursor::new(bytes)).unwrap();
        assert_eq!(archive.len(), 1);
    }

    #[test]
    fn test_build_fails_on_unset_content() {
        let mut builder = MrpackBuilder::new(create_document());
        builder.add_override(Override::text("overrides/ok.txt", "ok").unwrap());
        builder.add_override(Override::new("overrides/empty.txt", OverrideKind::Text).unwrap());

        let mut output = Cursor::new(Vec::new());
        let err = builder.build_to_writer(&mut output).unwrap_err();
        assert!(matches!(
            err,
            Error::State(StateError::ContentNotSet { ref path }) if path == "overrides/empty.txt"
        ));
        assert!(output.into_inner().is_empty());
    }

    #[test]
    fn test_build_uses_injected_toml_formatter() {
        let formatter = |_: &serde_json::Value| -> std::result::Result<String, BoxError> {
            Ok("x = 1\n".to_string())
        };
        let builder = MrpackBuilder::new(create_document())
            .with_toml_formatter(formatter)
            .with_override(
                Override::toml("overrides/config/a.toml", json!({ "y": 2 })).unwrap(),
            );

        let bytes = builder.build().unwrap();
        let mut archive = ZipArchive::new(Cursor::new(bytes)).unwrap();
        assert_eq!(read_entry(&mut archive, "overrides/config/a.toml"), "x = 1\n");
    }

    #[test]
    fn test_build_with_registry() {
        let mut registry = OverrideRegistry::new();
        registry.add(Override::text("overrides/1.txt", "1").unwrap());
        registry.add(Override::text("overrides/2.txt", "2").unwrap());

        let builder = MrpackBuilder::new(create_document()).with_overrides(registry);
        assert_eq!(builder.overrides().len(), 2);

        let bytes = builder.build().unwrap();
        let archive = ZipArchive::new(Cursor::new(bytes)).unwrap();
        assert_eq!(archive.len(), 3);
    }
}
