//! Modrinth modpack (`.mrpack`) builder.
//!
//! A modpack archive is a zip file holding a `modrinth.index.json` manifest that lists
//! externally hosted files, plus override files embedded directly in the archive.
//!
//! # Example
//!
//! ```no_run
//! use mrpack::{DependencySet, FileEntry, FileHashes, Manifest, MrpackBuilder, Override};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let dependencies = DependencySet::game("1.20.1").with("fabric-loader", "0.14.22");
//! let mut manifest = Manifest::new("My Pack", "1.0.0", dependencies, None)?;
//!
//! let mut sodium = FileEntry::new("mods/sodium.jar", FileHashes::new("<sha1>", "<sha512>"), 1024)?;
//! sodium.add_download("https://cdn.modrinth.com/data/AANobbMI/versions/sodium.jar")?;
//! manifest.add_file(&sodium)?;
//!
//! let mut builder = MrpackBuilder::new(manifest.to_document()?);
//! builder.add_override(Override::text("overrides/options.txt", "renderDistance:12")?);
//!
//! std::fs::write("my-pack.mrpack", builder.build()?)?;
//! # Ok(())
//! # }
//! ```

pub mod builder;
pub mod dependencies;
pub mod error;
pub mod file;
pub mod hash;
pub mod index;
pub mod overrides;
pub mod package;
pub mod reader;

/// The name of the manifest entry inside the archive.
pub const INDEX_FILE_NAME: &str = "modrinth.index.json";

/// The file extension of modpack archives.
pub const MRPACK_EXTENSION: &str = "mrpack";

pub use builder::MrpackBuilder;
pub use dependencies::{DependencySet, Loader, GAME_KEY};
pub use error::{
    BoxError, ConstructionError, Error, Result, SerializationError, StateError, ValidationError,
};
pub use file::{FileEntry, IndexFile};
pub use hash::FileHashes;
pub use index::{IndexDocument, Manifest, FORMAT_VERSION, GAME};
pub use overrides::{
    DefaultTomlFormatter, Override, OverrideContent, OverrideKind, OverrideRegistry,
    TomlFormatter, OVERRIDES_FOLDER,
};
pub use package::ModPackage;
pub use reader::MrpackReader;
