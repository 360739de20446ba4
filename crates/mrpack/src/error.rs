//! Error types for manifest construction and archive building.
//!
//! Each component reports its own error kind. All of them convert into the
//! crate-level [`Error`], which also covers I/O, zip and JSON failures.

use thiserror::Error;

use crate::overrides::OverrideKind;

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Boxed error returned by pluggable formatters.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Errors that can occur while building or reading a modpack.
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid constructor or setter arguments.
    #[error(transparent)]
    Construction(#[from] ConstructionError),

    /// The dependency map breaks one of the dependency rules.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// A value was read before its required state existed.
    #[error(transparent)]
    State(#[from] StateError),

    /// Override content could not be serialized.
    #[error(transparent)]
    Serialization(#[from] SerializationError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("ZIP error: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// Failed to serialize or parse `modrinth.index.json`.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// `modrinth.index.json` is not valid UTF-8.
    #[error("{name} is not valid UTF-8: {0}", name = crate::INDEX_FILE_NAME)]
    IndexEncoding(#[source] std::string::FromUtf8Error),

    /// The archive has no `modrinth.index.json` entry.
    #[error("Missing {} in archive", crate::INDEX_FILE_NAME)]
    MissingIndex,
}

/// Invalid arguments passed to a constructor or setter.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConstructionError {
    #[error("{field} must be a non-empty string")]
    EmptyField { field: &'static str },

    #[error("override \"{path}\" expects {expected} content, got {actual}")]
    KindMismatch {
        path: String,
        expected: OverrideKind,
        actual: OverrideKind,
    },
}

impl ConstructionError {
    pub(crate) fn empty(field: &'static str) -> Self {
        Self::EmptyField { field }
    }
}

/// Dependency map rule violations, in the order they are checked.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("conflicting neoforge aliases: use only one of \"neoforge\" and \"neo-forge\"")]
    ConflictingNeoForgeAliases,

    #[error("empty dependencies")]
    Empty,

    #[error("missing game dependency \"{}\"", crate::dependencies::GAME_KEY)]
    MissingGameDependency,

    #[error("multiple loader dependencies: {}", .loaders.join(", "))]
    MultipleLoaders { loaders: Vec<String> },
}

/// A finalized form was requested before the state it needs was supplied.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StateError {
    #[error("file \"{path}\" has no download links")]
    NoDownloads { path: String },

    #[error("empty file list: no files have been added to the index")]
    NoFiles,

    #[error("content for override \"{path}\" is not set")]
    ContentNotSet { path: String },
}

/// Override content could not be turned into bytes.
#[derive(Error, Debug)]
pub enum SerializationError {
    #[error("failed to serialize override \"{path}\" as JSON: {source}")]
    Json {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to serialize override \"{path}\" as TOML: {source}")]
    Toml {
        path: String,
        #[source]
        source: BoxError,
    },
}
