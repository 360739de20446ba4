use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// File names probed for a project configuration, JSON first.
pub const CONFIG_FILE_NAMES: [&str; 2] = ["mrpack.config.json", "mrpack.config.toml"];

/// Default directory (relative to the config file) whose files are packed as overrides.
pub const DEFAULT_OVERRIDES_DIR: &str = "overrides";

fn default_overrides_dir() -> String {
    DEFAULT_OVERRIDES_DIR.to_string()
}

/// Errors in an otherwise well-formed project file.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ProjectError {
    #[error("file \"{path}\" needs either `source` or both `hashes` and `file_size`")]
    MissingIntegrity { path: String },

    #[error("file \"{path}\" sets `source` together with `hashes`/`file_size`")]
    AmbiguousIntegrity { path: String },

    #[error("text override \"{path}\" must have string content")]
    NonStringText { path: String },
}

/// Describes a modpack project configuration file
#[derive(Serialize, Deserialize, Debug, PartialEq, Clone)]
pub struct ModpackProject {
    /// The display name of the modpack
    ///
    /// Example: `My Modpack`
    pub name: String,

    /// The version of the modpack
    ///
    /// Example: `1.0.0`
    pub version: String,

    /// Short summary shown by launchers
    /// Optional field - if not provided, one is derived from the dependencies
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,

    /// Game and loader versions
    ///
    /// Example: `{ minecraft = "1.20.1", fabric-loader = "0.14.22" }`
    pub dependencies: IndexMap<String, String>,

    /// Externally hosted files listed in the index
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub files: Vec<ProjectFile>,

    /// Directory whose contents are embedded under `overrides/`, relative to the config file
    #[serde(default = "default_overrides_dir")]
    pub overrides_dir: String,

    /// Override files generated from inline content
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub overrides: Vec<ProjectOverride>,
}

/// An externally hosted file of the project.
#[derive(Serialize, Deserialize, Debug, PartialEq, Clone)]
pub struct ProjectFile {
    /// Destination path inside the game directory
    ///
    /// Example: `mods/sodium.jar`
    pub path: String,

    /// Download mirrors, tried in order
    pub downloads: Vec<String>,

    /// Known hashes of the file
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hashes: Option<ProjectFileHashes>,

    /// Known size of the file in bytes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_size: Option<u64>,

    /// Local copy of the file, relative to the config file, used to compute hashes and size
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, PartialEq, Eq, Clone)]
pub struct ProjectFileHashes {
    pub sha1: String,
    pub sha512: String,
}

/// Where the hashes and size of a [`ProjectFile`] come from.
#[derive(Debug, PartialEq, Eq)]
pub enum FileIntegrity<'a> {
    Declared {
        hashes: &'a ProjectFileHashes,
        file_size: u64,
    },
    Source(&'a str),
}

impl ProjectFile {
    pub fn integrity(&self) -> Result<FileIntegrity<'_>, ProjectError> {
        match (&self.source, &self.hashes, self.file_size) {
            (Some(_), Some(_), _) | (Some(_), _, Some(_)) => {
                Err(ProjectError::AmbiguousIntegrity {
                    path: self.path.clone(),
                })
            }
            (Some(source), None, None) => Ok(FileIntegrity::Source(source)),
            (None, Some(hashes), Some(file_size)) => {
                Ok(FileIntegrity::Declared { hashes, file_size })
            }
            (None, _, _) => Err(ProjectError::MissingIntegrity {
                path: self.path.clone(),
            }),
        }
    }
}

/// Output format of an inline override.
#[derive(Serialize, Deserialize, Debug, PartialEq, Eq, Clone, Copy)]
#[serde(rename_all = "kebab-case")]
pub enum OverrideFormat {
    Text,
    Json,
    Toml,
}

/// An override file whose content is written inline in the project file.
#[derive(Serialize, Deserialize, Debug, PartialEq, Clone)]
pub struct ProjectOverride {
    /// Archive path of the generated file
    ///
    /// Example: `overrides/config/sodium-options.json`
    pub path: String,

    pub format: OverrideFormat,

    /// The content; a string for `text`, any value for `json`, a table for `toml`
    pub content: serde_json::Value,
}

impl ProjectOverride {
    /// The content of a `text` override.
    pub fn text(&self) -> Result<&str, ProjectError> {
        self.content
            .as_str()
            .ok_or_else(|| ProjectError::NonStringText {
                path: self.path.clone(),
            })
    }
}

/// Returns a starter project for the given game and optional loader
pub fn default_project(
    name: impl Into<String>,
    game_version: impl Into<String>,
    loader: Option<(String, String)>,
) -> ModpackProject {
    let mut dependencies = IndexMap::new();
    dependencies.insert("minecraft".to_string(), game_version.into());
    if let Some((key, version)) = loader {
        dependencies.insert(key, version);
    }

    ModpackProject {
        name: name.into(),
        version: "0.1.0".to_string(),
        summary: None,
        dependencies,
        files: vec![],
        overrides_dir: default_overrides_dir(),
        overrides: vec![],
    }
}
