use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::ValidationError;

/// The dependency key holding the game version.
pub const GAME_KEY: &str = "minecraft";

/// Mod loaders recognized in a dependency map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Loader {
    Forge,
    NeoForge,
    Fabric,
    Quilt,
}

impl Loader {
    /// Dependency keys in resolution order. `neoforge` wins over `neo-forge`.
    pub const KEYS: [(&'static str, Loader); 5] = [
        ("forge", Loader::Forge),
        ("neoforge", Loader::NeoForge),
        ("neo-forge", Loader::NeoForge),
        ("fabric-loader", Loader::Fabric),
        ("quilt-loader", Loader::Quilt),
    ];

    /// Human readable loader name used in the pack summary.
    pub fn display_name(&self) -> &'static str {
        match self {
            Loader::Forge => "Forge",
            Loader::NeoForge => "NeoForge",
            Loader::Fabric => "Fabric",
            Loader::Quilt => "Quilt",
        }
    }

    /// The canonical dependency key for this loader.
    pub fn key(&self) -> &'static str {
        match self {
            Loader::Forge => "forge",
            Loader::NeoForge => "neoforge",
            Loader::Fabric => "fabric-loader",
            Loader::Quilt => "quilt-loader",
        }
    }

    pub fn from_key(key: &str) -> Option<Loader> {
        Self::KEYS
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, loader)| *loader)
    }
}

impl fmt::Display for Loader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// The `dependencies` map of a modpack index.
///
/// Maps dependency keys (`minecraft`, `forge`, `fabric-loader`, ...) to version strings,
/// keeping insertion order. An empty version counts as an absent dependency in
/// validation and loader resolution. Construction does not validate; use [`DependencySet::validate`] or let
/// [`Manifest::new`](crate::Manifest::new) do it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DependencySet(IndexMap<String, String>);

impl DependencySet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Shorthand for a set holding only the game version.
    pub fn game(version: impl Into<String>) -> Self {
        Self::new().with(GAME_KEY, version)
    }

    /// Add a dependency, replacing any existing version for the same key.
    pub fn with(mut self, key: impl Into<String>, version: impl Into<String>) -> Self {
        self.insert(key, version);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, version: impl Into<String>) -> Option<String> {
        self.0.insert(key.into(), version.into())
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The version for `key`, treating an empty version as missing.
    fn version_of(&self, key: &str) -> Option<&str> {
        self.get(key).filter(|version| !version.is_empty())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Check the dependency rules. The first failing rule is reported.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.version_of("neoforge").is_some() && self.version_of("neo-forge").is_some() {
            return Err(ValidationError::ConflictingNeoForgeAliases);
        }
        if self.is_empty() {
            return Err(ValidationError::Empty);
        }
        if self.version_of(GAME_KEY).is_none() {
            return Err(ValidationError::MissingGameDependency);
        }

        // Every non-game key counts, recognized loader or not
        let loaders: Vec<String> = self
            .0
            .keys()
            .filter(|key| key.as_str() != GAME_KEY)
            .cloned()
            .collect();
        if loaders.len() >= 2 {
            return Err(ValidationError::MultipleLoaders { loaders });
        }

        Ok(())
    }

    /// The game version, if present and non-empty.
    pub fn game_version(&self) -> Option<&str> {
        self.version_of(GAME_KEY)
    }

    /// The recognized loader present in this set, if any.
    pub fn loader(&self) -> Option<Loader> {
        Loader::KEYS
            .iter()
            .find(|(key, _)| self.version_of(key).is_some())
            .map(|(_, loader)| *loader)
    }

    /// The version of the recognized loader, using the same key precedence as [`Self::loader`].
    pub fn loader_version(&self) -> Option<&str> {
        Loader::KEYS.iter().find_map(|(key, _)| self.version_of(key))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for DependencySet {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

impl From<IndexMap<String, String>> for DependencySet {
    fn from(map: IndexMap<String, String>) -> Self {
        Self(map)
    }
}
