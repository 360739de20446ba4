use serde_json::Value;
use std::fmt;

use crate::error::{BoxError, ConstructionError, Result, SerializationError, StateError};

/// The conventional archive folder for override files.
pub const OVERRIDES_FOLDER: &str = "overrides";

/// The declared content kind of an [`Override`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OverrideKind {
    Bytes,
    Text,
    Json,
    Toml,
}

impl fmt::Display for OverrideKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            OverrideKind::Bytes => "bytes",
            OverrideKind::Text => "text",
            OverrideKind::Json => "json",
            OverrideKind::Toml => "toml",
        })
    }
}

/// The payload of an override file.
#[derive(Debug, Clone, PartialEq)]
pub enum OverrideContent {
    /// Written verbatim.
    Bytes(Vec<u8>),
    /// Written verbatim as UTF-8.
    Text(String),
    /// Written as compact JSON, keeping object keys in insertion order.
    Json(Value),
    /// Written as TOML by a [`TomlFormatter`].
    Toml(Value),
}

impl OverrideContent {
    pub fn kind(&self) -> OverrideKind {
        match self {
            OverrideContent::Bytes(_) => OverrideKind::Bytes,
            OverrideContent::Text(_) => OverrideKind::Text,
            OverrideContent::Json(_) => OverrideKind::Json,
            OverrideContent::Toml(_) => OverrideKind::Toml,
        }
    }
}

/// Turns structured content into a TOML document.
///
/// Implemented for any `Fn(&Value) -> Result<String, BoxError>`, so tests and callers
/// can plug in their own formatter.
pub trait TomlFormatter: Send + Sync {
    fn format(&self, value: &Value) -> std::result::Result<String, BoxError>;
}

impl<F> TomlFormatter for F
where
    F: Fn(&Value) -> std::result::Result<String, BoxError> + Send + Sync,
{
    fn format(&self, value: &Value) -> std::result::Result<String, BoxError> {
        self(value)
    }
}

/// Formats TOML with the `toml` crate. The root value must be a table.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultTomlFormatter;

impl TomlFormatter for DefaultTomlFormatter {
    fn format(&self, value: &Value) -> std::result::Result<String, BoxError> {
        Ok(toml::to_string(value)?)
    }
}

/// A file embedded directly into the archive.
///
/// The kind is fixed at creation. Content may be set later and replaced any number of
/// times, but must match the kind.
#[derive(Debug, Clone, PartialEq)]
pub struct Override {
    path: String,
    kind: OverrideKind,
    content: Option<OverrideContent>,
}

impl Override {
    pub fn new(
        path: impl Into<String>,
        kind: OverrideKind,
    ) -> std::result::Result<Self, ConstructionError> {
        let path = path.into();
        if path.is_empty() {
            return Err(ConstructionError::empty("path"));
        }

        Ok(Self {
            path,
            kind,
            content: None,
        })
    }

    /// Create an override with its content already set.
    pub fn with_content(
        path: impl Into<String>,
        content: OverrideContent,
    ) -> std::result::Result<Self, ConstructionError> {
        let mut this = Self::new(path, content.kind())?;
        this.content = Some(content);
        Ok(this)
    }

    pub fn bytes(
        path: impl Into<String>,
        bytes: impl Into<Vec<u8>>,
    ) -> std::result::Result<Self, ConstructionError> {
        Self::with_content(path, OverrideContent::Bytes(bytes.into()))
    }

    pub fn text(
        path: impl Into<String>,
        text: impl Into<String>,
    ) -> std::result::Result<Self, ConstructionError> {
        Self::with_content(path, OverrideContent::Text(text.into()))
    }

    pub fn json(
        path: impl Into<String>,
        value: Value,
    ) -> std::result::Result<Self, ConstructionError> {
        Self::with_content(path, OverrideContent::Json(value))
    }

    pub fn toml(
        path: impl Into<String>,
        value: Value,
    ) -> std::result::Result<Self, ConstructionError> {
        Self::with_content(path, OverrideContent::Toml(value))
    }

    /// Set (or replace) the content. The content kind must match the declared kind.
    pub fn set_content(
        &mut self,
        content: OverrideContent,
    ) -> std::result::Result<(), ConstructionError> {
        if content.kind() != self.kind {
            return Err(ConstructionError::KindMismatch {
                path: self.path.clone(),
                expected: self.kind,
                actual: content.kind(),
            });
        }
        self.content = Some(content);
        Ok(())
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn kind(&self) -> OverrideKind {
        self.kind
    }

    pub fn content(&self) -> Option<&OverrideContent> {
        self.content.as_ref()
    }

    /// Serialize the content using [`DefaultTomlFormatter`] for TOML content.
    pub fn marshal(&self) -> Result<Vec<u8>> {
        self.marshal_with(&DefaultTomlFormatter)
    }

    /// Serialize the content to the bytes written into the archive.
    pub fn marshal_with(&self, toml_formatter: &dyn TomlFormatter) -> Result<Vec<u8>> {
        let content = self.content.as_ref().ok_or_else(|| StateError::ContentNotSet {
            path: self.path.clone(),
        })?;

        let bytes = match content {
            OverrideContent::Bytes(bytes) => bytes.clone(),
            OverrideContent::Text(text) => text.clone().into_bytes(),
            OverrideContent::Json(value) => {
                serde_json::to_vec(value).map_err(|source| SerializationError::Json {
                    path: self.path.clone(),
                    source,
                })?
            }
            OverrideContent::Toml(value) => toml_formatter
                .format(value)
                .map_err(|source| SerializationError::Toml {
                    path: self.path.clone(),
                    source,
                })?
                .into_bytes(),
        };

        Ok(bytes)
    }
}

/// Overrides indexed by their archive path, in registration order.
///
/// Registering the same path twice keeps both; lookups return the first one.
#[derive(Debug, Clone, Default)]
pub struct OverrideRegistry {
    overrides: Vec<Override>,
}

impl OverrideRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, entry: Override) {
        tracing::trace!("Registering override {}", entry.path());
        self.overrides.push(entry);
    }

    /// Look up an override by its archive path.
    pub fn get(&self, path: &str) -> Option<&Override> {
        self.overrides.iter().find(|entry| entry.path() == path)
    }

    pub fn get_mut(&mut self, path: &str) -> Option<&mut Override> {
        self.overrides.iter_mut().find(|entry| entry.path() == path)
    }

    pub fn len(&self) -> usize {
        self.overrides.len()
    }

    pub fn is_empty(&self) -> bool {
        self.overrides.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Override> {
        self.overrides.iter()
    }
}

impl IntoIterator for OverrideRegistry {
    type Item = Override;
    type IntoIter = std::vec::IntoIter<Override>;

    fn into_iter(self) -> Self::IntoIter {
        self.overrides.into_iter()
    }
}

impl FromIterator<Override> for OverrideRegistry {
    fn from_iter<T: IntoIterator<Item = Override>>(iter: T) -> Self {
        Self {
            overrides: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use serde_json::json;

    #[test]
    fn test_content_not_set() {
        let entry = Override::new("test/path.json", OverrideKind::Json).unwrap();
        let err = entry.marshal().unwrap_err();
        assert!(matches!(
            &err,
            Error::State(StateError::ContentNotSet { path }) if path == "test/path.json"
        ));
        assert_eq!(
            err.to_string(),
            "content for override \"test/path.json\" is not set"
        );
    }

    #[test]
    fn test_text_passthrough() {
        let entry = Override::text("test/path.txt", "test content").unwrap();
        assert_eq!(entry.marshal().unwrap(), b"test content");
    }

    #[test]
    fn test_bytes_passthrough() {
        let data = vec![0u8, 159, 146, 150, 255];
        let entry = Override::bytes("test/path.bin", data.clone()).unwrap();
        assert_eq!(entry.marshal().unwrap(), data);
    }

    #[test]
    fn test_json_keeps_key_order() {
        let mut entry = Override::new("test/path.json", OverrideKind::Json).unwrap();
        entry
            .set_content(OverrideContent::Json(json!({
                "zeta": 1,
                "alpha": { "nested": [1, 2, 3] },
                "mid": true
            })))
            .unwrap();

        let bytes = entry.marshal().unwrap();
        assert_eq!(
            String::from_utf8(bytes).unwrap(),
            r#"{"zeta":1,"alpha":{"nested":[1,2,3]},"mid":true}"#
        );
        assert_eq!(entry.marshal().unwrap(), entry.marshal().unwrap());
    }

    #[test]
    fn test_toml_default_formatter() {
        let entry = Override::toml(
            "config/test.toml",
            json!({ "key": "value", "array": [1, 2, 3] }),
        )
        .unwrap();

        let text = String::from_utf8(entry.marshal().unwrap()).unwrap();
        let parsed: toml::Table = toml::from_str(&text).unwrap();
        assert_eq!(parsed["key"].as_str(), Some("value"));
        assert_eq!(parsed["array"].as_array().map(Vec::len), Some(3));
    }

    #[test]
    fn test_toml_non_table_root_fails() {
        let entry = Override::toml("config/bad.toml", json!(42)).unwrap();
        let err = entry.marshal().unwrap_err();
        assert!(matches!(
            &err,
            Error::Serialization(SerializationError::Toml { path, .. }) if path == "config/bad.toml"
        ));
    }

    #[test]
    fn test_toml_formatter_failure_is_wrapped() {
        let failing = |_: &Value| -> std::result::Result<String, BoxError> {
            Err("formatter unavailable".into())
        };
        let entry = Override::toml("config/x.toml", json!({ "a": 1 })).unwrap();

        let err = entry.marshal_with(&failing).unwrap_err();
        assert_eq!(
            err.to_string(),
            "failed to serialize override \"config/x.toml\" as TOML: formatter unavailable"
        );
    }

    #[test]
    fn test_custom_toml_formatter() {
        let formatter =
            |value: &Value| -> std::result::Result<String, BoxError> { Ok(format!("# {}", value)) };
        let entry = Override::toml("config/x.toml", json!({ "a": 1 })).unwrap();
        assert_eq!(entry.marshal_with(&formatter).unwrap(), br#"# {"a":1}"#);
    }

    #[test]
    fn test_set_content_overwrites() {
        let mut entry = Override::new("a.txt", OverrideKind::Text).unwrap();
        entry
            .set_content(OverrideContent::Text("first".to_string()))
            .unwrap();
        entry
            .set_content(OverrideContent::Text("second".to_string()))
            .unwrap();
        assert_eq!(entry.marshal().unwrap(), b"second");
    }

    #[test]
    fn test_set_content_kind_mismatch() {
        let mut entry = Override::new("a.txt", OverrideKind::Text).unwrap();
        assert_eq!(
            entry.set_content(OverrideContent::Json(json!({}))),
            Err(ConstructionError::KindMismatch {
                path: "a.txt".to_string(),
                expected: OverrideKind::Text,
                actual: OverrideKind::Json,
            })
        );
        assert!(entry.content().is_none());
    }

    #[test]
    fn test_empty_path() {
        assert_eq!(
            Override::new("", OverrideKind::Bytes),
            Err(ConstructionError::EmptyField { field: "path" })
        );
    }

    #[test]
    fn test_registry_lookup() {
        let mut registry = OverrideRegistry::new();
        registry.add(Override::text("overrides/a.txt", "a").unwrap());
        registry.add(Override::text("overrides/b.txt", "b").unwrap());

        assert_eq!(registry.len(), 2);
        assert_eq!(
            registry.get("overrides/b.txt").map(|o| o.marshal().unwrap()),
            Some(b"b".to_vec())
        );
        assert!(registry.get("overrides/missing.txt").is_none());
    }

    #[test]
    fn test_registry_duplicate_path_returns_first() {
        let mut registry = OverrideRegistry::new();
        registry.add(Override::text("overrides/a.txt", "old").unwrap());
        registry.add(Override::text("overrides/a.txt", "new").unwrap());

        assert_eq!(registry.len(), 2);
        assert_eq!(
            registry.get("overrides/a.txt").unwrap().content(),
            Some(&OverrideContent::Text("old".to_string()))
        );
    }

    #[test]
    fn test_registry_get_mut() {
        let mut registry: OverrideRegistry =
            vec![Override::new("overrides/late.txt", OverrideKind::Text).unwrap()]
                .into_iter()
                .collect();

        registry
            .get_mut("overrides/late.txt")
            .unwrap()
            .set_content(OverrideContent::Text("filled".to_string()))
            .unwrap();
        assert_eq!(
            registry.get("overrides/late.txt").unwrap().marshal().unwrap(),
            b"filled"
        );
    }
}
