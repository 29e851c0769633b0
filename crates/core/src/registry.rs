//! Namespaced registry keys.
//!
//! Block types are identified by stable string keys such as
//! `minecraft:oak_stairs`. Keys are ordered and validated so that catalogs and
//! rule tables iterate deterministically.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Default namespace used when a key omits an explicit namespace.
pub const DEFAULT_NAMESPACE: &str = "minecraft";

/// Error returned when parsing an invalid [`RegistryKey`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryKeyError {
    /// Input was empty or whitespace.
    #[error("registry key cannot be empty")]
    Empty,
    /// Namespace segment is empty, too long or uses invalid characters.
    #[error("invalid registry key namespace `{0}` (allowed: a-z0-9_.-, max 64)")]
    Namespace(String),
    /// Path segment is empty, too long or uses invalid characters.
    #[error("invalid registry key path `{0}` (allowed: a-z0-9_./-, max 128)")]
    Path(String),
}

/// A namespaced key of the form `namespace:path`.
///
/// Ordering is lexical by `(namespace, path)` and is stable across runs.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RegistryKey {
    namespace: String,
    path: String,
}

impl RegistryKey {
    /// Parse a registry key.
    ///
    /// Accepts either:
    /// - `namespace:path`
    /// - `path` (uses [`DEFAULT_NAMESPACE`])
    pub fn parse(input: &str) -> Result<Self, RegistryKeyError> {
        Self::parse_with_default_namespace(input, DEFAULT_NAMESPACE)
    }

    /// Parse a registry key using a caller-provided default namespace.
    pub fn parse_with_default_namespace(
        input: &str,
        default_namespace: &str,
    ) -> Result<Self, RegistryKeyError> {
        let input = input.trim();
        if input.is_empty() {
            return Err(RegistryKeyError::Empty);
        }

        let (namespace, path) = match input.split_once(':') {
            Some((ns, p)) => (ns.trim(), p.trim()),
            None => (default_namespace, input),
        };

        validate_namespace(namespace)?;
        validate_path(path)?;

        Ok(Self {
            namespace: namespace.to_string(),
            path: path.to_string(),
        })
    }

    /// Build a key in the default namespace. Intended for compile-time known
    /// vanilla names; invalid characters are rejected the same way as `parse`.
    pub fn minecraft(path: &str) -> Result<Self, RegistryKeyError> {
        Self::parse_with_default_namespace(path, DEFAULT_NAMESPACE)
    }

    /// The `minecraft:air` key.
    pub fn air() -> Self {
        Self {
            namespace: DEFAULT_NAMESPACE.to_string(),
            path: "air".to_string(),
        }
    }

    /// Whether this key equals `name`, given as `namespace:path` or as a bare
    /// path in the default namespace.
    pub fn matches(&self, name: &str) -> bool {
        match name.split_once(':') {
            Some((ns, path)) => self.namespace == ns && self.path == path,
            None => self.namespace == DEFAULT_NAMESPACE && self.path == name,
        }
    }

    /// Registry key namespace.
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Registry key path.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Returns a key in the same namespace with `path` replaced.
    pub fn with_path(&self, path: &str) -> Result<Self, RegistryKeyError> {
        validate_path(path)?;
        Ok(Self {
            namespace: self.namespace.clone(),
            path: path.to_string(),
        })
    }
}

impl fmt::Display for RegistryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.namespace, self.path)
    }
}

impl FromStr for RegistryKey {
    type Err = RegistryKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for RegistryKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for RegistryKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).map_err(serde::de::Error::custom)
    }
}

fn validate_namespace(ns: &str) -> Result<(), RegistryKeyError> {
    let valid = !ns.is_empty()
        && ns.len() <= 64
        && ns
            .chars()
            .all(|c| matches!(c, 'a'..='z' | '0'..='9' | '_' | '-' | '.'));
    if valid {
        Ok(())
    } else {
        Err(RegistryKeyError::Namespace(ns.to_string()))
    }
}

fn validate_path(path: &str) -> Result<(), RegistryKeyError> {
    let valid = !path.is_empty()
        && path.len() <= 128
        && path
            .chars()
            .all(|c| matches!(c, 'a'..='z' | '0'..='9' | '_' | '-' | '.' | '/'));
    if valid {
        Ok(())
    } else {
        Err(RegistryKeyError::Path(path.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_namespaced_key() {
        let key = RegistryKey::parse("minecraft:oak_stairs").unwrap();
        assert_eq!(key.namespace(), "minecraft");
        assert_eq!(key.path(), "oak_stairs");
        assert_eq!(key.to_string(), "minecraft:oak_stairs");
    }

    #[test]
    fn parses_with_default_namespace() {
        let key = RegistryKey::parse("stone").unwrap();
        assert_eq!(key.to_string(), "minecraft:stone");
    }

    #[test]
    fn rejects_empty() {
        assert_eq!(RegistryKey::parse(""), Err(RegistryKeyError::Empty));
        assert_eq!(RegistryKey::parse("   "), Err(RegistryKeyError::Empty));
    }

    #[test]
    fn rejects_invalid_chars() {
        assert!(RegistryKey::parse("minecraft:Stone").is_err());
        assert!(RegistryKey::parse("MC:stone").is_err());
        assert!(RegistryKey::parse("minecraft:stone?").is_err());
        assert!(RegistryKey::parse("minecraft:").is_err());
        assert!(RegistryKey::parse(":stone").is_err());
    }

    #[test]
    fn matches_full_and_bare_names() {
        let key = RegistryKey::parse("minecraft:barrier").unwrap();
        assert!(key.matches("minecraft:barrier"));
        assert!(key.matches("barrier"));
        assert!(!key.matches("custom:barrier"));
        assert!(RegistryKey::air().matches("air"));
    }

    #[test]
    fn with_path_keeps_namespace() {
        let key = RegistryKey::parse("custom:red_banner").unwrap();
        let wall = key.with_path("red_wall_banner").unwrap();
        assert_eq!(wall.to_string(), "custom:red_wall_banner");
    }

    #[test]
    fn serializes_as_string() {
        let key = RegistryKey::parse("minecraft:chest").unwrap();
        let json = serde_json::to_string(&key).unwrap();
        assert_eq!(json, "\"minecraft:chest\"");
        let back: RegistryKey = serde_json::from_str(&json).unwrap();
        assert_eq!(back, key);
    }
}
