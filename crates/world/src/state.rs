//! Immutable block states.

use crate::properties::PropertyValue;
use blockplace_core::{RegistryKey, RegistryKeyError};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use thiserror::Error;

/// Opaque reference to a behavior handler attached to a state.
///
/// Rules never interpret it; they only carry it through property edits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct HandlerId(pub u32);

/// Error returned when parsing a state string such as `minecraft:oak_stairs[facing=north]`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StateParseError {
    /// The block key is invalid.
    #[error("invalid block key: {0}")]
    Key(#[from] RegistryKeyError),
    /// The property list is not closed by `]`.
    #[error("unterminated property list in `{0}`")]
    Unterminated(String),
    /// A property entry is not of the form `name=value`.
    #[error("malformed property `{0}`")]
    Property(String),
}

/// A block type plus its ordered property values.
///
/// Equality compares the block key and properties only. The data payload and
/// handler ride along unchanged through every `with_*` edit.
#[derive(Debug, Clone)]
pub struct BlockState {
    block: RegistryKey,
    properties: BTreeMap<String, String>,
    data: Option<Arc<serde_json::Value>>,
    handler: Option<HandlerId>,
}

impl BlockState {
    /// A state with no properties.
    pub fn new(block: RegistryKey) -> Self {
        Self {
            block,
            properties: BTreeMap::new(),
            data: None,
            handler: None,
        }
    }

    /// The empty cell.
    pub fn air() -> Self {
        Self::new(RegistryKey::air())
    }

    /// Block type key.
    pub fn key(&self) -> &RegistryKey {
        &self.block
    }

    /// Whether the state is one of the air variants.
    pub fn is_air(&self) -> bool {
        self.block.namespace() == blockplace_core::DEFAULT_NAMESPACE
            && matches!(self.block.path(), "air" | "cave_air" | "void_air")
    }

    /// Whether the block type is `name` (`namespace:path` or a bare vanilla path).
    pub fn is(&self, name: &str) -> bool {
        self.block.matches(name)
    }

    /// Same block type as `other`, ignoring properties.
    pub fn same_block(&self, other: &BlockState) -> bool {
        self.block == other.block
    }

    /// All properties in name order.
    pub fn properties(&self) -> &BTreeMap<String, String> {
        &self.properties
    }

    /// Raw property value.
    pub fn property(&self, name: &str) -> Option<&str> {
        self.properties.get(name).map(String::as_str)
    }

    /// Typed property value; `None` when absent or malformed.
    pub fn get<T: PropertyValue>(&self, name: &str) -> Option<T> {
        self.property(name).and_then(T::parse_value)
    }

    /// Copy with one property set.
    pub fn with<T: PropertyValue>(&self, name: &str, value: T) -> Self {
        self.with_raw(name, value.to_value())
    }

    /// Copy with one property set to a raw string.
    pub fn with_raw(&self, name: &str, value: impl Into<String>) -> Self {
        let mut next = self.clone();
        next.properties.insert(name.to_string(), value.into());
        next
    }

    /// Copy with several raw properties set.
    pub fn with_properties<I, K, V>(&self, entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut next = self.clone();
        for (name, value) in entries {
            next.properties.insert(name.into(), value.into());
        }
        next
    }

    /// Opaque data payload.
    pub fn data(&self) -> Option<&Arc<serde_json::Value>> {
        self.data.as_ref()
    }

    /// Copy with a data payload attached.
    pub fn with_data(&self, data: serde_json::Value) -> Self {
        let mut next = self.clone();
        next.data = Some(Arc::new(data));
        next
    }

    /// Behavior handler reference.
    pub fn handler(&self) -> Option<HandlerId> {
        self.handler
    }

    /// Copy with a handler attached.
    pub fn with_handler(&self, handler: HandlerId) -> Self {
        let mut next = self.clone();
        next.handler = Some(handler);
        next
    }

    /// Copy with the data payload and handler taken from `source`.
    pub fn with_attachments_of(&self, source: &BlockState) -> Self {
        let mut next = self.clone();
        next.data = source.data.clone();
        next.handler = source.handler;
        next
    }
}

impl PartialEq for BlockState {
    fn eq(&self, other: &Self) -> bool {
        self.block == other.block && self.properties == other.properties
    }
}

impl Eq for BlockState {}

impl Default for BlockState {
    fn default() -> Self {
        Self::air()
    }
}

impl fmt::Display for BlockState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.block)?;
        if self.properties.is_empty() {
            return Ok(());
        }
        f.write_str("[")?;
        for (i, (name, value)) in self.properties.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{name}={value}")?;
        }
        f.write_str("]")
    }
}

impl FromStr for BlockState {
    type Err = StateParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let (key, props) = match s.split_once('[') {
            Some((key, rest)) => {
                let body = rest
                    .strip_suffix(']')
                    .ok_or_else(|| StateParseError::Unterminated(s.to_string()))?;
                (key, Some(body))
            }
            None => (s, None),
        };

        let mut state = BlockState::new(RegistryKey::parse(key)?);
        if let Some(body) = props {
            for entry in body.split(',').map(str::trim).filter(|e| !e.is_empty()) {
                let (name, value) = entry
                    .split_once('=')
                    .ok_or_else(|| StateParseError::Property(entry.to_string()))?;
                let (name, value) = (name.trim(), value.trim());
                if name.is_empty() || value.is_empty() {
                    return Err(StateParseError::Property(entry.to_string()));
                }
                state.properties.insert(name.to_string(), value.to_string());
            }
        }
        Ok(state)
    }
}

impl Serialize for BlockState {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for BlockState {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}
