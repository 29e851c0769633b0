#![warn(missing_docs)]
//! Block pack schema, validation and the registry built from it.

mod loader;
mod registry;

pub use loader::{registry_from_file, registry_from_str};
pub use registry::{BlockDescriptor, BlockRegistry};

use blockplace_core::RegistryKeyError;
use serde::Deserialize;
use std::collections::BTreeMap;
use thiserror::Error;

/// One block entry of a JSON pack.
#[derive(Debug, Clone, Deserialize)]
pub struct BlockDefinition {
    /// Block key; a bare path (e.g. "stone") lands in the `minecraft` namespace.
    pub name: String,
    /// Blocks movement and supports attachments.
    #[serde(default = "default_true")]
    pub solid: bool,
    /// Whether the block blocks light/vision.
    #[serde(default)]
    pub opaque: bool,
    /// Can be overwritten by placement.
    #[serde(default)]
    pub replaceable: bool,
    /// Water, lava and similar.
    #[serde(default)]
    pub liquid: bool,
    /// Collision box; defaults to a full cube for solid blocks and nothing otherwise.
    #[serde(default)]
    pub shape: Option<ShapeDefinition>,
    /// Tags the block belongs to (bare names land in the `minecraft` namespace).
    #[serde(default)]
    pub tags: Vec<String>,
    /// Property values of the default state.
    #[serde(default)]
    pub properties: BTreeMap<String, String>,
}

fn default_true() -> bool {
    true
}

/// Collision box of a block definition.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShapeDefinition {
    /// Whole cell.
    Full,
    /// No collision.
    Empty,
    /// Lower half of the cell.
    BottomSlab,
    /// Centered post, 1.5 blocks tall (fences, walls, panes).
    Post,
    /// Explicit box in cell-local coordinates.
    Box {
        /// Minimum corner.
        min: [f64; 3],
        /// Maximum corner.
        max: [f64; 3],
    },
}

/// Errors emitted during pack loading.
#[derive(Debug, Error)]
pub enum AssetError {
    /// Wrap IO errors when reading packs.
    #[error("failed to read block pack: {0}")]
    Io(#[from] std::io::Error),
    /// Wrap serde parsing issues.
    #[error("failed to parse block pack: {0}")]
    Parse(#[from] serde_json::Error),
    /// A block or tag name is not a valid key.
    #[error("invalid key `{name}` in block pack")]
    InvalidKey {
        /// Name as written in the pack.
        name: String,
        /// Underlying parse error.
        #[source]
        source: RegistryKeyError,
    },
    /// The same block appears twice.
    #[error("block `{0}` is defined more than once")]
    DuplicateBlock(String),
}

/// Parse a JSON string into a list of blocks.
pub fn load_blocks_from_str(input: &str) -> Result<Vec<BlockDefinition>, AssetError> {
    Ok(serde_json::from_str(input)?)
}
