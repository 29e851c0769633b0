use std::fs;
use std::path::Path;

use crate::{AssetError, BlockDescriptor, BlockRegistry};

/// Load a block registry from the provided JSON file path.
pub fn registry_from_file(path: &Path) -> Result<BlockRegistry, AssetError> {
    let data = fs::read_to_string(path)?;
    let registry = registry_from_str(&data)?;
    tracing::debug!(path = %path.display(), blocks = registry.len(), "loaded block pack");
    Ok(registry)
}

/// Load a block registry from an in-memory JSON string.
pub fn registry_from_str(input: &str) -> Result<BlockRegistry, AssetError> {
    let defs = crate::load_blocks_from_str(input)?;
    let descriptors = defs
        .into_iter()
        .map(BlockDescriptor::from_definition)
        .collect::<Result<Vec<_>, _>>()?;
    BlockRegistry::new(descriptors)
}
