use std::collections::{BTreeMap, BTreeSet, HashMap};

use blockplace_core::RegistryKey;
use blockplace_world::{BlockCatalog, BlockState, BlockTraits, CollisionShape};
use glam::DVec3;

use crate::{AssetError, BlockDefinition, ShapeDefinition};

/// Block metadata loaded from packs.
#[derive(Debug, Clone)]
pub struct BlockDescriptor {
    /// Namespaced block key.
    pub key: RegistryKey,
    /// Physical traits shared by every state of the block.
    pub traits: BlockTraits,
    /// Tags the block belongs to, fully qualified.
    pub tags: BTreeSet<RegistryKey>,
    /// Property values of the default state.
    pub default_properties: BTreeMap<String, String>,
}

impl BlockDescriptor {
    /// Construct descriptor from the JSON definition.
    pub fn from_definition(def: BlockDefinition) -> Result<Self, AssetError> {
        let key = parse_key(&def.name)?;
        let tags = def
            .tags
            .iter()
            .map(|tag| parse_key(tag))
            .collect::<Result<BTreeSet<_>, _>>()?;
        let shape = match def.shape {
            Some(shape) => shape.collision(),
            None if def.solid => CollisionShape::FULL,
            None => CollisionShape::EMPTY,
        };
        Ok(Self {
            key,
            traits: BlockTraits {
                solid: def.solid,
                replaceable: def.replaceable,
                occludes: def.opaque,
                liquid: def.liquid,
                shape,
            },
            tags,
            default_properties: def.properties,
        })
    }

    /// Helper for tests that need a plain cube or a passable block.
    pub fn simple(name: &str, solid: bool) -> Result<Self, AssetError> {
        Self::from_definition(BlockDefinition {
            name: name.to_string(),
            solid,
            opaque: solid,
            replaceable: false,
            liquid: false,
            shape: None,
            tags: Vec::new(),
            properties: BTreeMap::new(),
        })
    }

    /// The block's default state.
    pub fn default_state(&self) -> BlockState {
        BlockState::new(self.key.clone()).with_properties(
            self.default_properties
                .iter()
                .map(|(name, value)| (name.clone(), value.clone())),
        )
    }
}

impl ShapeDefinition {
    fn collision(self) -> CollisionShape {
        match self {
            ShapeDefinition::Full => CollisionShape::FULL,
            ShapeDefinition::Empty => CollisionShape::EMPTY,
            ShapeDefinition::BottomSlab => {
                CollisionShape::new(DVec3::ZERO, DVec3::new(1.0, 0.5, 1.0))
            }
            ShapeDefinition::Post => CollisionShape::new(
                DVec3::new(0.375, 0.0, 0.375),
                DVec3::new(0.625, 1.5, 0.625),
            ),
            ShapeDefinition::Box { min, max } => {
                CollisionShape::new(DVec3::from_array(min), DVec3::from_array(max))
            }
        }
    }
}

fn parse_key(name: &str) -> Result<RegistryKey, AssetError> {
    RegistryKey::parse(name).map_err(|source| AssetError::InvalidKey {
        name: name.to_string(),
        source,
    })
}

/// Registry storing block descriptors keyed by id.
///
/// Blocks missing from the pack behave as solid cubes without tags.
#[derive(Debug, Clone, Default)]
pub struct BlockRegistry {
    descriptors: Vec<BlockDescriptor>,
    key_to_id: HashMap<RegistryKey, u16>,
    tag_members: HashMap<String, BTreeSet<RegistryKey>>,
}

impl BlockRegistry {
    /// Construct a registry from the supplied descriptors.
    pub fn new(descriptors: Vec<BlockDescriptor>) -> Result<Self, AssetError> {
        let mut key_to_id = HashMap::new();
        let mut tag_members: HashMap<String, BTreeSet<RegistryKey>> = HashMap::new();
        for (id, desc) in descriptors.iter().enumerate() {
            if key_to_id.insert(desc.key.clone(), id as u16).is_some() {
                return Err(AssetError::DuplicateBlock(desc.key.to_string()));
            }
            for tag in &desc.tags {
                tag_members
                    .entry(tag.to_string())
                    .or_default()
                    .insert(desc.key.clone());
            }
        }
        Ok(Self {
            descriptors,
            key_to_id,
            tag_members,
        })
    }

    /// Look up a descriptor by numeric id.
    pub fn descriptor(&self, id: u16) -> Option<&BlockDescriptor> {
        self.descriptors.get(id as usize)
    }

    /// Resolve a block id by its key.
    pub fn id_by_key(&self, key: &RegistryKey) -> Option<u16> {
        self.key_to_id.get(key).copied()
    }

    /// Descriptor of a block type.
    pub fn descriptor_for(&self, key: &RegistryKey) -> Option<&BlockDescriptor> {
        self.id_by_key(key).and_then(|id| self.descriptor(id))
    }

    /// Members of `tag` (fully qualified), in key order.
    pub fn tag_members(&self, tag: &str) -> impl Iterator<Item = &RegistryKey> {
        self.tag_members.get(tag).into_iter().flatten()
    }

    /// Number of registered blocks.
    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    /// True when the pack defined no blocks.
    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }
}

impl BlockCatalog for BlockRegistry {
    fn traits(&self, state: &BlockState) -> BlockTraits {
        if state.is_air() {
            return BlockTraits::AIR;
        }
        match self.descriptor_for(state.key()) {
            Some(desc) => desc.traits,
            None => {
                tracing::trace!(block = %state.key(), "unknown block treated as solid");
                BlockTraits::SOLID
            }
        }
    }

    fn has_tag(&self, state: &BlockState, tag: &str) -> bool {
        self.tag_members
            .get(tag)
            .is_some_and(|members| members.contains(state.key()))
    }

    fn default_state(&self, block: &RegistryKey) -> Option<BlockState> {
        self.descriptor_for(block).map(BlockDescriptor::default_state)
    }
}
