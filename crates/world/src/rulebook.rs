//! Block key / tag to rule family dispatch.
//!
//! Explicit block entries win over tags; tags are tried in registration order.

use crate::catalog::BlockCatalog;
use crate::rules::support::tags;
use crate::rules::BlockRule;
use crate::state::BlockState;
use blockplace_core::{RegistryKey, RegistryKeyError, DEFAULT_NAMESPACE};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

/// Error raised while configuring a [`RuleBook`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuleBookError {
    /// A block entry does not name a valid key.
    #[error("invalid block key `{key}` in rule table")]
    InvalidBlock {
        /// Raw key as configured.
        key: String,
        /// Underlying parse error.
        #[source]
        source: RegistryKeyError,
    },
    /// A tag entry does not name a valid key.
    #[error("invalid tag `{tag}` in rule table")]
    InvalidTag {
        /// Raw tag as configured.
        tag: String,
        /// Underlying parse error.
        #[source]
        source: RegistryKeyError,
    },
}

/// Extra entries layered on top of a rule table, e.g. from a config file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuleOverrides {
    /// Tag name (`minecraft:stairs` or bare `stairs`) to family.
    pub tags: BTreeMap<String, BlockRule>,
    /// Block key (`minecraft:chest` or bare `chest`) to family.
    pub blocks: BTreeMap<String, BlockRule>,
}

impl RuleOverrides {
    /// True when there is nothing to apply.
    pub fn is_empty(&self) -> bool {
        self.tags.is_empty() && self.blocks.is_empty()
    }
}

const DYE_COLORS: [&str; 16] = [
    "white",
    "orange",
    "magenta",
    "light_blue",
    "yellow",
    "lime",
    "pink",
    "gray",
    "light_gray",
    "cyan",
    "purple",
    "blue",
    "brown",
    "green",
    "red",
    "black",
];

/// Which rule family governs which blocks.
#[derive(Debug, Clone, Default)]
pub struct RuleBook {
    blocks: BTreeMap<RegistryKey, BlockRule>,
    tags: Vec<(String, BlockRule)>,
}

impl RuleBook {
    /// Empty table: every block is unruled.
    pub fn new() -> Self {
        Self::default()
    }

    /// The vanilla wiring: one tag per family plus singleton blocks.
    pub fn vanilla() -> Self {
        let mut book = Self::new();
        for (tag, rule) in [
            (tags::STAIRS, BlockRule::Stairs),
            (tags::RAILS, BlockRule::Rail),
            (tags::WALLS, BlockRule::Wall),
            (tags::FENCES, BlockRule::Fence),
            (tags::FENCE_GATES, BlockRule::FenceGate),
            (tags::DOORS, BlockRule::Door),
            (tags::BEDS, BlockRule::Bed),
            (tags::BANNERS, BlockRule::Banner),
            (tags::TALL_FLOWERS, BlockRule::TallPlant),
            (tags::CROPS, BlockRule::Crop),
            (tags::STANDING_SIGNS, BlockRule::StandingSign),
            (tags::WALL_SIGNS, BlockRule::WallSign),
            (tags::CEILING_HANGING_SIGNS, BlockRule::CeilingHangingSign),
            (tags::WALL_HANGING_SIGNS, BlockRule::WallHangingSign),
            (tags::SLABS, BlockRule::Slab),
            (tags::TRAPDOORS, BlockRule::Trapdoor),
            (tags::BUTTONS, BlockRule::Button),
            (tags::LOGS, BlockRule::Axis),
        ] {
            book.register_tag(tag, rule);
        }

        let singles: &[(&str, BlockRule)] = &[
            ("tall_grass", BlockRule::TallPlant),
            ("large_fern", BlockRule::TallPlant),
            ("chest", BlockRule::Chest),
            ("trapped_chest", BlockRule::Chest),
            ("glass_pane", BlockRule::GlassPane),
            ("iron_bars", BlockRule::GlassPane),
            ("cactus", BlockRule::Cactus),
            ("sugar_cane", BlockRule::SugarCane),
            ("brown_mushroom", BlockRule::Mushroom),
            ("red_mushroom", BlockRule::Mushroom),
            ("crimson_fungus", BlockRule::Mushroom),
            ("warped_fungus", BlockRule::Mushroom),
            ("furnace", BlockRule::HorizontalFacing),
            ("blast_furnace", BlockRule::HorizontalFacing),
            ("smoker", BlockRule::HorizontalFacing),
            ("quartz_pillar", BlockRule::Axis),
            ("purpur_pillar", BlockRule::Axis),
            ("basalt", BlockRule::Axis),
            ("hay_block", BlockRule::Axis),
            ("bone_block", BlockRule::Axis),
        ];
        for (path, rule) in singles {
            book.insert_vanilla(path, *rule);
        }
        for color in DYE_COLORS {
            book.insert_vanilla(&format!("{color}_stained_glass_pane"), BlockRule::GlassPane);
        }
        book
    }

    fn insert_vanilla(&mut self, path: &str, rule: BlockRule) {
        if let Ok(key) = RegistryKey::minecraft(path) {
            self.blocks.insert(key, rule);
        }
    }

    /// Route one block type to `rule`, returning the entry it replaced.
    pub fn register_block(&mut self, key: RegistryKey, rule: BlockRule) -> Option<BlockRule> {
        self.blocks.insert(key, rule)
    }

    /// Route every member of `tag` to `rule`. Re-registering a tag keeps its
    /// position and swaps the family.
    pub fn register_tag(&mut self, tag: impl Into<String>, rule: BlockRule) {
        let tag = tag.into();
        match self.tags.iter_mut().find(|(existing, _)| *existing == tag) {
            Some(entry) => entry.1 = rule,
            None => self.tags.push((tag, rule)),
        }
    }

    /// Layer configured overrides on top of the current table.
    pub fn apply_overrides(&mut self, overrides: &RuleOverrides) -> Result<(), RuleBookError> {
        for (raw, rule) in &overrides.tags {
            let tag = RegistryKey::parse_with_default_namespace(raw, DEFAULT_NAMESPACE).map_err(
                |source| RuleBookError::InvalidTag {
                    tag: raw.clone(),
                    source,
                },
            )?;
            self.register_tag(tag.to_string(), *rule);
        }
        for (raw, rule) in &overrides.blocks {
            let key = RegistryKey::parse(raw).map_err(|source| RuleBookError::InvalidBlock {
                key: raw.clone(),
                source,
            })?;
            self.register_block(key, *rule);
        }
        Ok(())
    }

    /// Family governing `state`, if any.
    pub fn lookup(&self, state: &BlockState, catalog: &dyn BlockCatalog) -> Option<BlockRule> {
        if state.is_air() {
            return None;
        }
        if let Some(rule) = self.blocks.get(state.key()) {
            return Some(*rule);
        }
        self.tags
            .iter()
            .find(|(tag, _)| catalog.has_tag(state, tag))
            .map(|(_, rule)| *rule)
    }

    /// Number of explicit block entries.
    pub fn block_count(&self) -> usize {
        self.blocks.len()
    }

    /// Number of tag entries.
    pub fn tag_count(&self) -> usize {
        self.tags.len()
    }
}
