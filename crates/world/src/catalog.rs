//! Read-only block catalog capability: physical traits and tag membership.
//!
//! Rules never own a registry. They query whatever implements
//! [`BlockCatalog`] through the placement/update context.

use crate::state::BlockState;
use blockplace_core::{Direction, RegistryKey};
use glam::DVec3;
use serde::{Deserialize, Serialize};

/// Axis-aligned collision box in cell-local coordinates (0..1 on each axis).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CollisionShape {
    /// Minimum corner.
    pub min: DVec3,
    /// Maximum corner.
    pub max: DVec3,
}

impl CollisionShape {
    /// No collision at all.
    pub const EMPTY: Self = Self {
        min: DVec3::ZERO,
        max: DVec3::ZERO,
    };

    /// Full cube.
    pub const FULL: Self = Self {
        min: DVec3::ZERO,
        max: DVec3::ONE,
    };

    /// Box from two corners.
    pub const fn new(min: DVec3, max: DVec3) -> Self {
        Self { min, max }
    }

    /// Extent on each axis.
    pub fn size(&self) -> DVec3 {
        (self.max - self.min).max(DVec3::ZERO)
    }

    /// True when the box has no volume.
    pub fn is_empty(&self) -> bool {
        let size = self.size();
        size.x <= 0.0 || size.y <= 0.0 || size.z <= 0.0
    }

    /// True when the box covers the whole face pointing towards `direction`.
    pub fn is_face_full(&self, direction: Direction) -> bool {
        if self.is_empty() {
            return false;
        }
        let covers_x = self.min.x <= 0.0 && self.max.x >= 1.0;
        let covers_y = self.min.y <= 0.0 && self.max.y >= 1.0;
        let covers_z = self.min.z <= 0.0 && self.max.z >= 1.0;
        match direction {
            Direction::Down => self.min.y <= 0.0 && covers_x && covers_z,
            Direction::Up => self.max.y >= 1.0 && covers_x && covers_z,
            Direction::North => self.min.z <= 0.0 && covers_x && covers_y,
            Direction::South => self.max.z >= 1.0 && covers_x && covers_y,
            Direction::West => self.min.x <= 0.0 && covers_y && covers_z,
            Direction::East => self.max.x >= 1.0 && covers_y && covers_z,
        }
    }

    /// Old-style solidity used by banner support: big enough on average, or
    /// at least a full cell tall.
    pub fn is_legacy_solid(&self) -> bool {
        if self.is_empty() {
            return false;
        }
        let size = self.size();
        let average = (size.x + size.y + size.z) / 3.0;
        average >= 0.729_166_666_666_666_6 || size.y >= 1.0
    }
}

/// Physical traits of a block state.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BlockTraits {
    /// Blocks movement and supports attachments.
    pub solid: bool,
    /// Can be overwritten by placement (air, grass, snow layers).
    pub replaceable: bool,
    /// Blocks light and vision.
    pub occludes: bool,
    /// Water, lava and similar.
    pub liquid: bool,
    /// Collision box.
    pub shape: CollisionShape,
}

impl BlockTraits {
    /// Traits of empty space.
    pub const AIR: Self = Self {
        solid: false,
        replaceable: true,
        occludes: false,
        liquid: false,
        shape: CollisionShape::EMPTY,
    };

    /// Traits of an ordinary full cube such as stone.
    pub const SOLID: Self = Self {
        solid: true,
        replaceable: false,
        occludes: true,
        liquid: false,
        shape: CollisionShape::FULL,
    };
}

/// Registry capability consulted by rules.
pub trait BlockCatalog {
    /// Physical traits of `state`. Implementations decide the fallback for
    /// unknown blocks.
    fn traits(&self, state: &BlockState) -> BlockTraits;

    /// Whether `state`'s block type belongs to `tag` (e.g. `minecraft:stairs`).
    fn has_tag(&self, state: &BlockState, tag: &str) -> bool;

    /// Default state of a block type, when known.
    fn default_state(&self, block: &RegistryKey) -> Option<BlockState>;

    /// Whether the block type is known.
    fn contains(&self, block: &RegistryKey) -> bool {
        self.default_state(block).is_some()
    }

    /// Solid and not air.
    fn is_solid(&self, state: &BlockState) -> bool {
        !state.is_air() && self.traits(state).solid
    }

    /// Air or flagged replaceable.
    fn is_replaceable(&self, state: &BlockState) -> bool {
        state.is_air() || self.traits(state).replaceable
    }

    /// Water, lava and similar.
    fn is_liquid(&self, state: &BlockState) -> bool {
        !state.is_air() && self.traits(state).liquid
    }

    /// Occludes and solid; the notion of a full neighbor used by door hinges.
    fn is_full_cube(&self, state: &BlockState) -> bool {
        if state.is_air() {
            return false;
        }
        let traits = self.traits(state);
        traits.occludes && traits.solid
    }

    /// Whether the face of `state` pointing towards `direction` is full.
    fn is_face_full(&self, state: &BlockState, direction: Direction) -> bool {
        !state.is_air() && self.traits(state).shape.is_face_full(direction)
    }

    /// Legacy solidity of the collision box.
    fn is_legacy_solid(&self, state: &BlockState) -> bool {
        !state.is_air() && self.traits(state).shape.is_legacy_solid()
    }
}

impl<C: BlockCatalog + ?Sized> BlockCatalog for &C {
    fn traits(&self, state: &BlockState) -> BlockTraits {
        (**self).traits(state)
    }

    fn has_tag(&self, state: &BlockState, tag: &str) -> bool {
        (**self).has_tag(state, tag)
    }

    fn default_state(&self, block: &RegistryKey) -> Option<BlockState> {
        (**self).default_state(block)
    }
}
