#![warn(missing_docs)]
//! Core primitives shared across the workspace: registry keys, dimensions,
//! directions and the yaw/pitch geometry used by placement.

pub mod dimension;
pub mod direction;
pub mod geometry;
pub mod registry;

use serde::{Deserialize, Serialize};

pub use dimension::{DimensionId, HeightBounds};
pub use direction::{Axis, BlockFace, Direction, ParseDirectionError};
pub use geometry::{
    horizontal_direction_from_yaw, nearest_looking_directions, rotation16, BlockPos, Pose,
};
pub use registry::{RegistryKey, RegistryKeyError, DEFAULT_NAMESPACE};

/// Fixed tick type (20 TPS => 50 ms per tick).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SimTick(pub u64);

impl SimTick {
    /// First tick in any deterministic timeline.
    pub const ZERO: Self = Self(0);

    /// Advance by `delta` ticks.
    pub fn advance(self, delta: u64) -> Self {
        Self(self.0 + delta)
    }
}
