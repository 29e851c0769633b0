//! Dimension identifiers and their vertical build limits.
//!
//! Two-cell structures (doors, beds, tall plants) refuse placement when their
//! second cell would leave the dimension's height range, so the bounds travel
//! with the dimension rather than with any particular grid implementation.

use serde::{Deserialize, Serialize};

/// Stable identifier for a world dimension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DimensionId {
    /// The Overworld dimension.
    Overworld,
    /// The Nether dimension.
    Nether,
    /// The End dimension.
    End,
}

impl DimensionId {
    /// Default (Overworld) dimension.
    pub const DEFAULT: Self = Self::Overworld;

    /// Canonical string key used in configs/logs.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Overworld => "overworld",
            Self::Nether => "nether",
            Self::End => "end",
        }
    }

    /// Vertical build limits of this dimension.
    pub const fn height_bounds(self) -> HeightBounds {
        match self {
            Self::Overworld => HeightBounds::new(-64, 320),
            Self::Nether | Self::End => HeightBounds::new(0, 256),
        }
    }
}

impl Default for DimensionId {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Half-open vertical range `[min_y, max_y)` of buildable cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HeightBounds {
    /// Lowest buildable y (inclusive).
    pub min_y: i32,
    /// First y above the build limit (exclusive).
    pub max_y: i32,
}

impl HeightBounds {
    /// Create bounds from an inclusive minimum and exclusive maximum.
    pub const fn new(min_y: i32, max_y: i32) -> Self {
        Self { min_y, max_y }
    }

    /// Whether `y` lies inside the buildable range.
    pub const fn contains(&self, y: i32) -> bool {
        y >= self.min_y && y < self.max_y
    }
}

impl Default for HeightBounds {
    fn default() -> Self {
        DimensionId::DEFAULT.height_bounds()
    }
}
