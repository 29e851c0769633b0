//! Cell coordinates, actor pose and the yaw/pitch conversions used by placement.
//!
//! Yaw is in degrees with 0 facing south (+z) and increasing clockwise seen
//! from above (90 = west, 180 = north, 270 = east). Pitch is in degrees with
//! positive values looking down.

use crate::direction::Direction;
use glam::DVec3;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Integer coordinate of a grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BlockPos {
    /// X coordinate (east is positive).
    pub x: i32,
    /// Y coordinate (up is positive).
    pub y: i32,
    /// Z coordinate (south is positive).
    pub z: i32,
}

impl BlockPos {
    /// Grid origin.
    pub const ORIGIN: Self = Self::new(0, 0, 0);

    /// Create a position.
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// Offset by an arbitrary delta.
    pub const fn offset(self, dx: i32, dy: i32, dz: i32) -> Self {
        Self::new(self.x + dx, self.y + dy, self.z + dz)
    }

    /// Neighbor one step towards `direction`.
    pub const fn relative(self, direction: Direction) -> Self {
        let (dx, dy, dz) = direction.normal();
        self.offset(dx, dy, dz)
    }

    /// Cell directly above.
    pub const fn above(self) -> Self {
        self.offset(0, 1, 0)
    }

    /// Cell directly below.
    pub const fn below(self) -> Self {
        self.offset(0, -1, 0)
    }

    /// The six face neighbors, in [`Direction::ALL`] order.
    pub fn neighbors(self) -> [(Direction, BlockPos); 6] {
        Direction::ALL.map(|dir| (dir, self.relative(dir)))
    }
}

impl fmt::Display for BlockPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

impl From<(i32, i32, i32)> for BlockPos {
    fn from((x, y, z): (i32, i32, i32)) -> Self {
        Self::new(x, y, z)
    }
}

/// Where the placing actor stands and where it looks.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pose {
    /// Eye position in world space.
    pub position: DVec3,
    /// Yaw in degrees (0 = south, clockwise).
    pub yaw: f32,
    /// Pitch in degrees (positive looks down).
    pub pitch: f32,
}

impl Pose {
    /// Create a pose.
    pub fn new(position: DVec3, yaw: f32, pitch: f32) -> Self {
        Self {
            position,
            yaw,
            pitch,
        }
    }

    /// Pose at the origin looking along `yaw`/`pitch`.
    pub fn looking(yaw: f32, pitch: f32) -> Self {
        Self::new(DVec3::ZERO, yaw, pitch)
    }

    /// Horizontal direction the actor faces.
    pub fn horizontal_direction(&self) -> Direction {
        horizontal_direction_from_yaw(self.yaw)
    }
}

/// Map a yaw angle to the cardinal direction it falls closest to.
///
/// Buckets are 90° wide and centered on the cardinals; a yaw sitting exactly
/// on a boundary belongs to the bucket that starts there (45° is west).
pub fn horizontal_direction_from_yaw(yaw: f32) -> Direction {
    const BUCKETS: [Direction; 4] = [
        Direction::South,
        Direction::West,
        Direction::North,
        Direction::East,
    ];
    let normalized = (f64::from(yaw) + 45.0).rem_euclid(360.0);
    let index = (normalized / 90.0).floor() as usize;
    BUCKETS[index % 4]
}

/// Quantize a yaw into the 16-step rotation used by signs and banners.
pub fn rotation16(yaw: f32) -> u8 {
    let steps = ((f64::from(yaw) + 180.0) * 16.0 / 360.0 + 0.5).floor() as i64;
    (steps & 15) as u8
}

const NO_POSE_ORDER: [Direction; 6] = [
    Direction::Down,
    Direction::North,
    Direction::East,
    Direction::South,
    Direction::West,
    Direction::Up,
];

/// Order the six directions by how closely they align with the look vector.
///
/// The dominant axis comes first, the remaining two are ranked by weight, and
/// entries 3..6 are the opposites of entries 2, 1 and 0. Without a pose the
/// fixed order down, north, east, south, west, up is returned.
pub fn nearest_looking_directions(pose: Option<&Pose>) -> [Direction; 6] {
    let Some(pose) = pose else {
        return NO_POSE_ORDER;
    };

    let pitch_rad = pose.pitch * std::f32::consts::PI / 180.0;
    let yaw_rad = -pose.yaw * std::f32::consts::PI / 180.0;
    let pitch_sin = pitch_rad.sin();
    let pitch_cos = pitch_rad.cos();
    let yaw_sin = yaw_rad.sin();
    let yaw_cos = yaw_rad.cos();

    let east_west = if yaw_sin > 0.0 {
        Direction::East
    } else {
        Direction::West
    };
    let up_down = if pitch_sin < 0.0 {
        Direction::Up
    } else {
        Direction::Down
    };
    let south_north = if yaw_cos > 0.0 {
        Direction::South
    } else {
        Direction::North
    };

    let horizontal_ew = yaw_sin.abs();
    let vertical = pitch_sin.abs();
    let horizontal_sn = yaw_cos.abs();
    let ew_weight = horizontal_ew * pitch_cos;
    let sn_weight = horizontal_sn * pitch_cos;

    let (first, second, third) = if horizontal_ew > horizontal_sn {
        if vertical > ew_weight {
            (up_down, east_west, south_north)
        } else if sn_weight > vertical {
            (east_west, south_north, up_down)
        } else {
            (east_west, up_down, south_north)
        }
    } else if vertical > sn_weight {
        (up_down, south_north, east_west)
    } else if ew_weight > vertical {
        (south_north, east_west, up_down)
    } else {
        (south_north, up_down, east_west)
    };

    [
        first,
        second,
        third,
        third.opposite(),
        second.opposite(),
        first.opposite(),
    ]
}
