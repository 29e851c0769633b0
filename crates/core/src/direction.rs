//! Cardinal directions, axes and clicked faces.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Error returned when a property string does not name a direction, axis or face.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {kind} `{value}`")]
pub struct ParseDirectionError {
    kind: &'static str,
    value: String,
}

impl ParseDirectionError {
    fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.to_string(),
        }
    }
}

/// Coordinate axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    /// East/west.
    X,
    /// Up/down.
    Y,
    /// North/south.
    Z,
}

impl Axis {
    /// Property value string.
    pub const fn as_str(self) -> &'static str {
        match self {
            Axis::X => "x",
            Axis::Y => "y",
            Axis::Z => "z",
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Axis {
    type Err = ParseDirectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "x" => Ok(Axis::X),
            "y" => Ok(Axis::Y),
            "z" => Ok(Axis::Z),
            other => Err(ParseDirectionError::new("axis", other)),
        }
    }
}

/// One of the six unit directions of the grid.
///
/// North is -z, south is +z, west is -x, east is +x.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// -y
    Down,
    /// +y
    Up,
    /// -z
    North,
    /// +z
    South,
    /// -x
    West,
    /// +x
    East,
}

impl Direction {
    /// All six directions in declaration order.
    pub const ALL: [Direction; 6] = [
        Direction::Down,
        Direction::Up,
        Direction::North,
        Direction::South,
        Direction::West,
        Direction::East,
    ];

    /// Horizontal directions in clockwise order starting at north.
    pub const HORIZONTAL: [Direction; 4] = [
        Direction::North,
        Direction::East,
        Direction::South,
        Direction::West,
    ];

    /// Unit offset `(dx, dy, dz)`.
    pub const fn normal(self) -> (i32, i32, i32) {
        match self {
            Direction::Down => (0, -1, 0),
            Direction::Up => (0, 1, 0),
            Direction::North => (0, 0, -1),
            Direction::South => (0, 0, 1),
            Direction::West => (-1, 0, 0),
            Direction::East => (1, 0, 0),
        }
    }

    /// The direction pointing the other way.
    pub const fn opposite(self) -> Self {
        match self {
            Direction::Down => Direction::Up,
            Direction::Up => Direction::Down,
            Direction::North => Direction::South,
            Direction::South => Direction::North,
            Direction::West => Direction::East,
            Direction::East => Direction::West,
        }
    }

    /// Rotate a quarter turn clockwise seen from above. Vertical directions are unchanged.
    pub const fn clockwise(self) -> Self {
        match self {
            Direction::North => Direction::East,
            Direction::East => Direction::South,
            Direction::South => Direction::West,
            Direction::West => Direction::North,
            vertical => vertical,
        }
    }

    /// Rotate a quarter turn counter-clockwise seen from above. Vertical directions are unchanged.
    pub const fn counter_clockwise(self) -> Self {
        match self {
            Direction::North => Direction::West,
            Direction::West => Direction::South,
            Direction::South => Direction::East,
            Direction::East => Direction::North,
            vertical => vertical,
        }
    }

    /// Axis this direction lies on.
    pub const fn axis(self) -> Axis {
        match self {
            Direction::Down | Direction::Up => Axis::Y,
            Direction::North | Direction::South => Axis::Z,
            Direction::West | Direction::East => Axis::X,
        }
    }

    /// True for north/south/east/west.
    pub const fn is_horizontal(self) -> bool {
        !matches!(self, Direction::Down | Direction::Up)
    }

    /// Property value string.
    pub const fn as_str(self) -> &'static str {
        match self {
            Direction::Down => "down",
            Direction::Up => "up",
            Direction::North => "north",
            Direction::South => "south",
            Direction::West => "west",
            Direction::East => "east",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Direction {
    type Err = ParseDirectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "down" => Ok(Direction::Down),
            "up" => Ok(Direction::Up),
            "north" => Ok(Direction::North),
            "south" => Ok(Direction::South),
            "west" => Ok(Direction::West),
            "east" => Ok(Direction::East),
            other => Err(ParseDirectionError::new("direction", other)),
        }
    }
}

/// The face of a cell that was clicked (or from which an update arrived).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlockFace {
    /// Bottom face (-y).
    Bottom,
    /// Top face (+y).
    Top,
    /// North face (-z).
    North,
    /// South face (+z).
    South,
    /// West face (-x).
    West,
    /// East face (+x).
    East,
}

impl BlockFace {
    /// Direction the face points towards.
    pub const fn to_direction(self) -> Direction {
        match self {
            BlockFace::Bottom => Direction::Down,
            BlockFace::Top => Direction::Up,
            BlockFace::North => Direction::North,
            BlockFace::South => Direction::South,
            BlockFace::West => Direction::West,
            BlockFace::East => Direction::East,
        }
    }

    /// Face pointing towards `direction`.
    pub const fn from_direction(direction: Direction) -> Self {
        match direction {
            Direction::Down => BlockFace::Bottom,
            Direction::Up => BlockFace::Top,
            Direction::North => BlockFace::North,
            Direction::South => BlockFace::South,
            Direction::West => BlockFace::West,
            Direction::East => BlockFace::East,
        }
    }

    /// The face on the other side of the cell.
    pub const fn opposite(self) -> Self {
        Self::from_direction(self.to_direction().opposite())
    }

    /// Same face or its opposite.
    pub fn is_similar(self, other: BlockFace) -> bool {
        self == other || self == other.opposite()
    }

    /// Property value string.
    pub const fn as_str(self) -> &'static str {
        match self {
            BlockFace::Bottom => "bottom",
            BlockFace::Top => "top",
            BlockFace::North => "north",
            BlockFace::South => "south",
            BlockFace::West => "west",
            BlockFace::East => "east",
        }
    }
}

impl From<Direction> for BlockFace {
    fn from(direction: Direction) -> Self {
        Self::from_direction(direction)
    }
}

impl From<BlockFace> for Direction {
    fn from(face: BlockFace) -> Self {
        face.to_direction()
    }
}

impl FromStr for BlockFace {
    type Err = ParseDirectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "bottom" => Ok(BlockFace::Bottom),
            "top" => Ok(BlockFace::Top),
            "north" => Ok(BlockFace::North),
            "south" => Ok(BlockFace::South),
            "west" => Ok(BlockFace::West),
            "east" => Ok(BlockFace::East),
            other => Err(ParseDirectionError::new("face", other)),
        }
    }
}
