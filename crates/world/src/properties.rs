//! Typed views over string block-state properties.
//!
//! States store every property as a string. Rules read them through
//! [`PropertyValue`], which yields `None` for missing or malformed values so a
//! neighbor with garbage properties simply fails to connect.

use blockplace_core::{Axis, BlockFace, Direction};

/// Property names shared by several rule families.
pub mod names {
    /// Horizontal (or full) facing.
    pub const FACING: &str = "facing";
    /// Stair/trapdoor half or door/plant half.
    pub const HALF: &str = "half";
    /// Stair or rail shape.
    pub const SHAPE: &str = "shape";
    /// Waterlogged flag.
    pub const WATERLOGGED: &str = "waterlogged";
    /// Redstone powered flag.
    pub const POWERED: &str = "powered";
    /// Open flag for doors, gates and trapdoors.
    pub const OPEN: &str = "open";
    /// 16-step rotation of standing signs and banners.
    pub const ROTATION: &str = "rotation";
    /// Pillar axis.
    pub const AXIS: &str = "axis";
    /// Wall post flag.
    pub const UP: &str = "up";
    /// Door hinge side.
    pub const HINGE: &str = "hinge";
    /// Bed part.
    pub const PART: &str = "part";
    /// Bed occupied flag.
    pub const OCCUPIED: &str = "occupied";
    /// Chest pairing.
    pub const TYPE: &str = "type";
    /// Fence gate wall flag.
    pub const IN_WALL: &str = "in_wall";
    /// Hanging sign attachment flag.
    pub const ATTACHED: &str = "attached";
    /// Button attachment face.
    pub const FACE: &str = "face";

    use blockplace_core::Direction;

    /// Connection property name for a horizontal side (`north`, `east`, ...).
    pub fn side(direction: Direction) -> &'static str {
        direction.as_str()
    }
}

/// A value that can be stored in a block-state property.
pub trait PropertyValue: Sized {
    /// Parse a stored value. Malformed input yields `None`.
    fn parse_value(raw: &str) -> Option<Self>;

    /// Encode for storage.
    fn to_value(&self) -> String;
}

impl PropertyValue for bool {
    fn parse_value(raw: &str) -> Option<Self> {
        match raw {
            "true" => Some(true),
            "false" => Some(false),
            _ => None,
        }
    }

    fn to_value(&self) -> String {
        self.to_string()
    }
}

impl PropertyValue for u8 {
    fn parse_value(raw: &str) -> Option<Self> {
        raw.parse().ok()
    }

    fn to_value(&self) -> String {
        self.to_string()
    }
}

impl PropertyValue for Direction {
    fn parse_value(raw: &str) -> Option<Self> {
        raw.parse().ok()
    }

    fn to_value(&self) -> String {
        self.as_str().to_string()
    }
}

impl PropertyValue for Axis {
    fn parse_value(raw: &str) -> Option<Self> {
        raw.parse().ok()
    }

    fn to_value(&self) -> String {
        self.as_str().to_string()
    }
}

impl PropertyValue for BlockFace {
    fn parse_value(raw: &str) -> Option<Self> {
        raw.parse().ok()
    }

    fn to_value(&self) -> String {
        self.as_str().to_string()
    }
}

macro_rules! property_enum {
    (
        $(#[$meta:meta])*
        $name:ident { $($(#[$vmeta:meta])* $variant:ident => $text:literal),+ $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $($(#[$vmeta])* $variant),+
        }

        impl $name {
            /// Every value, in declaration order.
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// Stored string form.
            pub const fn as_str(self) -> &'static str {
                match self {
                    $($name::$variant => $text),+
                }
            }
        }

        impl PropertyValue for $name {
            fn parse_value(raw: &str) -> Option<Self> {
                match raw {
                    $($text => Some($name::$variant),)+
                    _ => None,
                }
            }

            fn to_value(&self) -> String {
                self.as_str().to_string()
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

property_enum! {
    /// Top or bottom half of a stair or trapdoor.
    Half {
        /// Upper half.
        Top => "top",
        /// Lower half.
        Bottom => "bottom",
    }
}

property_enum! {
    /// Which cell of a two-tall structure (doors, tall plants).
    DoubleBlockHalf {
        /// The upper cell.
        Upper => "upper",
        /// The lower cell.
        Lower => "lower",
    }
}

impl DoubleBlockHalf {
    /// The other half.
    pub const fn opposite(self) -> Self {
        match self {
            DoubleBlockHalf::Upper => DoubleBlockHalf::Lower,
            DoubleBlockHalf::Lower => DoubleBlockHalf::Upper,
        }
    }
}

property_enum! {
    /// Stair corner shape.
    StairShape {
        /// No corner.
        Straight => "straight",
        /// Inner corner turning left.
        InnerLeft => "inner_left",
        /// Inner corner turning right.
        InnerRight => "inner_right",
        /// Outer corner turning left.
        OuterLeft => "outer_left",
        /// Outer corner turning right.
        OuterRight => "outer_right",
    }
}

property_enum! {
    /// Track layout of a rail.
    RailShape {
        /// Straight along z.
        NorthSouth => "north_south",
        /// Straight along x.
        EastWest => "east_west",
        /// Rising towards +x.
        AscendingEast => "ascending_east",
        /// Rising towards -x.
        AscendingWest => "ascending_west",
        /// Rising towards -z.
        AscendingNorth => "ascending_north",
        /// Rising towards +z.
        AscendingSouth => "ascending_south",
        /// Curve joining south and east.
        SouthEast => "south_east",
        /// Curve joining south and west.
        SouthWest => "south_west",
        /// Curve joining north and west.
        NorthWest => "north_west",
        /// Curve joining north and east.
        NorthEast => "north_east",
    }
}

impl RailShape {
    /// Direction the rail climbs towards, for ascending shapes.
    pub const fn ascending_direction(self) -> Option<Direction> {
        match self {
            RailShape::AscendingEast => Some(Direction::East),
            RailShape::AscendingWest => Some(Direction::West),
            RailShape::AscendingNorth => Some(Direction::North),
            RailShape::AscendingSouth => Some(Direction::South),
            _ => None,
        }
    }
}

property_enum! {
    /// Height of a wall connection.
    WallSide {
        /// No connection.
        None => "none",
        /// Regular connection.
        Low => "low",
        /// Connection reaching the top of the cell.
        Tall => "tall",
    }
}

property_enum! {
    /// Chest pairing.
    ChestType {
        /// Unpaired.
        Single => "single",
        /// Left half of a double chest (partner on the clockwise side of facing).
        Left => "left",
        /// Right half of a double chest (partner on the counter-clockwise side of facing).
        Right => "right",
    }
}

impl ChestType {
    /// The type the partner chest must carry.
    pub const fn opposite(self) -> Self {
        match self {
            ChestType::Single => ChestType::Single,
            ChestType::Left => ChestType::Right,
            ChestType::Right => ChestType::Left,
        }
    }
}

property_enum! {
    /// Bed cell.
    BedPart {
        /// Pillow end.
        Head => "head",
        /// Foot end.
        Foot => "foot",
    }
}

impl BedPart {
    /// The partner cell's part.
    pub const fn opposite(self) -> Self {
        match self {
            BedPart::Head => BedPart::Foot,
            BedPart::Foot => BedPart::Head,
        }
    }
}

property_enum! {
    /// Door hinge side, seen from the direction the door faces.
    DoorHinge {
        /// Hinge on the left.
        Left => "left",
        /// Hinge on the right.
        Right => "right",
    }
}

property_enum! {
    /// Slab occupancy.
    SlabType {
        /// Upper half.
        Top => "top",
        /// Lower half.
        Bottom => "bottom",
        /// Both halves.
        Double => "double",
    }
}

property_enum! {
    /// Where a button is attached.
    AttachFace {
        /// On the top of the block below.
        Floor => "floor",
        /// On the side of a neighbor.
        Wall => "wall",
        /// Under the block above.
        Ceiling => "ceiling",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enum_values_round_trip_through_strings() {
        for shape in RailShape::ALL {
            assert_eq!(RailShape::parse_value(shape.as_str()), Some(*shape));
        }
        for shape in StairShape::ALL {
            assert_eq!(StairShape::parse_value(&shape.to_value()), Some(*shape));
        }
    }

    #[test]
    fn malformed_values_parse_to_none() {
        assert_eq!(Half::parse_value("middle"), None);
        assert_eq!(bool::parse_value("yes"), None);
        assert_eq!(u8::parse_value("-1"), None);
        assert_eq!(Direction::parse_value("up-ish"), None);
    }

    #[test]
    fn opposites() {
        assert_eq!(ChestType::Left.opposite(), ChestType::Right);
        assert_eq!(ChestType::Single.opposite(), ChestType::Single);
        assert_eq!(DoubleBlockHalf::Upper.opposite(), DoubleBlockHalf::Lower);
    }

    #[test]
    fn ascending_rails_report_their_slope() {
        assert_eq!(
            RailShape::AscendingNorth.ascending_direction(),
            Some(Direction::North)
        );
        assert_eq!(RailShape::SouthEast.ascending_direction(), None);
    }
}
