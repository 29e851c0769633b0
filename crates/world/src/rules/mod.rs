//! Per-family placement and neighbor-update rules.
//!
//! Each family implements [`PlacementRule`]. [`BlockRule`] names every family
//! so rule tables can be configured by string and dispatched without boxing.

mod banner;
mod bed;
mod chest;
mod door;
mod fence;
mod fence_gate;
mod pairing;
mod plants;
mod rail;
mod signs;
mod simple;
mod stairs;
pub mod support;
mod tall_plant;
mod wall;

pub use banner::BannerRule;
pub use bed::BedRule;
pub use chest::ChestRule;
pub use door::{door_hinge, DoorRule};
pub use fence::{FenceRule, GlassPaneRule};
pub use fence_gate::FenceGateRule;
pub use plants::{CactusRule, CropRule, MushroomRule, SugarCaneRule};
pub use rail::{calculate_rail_shape, refresh_neighbor_rails, RailRule};
pub use signs::{CeilingHangingSignRule, StandingSignRule, WallHangingSignRule, WallSignRule};
pub use simple::{AxisRule, ButtonRule, DummyRule, HorizontalFacingRule, SlabRule, TrapdoorRule};
pub use stairs::{stair_shape_from_sides, StairsRule};
pub use tall_plant::TallPlantRule;
pub use wall::WallRule;

use crate::context::{PlacementContext, UpdateContext};
use crate::grid::WorldAccess;
use crate::state::BlockState;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Propagation radius of rules that only care about direct support.
pub const SUPPORT_UPDATE_DISTANCE: u32 = 1;

/// Propagation radius of connectivity rules (walls, fences, panes, gates).
pub const CONNECTION_UPDATE_DISTANCE: u32 = 10;

/// Placement and neighbor-update behavior of one block family.
pub trait PlacementRule {
    /// Compute the state to place, or `None` to refuse.
    ///
    /// Paired structures write their second cell through `world` and return
    /// the primary cell's state; the caller writes that one.
    fn place(&self, ctx: &PlacementContext<'_>, world: &mut dyn WorldAccess)
        -> Option<BlockState>;

    /// Re-validate after a neighbor changed. Air removes the block.
    fn update(&self, ctx: &UpdateContext<'_>, _world: &mut dyn WorldAccess) -> BlockState {
        ctx.current.clone()
    }

    /// How many propagation hops away a change may be and still reach this block.
    fn max_update_distance(&self) -> u32 {
        SUPPORT_UPDATE_DISTANCE
    }
}

/// Every rule family, by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlockRule {
    /// Keeps the default state.
    Dummy,
    /// Pillar axis from the clicked face.
    Axis,
    /// Faces the actor.
    HorizontalFacing,
    /// Stair facing, half and corner shape.
    Stairs,
    /// Rail track shape.
    Rail,
    /// Wall connections and post.
    Wall,
    /// Fence connections.
    Fence,
    /// Glass pane and iron bar connections.
    GlassPane,
    /// Fence gate facing and wall lowering.
    FenceGate,
    /// Two-tall door with hinge.
    Door,
    /// Two-cell bed.
    Bed,
    /// Standing or wall banner.
    Banner,
    /// Single or double chest.
    Chest,
    /// Two-tall plant.
    TallPlant,
    /// Crop on farmland.
    Crop,
    /// Mushroom or fungus.
    Mushroom,
    /// Sugar cane next to water.
    SugarCane,
    /// Cactus.
    Cactus,
    /// Slab halves and doubling.
    Slab,
    /// Trapdoor facing and half.
    Trapdoor,
    /// Button attachment.
    Button,
    /// Sign on the floor.
    StandingSign,
    /// Sign on a wall.
    WallSign,
    /// Hanging sign under a block.
    CeilingHangingSign,
    /// Hanging sign on a wall.
    WallHangingSign,
}

impl BlockRule {
    /// Every family, in declaration order.
    pub const ALL: [BlockRule; 25] = [
        BlockRule::Dummy,
        BlockRule::Axis,
        BlockRule::HorizontalFacing,
        BlockRule::Stairs,
        BlockRule::Rail,
        BlockRule::Wall,
        BlockRule::Fence,
        BlockRule::GlassPane,
        BlockRule::FenceGate,
        BlockRule::Door,
        BlockRule::Bed,
        BlockRule::Banner,
        BlockRule::Chest,
        BlockRule::TallPlant,
        BlockRule::Crop,
        BlockRule::Mushroom,
        BlockRule::SugarCane,
        BlockRule::Cactus,
        BlockRule::Slab,
        BlockRule::Trapdoor,
        BlockRule::Button,
        BlockRule::StandingSign,
        BlockRule::WallSign,
        BlockRule::CeilingHangingSign,
        BlockRule::WallHangingSign,
    ];

    /// Family name as used in configuration.
    pub const fn as_str(self) -> &'static str {
        match self {
            BlockRule::Dummy => "dummy",
            BlockRule::Axis => "axis",
            BlockRule::HorizontalFacing => "horizontal_facing",
            BlockRule::Stairs => "stairs",
            BlockRule::Rail => "rail",
            BlockRule::Wall => "wall",
            BlockRule::Fence => "fence",
            BlockRule::GlassPane => "glass_pane",
            BlockRule::FenceGate => "fence_gate",
            BlockRule::Door => "door",
            BlockRule::Bed => "bed",
            BlockRule::Banner => "banner",
            BlockRule::Chest => "chest",
            BlockRule::TallPlant => "tall_plant",
            BlockRule::Crop => "crop",
            BlockRule::Mushroom => "mushroom",
            BlockRule::SugarCane => "sugar_cane",
            BlockRule::Cactus => "cactus",
            BlockRule::Slab => "slab",
            BlockRule::Trapdoor => "trapdoor",
            BlockRule::Button => "button",
            BlockRule::StandingSign => "standing_sign",
            BlockRule::WallSign => "wall_sign",
            BlockRule::CeilingHangingSign => "ceiling_hanging_sign",
            BlockRule::WallHangingSign => "wall_hanging_sign",
        }
    }

    fn rule(self) -> &'static dyn PlacementRule {
        match self {
            BlockRule::Dummy => &DummyRule,
            BlockRule::Axis => &AxisRule,
            BlockRule::HorizontalFacing => &HorizontalFacingRule,
            BlockRule::Stairs => &StairsRule,
            BlockRule::Rail => &RailRule,
            BlockRule::Wall => &WallRule,
            BlockRule::Fence => &FenceRule,
            BlockRule::GlassPane => &GlassPaneRule,
            BlockRule::FenceGate => &FenceGateRule,
            BlockRule::Door => &DoorRule,
            BlockRule::Bed => &BedRule,
            BlockRule::Banner => &BannerRule,
            BlockRule::Chest => &ChestRule,
            BlockRule::TallPlant => &TallPlantRule,
            BlockRule::Crop => &CropRule,
            BlockRule::Mushroom => &MushroomRule,
            BlockRule::SugarCane => &SugarCaneRule,
            BlockRule::Cactus => &CactusRule,
            BlockRule::Slab => &SlabRule,
            BlockRule::Trapdoor => &TrapdoorRule,
            BlockRule::Button => &ButtonRule,
            BlockRule::StandingSign => &StandingSignRule,
            BlockRule::WallSign => &WallSignRule,
            BlockRule::CeilingHangingSign => &CeilingHangingSignRule,
            BlockRule::WallHangingSign => &WallHangingSignRule,
        }
    }
}

impl PlacementRule for BlockRule {
    fn place(
        &self,
        ctx: &PlacementContext<'_>,
        world: &mut dyn WorldAccess,
    ) -> Option<BlockState> {
        self.rule().place(ctx, world)
    }

    fn update(&self, ctx: &UpdateContext<'_>, world: &mut dyn WorldAccess) -> BlockState {
        self.rule().update(ctx, world)
    }

    fn max_update_distance(&self) -> u32 {
        self.rule().max_update_distance()
    }
}

impl fmt::Display for BlockRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned for an unknown rule family name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown rule family `{0}`")]
pub struct UnknownRuleError(pub String);

impl FromStr for BlockRule {
    type Err = UnknownRuleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BlockRule::ALL
            .iter()
            .copied()
            .find(|rule| rule.as_str() == s)
            .ok_or_else(|| UnknownRuleError(s.to_string()))
    }
}
