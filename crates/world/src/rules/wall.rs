//! Wall connections and the center post.

use super::support::{cannot_connect_to, tags};
use super::{PlacementRule, CONNECTION_UPDATE_DISTANCE};
use crate::catalog::BlockCatalog;
use crate::context::{PlacementContext, UpdateContext};
use crate::grid::{BlockGetter, DeferredWork, WorldAccess};
use crate::properties::{names, WallSide};
use crate::state::BlockState;
use blockplace_core::{Axis, BlockPos, Direction};

/// Every wall type.
#[derive(Debug, Clone, Copy, Default)]
pub struct WallRule;

impl PlacementRule for WallRule {
    fn place(&self, ctx: &PlacementContext<'_>, world: &mut dyn WorldAccess) -> Option<BlockState> {
        let placed = wall_shape(&*world, ctx.catalog, ctx.position, ctx.block, false);
        world.schedule(DeferredWork::HorizontalRefresh {
            origin: ctx.position,
        });
        Some(placed)
    }

    fn update(&self, ctx: &UpdateContext<'_>, world: &mut dyn WorldAccess) -> BlockState {
        let waterlogged = ctx
            .current
            .get::<bool>(names::WATERLOGGED)
            .unwrap_or(false);
        wall_shape(&*world, ctx.catalog, ctx.position, ctx.current, waterlogged)
    }

    fn max_update_distance(&self) -> u32 {
        CONNECTION_UPDATE_DISTANCE
    }
}

fn wall_shape<W: BlockGetter + ?Sized>(
    world: &W,
    catalog: &dyn BlockCatalog,
    pos: BlockPos,
    base: &BlockState,
    waterlogged: bool,
) -> BlockState {
    let above = world.block(pos.above());
    let mut placed = base.with(names::WATERLOGGED, waterlogged);
    for dir in Direction::HORIZONTAL {
        let neighbor = world.block(pos.relative(dir));
        let side = if !connects_to(catalog, &neighbor, dir) {
            WallSide::None
        } else if is_tall_side(catalog, &above, dir) {
            WallSide::Tall
        } else {
            WallSide::Low
        };
        placed = placed.with(names::side(dir), side);
    }
    let post = should_raise_post(catalog, &placed, &above);
    placed.with(names::UP, post)
}

fn connects_to(catalog: &dyn BlockCatalog, neighbor: &BlockState, direction: Direction) -> bool {
    let sturdy = catalog.is_face_full(neighbor, direction.opposite());
    catalog.has_tag(neighbor, tags::WALLS)
        || (catalog.has_tag(neighbor, tags::FENCE_GATES) && is_gate_aligned(neighbor, direction))
        || neighbor.is("iron_bars")
        || (!cannot_connect_to(catalog, neighbor) && sturdy)
}

/// A gate lines up with a wall when its hinge axis runs perpendicular to the
/// direction from the wall to the gate.
pub(crate) fn is_gate_aligned(gate: &BlockState, direction: Direction) -> bool {
    let Some(facing) = gate.get::<Direction>(names::FACING) else {
        return false;
    };
    if !facing.is_horizontal() || !direction.is_horizontal() {
        return false;
    }
    let gate_axis = facing.axis();
    let side_axis = match direction.axis() {
        Axis::Z => Axis::X,
        _ => Axis::Z,
    };
    gate_axis == side_axis
}

fn is_tall_side(catalog: &dyn BlockCatalog, above: &BlockState, direction: Direction) -> bool {
    if catalog.has_tag(above, tags::WALLS) {
        return above
            .get::<WallSide>(names::side(direction))
            .is_some_and(|side| side != WallSide::None);
    }
    catalog.is_face_full(above, Direction::Down)
}

fn should_raise_post(catalog: &dyn BlockCatalog, wall: &BlockState, above: &BlockState) -> bool {
    if catalog.has_tag(above, tags::WALLS) && above.get::<bool>(names::UP) == Some(true) {
        return true;
    }

    let side = |dir: Direction| {
        wall.get::<WallSide>(names::side(dir))
            .unwrap_or(WallSide::None)
    };
    let (north, south) = (side(Direction::North), side(Direction::South));
    let (east, west) = (side(Direction::East), side(Direction::West));

    let all_none = [north, south, east, west]
        .iter()
        .all(|s| *s == WallSide::None);
    let asymmetric = (north == WallSide::None) != (south == WallSide::None)
        || (east == WallSide::None) != (west == WallSide::None);
    if all_none || asymmetric {
        return true;
    }

    let north_south_tall = north == WallSide::Tall && south == WallSide::Tall;
    let east_west_tall = east == WallSide::Tall && west == WallSide::Tall;
    !(north_south_tall || east_west_tall)
}
