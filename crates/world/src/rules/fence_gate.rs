//! Fence gates: facing from the actor, lowered when set into a wall.

use super::support::tags;
use super::{PlacementRule, CONNECTION_UPDATE_DISTANCE};
use crate::catalog::BlockCatalog;
use crate::context::{PlacementContext, UpdateContext};
use crate::grid::{BlockGetter, DeferredWork, WorldAccess};
use crate::properties::{names, PropertyValue};
use crate::state::BlockState;
use blockplace_core::{BlockPos, Direction};

/// Fence gates of every material.
#[derive(Debug, Clone, Copy, Default)]
pub struct FenceGateRule;

impl PlacementRule for FenceGateRule {
    fn place(&self, ctx: &PlacementContext<'_>, world: &mut dyn WorldAccess) -> Option<BlockState> {
        let facing = ctx.yaw_direction();
        let in_wall = is_in_wall(&*world, ctx.catalog, ctx.position, facing);
        let placed = ctx
            .block
            .with(names::FACING, facing)
            .with(names::OPEN, false)
            .with(names::POWERED, false)
            .with(names::IN_WALL, in_wall);
        world.schedule(DeferredWork::HorizontalRefresh {
            origin: ctx.position,
        });
        Some(placed)
    }

    fn update(&self, ctx: &UpdateContext<'_>, world: &mut dyn WorldAccess) -> BlockState {
        let in_wall = match ctx.current.property(names::FACING) {
            None => is_in_wall(&*world, ctx.catalog, ctx.position, Direction::North),
            Some(raw) => Direction::parse_value(raw)
                .is_some_and(|facing| is_in_wall(&*world, ctx.catalog, ctx.position, facing)),
        };
        ctx.current.with(names::IN_WALL, in_wall)
    }

    fn max_update_distance(&self) -> u32 {
        CONNECTION_UPDATE_DISTANCE
    }
}

/// Walls on either flank (perpendicular to facing) lower the gate.
fn is_in_wall<W: BlockGetter + ?Sized>(
    world: &W,
    catalog: &dyn BlockCatalog,
    pos: BlockPos,
    facing: Direction,
) -> bool {
    if !facing.is_horizontal() {
        return false;
    }
    [facing.clockwise(), facing.counter_clockwise()]
        .into_iter()
        .any(|flank| catalog.has_tag(&world.block(pos.relative(flank)), tags::WALLS))
}
