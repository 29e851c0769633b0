//! Fence and pane connections: one boolean per horizontal side.

use super::support::{cannot_connect_to, tags};
use super::wall::is_gate_aligned;
use super::{PlacementRule, CONNECTION_UPDATE_DISTANCE};
use crate::catalog::BlockCatalog;
use crate::context::{PlacementContext, UpdateContext};
use crate::grid::{BlockGetter, DeferredWork, WorldAccess};
use crate::properties::names;
use crate::state::BlockState;
use blockplace_core::{BlockPos, Direction};

type Connects = fn(&dyn BlockCatalog, &BlockState, &BlockState, Direction) -> bool;

fn connect_sides<W: BlockGetter + ?Sized>(
    world: &W,
    catalog: &dyn BlockCatalog,
    pos: BlockPos,
    base: &BlockState,
    waterlogged: bool,
    connects: Connects,
) -> BlockState {
    let mut state = base.with(names::WATERLOGGED, waterlogged);
    for dir in Direction::HORIZONTAL {
        let neighbor = world.block(pos.relative(dir));
        let side = connects(catalog, base, &neighbor, dir);
        state = state.with(names::side(dir), side);
    }
    state
}

/// Fences of every material.
#[derive(Debug, Clone, Copy, Default)]
pub struct FenceRule;

impl PlacementRule for FenceRule {
    fn place(&self, ctx: &PlacementContext<'_>, world: &mut dyn WorldAccess) -> Option<BlockState> {
        let placed = connect_sides(
            &*world,
            ctx.catalog,
            ctx.position,
            ctx.block,
            false,
            fence_connects,
        );
        world.schedule(DeferredWork::HorizontalRefresh {
            origin: ctx.position,
        });
        Some(placed)
    }

    fn update(&self, ctx: &UpdateContext<'_>, world: &mut dyn WorldAccess) -> BlockState {
        let waterlogged = ctx.current.get(names::WATERLOGGED).unwrap_or(false);
        connect_sides(
            &*world,
            ctx.catalog,
            ctx.position,
            ctx.current,
            waterlogged,
            fence_connects,
        )
    }

    fn max_update_distance(&self) -> u32 {
        CONNECTION_UPDATE_DISTANCE
    }
}

fn fence_connects(
    catalog: &dyn BlockCatalog,
    fence: &BlockState,
    neighbor: &BlockState,
    direction: Direction,
) -> bool {
    let sturdy = catalog.is_face_full(neighbor, direction.opposite());
    (!cannot_connect_to(catalog, neighbor) && sturdy)
        || is_same_fence_family(catalog, fence, neighbor)
        || (catalog.has_tag(neighbor, tags::FENCE_GATES) && is_gate_aligned(neighbor, direction))
}

/// Wooden fences join wooden fences; nether brick fences join each other.
fn is_same_fence_family(catalog: &dyn BlockCatalog, fence: &BlockState, neighbor: &BlockState) -> bool {
    if catalog.has_tag(neighbor, tags::FENCES)
        && catalog.has_tag(neighbor, tags::WOODEN_FENCES)
            == catalog.has_tag(fence, tags::WOODEN_FENCES)
    {
        return true;
    }

    let own = fence.key().path();
    let other = neighbor.key().path();
    if own.ends_with("_fence") && other.ends_with("_fence") {
        return own.contains("nether_brick_fence") == other.contains("nether_brick_fence");
    }
    false
}

/// Glass panes and iron bars.
#[derive(Debug, Clone, Copy, Default)]
pub struct GlassPaneRule;

impl PlacementRule for GlassPaneRule {
    fn place(&self, ctx: &PlacementContext<'_>, world: &mut dyn WorldAccess) -> Option<BlockState> {
        let placed = connect_sides(
            &*world,
            ctx.catalog,
            ctx.position,
            ctx.block,
            false,
            pane_connects,
        );
        world.schedule(DeferredWork::HorizontalRefresh {
            origin: ctx.position,
        });
        Some(placed)
    }

    fn update(&self, ctx: &UpdateContext<'_>, world: &mut dyn WorldAccess) -> BlockState {
        let waterlogged = ctx.current.get(names::WATERLOGGED).unwrap_or(false);
        connect_sides(
            &*world,
            ctx.catalog,
            ctx.position,
            ctx.current,
            waterlogged,
            pane_connects,
        )
    }

    fn max_update_distance(&self) -> u32 {
        CONNECTION_UPDATE_DISTANCE
    }
}

fn pane_connects(
    catalog: &dyn BlockCatalog,
    _pane: &BlockState,
    neighbor: &BlockState,
    direction: Direction,
) -> bool {
    let sturdy = catalog.is_face_full(neighbor, direction.opposite());
    let pane_like = neighbor.is("iron_bars")
        || neighbor.is("glass_pane")
        || neighbor.key().path().ends_with("_stained_glass_pane");
    (!cannot_connect_to(catalog, neighbor) && sturdy)
        || pane_like
        || catalog.has_tag(neighbor, tags::WALLS)
}
