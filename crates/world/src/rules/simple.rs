//! Orientation-only families: their state depends on the click, never on neighbors.

use super::PlacementRule;
use crate::context::PlacementContext;
use crate::grid::WorldAccess;
use crate::properties::{names, AttachFace, Half, SlabType};
use crate::state::BlockState;
use blockplace_core::{BlockFace, Direction};

/// Places the default state unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct DummyRule;

impl PlacementRule for DummyRule {
    fn place(&self, ctx: &PlacementContext<'_>, _world: &mut dyn WorldAccess) -> Option<BlockState> {
        Some(ctx.block.clone())
    }
}

/// Logs and pillars align with the clicked face.
#[derive(Debug, Clone, Copy, Default)]
pub struct AxisRule;

impl PlacementRule for AxisRule {
    fn place(&self, ctx: &PlacementContext<'_>, _world: &mut dyn WorldAccess) -> Option<BlockState> {
        let axis = ctx.face_or_top().to_direction().axis();
        Some(ctx.block.with(names::AXIS, axis))
    }
}

/// Furnace-like blocks face the actor.
#[derive(Debug, Clone, Copy, Default)]
pub struct HorizontalFacingRule;

impl PlacementRule for HorizontalFacingRule {
    fn place(&self, ctx: &PlacementContext<'_>, _world: &mut dyn WorldAccess) -> Option<BlockState> {
        let facing = match ctx.pose {
            Some(pose) => pose.horizontal_direction().opposite(),
            None => Direction::North,
        };
        Some(ctx.block.with(names::FACING, facing))
    }
}

/// Slabs pick a half from the click, or double up when placed into a matching half slab.
#[derive(Debug, Clone, Copy, Default)]
pub struct SlabRule;

impl PlacementRule for SlabRule {
    fn place(&self, ctx: &PlacementContext<'_>, world: &mut dyn WorldAccess) -> Option<BlockState> {
        let existing = world.block(ctx.position);
        if existing.same_block(ctx.block)
            && existing.get::<SlabType>(names::TYPE) != Some(SlabType::Double)
        {
            return Some(existing.with(names::TYPE, SlabType::Double));
        }

        let face = ctx.face_or_top();
        let bottom = face != BlockFace::Bottom
            && (face == BlockFace::Top || ctx.cursor_or_center().y <= 0.5);
        let slab_type = if bottom { SlabType::Bottom } else { SlabType::Top };
        Some(ctx.block.with(names::TYPE, slab_type))
    }
}

/// Trapdoors hinge on the clicked side or lie flat against the clicked top/bottom.
#[derive(Debug, Clone, Copy, Default)]
pub struct TrapdoorRule;

impl PlacementRule for TrapdoorRule {
    fn place(&self, ctx: &PlacementContext<'_>, _world: &mut dyn WorldAccess) -> Option<BlockState> {
        let face = ctx.face_or_top();
        let (facing, half) = if face.to_direction().is_horizontal() {
            let half = if ctx.cursor_or_center().y > 0.5 {
                Half::Top
            } else {
                Half::Bottom
            };
            (face.to_direction(), half)
        } else {
            let half = if face == BlockFace::Top {
                Half::Bottom
            } else {
                Half::Top
            };
            (ctx.yaw_direction().opposite(), half)
        };

        Some(
            ctx.block
                .with(names::FACING, facing)
                .with(names::HALF, half)
                .with(names::OPEN, false)
                .with(names::POWERED, false)
                .with(names::WATERLOGGED, false),
        )
    }
}

/// Buttons attach to the clicked face.
#[derive(Debug, Clone, Copy, Default)]
pub struct ButtonRule;

impl PlacementRule for ButtonRule {
    fn place(&self, ctx: &PlacementContext<'_>, _world: &mut dyn WorldAccess) -> Option<BlockState> {
        let (attach, facing) = match ctx.face_or_top() {
            BlockFace::Top => (AttachFace::Floor, ctx.direction_or_north()),
            BlockFace::Bottom => (AttachFace::Ceiling, ctx.direction_or_north()),
            side => (AttachFace::Wall, side.to_direction()),
        };
        Some(
            ctx.block
                .with(names::FACE, attach)
                .with(names::FACING, facing)
                .with(names::POWERED, false),
        )
    }
}
