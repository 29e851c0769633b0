//! Two-tall doors.
//!
//! The upper half is written at placement time; the lower half is returned.
//! Each half removes itself once its partner is gone.

use super::pairing::is_free_cell;
use super::support::tags;
use super::PlacementRule;
use crate::catalog::BlockCatalog;
use crate::context::{PlacementContext, UpdateContext};
use crate::grid::{BlockGetter, WorldAccess};
use crate::properties::{names, DoorHinge, DoubleBlockHalf};
use crate::state::BlockState;
use blockplace_core::Direction;
use tracing::debug;

/// Doors of every material.
#[derive(Debug, Clone, Copy, Default)]
pub struct DoorRule;

impl PlacementRule for DoorRule {
    fn place(&self, ctx: &PlacementContext<'_>, world: &mut dyn WorldAccess) -> Option<BlockState> {
        let pos = ctx.position;
        let bounds = world.height_bounds();
        if pos.y <= bounds.min_y || pos.y + 1 >= bounds.max_y {
            debug!(pos = %pos, "door refused: no room inside height bounds");
            return None;
        }
        if !is_free_cell(&*world, ctx.catalog, pos)
            || !is_free_cell(&*world, ctx.catalog, pos.above())
        {
            return None;
        }
        if !ctx.catalog.is_solid(&world.block(pos.below())) {
            return None;
        }

        let facing = ctx.direction_or_north();
        let hinge = door_hinge(&*world, ctx, facing);
        let configured = ctx
            .block
            .with(names::FACING, facing)
            .with(names::OPEN, false)
            .with(names::HINGE, hinge)
            .with(names::POWERED, false);

        world.set_block(
            pos.above(),
            configured.with(names::HALF, DoubleBlockHalf::Upper),
            true,
        );
        Some(configured.with(names::HALF, DoubleBlockHalf::Lower))
    }

    fn update(&self, ctx: &UpdateContext<'_>, world: &mut dyn WorldAccess) -> BlockState {
        let Some(half) = ctx.current.get::<DoubleBlockHalf>(names::HALF) else {
            return ctx.current.clone();
        };
        let partner_pos = match half {
            DoubleBlockHalf::Lower => ctx.position.above(),
            DoubleBlockHalf::Upper => ctx.position.below(),
        };
        let partner = world.block(partner_pos);
        if is_partner_half(ctx.catalog, ctx.current, &partner, half.opposite()) {
            ctx.current.clone()
        } else {
            BlockState::air()
        }
    }
}

fn is_partner_half(
    catalog: &dyn BlockCatalog,
    door: &BlockState,
    partner: &BlockState,
    expected: DoubleBlockHalf,
) -> bool {
    catalog.has_tag(partner, tags::DOORS)
        && partner.same_block(door)
        && partner.get::<DoubleBlockHalf>(names::HALF) == Some(expected)
        && partner.get::<Direction>(names::FACING) == door.get::<Direction>(names::FACING)
}

fn is_lower_door(catalog: &dyn BlockCatalog, state: &BlockState) -> bool {
    catalog.has_tag(state, tags::DOORS)
        && state.get::<DoubleBlockHalf>(names::HALF) == Some(DoubleBlockHalf::Lower)
}

/// Pick the hinge side for a door at `ctx.position` facing `facing`.
///
/// Full blocks on the left pull the hinge left, full blocks on the right push
/// it right. A neighboring door on one side puts the hinge away from it. With
/// no preference the cursor position against the clicked face decides.
pub fn door_hinge<W: BlockGetter + ?Sized>(
    world: &W,
    ctx: &PlacementContext<'_>,
    facing: Direction,
) -> DoorHinge {
    let pos = ctx.position;
    let left = pos.relative(facing.counter_clockwise());
    let right = pos.relative(facing.clockwise());
    let left_lower = world.block(left);
    let left_upper = world.block(left.above());
    let right_lower = world.block(right);
    let right_upper = world.block(right.above());

    let full = |state: &BlockState| i32::from(ctx.catalog.is_full_cube(state));
    let score = -full(&left_lower) - full(&left_upper) + full(&right_lower) + full(&right_upper);

    let left_door = is_lower_door(ctx.catalog, &left_lower);
    let right_door = is_lower_door(ctx.catalog, &right_lower);

    if (left_door && !right_door) || score > 0 {
        return DoorHinge::Right;
    }
    if (right_door && !left_door) || score != 0 {
        return DoorHinge::Left;
    }

    let (cursor_x, cursor_z) = relative_cursor(ctx);
    let (step_x, _, step_z) = facing.normal();
    let place_left = (step_x >= 0 || cursor_z >= 0.5)
        && (step_x <= 0 || cursor_z <= 0.5)
        && (step_z >= 0 || cursor_x <= 0.5)
        && (step_z <= 0 || cursor_x >= 0.5);
    if place_left {
        DoorHinge::Left
    } else {
        DoorHinge::Right
    }
}

fn relative_cursor(ctx: &PlacementContext<'_>) -> (f64, f64) {
    let cursor = ctx.cursor_or_center();
    let (offset_x, offset_z) = match ctx.face {
        Some(face) => {
            let (dx, _, dz) = face.to_direction().normal();
            (f64::from(dx), f64::from(dz))
        }
        None => (0.0, 0.0),
    };
    (cursor.x - offset_x, cursor.z - offset_z)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::DeferredWork;
    use crate::test_support::{state, TestCatalog, TestWorld};
    use blockplace_core::{BlockFace, BlockPos, Pose};
    use glam::DVec3;

    fn door_ctx<'a>(
        block: &'a BlockState,
        catalog: &'a TestCatalog,
        yaw: f32,
    ) -> PlacementContext<'a> {
        PlacementContext::new(BlockPos::ORIGIN, block, catalog)
            .with_pose(Pose::looking(yaw, 0.0))
            .with_face(BlockFace::Top)
    }

    fn grounded_world() -> TestWorld {
        let mut world = TestWorld::new();
        world.put(BlockPos::new(0, -1, 0), "minecraft:stone");
        world
    }

    #[test]
    fn writes_upper_and_returns_lower() {
        let catalog = TestCatalog::vanilla();
        let mut world = grounded_world();
        let block = state("minecraft:oak_door");
        let lower = DoorRule.place(&door_ctx(&block, &catalog, 0.0), &mut world).unwrap();
        let upper = world.block(BlockPos::new(0, 1, 0));
        assert_eq!(lower.get::<DoubleBlockHalf>(names::HALF), Some(DoubleBlockHalf::Lower));
        assert_eq!(upper.get::<DoubleBlockHalf>(names::HALF), Some(DoubleBlockHalf::Upper));
        assert_eq!(lower.get::<Direction>(names::FACING), Some(Direction::South));
        assert_eq!(upper.get::<Direction>(names::FACING), Some(Direction::South));
        assert_eq!(upper.get::<DoorHinge>(names::HINGE), lower.get(names::HINGE));
        assert_eq!(
            world.scheduled,
            vec![DeferredWork::NeighborUpdate {
                origin: BlockPos::new(0, 1, 0),
                distance: 0
            }]
        );
    }

    #[test]
    fn refuses_without_support_or_room() {
        let catalog = TestCatalog::vanilla();
        let block = state("minecraft:oak_door");

        let mut floating = TestWorld::new();
        assert!(DoorRule.place(&door_ctx(&block, &catalog, 0.0), &mut floating).is_none());

        let mut blocked = grounded_world();
        blocked.put(BlockPos::new(0, 1, 0), "minecraft:stone");
        assert!(DoorRule.place(&door_ctx(&block, &catalog, 0.0), &mut blocked).is_none());
    }

    #[test]
    fn refuses_at_build_limit() {
        let catalog = TestCatalog::vanilla();
        let mut world = TestWorld::new();
        world.put(BlockPos::new(0, 318, 0), "minecraft:stone");
        let block = state("minecraft:oak_door");
        let ctx = PlacementContext::new(BlockPos::new(0, 319, 0), &block, &catalog);
        assert!(DoorRule.place(&ctx, &mut world).is_none());
    }

    #[test]
    fn solid_wall_on_the_right_pushes_hinge_right() {
        let catalog = TestCatalog::vanilla();
        let mut world = grounded_world();
        // Facing south: right is west.
        world.put(BlockPos::new(-1, 0, 0), "minecraft:stone");
        world.put(BlockPos::new(-1, 1, 0), "minecraft:stone");
        let block = state("minecraft:oak_door");
        let lower = DoorRule.place(&door_ctx(&block, &catalog, 0.0), &mut world).unwrap();
        assert_eq!(lower.get::<DoorHinge>(names::HINGE), Some(DoorHinge::Right));
    }

    #[test]
    fn solid_wall_on_the_left_pulls_hinge_left() {
        let catalog = TestCatalog::vanilla();
        let mut world = grounded_world();
        world.put(BlockPos::new(1, 0, 0), "minecraft:stone");
        let block = state("minecraft:oak_door");
        let lower = DoorRule.place(&door_ctx(&block, &catalog, 0.0), &mut world).unwrap();
        assert_eq!(lower.get::<DoorHinge>(names::HINGE), Some(DoorHinge::Left));
    }

    #[test]
    fn neighbor_door_on_the_left_mirrors_hinge() {
        let catalog = TestCatalog::vanilla();
        let mut world = grounded_world();
        world.put(BlockPos::new(1, 0, 0), "minecraft:oak_door[half=lower,facing=south]");
        let block = state("minecraft:oak_door");
        let lower = DoorRule.place(&door_ctx(&block, &catalog, 0.0), &mut world).unwrap();
        assert_eq!(lower.get::<DoorHinge>(names::HINGE), Some(DoorHinge::Right));
    }

    #[test]
    fn cursor_breaks_ties() {
        let catalog = TestCatalog::vanilla();
        let block = state("minecraft:oak_door");

        let mut world = grounded_world();
        let ctx = door_ctx(&block, &catalog, 0.0).with_cursor(DVec3::new(0.2, 1.0, 0.5));
        let lower = DoorRule.place(&ctx, &mut world).unwrap();
        assert_eq!(lower.get::<DoorHinge>(names::HINGE), Some(DoorHinge::Right));

        let mut world = grounded_world();
        let ctx = door_ctx(&block, &catalog, 0.0).with_cursor(DVec3::new(0.8, 1.0, 0.5));
        let lower = DoorRule.place(&ctx, &mut world).unwrap();
        assert_eq!(lower.get::<DoorHinge>(names::HINGE), Some(DoorHinge::Left));
    }

    #[test]
    fn half_without_partner_breaks() {
        let catalog = TestCatalog::vanilla();
        let mut world = TestWorld::new();
        let lower = state("minecraft:oak_door[half=lower,facing=south,hinge=left]");
        let ctx = UpdateContext::new(BlockPos::ORIGIN, &lower, BlockFace::Top, &catalog);
        assert!(DoorRule.update(&ctx, &mut world).is_air());

        world.put(
            BlockPos::new(0, 1, 0),
            "minecraft:oak_door[half=upper,facing=south,hinge=left]",
        );
        assert_eq!(DoorRule.update(&ctx, &mut world), lower);
    }

    #[test]
    fn state_without_half_is_left_alone() {
        let catalog = TestCatalog::vanilla();
        let mut world = TestWorld::new();
        let odd = state("minecraft:oak_door[facing=south]");
        let ctx = UpdateContext::new(BlockPos::ORIGIN, &odd, BlockFace::Top, &catalog);
        assert_eq!(DoorRule.update(&ctx, &mut world), odd);
    }
}
