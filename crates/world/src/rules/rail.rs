//! Rail track shapes.
//!
//! A rail looks for other rails on its four sides, one level up or down
//! included. Straight-only rails (powered, detector, activator) never curve.
//! A straight track turns into a slope when the rail one step ahead sits one
//! level higher.

use super::support::tags;
use super::PlacementRule;
use crate::catalog::BlockCatalog;
use crate::context::{PlacementContext, UpdateContext};
use crate::grid::{BlockGetter, DeferredWork, WorldAccess};
use crate::properties::{names, RailShape};
use crate::state::BlockState;
use blockplace_core::{BlockPos, Direction};
use tracing::trace;

/// Every rail type.
#[derive(Debug, Clone, Copy, Default)]
pub struct RailRule;

impl PlacementRule for RailRule {
    fn place(&self, ctx: &PlacementContext<'_>, world: &mut dyn WorldAccess) -> Option<BlockState> {
        let pos = ctx.position;
        if !can_support_rail(ctx.catalog, &world.block(pos.below())) {
            return None;
        }

        let initial = match ctx.yaw_direction() {
            Direction::East | Direction::West => RailShape::EastWest,
            _ => RailShape::NorthSouth,
        };
        let straight = is_straight_rail(ctx.block);
        let shape = calculate_rail_shape(&*world, ctx.catalog, pos, initial, straight);
        let waterlogged = world.block(pos).is("water");

        let mut placed = ctx
            .block
            .with(names::SHAPE, shape)
            .with(names::WATERLOGGED, waterlogged);
        if straight {
            placed = placed.with(names::POWERED, false);
        }

        world.schedule(DeferredWork::RailNeighbors { origin: pos });
        Some(placed)
    }

    fn update(&self, ctx: &UpdateContext<'_>, world: &mut dyn WorldAccess) -> BlockState {
        let pos = ctx.position;
        if !can_support_rail(ctx.catalog, &world.block(pos.below())) {
            return BlockState::air();
        }

        let current_shape = ctx.current.get::<RailShape>(names::SHAPE);
        if let Some(slope) = current_shape.and_then(RailShape::ascending_direction) {
            if !can_support_rail(ctx.catalog, &world.block(pos.relative(slope))) {
                return BlockState::air();
            }
        }

        let fallback = current_shape.unwrap_or(RailShape::NorthSouth);
        let shape = calculate_rail_shape(
            &*world,
            ctx.catalog,
            pos,
            fallback,
            is_straight_rail(ctx.current),
        );
        if current_shape != Some(shape) {
            world.schedule(DeferredWork::RailNeighbors { origin: pos });
        }
        ctx.current.with(names::SHAPE, shape)
    }
}

/// Powered, detector and activator rails only run straight.
pub fn is_straight_rail(state: &BlockState) -> bool {
    state.is("powered_rail") || state.is("detector_rail") || state.is("activator_rail")
}

fn can_support_rail(catalog: &dyn BlockCatalog, below: &BlockState) -> bool {
    catalog.is_solid(below)
}

fn is_rail_at<W: BlockGetter + ?Sized>(
    world: &W,
    catalog: &dyn BlockCatalog,
    pos: BlockPos,
) -> bool {
    catalog.has_tag(&world.block(pos), tags::RAILS)
}

fn has_neighbor_rail<W: BlockGetter + ?Sized>(
    world: &W,
    catalog: &dyn BlockCatalog,
    pos: BlockPos,
) -> bool {
    is_rail_at(world, catalog, pos)
        || is_rail_at(world, catalog, pos.above())
        || is_rail_at(world, catalog, pos.below())
}

/// Shape a rail at `pos` should take given its neighbors.
///
/// `current` is kept when the neighbors do not force a shape.
pub fn calculate_rail_shape<W: BlockGetter + ?Sized>(
    world: &W,
    catalog: &dyn BlockCatalog,
    pos: BlockPos,
    current: RailShape,
    straight: bool,
) -> RailShape {
    let north = has_neighbor_rail(world, catalog, pos.relative(Direction::North));
    let south = has_neighbor_rail(world, catalog, pos.relative(Direction::South));
    let west = has_neighbor_rail(world, catalog, pos.relative(Direction::West));
    let east = has_neighbor_rail(world, catalog, pos.relative(Direction::East));

    let north_south = north || south;
    let east_west = west || east;

    let mut shape = None;
    if north_south && !east_west {
        shape = Some(RailShape::NorthSouth);
    }
    if east_west && !north_south {
        shape = Some(RailShape::EastWest);
    }

    if !straight {
        if south && east && !north && !west {
            shape = Some(RailShape::SouthEast);
        }
        if south && west && !north && !east {
            shape = Some(RailShape::SouthWest);
        }
        if north && west && !south && !east {
            shape = Some(RailShape::NorthWest);
        }
        if north && east && !south && !west {
            shape = Some(RailShape::NorthEast);
        }
    }

    let mut shape = shape.unwrap_or(match (north_south, east_west) {
        (true, false) => RailShape::NorthSouth,
        (false, true) => RailShape::EastWest,
        _ => current,
    });

    // A slope needs a supporting block on its high side.
    let rises = |dir: Direction| {
        let side = pos.relative(dir);
        is_rail_at(world, catalog, side.above()) && can_support_rail(catalog, &world.block(side))
    };
    if shape == RailShape::NorthSouth {
        if rises(Direction::North) {
            shape = RailShape::AscendingNorth;
        }
        if rises(Direction::South) {
            shape = RailShape::AscendingSouth;
        }
    }
    if shape == RailShape::EastWest {
        if rises(Direction::East) {
            shape = RailShape::AscendingEast;
        }
        if rises(Direction::West) {
            shape = RailShape::AscendingWest;
        }
    }

    shape
}

/// Recompute the shape of rails beside `origin`, one level up or down included.
///
/// Writes happen without notification and only when the shape changes.
pub fn refresh_neighbor_rails(
    world: &mut dyn WorldAccess,
    catalog: &dyn BlockCatalog,
    origin: BlockPos,
) {
    for dir in Direction::HORIZONTAL {
        let column = origin.relative(dir);
        for dy in -1..=1 {
            let pos = column.offset(0, dy, 0);
            let rail = world.block(pos);
            if !catalog.has_tag(&rail, tags::RAILS) {
                continue;
            }
            let Some(current) = rail.get::<RailShape>(names::SHAPE) else {
                continue;
            };
            let shape = calculate_rail_shape(&*world, catalog, pos, current, is_straight_rail(&rail));
            if shape != current {
                trace!(pos = %pos, from = %current, to = %shape, "neighbor rail reshaped");
                world.set_block(pos, rail.with(names::SHAPE, shape), false);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{state, TestCatalog, TestWorld};
    use blockplace_core::{BlockFace, Pose};

    fn place_rail(world: &mut TestWorld, catalog: &TestCatalog, pos: BlockPos, name: &str, yaw: f32) -> Option<BlockState> {
        let block = state(name);
        let ctx = PlacementContext::new(pos, &block, catalog).with_pose(Pose::looking(yaw, 0.0));
        RailRule.place(&ctx, world)
    }

    fn shape(state: &BlockState) -> Option<RailShape> {
        state.get(names::SHAPE)
    }

    #[test]
    fn needs_solid_support() {
        let catalog = TestCatalog::vanilla();
        let mut world = TestWorld::new();
        assert!(place_rail(&mut world, &catalog, BlockPos::ORIGIN, "minecraft:rail", 0.0).is_none());
        world.put(BlockPos::new(0, -1, 0), "minecraft:glass");
        assert!(place_rail(&mut world, &catalog, BlockPos::ORIGIN, "minecraft:rail", 0.0).is_some());
    }

    #[test]
    fn lone_rail_follows_yaw() {
        let catalog = TestCatalog::vanilla();
        let mut world = TestWorld::new();
        world.put(BlockPos::new(0, -1, 0), "minecraft:stone");
        let ns = place_rail(&mut world, &catalog, BlockPos::ORIGIN, "minecraft:rail", 0.0).unwrap();
        assert_eq!(shape(&ns), Some(RailShape::NorthSouth));
        let ew = place_rail(&mut world, &catalog, BlockPos::ORIGIN, "minecraft:rail", 90.0).unwrap();
        assert_eq!(shape(&ew), Some(RailShape::EastWest));
        assert_eq!(ew.get::<bool>(names::WATERLOGGED), Some(false));
        assert!(world
            .scheduled
            .contains(&DeferredWork::RailNeighbors { origin: BlockPos::ORIGIN }));
    }

    #[test]
    fn curves_between_two_neighbors() {
        let catalog = TestCatalog::vanilla();
        let mut world = TestWorld::new();
        world.put(BlockPos::new(0, -1, 0), "minecraft:stone");
        world.put(BlockPos::new(0, 0, 1), "minecraft:rail[shape=north_south]");
        world.put(BlockPos::new(1, 0, 0), "minecraft:rail[shape=east_west]");
        let placed = place_rail(&mut world, &catalog, BlockPos::ORIGIN, "minecraft:rail", 0.0).unwrap();
        assert_eq!(shape(&placed), Some(RailShape::SouthEast));
    }

    #[test]
    fn straight_rails_never_curve() {
        let catalog = TestCatalog::vanilla();
        let mut world = TestWorld::new();
        world.put(BlockPos::new(0, -1, 0), "minecraft:stone");
        world.put(BlockPos::new(0, 0, 1), "minecraft:rail[shape=north_south]");
        world.put(BlockPos::new(1, 0, 0), "minecraft:rail[shape=east_west]");
        let placed =
            place_rail(&mut world, &catalog, BlockPos::ORIGIN, "minecraft:powered_rail", 90.0).unwrap();
        assert_eq!(shape(&placed), Some(RailShape::EastWest));
        assert_eq!(placed.get::<bool>(names::POWERED), Some(false));
    }

    #[test]
    fn slopes_up_towards_higher_rail() {
        let catalog = TestCatalog::vanilla();
        let mut world = TestWorld::new();
        world.put(BlockPos::new(0, -1, 0), "minecraft:stone");
        world.put(BlockPos::new(0, 0, -1), "minecraft:stone");
        world.put(BlockPos::new(0, 1, -1), "minecraft:rail[shape=north_south]");
        let placed = place_rail(&mut world, &catalog, BlockPos::ORIGIN, "minecraft:rail", 90.0).unwrap();
        assert_eq!(shape(&placed), Some(RailShape::AscendingNorth));
    }

    #[test]
    fn update_drops_rail_without_support() {
        let catalog = TestCatalog::vanilla();
        let mut world = TestWorld::new();
        let current = state("minecraft:rail[shape=north_south]");
        let ctx = UpdateContext::new(BlockPos::ORIGIN, &current, BlockFace::Bottom, &catalog);
        assert!(RailRule.update(&ctx, &mut world).is_air());
    }

    #[test]
    fn update_drops_slope_without_high_side() {
        let catalog = TestCatalog::vanilla();
        let mut world = TestWorld::new();
        world.put(BlockPos::new(0, -1, 0), "minecraft:stone");
        let current = state("minecraft:rail[shape=ascending_north]");
        let ctx = UpdateContext::new(BlockPos::ORIGIN, &current, BlockFace::North, &catalog);
        assert!(RailRule.update(&ctx, &mut world).is_air());
    }

    #[test]
    fn no_slope_towards_unsupported_side() {
        let catalog = TestCatalog::vanilla();
        let mut world = TestWorld::new();
        world.put(BlockPos::new(0, -1, 0), "minecraft:stone");
        world.put(BlockPos::new(1, 0, 0), "minecraft:rail[shape=east_west]");
        world.put(BlockPos::new(-1, 0, 0), "minecraft:rail[shape=east_west]");
        world.put(BlockPos::new(1, 1, 0), "minecraft:rail[shape=east_west]");
        let current = state("minecraft:rail[shape=north_south]");

        let ctx = UpdateContext::new(BlockPos::ORIGIN, &current, BlockFace::East, &catalog);
        let once = RailRule.update(&ctx, &mut world);
        assert_eq!(shape(&once), Some(RailShape::EastWest));

        let ctx = UpdateContext::new(BlockPos::ORIGIN, &once, BlockFace::East, &catalog);
        assert_eq!(RailRule.update(&ctx, &mut world), once);
    }

    #[test]
    fn refresh_reshapes_neighbor_rails() {
        let catalog = TestCatalog::vanilla();
        let mut world = TestWorld::new();
        world.put(BlockPos::new(0, -1, 0), "minecraft:stone");
        world.put(BlockPos::new(1, -1, 0), "minecraft:stone");
        world.put(BlockPos::ORIGIN, "minecraft:rail[shape=east_west]");
        world.put(BlockPos::new(1, 0, 0), "minecraft:rail[shape=north_south]");
        refresh_neighbor_rails(&mut world, &catalog, BlockPos::ORIGIN);
        assert_eq!(
            shape(&world.block(BlockPos::new(1, 0, 0))),
            Some(RailShape::EastWest)
        );
        assert!(world.scheduled.is_empty());
    }
}
