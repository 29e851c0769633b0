//! Chests pair up with a lone neighbor of the same type and facing.
//!
//! A `left` chest has its partner on the clockwise side of its facing, a
//! `right` chest on the counter-clockwise side.

use super::PlacementRule;
use crate::context::{PlacementContext, UpdateContext};
use crate::grid::{BlockGetter, WorldAccess};
use crate::properties::{names, ChestType};
use crate::state::BlockState;
use blockplace_core::{BlockPos, Direction};

/// Chests and trapped chests.
#[derive(Debug, Clone, Copy, Default)]
pub struct ChestRule;

impl PlacementRule for ChestRule {
    fn place(&self, ctx: &PlacementContext<'_>, world: &mut dyn WorldAccess) -> Option<BlockState> {
        let facing = match ctx.pose {
            Some(pose) => pose.horizontal_direction().opposite(),
            None => Direction::North,
        };
        let chest_type = if ctx.sneaking {
            ChestType::Single
        } else {
            pairing_for(&*world, ctx.block, ctx.position, facing)
        };
        Some(
            ctx.block
                .with(names::FACING, facing)
                .with(names::TYPE, chest_type)
                .with(names::WATERLOGGED, false),
        )
    }

    fn update(&self, ctx: &UpdateContext<'_>, world: &mut dyn WorldAccess) -> BlockState {
        let current = ctx.current;
        let (Some(facing), Some(chest_type)) = (
            current.get::<Direction>(names::FACING),
            current.get::<ChestType>(names::TYPE),
        ) else {
            return current.clone();
        };

        let from = ctx.from_direction();
        if !from.is_horizontal() {
            return current.clone();
        }
        let neighbor = world.block(ctx.position.relative(from));
        let neighbor_facing = neighbor.get::<Direction>(names::FACING);
        let neighbor_type = neighbor.get::<ChestType>(names::TYPE);

        match chest_type {
            ChestType::Single => {
                // Join a neighbor that already paired towards us.
                let Some(neighbor_type) = neighbor_type else {
                    return current.clone();
                };
                let points_back = connected_direction(facing, neighbor_type) == Some(from.opposite());
                if neighbor.same_block(current)
                    && neighbor_type != ChestType::Single
                    && neighbor_facing == Some(facing)
                    && points_back
                {
                    current.with(names::TYPE, neighbor_type.opposite())
                } else {
                    current.clone()
                }
            }
            paired => {
                if connected_direction(facing, paired) != Some(from) {
                    return current.clone();
                }
                let partner_intact = neighbor.same_block(current)
                    && neighbor_type == Some(paired.opposite())
                    && neighbor_facing == Some(facing);
                if partner_intact {
                    current.clone()
                } else {
                    current.with(names::TYPE, ChestType::Single)
                }
            }
        }
    }
}

/// Side the partner of a paired chest sits on.
fn connected_direction(facing: Direction, chest_type: ChestType) -> Option<Direction> {
    match chest_type {
        ChestType::Single => None,
        ChestType::Left => Some(facing.clockwise()),
        ChestType::Right => Some(facing.counter_clockwise()),
    }
}

fn pairing_for<W: BlockGetter + ?Sized>(
    world: &W,
    chest: &BlockState,
    pos: BlockPos,
    facing: Direction,
) -> ChestType {
    let lone_partner = |side: Direction| {
        let neighbor = world.block(pos.relative(side));
        neighbor.same_block(chest)
            && neighbor.get::<ChestType>(names::TYPE) == Some(ChestType::Single)
            && neighbor.get::<Direction>(names::FACING) == Some(facing)
    };
    if lone_partner(facing.clockwise()) {
        ChestType::Left
    } else if lone_partner(facing.counter_clockwise()) {
        ChestType::Right
    } else {
        ChestType::Single
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::HandlerId;
    use crate::test_support::{state, TestCatalog, TestWorld};
    use blockplace_core::{BlockFace, Pose};

    fn chest_ctx<'a>(
        block: &'a BlockState,
        catalog: &'a TestCatalog,
        pos: BlockPos,
    ) -> PlacementContext<'a> {
        // Looking south (yaw 0) makes the chest face north.
        PlacementContext::new(pos, block, catalog).with_pose(Pose::looking(0.0, 0.0))
    }

    #[test]
    fn lone_chest_faces_the_actor() {
        let catalog = TestCatalog::vanilla();
        let mut world = TestWorld::new();
        let block = state("minecraft:chest").with_handler(HandlerId(7));
        let placed = ChestRule.place(&chest_ctx(&block, &catalog, BlockPos::ORIGIN), &mut world).unwrap();
        assert_eq!(placed.get::<Direction>(names::FACING), Some(Direction::North));
        assert_eq!(placed.get::<ChestType>(names::TYPE), Some(ChestType::Single));
        assert_eq!(placed.get::<bool>(names::WATERLOGGED), Some(false));
        assert_eq!(placed.handler(), Some(HandlerId(7)));
    }

    #[test]
    fn pairs_with_clockwise_then_counter_clockwise_neighbor() {
        let catalog = TestCatalog::vanilla();
        let block = state("minecraft:chest");

        // Facing north: clockwise is east.
        let mut world = TestWorld::new();
        world.put(BlockPos::new(1, 0, 0), "minecraft:chest[facing=north,type=single]");
        let placed = ChestRule.place(&chest_ctx(&block, &catalog, BlockPos::ORIGIN), &mut world).unwrap();
        assert_eq!(placed.get::<ChestType>(names::TYPE), Some(ChestType::Left));

        let mut world = TestWorld::new();
        world.put(BlockPos::new(-1, 0, 0), "minecraft:chest[facing=north,type=single]");
        let placed = ChestRule.place(&chest_ctx(&block, &catalog, BlockPos::ORIGIN), &mut world).unwrap();
        assert_eq!(placed.get::<ChestType>(names::TYPE), Some(ChestType::Right));
    }

    #[test]
    fn ignores_mismatched_or_paired_neighbors() {
        let catalog = TestCatalog::vanilla();
        let block = state("minecraft:chest");
        let mut world = TestWorld::new();
        world.put(BlockPos::new(1, 0, 0), "minecraft:chest[facing=east,type=single]");
        world.put(BlockPos::new(-1, 0, 0), "minecraft:chest[facing=north,type=left]");
        let placed = ChestRule.place(&chest_ctx(&block, &catalog, BlockPos::ORIGIN), &mut world).unwrap();
        assert_eq!(placed.get::<ChestType>(names::TYPE), Some(ChestType::Single));

        let mut world = TestWorld::new();
        world.put(BlockPos::new(1, 0, 0), "minecraft:trapped_chest[facing=north,type=single]");
        let placed = ChestRule.place(&chest_ctx(&block, &catalog, BlockPos::ORIGIN), &mut world).unwrap();
        assert_eq!(placed.get::<ChestType>(names::TYPE), Some(ChestType::Single));
    }

    #[test]
    fn sneaking_keeps_chest_single() {
        let catalog = TestCatalog::vanilla();
        let block = state("minecraft:chest");
        let mut world = TestWorld::new();
        world.put(BlockPos::new(1, 0, 0), "minecraft:chest[facing=north,type=single]");
        let ctx = chest_ctx(&block, &catalog, BlockPos::ORIGIN).with_sneaking(true);
        let placed = ChestRule.place(&ctx, &mut world).unwrap();
        assert_eq!(placed.get::<ChestType>(names::TYPE), Some(ChestType::Single));
    }

    #[test]
    fn single_chest_takes_complementary_type() {
        let catalog = TestCatalog::vanilla();
        let mut world = TestWorld::new();
        // Left chest at the origin points east at (1, 0, 0).
        world.put(BlockPos::ORIGIN, "minecraft:chest[facing=north,type=left]");
        let single = state("minecraft:chest[facing=north,type=single,waterlogged=false]");
        let ctx = UpdateContext::new(BlockPos::new(1, 0, 0), &single, BlockFace::West, &catalog);
        let updated = ChestRule.update(&ctx, &mut world);
        assert_eq!(updated.get::<ChestType>(names::TYPE), Some(ChestType::Right));
    }

    #[test]
    fn paired_chest_reverts_when_partner_leaves() {
        let catalog = TestCatalog::vanilla();
        let mut world = TestWorld::new();
        world.put(BlockPos::new(1, 0, 0), "minecraft:chest[facing=north,type=right]");
        let left = state("minecraft:chest[facing=north,type=left]");
        let ctx = UpdateContext::new(BlockPos::ORIGIN, &left, BlockFace::East, &catalog);
        assert_eq!(ChestRule.update(&ctx, &mut world), left);

        world.put(BlockPos::new(1, 0, 0), "minecraft:air");
        let updated = ChestRule.update(&ctx, &mut world);
        assert_eq!(updated.get::<ChestType>(names::TYPE), Some(ChestType::Single));
    }

    #[test]
    fn changes_on_other_sides_are_ignored() {
        let catalog = TestCatalog::vanilla();
        let mut world = TestWorld::new();
        let left = state("minecraft:chest[facing=north,type=left]");
        let ctx = UpdateContext::new(BlockPos::ORIGIN, &left, BlockFace::West, &catalog);
        assert_eq!(ChestRule.update(&ctx, &mut world), left);
        let ctx = UpdateContext::new(BlockPos::ORIGIN, &left, BlockFace::Top, &catalog);
        assert_eq!(ChestRule.update(&ctx, &mut world), left);
    }
}
