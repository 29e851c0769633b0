//! Property-based tests for placement rules
//!
//! Validates:
//! - The stair corner table answers every reachable side combination
//! - Re-running an update on an unchanged neighborhood changes nothing, for
//!   connecting, two-cell and attached families alike
//! - Placement never writes outside the target cell for single-cell families

use blockplace_core::{BlockFace, BlockPos, Direction, HeightBounds, Pose};
use blockplace_testkit::vanilla_registry;
use blockplace_world::rules::stair_shape_from_sides;
use blockplace_world::{
    BlockGetter, BlockRule, BlockState, BlockStorage, DeferredWork, PlacementContext,
    PlacementRule, SparseGrid, UpdateContext, WorldAccess,
};
use proptest::prelude::*;

/// Grid that drops scheduled work.
struct QuietWorld(SparseGrid);

impl BlockGetter for QuietWorld {
    fn block(&self, pos: BlockPos) -> BlockState {
        self.0.block(pos)
    }

    fn height_bounds(&self) -> HeightBounds {
        self.0.height_bounds()
    }
}

impl WorldAccess for QuietWorld {
    fn set_block(&mut self, pos: BlockPos, state: BlockState, _notify: bool) {
        self.0.put_block(pos, state);
    }

    fn schedule(&mut self, _work: DeferredWork) {}
}

const NEIGHBORS: &[&str] = &[
    "minecraft:air",
    "minecraft:stone",
    "minecraft:glass",
    "minecraft:oak_leaves",
    "minecraft:oak_stairs[facing=north,half=bottom,shape=straight]",
    "minecraft:oak_stairs[facing=east,half=bottom,shape=straight]",
    "minecraft:oak_stairs[facing=south,half=bottom,shape=straight]",
    "minecraft:oak_stairs[facing=west,half=bottom,shape=straight]",
    "minecraft:oak_stairs[facing=west,half=top,shape=straight]",
    "minecraft:cobblestone_wall[up=true]",
    "minecraft:cobblestone_wall[north=low,south=low,up=false]",
    "minecraft:oak_fence",
    "minecraft:nether_brick_fence",
    "minecraft:oak_fence_gate[facing=north]",
    "minecraft:oak_fence_gate[facing=east]",
    "minecraft:iron_bars",
    "minecraft:glass_pane",
];

const SUBJECTS: &[(&str, BlockRule)] = &[
    ("minecraft:oak_stairs[facing=north,half=bottom,shape=straight]", BlockRule::Stairs),
    ("minecraft:oak_stairs[facing=east,half=bottom,shape=straight]", BlockRule::Stairs),
    ("minecraft:oak_stairs[facing=south,half=top,shape=straight]", BlockRule::Stairs),
    ("minecraft:cobblestone_wall[up=true,waterlogged=false]", BlockRule::Wall),
    ("minecraft:oak_fence[waterlogged=false]", BlockRule::Fence),
    ("minecraft:glass_pane[waterlogged=false]", BlockRule::GlassPane),
    ("minecraft:oak_fence_gate[facing=north,in_wall=false]", BlockRule::FenceGate),
    ("minecraft:oak_fence_gate[facing=west,in_wall=false]", BlockRule::FenceGate),
];

/// Ground, partners and rails for families that depend on support or a second cell.
const SUPPORT_NEIGHBORS: &[&str] = &[
    "minecraft:air",
    "minecraft:stone",
    "minecraft:sand",
    "minecraft:dirt",
    "minecraft:farmland[moisture=0]",
    "minecraft:water[level=0]",
    "minecraft:cactus[age=0]",
    "minecraft:rail[shape=north_south,waterlogged=false]",
    "minecraft:rail[shape=east_west,waterlogged=false]",
    "minecraft:chest[facing=north,type=single,waterlogged=false]",
    "minecraft:chest[facing=north,type=left,waterlogged=false]",
    "minecraft:chest[facing=north,type=right,waterlogged=false]",
    "minecraft:oak_door[facing=north,half=lower,hinge=left,open=false,powered=false]",
    "minecraft:oak_door[facing=north,half=upper,hinge=left,open=false,powered=false]",
    "minecraft:red_bed[facing=north,occupied=false,part=foot]",
    "minecraft:red_bed[facing=north,occupied=true,part=head]",
    "minecraft:rose_bush[half=lower]",
    "minecraft:rose_bush[half=upper]",
];

const SUPPORTED_SUBJECTS: &[(&str, BlockRule)] = &[
    ("minecraft:rail[shape=north_south,waterlogged=false]", BlockRule::Rail),
    ("minecraft:rail[shape=east_west,waterlogged=false]", BlockRule::Rail),
    ("minecraft:rail[shape=ascending_east,waterlogged=false]", BlockRule::Rail),
    ("minecraft:rail[shape=south_east,waterlogged=false]", BlockRule::Rail),
    ("minecraft:powered_rail[shape=east_west,powered=false,waterlogged=false]", BlockRule::Rail),
    ("minecraft:chest[facing=north,type=single,waterlogged=false]", BlockRule::Chest),
    ("minecraft:chest[facing=north,type=left,waterlogged=false]", BlockRule::Chest),
    ("minecraft:chest[facing=north,type=right,waterlogged=false]", BlockRule::Chest),
    ("minecraft:oak_door[facing=north,half=lower,hinge=left,open=false,powered=false]", BlockRule::Door),
    ("minecraft:oak_door[facing=north,half=upper,hinge=left,open=false,powered=false]", BlockRule::Door),
    ("minecraft:red_bed[facing=north,occupied=false,part=foot]", BlockRule::Bed),
    ("minecraft:red_bed[facing=north,occupied=false,part=head]", BlockRule::Bed),
    ("minecraft:red_banner[rotation=4]", BlockRule::Banner),
    ("minecraft:red_wall_banner[facing=north]", BlockRule::Banner),
    ("minecraft:rose_bush[half=lower]", BlockRule::TallPlant),
    ("minecraft:rose_bush[half=upper]", BlockRule::TallPlant),
    ("minecraft:wheat[age=0]", BlockRule::Crop),
    ("minecraft:red_mushroom", BlockRule::Mushroom),
    ("minecraft:sugar_cane[age=0]", BlockRule::SugarCane),
    ("minecraft:cactus[age=0]", BlockRule::Cactus),
    ("minecraft:oak_sign[rotation=0,waterlogged=false]", BlockRule::StandingSign),
    ("minecraft:oak_wall_sign[facing=north,waterlogged=false]", BlockRule::WallSign),
];

const FACES: &[BlockFace] = &[
    BlockFace::North,
    BlockFace::South,
    BlockFace::East,
    BlockFace::West,
    BlockFace::Top,
];

fn neighbor() -> impl Strategy<Value = &'static str> {
    prop::sample::select(NEIGHBORS)
}

fn neighborhood(sides: [&str; 4], above: &str) -> QuietWorld {
    let mut grid = SparseGrid::new(HeightBounds::new(-64, 320));
    for (dir, raw) in Direction::HORIZONTAL.into_iter().zip(sides) {
        grid.put_block(BlockPos::ORIGIN.relative(dir), raw.parse().unwrap());
    }
    grid.put_block(BlockPos::ORIGIN.above(), above.parse().unwrap());
    QuietWorld(grid)
}

/// Sides, the cells above and below, and optionally a rail one level up on the east side.
fn supported_neighborhood(sides: [&str; 4], above: &str, below: &str, raised_rail: bool) -> QuietWorld {
    let mut world = neighborhood(sides, above);
    world.0.put_block(BlockPos::ORIGIN.below(), below.parse().unwrap());
    if raised_rail {
        world.0.put_block(
            BlockPos::ORIGIN.relative(Direction::East).above(),
            "minecraft:rail[shape=east_west,waterlogged=false]".parse().unwrap(),
        );
    }
    world
}

#[test]
fn stair_table_answers_every_reachable_combination() {
    for front in 0..=2u8 {
        for right in 0..=1u8 {
            for back in 0..=2u8 {
                for left in 0..=1u8 {
                    assert!(
                        stair_shape_from_sides([front, right, back, left]).is_some(),
                        "no shape for {:?}",
                        [front, right, back, left]
                    );
                }
            }
        }
    }
}

proptest! {
    /// Property: side codes outside the reachable range are rejected, never misread.
    #[test]
    fn stair_table_rejects_unreachable_codes(
        front in 0u8..6,
        right in 0u8..6,
        back in 0u8..6,
        left in 0u8..6,
    ) {
        let reachable = front <= 2 && right <= 1 && back <= 2 && left <= 1;
        prop_assert_eq!(
            stair_shape_from_sides([front, right, back, left]).is_some(),
            reachable
        );
    }

    /// Property: an update that already ran leaves the block alone the second time.
    #[test]
    fn update_is_idempotent(
        subject in prop::sample::select(SUBJECTS),
        north in neighbor(),
        east in neighbor(),
        south in neighbor(),
        west in neighbor(),
        above in neighbor(),
        from in prop::sample::select(FACES),
    ) {
        let registry = vanilla_registry().unwrap();
        let (raw, rule) = subject;
        let current: BlockState = raw.parse().unwrap();
        let mut world = neighborhood([north, east, south, west], above);

        let ctx = UpdateContext::new(BlockPos::ORIGIN, &current, from, &registry);
        let first = rule.update(&ctx, &mut world);
        let ctx = UpdateContext::new(BlockPos::ORIGIN, &first, from, &registry);
        let second = rule.update(&ctx, &mut world);
        prop_assert_eq!(first, second);
    }

    /// Property: support and partner checks settle after one update.
    #[test]
    fn supported_update_is_idempotent(
        subject in prop::sample::select(SUPPORTED_SUBJECTS),
        north in prop::sample::select(SUPPORT_NEIGHBORS),
        east in prop::sample::select(SUPPORT_NEIGHBORS),
        south in prop::sample::select(SUPPORT_NEIGHBORS),
        west in prop::sample::select(SUPPORT_NEIGHBORS),
        above in prop::sample::select(SUPPORT_NEIGHBORS),
        below in prop::sample::select(SUPPORT_NEIGHBORS),
        raised_rail in any::<bool>(),
        from in prop::sample::select(FACES),
    ) {
        let registry = vanilla_registry().unwrap();
        let (raw, rule) = subject;
        let current: BlockState = raw.parse().unwrap();
        let mut world = supported_neighborhood([north, east, south, west], above, below, raised_rail);

        let ctx = UpdateContext::new(BlockPos::ORIGIN, &current, from, &registry);
        let first = rule.update(&ctx, &mut world);
        // A removed block no longer answers to this rule.
        if first.is_air() {
            return Ok(());
        }
        let ctx = UpdateContext::new(BlockPos::ORIGIN, &first, from, &registry);
        let second = rule.update(&ctx, &mut world);
        prop_assert_eq!(first, second);
    }

    /// Property: connectivity families only ever write their own cell.
    #[test]
    fn connection_placement_leaves_neighbors_untouched(
        subject in prop::sample::select(SUBJECTS),
        north in neighbor(),
        east in neighbor(),
        south in neighbor(),
        west in neighbor(),
        above in neighbor(),
        yaw in 0.0f32..360.0,
    ) {
        let registry = vanilla_registry().unwrap();
        let (raw, rule) = subject;
        let block: BlockState = raw.parse().unwrap();
        let mut world = neighborhood([north, east, south, west], above);
        let before: Vec<_> = world.0.iter().map(|(p, s)| (*p, s.clone())).collect();

        let ctx = PlacementContext::new(BlockPos::ORIGIN, &block, &registry)
            .with_pose(Pose::looking(yaw, 0.0));
        prop_assert!(rule.place(&ctx, &mut world).is_some());
        let after: Vec<_> = world.0.iter().map(|(p, s)| (*p, s.clone())).collect();
        prop_assert_eq!(before, after);
    }
}
