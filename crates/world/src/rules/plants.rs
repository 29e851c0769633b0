//! Single-cell plants that only care about the ground they stand on.
//!
//! Placement needs a replaceable target cell and a passing survival check;
//! the update re-runs the same check and turns the plant into air when it fails.

use super::support::is_plant_soil;
use super::PlacementRule;
use crate::catalog::BlockCatalog;
use crate::context::{PlacementContext, UpdateContext};
use crate::grid::WorldAccess;
use crate::state::BlockState;
use blockplace_core::{BlockPos, Direction};

type Survives = fn(&dyn WorldAccess, &dyn BlockCatalog, BlockPos) -> bool;

fn place_if_survives(
    ctx: &PlacementContext<'_>,
    world: &dyn WorldAccess,
    survives: Survives,
) -> Option<BlockState> {
    let target = world.block(ctx.position);
    if !ctx.catalog.is_replaceable(&target) {
        return None;
    }
    survives(world, ctx.catalog, ctx.position).then(|| ctx.block.clone())
}

fn keep_if_survives(
    ctx: &UpdateContext<'_>,
    world: &dyn WorldAccess,
    survives: Survives,
) -> BlockState {
    if survives(world, ctx.catalog, ctx.position) {
        ctx.current.clone()
    } else {
        BlockState::air()
    }
}

/// Wheat, carrots and other farmland crops.
#[derive(Debug, Clone, Copy, Default)]
pub struct CropRule;

impl PlacementRule for CropRule {
    fn place(&self, ctx: &PlacementContext<'_>, world: &mut dyn WorldAccess) -> Option<BlockState> {
        place_if_survives(ctx, &*world, crop_survives)
    }

    fn update(&self, ctx: &UpdateContext<'_>, world: &mut dyn WorldAccess) -> BlockState {
        keep_if_survives(ctx, &*world, crop_survives)
    }
}

fn crop_survives(world: &dyn WorldAccess, _catalog: &dyn BlockCatalog, pos: BlockPos) -> bool {
    world.block(pos.below()).is("farmland")
}

/// Mushrooms and fungi.
#[derive(Debug, Clone, Copy, Default)]
pub struct MushroomRule;

impl PlacementRule for MushroomRule {
    fn place(&self, ctx: &PlacementContext<'_>, world: &mut dyn WorldAccess) -> Option<BlockState> {
        place_if_survives(ctx, &*world, mushroom_survives)
    }

    fn update(&self, ctx: &UpdateContext<'_>, world: &mut dyn WorldAccess) -> BlockState {
        keep_if_survives(ctx, &*world, mushroom_survives)
    }
}

fn mushroom_survives(world: &dyn WorldAccess, catalog: &dyn BlockCatalog, pos: BlockPos) -> bool {
    let below = world.block(pos.below());
    ["mycelium", "podzol", "crimson_nylium", "warped_nylium"]
        .iter()
        .any(|name| below.is(name))
        || catalog.is_solid(&below)
}

/// Sugar cane: stacks on itself, or roots in soil next to water.
#[derive(Debug, Clone, Copy, Default)]
pub struct SugarCaneRule;

impl PlacementRule for SugarCaneRule {
    fn place(&self, ctx: &PlacementContext<'_>, world: &mut dyn WorldAccess) -> Option<BlockState> {
        place_if_survives(ctx, &*world, sugar_cane_survives)
    }

    fn update(&self, ctx: &UpdateContext<'_>, world: &mut dyn WorldAccess) -> BlockState {
        keep_if_survives(ctx, &*world, sugar_cane_survives)
    }
}

fn sugar_cane_survives(world: &dyn WorldAccess, _catalog: &dyn BlockCatalog, pos: BlockPos) -> bool {
    let ground = pos.below();
    let below = world.block(ground);
    if below.is("sugar_cane") {
        return true;
    }
    let soil = (is_plant_soil(&below) && !below.is("farmland"))
        || below.is("sand")
        || below.is("red_sand");
    soil && Direction::HORIZONTAL.into_iter().any(|dir| {
        let beside = world.block(ground.relative(dir));
        beside.is("water") || beside.is("frosted_ice")
    })
}

/// Cactus: sand below, nothing solid or burning beside it, no liquid above.
#[derive(Debug, Clone, Copy, Default)]
pub struct CactusRule;

impl PlacementRule for CactusRule {
    fn place(&self, ctx: &PlacementContext<'_>, world: &mut dyn WorldAccess) -> Option<BlockState> {
        place_if_survives(ctx, &*world, cactus_survives)
    }

    fn update(&self, ctx: &UpdateContext<'_>, world: &mut dyn WorldAccess) -> BlockState {
        keep_if_survives(ctx, &*world, cactus_survives)
    }
}

fn cactus_survives(world: &dyn WorldAccess, catalog: &dyn BlockCatalog, pos: BlockPos) -> bool {
    let crowded = Direction::HORIZONTAL.into_iter().any(|dir| {
        let beside = world.block(pos.relative(dir));
        catalog.is_solid(&beside) || beside.is("lava")
    });
    if crowded {
        return false;
    }
    let below = world.block(pos.below());
    if !(below.is("cactus") || below.is("sand") || below.is("red_sand")) {
        return false;
    }
    !catalog.is_liquid(&world.block(pos.above()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{state, TestCatalog, TestWorld};
    use blockplace_core::BlockFace;

    fn try_place(rule: &dyn PlacementRule, world: &mut TestWorld, block: &str) -> Option<BlockState> {
        let catalog = TestCatalog::vanilla();
        let block = state(block);
        let ctx = PlacementContext::new(BlockPos::ORIGIN, &block, &catalog);
        rule.place(&ctx, world)
    }

    #[test]
    fn crops_need_farmland() {
        let mut world = TestWorld::new();
        world.put(BlockPos::new(0, -1, 0), "minecraft:dirt");
        assert!(try_place(&CropRule, &mut world, "minecraft:wheat").is_none());
        world.put(BlockPos::new(0, -1, 0), "minecraft:farmland");
        assert!(try_place(&CropRule, &mut world, "minecraft:wheat").is_some());
    }

    #[test]
    fn crop_breaks_when_farmland_goes() {
        let catalog = TestCatalog::vanilla();
        let mut world = TestWorld::new();
        let wheat = state("minecraft:wheat");
        let ctx = UpdateContext::new(BlockPos::ORIGIN, &wheat, BlockFace::Bottom, &catalog);
        assert!(CropRule.update(&ctx, &mut world).is_air());
        world.put(BlockPos::new(0, -1, 0), "minecraft:farmland");
        assert_eq!(CropRule.update(&ctx, &mut world), wheat);
    }

    #[test]
    fn mushrooms_grow_on_mycelium_or_solid_ground() {
        let mut world = TestWorld::new();
        assert!(try_place(&MushroomRule, &mut world, "minecraft:red_mushroom").is_none());
        world.put(BlockPos::new(0, -1, 0), "minecraft:mycelium");
        assert!(try_place(&MushroomRule, &mut world, "minecraft:red_mushroom").is_some());
        world.put(BlockPos::new(0, -1, 0), "minecraft:stone");
        assert!(try_place(&MushroomRule, &mut world, "minecraft:red_mushroom").is_some());
    }

    #[test]
    fn sugar_cane_needs_water_beside_its_soil() {
        let mut world = TestWorld::new();
        world.put(BlockPos::new(0, -1, 0), "minecraft:sand");
        assert!(try_place(&SugarCaneRule, &mut world, "minecraft:sugar_cane").is_none());

        world.put(BlockPos::new(1, -1, 0), "minecraft:water");
        assert!(try_place(&SugarCaneRule, &mut world, "minecraft:sugar_cane").is_some());

        world.put(BlockPos::new(0, -1, 0), "minecraft:farmland");
        assert!(try_place(&SugarCaneRule, &mut world, "minecraft:sugar_cane").is_none());
    }

    #[test]
    fn sugar_cane_stacks_without_water() {
        let mut world = TestWorld::new();
        world.put(BlockPos::new(0, -1, 0), "minecraft:sugar_cane");
        assert!(try_place(&SugarCaneRule, &mut world, "minecraft:sugar_cane").is_some());
    }

    #[test]
    fn cactus_survival() {
        let mut world = TestWorld::new();
        world.put(BlockPos::new(0, -1, 0), "minecraft:sand");
        assert!(try_place(&CactusRule, &mut world, "minecraft:cactus").is_some());

        world.put(BlockPos::new(0, 1, 0), "minecraft:water");
        assert!(try_place(&CactusRule, &mut world, "minecraft:cactus").is_none());
        world.put(BlockPos::new(0, 1, 0), "minecraft:air");

        world.put(BlockPos::new(-1, 0, 0), "minecraft:lava");
        assert!(try_place(&CactusRule, &mut world, "minecraft:cactus").is_none());
        world.put(BlockPos::new(-1, 0, 0), "minecraft:stone");
        assert!(try_place(&CactusRule, &mut world, "minecraft:cactus").is_none());
    }

    #[test]
    fn occupied_target_refuses() {
        let mut world = TestWorld::new();
        world.put(BlockPos::new(0, -1, 0), "minecraft:farmland");
        world.put(BlockPos::ORIGIN, "minecraft:stone");
        assert!(try_place(&CropRule, &mut world, "minecraft:wheat").is_none());
    }
}
