//! Two-tall plants (sunflowers, lilacs, tall grass).

use super::pairing::is_free_cell;
use super::support::is_plant_soil;
use super::PlacementRule;
use crate::context::{PlacementContext, UpdateContext};
use crate::grid::WorldAccess;
use crate::properties::{names, DoubleBlockHalf};
use crate::state::BlockState;

/// Plants made of a lower and an upper half.
#[derive(Debug, Clone, Copy, Default)]
pub struct TallPlantRule;

impl PlacementRule for TallPlantRule {
    fn place(&self, ctx: &PlacementContext<'_>, world: &mut dyn WorldAccess) -> Option<BlockState> {
        let pos = ctx.position;
        if !ctx.catalog.is_replaceable(&world.block(pos))
            || !is_plant_soil(&world.block(pos.below()))
            || !is_free_cell(&*world, ctx.catalog, pos.above())
        {
            return None;
        }

        world.set_block(
            pos.above(),
            ctx.block.with(names::HALF, DoubleBlockHalf::Upper),
            true,
        );
        Some(ctx.block.with(names::HALF, DoubleBlockHalf::Lower))
    }

    fn update(&self, ctx: &UpdateContext<'_>, world: &mut dyn WorldAccess) -> BlockState {
        let pos = ctx.position;
        let Some(half) = ctx.current.get::<DoubleBlockHalf>(names::HALF) else {
            return BlockState::air();
        };

        let partner_pos = match half {
            DoubleBlockHalf::Lower => {
                if !is_plant_soil(&world.block(pos.below())) {
                    // Uprooted: take the matching upper half with it.
                    let upper = world.block(pos.above());
                    if is_half_of(ctx.current, &upper, DoubleBlockHalf::Upper) {
                        world.set_block(pos.above(), BlockState::air(), true);
                    }
                    return BlockState::air();
                }
                pos.above()
            }
            DoubleBlockHalf::Upper => pos.below(),
        };

        let partner = world.block(partner_pos);
        if is_half_of(ctx.current, &partner, half.opposite()) {
            ctx.current.clone()
        } else {
            BlockState::air()
        }
    }
}

fn is_half_of(plant: &BlockState, other: &BlockState, half: DoubleBlockHalf) -> bool {
    other.same_block(plant) && other.get::<DoubleBlockHalf>(names::HALF) == Some(half)
}
