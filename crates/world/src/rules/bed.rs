//! Two-cell beds: the foot sits in the target cell, the head one step along `facing`.

use super::pairing::is_free_cell;
use super::PlacementRule;
use crate::context::{PlacementContext, UpdateContext};
use crate::grid::WorldAccess;
use crate::properties::{names, BedPart};
use crate::state::BlockState;
use blockplace_core::Direction;
use tracing::debug;

/// Beds of every color.
#[derive(Debug, Clone, Copy, Default)]
pub struct BedRule;

impl PlacementRule for BedRule {
    fn place(&self, ctx: &PlacementContext<'_>, world: &mut dyn WorldAccess) -> Option<BlockState> {
        let pos = ctx.position;
        if !world.height_bounds().contains(pos.y) {
            debug!(pos = %pos, "bed refused: outside height bounds");
            return None;
        }

        let facing = ctx.direction_or_north();
        let head = pos.relative(facing);
        if !is_free_cell(&*world, ctx.catalog, head) {
            return None;
        }

        let configured = ctx
            .block
            .with(names::FACING, facing)
            .with(names::OCCUPIED, false);
        world.set_block(head, configured.with(names::PART, BedPart::Head), true);
        Some(configured.with(names::PART, BedPart::Foot))
    }

    fn update(&self, ctx: &UpdateContext<'_>, world: &mut dyn WorldAccess) -> BlockState {
        let current = ctx.current;
        let (Some(part), Some(facing)) = (
            current.get::<BedPart>(names::PART),
            current.get::<Direction>(names::FACING),
        ) else {
            return current.clone();
        };

        let partner_pos = match part {
            BedPart::Foot => ctx.position.relative(facing),
            BedPart::Head => ctx.position.relative(facing.opposite()),
        };
        let partner = world.block(partner_pos);
        let paired = partner.same_block(current)
            && partner.get::<BedPart>(names::PART) == Some(part.opposite())
            && partner.get::<Direction>(names::FACING) == Some(facing);
        if !paired {
            return BlockState::air();
        }

        // The head owns `occupied`; the foot copies it.
        match (part, partner.get::<bool>(names::OCCUPIED)) {
            (BedPart::Foot, Some(occupied)) => current.with(names::OCCUPIED, occupied),
            _ => current.clone(),
        }
    }
}
