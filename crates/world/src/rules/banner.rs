//! Banners: a standing variant on the floor and a wall variant on a side.
//!
//! Either variant may be placed; the rule resolves both through the catalog
//! and tries candidate directions in the order the actor is looking.

use super::PlacementRule;
use crate::catalog::BlockCatalog;
use crate::context::{PlacementContext, UpdateContext};
use crate::grid::{BlockGetter, WorldAccess};
use crate::properties::names;
use crate::state::BlockState;
use blockplace_core::{nearest_looking_directions, rotation16, BlockPos, Direction};
use tracing::debug;

const STANDING_SUFFIX: &str = "_banner";
const WALL_SUFFIX: &str = "_wall_banner";

/// Standing and wall banners of every color.
#[derive(Debug, Clone, Copy, Default)]
pub struct BannerRule;

impl PlacementRule for BannerRule {
    fn place(&self, ctx: &PlacementContext<'_>, world: &mut dyn WorldAccess) -> Option<BlockState> {
        let Some((standing, wall)) = variants(ctx.catalog, ctx.block) else {
            debug!(block = %ctx.block.key(), "banner refused: missing standing or wall variant");
            return None;
        };

        let target = world.block(ctx.position);
        let replace_clicked = !target.is_air() && ctx.catalog.is_replaceable(&target);
        let mut order = nearest_looking_directions(ctx.pose.as_ref());
        if let (false, Some(face)) = (replace_clicked, ctx.face) {
            prefer_first(&mut order, face.opposite().to_direction());
        }

        for direction in order {
            let candidate = match direction {
                Direction::Up => continue,
                Direction::Down => {
                    let rotation = ctx.pose.map(|pose| rotation16(pose.yaw)).unwrap_or(0);
                    standing.with(names::ROTATION, rotation)
                }
                side => wall.with(names::FACING, side.opposite()),
            };
            if survives(&*world, ctx.catalog, ctx.position, &candidate) {
                return Some(candidate);
            }
        }
        None
    }

    fn update(&self, ctx: &UpdateContext<'_>, world: &mut dyn WorldAccess) -> BlockState {
        if survives(&*world, ctx.catalog, ctx.position, ctx.current) {
            ctx.current.clone()
        } else {
            BlockState::air()
        }
    }
}

fn is_wall_banner(state: &BlockState) -> bool {
    state.key().path().ends_with(WALL_SUFFIX)
}

/// Standing and wall counterparts of `block`, carrying its data and handler.
fn variants(catalog: &dyn BlockCatalog, block: &BlockState) -> Option<(BlockState, BlockState)> {
    let key = block.key();
    let path = key.path();
    let (standing_path, wall_path) = if let Some(stem) = path.strip_suffix(WALL_SUFFIX) {
        (format!("{stem}{STANDING_SUFFIX}"), path.to_string())
    } else if let Some(stem) = path.strip_suffix(STANDING_SUFFIX) {
        (path.to_string(), format!("{stem}{WALL_SUFFIX}"))
    } else {
        (path.to_string(), path.to_string())
    };

    let resolve = |path: &str| {
        let key = key.with_path(path).ok()?;
        catalog
            .default_state(&key)
            .map(|state| state.with_attachments_of(block))
    };
    Some((resolve(&standing_path)?, resolve(&wall_path)?))
}

fn survives<W: BlockGetter + ?Sized>(
    world: &W,
    catalog: &dyn BlockCatalog,
    pos: BlockPos,
    banner: &BlockState,
) -> bool {
    if !is_wall_banner(banner) {
        return catalog.is_legacy_solid(&world.block(pos.below()));
    }
    match banner.get::<Direction>(names::FACING) {
        Some(facing) => catalog.is_legacy_solid(&world.block(pos.relative(facing.opposite()))),
        None => false,
    }
}

/// Move `preferred` to the front, keeping the rest in order.
fn prefer_first(order: &mut [Direction; 6], preferred: Direction) {
    if let Some(index) = order.iter().position(|&dir| dir == preferred) {
        order[..=index].rotate_right(1);
    }
}
