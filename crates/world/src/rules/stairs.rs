//! Stair facing, half and corner shape.
//!
//! Facing is fixed at placement. The shape is re-derived from the four
//! horizontal neighbors whenever one of them changes. Each side gets a code
//! (0 = no connection, 1 = right, 2 = left) read in facing-relative order:
//! front, right, back, left. The codes index a fixed 36-entry table.

use super::support::tags;
use super::PlacementRule;
use crate::catalog::BlockCatalog;
use crate::context::{PlacementContext, UpdateContext};
use crate::grid::{BlockGetter, WorldAccess};
use crate::properties::{names, Half, StairShape};
use crate::state::BlockState;
use blockplace_core::{BlockFace, BlockPos, Direction};

use StairShape::{InnerLeft, InnerRight, OuterLeft, OuterRight, Straight};

#[rustfmt::skip]
const SHAPES: [StairShape; 36] = [
    Straight, Straight, InnerRight, InnerLeft, InnerRight, Straight,
    Straight, Straight, Straight, InnerLeft, Straight, Straight,
    OuterLeft, OuterLeft, OuterLeft, OuterLeft, OuterLeft, OuterLeft,
    Straight, Straight, Straight, InnerLeft, Straight, Straight,
    OuterRight, Straight, OuterRight, OuterRight, InnerRight, Straight,
    OuterRight, Straight, OuterRight, OuterRight, Straight, Straight,
];

/// Stairs of every material.
#[derive(Debug, Clone, Copy, Default)]
pub struct StairsRule;

impl PlacementRule for StairsRule {
    fn place(&self, ctx: &PlacementContext<'_>, world: &mut dyn WorldAccess) -> Option<BlockState> {
        let facing = ctx.yaw_direction();
        let face = ctx.face_or_top();
        let half = if face == BlockFace::Top
            || (face != BlockFace::Bottom && ctx.cursor_or_center().y < 0.5)
        {
            Half::Bottom
        } else {
            Half::Top
        };
        let current_shape = ctx.block.get::<StairShape>(names::SHAPE);
        let shape = compute_shape(&*world, ctx.catalog, ctx.position, facing, half, current_shape);

        Some(
            ctx.block
                .with(names::FACING, facing)
                .with(names::HALF, half)
                .with(names::SHAPE, shape),
        )
    }

    fn update(&self, ctx: &UpdateContext<'_>, world: &mut dyn WorldAccess) -> BlockState {
        let current = ctx.current;
        let (Some(facing), Some(half)) = (
            current.get::<Direction>(names::FACING),
            current.get::<Half>(names::HALF),
        ) else {
            return current.clone();
        };
        let shape = compute_shape(
            &*world,
            ctx.catalog,
            ctx.position,
            facing,
            half,
            current.get::<StairShape>(names::SHAPE),
        );
        current.with(names::SHAPE, shape)
    }
}

/// Look up the corner shape for four side codes (front, right, back, left).
///
/// Front and back accept 0..=2, the sides 0..=1; anything else yields `None`.
pub fn stair_shape_from_sides(sides: [u8; 4]) -> Option<StairShape> {
    let [front, right, back, left] = sides.map(usize::from);
    if front > 2 || right > 1 || back > 2 || left > 1 {
        return None;
    }
    let back_term = if back == 0 { 0 } else { back + left + 1 };
    SHAPES.get(front * 12 + right * 6 + back_term + left).copied()
}

fn is_similar(a: Direction, b: Direction) -> bool {
    a == b || a == b.opposite()
}

fn compute_shape<W: BlockGetter + ?Sized>(
    world: &W,
    catalog: &dyn BlockCatalog,
    pos: BlockPos,
    facing: Direction,
    half: Half,
    current_shape: Option<StairShape>,
) -> StairShape {
    let ordered = [
        facing,
        facing.clockwise(),
        facing.opposite(),
        facing.counter_clockwise(),
    ];
    let outer_corner = matches!(current_shape, Some(OuterLeft | OuterRight));

    let mut sides = [0u8; 4];
    for (i, side) in ordered.iter().copied().enumerate() {
        let neighbor = world.block(pos.relative(side));
        if !catalog.has_tag(&neighbor, tags::STAIRS) {
            continue;
        }
        if neighbor.get::<Half>(names::HALF) != Some(half) {
            continue;
        }
        let Some(relative) = neighbor.get::<Direction>(names::FACING) else {
            continue;
        };

        if is_similar(facing, side) {
            if !is_similar(relative, facing) {
                sides[i] = if ordered[(i + 1) % 4] == relative { 2 } else { 1 };
            }
        } else {
            let mut connects = relative == facing || relative == side;
            if outer_corner && relative != facing {
                connects = false;
            }
            if connects {
                sides[i] = 1;
            }
        }
    }

    stair_shape_from_sides(sides).unwrap_or(Straight)
}
