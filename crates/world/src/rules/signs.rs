//! Signs: standing, wall, ceiling-hanging and wall-hanging.

use super::support::tags;
use super::PlacementRule;
use crate::catalog::BlockCatalog;
use crate::context::{PlacementContext, UpdateContext};
use crate::grid::{BlockGetter, WorldAccess};
use crate::properties::names;
use crate::state::BlockState;
use blockplace_core::{rotation16, BlockFace, BlockPos, Direction};

fn keep_if(current: &BlockState, supported: bool) -> BlockState {
    if supported {
        current.clone()
    } else {
        BlockState::air()
    }
}

/// Signs standing on the floor.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandingSignRule;

impl PlacementRule for StandingSignRule {
    fn place(&self, ctx: &PlacementContext<'_>, world: &mut dyn WorldAccess) -> Option<BlockState> {
        if !ctx.catalog.is_solid(&world.block(ctx.position.below())) {
            return None;
        }
        let rotation = ctx.pose.map(|pose| rotation16(pose.yaw)).unwrap_or(0);
        Some(ctx.block.with(names::ROTATION, rotation))
    }

    fn update(&self, ctx: &UpdateContext<'_>, world: &mut dyn WorldAccess) -> BlockState {
        let supported = ctx.catalog.is_solid(&world.block(ctx.position.below()));
        keep_if(ctx.current, supported)
    }
}

/// Signs fixed to the side of a block.
#[derive(Debug, Clone, Copy, Default)]
pub struct WallSignRule;

impl PlacementRule for WallSignRule {
    fn place(&self, ctx: &PlacementContext<'_>, world: &mut dyn WorldAccess) -> Option<BlockState> {
        let facing = ctx.face?.to_direction();
        if !facing.is_horizontal() || !has_solid_behind(&*world, ctx.catalog, ctx.position, facing) {
            return None;
        }
        Some(ctx.block.with(names::FACING, facing))
    }

    fn update(&self, ctx: &UpdateContext<'_>, world: &mut dyn WorldAccess) -> BlockState {
        let supported = ctx
            .current
            .get::<Direction>(names::FACING)
            .is_some_and(|facing| has_solid_behind(&*world, ctx.catalog, ctx.position, facing));
        keep_if(ctx.current, supported)
    }
}

fn has_solid_behind<W: BlockGetter + ?Sized>(
    world: &W,
    catalog: &dyn BlockCatalog,
    pos: BlockPos,
    facing: Direction,
) -> bool {
    catalog.is_solid(&world.block(pos.relative(facing.opposite())))
}

/// Hanging signs under a block.
#[derive(Debug, Clone, Copy, Default)]
pub struct CeilingHangingSignRule;

impl PlacementRule for CeilingHangingSignRule {
    fn place(&self, ctx: &PlacementContext<'_>, world: &mut dyn WorldAccess) -> Option<BlockState> {
        let above = world.block(ctx.position.above());
        if !ctx.catalog.is_solid(&above) {
            return None;
        }

        let direction = ctx.direction_or_north();
        let attached = should_attach(ctx.catalog, &above, direction);
        let rotation = if attached {
            ctx.pose.map(|pose| rotation16(pose.yaw)).unwrap_or(0)
        } else {
            rotation_towards(direction.opposite())
        };
        Some(
            ctx.block
                .with(names::ROTATION, rotation)
                .with(names::ATTACHED, attached),
        )
    }

    fn update(&self, ctx: &UpdateContext<'_>, world: &mut dyn WorldAccess) -> BlockState {
        let supported = ctx.catalog.is_solid(&world.block(ctx.position.above()));
        keep_if(ctx.current, supported)
    }
}

/// Hanging from another hanging sign attaches unless the two are aligned.
fn should_attach(catalog: &dyn BlockCatalog, above: &BlockState, direction: Direction) -> bool {
    let other = if catalog.has_tag(above, tags::WALL_HANGING_SIGNS) {
        above.get::<Direction>(names::FACING)
    } else if catalog.has_tag(above, tags::CEILING_HANGING_SIGNS) {
        above.get::<u8>(names::ROTATION).and_then(direction_of_rotation)
    } else {
        None
    };
    match other {
        Some(other) => crosses(other, direction),
        None => catalog.is_solid(above),
    }
}

/// Neither normal component matches.
fn crosses(a: Direction, b: Direction) -> bool {
    let (ax, _, az) = a.normal();
    let (bx, _, bz) = b.normal();
    ax != bx && az != bz
}

fn direction_of_rotation(rotation: u8) -> Option<Direction> {
    match rotation {
        0 | 8 => Some(Direction::South),
        4 | 12 => Some(Direction::North),
        2 | 10 => Some(Direction::West),
        6 | 14 => Some(Direction::East),
        _ => None,
    }
}

fn rotation_towards(direction: Direction) -> u8 {
    match direction {
        Direction::North => 4,
        Direction::South => 12,
        Direction::West => 2,
        Direction::East => 10,
        Direction::Up | Direction::Down => 0,
    }
}

/// Hanging signs mounted on a wall, hanging across the clicked face.
#[derive(Debug, Clone, Copy, Default)]
pub struct WallHangingSignRule;

impl PlacementRule for WallHangingSignRule {
    fn place(&self, ctx: &PlacementContext<'_>, world: &mut dyn WorldAccess) -> Option<BlockState> {
        let yaw = ctx.pose.map(|pose| f64::from(pose.yaw).rem_euclid(360.0));
        let facing = match ctx.face? {
            BlockFace::North | BlockFace::South => match yaw {
                Some(yaw) if (45.0..135.0).contains(&yaw) || (225.0..315.0).contains(&yaw) => {
                    Direction::West
                }
                _ => Direction::East,
            },
            BlockFace::East | BlockFace::West => match yaw {
                Some(yaw) if (135.0..315.0).contains(&yaw) => Direction::North,
                _ => Direction::South,
            },
            BlockFace::Top | BlockFace::Bottom => return None,
        };
        if !can_hang(&*world, ctx.catalog, ctx.position, facing) {
            return None;
        }
        Some(ctx.block.with(names::FACING, facing))
    }

    fn update(&self, ctx: &UpdateContext<'_>, world: &mut dyn WorldAccess) -> BlockState {
        let supported = ctx
            .current
            .get::<Direction>(names::FACING)
            .is_some_and(|facing| can_hang(&*world, ctx.catalog, ctx.position, facing));
        keep_if(ctx.current, supported)
    }
}

/// Either side along the sign's plane offers a solid block or a parallel hanging sign.
fn can_hang<W: BlockGetter + ?Sized>(
    world: &W,
    catalog: &dyn BlockCatalog,
    pos: BlockPos,
    facing: Direction,
) -> bool {
    [facing.clockwise(), facing.counter_clockwise()]
        .into_iter()
        .any(|side| {
            let neighbor = world.block(pos.relative(side));
            let parallel = catalog
                .has_tag(&neighbor, tags::WALL_HANGING_SIGNS)
                .then(|| neighbor.get::<Direction>(names::FACING))
                .flatten()
                .map(|other| other.axis() == facing.axis());
            parallel.unwrap_or_else(|| catalog.is_solid(&neighbor))
        })
}
