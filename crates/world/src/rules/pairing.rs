//! Helpers for rules that own two cells (doors, beds, tall plants).

use crate::catalog::BlockCatalog;
use crate::grid::BlockGetter;
use blockplace_core::BlockPos;

/// The cell is inside the build limits and may be overwritten.
pub(crate) fn is_free_cell<W: BlockGetter + ?Sized>(
    world: &W,
    catalog: &dyn BlockCatalog,
    pos: BlockPos,
) -> bool {
    world.height_bounds().contains(pos.y) && catalog.is_replaceable(&world.block(pos))
}
