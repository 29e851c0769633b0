//! Grid access traits and the in-memory reference grid.

use crate::state::BlockState;
use blockplace_core::{BlockPos, HeightBounds};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Read access to cells.
pub trait BlockGetter {
    /// State at `pos`; air for empty or out-of-range cells.
    fn block(&self, pos: BlockPos) -> BlockState;

    /// Vertical build limits.
    fn height_bounds(&self) -> HeightBounds;
}

/// Raw storage: writes land immediately with no side effects.
pub trait BlockStorage: BlockGetter {
    /// Store `state` at `pos` (air clears the cell). Returns `false` when the
    /// cell lies outside the height bounds and nothing was written.
    fn put_block(&mut self, pos: BlockPos, state: BlockState) -> bool;
}

/// Work a rule asks to run on a later step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DeferredWork {
    /// Re-validate the six face neighbors of `origin`.
    ///
    /// `distance` counts hops from the cell that changed first.
    NeighborUpdate {
        /// Cell that changed.
        origin: BlockPos,
        /// Propagation hops so far.
        distance: u32,
    },
    /// Re-run the update rule of the four horizontal neighbors once, without cascading.
    HorizontalRefresh {
        /// Cell whose neighbors are refreshed.
        origin: BlockPos,
    },
    /// Recompute the shape of rails next to `origin` (one level up or down included).
    RailNeighbors {
        /// Rail that was placed or reshaped.
        origin: BlockPos,
    },
}

/// What rules see of the world: reads, notifying writes and deferred scheduling.
pub trait WorldAccess: BlockGetter {
    /// Write `state` at `pos`. With `notify`, neighbors are re-validated on a later step.
    fn set_block(&mut self, pos: BlockPos, state: BlockState, notify: bool);

    /// Queue work for a later step.
    fn schedule(&mut self, work: DeferredWork);
}

/// Sparse in-memory grid. Missing cells are air.
#[derive(Debug, Clone, Default)]
pub struct SparseGrid {
    cells: BTreeMap<BlockPos, BlockState>,
    bounds: HeightBounds,
}

impl SparseGrid {
    /// Empty grid with the given vertical limits.
    pub fn new(bounds: HeightBounds) -> Self {
        Self {
            cells: BTreeMap::new(),
            bounds,
        }
    }

    /// Number of non-air cells.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// True when every cell is air.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Non-air cells in position order.
    pub fn iter(&self) -> impl Iterator<Item = (&BlockPos, &BlockState)> {
        self.cells.iter()
    }
}

impl BlockGetter for SparseGrid {
    fn block(&self, pos: BlockPos) -> BlockState {
        self.cells.get(&pos).cloned().unwrap_or_default()
    }

    fn height_bounds(&self) -> HeightBounds {
        self.bounds
    }
}

impl BlockStorage for SparseGrid {
    fn put_block(&mut self, pos: BlockPos, state: BlockState) -> bool {
        if !self.bounds.contains(pos.y) {
            tracing::debug!(pos = %pos, state = %state, "write outside height bounds ignored");
            return false;
        }
        if state.is_air() {
            self.cells.remove(&pos);
        } else {
            self.cells.insert(pos, state);
        }
        true
    }
}
