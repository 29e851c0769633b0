//! Placement driver and deferred neighbor-update propagation.
//!
//! Rules never recurse. Every write that should ripple outwards queues a
//! [`DeferredWork`] item, and [`PlacementSimulator::step`] runs exactly the
//! items that were queued before the step began. A cascade therefore advances
//! one hop per tick, against whatever the grid holds at that moment.

use crate::catalog::BlockCatalog;
use crate::context::{PlacementContext, UpdateContext};
use crate::grid::{BlockGetter, BlockStorage, DeferredWork, WorldAccess};
use crate::rulebook::RuleBook;
use crate::rules::{refresh_neighbor_rails, BlockRule, PlacementRule};
use crate::state::BlockState;
use blockplace_core::{BlockFace, BlockPos, Direction, HeightBounds, Pose, SimTick};
use glam::DVec3;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use tracing::{debug, trace, warn};

/// One placement attempt as an actor would issue it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacementRequest {
    /// Target cell.
    pub position: BlockPos,
    /// Default state of the block being placed.
    pub block: BlockState,
    /// Placing actor.
    #[serde(default)]
    pub pose: Option<Pose>,
    /// Clicked face.
    #[serde(default)]
    pub face: Option<BlockFace>,
    /// Hit point inside the clicked cell.
    #[serde(default)]
    pub cursor: Option<DVec3>,
    /// Whether the actor is sneaking.
    #[serde(default)]
    pub sneaking: bool,
}

impl PlacementRequest {
    /// Request with no pose, face or cursor.
    pub fn new(position: BlockPos, block: BlockState) -> Self {
        Self {
            position,
            block,
            pose: None,
            face: None,
            cursor: None,
            sneaking: false,
        }
    }

    /// Set the actor pose.
    pub fn with_pose(mut self, pose: Pose) -> Self {
        self.pose = Some(pose);
        self
    }

    /// Set the clicked face.
    pub fn with_face(mut self, face: BlockFace) -> Self {
        self.face = Some(face);
        self
    }

    /// Set the cursor hit point.
    pub fn with_cursor(mut self, cursor: DVec3) -> Self {
        self.cursor = Some(cursor);
        self
    }

    /// Set the sneaking flag.
    pub fn with_sneaking(mut self, sneaking: bool) -> Self {
        self.sneaking = sneaking;
        self
    }

    fn context<'a>(&'a self, catalog: &'a dyn BlockCatalog) -> PlacementContext<'a> {
        PlacementContext {
            position: self.position,
            block: &self.block,
            pose: self.pose,
            face: self.face,
            cursor: self.cursor,
            sneaking: self.sneaking,
            catalog,
        }
    }
}

/// What one simulation step did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepReport {
    /// Tick the step ran on.
    pub tick: SimTick,
    /// Deferred items executed.
    pub executed: usize,
    /// Cells rewritten by updates.
    pub writes: usize,
}

/// Outcome of draining the queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettleReport {
    /// Steps taken.
    pub ticks: u64,
    /// Cells rewritten by updates over all steps.
    pub writes: usize,
    /// Whether the queue ran dry before the step limit.
    pub settled: bool,
}

/// Storage view handed to rules: notifying writes and scheduling go into the
/// simulator's queue.
struct ScheduledWorld<'a, S: BlockStorage + ?Sized> {
    storage: &'a mut S,
    queue: &'a mut VecDeque<DeferredWork>,
}

impl<S: BlockStorage + ?Sized> BlockGetter for ScheduledWorld<'_, S> {
    fn block(&self, pos: BlockPos) -> BlockState {
        self.storage.block(pos)
    }

    fn height_bounds(&self) -> HeightBounds {
        self.storage.height_bounds()
    }
}

impl<S: BlockStorage + ?Sized> WorldAccess for ScheduledWorld<'_, S> {
    fn set_block(&mut self, pos: BlockPos, state: BlockState, notify: bool) {
        if self.storage.put_block(pos, state) && notify {
            self.queue.push_back(DeferredWork::NeighborUpdate {
                origin: pos,
                distance: 0,
            });
        }
    }

    fn schedule(&mut self, work: DeferredWork) {
        self.queue.push_back(work);
    }
}

/// Places blocks through their rules and drives neighbor updates tick by tick.
#[derive(Debug, Clone)]
pub struct PlacementSimulator {
    rules: RuleBook,
    pending: VecDeque<DeferredWork>,
    tick: SimTick,
}

impl PlacementSimulator {
    /// Simulator dispatching through `rules`.
    pub fn new(rules: RuleBook) -> Self {
        Self {
            rules,
            pending: VecDeque::new(),
            tick: SimTick::ZERO,
        }
    }

    /// Simulator with the vanilla rule table.
    pub fn vanilla() -> Self {
        Self::new(RuleBook::vanilla())
    }

    /// Rule table in use.
    pub fn rules(&self) -> &RuleBook {
        &self.rules
    }

    /// Current tick.
    pub fn tick(&self) -> SimTick {
        self.tick
    }

    /// Deferred items waiting for the next step.
    pub fn pending(&self) -> impl Iterator<Item = &DeferredWork> {
        self.pending.iter()
    }

    /// Number of deferred items waiting.
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    /// True when nothing is queued.
    pub fn is_idle(&self) -> bool {
        self.pending.is_empty()
    }

    /// Rule family that governs `state` (unruled blocks use [`BlockRule::Dummy`]).
    pub fn rule_for(&self, state: &BlockState, catalog: &dyn BlockCatalog) -> BlockRule {
        self.rules.lookup(state, catalog).unwrap_or(BlockRule::Dummy)
    }

    /// Attempt a placement. Returns the state written to the target cell, or
    /// `None` when the target is occupied or the rule refused.
    ///
    /// The target must be replaceable, or hold the same slab type (doubling).
    /// Any paired cell and the primary cell are written before this returns;
    /// neighbor updates run on later steps.
    pub fn place<S: BlockStorage + ?Sized>(
        &mut self,
        storage: &mut S,
        catalog: &dyn BlockCatalog,
        request: &PlacementRequest,
    ) -> Option<BlockState> {
        let pos = request.position;
        if !storage.height_bounds().contains(pos.y) {
            debug!(pos = %pos, "placement outside height bounds");
            return None;
        }
        let rule = self.rule_for(&request.block, catalog);
        let existing = storage.block(pos);
        let doubling = rule == BlockRule::Slab && existing.same_block(&request.block);
        if !catalog.is_replaceable(&existing) && !doubling {
            debug!(pos = %pos, existing = %existing, "placement target occupied");
            return None;
        }

        let ctx = request.context(catalog);
        let mut world = ScheduledWorld {
            storage,
            queue: &mut self.pending,
        };
        let Some(placed) = rule.place(&ctx, &mut world) else {
            debug!(pos = %pos, block = %request.block.key(), rule = %rule, "placement refused");
            return None;
        };
        debug!(pos = %pos, state = %placed, rule = %rule, "block placed");
        world.set_block(pos, placed.clone(), true);
        Some(placed)
    }

    /// Write a state directly, optionally queueing neighbor updates.
    pub fn set_block<S: BlockStorage + ?Sized>(
        &mut self,
        storage: &mut S,
        pos: BlockPos,
        state: BlockState,
        notify: bool,
    ) {
        let mut world = ScheduledWorld {
            storage,
            queue: &mut self.pending,
        };
        world.set_block(pos, state, notify);
    }

    /// Clear a cell and notify its neighbors. Returns the previous state.
    pub fn break_block<S: BlockStorage + ?Sized>(
        &mut self,
        storage: &mut S,
        pos: BlockPos,
    ) -> BlockState {
        let previous = storage.block(pos);
        if !previous.is_air() {
            debug!(pos = %pos, state = %previous, "block broken");
            self.set_block(storage, pos, BlockState::air(), true);
        }
        previous
    }

    /// Run every item queued before this call; anything they queue waits for
    /// the next step.
    pub fn step<S: BlockStorage + ?Sized>(
        &mut self,
        storage: &mut S,
        catalog: &dyn BlockCatalog,
    ) -> StepReport {
        let batch: Vec<DeferredWork> = self.pending.drain(..).collect();
        let mut world = ScheduledWorld {
            storage,
            queue: &mut self.pending,
        };
        let mut writes = 0;
        for work in &batch {
            writes += execute(&self.rules, work, &mut world, catalog);
        }

        let report = StepReport {
            tick: self.tick,
            executed: batch.len(),
            writes,
        };
        self.tick = self.tick.advance(1);
        report
    }

    /// Step until the queue is empty or `max_ticks` steps have run.
    pub fn settle<S: BlockStorage + ?Sized>(
        &mut self,
        storage: &mut S,
        catalog: &dyn BlockCatalog,
        max_ticks: u64,
    ) -> SettleReport {
        let mut report = SettleReport {
            ticks: 0,
            writes: 0,
            settled: self.is_idle(),
        };
        while !self.is_idle() && report.ticks < max_ticks {
            report.writes += self.step(storage, catalog).writes;
            report.ticks += 1;
        }
        report.settled = self.is_idle();
        if !report.settled {
            warn!(
                ticks = report.ticks,
                pending = self.pending.len(),
                "neighbor updates did not settle"
            );
        }
        report
    }
}

/// Run one deferred item. Returns the number of cells rewritten.
fn execute(
    rules: &RuleBook,
    work: &DeferredWork,
    world: &mut dyn WorldAccess,
    catalog: &dyn BlockCatalog,
) -> usize {
    match *work {
        DeferredWork::NeighborUpdate { origin, distance } => {
            let mut writes = 0;
            for (dir, pos) in origin.neighbors() {
                let Some(updated) = update_cell(rules, world, catalog, pos, dir, Some(distance))
                else {
                    continue;
                };
                world.set_block(pos, updated, false);
                world.schedule(DeferredWork::NeighborUpdate {
                    origin: pos,
                    distance: distance + 1,
                });
                writes += 1;
            }
            writes
        }
        DeferredWork::HorizontalRefresh { origin } => {
            let mut writes = 0;
            for dir in Direction::HORIZONTAL {
                let pos = origin.relative(dir);
                if let Some(updated) = update_cell(rules, world, catalog, pos, dir, None) {
                    world.set_block(pos, updated, false);
                    writes += 1;
                }
            }
            writes
        }
        DeferredWork::RailNeighbors { origin } => {
            refresh_neighbor_rails(world, catalog, origin);
            0
        }
    }
}

/// Re-validate the cell at `pos`, reached from its neighbor in direction
/// `dir.opposite()`. Returns the new state only when it differs.
fn update_cell(
    rules: &RuleBook,
    world: &mut dyn WorldAccess,
    catalog: &dyn BlockCatalog,
    pos: BlockPos,
    dir: Direction,
    distance: Option<u32>,
) -> Option<BlockState> {
    let current = world.block(pos);
    let rule = rules.lookup(&current, catalog)?;
    if distance.is_some_and(|distance| distance >= rule.max_update_distance()) {
        return None;
    }

    let from_face = BlockFace::from_direction(dir.opposite());
    let ctx = UpdateContext::new(pos, &current, from_face, catalog);
    let updated = rule.update(&ctx, world);
    trace!(pos = %pos, rule = %rule, from = ?from_face, "neighbor re-validated");
    if updated == current {
        return None;
    }
    debug!(pos = %pos, from = %current, to = %updated, "neighbor update rewrote cell");
    Some(updated)
}
