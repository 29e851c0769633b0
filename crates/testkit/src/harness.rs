//! Grid + simulator + registry bundle for scenario tests.

use anyhow::{anyhow, Context, Result};
use blockplace_assets::BlockRegistry;
use blockplace_core::{BlockPos, HeightBounds, RegistryKey, SimTick};
use blockplace_world::{
    BlockCatalog, BlockGetter, BlockState, BlockStorage, PlacementRequest, PlacementSimulator,
    RuleBook, SettleReport, SparseGrid, StepReport,
};
use serde::Serialize;

use crate::vanilla_registry;

/// Step limit used by [`TestWorld::settle`].
pub const DEFAULT_SETTLE_TICKS: u64 = 64;

/// Something that happened in a [`TestWorld`], kept for event logs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WorldEvent {
    /// Tick the event happened on.
    pub tick: SimTick,
    /// `placed`, `refused`, `broken` or `step`.
    pub kind: String,
    /// Cell involved, if any.
    pub pos: Option<BlockPos>,
    /// State written, requested or removed.
    pub payload: String,
}

/// In-memory world wired to the vanilla rules.
pub struct TestWorld {
    /// Cells.
    pub grid: SparseGrid,
    /// Placement driver and update queue.
    pub sim: PlacementSimulator,
    /// Block registry.
    pub registry: BlockRegistry,
    events: Vec<WorldEvent>,
}

impl TestWorld {
    /// Overworld-sized grid with the bundled pack and the vanilla rule table.
    pub fn vanilla() -> Result<Self> {
        Ok(Self::with_parts(
            vanilla_registry()?,
            RuleBook::vanilla(),
            HeightBounds::new(-64, 320),
        ))
    }

    /// Assemble from explicit parts.
    pub fn with_parts(registry: BlockRegistry, rules: RuleBook, bounds: HeightBounds) -> Self {
        Self {
            grid: SparseGrid::new(bounds),
            sim: PlacementSimulator::new(rules),
            registry,
            events: Vec::new(),
        }
    }

    /// Write a state string straight into the grid, bypassing rules and updates.
    pub fn put(&mut self, pos: BlockPos, raw: &str) -> Result<()> {
        let state: BlockState = raw
            .parse()
            .with_context(|| format!("invalid block state `{raw}`"))?;
        self.grid.put_block(pos, state);
        Ok(())
    }

    /// Write several cells at once.
    pub fn put_all(&mut self, cells: &[(BlockPos, &str)]) -> Result<()> {
        for (pos, raw) in cells {
            self.put(*pos, raw)?;
        }
        Ok(())
    }

    /// State at `pos`.
    pub fn block(&self, pos: BlockPos) -> BlockState {
        self.grid.block(pos)
    }

    /// State at `pos` in its canonical string form.
    pub fn state_string(&self, pos: BlockPos) -> String {
        self.block(pos).to_string()
    }

    /// Request placing the registry default state of `block` at `pos`.
    pub fn request(&self, pos: BlockPos, block: &str) -> Result<PlacementRequest> {
        let key =
            RegistryKey::parse(block).with_context(|| format!("invalid block key `{block}`"))?;
        let state = self
            .registry
            .default_state(&key)
            .ok_or_else(|| anyhow!("block `{key}` is not in the registry"))?;
        Ok(PlacementRequest::new(pos, state))
    }

    /// Run a placement through its rule. Returns the state written, if any.
    pub fn place(&mut self, request: &PlacementRequest) -> Option<BlockState> {
        let placed = self.sim.place(&mut self.grid, &self.registry, request);
        let (kind, payload) = match &placed {
            Some(state) => ("placed", state.to_string()),
            None => ("refused", request.block.to_string()),
        };
        self.record(kind, Some(request.position), payload);
        placed
    }

    /// Clear a cell and notify its neighbors.
    pub fn break_block(&mut self, pos: BlockPos) -> BlockState {
        let previous = self.sim.break_block(&mut self.grid, pos);
        self.record("broken", Some(pos), previous.to_string());
        previous
    }

    /// Run one deferred step.
    pub fn step(&mut self) -> StepReport {
        let report = self.sim.step(&mut self.grid, &self.registry);
        self.events.push(WorldEvent {
            tick: report.tick,
            kind: "step".into(),
            pos: None,
            payload: format!("executed={} writes={}", report.executed, report.writes),
        });
        report
    }

    /// Step until idle or [`DEFAULT_SETTLE_TICKS`] steps have run.
    pub fn settle(&mut self) -> SettleReport {
        self.sim
            .settle(&mut self.grid, &self.registry, DEFAULT_SETTLE_TICKS)
    }

    /// Events recorded so far.
    pub fn events(&self) -> &[WorldEvent] {
        &self.events
    }

    fn record(&mut self, kind: &str, pos: Option<BlockPos>, payload: String) {
        self.events.push(WorldEvent {
            tick: self.sim.tick(),
            kind: kind.to_string(),
            pos,
            payload,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_blocks_cannot_be_requested() {
        let world = TestWorld::vanilla().unwrap();
        assert!(world.request(BlockPos::ORIGIN, "oak_stairs").is_ok());
        assert!(world.request(BlockPos::ORIGIN, "custom:nothing").is_err());
    }

    #[test]
    fn placements_and_refusals_are_recorded() {
        let mut world = TestWorld::vanilla().unwrap();
        world.put(BlockPos::ORIGIN, "minecraft:stone").unwrap();
        let request = world.request(BlockPos::ORIGIN, "oak_fence").unwrap();
        assert!(world.place(&request).is_none());

        let request = world.request(BlockPos::new(0, 1, 0), "oak_fence").unwrap();
        assert!(world.place(&request).is_some());
        world.step();

        let kinds: Vec<&str> = world.events().iter().map(|e| e.kind.as_str()).collect();
        assert_eq!(kinds, vec!["refused", "placed", "step"]);
    }
}
