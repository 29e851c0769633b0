//! JSON placement scenarios: seed a grid, place and break blocks, settle the
//! update queue and check the resulting states.

use anyhow::{Context, Result};
use blockplace_assets::BlockRegistry;
use blockplace_core::{BlockPos, SimTick};
use blockplace_world::{
    BlockCatalog, BlockGetter, BlockState, BlockStorage, PlacementRequest, PlacementSimulator,
    RuleBook, SparseGrid,
};
use serde::{Deserialize, Serialize};
use std::{fs, path::Path};
use tracing::{debug, info};

use crate::config::PlacementConfig;

#[derive(Debug, Clone, Deserialize)]
pub struct Scenario {
    pub name: String,
    /// Cells written before the first step, without rules or updates.
    #[serde(default)]
    pub setup: Vec<Cell>,
    pub steps: Vec<ScenarioStep>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Cell {
    pub pos: BlockPos,
    pub state: BlockState,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum ScenarioStep {
    /// Place through the block's rule. A state without properties is
    /// replaced by the registry default.
    Place(PlacementRequest),
    Break {
        pos: BlockPos,
    },
    Set {
        pos: BlockPos,
        state: BlockState,
        #[serde(default)]
        notify: bool,
    },
    Step {
        #[serde(default = "one")]
        count: u64,
    },
    /// Drain the queue; defaults to the configured step limit.
    Settle {
        #[serde(default)]
        max_ticks: Option<u64>,
    },
    /// The cell holds this block and at least these properties.
    Expect {
        pos: BlockPos,
        state: BlockState,
    },
}

fn one() -> u64 {
    1
}

impl Scenario {
    pub fn from_path(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read scenario {}", path.display()))?;
        serde_json::from_str(&contents)
            .with_context(|| format!("failed to parse scenario {}", path.display()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExpectationFailure {
    pub step: usize,
    pub pos: BlockPos,
    pub expected: String,
    pub actual: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ScenarioReport {
    pub name: String,
    pub ticks: SimTick,
    pub placed: usize,
    pub refused: usize,
    pub unsettled: usize,
    pub failures: Vec<ExpectationFailure>,
    pub cells: Vec<Cell>,
}

impl ScenarioReport {
    pub fn passed(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Runs scenarios against a fresh grid each time.
pub struct ScenarioRunner {
    registry: BlockRegistry,
    rules: RuleBook,
    config: PlacementConfig,
}

impl ScenarioRunner {
    pub fn from_config(config: PlacementConfig) -> Result<Self> {
        let registry = config.load_block_registry()?;
        let rules = config.rule_book()?;
        info!(
            dimension = config.dimension.as_str(),
            blocks = registry.len(),
            "scenario runner ready"
        );
        Ok(Self {
            registry,
            rules,
            config,
        })
    }

    pub fn run(&self, scenario: &Scenario) -> ScenarioReport {
        let mut grid = SparseGrid::new(self.config.height_bounds());
        let mut sim = PlacementSimulator::new(self.rules.clone());
        for cell in &scenario.setup {
            grid.put_block(cell.pos, cell.state.clone());
        }

        let mut report = ScenarioReport {
            name: scenario.name.clone(),
            ticks: SimTick::ZERO,
            placed: 0,
            refused: 0,
            unsettled: 0,
            failures: Vec::new(),
            cells: Vec::new(),
        };

        for (index, step) in scenario.steps.iter().enumerate() {
            match step {
                ScenarioStep::Place(request) => {
                    let request = self.with_default_state(request);
                    match sim.place(&mut grid, &self.registry, &request) {
                        Some(_) => report.placed += 1,
                        None => report.refused += 1,
                    }
                }
                ScenarioStep::Break { pos } => {
                    sim.break_block(&mut grid, *pos);
                }
                ScenarioStep::Set { pos, state, notify } => {
                    sim.set_block(&mut grid, *pos, state.clone(), *notify);
                }
                ScenarioStep::Step { count } => {
                    for _ in 0..*count {
                        sim.step(&mut grid, &self.registry);
                    }
                }
                ScenarioStep::Settle { max_ticks } => {
                    let limit = max_ticks.unwrap_or(self.config.max_settle_ticks);
                    if !sim.settle(&mut grid, &self.registry, limit).settled {
                        report.unsettled += 1;
                    }
                }
                ScenarioStep::Expect { pos, state } => {
                    let actual = grid.block(*pos);
                    if !matches_expected(&actual, state) {
                        debug!(step = index, pos = %pos, expected = %state, actual = %actual, "expectation failed");
                        report.failures.push(ExpectationFailure {
                            step: index,
                            pos: *pos,
                            expected: state.to_string(),
                            actual: actual.to_string(),
                        });
                    }
                }
            }
        }

        report.ticks = sim.tick();
        report.cells = grid
            .iter()
            .map(|(pos, state)| Cell {
                pos: *pos,
                state: state.clone(),
            })
            .collect();
        info!(
            scenario = %report.name,
            placed = report.placed,
            refused = report.refused,
            failures = report.failures.len(),
            "scenario finished"
        );
        report
    }

    fn with_default_state(&self, request: &PlacementRequest) -> PlacementRequest {
        let mut request = request.clone();
        if request.block.properties().is_empty() {
            if let Some(default) = self.registry.default_state(request.block.key()) {
                request.block = default.with_attachments_of(&request.block);
            }
        }
        request
    }
}

fn matches_expected(actual: &BlockState, expected: &BlockState) -> bool {
    actual.same_block(expected)
        && expected
            .properties()
            .iter()
            .all(|(name, value)| actual.property(name) == Some(value.as_str()))
}
