#![warn(missing_docs)]
//! Deterministic testing surfaces: the bundled block pack, a world harness,
//! tick-frame capture and newline-delimited JSON event logs.

mod frames;
mod harness;

use anyhow::{Context, Result};
use blockplace_assets::{registry_from_str, BlockRegistry};
use blockplace_core::{BlockPos, SimTick};
use serde::Serialize;
use std::fs::File;
use std::io::Write;
use std::path::Path;

pub use frames::*;
pub use harness::*;

/// The vanilla-subset block pack shipped in `config/blocks.json`.
pub const VANILLA_BLOCKS: &str = include_str!("../../../config/blocks.json");

/// Registry built from [`VANILLA_BLOCKS`].
pub fn vanilla_registry() -> Result<BlockRegistry> {
    registry_from_str(VANILLA_BLOCKS).context("bundled block pack is invalid")
}

/// Primary event record written to event logs.
#[derive(Debug, Serialize)]
pub struct EventRecord<'a> {
    /// Simulation tick when the event occurred.
    pub tick: SimTick,
    /// Human-readable kind label.
    pub kind: &'a str,
    /// Cell involved, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pos: Option<BlockPos>,
    /// Free-form payload, usually a block state string.
    pub payload: &'a str,
}

impl<'a> From<&'a WorldEvent> for EventRecord<'a> {
    fn from(event: &'a WorldEvent) -> Self {
        Self {
            tick: event.tick,
            kind: &event.kind,
            pos: event.pos,
            payload: &event.payload,
        }
    }
}

/// A sink that writes newline-delimited JSON to disk.
pub struct JsonlSink {
    file: File,
}

impl JsonlSink {
    /// Create a new sink at `path`, creating parent dirs if needed.
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self> {
        if let Some(parent) = path.as_ref().parent() {
            std::fs::create_dir_all(parent)?;
        }
        let file = File::create(path)?;
        Ok(Self { file })
    }

    /// Append an event to the log.
    pub fn write(&mut self, event: &EventRecord<'_>) -> Result<()> {
        let line = serde_json::to_string(event)?;
        self.file.write_all(line.as_bytes())?;
        self.file.write_all(b"\n")?;
        Ok(())
    }

    /// Append every event of a world.
    pub fn write_all(&mut self, events: &[WorldEvent]) -> Result<()> {
        for event in events {
            self.write(&EventRecord::from(event))?;
        }
        Ok(())
    }
}
