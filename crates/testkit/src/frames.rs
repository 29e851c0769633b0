//! Tick-by-tick capture for scenario tests.
//!
//! A capture takes a snapshot at tick 0, then steps the state a fixed number
//! of times and snapshots after each step, so a log holds `ticks + 1` frames.

use anyhow::{Context, Result};
use blockplace_core::SimTick;
use serde::Serialize;

/// Single snapshot frame captured at a given tick.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Frame<S> {
    /// Tick number.
    pub tick: u64,
    /// Snapshot payload.
    pub snapshot: S,
}

/// Frames of one capture run.
#[derive(Debug, Clone, Serialize)]
pub struct FrameLog<S> {
    /// Human-readable name.
    pub name: String,
    /// Frames in tick order.
    pub frames: Vec<Frame<S>>,
}

impl<S> FrameLog<S> {
    /// Snapshot taken after the last step.
    pub fn last(&self) -> Option<&S> {
        self.frames.last().map(|frame| &frame.snapshot)
    }

    /// Snapshot at `tick`, if captured.
    pub fn at(&self, tick: u64) -> Option<&S> {
        self.frames
            .iter()
            .find(|frame| frame.tick == tick)
            .map(|frame| &frame.snapshot)
    }

    /// First tick whose snapshot satisfies `pred`.
    pub fn first_tick_where(&self, mut pred: impl FnMut(&S) -> bool) -> Option<u64> {
        self.frames
            .iter()
            .find(|frame| pred(&frame.snapshot))
            .map(|frame| frame.tick)
    }
}

impl<S: Serialize> FrameLog<S> {
    /// Pretty JSON with a trailing newline; object keys come out sorted.
    pub fn to_json(&self) -> Result<String> {
        let mut out = serde_json::to_string_pretty(self)
            .with_context(|| format!("failed to serialize frames of {}", self.name))?;
        out.push('\n');
        Ok(out)
    }
}

/// Capture `ticks` steps of `state`.
pub fn capture_frames<State, Snapshot, StepFn, SnapFn>(
    name: impl Into<String>,
    ticks: u64,
    state: &mut State,
    mut step: StepFn,
    mut snapshot: SnapFn,
) -> FrameLog<Snapshot>
where
    StepFn: FnMut(SimTick, &mut State),
    SnapFn: FnMut(SimTick, &State) -> Snapshot,
{
    let mut frames = Vec::with_capacity(ticks as usize + 1);

    let mut tick = SimTick::ZERO;
    frames.push(Frame {
        tick: tick.0,
        snapshot: snapshot(tick, state),
    });

    for _ in 0..ticks {
        step(tick, state);
        tick = tick.advance(1);
        frames.push(Frame {
            tick: tick.0,
            snapshot: snapshot(tick, state),
        });
    }

    FrameLog {
        name: name.into(),
        frames,
    }
}
