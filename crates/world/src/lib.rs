#![warn(missing_docs)]
//! Block states, placement rules and neighbor-update propagation.
//!
//! Rules see the world through [`WorldAccess`] and the block registry through
//! [`BlockCatalog`]; [`PlacementSimulator`] wires both to a [`RuleBook`] and
//! drains deferred work one step per tick.

pub mod catalog;
pub mod context;
pub mod grid;
pub mod properties;
pub mod rulebook;
pub mod rules;
pub mod sim;
pub mod state;

#[cfg(test)]
mod test_support;

pub use catalog::{BlockCatalog, BlockTraits, CollisionShape};
pub use context::{PlacementContext, UpdateContext, CURSOR_CENTER};
pub use grid::{BlockGetter, BlockStorage, DeferredWork, SparseGrid, WorldAccess};
pub use properties::{names, PropertyValue};
pub use rulebook::{RuleBook, RuleBookError, RuleOverrides};
pub use rules::{BlockRule, PlacementRule, UnknownRuleError};
pub use sim::{PlacementRequest, PlacementSimulator, SettleReport, StepReport};
pub use state::{BlockState, HandlerId, StateParseError};
