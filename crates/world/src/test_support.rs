//! Minimal catalog and world used by unit tests inside this crate.

use crate::catalog::{BlockCatalog, BlockTraits, CollisionShape};
use crate::grid::{BlockGetter, BlockStorage, DeferredWork, SparseGrid, WorldAccess};
use crate::state::BlockState;
use blockplace_core::{BlockPos, HeightBounds, RegistryKey};
use std::collections::{BTreeMap, BTreeSet};

/// Catalog keyed by block path. Unknown blocks are solid cubes.
#[derive(Debug, Default)]
pub struct TestCatalog {
    traits: BTreeMap<String, BlockTraits>,
    tags: BTreeMap<String, BTreeSet<String>>,
}

impl TestCatalog {
    pub fn vanilla() -> Self {
        let mut catalog = Self::default();
        let passable = BlockTraits {
            solid: false,
            replaceable: false,
            occludes: false,
            liquid: false,
            shape: CollisionShape::EMPTY,
        };
        for name in ["short_grass", "snow"] {
            catalog.set(name, BlockTraits {
                replaceable: true,
                ..passable
            });
        }
        for name in ["water", "lava"] {
            catalog.set(name, BlockTraits {
                replaceable: true,
                liquid: true,
                ..passable
            });
        }
        for name in ["rail", "powered_rail", "oak_sign", "torch", "wheat"] {
            catalog.set(name, passable);
        }
        let post = BlockTraits {
            occludes: false,
            shape: CollisionShape::new(
                glam::DVec3::new(0.375, 0.0, 0.375),
                glam::DVec3::new(0.625, 1.5, 0.625),
            ),
            ..BlockTraits::SOLID
        };
        for name in [
            "oak_fence",
            "nether_brick_fence",
            "oak_fence_gate",
            "cobblestone_wall",
            "iron_bars",
            "glass_pane",
            "red_stained_glass_pane",
        ] {
            catalog.set(name, post);
        }
        catalog.set("glass", BlockTraits {
            occludes: false,
            ..BlockTraits::SOLID
        });

        catalog.tag("stairs", &["oak_stairs", "stone_stairs"]);
        catalog.tag("rails", &["rail", "powered_rail"]);
        catalog.tag("walls", &["cobblestone_wall"]);
        catalog.tag("fences", &["oak_fence", "nether_brick_fence"]);
        catalog.tag("wooden_fences", &["oak_fence"]);
        catalog.tag("fence_gates", &["oak_fence_gate"]);
        catalog.tag("doors", &["oak_door"]);
        catalog.tag("beds", &["red_bed"]);
        catalog.tag("leaves", &["oak_leaves"]);
        catalog
    }

    pub fn set(&mut self, name: &str, traits: BlockTraits) {
        self.traits.insert(name.to_string(), traits);
    }

    pub fn tag(&mut self, tag: &str, members: &[&str]) {
        let entry = self.tags.entry(format!("minecraft:{tag}")).or_default();
        entry.extend(members.iter().map(|m| m.to_string()));
    }
}

impl BlockCatalog for TestCatalog {
    fn traits(&self, state: &BlockState) -> BlockTraits {
        if state.is_air() {
            return BlockTraits::AIR;
        }
        self.traits
            .get(state.key().path())
            .copied()
            .unwrap_or(BlockTraits::SOLID)
    }

    fn has_tag(&self, state: &BlockState, tag: &str) -> bool {
        self.tags
            .get(tag)
            .is_some_and(|members| members.contains(state.key().path()))
    }

    fn default_state(&self, block: &RegistryKey) -> Option<BlockState> {
        Some(BlockState::new(block.clone()))
    }
}

/// Grid plus a record of everything scheduled.
#[derive(Debug, Default)]
pub struct TestWorld {
    pub grid: SparseGrid,
    pub scheduled: Vec<DeferredWork>,
}

impl TestWorld {
    pub fn new() -> Self {
        Self {
            grid: SparseGrid::new(HeightBounds::new(-64, 320)),
            scheduled: Vec::new(),
        }
    }

    pub fn put(&mut self, pos: BlockPos, state: &str) {
        self.grid.put_block(pos, state.parse().expect("valid state"));
    }
}

impl BlockGetter for TestWorld {
    fn block(&self, pos: BlockPos) -> BlockState {
        self.grid.block(pos)
    }

    fn height_bounds(&self) -> HeightBounds {
        self.grid.height_bounds()
    }
}

impl WorldAccess for TestWorld {
    fn set_block(&mut self, pos: BlockPos, state: BlockState, notify: bool) {
        self.grid.put_block(pos, state);
        if notify {
            self.scheduled.push(DeferredWork::NeighborUpdate {
                origin: pos,
                distance: 0,
            });
        }
    }

    fn schedule(&mut self, work: DeferredWork) {
        self.scheduled.push(work);
    }
}

pub fn state(raw: &str) -> BlockState {
    raw.parse().expect("valid state")
}
