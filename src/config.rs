use anyhow::{Context, Result};
use blockplace_assets::{registry_from_file, registry_from_str, BlockRegistry};
use blockplace_core::{DimensionId, HeightBounds};
use blockplace_world::{RuleBook, RuleOverrides};
use serde::Deserialize;
use std::{
    fs,
    path::{Path, PathBuf},
};
use tracing::warn;

pub const DEFAULT_CONFIG_PATH: &str = "config/placement.toml";
const DEFAULT_BLOCKS_PATH: &str = "config/blocks.json";
const BUNDLED_BLOCKS: &str = include_str!("../config/blocks.json");

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct PlacementConfig {
    /// Dimension whose height limits bound the grid.
    pub dimension: DimensionId,
    /// Step limit for each `settle` in a scenario.
    pub max_settle_ticks: u64,
    /// Block pack to load; the bundled pack is used when it cannot be read.
    pub blocks_path: PathBuf,
    /// Extra tag/block to rule family routes.
    pub rules: RuleOverrides,
}

impl Default for PlacementConfig {
    fn default() -> Self {
        Self {
            dimension: DimensionId::DEFAULT,
            max_settle_ticks: 64,
            blocks_path: PathBuf::from(DEFAULT_BLOCKS_PATH),
            rules: RuleOverrides::default(),
        }
    }
}

impl PlacementConfig {
    /// Load configuration from an explicit path, falling back to defaults on errors.
    pub fn load_from_path(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(contents) => match toml::from_str::<PlacementConfig>(&contents) {
                Ok(cfg) => cfg,
                Err(err) => {
                    warn!("Failed to parse {}: {err}. Using defaults", path.display());
                    PlacementConfig::default()
                }
            },
            Err(err) => {
                if path != Path::new(DEFAULT_CONFIG_PATH)
                    || err.kind() != std::io::ErrorKind::NotFound
                {
                    warn!("Failed to read {}: {err}. Using defaults", path.display());
                }
                PlacementConfig::default()
            }
        }
    }

    pub fn height_bounds(&self) -> HeightBounds {
        self.dimension.height_bounds()
    }

    /// Vanilla rule table with the configured overrides applied.
    pub fn rule_book(&self) -> Result<RuleBook> {
        let mut book = RuleBook::vanilla();
        book.apply_overrides(&self.rules)
            .context("invalid rule override in placement config")?;
        Ok(book)
    }

    /// Block registry from `blocks_path`, or the bundled pack when that fails.
    pub fn load_block_registry(&self) -> Result<BlockRegistry> {
        match registry_from_file(&self.blocks_path) {
            Ok(registry) => Ok(registry),
            Err(err) => {
                warn!(
                    "Failed to load block pack {}: {err}. Using bundled pack",
                    self.blocks_path.display()
                );
                registry_from_str(BUNDLED_BLOCKS).context("bundled block pack is invalid")
            }
        }
    }
}
