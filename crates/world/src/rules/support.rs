//! Tag names and neighbor predicates shared by several rule families.

use crate::catalog::BlockCatalog;
use crate::state::BlockState;

/// Vanilla tag names consulted by the rules.
pub mod tags {
    /// Every stair block.
    pub const STAIRS: &str = "minecraft:stairs";
    /// Every rail block.
    pub const RAILS: &str = "minecraft:rails";
    /// Every wall block.
    pub const WALLS: &str = "minecraft:walls";
    /// Every fence block.
    pub const FENCES: &str = "minecraft:fences";
    /// Wooden fences (connect to each other but not to nether brick fences).
    pub const WOODEN_FENCES: &str = "minecraft:wooden_fences";
    /// Every fence gate.
    pub const FENCE_GATES: &str = "minecraft:fence_gates";
    /// Every door.
    pub const DOORS: &str = "minecraft:doors";
    /// Every bed.
    pub const BEDS: &str = "minecraft:beds";
    /// Standing and wall banners.
    pub const BANNERS: &str = "minecraft:banners";
    /// Leaves never receive wall/fence connections.
    pub const LEAVES: &str = "minecraft:leaves";
    /// Shulker boxes never receive wall/fence connections.
    pub const SHULKER_BOXES: &str = "minecraft:shulker_boxes";
    /// Four-block tall flowers.
    pub const TALL_FLOWERS: &str = "minecraft:tall_flowers";
    /// Farmland crops.
    pub const CROPS: &str = "minecraft:crops";
    /// Floor signs.
    pub const STANDING_SIGNS: &str = "minecraft:standing_signs";
    /// Signs on a wall.
    pub const WALL_SIGNS: &str = "minecraft:wall_signs";
    /// Hanging signs under a block.
    pub const CEILING_HANGING_SIGNS: &str = "minecraft:ceiling_hanging_signs";
    /// Hanging signs on a wall.
    pub const WALL_HANGING_SIGNS: &str = "minecraft:wall_hanging_signs";
    /// Every slab.
    pub const SLABS: &str = "minecraft:slabs";
    /// Every trapdoor.
    pub const TRAPDOORS: &str = "minecraft:trapdoors";
    /// Every button.
    pub const BUTTONS: &str = "minecraft:buttons";
    /// Logs and stems.
    pub const LOGS: &str = "minecraft:logs";
}

/// Blocks that walls, fences and panes never attach to even when their face is full.
pub fn cannot_connect_to(catalog: &dyn BlockCatalog, state: &BlockState) -> bool {
    catalog.has_tag(state, tags::LEAVES)
        || catalog.has_tag(state, tags::SHULKER_BOXES)
        || ["barrier", "carved_pumpkin", "jack_o_lantern", "melon", "pumpkin"]
            .iter()
            .any(|name| state.is(name))
}

/// Ground that plants root in.
pub fn is_plant_soil(state: &BlockState) -> bool {
    const SOIL: [&str; 11] = [
        "dirt",
        "grass_block",
        "podzol",
        "coarse_dirt",
        "mycelium",
        "rooted_dirt",
        "moss_block",
        "pale_moss_block",
        "mud",
        "muddy_mangrove_roots",
        "farmland",
    ];
    SOIL.iter().any(|name| state.is(name))
}
