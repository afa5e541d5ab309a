//! Block catalog - static per-kind properties and price tables
//!
//! Pure lookups, no mutable state. Colors are xterm-256 palette indices.

use crate::types::{BlockKind, Item, OreKind, BLOCK_KIND_COUNT, MAX_BAG_TIER, MAX_PICKAXE_TIER};

/// Health value of blocks that can never be damaged
pub const INDESTRUCTIBLE: i8 = -1;

/// Glyph drawn for the player
pub const PLAYER_SYMBOL: char = '@';

/// Color of the player glyph
pub const PLAYER_COLOR: u8 = 15;

/// Static properties of one block kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockData {
    pub kind: BlockKind,
    pub ore: Option<OreKind>,
    /// Lowest pickaxe tier able to damage the block (`None` = never minable)
    pub minimum_tier: Option<u8>,
    /// Health of a freshly placed block (`INDESTRUCTIBLE` for non-minable kinds)
    pub health: i8,
    pub symbol: char,
    pub color: u8,
    pub solid_for_player: bool,
    pub solid_for_rocks: bool,
}

impl BlockData {
    const fn new(
        kind: BlockKind,
        minimum_tier: Option<u8>,
        health: i8,
        symbol: char,
        color: u8,
        solid_for_player: bool,
        solid_for_rocks: bool,
    ) -> Self {
        Self {
            kind,
            ore: None,
            minimum_tier,
            health,
            symbol,
            color,
            solid_for_player,
            solid_for_rocks,
        }
    }

    const fn ore(kind: BlockKind, ore: OreKind, tier: u8, health: i8, color: u8) -> Self {
        Self {
            kind,
            ore: Some(ore),
            minimum_tier: Some(tier),
            health,
            symbol: '%',
            color,
            solid_for_player: true,
            solid_for_rocks: true,
        }
    }
}

static BLOCKS: [BlockData; BLOCK_KIND_COUNT] = [
    BlockData::new(BlockKind::Air, None, INDESTRUCTIBLE, '.', 242, false, false),
    BlockData::new(BlockKind::Dirt, Some(0), 10, '#', 94, true, true),
    BlockData::new(BlockKind::ExitShaft, None, INDESTRUCTIBLE, 'H', 52, false, true),
    BlockData::new(BlockKind::Support, None, INDESTRUCTIBLE, '|', 94, false, true),
    BlockData::new(BlockKind::Ladder, None, INDESTRUCTIBLE, 'H', 94, false, false),
    BlockData::new(BlockKind::Rock, None, INDESTRUCTIBLE, 'O', 183, true, true),
    BlockData::new(BlockKind::FallingRock, None, INDESTRUCTIBLE, '!', 183, true, true),
    BlockData::ore(BlockKind::Coal, OreKind::Coal, 0, 20, 16),
    BlockData::ore(BlockKind::Iron, OreKind::Iron, 0, 30, 101),
    BlockData::ore(BlockKind::Copper, OreKind::Copper, 1, 50, 202),
    BlockData::ore(BlockKind::Silver, OreKind::Silver, 2, 75, 231),
    BlockData::ore(BlockKind::Gold, OreKind::Gold, 3, 90, 226),
    BlockData::ore(BlockKind::Platinum, OreKind::Platinum, 4, 120, 153),
];

/// Look up the static properties of a block kind
#[inline]
pub fn block_data(kind: BlockKind) -> &'static BlockData {
    &BLOCKS[kind.as_u8() as usize]
}

/// Sale price of one unit of ore
pub fn ore_price(ore: OreKind) -> i32 {
    match ore {
        OreKind::Coal => 32,
        OreKind::Iron => 64,
        OreKind::Copper => 128,
        OreKind::Silver => 256,
        OreKind::Gold => 512,
        OreKind::Platinum => 1024,
    }
}

const PICKAXE_DAMAGE: [i8; MAX_PICKAXE_TIER as usize + 1] = [3, 4, 4, 4, 9, 9, 20];

const PICKAXE_PRICE: [i32; MAX_PICKAXE_TIER as usize + 1] =
    [0, 4000, 8000, 16000, 32000, 64000, 128000];

const BAG_PRICE: [i32; MAX_BAG_TIER as usize + 1] = [0, 2000, 4000, 8000, 16000];

/// Damage dealt per hit by a pickaxe tier
///
/// Tiers above the maximum deal maximum damage.
pub fn pickaxe_damage(tier: u8) -> i8 {
    PICKAXE_DAMAGE[(tier.min(MAX_PICKAXE_TIER)) as usize]
}

/// Price of upgrading to `tier`, or `None` past the last tier
pub fn pickaxe_price(tier: u8) -> Option<i32> {
    PICKAXE_PRICE.get(tier as usize).copied()
}

/// Price of upgrading the bag to `tier`, or `None` past the last tier
pub fn bag_price(tier: u8) -> Option<i32> {
    BAG_PRICE.get(tier as usize).copied()
}

pub fn item_price(item: Item) -> i32 {
    match item {
        Item::Coffee => 60,
        Item::Dynamite => 200,
        Item::Support => 25,
        Item::Ladder => 25,
    }
}
