//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the application.
//! All types are plain data with no external dependencies, so they can be used
//! by the simulation, the terminal view and the input mapping alike.
//!
//! # Mine Dimensions
//!
//! - **Width**: 512 columns (indexed 0-511)
//! - **Height**: 512 rows (indexed 0-511, row 0 is the surface border)
//! - **Spawn position**: (2, 1), next to the exit shaft at (1, 1)
//!
//! The outermost ring of cells is indestructible terrain, so every coordinate a
//! player can reach has all four neighbors inside the grid.
//!
//! # Turn Constants
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `MAX_STAMINA` | 1000 | Stamina after a rescue or a coffee |
//! | `MOVE_STAMINA_COST` | 1 | Cost of a voluntary step |
//! | `DIG_STAMINA_COST` | 5 | Cost of a damaging dig |
//! | `MAX_FALL_DISTANCE` | 6 | Longest survivable free fall |
//! | `ROCK_FALL_THRESHOLD` | -2 | Falling rock drops once its health is below this |
//! | `MAX_FALLING_ROCKS` | 32 | Capacity of the falling-rock set |
//!
//! # Examples
//!
//! ```
//! use tui_miner_types::{BlockKind, Direction, OreKind, MINE_WIDTH};
//!
//! assert_eq!(BlockKind::from_u8(5), Some(BlockKind::Rock));
//! assert_eq!(BlockKind::Coal.ore(), Some(OreKind::Coal));
//! assert_eq!(Direction::Left.delta(), (-1, 0));
//! assert_eq!(MINE_WIDTH, 512);
//! ```

/// Mine width in cells
pub const MINE_WIDTH: i32 = 512;

/// Mine height in cells
pub const MINE_HEIGHT: i32 = 512;

/// Camera viewport width in cells
pub const CAMERA_WIDTH: i32 = 32;

/// Camera viewport height in cells
pub const CAMERA_HEIGHT: i32 = 32;

/// Distance from the viewport edge at which the camera starts scrolling
pub const CAMERA_MARGIN: i32 = 8;

/// Player spawn column
pub const PLAYER_START_X: i32 = 2;

/// Player spawn row
pub const PLAYER_START_Y: i32 = 1;

/// Exit shaft column (walking into it returns to the surface)
pub const EXIT_SHAFT_X: i32 = 1;

/// Exit shaft row
pub const EXIT_SHAFT_Y: i32 = 1;

/// Full stamina
pub const MAX_STAMINA: i32 = 1000;

/// Stamina spent per voluntary step
pub const MOVE_STAMINA_COST: i32 = 1;

/// Stamina spent per damaging dig
pub const DIG_STAMINA_COST: i32 = 5;

/// A fall longer than this many cells requires a rescue
pub const MAX_FALL_DISTANCE: i32 = 6;

/// A falling rock executes its fall once its health drops below this value
pub const ROCK_FALL_THRESHOLD: i8 = -2;

/// Capacity of the falling-rock set
pub const MAX_FALLING_ROCKS: usize = 32;

/// Rescue cost per row of depth
pub const RESCUE_MULTIPLIER: i32 = 4;

/// Number of blinks in the rescue cutscene
pub const RESCUE_BLINKS: u32 = 5;

/// Duration of each half-blink in the rescue cutscene
pub const RESCUE_BLINK_MS: u64 = 250;

/// Highest pickaxe tier
pub const MAX_PICKAXE_TIER: u8 = 6;

/// Highest bag tier
pub const MAX_BAG_TIER: u8 = 4;

/// Money at the start of a new game
pub const STARTING_MONEY: i32 = 0;

/// Ore capacity with the starting bag
pub const STARTING_MAX_ORE: i32 = 16;

/// Support capacity with the starting bag
pub const STARTING_MAX_SUPPORTS: i32 = 16;

/// Ladder capacity with the starting bag
pub const STARTING_MAX_LADDERS: i32 = 16;

/// Coffee capacity with the starting bag
pub const STARTING_MAX_COFFEE: i32 = 4;

/// Dynamite capacity with the starting bag
pub const STARTING_MAX_DYNAMITE: i32 = 4;

/// Number of ore kinds
pub const ORE_COUNT: usize = 6;

/// Number of block kinds
pub const BLOCK_KIND_COUNT: usize = 13;

/// Every kind of cell in the mine
///
/// The discriminants are the on-disk block bytes; the high bit of the byte is
/// reserved for the visibility flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u8)]
pub enum BlockKind {
    #[default]
    Air = 0,
    Dirt = 1,
    ExitShaft = 2,
    Support = 3,
    Ladder = 4,
    Rock = 5,
    /// A rock scheduled to fall (member of the falling-rock set)
    FallingRock = 6,
    Coal = 7,
    Iron = 8,
    Copper = 9,
    Silver = 10,
    Gold = 11,
    Platinum = 12,
}

impl BlockKind {
    pub const ALL: [BlockKind; BLOCK_KIND_COUNT] = [
        BlockKind::Air,
        BlockKind::Dirt,
        BlockKind::ExitShaft,
        BlockKind::Support,
        BlockKind::Ladder,
        BlockKind::Rock,
        BlockKind::FallingRock,
        BlockKind::Coal,
        BlockKind::Iron,
        BlockKind::Copper,
        BlockKind::Silver,
        BlockKind::Gold,
        BlockKind::Platinum,
    ];

    /// Decode a block byte (without the visibility bit)
    pub fn from_u8(byte: u8) -> Option<Self> {
        Self::ALL.get(byte as usize).copied()
    }

    pub fn as_u8(self) -> u8 {
        self as u8
    }

    /// The ore this block yields when mined, if any
    pub fn ore(self) -> Option<OreKind> {
        match self {
            BlockKind::Coal => Some(OreKind::Coal),
            BlockKind::Iron => Some(OreKind::Iron),
            BlockKind::Copper => Some(OreKind::Copper),
            BlockKind::Silver => Some(OreKind::Silver),
            BlockKind::Gold => Some(OreKind::Gold),
            BlockKind::Platinum => Some(OreKind::Platinum),
            _ => None,
        }
    }
}

/// Ore kinds, cheapest first
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OreKind {
    Coal,
    Iron,
    Copper,
    Silver,
    Gold,
    Platinum,
}

impl OreKind {
    pub const ALL: [OreKind; ORE_COUNT] = [
        OreKind::Coal,
        OreKind::Iron,
        OreKind::Copper,
        OreKind::Silver,
        OreKind::Gold,
        OreKind::Platinum,
    ];

    /// Index into per-ore arrays
    pub fn index(self) -> usize {
        self as usize
    }

    /// The block that carries this ore
    pub fn block(self) -> BlockKind {
        match self {
            OreKind::Coal => BlockKind::Coal,
            OreKind::Iron => BlockKind::Iron,
            OreKind::Copper => BlockKind::Copper,
            OreKind::Silver => BlockKind::Silver,
            OreKind::Gold => BlockKind::Gold,
            OreKind::Platinum => BlockKind::Platinum,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            OreKind::Coal => "Coal",
            OreKind::Iron => "Iron",
            OreKind::Copper => "Copper",
            OreKind::Silver => "Silver",
            OreKind::Gold => "Gold",
            OreKind::Platinum => "Platinum",
        }
    }
}

/// Cardinal directions on the grid (y grows downwards)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Grid offset `(dx, dy)` for one step in this direction
    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }
}

/// What the directional action keys do
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ActionMode {
    #[default]
    Dig,
    PlaceSupport,
    PlaceLadder,
    UseDynamite,
}

/// Why the player had to be rescued
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RescueCause {
    OutOfStamina,
    CrushedByRock,
    Fall,
}

impl RescueCause {
    pub fn describe(self) -> &'static str {
        match self {
            RescueCause::OutOfStamina => {
                "You ran out of stamina and had nothing to replenish it with"
            }
            RescueCause::CrushedByRock => "You were crushed by a falling rock",
            RescueCause::Fall => "You fell down 6+ blocks",
        }
    }
}

/// Consumable items sold in the shop
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Item {
    Coffee,
    Dynamite,
    Support,
    Ladder,
}

impl Item {
    pub const ALL: [Item; 4] = [Item::Coffee, Item::Dynamite, Item::Support, Item::Ladder];

    pub fn name(self) -> &'static str {
        match self {
            Item::Coffee => "Coffee",
            Item::Dynamite => "Dynamite",
            Item::Support => "Support",
            Item::Ladder => "Ladder",
        }
    }
}

/// Player input in the mine
///
/// One action is consumed per input read; a turn advances only when the action
/// changes the world (see `Simulation::apply_action`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    /// Walk one cell (or auto-dig when blocked and auto-dig is on)
    Move(Direction),
    /// Perform the current action mode towards a direction, or on the
    /// player's own cell when `None`
    Act(Option<Direction>),
    /// Switch the action mode
    SelectMode(ActionMode),
    /// Toggle auto-dig
    ToggleAutoDig,
    /// Let a turn pass without acting
    Wait,
}

/// Input on the surface menu and shop screens
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuKey {
    Up,
    Down,
    Select,
}
