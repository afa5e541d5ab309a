//! Player module - position, camera, inventory and lifetime statistics

use crate::mine::Coord;
use crate::types::{
    Direction, Item, OreKind, CAMERA_HEIGHT, CAMERA_MARGIN, CAMERA_WIDTH, MAX_STAMINA,
    MINE_HEIGHT, MINE_WIDTH, ORE_COUNT, PLAYER_START_X, PLAYER_START_Y, STARTING_MAX_COFFEE,
    STARTING_MAX_DYNAMITE, STARTING_MAX_LADDERS, STARTING_MAX_ORE, STARTING_MAX_SUPPORTS,
    STARTING_MONEY,
};

/// Where the player is and what they carry in their hands
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
    /// Grid position
    pub pos: Coord,
    /// Position inside the camera viewport
    pub screen: Coord,
    /// Top-left grid cell of the camera viewport
    pub camera: Coord,
    pub stamina: i32,
    pub money: i32,
    pub pickaxe_tier: u8,
    pub bag_tier: u8,
}

impl Player {
    pub fn new() -> Self {
        Self {
            pos: Self::spawn(),
            screen: Self::spawn(),
            camera: Coord::new(0, 0),
            stamina: MAX_STAMINA,
            money: STARTING_MONEY,
            pickaxe_tier: 0,
            bag_tier: 0,
        }
    }

    pub fn spawn() -> Coord {
        Coord::new(PLAYER_START_X, PLAYER_START_Y)
    }

    /// Put the player back at the spawn point with a fresh camera
    pub fn reset_to_spawn(&mut self) {
        self.pos = Self::spawn();
        self.screen = Self::spawn();
        self.camera = Coord::new(0, 0);
        self.stamina = MAX_STAMINA;
    }

    /// Follow a one-cell move of the player with the viewport
    ///
    /// The player glyph moves freely inside the margin band; beyond it the
    /// camera scrolls instead, until the camera hits the edge of the mine.
    pub fn scroll(&mut self, dir: Direction) {
        match dir {
            Direction::Up => {
                if self.screen.y > CAMERA_MARGIN {
                    self.screen.y -= 1;
                } else if self.camera.y > 0 {
                    self.camera.y -= 1;
                } else {
                    self.screen.y -= 1;
                }
            }
            Direction::Down => {
                if self.screen.y < CAMERA_HEIGHT - CAMERA_MARGIN {
                    self.screen.y += 1;
                } else if self.camera.y < MINE_HEIGHT - CAMERA_HEIGHT {
                    self.camera.y += 1;
                } else {
                    self.screen.y += 1;
                }
            }
            Direction::Left => {
                if self.screen.x > CAMERA_MARGIN {
                    self.screen.x -= 1;
                } else if self.camera.x > 0 {
                    self.camera.x -= 1;
                } else {
                    self.screen.x -= 1;
                }
            }
            Direction::Right => {
                if self.screen.x < CAMERA_WIDTH - CAMERA_MARGIN {
                    self.screen.x += 1;
                } else if self.camera.x < MINE_WIDTH - CAMERA_WIDTH {
                    self.camera.x += 1;
                } else {
                    self.screen.x += 1;
                }
            }
        }
    }
}

impl Default for Player {
    fn default() -> Self {
        Self::new()
    }
}

/// Carried ore and consumables with their capacities
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Inventory {
    /// Per-ore counts, indexed by [`OreKind::index`]
    pub ore: [i32; ORE_COUNT],
    /// Always equal to the sum of `ore`
    pub ore_total: i32,
    pub supports: i32,
    pub ladders: i32,
    pub coffee: i32,
    pub dynamite: i32,
    pub max_ore: i32,
    pub max_supports: i32,
    pub max_ladders: i32,
    pub max_coffee: i32,
    pub max_dynamite: i32,
}

impl Inventory {
    pub fn new() -> Self {
        Self {
            ore: [0; ORE_COUNT],
            ore_total: 0,
            supports: 0,
            ladders: 0,
            coffee: 0,
            dynamite: 0,
            max_ore: STARTING_MAX_ORE,
            max_supports: STARTING_MAX_SUPPORTS,
            max_ladders: STARTING_MAX_LADDERS,
            max_coffee: STARTING_MAX_COFFEE,
            max_dynamite: STARTING_MAX_DYNAMITE,
        }
    }

    pub fn ore_count(&self, ore: OreKind) -> i32 {
        self.ore[ore.index()]
    }

    pub fn ore_full(&self) -> bool {
        self.ore_total >= self.max_ore
    }

    /// Add one unit of ore unless the bag is full
    pub fn credit_ore(&mut self, ore: OreKind) -> bool {
        if self.ore_full() {
            return false;
        }
        self.ore[ore.index()] += 1;
        self.ore_total += 1;
        true
    }

    /// Empty the ore bag, returning what was in it
    pub fn take_ore(&mut self) -> [i32; ORE_COUNT] {
        self.ore_total = 0;
        std::mem::take(&mut self.ore)
    }

    pub fn count(&self, item: Item) -> i32 {
        match item {
            Item::Coffee => self.coffee,
            Item::Dynamite => self.dynamite,
            Item::Support => self.supports,
            Item::Ladder => self.ladders,
        }
    }

    pub fn count_mut(&mut self, item: Item) -> &mut i32 {
        match item {
            Item::Coffee => &mut self.coffee,
            Item::Dynamite => &mut self.dynamite,
            Item::Support => &mut self.supports,
            Item::Ladder => &mut self.ladders,
        }
    }

    pub fn capacity(&self, item: Item) -> i32 {
        match item {
            Item::Coffee => self.max_coffee,
            Item::Dynamite => self.max_dynamite,
            Item::Support => self.max_supports,
            Item::Ladder => self.max_ladders,
        }
    }

    /// Take one unit of an item if any is left
    pub fn consume(&mut self, item: Item) -> bool {
        let count = self.count_mut(item);
        if *count > 0 {
            *count -= 1;
            true
        } else {
            false
        }
    }

    /// Bag upgrade: every capacity doubles
    pub fn double_capacities(&mut self) {
        self.max_ore *= 2;
        self.max_supports *= 2;
        self.max_ladders *= 2;
        self.max_coffee *= 2;
        self.max_dynamite *= 2;
    }
}

impl Default for Inventory {
    fn default() -> Self {
        Self::new()
    }
}

/// Lifetime counters shown on the stats screen
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Stats {
    pub blocks_mined: i32,
    pub ore_mined: i32,
    pub ore_mined_by_kind: [i32; ORE_COUNT],
    pub money_earned: i32,
    pub money_spent: i32,
    pub coffee_bought: i32,
    pub dynamite_bought: i32,
    pub supports_bought: i32,
    pub ladders_bought: i32,
    pub coffee_used: i32,
    pub dynamite_used: i32,
    pub structures_placed: i32,
    pub supports_placed: i32,
    pub ladders_placed: i32,
    pub times_rescued: i32,
    pub money_spent_on_rescues: i32,
    pub times_out_of_stamina: i32,
    pub times_crushed: i32,
    pub times_fallen: i32,
}

impl Stats {
    pub fn bought(&self, item: Item) -> i32 {
        match item {
            Item::Coffee => self.coffee_bought,
            Item::Dynamite => self.dynamite_bought,
            Item::Support => self.supports_bought,
            Item::Ladder => self.ladders_bought,
        }
    }

    pub fn bought_mut(&mut self, item: Item) -> &mut i32 {
        match item {
            Item::Coffee => &mut self.coffee_bought,
            Item::Dynamite => &mut self.dynamite_bought,
            Item::Support => &mut self.supports_bought,
            Item::Ladder => &mut self.ladders_bought,
        }
    }

    pub fn ore_mined(&self, ore: OreKind) -> i32 {
        self.ore_mined_by_kind[ore.index()]
    }
}
