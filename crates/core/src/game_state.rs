//! Game state module - the owned simulation context
//!
//! [`Simulation`] bundles the mine grid, the falling-rock set and the player
//! state into one value that every operation receives explicitly. The rules
//! themselves live in sibling modules as further `impl Simulation` blocks:
//! mining, collapse, movement, building, rescue and shop.
//!
//! A turn is driven by [`Simulation::apply_action`]. Actions that change the
//! world advance the turn; after that the player falls while unsupported and
//! every falling rock is advanced once.

use crate::collapse::FallingRocks;
use crate::mine::{Coord, Mine};
use crate::player::{Inventory, Player, Stats};
use crate::rescue::{Cutscene, SurfaceReport};
use crate::types::{
    ActionMode, BlockKind, Direction, GameAction, RescueCause, EXIT_SHAFT_X, EXIT_SHAFT_Y,
    MAX_FALL_DISTANCE,
};
use crate::worldgen::generate_mine;

/// Complete simulation state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Simulation {
    pub(crate) mine: Mine,
    pub(crate) falling: FallingRocks,
    pub(crate) player: Player,
    pub(crate) inventory: Inventory,
    pub(crate) stats: Stats,
    pub(crate) mode: ActionMode,
    pub(crate) auto_dig: bool,
    /// Returns to the surface not yet shown by the front end
    pub(crate) reports: Vec<SurfaceReport>,
}

impl Simulation {
    /// Start a new game in a freshly generated mine
    pub fn new(seed: u32) -> Self {
        log::info!("generating mine with seed {}", seed);
        Self::with_mine(generate_mine(seed))
    }

    /// Start a new game in the given mine
    pub fn with_mine(mine: Mine) -> Self {
        Self {
            mine,
            falling: FallingRocks::new(),
            player: Player::new(),
            inventory: Inventory::new(),
            stats: Stats::default(),
            mode: ActionMode::default(),
            auto_dig: false,
            reports: Vec::new(),
        }
    }

    pub fn mine(&self) -> &Mine {
        &self.mine
    }

    /// Get mutable reference to the mine (for tests and scenario setup)
    pub fn mine_mut(&mut self) -> &mut Mine {
        &mut self.mine
    }

    pub fn falling_rocks(&self) -> &FallingRocks {
        &self.falling
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn player_mut(&mut self) -> &mut Player {
        &mut self.player
    }

    pub fn inventory(&self) -> &Inventory {
        &self.inventory
    }

    pub fn inventory_mut(&mut self) -> &mut Inventory {
        &mut self.inventory
    }

    pub fn stats(&self) -> &Stats {
        &self.stats
    }

    pub fn mode(&self) -> ActionMode {
        self.mode
    }

    pub fn auto_dig(&self) -> bool {
        self.auto_dig
    }

    /// Move the player to `at`, keeping the camera bookkeeping consistent
    ///
    /// The camera is placed so the player sits inside the scroll margins.
    pub fn teleport(&mut self, at: Coord) {
        let spawn = Player::spawn();
        self.player.pos = spawn;
        self.player.screen = spawn;
        self.player.camera = Coord::new(0, 0);
        let (dx, dy) = (at.x - spawn.x, at.y - spawn.y);
        for _ in 0..dx.unsigned_abs() {
            let dir = if dx > 0 { Direction::Right } else { Direction::Left };
            self.player.scroll(dir);
        }
        for _ in 0..dy.unsigned_abs() {
            let dir = if dy > 0 { Direction::Down } else { Direction::Up };
            self.player.scroll(dir);
        }
        self.player.pos = at;
    }

    /// Drain the pending surface reports (oldest first)
    pub fn take_surface_reports(&mut self) -> Vec<SurfaceReport> {
        std::mem::take(&mut self.reports)
    }

    pub fn has_surface_reports(&self) -> bool {
        !self.reports.is_empty()
    }

    /// Apply one input action
    ///
    /// Returns `true` when the action advanced the turn. Refused actions and
    /// mode switches leave the world untouched. Walking into the exit shaft
    /// returns to the surface without advancing the turn.
    pub fn apply_action(&mut self, action: GameAction, cutscene: &mut dyn Cutscene) -> bool {
        let advance = match action {
            GameAction::Wait => true,
            GameAction::Move(dir) => {
                if self.move_player(dir, false, cutscene) {
                    if self.player.pos == Coord::new(EXIT_SHAFT_X, EXIT_SHAFT_Y) {
                        self.return_to_surface(None, cutscene);
                        false
                    } else {
                        true
                    }
                } else if self.auto_dig {
                    self.dig(dir, cutscene)
                } else {
                    false
                }
            }
            GameAction::Act(dir) => match self.mode {
                ActionMode::Dig => match dir {
                    Some(dir) => self.dig(dir, cutscene),
                    None => false,
                },
                ActionMode::PlaceSupport => self.build_support(dir),
                ActionMode::PlaceLadder => self.build_ladder(dir),
                ActionMode::UseDynamite => self.use_dynamite(dir),
            },
            GameAction::SelectMode(mode) => {
                self.mode = mode;
                false
            }
            GameAction::ToggleAutoDig => {
                self.auto_dig = !self.auto_dig;
                false
            }
        };

        if advance {
            self.end_turn(cutscene);
        }
        advance
    }

    /// Gravity on the player, then one pass over the falling rocks
    fn end_turn(&mut self, cutscene: &mut dyn Cutscene) {
        let mut fall_distance = 0;
        while self.mine.kind(self.player.pos.below()) == BlockKind::Air {
            if !self.move_player(Direction::Down, true, cutscene) {
                break;
            }
            fall_distance += 1;
        }
        if fall_distance > MAX_FALL_DISTANCE {
            log::debug!("player fell {} cells", fall_distance);
            self.return_to_surface(Some(RescueCause::Fall), cutscene);
        }
        self.advance_falling_rocks(cutscene);
    }
}
