//! Build module - placing supports and ladders

use crate::game_state::Simulation;
use crate::mine::Coord;
use crate::types::{BlockKind, Direction, Item};

impl Simulation {
    /// Place a support in an empty cell that has something underneath
    pub fn build_support(&mut self, dir: Option<Direction>) -> bool {
        let Some(at) = self.action_target(dir) else {
            return false;
        };
        if self.mine.kind(at) != BlockKind::Air {
            return false;
        }
        let below = at.below();
        if !below.in_bounds() || self.mine.kind(below) == BlockKind::Air {
            return false;
        }
        if !self.inventory.consume(Item::Support) {
            return false;
        }
        self.stats.supports_placed += 1;
        self.place_structure(at, BlockKind::Support);
        true
    }

    /// Place a ladder in an empty cell
    pub fn build_ladder(&mut self, dir: Option<Direction>) -> bool {
        let Some(at) = self.action_target(dir) else {
            return false;
        };
        if self.mine.kind(at) != BlockKind::Air || !self.inventory.consume(Item::Ladder) {
            return false;
        }
        self.stats.ladders_placed += 1;
        self.place_structure(at, BlockKind::Ladder);
        true
    }

    pub(crate) fn place_structure(&mut self, at: Coord, kind: BlockKind) {
        self.stats.structures_placed += 1;
        self.mine.put(at, kind);
        self.mine.reveal(at);
        log::debug!("placed {:?} at ({}, {})", kind, at.x, at.y);
    }
}
