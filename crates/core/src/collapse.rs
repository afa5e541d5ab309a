//! Collapse module - falling rocks and support collapse
//!
//! A rock loses its footing when the cell below it is cleared. It turns into a
//! falling rock, joins the falling-rock set and counts its health down once
//! per turn; when the health drops below [`ROCK_FALL_THRESHOLD`] it drops
//! straight down until it hits something solid for rocks.
//!
//! A fall can cascade: the rock above the fallen one becomes unstable, and a
//! support above it collapses as a whole column. A rock that lands on the
//! player either gets stopped by an emergency support or crushes them.
//!
//! Each pass works on a snapshot of the set taken at its start, so every rock
//! present at the start is advanced exactly once and rocks made unstable
//! during the pass wait for the next turn.

use arrayvec::ArrayVec;

use crate::game_state::Simulation;
use crate::mine::Coord;
use crate::rescue::Cutscene;
use crate::types::{BlockKind, Item, RescueCause, MAX_FALLING_ROCKS, ROCK_FALL_THRESHOLD};

/// Bounded, duplicate-free, insertion-ordered set of falling rock positions
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FallingRocks {
    slots: ArrayVec<Coord, MAX_FALLING_ROCKS>,
}

impl FallingRocks {
    pub fn new() -> Self {
        Self {
            slots: ArrayVec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.slots.is_full()
    }

    pub fn contains(&self, at: Coord) -> bool {
        self.slots.contains(&at)
    }

    pub fn as_slice(&self) -> &[Coord] {
        &self.slots
    }

    pub fn iter(&self) -> impl Iterator<Item = Coord> + '_ {
        self.slots.iter().copied()
    }

    /// Add a position; refused when already present or when the set is full
    pub fn insert(&mut self, at: Coord) -> bool {
        if self.contains(at) {
            return false;
        }
        self.slots.try_push(at).is_ok()
    }

    /// Remove a position, keeping the order of the others
    pub fn remove(&mut self, at: Coord) -> bool {
        match self.slots.iter().position(|&c| c == at) {
            Some(index) => {
                self.slots.remove(index);
                true
            }
            None => false,
        }
    }
}

impl Simulation {
    /// Turn the stable rock at `at` into a falling rock
    ///
    /// Returns `false` when the set is full; the rock then stays stable.
    pub(crate) fn set_falling_rock(&mut self, at: Coord) -> bool {
        if self.falling.contains(at) {
            return false;
        }
        if self.falling.is_full() {
            log::warn!(
                "falling-rock set full ({} entries), rock at ({}, {}) stays put",
                MAX_FALLING_ROCKS,
                at.x,
                at.y
            );
            return false;
        }
        self.mine.put(at, BlockKind::FallingRock);
        self.mine.reveal(at);
        self.falling.insert(at)
    }

    /// React to the cell below `at` being cleared
    pub(crate) fn undermine(&mut self, at: Coord) {
        match self.mine.kind(at) {
            BlockKind::Rock => {
                self.set_falling_rock(at);
            }
            BlockKind::Support => self.collapse_supports(at),
            _ => {}
        }
    }

    /// Advance every falling rock by one turn
    pub fn advance_falling_rocks(&mut self, cutscene: &mut dyn Cutscene) {
        let snapshot: ArrayVec<Coord, MAX_FALLING_ROCKS> = self.falling.iter().collect();
        for at in snapshot {
            if !self.falling.contains(at) {
                continue;
            }
            let cell = self.mine.get_mut(at);
            cell.health = cell.health.saturating_sub(1);
            if cell.health < ROCK_FALL_THRESHOLD {
                self.fall_rock(at, cutscene);
            }
        }
    }

    /// Drop the falling rock at `at` to its rest position
    fn fall_rock(&mut self, at: Coord, cutscene: &mut dyn Cutscene) {
        let above = at.above();
        match self.mine.kind(above) {
            BlockKind::Rock => {
                if self.set_falling_rock(above) {
                    // Chained rocks start one step further into their countdown.
                    let cell = self.mine.get_mut(above);
                    cell.health = cell.health.saturating_sub(1);
                }
            }
            BlockKind::Support => self.collapse_supports(above),
            _ => {}
        }

        let mut rest = at;
        let mut crushed = false;
        loop {
            let next = rest.below();
            if !next.in_bounds() || self.mine.get(next).solid_for_rocks() {
                break;
            }
            if self.mine.kind(next) == BlockKind::Ladder {
                self.mine.put(next, BlockKind::Air);
                self.mine.show(next);
            }
            if next == self.player.pos {
                if self.inventory.consume(Item::Support) {
                    self.place_emergency_support();
                    break;
                }
                crushed = true;
            }
            rest = next;
        }

        self.falling.remove(at);
        self.mine.put(at, BlockKind::Air);
        self.mine.show(at);
        log::debug!(
            "rock fell from ({}, {}) to ({}, {})",
            at.x,
            at.y,
            rest.x,
            rest.y
        );

        if crushed {
            let victim = self.player.pos;
            self.mine.put(victim, BlockKind::Rock);
            self.mine.show(victim);
            self.rescue(RescueCause::CrushedByRock, cutscene);
            self.mine.put(victim, BlockKind::Air);
            self.mine.show(victim);
        }

        self.mine.put(rest, BlockKind::Rock);
        self.mine.reveal(rest);
    }

    /// A support stops the rock one cell above the player
    ///
    /// Unlike `build_support` this does not require a solid cell below.
    fn place_emergency_support(&mut self) {
        self.stats.supports_placed += 1;
        self.place_structure(self.player.pos, BlockKind::Support);
    }

    /// Clear the support column starting at `at` and going up
    ///
    /// A rock resting on top of a cleared support becomes unstable.
    pub(crate) fn collapse_supports(&mut self, at: Coord) {
        let mut cur = at;
        while cur.in_bounds() && self.mine.kind(cur) == BlockKind::Support {
            self.mine.put(cur, BlockKind::Air);
            self.mine.show(cur);
            cur = cur.above();
            if cur.in_bounds() && self.mine.kind(cur) == BlockKind::Rock {
                self.set_falling_rock(cur);
            }
        }
        log::debug!("support column collapsed from ({}, {}) to row {}", at.x, at.y, cur.y + 1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rescue::NoCutscene;
    use crate::types::GameAction;

    /// Empty pocket with solid dirt walls, player parked far away
    fn pocket() -> Simulation {
        let mut sim = Simulation::new(1);
        for y in 20..40 {
            for x in 20..30 {
                sim.mine_mut().put(Coord::new(x, y), BlockKind::Air);
            }
        }
        for x in 20..30 {
            sim.mine_mut().put(Coord::new(x, 40), BlockKind::Dirt);
        }
        sim
    }

    fn wait(sim: &mut Simulation) {
        sim.apply_action(GameAction::Wait, &mut NoCutscene);
    }

    #[test]
    fn test_insert_rejects_duplicates() {
        let mut set = FallingRocks::new();
        assert!(set.insert(Coord::new(1, 1)));
        assert!(!set.insert(Coord::new(1, 1)));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_insert_respects_capacity() {
        let mut set = FallingRocks::new();
        for i in 0..MAX_FALLING_ROCKS as i32 {
            assert!(set.insert(Coord::new(i, 0)));
        }
        assert!(set.is_full());
        assert!(!set.insert(Coord::new(100, 100)));
        assert_eq!(set.len(), MAX_FALLING_ROCKS);
    }

    #[test]
    fn test_remove_preserves_order() {
        let mut set = FallingRocks::new();
        for i in 0..4 {
            set.insert(Coord::new(i, 0));
        }
        assert!(set.remove(Coord::new(1, 0)));
        assert!(!set.remove(Coord::new(1, 0)));
        assert_eq!(
            set.as_slice(),
            &[Coord::new(0, 0), Coord::new(2, 0), Coord::new(3, 0)]
        );
    }

    #[test]
    fn test_set_falling_rock_marks_cell() {
        let mut sim = pocket();
        let at = Coord::new(22, 25);
        sim.mine_mut().put(at, BlockKind::Rock);
        assert!(sim.set_falling_rock(at));
        assert_eq!(sim.mine().kind(at), BlockKind::FallingRock);
        assert!(sim.mine().get(at).visible);
        assert!(!sim.set_falling_rock(at));
        assert_eq!(sim.falling_rocks().len(), 1);
    }

    #[test]
    fn test_full_set_leaves_rock_stable() {
        let mut sim = pocket();
        for x in 20..30 {
            for y in 20..24 {
                sim.mine_mut().put(Coord::new(x, y), BlockKind::Rock);
            }
        }
        let mut added = 0;
        for x in 20..30 {
            for y in 20..24 {
                if sim.set_falling_rock(Coord::new(x, y)) {
                    added += 1;
                }
            }
        }
        assert_eq!(added, MAX_FALLING_ROCKS);
        assert_eq!(sim.mine().kind(Coord::new(29, 23)), BlockKind::Rock);
    }

    #[test]
    fn test_rock_falls_after_countdown() {
        let mut sim = pocket();
        let at = Coord::new(25, 30);
        sim.mine_mut().put(at, BlockKind::Rock);
        sim.set_falling_rock(at);

        wait(&mut sim);
        assert_eq!(sim.mine().kind(at), BlockKind::FallingRock);
        assert_eq!(sim.mine().get(at).health, -2);

        wait(&mut sim);
        assert_eq!(sim.mine().kind(at), BlockKind::Air);
        assert_eq!(sim.mine().kind(Coord::new(25, 39)), BlockKind::Rock);
        assert!(sim.falling_rocks().is_empty());
    }

    #[test]
    fn test_falling_rock_destroys_ladder() {
        let mut sim = pocket();
        let at = Coord::new(25, 30);
        let ladder = Coord::new(25, 35);
        sim.mine_mut().put(at, BlockKind::Rock);
        sim.mine_mut().put(ladder, BlockKind::Ladder);
        sim.set_falling_rock(at);

        wait(&mut sim);
        wait(&mut sim);
        assert_eq!(sim.mine().kind(ladder), BlockKind::Air);
        assert!(sim.mine().get(ladder).visible);
        assert_eq!(sim.mine().kind(Coord::new(25, 39)), BlockKind::Rock);
    }

    #[test]
    fn test_rock_lands_on_support() {
        let mut sim = pocket();
        let at = Coord::new(25, 30);
        sim.mine_mut().put(at, BlockKind::Rock);
        sim.mine_mut().put(Coord::new(25, 34), BlockKind::Support);
        sim.set_falling_rock(at);

        wait(&mut sim);
        wait(&mut sim);
        assert_eq!(sim.mine().kind(Coord::new(25, 33)), BlockKind::Rock);
        assert_eq!(sim.mine().kind(Coord::new(25, 34)), BlockKind::Support);
    }

    #[test]
    fn test_chained_rock_falls_next_turn() {
        let mut sim = pocket();
        let lower = Coord::new(25, 30);
        let upper = Coord::new(25, 29);
        sim.mine_mut().put(lower, BlockKind::Rock);
        sim.mine_mut().put(upper, BlockKind::Rock);
        sim.set_falling_rock(lower);

        wait(&mut sim);
        wait(&mut sim);
        assert_eq!(sim.mine().kind(upper), BlockKind::FallingRock);
        assert_eq!(sim.mine().get(upper).health, -2);
        assert_eq!(sim.falling_rocks().as_slice(), &[upper]);

        wait(&mut sim);
        assert_eq!(sim.mine().kind(upper), BlockKind::Air);
        assert_eq!(sim.mine().kind(Coord::new(25, 38)), BlockKind::Rock);
        assert_eq!(sim.mine().kind(Coord::new(25, 39)), BlockKind::Rock);
        assert!(sim.falling_rocks().is_empty());
    }

    #[test]
    fn test_fall_collapses_support_above() {
        let mut sim = pocket();
        let at = Coord::new(25, 30);
        sim.mine_mut().put(at, BlockKind::Rock);
        for y in 27..30 {
            sim.mine_mut().put(Coord::new(25, y), BlockKind::Support);
        }
        sim.mine_mut().put(Coord::new(25, 26), BlockKind::Rock);
        sim.set_falling_rock(at);

        wait(&mut sim);
        wait(&mut sim);
        for y in 27..30 {
            assert_eq!(sim.mine().kind(Coord::new(25, y)), BlockKind::Air);
        }
        assert_eq!(sim.mine().kind(Coord::new(25, 26)), BlockKind::FallingRock);
        assert!(sim.falling_rocks().contains(Coord::new(25, 26)));
    }

    #[test]
    fn test_collapse_supports_stops_at_non_support() {
        let mut sim = pocket();
        for y in 30..35 {
            sim.mine_mut().put(Coord::new(22, y), BlockKind::Support);
        }
        sim.mine_mut().put(Coord::new(22, 29), BlockKind::Dirt);
        sim.collapse_supports(Coord::new(22, 34));
        for y in 30..35 {
            assert_eq!(sim.mine().kind(Coord::new(22, y)), BlockKind::Air);
        }
        assert_eq!(sim.mine().kind(Coord::new(22, 29)), BlockKind::Dirt);
        assert!(sim.falling_rocks().is_empty());
    }

    #[test]
    fn test_player_saved_by_support() {
        let mut sim = pocket();
        sim.teleport(Coord::new(25, 39));
        sim.inventory_mut().supports = 2;
        let at = Coord::new(25, 30);
        sim.mine_mut().put(at, BlockKind::Rock);
        sim.set_falling_rock(at);

        wait(&mut sim);
        wait(&mut sim);
        assert_eq!(sim.player().pos, Coord::new(25, 39));
        assert_eq!(sim.mine().kind(Coord::new(25, 39)), BlockKind::Support);
        assert_eq!(sim.mine().kind(Coord::new(25, 38)), BlockKind::Rock);
        assert_eq!(sim.inventory().supports, 1);
        assert_eq!(sim.stats().supports_placed, 1);
        assert_eq!(sim.stats().times_crushed, 0);
    }

    #[test]
    fn test_emergency_support_ignores_open_floor() {
        let mut sim = pocket();
        let at = Coord::new(25, 30);
        sim.teleport(at);
        sim.inventory_mut().supports = 1;
        assert_eq!(sim.mine().kind(at.below()), BlockKind::Air);
        assert!(!sim.build_support(None));
        assert_eq!(sim.inventory().supports, 1);

        sim.place_emergency_support();
        assert_eq!(sim.mine().kind(at), BlockKind::Support);
        assert_eq!(sim.stats().supports_placed, 1);
    }

    #[test]
    fn test_player_crushed_without_support() {
        let mut sim = pocket();
        let victim = Coord::new(25, 39);
        sim.teleport(victim);
        let at = Coord::new(25, 30);
        sim.mine_mut().put(at, BlockKind::Rock);
        sim.set_falling_rock(at);

        wait(&mut sim);
        wait(&mut sim);
        assert_eq!(sim.player().pos, Coord::new(2, 1));
        assert_eq!(sim.stats().times_crushed, 1);
        assert_eq!(sim.stats().times_rescued, 1);
        assert_eq!(sim.player().money, -(39 * 4));
        // The rock ends up where the player stood.
        assert_eq!(sim.mine().kind(victim), BlockKind::Rock);
        let reports = sim.take_surface_reports();
        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].cause, Some(RescueCause::CrushedByRock));
    }
}
