//! Mining module - digging and dynamite
//!
//! A dig hits the block next to the player. It needs a pickaxe of at least the
//! block's minimum tier and costs stamina whether or not the block breaks.
//! Broken ore leaves dirt behind and goes into the bag; any other broken block
//! leaves air, which can undermine a rock or a support above it.

use crate::catalog::pickaxe_damage;
use crate::game_state::Simulation;
use crate::mine::Coord;
use crate::rescue::Cutscene;
use crate::types::{BlockKind, Direction, DIG_STAMINA_COST};

impl Simulation {
    /// Cell an action in `dir` applies to; `None` means the player's own cell
    pub(crate) fn action_target(&self, dir: Option<Direction>) -> Option<Coord> {
        match dir {
            Some(dir) => self.player.pos.step(dir),
            None => Some(self.player.pos),
        }
    }

    /// Hit the block next to the player
    ///
    /// Returns `false` (and changes nothing) when the target is air, out of
    /// reach of the current pickaxe, indestructible, or an ore block while the
    /// bag is full.
    pub fn dig(&mut self, dir: Direction, cutscene: &mut dyn Cutscene) -> bool {
        let Some(at) = self.player.pos.step(dir) else {
            return false;
        };

        let cell = *self.mine.get(at);
        let data = cell.data();
        if data.ore.is_some() && self.inventory.ore_full() {
            return false;
        }
        let minable = match data.minimum_tier {
            Some(tier) => self.player.pickaxe_tier >= tier,
            None => false,
        };
        if cell.kind == BlockKind::Air || !minable || cell.health <= -1 {
            return false;
        }

        let health = cell.health.saturating_sub(pickaxe_damage(self.player.pickaxe_tier));
        self.mine.get_mut(at).health = health;

        if health <= 0 {
            self.stats.blocks_mined += 1;
            match data.ore {
                Some(ore) => {
                    self.stats.ore_mined += 1;
                    self.stats.ore_mined_by_kind[ore.index()] += 1;
                    self.inventory.credit_ore(ore);
                    self.mine.put(at, BlockKind::Dirt);
                    self.mine.show(at);
                    log::debug!("mined {} at ({}, {})", ore.name(), at.x, at.y);
                }
                None => {
                    self.mine.put(at, BlockKind::Air);
                    self.mine.reveal(at);
                    if at.y - 1 > 0 {
                        self.undermine(at.above());
                    }
                    log::debug!("cleared {:?} at ({}, {})", cell.kind, at.x, at.y);
                }
            }
        }

        self.deplete_stamina(DIG_STAMINA_COST, cutscene);
        true
    }

    /// Blow up a stable rock next to the player
    pub fn use_dynamite(&mut self, dir: Option<Direction>) -> bool {
        if self.inventory.dynamite <= 0 {
            return false;
        }
        let Some(at) = self.action_target(dir) else {
            return false;
        };
        if self.mine.kind(at) != BlockKind::Rock {
            return false;
        }

        self.inventory.dynamite -= 1;
        self.stats.dynamite_used += 1;
        self.stats.blocks_mined += 1;
        self.mine.put(at, BlockKind::Air);
        self.mine.reveal(at);
        self.undermine(at.above());
        log::debug!("dynamite cleared rock at ({}, {})", at.x, at.y);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::INDESTRUCTIBLE;
    use crate::rescue::NoCutscene;
    use crate::types::{OreKind, MAX_STAMINA};

    /// Player standing in a small chamber at (10, 10)
    fn chamber() -> Simulation {
        let mut sim = Simulation::new(1);
        for y in 8..=12 {
            for x in 8..=12 {
                sim.mine_mut().put(Coord::new(x, y), BlockKind::Dirt);
            }
        }
        sim.mine_mut().put(Coord::new(10, 10), BlockKind::Air);
        sim.teleport(Coord::new(10, 10));
        sim
    }

    #[test]
    fn test_four_hits_break_dirt() {
        let mut sim = chamber();
        let target = Coord::new(11, 10);
        let expected = [7, 4, 1];
        for health in expected {
            assert!(sim.dig(Direction::Right, &mut NoCutscene));
            assert_eq!(sim.mine().get(target).health, health);
        }
        assert!(sim.dig(Direction::Right, &mut NoCutscene));
        assert_eq!(sim.mine().kind(target), BlockKind::Air);
        assert_eq!(sim.stats().blocks_mined, 1);
        assert_eq!(sim.player().stamina, MAX_STAMINA - 4 * DIG_STAMINA_COST);
    }

    #[test]
    fn test_dig_air_is_refused() {
        let mut sim = chamber();
        sim.mine_mut().put(Coord::new(11, 10), BlockKind::Air);
        assert!(!sim.dig(Direction::Right, &mut NoCutscene));
        assert_eq!(sim.player().stamina, MAX_STAMINA);
    }

    #[test]
    fn test_tier_gating() {
        let mut sim = chamber();
        let target = Coord::new(11, 10);
        sim.mine_mut().put(target, BlockKind::Gold);
        assert!(!sim.dig(Direction::Right, &mut NoCutscene));
        assert_eq!(sim.mine().get(target).health, 90);
        assert_eq!(sim.player().stamina, MAX_STAMINA);

        sim.player_mut().pickaxe_tier = 3;
        assert!(sim.dig(Direction::Right, &mut NoCutscene));
        assert_eq!(sim.mine().get(target).health, 86);
    }

    #[test]
    fn test_indestructible_is_refused() {
        let mut sim = chamber();
        let target = Coord::new(10, 11);
        sim.mine_mut().get_mut(target).health = INDESTRUCTIBLE;
        sim.player_mut().pickaxe_tier = 6;
        assert!(!sim.dig(Direction::Down, &mut NoCutscene));
        assert_eq!(sim.mine().get(target).health, INDESTRUCTIBLE);

        sim.mine_mut().put(target, BlockKind::Rock);
        assert!(!sim.dig(Direction::Down, &mut NoCutscene));
        assert_eq!(sim.mine().kind(target), BlockKind::Rock);
    }

    #[test]
    fn test_ore_goes_to_bag_and_leaves_dirt() {
        let mut sim = chamber();
        let target = Coord::new(9, 10);
        sim.mine_mut().put(target, BlockKind::Coal);
        sim.player_mut().pickaxe_tier = 6;

        assert!(sim.dig(Direction::Left, &mut NoCutscene));
        assert_eq!(sim.mine().kind(target), BlockKind::Dirt);
        assert_eq!(sim.mine().get(target).health, 10);
        assert!(sim.mine().get(target).visible);
        assert_eq!(sim.inventory().ore_count(OreKind::Coal), 1);
        assert_eq!(sim.inventory().ore_total, 1);
        assert_eq!(sim.stats().ore_mined(OreKind::Coal), 1);
    }

    #[test]
    fn test_full_bag_refuses_ore() {
        let mut sim = chamber();
        let target = Coord::new(9, 10);
        sim.mine_mut().put(target, BlockKind::Iron);
        sim.inventory_mut().max_ore = 1;
        sim.inventory_mut().credit_ore(OreKind::Coal);

        assert!(!sim.dig(Direction::Left, &mut NoCutscene));
        assert_eq!(sim.mine().get(target).health, 30);
        assert_eq!(sim.player().stamina, MAX_STAMINA);

        // Plain dirt is still diggable with a full bag.
        assert!(sim.dig(Direction::Right, &mut NoCutscene));
    }

    #[test]
    fn test_clearing_undermines_rock() {
        let mut sim = chamber();
        let rock = Coord::new(11, 9);
        sim.mine_mut().put(rock, BlockKind::Rock);
        sim.player_mut().pickaxe_tier = 6;

        assert!(sim.dig(Direction::Right, &mut NoCutscene));
        assert_eq!(sim.mine().kind(Coord::new(11, 10)), BlockKind::Air);
        assert_eq!(sim.mine().kind(rock), BlockKind::FallingRock);
        assert!(sim.falling_rocks().contains(rock));
    }

    #[test]
    fn test_clearing_collapses_support() {
        let mut sim = chamber();
        sim.mine_mut().put(Coord::new(11, 9), BlockKind::Support);
        sim.mine_mut().put(Coord::new(11, 8), BlockKind::Support);
        sim.mine_mut().put(Coord::new(11, 7), BlockKind::Rock);
        sim.player_mut().pickaxe_tier = 6;

        assert!(sim.dig(Direction::Right, &mut NoCutscene));
        assert_eq!(sim.mine().kind(Coord::new(11, 9)), BlockKind::Air);
        assert_eq!(sim.mine().kind(Coord::new(11, 8)), BlockKind::Air);
        assert_eq!(sim.mine().kind(Coord::new(11, 7)), BlockKind::FallingRock);
    }

    #[test]
    fn test_dynamite_clears_rock() {
        let mut sim = chamber();
        let rock = Coord::new(11, 10);
        sim.mine_mut().put(rock, BlockKind::Rock);
        sim.mine_mut().put(Coord::new(11, 9), BlockKind::Rock);

        assert!(!sim.use_dynamite(Some(Direction::Right)));
        sim.inventory_mut().dynamite = 1;
        assert!(!sim.use_dynamite(Some(Direction::Left)));
        assert!(sim.use_dynamite(Some(Direction::Right)));

        assert_eq!(sim.mine().kind(rock), BlockKind::Air);
        assert_eq!(sim.mine().kind(Coord::new(11, 9)), BlockKind::FallingRock);
        assert_eq!(sim.inventory().dynamite, 0);
        assert_eq!(sim.stats().dynamite_used, 1);
        assert_eq!(sim.stats().blocks_mined, 1);
    }

    #[test]
    fn test_dynamite_ignores_falling_rock() {
        let mut sim = chamber();
        let rock = Coord::new(11, 10);
        sim.mine_mut().put(rock, BlockKind::Rock);
        sim.set_falling_rock(rock);
        sim.inventory_mut().dynamite = 1;
        assert!(!sim.use_dynamite(Some(Direction::Right)));
        assert_eq!(sim.inventory().dynamite, 1);
    }
}
