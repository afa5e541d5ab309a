//! Turn-level rules exercised through the public facade

use std::collections::HashSet;

use tui_miner::core::catalog::INDESTRUCTIBLE;
use tui_miner::core::{Coord, Cutscene, NoCutscene, Simulation, XorShift32};
use tui_miner::types::{
    ActionMode, BlockKind, Direction, GameAction, OreKind, RescueCause, MAX_FALLING_ROCKS,
    MAX_STAMINA,
};

/// Solid dirt block around the player, who stands in a single air cell
fn chamber(player: Coord) -> Simulation {
    let mut sim = Simulation::new(1);
    for y in 5..=40 {
        for x in 5..=40 {
            sim.mine_mut().put(Coord::new(x, y), BlockKind::Dirt);
        }
    }
    sim.mine_mut().put(player, BlockKind::Air);
    sim.teleport(player);
    sim
}

fn set(sim: &mut Simulation, x: i32, y: i32, kind: BlockKind) {
    sim.mine_mut().put(Coord::new(x, y), kind);
}

fn act(sim: &mut Simulation, action: GameAction) -> bool {
    sim.apply_action(action, &mut NoCutscene)
}

fn dig(sim: &mut Simulation, dir: Direction, times: usize) {
    for _ in 0..times {
        assert!(act(sim, GameAction::Act(Some(dir))));
    }
}

#[derive(Default)]
struct Recorder(Vec<RescueCause>);

impl Cutscene for Recorder {
    fn rescue(&mut self, _sim: &Simulation, cause: RescueCause) {
        self.0.push(cause);
    }
}

#[test]
fn test_dirt_breaks_on_fourth_hit() {
    let mut sim = chamber(Coord::new(10, 10));
    let target = Coord::new(11, 10);

    for expected in [7, 4, 1] {
        dig(&mut sim, Direction::Right, 1);
        assert_eq!(sim.mine().get(target).health, expected);
        assert_eq!(sim.mine().kind(target), BlockKind::Dirt);
    }
    dig(&mut sim, Direction::Right, 1);
    assert_eq!(sim.mine().kind(target), BlockKind::Air);
    assert_eq!(sim.stats().blocks_mined, 1);
    assert_eq!(sim.player().stamina, MAX_STAMINA - 20);

    // Air cannot be dug and costs nothing.
    assert!(!act(&mut sim, GameAction::Act(Some(Direction::Right))));
    assert_eq!(sim.player().stamina, MAX_STAMINA - 20);
}

#[test]
fn test_pickaxe_tier_gates_ore() {
    let mut sim = chamber(Coord::new(10, 10));
    set(&mut sim, 11, 10, BlockKind::Copper);

    assert!(!act(&mut sim, GameAction::Act(Some(Direction::Right))));
    assert_eq!(sim.player().stamina, MAX_STAMINA);

    sim.player_mut().pickaxe_tier = 1;
    dig(&mut sim, Direction::Right, 13);
    assert_eq!(sim.mine().kind(Coord::new(11, 10)), BlockKind::Dirt);
    assert_eq!(sim.inventory().ore_count(OreKind::Copper), 1);
    assert_eq!(sim.stats().ore_mined_by_kind[OreKind::Copper.index()], 1);
}

#[test]
fn test_indestructible_blocks_refuse_digging() {
    let mut sim = chamber(Coord::new(10, 10));
    set(&mut sim, 11, 10, BlockKind::Rock);
    assert!(!act(&mut sim, GameAction::Act(Some(Direction::Right))));

    // The mine border.
    let mut sim = chamber(Coord::new(10, 10));
    set(&mut sim, 1, 10, BlockKind::Air);
    set(&mut sim, 1, 11, BlockKind::Dirt);
    sim.teleport(Coord::new(1, 10));
    assert!(!act(&mut sim, GameAction::Act(Some(Direction::Left))));
    assert_eq!(sim.mine().get(Coord::new(0, 10)).health, INDESTRUCTIBLE);
}

#[test]
fn test_dig_without_direction_is_refused() {
    let mut sim = chamber(Coord::new(10, 10));
    assert!(!act(&mut sim, GameAction::Act(None)));
    assert_eq!(sim.player().stamina, MAX_STAMINA);
}

#[test]
fn test_inventory_total_tracks_ore_and_cap() {
    let mut sim = chamber(Coord::new(10, 10));
    sim.player_mut().pickaxe_tier = 6;
    let mut rng = XorShift32::new(4242);
    let target = Coord::new(11, 10);

    for _ in 0..40 {
        let ore = OreKind::ALL[(rng.next_u32() % OreKind::ALL.len() as u32) as usize];
        set(&mut sim, 11, 10, ore.block());
        sim.player_mut().stamina = MAX_STAMINA;

        while sim.mine().kind(target) == ore.block() {
            if !act(&mut sim, GameAction::Act(Some(Direction::Right))) {
                break;
            }
        }

        let inv = sim.inventory();
        let sum: i32 = OreKind::ALL.iter().map(|&o| inv.ore_count(o)).sum();
        assert_eq!(inv.ore_total, sum);
        assert!(inv.ore_total <= inv.max_ore);
    }

    // The bag filled up, so ore is refused but dirt is still fine.
    assert_eq!(sim.inventory().ore_total, sim.inventory().max_ore);
    set(&mut sim, 11, 10, BlockKind::Coal);
    assert!(!act(&mut sim, GameAction::Act(Some(Direction::Right))));
    set(&mut sim, 11, 10, BlockKind::Dirt);
    assert!(act(&mut sim, GameAction::Act(Some(Direction::Right))));
}

#[test]
fn test_undermined_rock_falls_on_second_turn() {
    let mut sim = chamber(Coord::new(10, 10));
    set(&mut sim, 11, 9, BlockKind::Rock);

    dig(&mut sim, Direction::Right, 4);
    assert_eq!(sim.mine().kind(Coord::new(11, 9)), BlockKind::FallingRock);
    assert!(sim.falling_rocks().contains(Coord::new(11, 9)));

    assert!(act(&mut sim, GameAction::Wait));
    assert_eq!(sim.mine().kind(Coord::new(11, 9)), BlockKind::Air);
    assert_eq!(sim.mine().kind(Coord::new(11, 10)), BlockKind::Rock);
    assert!(sim.falling_rocks().is_empty());
}

#[test]
fn test_falling_rock_destroys_ladder() {
    let mut sim = chamber(Coord::new(21, 21));
    set(&mut sim, 20, 20, BlockKind::Rock);
    set(&mut sim, 20, 22, BlockKind::Air);
    set(&mut sim, 20, 23, BlockKind::Air);
    set(&mut sim, 20, 24, BlockKind::Ladder);
    set(&mut sim, 20, 25, BlockKind::Air);

    dig(&mut sim, Direction::Left, 4);
    act(&mut sim, GameAction::Wait);

    assert_eq!(sim.mine().kind(Coord::new(20, 20)), BlockKind::Air);
    assert_eq!(sim.mine().kind(Coord::new(20, 24)), BlockKind::Air);
    assert_eq!(sim.mine().kind(Coord::new(20, 25)), BlockKind::Rock);
    assert!(sim.mine().get(Coord::new(20, 24)).visible);
}

#[test]
fn test_support_column_collapses_and_releases_rock() {
    let mut sim = chamber(Coord::new(21, 23));
    set(&mut sim, 20, 20, BlockKind::Rock);
    set(&mut sim, 20, 21, BlockKind::Support);
    set(&mut sim, 20, 22, BlockKind::Support);

    dig(&mut sim, Direction::Left, 4);
    assert_eq!(sim.mine().kind(Coord::new(20, 21)), BlockKind::Air);
    assert_eq!(sim.mine().kind(Coord::new(20, 22)), BlockKind::Air);
    assert_eq!(sim.mine().kind(Coord::new(20, 20)), BlockKind::FallingRock);

    act(&mut sim, GameAction::Wait);
    assert_eq!(sim.mine().kind(Coord::new(20, 23)), BlockKind::Rock);
    assert_eq!(sim.mine().kind(Coord::new(20, 20)), BlockKind::Air);
}

#[test]
fn test_falling_rock_crushes_player() {
    let mut sim = chamber(Coord::new(20, 22));
    set(&mut sim, 20, 20, BlockKind::Rock);

    dig(&mut sim, Direction::Up, 4);
    let mut recorder = Recorder::default();
    sim.apply_action(GameAction::Wait, &mut recorder);

    assert_eq!(recorder.0, vec![RescueCause::CrushedByRock]);
    assert_eq!(sim.player().pos, Coord::new(2, 1));
    assert_eq!(sim.player().money, -88);
    assert_eq!(sim.stats().times_crushed, 1);
    assert_eq!(sim.mine().kind(Coord::new(20, 22)), BlockKind::Rock);

    let reports = sim.take_surface_reports();
    assert_eq!(reports.len(), 1);
    assert_eq!(reports[0].cause, Some(RescueCause::CrushedByRock));
    assert_eq!(reports[0].rescue_cost, 88);
}

#[test]
fn test_carried_support_saves_player() {
    let mut sim = chamber(Coord::new(20, 22));
    sim.inventory_mut().supports = 1;
    set(&mut sim, 20, 20, BlockKind::Rock);

    dig(&mut sim, Direction::Up, 4);
    act(&mut sim, GameAction::Wait);

    assert_eq!(sim.player().pos, Coord::new(20, 22));
    assert!(!sim.has_surface_reports());
    assert_eq!(sim.mine().kind(Coord::new(20, 22)), BlockKind::Support);
    assert_eq!(sim.mine().kind(Coord::new(20, 21)), BlockKind::Rock);
    assert_eq!(sim.inventory().supports, 0);
    assert_eq!(sim.stats().supports_placed, 1);
}

#[test]
fn test_long_fall_is_one_rescue() {
    let mut sim = chamber(Coord::new(21, 15));
    for y in 15..=22 {
        set(&mut sim, 20, y, BlockKind::Air);
    }

    let mut recorder = Recorder::default();
    assert!(sim.apply_action(GameAction::Move(Direction::Left), &mut recorder));

    assert_eq!(recorder.0, vec![RescueCause::Fall]);
    let reports = sim.take_surface_reports();
    assert_eq!(reports.len(), 1);
    assert_eq!(reports[0].rescue_cost, 22 * 4);
    assert_eq!(sim.stats().times_fallen, 1);
    assert_eq!(sim.player().pos, Coord::new(2, 1));
}

#[test]
fn test_six_cell_fall_is_survivable() {
    let mut sim = chamber(Coord::new(21, 15));
    for y in 15..=21 {
        set(&mut sim, 20, y, BlockKind::Air);
    }

    assert!(act(&mut sim, GameAction::Move(Direction::Left)));
    assert_eq!(sim.player().pos, Coord::new(20, 21));
    assert!(!sim.has_surface_reports());
}

#[test]
fn test_exhaustion_rescue_sells_ore() {
    let mut sim = chamber(Coord::new(10, 10));
    for _ in 0..3 {
        sim.inventory_mut().credit_ore(OreKind::Coal);
    }
    sim.player_mut().stamina = 5;

    dig(&mut sim, Direction::Right, 1);

    let reports = sim.take_surface_reports();
    assert_eq!(reports.len(), 1);
    assert_eq!(reports[0].cause, Some(RescueCause::OutOfStamina));
    assert_eq!(reports[0].rescue_cost, 40);
    assert_eq!(reports[0].ore_sold, 96);
    assert_eq!(sim.player().money, 56);
    assert_eq!(sim.player().stamina, MAX_STAMINA);
    assert_eq!(sim.inventory().ore_total, 0);
    assert_eq!(sim.stats().money_earned, 96);
    assert_eq!(sim.stats().money_spent_on_rescues, 40);
}

#[test]
fn test_coffee_prevents_exhaustion() {
    let mut sim = chamber(Coord::new(10, 10));
    sim.inventory_mut().coffee = 1;
    sim.player_mut().stamina = 5;

    dig(&mut sim, Direction::Right, 1);

    assert!(!sim.has_surface_reports());
    assert_eq!(sim.player().stamina, MAX_STAMINA);
    assert_eq!(sim.inventory().coffee, 0);
    assert_eq!(sim.stats().coffee_used, 1);
}

#[test]
fn test_dynamite_clears_stable_rock_only() {
    let mut sim = chamber(Coord::new(10, 10));
    sim.inventory_mut().dynamite = 2;
    set(&mut sim, 11, 10, BlockKind::Rock);
    set(&mut sim, 9, 10, BlockKind::Dirt);

    act(&mut sim, GameAction::SelectMode(ActionMode::UseDynamite));
    assert_eq!(sim.mode(), ActionMode::UseDynamite);
    assert!(!act(&mut sim, GameAction::Act(Some(Direction::Left))));
    assert!(act(&mut sim, GameAction::Act(Some(Direction::Right))));

    assert_eq!(sim.mine().kind(Coord::new(11, 10)), BlockKind::Air);
    assert_eq!(sim.inventory().dynamite, 1);
    assert_eq!(sim.stats().dynamite_used, 1);
    assert_eq!(sim.stats().blocks_mined, 1);
}

#[test]
fn test_ladder_on_own_cell() {
    let mut sim = chamber(Coord::new(10, 10));
    sim.inventory_mut().ladders = 1;
    act(&mut sim, GameAction::SelectMode(ActionMode::PlaceLadder));

    assert!(act(&mut sim, GameAction::Act(None)));
    assert_eq!(sim.mine().kind(Coord::new(10, 10)), BlockKind::Ladder);
    assert_eq!(sim.inventory().ladders, 0);
    assert_eq!(sim.stats().ladders_placed, 1);
    assert_eq!(sim.stats().structures_placed, 1);

    // Nothing left to place.
    set(&mut sim, 11, 10, BlockKind::Air);
    assert!(!act(&mut sim, GameAction::Act(Some(Direction::Right))));
}

#[test]
fn test_exit_shaft_return_is_free() {
    let mut sim = Simulation::new(1);
    sim.inventory_mut().credit_ore(OreKind::Iron);
    act(&mut sim, GameAction::Move(Direction::Left));

    let reports = sim.take_surface_reports();
    assert_eq!(reports.len(), 1);
    assert_eq!(reports[0].cause, None);
    assert_eq!(reports[0].rescue_cost, 0);
    assert_eq!(reports[0].ore_sold, 64);
    assert_eq!(sim.player().money, 64);
    assert_eq!(sim.stats().times_rescued, 0);
}

fn assert_falling_set_consistent(sim: &Simulation) {
    let rocks = sim.falling_rocks();
    assert!(rocks.len() <= MAX_FALLING_ROCKS);
    let unique: HashSet<Coord> = rocks.iter().collect();
    assert_eq!(unique.len(), rocks.len());
    for at in rocks.iter() {
        assert_eq!(sim.mine().kind(at), BlockKind::FallingRock, "{at:?}");
    }
}

#[test]
fn test_falling_set_stays_bounded_and_consistent() {
    let mut sim = chamber(Coord::new(6, 22));
    for x in 6..=38 {
        set(&mut sim, x, 19, BlockKind::Rock);
        set(&mut sim, x, 20, BlockKind::Rock);
    }

    for x in 6..=38 {
        let at = Coord::new(x, 22);
        set(&mut sim, x, 22, BlockKind::Air);
        sim.teleport(at);
        sim.player_mut().stamina = MAX_STAMINA;
        for _ in 0..4 {
            act(&mut sim, GameAction::Act(Some(Direction::Up)));
            assert_falling_set_consistent(&sim);
        }
    }

    for _ in 0..100 {
        if sim.falling_rocks().is_empty() {
            break;
        }
        act(&mut sim, GameAction::Wait);
        assert_falling_set_consistent(&sim);
    }
    assert!(sim.falling_rocks().is_empty());
}
