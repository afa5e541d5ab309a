//! World generator - one-shot, depth-stratified population of the mine
//!
//! Rows are filled top to bottom. Border cells become indestructible dirt.
//! Every interior cell is dirt with probability 1/2; otherwise it runs a
//! cascade of independent 1-in-N trials, rarest ore first, where an ore only
//! counts once its depth threshold has been crossed. Crossing a deep ore
//! threshold also makes rock more likely. The 10x10 corner around the spawn
//! never receives rock.
//!
//! Generation consumes the RNG in a fixed order, so the mine is a pure
//! function of the seed.

use crate::catalog::INDESTRUCTIBLE;
use crate::mine::{Coord, Mine};
use crate::rng::XorShift32;
use crate::types::{BlockKind, EXIT_SHAFT_X, EXIT_SHAFT_Y, MINE_HEIGHT, MINE_WIDTH};

/// Base 1-in-N rock chance near the surface
const ROCK_CHANCE: u32 = 20;

/// How much the rock chance tightens per crossed deep-ore tier
const ROCK_CHANCE_STEP: u32 = 4;

/// Side of the square around the spawn kept free of rock
const SAFE_CORNER: i32 = 10;

/// Spawn rule for one ore
struct OreSpawn {
    block: BlockKind,
    /// 1-in-N chance once unlocked
    chance: u32,
    /// First row where the ore may appear
    threshold: i32,
    /// Whether crossing the threshold tightens the rock chance
    deep_tier: bool,
}

/// Ore rules in the order they are tried
const ORE_SPAWNS: [OreSpawn; 6] = [
    OreSpawn { block: BlockKind::Platinum, chance: 200, threshold: 384, deep_tier: true },
    OreSpawn { block: BlockKind::Gold, chance: 100, threshold: 160, deep_tier: true },
    OreSpawn { block: BlockKind::Silver, chance: 50, threshold: 160, deep_tier: true },
    OreSpawn { block: BlockKind::Copper, chance: 30, threshold: 60, deep_tier: true },
    OreSpawn { block: BlockKind::Iron, chance: 20, threshold: 1, deep_tier: false },
    OreSpawn { block: BlockKind::Coal, chance: 10, threshold: 1, deep_tier: false },
];

/// Generate a fresh mine from `seed`, including the spawn area
pub fn generate_mine(seed: u32) -> Mine {
    let mut rng = XorShift32::new(seed);
    let mut mine = generate(&mut rng);
    prepare_spawn(&mut mine);
    mine
}

/// Fill every cell of a new mine from the random stream
pub fn generate(rng: &mut XorShift32) -> Mine {
    let mut mine = Mine::new();
    let mut deep_tiers: u32 = 0;

    for y in 0..MINE_HEIGHT {
        deep_tiers += ORE_SPAWNS
            .iter()
            .filter(|spawn| spawn.deep_tier && spawn.threshold == y)
            .count() as u32;
        let rock_chance = ROCK_CHANCE - ROCK_CHANCE_STEP * deep_tiers;

        for x in 0..MINE_WIDTH {
            let at = Coord::new(x, y);
            if is_border(at) {
                mine.put(at, BlockKind::Dirt).health = INDESTRUCTIBLE;
                continue;
            }
            let kind = pick_block(rng, at, rock_chance);
            mine.put(at, kind);
        }
    }

    mine
}

fn is_border(at: Coord) -> bool {
    at.x == 0 || at.y == 0 || at.x == MINE_WIDTH - 1 || at.y == MINE_HEIGHT - 1
}

fn pick_block(rng: &mut XorShift32, at: Coord, rock_chance: u32) -> BlockKind {
    if rng.one_in(2) {
        return BlockKind::Dirt;
    }

    // The rock trial is drawn before the ore cascade even when an ore wins.
    let rock = rng.one_in(rock_chance);

    for spawn in &ORE_SPAWNS {
        // Draw first: a locked ore still consumes its trial.
        if rng.one_in(spawn.chance) && at.y >= spawn.threshold {
            return spawn.block;
        }
    }

    if rock && !(at.x < SAFE_CORNER && at.y < SAFE_CORNER) {
        BlockKind::Rock
    } else {
        BlockKind::Dirt
    }
}

/// Carve the exit shaft and the starting pocket, and reveal them
pub fn prepare_spawn(mine: &mut Mine) {
    mine.put(Coord::new(EXIT_SHAFT_X, EXIT_SHAFT_Y), BlockKind::ExitShaft);
    mine.put(Coord::new(1, 2), BlockKind::Dirt).health = INDESTRUCTIBLE;
    mine.put(Coord::new(2, 2), BlockKind::Dirt).health = INDESTRUCTIBLE;
    mine.put(Coord::new(2, 1), BlockKind::Air);
    mine.put(Coord::new(3, 1), BlockKind::Air);
    mine.show(Coord::new(0, 0));
    for x in 1..4 {
        mine.reveal(Coord::new(x, 1));
    }
}
