//! Save module - fixed-layout binary persistence
//!
//! A save file is the whole simulation, little-endian, with no header:
//!
//! 1. 37 `i32` scalars (player position, screen position, camera, money,
//!    stamina, carried items, falling-rock count, capacities, statistics)
//! 2. pickaxe tier and bag tier, one byte each
//! 3. carried ore per kind, then mined ore per kind (6 `i32` each)
//! 4. 32 falling-rock slots as `x << 16 | y` (unused slots are 0)
//! 5. the grid, row-major, two bytes per cell: block kind with the high bit
//!    set when visible, then health as `i8`
//!
//! Loading builds a fresh [`Simulation`] and only returns it once every field
//! has been read and checked, so a failed load never leaves partial state.
//! Action mode and auto-dig are not part of the file and load as defaults.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::collapse::FallingRocks;
use crate::game_state::Simulation;
use crate::mine::{Cell, Coord, Mine, MINE_SIZE};
use crate::player::{Inventory, Player, Stats};
use crate::types::{
    ActionMode, BlockKind, MAX_BAG_TIER, MAX_FALLING_ROCKS, MAX_PICKAXE_TIER, ORE_COUNT,
};

/// Number of leading `i32` scalars
pub const SCALAR_COUNT: usize = 37;

/// Visibility flag in a cell's kind byte
const VISIBLE_BIT: u8 = 0x80;

/// Exact size of a save file in bytes
pub const SAVE_SIZE: usize =
    SCALAR_COUNT * 4 + 2 + ORE_COUNT * 4 * 2 + MAX_FALLING_ROCKS * 4 + MINE_SIZE * 2;

/// Errors that can occur while saving or loading
#[derive(Debug, Error)]
pub enum SaveError {
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("save data truncated at byte {offset} (wanted {wanted} more)")]
    Truncated { offset: usize, wanted: usize },

    #[error("invalid block byte {byte:#04x} in cell {index}")]
    InvalidBlock { index: usize, byte: u8 },

    #[error("{field} out of range: {value}")]
    OutOfRange { field: &'static str, value: i64 },

    #[error("falling rock slot {slot} is outside the mine or repeated")]
    InvalidFallingRock { slot: usize },

    #[error("falling rock slot {slot} points at {kind:?}, not a falling rock")]
    NotFallingRock { slot: usize, kind: BlockKind },

    #[error("ore total {total} does not match the per-ore counts (sum {sum})")]
    OreTotalMismatch { total: i32, sum: i64 },

    #[error("{0} unexpected bytes after the mine grid")]
    TrailingData(usize),
}

/// Serialize the whole simulation
pub fn encode(sim: &Simulation) -> Vec<u8> {
    let mut out = Vec::with_capacity(SAVE_SIZE);
    let put = |out: &mut Vec<u8>, v: i32| out.extend_from_slice(&v.to_le_bytes());

    let p = &sim.player;
    let inv = &sim.inventory;
    let st = &sim.stats;
    let scalars: [i32; SCALAR_COUNT] = [
        p.pos.x,
        p.pos.y,
        p.screen.x,
        p.screen.y,
        p.camera.x,
        p.camera.y,
        p.money,
        p.stamina,
        inv.ore_total,
        inv.supports,
        inv.ladders,
        inv.coffee,
        inv.dynamite,
        sim.falling.len() as i32,
        inv.max_ore,
        inv.max_supports,
        inv.max_ladders,
        inv.max_coffee,
        inv.max_dynamite,
        st.blocks_mined,
        st.ore_mined,
        st.money_earned,
        st.money_spent,
        st.coffee_bought,
        st.dynamite_bought,
        st.supports_bought,
        st.ladders_bought,
        st.coffee_used,
        st.dynamite_used,
        st.structures_placed,
        st.supports_placed,
        st.ladders_placed,
        st.times_rescued,
        st.money_spent_on_rescues,
        st.times_out_of_stamina,
        st.times_crushed,
        st.times_fallen,
    ];
    for v in scalars {
        put(&mut out, v);
    }

    out.push(p.pickaxe_tier);
    out.push(p.bag_tier);
    for v in inv.ore {
        put(&mut out, v);
    }
    for v in st.ore_mined_by_kind {
        put(&mut out, v);
    }

    for slot in 0..MAX_FALLING_ROCKS {
        let packed = sim.falling.as_slice().get(slot).map_or(0, |c| c.pack());
        put(&mut out, packed);
    }

    for cell in sim.mine.cells() {
        let mut kind = cell.kind.as_u8();
        if cell.visible {
            kind |= VISIBLE_BIT;
        }
        out.push(kind);
        out.push(cell.health as u8);
    }

    out
}

/// Cursor over the raw save bytes
struct Reader<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    fn take<const N: usize>(&mut self) -> Result<[u8; N], SaveError> {
        let end = self.pos + N;
        let bytes = self.buf.get(self.pos..end).ok_or_else(|| SaveError::Truncated {
            offset: self.pos,
            wanted: end - self.buf.len(),
        })?;
        self.pos = end;
        let mut out = [0u8; N];
        out.copy_from_slice(bytes);
        Ok(out)
    }

    fn i32(&mut self) -> Result<i32, SaveError> {
        Ok(i32::from_le_bytes(self.take::<4>()?))
    }

    fn u8(&mut self) -> Result<u8, SaveError> {
        Ok(self.take::<1>()?[0])
    }

    fn remaining(&self) -> usize {
        self.buf.len() - self.pos
    }
}

fn tier(value: u8, max: u8, field: &'static str) -> Result<u8, SaveError> {
    if value > max {
        return Err(SaveError::OutOfRange {
            field,
            value: value.into(),
        });
    }
    Ok(value)
}

fn in_mine(at: Coord, field: &'static str) -> Result<Coord, SaveError> {
    if !at.in_bounds() {
        return Err(SaveError::OutOfRange {
            field,
            value: (i64::from(at.x) << 32) | i64::from(at.y),
        });
    }
    Ok(at)
}

/// Deserialize a simulation
pub fn decode(bytes: &[u8]) -> Result<Simulation, SaveError> {
    let mut r = Reader::new(bytes);
    let mut s = [0i32; SCALAR_COUNT];
    for v in s.iter_mut() {
        *v = r.i32()?;
    }

    let falling_count = s[13];
    if !(0..=MAX_FALLING_ROCKS as i32).contains(&falling_count) {
        return Err(SaveError::OutOfRange {
            field: "falling rock count",
            value: falling_count.into(),
        });
    }

    let player = Player {
        pos: in_mine(Coord::new(s[0], s[1]), "player position")?,
        screen: Coord::new(s[2], s[3]),
        camera: Coord::new(s[4], s[5]),
        money: s[6],
        stamina: s[7],
        pickaxe_tier: tier(r.u8()?, MAX_PICKAXE_TIER, "pickaxe tier")?,
        bag_tier: tier(r.u8()?, MAX_BAG_TIER, "bag tier")?,
    };

    let mut ore = [0i32; ORE_COUNT];
    for v in ore.iter_mut() {
        *v = r.i32()?;
    }
    let mut ore_mined_by_kind = [0i32; ORE_COUNT];
    for v in ore_mined_by_kind.iter_mut() {
        *v = r.i32()?;
    }

    let sum: i64 = ore.iter().map(|&n| i64::from(n)).sum();
    if ore.iter().any(|&n| n < 0) || sum != i64::from(s[8]) {
        return Err(SaveError::OreTotalMismatch { total: s[8], sum });
    }
    if s[8] > s[14] {
        return Err(SaveError::OutOfRange {
            field: "ore total",
            value: s[8].into(),
        });
    }

    let inventory = Inventory {
        ore,
        ore_total: s[8],
        supports: s[9],
        ladders: s[10],
        coffee: s[11],
        dynamite: s[12],
        max_ore: s[14],
        max_supports: s[15],
        max_ladders: s[16],
        max_coffee: s[17],
        max_dynamite: s[18],
    };

    let stats = Stats {
        blocks_mined: s[19],
        ore_mined: s[20],
        ore_mined_by_kind,
        money_earned: s[21],
        money_spent: s[22],
        coffee_bought: s[23],
        dynamite_bought: s[24],
        supports_bought: s[25],
        ladders_bought: s[26],
        coffee_used: s[27],
        dynamite_used: s[28],
        structures_placed: s[29],
        supports_placed: s[30],
        ladders_placed: s[31],
        times_rescued: s[32],
        money_spent_on_rescues: s[33],
        times_out_of_stamina: s[34],
        times_crushed: s[35],
        times_fallen: s[36],
    };

    let mut falling = FallingRocks::new();
    for slot in 0..MAX_FALLING_ROCKS {
        let packed = r.i32()?;
        if (slot as i32) < falling_count {
            let at = Coord::unpack(packed);
            if !at.in_bounds() || !falling.insert(at) {
                return Err(SaveError::InvalidFallingRock { slot });
            }
        }
    }

    let mut mine = Mine::new();
    for (index, cell) in mine.cells_mut().iter_mut().enumerate() {
        let byte = r.u8()?;
        let health = r.u8()? as i8;
        let kind = BlockKind::from_u8(byte & !VISIBLE_BIT)
            .ok_or(SaveError::InvalidBlock { index, byte })?;
        *cell = Cell {
            kind,
            health,
            visible: byte & VISIBLE_BIT != 0,
        };
    }

    if r.remaining() > 0 {
        return Err(SaveError::TrailingData(r.remaining()));
    }

    for (slot, at) in falling.iter().enumerate() {
        let kind = mine.kind(at);
        if kind != BlockKind::FallingRock {
            return Err(SaveError::NotFallingRock { slot, kind });
        }
    }

    Ok(Simulation {
        mine,
        falling,
        player,
        inventory,
        stats,
        mode: ActionMode::default(),
        auto_dig: false,
        reports: Vec::new(),
    })
}

/// Write a save file, replacing any existing file atomically
pub fn save_to_path(sim: &Simulation, path: &Path) -> Result<(), SaveError> {
    let bytes = encode(sim);
    let tmp = tmp_path(path);
    {
        let mut file = fs::File::create(&tmp)?;
        file.write_all(&bytes)?;
        file.sync_all()?;
    }
    if let Err(e) = fs::rename(&tmp, path) {
        let _ = fs::remove_file(&tmp);
        return Err(e.into());
    }
    log::info!("saved {} bytes to {}", bytes.len(), path.display());
    Ok(())
}

/// Read a save file
pub fn load_from_path(path: &Path) -> Result<Simulation, SaveError> {
    let bytes = fs::read(path)?;
    let sim = decode(&bytes)?;
    log::info!("loaded save from {}", path.display());
    Ok(sim)
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}
