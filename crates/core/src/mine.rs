//! Mine module - the block grid
//!
//! The mine is a fixed 512x512 grid of cells stored as one flat, row-major
//! boxed slice. Coordinates are `(x, y)` with x growing right and y growing
//! down; row 0 is the surface border.
//!
//! The grid is the sole owner of terrain state. Rendering only reads it
//! through [`Mine::glyph`], which hides cells that were never revealed.

use crate::catalog::{block_data, BlockData};
use crate::types::{BlockKind, Direction, MINE_HEIGHT, MINE_WIDTH};

/// Total number of cells in the mine
pub const MINE_SIZE: usize = (MINE_WIDTH as usize) * (MINE_HEIGHT as usize);

/// A grid position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Coord {
    pub x: i32,
    pub y: i32,
}

impl Coord {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Whether the coordinate lies inside the mine
    pub fn in_bounds(self) -> bool {
        self.x >= 0 && self.x < MINE_WIDTH && self.y >= 0 && self.y < MINE_HEIGHT
    }

    /// The coordinate one step away, or `None` if it would leave the mine
    pub fn step(self, dir: Direction) -> Option<Coord> {
        let (dx, dy) = dir.delta();
        let next = Coord::new(self.x + dx, self.y + dy);
        next.in_bounds().then_some(next)
    }

    pub fn above(self) -> Coord {
        Coord::new(self.x, self.y - 1)
    }

    pub fn below(self) -> Coord {
        Coord::new(self.x, self.y + 1)
    }

    /// Pack into the single-integer form used by save files (`x << 16 | y`)
    pub fn pack(self) -> i32 {
        (self.x << 16) | (self.y & 0xFFFF)
    }

    pub fn unpack(packed: i32) -> Coord {
        Coord::new((packed >> 16) & 0xFFFF, packed & 0xFFFF)
    }
}

/// One grid cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Cell {
    pub kind: BlockKind,
    /// Remaining health; negative for indestructible kinds, and the fall
    /// countdown for falling rocks
    pub health: i8,
    /// Fog-of-war flag; once set it is never cleared
    pub visible: bool,
}

impl Cell {
    pub fn data(&self) -> &'static BlockData {
        block_data(self.kind)
    }

    pub fn is(&self, kind: BlockKind) -> bool {
        self.kind == kind
    }

    pub fn solid_for_player(&self) -> bool {
        self.data().solid_for_player
    }

    pub fn solid_for_rocks(&self) -> bool {
        self.data().solid_for_rocks
    }
}

/// The mine grid
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mine {
    /// Flat array of cells, row-major order (y * WIDTH + x)
    cells: Box<[Cell]>,
}

impl Mine {
    /// Create a mine filled with hidden air
    pub fn new() -> Self {
        Self {
            cells: vec![Cell::default(); MINE_SIZE].into_boxed_slice(),
        }
    }

    /// Flat index of an in-bounds coordinate
    #[inline(always)]
    fn index(at: Coord) -> usize {
        debug_assert!(at.in_bounds(), "coordinate outside the mine: {at:?}");
        (at.y as usize) * (MINE_WIDTH as usize) + (at.x as usize)
    }

    pub fn width(&self) -> i32 {
        MINE_WIDTH
    }

    pub fn height(&self) -> i32 {
        MINE_HEIGHT
    }

    /// Cell at an in-bounds coordinate
    pub fn get(&self, at: Coord) -> &Cell {
        &self.cells[Self::index(at)]
    }

    pub fn get_mut(&mut self, at: Coord) -> &mut Cell {
        &mut self.cells[Self::index(at)]
    }

    pub fn kind(&self, at: Coord) -> BlockKind {
        self.get(at).kind
    }

    /// Reset a cell to the defaults of `kind`
    ///
    /// Health is reset from the catalog. Visibility is kept.
    pub fn put(&mut self, at: Coord, kind: BlockKind) -> &mut Cell {
        let cell = self.get_mut(at);
        cell.kind = kind;
        cell.health = block_data(kind).health;
        cell
    }

    /// Mark a single cell visible
    pub fn show(&mut self, at: Coord) {
        self.get_mut(at).visible = true;
    }

    /// Mark the 3x3 neighborhood around `at` visible
    ///
    /// Neighbors outside the mine are skipped.
    pub fn reveal(&mut self, at: Coord) {
        for dy in -1..=1 {
            for dx in -1..=1 {
                let n = Coord::new(at.x + dx, at.y + dy);
                if n.in_bounds() {
                    self.show(n);
                }
            }
        }
    }

    /// Symbol and color of a cell for rendering, `None` while hidden or
    /// outside the mine
    pub fn glyph(&self, at: Coord) -> Option<(char, u8)> {
        if !at.in_bounds() {
            return None;
        }
        let cell = self.get(at);
        if !cell.visible {
            return None;
        }
        let data = cell.data();
        Some((data.symbol, data.color))
    }

    /// Get a reference to the internal cells array (row-major)
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn cells_mut(&mut self) -> &mut [Cell] {
        &mut self.cells
    }
}

impl Default for Mine {
    fn default() -> Self {
        Self::new()
    }
}
