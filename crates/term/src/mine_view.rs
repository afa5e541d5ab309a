//! MineView: maps the simulation into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::catalog::{PLAYER_COLOR, PLAYER_SYMBOL};
use crate::core::{Coord, Simulation};
use crate::fb::{Cell, CellStyle, FrameBuffer};
use crate::types::{
    ActionMode, OreKind, CAMERA_HEIGHT, CAMERA_WIDTH, MAX_BAG_TIER, MAX_PICKAXE_TIER, MAX_STAMINA,
};

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

/// Columns between the mine frame and the status panel.
const PANEL_GAP: u16 = 2;

const BORDER: CellStyle = CellStyle::fg(250);
const LABEL: CellStyle = CellStyle::fg(252).bold();
const VALUE: CellStyle = CellStyle::fg(252);
const MUTED: CellStyle = CellStyle::fg(244).dim();

/// Action-mode rows of the status panel: key, label, mode.
const MODE_ROWS: [(char, &str, ActionMode); 4] = [
    ('c', "Dig", ActionMode::Dig),
    ('x', "Place support", ActionMode::PlaceSupport),
    ('z', "Place ladder", ActionMode::PlaceLadder),
    ('v', "Use dynamite", ActionMode::UseDynamite),
];

/// Terminal view of the camera window plus the status panel.
pub struct MineView {
    /// Mine cell width in terminal columns.
    cell_w: u16,
}

impl Default for MineView {
    fn default() -> Self {
        Self { cell_w: 1 }
    }
}

impl MineView {
    pub fn new(cell_w: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
        }
    }

    /// Outer size of the bordered camera window.
    pub fn frame_size(&self) -> (u16, u16) {
        (
            CAMERA_WIDTH as u16 * self.cell_w + 2,
            CAMERA_HEIGHT as u16 + 2,
        )
    }

    /// Render the simulation into an existing framebuffer.
    ///
    /// Callers can reuse a framebuffer across frames and only resize when the
    /// terminal size changes.
    pub fn render_into(&self, sim: &Simulation, viewport: Viewport, fb: &mut FrameBuffer) {
        self.render_into_with_player(sim, true, viewport, fb);
    }

    /// Render with the player glyph shown or hidden (used by the rescue blink).
    pub fn render_into_with_player(
        &self,
        sim: &Simulation,
        show_player: bool,
        viewport: Viewport,
        fb: &mut FrameBuffer,
    ) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(Cell::default());

        // The camera window is pinned to the top-left corner.
        let (frame_w, frame_h) = self.frame_size();
        let (start_x, start_y) = (0, 0);

        draw_border(fb, start_x, start_y, frame_w, frame_h, BORDER);

        let camera = sim.player().camera;
        for sy in 0..CAMERA_HEIGHT {
            for sx in 0..CAMERA_WIDTH {
                let at = Coord::new(camera.x + sx, camera.y + sy);
                if let Some((ch, color)) = sim.mine().glyph(at) {
                    self.draw_mine_cell(fb, start_x, start_y, sx, sy, ch, CellStyle::fg(color));
                }
            }
        }

        if show_player {
            let screen = sim.player().screen;
            if (0..CAMERA_WIDTH).contains(&screen.x) && (0..CAMERA_HEIGHT).contains(&screen.y) {
                let style = CellStyle::fg(PLAYER_COLOR).bold();
                self.draw_mine_cell(fb, start_x, start_y, screen.x, screen.y, PLAYER_SYMBOL, style);
            }
        }

        let panel_x = start_x + frame_w + PANEL_GAP;
        draw_status_panel(fb, sim, viewport, panel_x, start_y);
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, sim: &Simulation, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(sim, viewport, &mut fb);
        fb
    }

    #[allow(clippy::too_many_arguments)]
    fn draw_mine_cell(
        &self,
        fb: &mut FrameBuffer,
        start_x: u16,
        start_y: u16,
        sx: i32,
        sy: i32,
        ch: char,
        style: CellStyle,
    ) {
        let px = start_x + 1 + sx as u16 * self.cell_w;
        let py = start_y + 1 + sy as u16;
        fb.fill_rect(px, py, self.cell_w, 1, ch, style);
    }
}

fn draw_border(fb: &mut FrameBuffer, x: u16, y: u16, w: u16, h: u16, style: CellStyle) {
    if w < 2 || h < 2 {
        return;
    }

    fb.put_char(x, y, '┌', style);
    fb.put_char(x + w - 1, y, '┐', style);
    fb.put_char(x, y + h - 1, '└', style);
    fb.put_char(x + w - 1, y + h - 1, '┘', style);

    for dx in 1..w - 1 {
        fb.put_char(x + dx, y, '─', style);
        fb.put_char(x + dx, y + h - 1, '─', style);
    }
    for dy in 1..h - 1 {
        fb.put_char(x, y + dy, '│', style);
        fb.put_char(x + w - 1, y + dy, '│', style);
    }
}

/// `label` followed by `a/b`.
fn put_ratio(fb: &mut FrameBuffer, x: u16, y: u16, label: &str, a: i32, b: i32) {
    let cx = fb.put_str(x, y, label, VALUE);
    let cx = fb.put_i32(cx, y, a, VALUE);
    let cx = fb.put_str(cx, y, "/", MUTED);
    fb.put_i32(cx, y, b, VALUE);
}

fn draw_status_panel(fb: &mut FrameBuffer, sim: &Simulation, viewport: Viewport, x: u16, top: u16) {
    if x >= viewport.width {
        return;
    }

    let player = sim.player();
    let inv = sim.inventory();
    let mut y = top;

    let cx = fb.put_str(x, y, "Money: $", LABEL);
    fb.put_i32(cx, y, player.money, VALUE);
    y += 2;
    put_ratio(fb, x, y, "Stamina: ", player.stamina, MAX_STAMINA);
    y += 2;
    put_ratio(
        fb,
        x,
        y,
        "Pickaxe tier: ",
        player.pickaxe_tier as i32,
        MAX_PICKAXE_TIER as i32,
    );
    y += 1;
    put_ratio(fb, x, y, "Bag tier: ", player.bag_tier as i32, MAX_BAG_TIER as i32);
    y += 2;

    fb.put_str(x, y, "Inventory:", LABEL);
    y += 1;
    put_ratio(fb, x, y, "Total ore: ", inv.ore_total, inv.max_ore);
    y += 1;
    for ore in OreKind::ALL {
        let cx = fb.put_str(x + 2, y, ore.name(), MUTED);
        let cx = fb.put_str(cx, y, ": ", MUTED);
        fb.put_i32(cx, y, inv.ore_count(ore), VALUE);
        y += 1;
    }
    put_ratio(fb, x, y, "Supports: ", inv.supports, inv.max_supports);
    y += 1;
    put_ratio(fb, x, y, "Ladders: ", inv.ladders, inv.max_ladders);
    y += 1;
    put_ratio(fb, x, y, "Coffee: ", inv.coffee, inv.max_coffee);
    y += 1;
    put_ratio(fb, x, y, "Dynamite: ", inv.dynamite, inv.max_dynamite);
    y += 2;

    let cx = fb.put_str(x, y, "Depth: ", LABEL);
    fb.put_i32(cx, y, player.pos.y, VALUE);
    y += 2;

    fb.put_str(x, y, "Actions:", LABEL);
    y += 1;
    for (key, label, mode) in MODE_ROWS {
        let style = if sim.mode() == mode { LABEL } else { VALUE };
        fb.put_char(x, y, key, style);
        let cx = fb.put_str(x + 1, y, " - ", MUTED);
        let cx = fb.put_str(cx, y, label, style);
        if sim.mode() == mode {
            fb.put_char(cx, y, '<', LABEL);
        }
        y += 1;
    }
    let cx = fb.put_str(x, y, "o - Auto-dig: ", VALUE);
    fb.put_str(cx, y, if sim.auto_dig() { "On" } else { "Off" }, LABEL);
    y += 2;

    fb.put_str(x, y, "f - Wait for rocks to fall", MUTED);
    y += 1;
    fb.put_str(x, y, "q - Save and quit", MUTED);
}
