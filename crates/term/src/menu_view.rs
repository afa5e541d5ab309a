//! Surface screens: rescue/return messages, the main menu, the shop and the
//! stats page.
//!
//! Like the mine view these are pure functions from state to framebuffer.

use crate::core::catalog::item_price;
use crate::core::{MenuEntry, MenuScreen, ShopEntry, Simulation, SurfaceMenu, SurfaceReport};
use crate::fb::{Cell, CellStyle, FrameBuffer};
use crate::mine_view::Viewport;
use crate::types::{Item, OreKind, MAX_BAG_TIER, MAX_PICKAXE_TIER};

const TEXT: CellStyle = CellStyle::fg(252);
const TITLE: CellStyle = CellStyle::fg(252).bold();
const CURSOR: CellStyle = CellStyle::fg(226).bold();
const HINT: CellStyle = CellStyle::fg(244);

const CONTINUE: &str = "Press enter to continue...";

/// Row cursor over a framebuffer.
struct Lines<'a> {
    fb: &'a mut FrameBuffer,
    x: u16,
    y: u16,
}

impl<'a> Lines<'a> {
    fn new(fb: &'a mut FrameBuffer, viewport: Viewport) -> Self {
        fb.resize(viewport.width, viewport.height);
        fb.clear(Cell::default());
        Self { fb, x: 1, y: 1 }
    }

    fn line(&mut self, text: &str, style: CellStyle) -> u16 {
        let end = self.fb.put_str(self.x, self.y, text, style);
        self.y = self.y.saturating_add(1);
        end
    }

    /// Text pieces followed by a number on one row, `$`-prefixed when
    /// `dollars` is set.
    fn labeled(&mut self, parts: &[&str], dollars: bool, value: i32) {
        let mut cx = self.x;
        for part in parts {
            cx = self.fb.put_str(cx, self.y, part, TEXT);
        }
        if dollars {
            cx = self.fb.put_str(cx, self.y, "$", TEXT);
        }
        self.fb.put_i32(cx, self.y, value, TEXT);
        self.y = self.y.saturating_add(1);
    }

    fn value(&mut self, label: &str, value: i32) {
        self.labeled(&[label], false, value);
    }

    fn money(&mut self, label: &str, value: i32) {
        self.labeled(&[label], true, value);
    }

    fn blank(&mut self) {
        self.y = self.y.saturating_add(1);
    }

    fn cursor_after(&mut self, end: u16, selected: bool) {
        if selected {
            self.fb.put_char(end, self.y.saturating_sub(1), '<', CURSOR);
        }
    }
}

/// Draw the message shown after the player reaches the surface.
pub fn render_report_into(report: &SurfaceReport, viewport: Viewport, fb: &mut FrameBuffer) {
    let mut out = Lines::new(fb, viewport);

    if let Some(cause) = report.cause {
        out.labeled(
            &[cause.describe(), " and had to be rescued for "],
            true,
            report.rescue_cost,
        );
        out.line(CONTINUE, HINT);
        out.blank();
    }

    out.line("You return to the surface", TITLE);
    if report.ore_sold > 0 {
        out.money("You sell your ore for ", report.ore_sold);
    } else {
        out.line("You have no ore to sell", TEXT);
    }
    out.blank();
    out.line(CONTINUE, HINT);
}

/// Draw whichever surface screen the menu is on.
pub fn render_menu_into(
    menu: &SurfaceMenu,
    sim: &Simulation,
    viewport: Viewport,
    fb: &mut FrameBuffer,
) {
    let mut out = Lines::new(fb, viewport);
    out.money("Your money: ", sim.player().money);
    out.blank();

    match menu.screen() {
        MenuScreen::Main => draw_main(&mut out, menu),
        MenuScreen::Shop => draw_shop(&mut out, menu, sim),
        MenuScreen::Stats => draw_stats(&mut out, sim),
    }
}

/// Convenience helper that allocates a new framebuffer.
pub fn render_menu(menu: &SurfaceMenu, sim: &Simulation, viewport: Viewport) -> FrameBuffer {
    let mut fb = FrameBuffer::new(viewport.width, viewport.height);
    render_menu_into(menu, sim, viewport, &mut fb);
    fb
}

fn draw_main(out: &mut Lines<'_>, menu: &SurfaceMenu) {
    out.line("You are on the surface", TITLE);
    out.blank();
    out.line("k and j to go up and down, enter to select", HINT);
    out.blank();
    out.line("Option:", TEXT);
    out.blank();
    for entry in MenuEntry::ALL {
        let end = out.line(entry.label(), TEXT);
        out.cursor_after(end, entry == menu.selected_entry());
    }
}

fn draw_shop(out: &mut Lines<'_>, menu: &SurfaceMenu, sim: &Simulation) {
    out.line("k and j to go up and down, enter to select", HINT);
    out.blank();

    let player = sim.player();
    let inv = sim.inventory();
    for entry in ShopEntry::ALL {
        let y = out.y;
        let x = out.x;
        let fb = &mut *out.fb;
        let end = match entry {
            ShopEntry::UpgradePickaxe => shop_upgrade(
                fb,
                x,
                y,
                "Pickaxe",
                sim.next_pickaxe_price(),
                player.pickaxe_tier,
                MAX_PICKAXE_TIER,
            ),
            ShopEntry::UpgradeBag => shop_upgrade(
                fb,
                x,
                y,
                "Bag",
                sim.next_bag_price(),
                player.bag_tier,
                MAX_BAG_TIER,
            ),
            ShopEntry::Buy(item) => shop_item(fb, x, y, item, inv.count(item), inv.capacity(item)),
            ShopEntry::Back => fb.put_str(x, y, "Back", TEXT),
        };
        out.blank();
        out.cursor_after(end, entry == menu.selected_shop_entry());
    }
}

fn shop_upgrade(
    fb: &mut FrameBuffer,
    x: u16,
    y: u16,
    name: &str,
    price: Option<i32>,
    tier: u8,
    max: u8,
) -> u16 {
    let cx = fb.put_str(x, y, "Upgrade ", TEXT);
    let cx = fb.put_str(cx, y, name, TEXT);
    match price {
        Some(price) if tier < max => {
            let cx = fb.put_str(cx, y, " to tier ", TEXT);
            let cx = fb.put_i32(cx, y, tier as i32 + 1, TEXT);
            let cx = fb.put_str(cx, y, ": $", TEXT);
            fb.put_i32(cx, y, price, TEXT)
        }
        _ => {
            let cx = fb.put_str(cx, y, ": ", TEXT);
            let cx = fb.put_str(cx, y, name, TEXT);
            fb.put_str(cx, y, " at max level", HINT)
        }
    }
}

fn shop_item(fb: &mut FrameBuffer, x: u16, y: u16, item: Item, count: i32, cap: i32) -> u16 {
    let cx = fb.put_str(x, y, "Buy ", TEXT);
    let cx = fb.put_str(cx, y, item.name(), TEXT);
    let cx = fb.put_str(cx, y, ": $", TEXT);
    let cx = fb.put_i32(cx, y, item_price(item), TEXT);
    let cx = fb.put_str(cx, y, " ", TEXT);
    let cx = fb.put_i32(cx, y, count, TEXT);
    let cx = fb.put_str(cx, y, "/", HINT);
    fb.put_i32(cx, y, cap, TEXT)
}

fn draw_stats(out: &mut Lines<'_>, sim: &Simulation) {
    let stats = sim.stats();
    out.line("Stats:", TITLE);
    out.blank();
    out.value("Total blocks mined: ", stats.blocks_mined);
    out.value("Total ore mined: ", stats.ore_mined);
    for ore in OreKind::ALL {
        out.labeled(&["Total ", ore.name(), " mined: "], false, stats.ore_mined(ore));
    }
    out.money("Current money: ", sim.player().money);
    out.money("Total money earned: ", stats.money_earned);
    out.money("Total money spent: ", stats.money_spent);
    for item in Item::ALL {
        item_stats(out, sim, item);
    }
    out.value("Total structures placed: ", stats.structures_placed);
    out.value("Times rescued: ", stats.times_rescued);
    out.money("Money spent on being rescued: ", stats.money_spent_on_rescues);
    out.value("Times ran out of stamina: ", stats.times_out_of_stamina);
    out.value("Times crushed by rock: ", stats.times_crushed);
    out.value("Times fallen: ", stats.times_fallen);
    out.blank();
    out.line(CONTINUE, HINT);
}

fn item_stats(out: &mut Lines<'_>, sim: &Simulation, item: Item) {
    let stats = sim.stats();
    let (used_label, used) = match item {
        Item::Coffee => ("Coffee used: ", stats.coffee_used),
        Item::Dynamite => ("Dynamite used: ", stats.dynamite_used),
        Item::Support => ("Supports placed: ", stats.supports_placed),
        Item::Ladder => ("Ladders placed: ", stats.ladders_placed),
    };
    let bought = stats.bought(item);

    out.labeled(&[item.name(), " bought: "], false, bought);
    out.value(used_label, used);
    out.labeled(
        &["Money spent on ", item.name(), ": "],
        true,
        bought.saturating_mul(item_price(item)),
    );
}
