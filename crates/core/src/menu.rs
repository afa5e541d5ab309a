//! Menu module - the surface menu and shop as a small state machine
//!
//! The menu owns only cursor state. Purchases go straight to the
//! [`Simulation`] shop mutators; the front end decides what to draw from
//! [`SurfaceMenu::screen`] and the cursors.

use crate::game_state::Simulation;
use crate::types::{Item, MenuKey};

/// Entries of the main surface menu
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuEntry {
    ReturnToMine,
    OpenShop,
    ViewStats,
    ExitGame,
}

impl MenuEntry {
    pub const ALL: [MenuEntry; 4] = [
        MenuEntry::ReturnToMine,
        MenuEntry::OpenShop,
        MenuEntry::ViewStats,
        MenuEntry::ExitGame,
    ];

    pub fn label(self) -> &'static str {
        match self {
            MenuEntry::ReturnToMine => "Return to mine",
            MenuEntry::OpenShop => "Open shop",
            MenuEntry::ViewStats => "View stats",
            MenuEntry::ExitGame => "Exit game",
        }
    }
}

/// Entries of the shop list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShopEntry {
    UpgradePickaxe,
    UpgradeBag,
    Buy(Item),
    Back,
}

impl ShopEntry {
    pub const ALL: [ShopEntry; 7] = [
        ShopEntry::UpgradePickaxe,
        ShopEntry::UpgradeBag,
        ShopEntry::Buy(Item::Coffee),
        ShopEntry::Buy(Item::Dynamite),
        ShopEntry::Buy(Item::Support),
        ShopEntry::Buy(Item::Ladder),
        ShopEntry::Back,
    ];
}

/// Which surface screen is showing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MenuScreen {
    #[default]
    Main,
    Shop,
    Stats,
}

/// What the session loop should do after a menu key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuOutcome {
    Stay,
    ReturnToMine,
    Exit,
}

/// Surface menu state
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SurfaceMenu {
    screen: MenuScreen,
    main_cursor: usize,
    shop_cursor: usize,
}

impl SurfaceMenu {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn screen(&self) -> MenuScreen {
        self.screen
    }

    pub fn selected_entry(&self) -> MenuEntry {
        MenuEntry::ALL[self.main_cursor]
    }

    pub fn selected_shop_entry(&self) -> ShopEntry {
        ShopEntry::ALL[self.shop_cursor]
    }

    pub fn main_cursor(&self) -> usize {
        self.main_cursor
    }

    pub fn shop_cursor(&self) -> usize {
        self.shop_cursor
    }

    /// Handle one key on the current screen
    pub fn handle_key(&mut self, key: MenuKey, sim: &mut Simulation) -> MenuOutcome {
        match self.screen {
            MenuScreen::Main => self.handle_main(key),
            MenuScreen::Shop => {
                self.handle_shop(key, sim);
                MenuOutcome::Stay
            }
            MenuScreen::Stats => {
                if key == MenuKey::Select {
                    self.screen = MenuScreen::Main;
                }
                MenuOutcome::Stay
            }
        }
    }

    fn handle_main(&mut self, key: MenuKey) -> MenuOutcome {
        match key {
            MenuKey::Up => {
                self.main_cursor = self.main_cursor.saturating_sub(1);
                MenuOutcome::Stay
            }
            MenuKey::Down => {
                self.main_cursor = (self.main_cursor + 1).min(MenuEntry::ALL.len() - 1);
                MenuOutcome::Stay
            }
            MenuKey::Select => match self.selected_entry() {
                MenuEntry::ReturnToMine => MenuOutcome::ReturnToMine,
                MenuEntry::OpenShop => {
                    self.screen = MenuScreen::Shop;
                    MenuOutcome::Stay
                }
                MenuEntry::ViewStats => {
                    self.screen = MenuScreen::Stats;
                    MenuOutcome::Stay
                }
                MenuEntry::ExitGame => MenuOutcome::Exit,
            },
        }
    }

    fn handle_shop(&mut self, key: MenuKey, sim: &mut Simulation) {
        match key {
            MenuKey::Up => self.shop_cursor = self.shop_cursor.saturating_sub(1),
            MenuKey::Down => {
                self.shop_cursor = (self.shop_cursor + 1).min(ShopEntry::ALL.len() - 1)
            }
            MenuKey::Select => {
                let bought = match self.selected_shop_entry() {
                    ShopEntry::UpgradePickaxe => sim.upgrade_pickaxe(),
                    ShopEntry::UpgradeBag => sim.upgrade_bag(),
                    ShopEntry::Buy(item) => sim.buy(item),
                    ShopEntry::Back => {
                        self.shop_cursor = 0;
                        self.screen = MenuScreen::Main;
                        return;
                    }
                };
                if !bought {
                    log::debug!("purchase refused: {:?}", self.selected_shop_entry());
                }
            }
        }
    }
}
