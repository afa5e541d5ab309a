//! Shop module - upgrades and consumables bought on the surface

use crate::catalog::{bag_price, item_price, pickaxe_price};
use crate::game_state::Simulation;
use crate::types::{Item, MAX_BAG_TIER, MAX_PICKAXE_TIER};

impl Simulation {
    /// Price of the next pickaxe tier, `None` at the top tier
    pub fn next_pickaxe_price(&self) -> Option<i32> {
        if self.player.pickaxe_tier >= MAX_PICKAXE_TIER {
            return None;
        }
        pickaxe_price(self.player.pickaxe_tier + 1)
    }

    /// Price of the next bag tier, `None` at the top tier
    pub fn next_bag_price(&self) -> Option<i32> {
        if self.player.bag_tier >= MAX_BAG_TIER {
            return None;
        }
        bag_price(self.player.bag_tier + 1)
    }

    fn spend(&mut self, price: i32) -> bool {
        if self.player.money < price {
            return false;
        }
        self.player.money -= price;
        self.stats.money_spent += price;
        true
    }

    pub fn upgrade_pickaxe(&mut self) -> bool {
        let Some(price) = self.next_pickaxe_price() else {
            return false;
        };
        if !self.spend(price) {
            return false;
        }
        self.player.pickaxe_tier += 1;
        log::info!("pickaxe upgraded to tier {}", self.player.pickaxe_tier);
        true
    }

    /// Buy the next bag tier, doubling every capacity
    pub fn upgrade_bag(&mut self) -> bool {
        let Some(price) = self.next_bag_price() else {
            return false;
        };
        if !self.spend(price) {
            return false;
        }
        self.player.bag_tier += 1;
        self.inventory.double_capacities();
        log::info!("bag upgraded to tier {}", self.player.bag_tier);
        true
    }

    /// Buy one unit of an item if there is room and money for it
    pub fn buy(&mut self, item: Item) -> bool {
        if self.inventory.count(item) >= self.inventory.capacity(item) {
            return false;
        }
        if !self.spend(item_price(item)) {
            return false;
        }
        *self.inventory.count_mut(item) += 1;
        *self.stats.bought_mut(item) += 1;
        true
    }
}
