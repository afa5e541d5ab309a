//! Rescue module - stamina, returning to the surface and selling ore
//!
//! The rescue path runs when the player is incapacitated: out of stamina with
//! no coffee left, crushed by a rock, or after a long fall. It charges a fee
//! proportional to depth and then does what a voluntary return does: reset the
//! player to the spawn point and sell all carried ore.

use crate::catalog::ore_price;
use crate::game_state::Simulation;
use crate::types::{OreKind, RescueCause, MAX_STAMINA, RESCUE_MULTIPLIER};

/// Presentation hook played before a rescue resets the player
///
/// Called synchronously with the simulation as it looks at the moment of the
/// accident. The terminal front end blinks the player glyph here.
pub trait Cutscene {
    fn rescue(&mut self, sim: &Simulation, cause: RescueCause);
}

/// Cutscene that shows nothing (headless play and tests)
#[derive(Debug, Clone, Copy, Default)]
pub struct NoCutscene;

impl Cutscene for NoCutscene {
    fn rescue(&mut self, _sim: &Simulation, _cause: RescueCause) {}
}

/// What happened on one return to the surface
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SurfaceReport {
    /// `None` for a voluntary return through the exit shaft
    pub cause: Option<RescueCause>,
    pub rescue_cost: i32,
    /// Money made selling the carried ore (0 when the bag was empty)
    pub ore_sold: i32,
}

impl Simulation {
    /// Spend stamina; running dry drinks a coffee or triggers a rescue
    pub(crate) fn deplete_stamina(&mut self, amount: i32, cutscene: &mut dyn Cutscene) {
        self.player.stamina -= amount;
        if self.player.stamina <= 0 && !self.use_coffee() {
            self.rescue(RescueCause::OutOfStamina, cutscene);
        }
    }

    /// Restore full stamina from a coffee, if one is carried
    pub fn use_coffee(&mut self) -> bool {
        if self.inventory.coffee > 0 {
            self.inventory.coffee -= 1;
            self.stats.coffee_used += 1;
            self.player.stamina = MAX_STAMINA;
            true
        } else {
            false
        }
    }

    pub(crate) fn rescue(&mut self, cause: RescueCause, cutscene: &mut dyn Cutscene) {
        self.return_to_surface(Some(cause), cutscene);
    }

    /// Bring the player back to the spawn point
    ///
    /// With a `cause` the cutscene plays first and the rescue fee is charged;
    /// money may go negative. Every return sells the carried ore and queues a
    /// [`SurfaceReport`].
    pub fn return_to_surface(&mut self, cause: Option<RescueCause>, cutscene: &mut dyn Cutscene) {
        let mut rescue_cost = 0;
        if let Some(cause) = cause {
            cutscene.rescue(self, cause);
            rescue_cost = self.player.pos.y * RESCUE_MULTIPLIER;
            self.player.money -= rescue_cost;
            self.stats.money_spent += rescue_cost;
            self.stats.money_spent_on_rescues += rescue_cost;
            self.stats.times_rescued += 1;
            match cause {
                RescueCause::OutOfStamina => self.stats.times_out_of_stamina += 1,
                RescueCause::CrushedByRock => self.stats.times_crushed += 1,
                RescueCause::Fall => self.stats.times_fallen += 1,
            }
            log::info!(
                "rescued at ({}, {}): {} (cost ${})",
                self.player.pos.x,
                self.player.pos.y,
                cause.describe(),
                rescue_cost
            );
        }

        self.player.reset_to_spawn();
        let ore_sold = self.sell_ores();
        log::info!("returned to surface, sold ore for ${}", ore_sold);
        self.reports.push(SurfaceReport {
            cause,
            rescue_cost,
            ore_sold,
        });
    }

    /// Convert all carried ore to money at catalog prices
    pub fn sell_ores(&mut self) -> i32 {
        let bag = self.inventory.take_ore();
        let amount: i32 = OreKind::ALL
            .iter()
            .map(|&ore| ore_price(ore) * bag[ore.index()])
            .sum();
        self.player.money += amount;
        self.stats.money_earned += amount;
        amount
    }
}
