//! Core simulation - pure, deterministic, and testable
//!
//! This crate contains the mine, its generation and every game rule. It has
//! no dependency on the terminal, which makes it:
//!
//! - **Deterministic**: the same seed generates the same mine
//! - **Testable**: every rule is exercised headless through [`NoCutscene`]
//! - **Portable**: the front end only reads state and feeds actions
//!
//! # Module Structure
//!
//! - [`catalog`]: static block properties and price tables
//! - [`mine`]: the 512x512 block grid with fog of war
//! - [`rng`]: xorshift generator used by world generation
//! - [`worldgen`]: depth-stratified mine generation
//! - [`player`]: position, camera, inventory and statistics
//! - [`game_state`]: the [`Simulation`] context and the turn loop
//! - [`mining`]: digging and dynamite
//! - [`collapse`]: falling rocks and support collapse
//! - [`movement`]: walking, climbing and falling
//! - [`build`]: placing supports and ladders
//! - [`rescue`]: stamina, rescues and selling ore
//! - [`shop`]: upgrades and consumables
//! - [`menu`]: the surface menu state machine
//! - [`save`]: binary persistence
//!
//! # Turn Order
//!
//! One input action is applied per turn. Digging, building and moving happen
//! first; then the player falls while unsupported; then every falling rock is
//! advanced once. A rescue can interrupt any of these steps.
//!
//! # Example
//!
//! ```
//! use tui_miner_core::{NoCutscene, Simulation};
//! use tui_miner_types::{Direction, GameAction};
//!
//! let mut sim = Simulation::new(12345);
//!
//! // The spawn pocket is open to the right.
//! assert!(sim.apply_action(GameAction::Move(Direction::Right), &mut NoCutscene));
//! assert_eq!(sim.player().pos.x, 3);
//!
//! // Walking back into the exit shaft returns to the surface.
//! sim.apply_action(GameAction::Move(Direction::Left), &mut NoCutscene);
//! sim.apply_action(GameAction::Move(Direction::Left), &mut NoCutscene);
//! assert_eq!(sim.take_surface_reports().len(), 1);
//! ```

pub mod build;
pub mod catalog;
pub mod collapse;
pub mod game_state;
pub mod menu;
pub mod mine;
pub mod mining;
pub mod movement;
pub mod player;
pub mod rescue;
pub mod rng;
pub mod save;
pub mod shop;
pub mod worldgen;

pub use tui_miner_types as types;

// Re-export commonly used types for convenience
pub use catalog::{block_data, BlockData};
pub use collapse::FallingRocks;
pub use game_state::Simulation;
pub use menu::{MenuEntry, MenuOutcome, MenuScreen, ShopEntry, SurfaceMenu};
pub use mine::{Cell, Coord, Mine};
pub use player::{Inventory, Player, Stats};
pub use rescue::{Cutscene, NoCutscene, SurfaceReport};
pub use rng::XorShift32;
pub use save::{load_from_path, save_to_path, SaveError};
pub use worldgen::generate_mine;
