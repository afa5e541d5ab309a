//! Terminal "game renderer" module.
//!
//! A small, game-oriented rendering layer for the mine. It avoids widget and
//! layout libraries and instead renders into a plain framebuffer that is
//! flushed to the terminal by a diffing renderer.
//!
//! - [`mine_view`]: camera window over the mine plus the status panel
//! - [`menu_view`]: surface messages, menu, shop and stats screens
//! - [`renderer`]: crossterm backend that only redraws changed cells

pub mod fb;
pub mod menu_view;
pub mod mine_view;
pub mod renderer;

pub use tui_miner_core as core;
pub use tui_miner_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer};
pub use menu_view::{render_menu, render_menu_into, render_report_into};
pub use mine_view::{MineView, Viewport};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
