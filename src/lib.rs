//! TUI Miner (workspace facade crate).
//!
//! The game itself lives in dedicated crates under `crates/`; this package
//! re-exports them as `tui_miner::{core,input,term,types}` and adds the
//! binary's command line, configuration and session loop.

pub mod app;
pub mod cli;
pub mod config;

pub use tui_miner_core as core;
pub use tui_miner_input as input;
pub use tui_miner_term as term;
pub use tui_miner_types as types;
