//! Terminal miner (default binary).
//!
//! Parses the save-slot command, then either manages the save file or runs
//! the game in the full-screen terminal UI.

use std::io::{self, Write};
use std::process::ExitCode;

use anyhow::{bail, Context, Result};

use tui_miner::app::run_game;
use tui_miner::cli::{self, Command};
use tui_miner::config::{init_logging, MinerConfig};
use tui_miner::core::{load_from_path, Simulation};

fn main() -> ExitCode {
    match try_main() {
        Ok(code) => code,
        Err(err) => {
            eprintln!("Error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn try_main() -> Result<ExitCode> {
    let command = match cli::parse_command(std::env::args_os()) {
        Ok(command) => command,
        Err(err) => {
            let _ = err.print();
            return Ok(ExitCode::FAILURE);
        }
    };

    let config = MinerConfig::from_env()?;
    init_logging(&config)?;

    match command {
        Command::Usage => {
            print!("{}", cli::usage());
        }
        Command::New(slot) => {
            let path = config.save_path(&slot);
            if path.exists() {
                let prompt = format!("Save number {slot} already exists, overwrite");
                if !ask(&prompt)? {
                    println!("Canceled");
                    return Ok(ExitCode::SUCCESS);
                }
            }
            let seed = config.world_seed();
            log::info!("new game in {} with seed {seed}", path.display());
            run_game(Simulation::new(seed), &path)?;
        }
        Command::Load(slot) => {
            let path = config.save_path(&slot);
            if !path.exists() {
                bail!("save file number {slot} doesn't exist");
            }
            let sim = load_from_path(&path)
                .with_context(|| format!("failed to load {}", path.display()))?;
            log::info!("loaded {}", path.display());
            run_game(sim, &path)?;
        }
        Command::Delete(slot) => {
            let path = config.save_path(&slot);
            if !path.exists() {
                bail!("save file number {slot} doesn't exist");
            }
            let prompt = format!("Confirm deletion of save number {slot}");
            if ask(&prompt)? {
                std::fs::remove_file(&path)
                    .with_context(|| format!("failed to delete {}", path.display()))?;
                println!("Deleted");
            } else {
                println!("Canceled");
            }
        }
    }

    io::stdout().flush()?;
    Ok(ExitCode::SUCCESS)
}

fn ask(prompt: &str) -> Result<bool> {
    cli::confirm(prompt, &mut io::stdin().lock(), &mut io::stdout())
        .context("failed to read confirmation")
}
