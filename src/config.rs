//! Runtime configuration read from the environment, plus logger setup.

use std::fs::File;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use log::LevelFilter;
use simplelog::WriteLogger;

use crate::cli::Slot;

pub const ENV_SAVE_DIR: &str = "MINER_SAVE_DIR";
pub const ENV_SAVE_PREFIX: &str = "MINER_SAVE_PREFIX";
pub const ENV_SEED: &str = "MINER_SEED";
pub const ENV_LOG_PATH: &str = "MINER_LOG_PATH";
pub const ENV_LOG_LEVEL: &str = "MINER_LOG_LEVEL";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MinerConfig {
    /// Directory holding the save files.
    pub save_dir: PathBuf,
    /// File name prefix; slot `N` lives in `<prefix>N.bin`.
    pub save_prefix: String,
    /// Fixed world seed; `None` seeds from the clock.
    pub seed: Option<u32>,
    /// Log file; no logger is installed when unset.
    pub log_path: Option<PathBuf>,
    pub log_level: LevelFilter,
}

impl Default for MinerConfig {
    fn default() -> Self {
        Self {
            save_dir: PathBuf::from("."),
            save_prefix: "save".to_string(),
            seed: None,
            log_path: None,
            log_level: LevelFilter::Info,
        }
    }
}

impl MinerConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from any key lookup (the environment in production).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = Self::default();

        if let Some(dir) = lookup(ENV_SAVE_DIR).filter(|v| !v.is_empty()) {
            config.save_dir = PathBuf::from(dir);
        }
        if let Some(prefix) = lookup(ENV_SAVE_PREFIX) {
            config.save_prefix = prefix;
        }
        if let Some(seed) = lookup(ENV_SEED) {
            let seed = seed
                .trim()
                .parse::<u32>()
                .with_context(|| format!("{ENV_SEED}={seed:?} is not a u32"))?;
            config.seed = Some(seed);
        }
        if let Some(path) = lookup(ENV_LOG_PATH).filter(|v| !v.is_empty()) {
            config.log_path = Some(PathBuf::from(path));
        }
        if let Some(level) = lookup(ENV_LOG_LEVEL) {
            config.log_level = level
                .trim()
                .parse::<LevelFilter>()
                .with_context(|| format!("{ENV_LOG_LEVEL}={level:?} is not a log level"))?;
        }

        Ok(config)
    }

    /// Path of the save file for `slot`.
    pub fn save_path(&self, slot: &Slot) -> PathBuf {
        self.save_dir
            .join(format!("{}{}.bin", self.save_prefix, slot.as_str()))
    }

    /// The configured seed, or the current wall-clock seconds.
    pub fn world_seed(&self) -> u32 {
        self.seed.unwrap_or_else(|| {
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_secs() as u32)
                .unwrap_or(1)
        })
    }
}

/// Install a file logger when a log path is configured.
///
/// Logging to stderr would draw over the full-screen terminal UI, so without a
/// path no logger is installed and the `log` macros are no-ops.
pub fn init_logging(config: &MinerConfig) -> Result<()> {
    let Some(path) = &config.log_path else {
        return Ok(());
    };
    let file = File::create(path)
        .with_context(|| format!("failed to create log file {}", path.display()))?;
    WriteLogger::init(config.log_level, simplelog::Config::default(), file)
        .context("failed to install logger")?;
    log::info!("logging to {} at {}", path.display(), config.log_level);
    Ok(())
}
