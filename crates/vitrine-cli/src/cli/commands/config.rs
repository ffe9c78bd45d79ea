//! `vitrine config` handlers.

use anyhow::{Context, Result};
use vitrine_core::config::{Config, paths};

pub fn path() {
    println!("{}", paths::config_path().display());
}

/// Writes the commented template; an existing file is never overwritten.
pub fn init() -> Result<()> {
    let target = paths::config_path();
    Config::init(&target).with_context(|| format!("init config at {}", target.display()))?;
    println!("Created config at {}", target.display());
    Ok(())
}

/// Prints the values a replay would run with: the file over defaults, plus
/// the seed override when one is given.
pub fn show(seed: Option<u64>) -> Result<()> {
    let mut config = Config::load().context("load config")?;
    if seed.is_some() {
        config.transitions.scramble_seed = seed;
    }
    print!("{}", config.to_toml()?);
    Ok(())
}
