//! `ytthumb config` – show where the config lives and what it says.

use anyhow::Result;
use ytthumb_core::config::{self, YtThumbConfig};

pub fn run_config(cfg: &YtThumbConfig) -> Result<()> {
    println!("# {}", config::config_path()?.display());
    print!("{}", toml::to_string_pretty(cfg)?);
    Ok(())
}
