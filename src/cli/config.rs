//! config CLI command - show or persist the effective configuration

use crate::config::EngineConfig;
use crate::Result;
use anyhow::Context;
use colored::Colorize;
use std::path::Path;

pub fn run(config: &EngineConfig, config_path: Option<&Path>, write: bool) -> Result<()> {
    println!("{}", "Effective configuration:".cyan().bold());
    println!("   State dir:        {}", config.state_dir.display());
    println!("   Methodology root: {}", config.methodology_root.display());
    println!("   Log filter:       {}", config.log_filter);

    if write {
        let path = match config_path {
            Some(p) => p.to_path_buf(),
            None => EngineConfig::default_path()
                .context("Could not determine home directory for the config file")?,
        };
        config.save(&path)?;
        println!();
        println!("{}", format!("✅ Saved to {}", path.display()).green());
    }

    Ok(())
}
