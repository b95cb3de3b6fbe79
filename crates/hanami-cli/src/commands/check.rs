//! Check command - validates a configuration file

use anyhow::{Context, Result};
use hanami_core::HanamiConfig;

pub fn run(path: &str) -> Result<()> {
    let config =
        HanamiConfig::load(path).with_context(|| format!("Invalid configuration: {path}"))?;

    println!("Configuration OK: {path}");
    println!(
        "  Petals:    {} mobile / {} desktop, {} color(s), wind speed {}",
        config.petals.mobile_count,
        config.petals.desktop_count,
        config.petals.colors.len(),
        config.petals.wind_speed
    );
    println!(
        "  Particles: {} mobile / {} desktop, bounds {:?}",
        config.field.mobile_count, config.field.desktop_count, config.field.bounds
    );
    println!("  Breakpoint: {} px", config.breakpoint_px);
    if let Some(seed) = config.seed {
        println!("  Seed: {seed}");
    }
    Ok(())
}
