//! Config command - prints the default configuration

use anyhow::Result;
use hanami_core::HanamiConfig;

pub fn run() -> Result<()> {
    print!("{}", HanamiConfig::default().to_toml_string()?);
    Ok(())
}
