//! Config command: print or write the default configuration

use anyhow::Result;
use std::path::Path;

use crate::config::Config;

/// With neither flag, prints the configuration in effect
pub fn execute(config: &Config, example: bool, write: Option<&Path>) -> Result<String> {
    if let Some(path) = write {
        Config::default().save_to_file(path)?;
        log::info!("Wrote default configuration to {}", path.display());
    }

    let text = if example {
        Config::example_toml()?
    } else {
        toml::to_string_pretty(config)?
    };
    if example || write.is_none() {
        print!("{}", text);
    }
    Ok(text)
}
