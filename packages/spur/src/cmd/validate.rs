//! Validate settings files.

use std::path::{Path, PathBuf};

use clap::Args;
use color_eyre::eyre::{Context, Result};
use spur::settings::{self, Settings};

#[derive(Args, Clone, Debug)]
pub struct Config {
    /// Path to a specific settings file to validate.
    /// If not specified, validates the settings that apply to the current directory.
    pub path: Option<PathBuf>,
}

pub fn main(config: Config) -> Result<()> {
    match config.path {
        Some(path) => validate_file(&path),
        None => validate_all(),
    }
}

/// Validate all discoverable settings files and print the resolved settings.
fn validate_all() -> Result<()> {
    let (settings, loaded) = settings::load_attributed(Path::new(".")).context("load settings")?;
    if loaded.is_empty() {
        println!("No settings files found; using defaults.");
    }
    for path in loaded {
        println!("Settings file: {path:?}");
    }
    println!("------");
    println!();

    let yaml = serde_yaml::to_string(&settings).context("serialize settings")?;
    println!("{yaml}");
    Ok(())
}

/// Validate a single settings file and print the settings it resolves to
/// on top of the defaults.
fn validate_file(path: &Path) -> Result<()> {
    let file = settings::load_from(path).context("parse settings file")?;
    match file {
        Some(file) => {
            let settings = Settings::default().apply(file);
            let yaml = serde_yaml::to_string(&settings).context("serialize settings")?;
            println!("{yaml}");
        }
        None => println!("Not a settings file (missing, or not .yaml): {path:?}"),
    }
    Ok(())
}
