use std::path::Path;

use anyhow::{Context, Result};
use typeless_core::ProfileSet;

pub fn run(config: &Path) -> Result<()> {
    let profiles = ProfileSet::load(config)
        .with_context(|| format!("loading profiles from {}", config.display()))?;

    if profiles.is_empty() {
        eprintln!("No profiles defined in {}", config.display());
        return Ok(());
    }

    for (name, profile) in profiles.iter() {
        println!("{name}\t{}", profile.page_url);
    }

    Ok(())
}
