use std::path::Path;

use anyhow::{Context, Result};
use typeless_core::{AddressLoader, Pipeline, ProfileSet};

use super::OutputArgs;
use crate::output;

pub async fn run(config: &Path, profile: &str, args: &OutputArgs, dry_run: bool) -> Result<()> {
    let profiles = ProfileSet::load(config)
        .with_context(|| format!("loading profiles from {}", config.display()))?;
    let scrape = profiles.get(profile)?;

    let render = args.render_config(scrape.render.clone());

    let pipeline =
        Pipeline::new().with_loader(Box::new(AddressLoader::new(scrape.fetch.clone())));
    let types = pipeline
        .extract(&scrape.page_url, &scrape.locators)
        .await
        .with_context(|| format!("scraping {}", scrape.page_url))?;

    eprintln!("Scraped {} types from {}", types.len(), scrape.page_url);

    if dry_run {
        output::print_interfaces(&types, &render, &args.extension);
    } else {
        let written = output::write_interfaces(&args.out, &types, &render, &args.extension)?;
        eprintln!("Wrote {} files to {}", written.len(), args.out.display());
    }

    Ok(())
}
