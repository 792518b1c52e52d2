use std::path::Path;

use anyhow::{Context, Result};
use typeless_core::extract::RawEntity;
use typeless_core::{construct_descriptors, RenderConfig};

use super::OutputArgs;
use crate::output;

pub fn run(records: &Path, args: &OutputArgs) -> Result<()> {
    let text = std::fs::read_to_string(records)
        .with_context(|| format!("reading {}", records.display()))?;
    let raw: Vec<RawEntity> = serde_json::from_str(&text)
        .with_context(|| format!("parsing records in {}", records.display()))?;

    let types = construct_descriptors(raw)?;

    let render = args.render_config(RenderConfig::default());

    let written = output::write_interfaces(&args.out, &types, &render, &args.extension)?;
    eprintln!("Wrote {} files to {}", written.len(), args.out.display());

    Ok(())
}
