mod cli;
mod output;

use anyhow::Result;
use clap::Parser;

use crate::cli::{Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    dispatch(cli).await
}

async fn dispatch(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Scrape {
            profile,
            output,
            dry_run,
        } => cli::scrape::run(&cli.config, &profile, &output, dry_run).await,
        Commands::Profiles => cli::profiles::run(&cli.config),
        Commands::Render { records, output } => cli::render::run(&records, &output),
    }
}
