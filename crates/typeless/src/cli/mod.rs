pub mod profiles;
pub mod render;
pub mod scrape;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use typeless_core::{DeclarationStyle, RenderConfig};

#[derive(Parser)]
#[command(
    name = "typeless",
    about = "Generate interface definitions from entity documentation",
    version
)]
pub struct Cli {
    /// Profile file (JSON object keyed by profile name)
    #[arg(
        short,
        long,
        global = true,
        env = "TYPELESS_CONFIG",
        default_value = "typeless.json"
    )]
    pub config: PathBuf,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Scrape a profile's page and write one interface file per entity
    Scrape {
        /// Profile name from the config file
        profile: String,
        #[command(flatten)]
        output: OutputArgs,
        /// Print the interfaces instead of writing files
        #[arg(long)]
        dry_run: bool,
    },
    /// List the profiles in the config file
    Profiles,
    /// Render interfaces from a JSON array of scraped records
    Render {
        /// Records file: [{ "name", "properties": [{ "name", "type" }], "inherits" }]
        records: PathBuf,
        #[command(flatten)]
        output: OutputArgs,
    },
}

#[derive(Args, Debug, Clone)]
pub struct OutputArgs {
    /// Output directory
    #[arg(short, long, default_value = "types")]
    pub out: PathBuf,
    /// Module syntax: es-module or common-js (overrides the profile)
    #[arg(long)]
    pub style: Option<DeclarationStyle>,
    /// File extension for generated files
    #[arg(long, default_value = "ts")]
    pub extension: String,
    /// Built-in type names never imported, comma-separated (overrides the profile)
    #[arg(long = "builtin", value_delimiter = ',')]
    pub builtin_types: Vec<String>,
}

impl OutputArgs {
    /// Applies the command-line overrides on top of `render`.
    pub fn render_config(&self, mut render: RenderConfig) -> RenderConfig {
        if let Some(style) = self.style {
            render = render.with_style(style);
        }
        if !self.builtin_types.is_empty() {
            render = render.with_builtin_types(self.builtin_types.clone());
        }
        render
    }
}
