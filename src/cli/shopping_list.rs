use std::path::PathBuf;

use anyhow::Context;
use clap::ValueEnum;
use larder::config::Config;
use larder::recipes::load_files;
use larder::render::render_text;
use larder_shopping::{build_normalizer, ShoppingListGenerator};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[tracing::instrument(skip(config))]
pub fn generate(config: Config, files: Vec<PathBuf>, format: OutputFormat) -> anyhow::Result<()> {
    let recipes = load_files(&files).context("loading recipes")?;
    tracing::info!(files = files.len(), recipes = recipes.len(), "recipes loaded");

    let normalizer = build_normalizer(
        config.normalizer.backend,
        config.normalizer.ollama_settings(),
    );
    let list = ShoppingListGenerator::new(normalizer).generate(&recipes);

    match format {
        OutputFormat::Text => print!("{}", render_text(&list)),
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&list).context("serializing shopping list")?;
            println!("{json}");
        }
    }

    Ok(())
}
