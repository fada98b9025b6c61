mod cli;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use cli::shopping_list::OutputFormat;

/// larder - Consolidated shopping lists from parsed recipes
#[derive(Parser)]
#[command(name = "larder")]
#[command(about = "Merge recipe ingredients into one categorized shopping list", long_about = None)]
struct Cli {
    /// Path to configuration file
    #[arg(long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build a shopping list from recipe JSON files
    ShoppingList {
        /// Files holding one recipe or an array of recipes
        #[arg(required = true)]
        files: Vec<PathBuf>,

        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
    /// Print the canonical matching name of an ingredient
    Normalize {
        name: String,

        /// Modifier text parsed alongside the name ("diced", "red")
        #[arg(long)]
        modifiers: Option<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = larder::config::Config::load(cli.config.clone())?;
    config.validate().map_err(|e| anyhow::anyhow!(e))?;

    larder::observability::init_observability(&config.observability.log_level)?;

    match cli.command {
        Commands::ShoppingList { files, format } => {
            cli::shopping_list::generate(config, files, format)
        }
        Commands::Normalize { name, modifiers } => {
            cli::normalize::normalize(config, name, modifiers)
        }
    }
}
