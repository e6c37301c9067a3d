//! Jaki CLI - Data seeding and page export tools.
//!
//! # Usage
//!
//! ```bash
//! # Seed a starter home page into the data directory
//! jaki-cli seed
//!
//! # Export a page to a standalone HTML file
//! jaki-cli export --page home --output site.html
//! ```
//!
//! # Commands
//!
//! - `seed` - Create a starter home page when none exists
//! - `export` - Render a stored page to standalone HTML

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "jaki-cli")]
#[command(author, version, about = "Jaki CLI tools")]
struct Cli {
    /// Data directory holding the JSON stores
    #[arg(long, env = "JAKI_DATA_DIR", default_value = "data")]
    data_dir: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Seed a starter home page when the store is empty
    Seed,
    /// Export a stored page to a standalone HTML file
    Export {
        /// Page id, or "home" for the home page
        #[arg(short, long, default_value = "home")]
        page: String,

        /// Output file path
        #[arg(short, long, default_value = "jaki-global-site.html")]
        output: PathBuf,
    },
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Seed => commands::seed::run(&cli.data_dir).await?,
        Commands::Export { page, output } => {
            commands::export::run(&cli.data_dir, &page, &output).await?;
        }
    }
    Ok(())
}
