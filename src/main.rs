//! shelves - Inspect and edit a local shelf database

use clap::{Parser, Subcommand};
use shelfstore::{SaveOutcome, Shelf, ShelfId, ShelfStore, StoreConfig};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "shelves")]
#[command(version)]
#[command(about = "Inspect and edit a local shelf database")]
struct Cli {
    /// Directory holding the database (defaults to SHELVES_ROOT, then ".")
    #[arg(short, long, global = true)]
    root: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print every saved shelf
    List,

    /// Print the markup of one shelf
    Get {
        /// Shelf id
        #[arg(allow_negative_numbers = true)]
        id: ShelfId,
    },

    /// Save markup as a shelf, replacing any existing one
    Put {
        /// Shelf id
        #[arg(allow_negative_numbers = true)]
        id: ShelfId,

        /// Markup of the shelf element
        markup: String,
    },

    /// Delete one shelf
    Delete {
        /// Shelf id
        #[arg(allow_negative_numbers = true)]
        id: ShelfId,
    },

    /// Delete every shelf
    Clear,

    /// Show record count and disk usage
    Stats,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if cli.verbose {
            EnvFilter::new("debug")
        } else {
            EnvFilter::new("info")
        }
    });
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let mut config = StoreConfig::from_env()?;
    if let Some(root) = cli.root {
        config = config.with_root_dir(root);
    }
    let store = ShelfStore::new(config);

    match cli.command {
        Commands::List => {
            let records = store.get_all().await?;
            if records.is_empty() {
                println!("No shelves saved.");
            }
            for record in records {
                println!("{}\t{}", record.id(), record.contents());
            }
        }
        Commands::Get { id } => match store.get(id).await? {
            Some(record) => println!("{}", record.contents()),
            None => println!("No shelf with id {}", id),
        },
        Commands::Put { id, markup } => {
            let shelf = Shelf::from_markup(markup);
            if let SaveOutcome::Saved { id } = store.save(Some(&shelf), id).await? {
                println!("Saved shelf {}", id);
            }
        }
        Commands::Delete { id } => {
            store.delete(id).await?;
            println!("Deleted shelf {}", id);
        }
        Commands::Clear => {
            store.clear().await?;
            println!("Cleared all shelves");
        }
        Commands::Stats => {
            let stats = store.stats().await?;
            println!("Database: {}", store.config().db_path().display());
            println!("Shelves:  {}", stats.record_count);
            println!("On disk:  {} bytes", stats.disk_size_bytes);
        }
    }

    Ok(())
}
