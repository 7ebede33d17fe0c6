//! Bookfinder CLI - search the Open Library catalog from the terminal

mod commands;
mod context;
mod render;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Parse and validate the page size argument (must be at least 1)
fn parse_page_size(s: &str) -> Result<u32, String> {
    let n: u32 = s.parse().map_err(|_| format!("'{}' is not a valid number", s))?;
    if n < 1 {
        Err("page size must be at least 1".to_string())
    } else {
        Ok(n)
    }
}

/// Parse and validate a page number (must be at least 1)
fn parse_page(s: &str) -> Result<u32, String> {
    let n: u32 = s.parse().map_err(|_| format!("'{}' is not a valid number", s))?;
    if n < 1 {
        Err("pages start at 1".to_string())
    } else {
        Ok(n)
    }
}

#[derive(Parser)]
#[command(name = "bookfinder")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Catalog API root (default: $BOOKFINDER_API_URL or https://openlibrary.org/)
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Directory holding the recently viewed list (default: $BOOKFINDER_DATA_DIR)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search books by title
    Search {
        /// Title to search for
        title: String,

        /// Page of results to show
        #[arg(short, long, default_value = "1", value_parser = parse_page)]
        page: u32,

        /// Results per page
        #[arg(long, default_value = "20", value_parser = parse_page_size)]
        page_size: u32,

        /// Open the result at this position (1-based) and show its details
        #[arg(long)]
        open: Option<usize>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show details for a work and its author
    Show {
        /// Work id, e.g. OL45804W
        book_id: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// List recently viewed books
    Recent {
        /// Output as JSON
        #[arg(long)]
        json: bool,

        /// Forget all recently viewed books
        #[arg(long)]
        clear: bool,
    },

    /// Print example searches
    Suggest,

    /// Interactive search with live, debounced input
    Browse,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = if cli.verbose {
        "bookfinder_cli=debug,bookfinder_core=debug"
    } else {
        "bookfinder_cli=info,bookfinder_core=warn"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let settings = context::Settings::resolve(cli.api_url, cli.data_dir);

    match cli.command {
        Commands::Search {
            title,
            page,
            page_size,
            open,
            json,
        } => {
            let ctx = context::AppContext::new(&settings, page_size)?;
            commands::search(&ctx, &title, page, open, json).await
        }

        Commands::Show { book_id, json } => {
            let ctx = context::AppContext::new(&settings, settings.page_size)?;
            commands::show(&ctx, &book_id, json).await
        }

        Commands::Recent { json, clear } => {
            let ctx = context::AppContext::new(&settings, settings.page_size)?;
            commands::recent(&ctx, json, clear)
        }

        Commands::Suggest => commands::suggest(),

        Commands::Browse => {
            let ctx = context::AppContext::new(&settings, settings.page_size)?;
            commands::browse(&ctx).await
        }
    }
}
