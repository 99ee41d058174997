//! modelshop CLI
//!
//! Command-line frontend for browsing the catalog served by the
//! modelshop daemon.

mod client;
mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

/// modelshop - browse, preview, and download 3D models
#[derive(Parser, Debug)]
#[command(name = "modelshop")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Daemon API address
    #[arg(long, default_value = "http://localhost:9090", global = true)]
    api: String,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List models in the catalog
    Ls {
        /// Category to filter by (e.g. Furniture); omit for all
        #[arg(long)]
        category: Option<String>,

        /// Render one row per model instead of the grid
        #[arg(long)]
        list: bool,
    },

    /// Show a model and its preview URL
    Show {
        /// Model id (omit to see the empty preview pane)
        id: Option<String>,
    },

    /// Record a download and print the asset URL
    Download {
        /// Model id
        id: String,
    },

    /// List the catalog categories
    Categories,

    /// Submit a model draft for validation
    Upload {
        /// Model name
        #[arg(long)]
        name: String,

        /// Category (e.g. Furniture)
        #[arg(long)]
        category: String,

        /// Price in USD; 0 means free
        #[arg(long, default_value_t = 0.0)]
        price: f64,

        /// Description
        #[arg(long)]
        description: Option<String>,

        /// Comma-separated tags
        #[arg(long)]
        tags: Option<String>,

        /// Model files (.obj, .fbx, .gltf, .glb, .dae, .3ds)
        files: Vec<PathBuf>,
    },

    /// Show system status
    Top,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::WARN
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .finish();
    let _ = tracing::subscriber::set_global_default(subscriber);

    let client = Arc::new(client::ApiClient::new(&cli.api));

    match cli.command {
        Commands::Ls { category, list } => {
            commands::ls(client, category, list).await?;
        }
        Commands::Show { id } => {
            commands::show(client, id).await?;
        }
        Commands::Download { id } => {
            commands::download(client, id).await?;
        }
        Commands::Categories => {
            commands::categories();
        }
        Commands::Upload {
            name,
            category,
            price,
            description,
            tags,
            files,
        } => {
            commands::upload(client, name, category, price, description, tags, files).await?;
        }
        Commands::Top => {
            commands::top(client).await?;
        }
    }

    Ok(())
}
