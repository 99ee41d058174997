//! modelshop daemon
//!
//! Serves the catalog REST API, backed by either the hosted store or
//! an in-memory demo catalog.

use axum::http::HeaderValue;
use clap::Parser;
use modelshop_api::create_router;
use modelshop_core::DaemonConfig;
use modelshop_store::{CatalogStore, HttpCatalogStore, MemoryCatalogStore};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

/// modelshopd - catalog server for the 3D model shop
#[derive(Parser, Debug)]
#[command(name = "modelshopd")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to a TOML configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Serve a seeded in-memory catalog instead of the hosted store
    #[arg(long)]
    demo: bool,

    /// Log level, overriding the configured one
    #[arg(long)]
    log_level: Option<String>,
}

fn parse_level(level: &str) -> Level {
    match level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    }
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => match DaemonConfig::from_file(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("{}", e);
                std::process::exit(1);
            }
        },
        None => DaemonConfig::default(),
    };

    // Initialize logging
    let level = args
        .log_level
        .as_deref()
        .unwrap_or(&config.logging.level);
    let subscriber = FmtSubscriber::builder()
        .with_max_level(parse_level(level))
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber).expect("Failed to set subscriber");

    info!("Starting modelshop daemon v{}", env!("CARGO_PKG_VERSION"));

    // Pick the catalog backend
    let store: Arc<dyn CatalogStore> = if args.demo {
        Arc::new(MemoryCatalogStore::seeded())
    } else {
        Arc::new(HttpCatalogStore::new(&config.store))
    };
    info!(backend = store.name(), "Catalog store ready");

    let mut router = create_router(store).layer(TraceLayer::new_for_http());

    if config.api.cors_enabled {
        let cors = if config.api.cors_origins.iter().any(|o| o == "*") {
            CorsLayer::new().allow_origin(Any).allow_methods(Any)
        } else {
            let origins: Vec<HeaderValue> = config
                .api
                .cors_origins
                .iter()
                .filter_map(|o| match o.parse::<HeaderValue>() {
                    Ok(value) => Some(value),
                    Err(_) => {
                        warn!(origin = %o, "Skipping unparsable CORS origin");
                        None
                    }
                })
                .collect();
            CorsLayer::new()
                .allow_origin(AllowOrigin::list(origins))
                .allow_methods(Any)
        };
        router = router.layer(cors);
    }

    // Bind and serve
    let addr: SocketAddr = format!("{}:{}", config.api.address, config.api.port)
        .parse()
        .expect("Invalid address");

    info!("API server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind");
    axum::serve(listener, router).await.expect("Server error");
}
