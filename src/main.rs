//! Inventory catalog server.
//!
//! Main entry point that loads configuration, selects the store, and starts
//! the HTTP API. `hash-password` prints an Argon2id hash for an account entry.

use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, fmt};

use inventory_auth::PasswordHasher;
use inventory_core::config::AppConfig;
use inventory_core::error::AppError;
use inventory_core::traits::SystemClock;
use inventory_database::CatalogStores;

/// Inventory catalog server.
#[derive(Debug, Parser)]
#[command(name = "inventory-server", version, about)]
struct Cli {
    /// Directory holding `default.toml` and the environment overlays.
    #[arg(long, env = "INVENTORY_CONFIG_DIR", default_value = "config")]
    config_dir: String,

    /// Environment overlay to merge over `default.toml`.
    #[arg(long, env = "INVENTORY_ENV", default_value = "development")]
    env: String,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Start the HTTP server (default).
    Serve,
    /// Print the Argon2id hash of a password for use in `[[auth.accounts]]`.
    HashPassword {
        /// The password to hash.
        password: String,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Some(Command::HashPassword { password }) = &cli.command {
        match PasswordHasher::new().hash_password(password) {
            Ok(hash) => println!("{hash}"),
            Err(e) => {
                eprintln!("Error: {e}");
                std::process::exit(1);
            }
        }
        return;
    }

    let config = match AppConfig::load(&cli.config_dir, &cli.env) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config).await {
        tracing::error!("Server error: {e}");
        std::process::exit(1);
    }
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_thread_ids(true)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
    }
}

async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting inventory catalog v{}", env!("CARGO_PKG_VERSION"));

    let stores = CatalogStores::connect(&config.database).await?;
    let state = inventory_api::build_state(
        config,
        stores,
        Arc::new(SystemClock),
        PasswordHasher::new(),
    )?;

    inventory_api::run_server(state).await
}
