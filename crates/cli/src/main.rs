//! Reelbox CLI - Database migrations.
//!
//! # Usage
//!
//! ```bash
//! # Create the movie site schema and the session table
//! reelbox-cli migrate
//!
//! # Show which migrations have been applied
//! reelbox-cli migrate --status
//! ```
//!
//! # Commands
//!
//! - `migrate` - Run database migrations

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "reelbox-cli")]
#[command(author, version, about = "Reelbox CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the movie site database migrations
    Migrate {
        /// List applied migrations instead of running them
        #[arg(long)]
        status: bool,
    },
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), commands::migrate::MigrationError> {
    match cli.command {
        Commands::Migrate { status: true } => commands::migrate::status().await,
        Commands::Migrate { status: false } => commands::migrate::run().await,
    }
}
