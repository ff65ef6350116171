//! Helpdesk CLI - ticket store maintenance tools.
//!
//! # Usage
//!
//! ```bash
//! # Create the database file and tickets table
//! helpdesk-cli migrate
//!
//! # Write every ticket as CSV to stdout
//! helpdesk-cli export
//!
//! # Export a specific database to a file
//! helpdesk-cli export --database /srv/helpdesk/tickets.db --output tickets.csv
//! ```
//!
//! # Commands
//!
//! - `migrate` - Run database migrations
//! - `export` - Export tickets as CSV, newest first
//!
//! Both commands default to `HELPDESK_DATABASE_PATH` (or `tickets.db`).

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "helpdesk-cli")]
#[command(author, version, about = "Helpdesk ticket store tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run database migrations
    Migrate {
        /// SQLite database file
        #[arg(short, long)]
        database: Option<PathBuf>,
    },
    /// Export every ticket as CSV
    Export {
        /// SQLite database file
        #[arg(short, long)]
        database: Option<PathBuf>,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() {
    // Logs go to stderr so CSV on stdout stays clean
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "helpdesk_cli=info".into()),
        )
        .init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Migrate { database } => {
            commands::migrate::run(&resolve_database(database)).await?;
        }
        Commands::Export { database, output } => {
            commands::export::run(&resolve_database(database), output.as_deref()).await?;
        }
    }
    Ok(())
}

fn resolve_database(database: Option<PathBuf>) -> PathBuf {
    database.unwrap_or_else(helpdesk_server::config::database_path_from_env)
}
