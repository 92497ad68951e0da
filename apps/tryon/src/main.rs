//! Terminal front end for a virtual try-on server.
//!
//! `tryon` lists the clothing catalog, submits a customer photo with a clothing
//! choice while drawing live progress, and records feedback.

use anyhow::Result;
use clap::{Parser, Subcommand};
use tryon_async::{Client, TryOnConfig};

mod commands;
mod terminal;

#[derive(Parser)]
#[command(name = "tryon")]
#[command(about = "Virtual try-on client")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Try-on server base URL
    #[arg(long, env = "TRYON_BASE_URL", global = true)]
    base_url: Option<String>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// List the clothing catalog
    Catalog {
        /// Output raw JSON
        #[arg(long)]
        json: bool,
    },

    /// Upload a photo and try on a clothing item
    Submit(commands::submit::SubmitArgs),

    /// Rate the last result
    Feedback {
        /// Score to record
        #[arg(long)]
        score: u8,

        /// Free-form comment
        #[arg(long, default_value = "")]
        comment: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing based on verbosity
    let level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level)),
        )
        .init();

    let mut config = TryOnConfig::new();
    if let Some(base) = cli.base_url {
        config = config.with_base_url(base);
    }
    let client = Client::with_config(config);

    match cli.command {
        Commands::Catalog { json } => commands::catalog::execute(&client, json).await,
        Commands::Submit(args) => commands::submit::execute(&client, args).await,
        Commands::Feedback { score, comment } => {
            commands::feedback::execute(&client, score, comment).await
        }
    }
}
