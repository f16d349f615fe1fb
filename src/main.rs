mod commands;
mod render;
mod utils;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::Salon;

#[derive(Parser)]
#[command(name = "salon")]
#[command(about = "Browse the salon's staff, their services and free times")]
struct Cli {
    /// Config file (defaults to ~/.config/salon/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Booking API root, overrides the config file
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Log requests and state changes to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the salon's staff
    Resources,
    /// Show opening hours with today highlighted
    Hours,
    /// List the services a staff member offers
    Services {
        /// Resource key or first name (e.g. "QN225Q" or "sofia")
        resource: String,
    },
    /// Show free times for one service, one week at a time
    Schedule {
        /// Resource key or first name
        resource: String,

        /// Service id (see `salon services <resource>`)
        service_id: u32,

        /// Show the week containing this date (YYYY-MM-DD, defaults to today)
        #[arg(long)]
        date: Option<String>,

        /// Move this many weeks forward (negative for backward)
        #[arg(long, default_value_t = 0, allow_hyphen_values = true)]
        weeks: i64,
    },
    /// Pick a staff member, a service and a week interactively
    Browse,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    utils::logging::init_logging(cli.verbose);

    let salon = Salon::load(cli.config.as_deref(), cli.base_url)?;

    match cli.command {
        Commands::Resources => commands::resources::run(&salon),
        Commands::Hours => commands::hours::run(&salon),
        Commands::Services { resource } => commands::services::run(&salon, &resource).await,
        Commands::Schedule {
            resource,
            service_id,
            date,
            weeks,
        } => commands::schedule::run(&salon, &resource, service_id, date, weeks).await,
        Commands::Browse => commands::browse::run(&salon).await,
    }
}
