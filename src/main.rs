//! `ardalis` — profile links and a recent-activity feed in the terminal.

use anyhow::Context;
use ardalis_cli::urls::{self, ProfileTarget};
use ardalis_cli::AppConfig;
use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process::ExitCode;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(
    name = "ardalis",
    about = "Steve \"Ardalis\" Smith in your terminal: links and recent activity",
    version,
    propagate_version = true
)]
struct Cli {
    /// Log filter for diagnostics on stderr (e.g. `warn`, `ardalis_cli=debug`)
    #[arg(long, global = true, env = "ARDALIS_LOG", default_value = "error")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the five most recent items across blog, YouTube, GitHub and Bluesky
    Recent {
        /// Fetch sources one by one and report each source's result
        #[arg(long)]
        verbose: bool,
    },

    /// Open a profile link in the browser
    Open {
        #[arg(value_enum)]
        target: ProfileTarget,
    },

    /// List every profile link
    Urls,

    /// Show the business card
    Card,

    /// Print a random quote
    Quote,

    /// Print a random coding tip
    Tip,
}

/// Logs go to stderr so they never interleave with table output.
fn init_tracing(level: &str) {
    let filter = EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("error"));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact().with_writer(std::io::stderr))
        .init();
}

#[tokio::main]
async fn main() -> ExitCode {
    // Load .env for local overrides; missing file is fine.
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    init_tracing(&cli.log_level);

    match run(cli.command).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{} {:#}", "error:".red().bold(), e);
            ExitCode::FAILURE
        }
    }
}

async fn run(command: Commands) -> anyhow::Result<ExitCode> {
    match command {
        Commands::Recent { verbose } => {
            let cfg = AppConfig::load_default().context("loading configuration")?;
            ardalis_cli::run_recent(&cfg, verbose).await?;
            Ok(ExitCode::SUCCESS)
        }
        Commands::Open { target } => match urls::open_in_browser(target.url()) {
            Ok(()) => Ok(ExitCode::SUCCESS),
            Err(e) => {
                println!("{} {:#}", "Failed to open URL:".red(), e);
                Ok(ExitCode::FAILURE)
            }
        },
        Commands::Urls => {
            for target in ProfileTarget::value_variants() {
                println!("{} {}", format!("{:<12}", target.label()).bold(), target.url());
            }
            Ok(ExitCode::SUCCESS)
        }
        Commands::Card => {
            ardalis_cli::card::print_card();
            Ok(ExitCode::SUCCESS)
        }
        Commands::Quote => {
            let cfg = AppConfig::load_default().context("loading configuration")?;
            ardalis_cli::run_quote(&cfg).await?;
            Ok(ExitCode::SUCCESS)
        }
        Commands::Tip => {
            let cfg = AppConfig::load_default().context("loading configuration")?;
            ardalis_cli::run_tip(&cfg).await?;
            Ok(ExitCode::SUCCESS)
        }
    }
}
