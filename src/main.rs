use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, warn};

use menu_notifier::cli::handlers::{
    CommandContext, DailyParams, FetchParams, WeeklyParams, handle_check_config, handle_daily,
    handle_fetch, handle_weekly,
};
use menu_notifier::cli::{Cli, Commands};
use menu_notifier::config::{Config, load_dotenv};

fn main() -> Result<()> {
    let cli = Cli::parse();
    // Before logging so RUST_LOG and MENU_NOTIFIER_LOG_FILE may come from `.env`
    let dotenv = load_dotenv();
    let log_file = cli
        .log_file
        .clone()
        .or_else(|| std::env::var_os("MENU_NOTIFIER_LOG_FILE").map(PathBuf::from));
    menu_notifier::logging::init(cli.verbose, log_file);

    match dotenv {
        Ok(Some(path)) => info!("Loaded environment overrides from {}", path.display()),
        Ok(None) => {}
        Err(e) => warn!("Ignoring unreadable .env file: {}", e),
    }

    let config = Config::from_env().context("Failed to load configuration")?;
    config.log_summary();
    let ctx = CommandContext::new(config);

    match cli.command {
        Commands::Daily { date, dry_run } => handle_daily(&ctx, DailyParams { date, dry_run }),
        Commands::Weekly { start, dry_run } => handle_weekly(&ctx, WeeklyParams { start, dry_run }),
        Commands::Fetch { date, json } => handle_fetch(&ctx, FetchParams { date, json }),
        Commands::CheckConfig => handle_check_config(&ctx),
    }
}
