use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "menu-notifier")]
#[command(
    author,
    version,
    about = "Emails school lunch menus fetched from SchoolCafe"
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Also write JSON logs to this file (rotated daily)
    #[arg(long, global = true, env = "MENU_NOTIFIER_LOG_FILE")]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Email tomorrow's full menu (today's with TEST_RUN=true)
    Daily {
        /// Menu date to use instead of tomorrow (YYYY-MM-DD)
        #[arg(long)]
        date: Option<NaiveDate>,

        /// Print the rendered HTML instead of sending it
        #[arg(long)]
        dry_run: bool,
    },

    /// Email an entree-only overview of the upcoming school week
    Weekly {
        /// First day of the week to cover instead of next Monday (YYYY-MM-DD)
        #[arg(long)]
        start: Option<NaiveDate>,

        /// Print the rendered HTML instead of sending it
        #[arg(long)]
        dry_run: bool,
    },

    /// Fetch and print a normalized menu without sending anything
    Fetch {
        /// Menu date (defaults to the daily target date)
        #[arg(long)]
        date: Option<NaiveDate>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the effective configuration with secrets masked
    CheckConfig,
}
