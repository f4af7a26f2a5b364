use anyhow::{Context, Result};
use chrono::NaiveDate;
use tracing::info;

use super::CommandContext;
use super::utils::{mail_settings, recipients_for, send_message};
use crate::api::MenuFetcher;
use crate::notifier::build_daily_report;
use crate::render::{daily_message, render_daily};
use crate::schedule;

/// Parameters for the daily run
pub struct DailyParams {
    pub date: Option<NaiveDate>,
    pub dry_run: bool,
}

pub fn handle_daily(ctx: &CommandContext, params: DailyParams) -> Result<()> {
    let mail = mail_settings(ctx, params.dry_run).context("Email configuration incomplete")?;

    let date = params
        .date
        .unwrap_or_else(|| schedule::daily_target(ctx.today, ctx.config.test_run));
    info!("Processing menu for {}", date.format("%A %m/%d/%Y"));

    let fetcher = MenuFetcher::new(&ctx.config.api).context("Failed to set up menu API client")?;
    let report = build_daily_report(&fetcher, &ctx.config, date).context("Failed to fetch menu data")?;
    if report.menu.is_empty() {
        info!("No menu for {} - sending the no-menu notice", date);
    }

    match mail {
        None => print!("{}", render_daily(&report)),
        Some(mail) => {
            let message = daily_message(&report, recipients_for(ctx, mail));
            send_message(ctx, mail, &message).context("Failed to send menu notification")?;
        }
    }
    info!("Daily menu notification completed");
    Ok(())
}
