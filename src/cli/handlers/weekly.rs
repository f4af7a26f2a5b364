use anyhow::{Context, Result};
use chrono::NaiveDate;
use tracing::info;

use super::CommandContext;
use super::utils::{mail_settings, recipients_for, send_message};
use crate::api::MenuFetcher;
use crate::notifier::build_weekly_report;
use crate::render::{render_weekly, weekly_message};
use crate::schedule;

/// Parameters for the weekly run
pub struct WeeklyParams {
    pub start: Option<NaiveDate>,
    pub dry_run: bool,
}

pub fn handle_weekly(ctx: &CommandContext, params: WeeklyParams) -> Result<()> {
    let mail = mail_settings(ctx, params.dry_run).context("Email configuration incomplete")?;

    let dates = match params.start {
        Some(start) => schedule::week_starting(start),
        None => schedule::week_dates(ctx.today, ctx.config.test_run),
    };
    if dates.is_empty() {
        anyhow::bail!("No school days in the requested week");
    }

    let fetcher = MenuFetcher::new(&ctx.config.api).context("Failed to set up menu API client")?;
    let report =
        build_weekly_report(&fetcher, &ctx.config, &dates).context("Failed to fetch weekly menu data")?;

    match mail {
        None => print!("{}", render_weekly(&report)),
        Some(mail) => {
            let message = weekly_message(&report, recipients_for(ctx, mail));
            send_message(ctx, mail, &message).context("Failed to send menu notification")?;
        }
    }
    info!("Weekly menu notification completed");
    Ok(())
}
