use anyhow::{Context, Result};
use chrono::NaiveDate;
use colored::Colorize;

use super::CommandContext;
use crate::api::MenuFetcher;
use crate::model::DailyMenuReport;
use crate::notifier::build_daily_report;
use crate::render::display_order;
use crate::schedule;

/// Parameters for fetch operation
pub struct FetchParams {
    pub date: Option<NaiveDate>,
    pub json: bool,
}

pub fn handle_fetch(ctx: &CommandContext, params: FetchParams) -> Result<()> {
    let date = params
        .date
        .unwrap_or_else(|| schedule::daily_target(ctx.today, ctx.config.test_run));

    let fetcher = MenuFetcher::new(&ctx.config.api).context("Failed to set up menu API client")?;
    let report = build_daily_report(&fetcher, &ctx.config, date).context("Failed to fetch menu data")?;

    if params.json {
        let output = serde_json::json!({
            "date": report.date,
            "categories": report.menu,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        print_menu(&report);
    }
    Ok(())
}

fn print_menu(report: &DailyMenuReport) {
    println!("{}", report.date.format("%A, %B %-d, %Y").to_string().bold());

    if report.menu.is_empty() {
        println!("No menu available.");
        return;
    }

    for (label, items) in display_order(&report.menu) {
        println!("\n{}", label.cyan().bold());
        for item in items {
            let prek = if item.is_prek {
                format!(" {}", "[Pre-K]".magenta())
            } else {
                String::new()
            };
            println!("  {}{}", item.name, prek);

            let mut details = vec![format!("calories: {}", item.calories)];
            if !item.serving_size.is_empty() {
                details.push(item.serving_size.clone());
            }
            if !item.allergens.is_empty() {
                details.push(format!("allergens: {}", item.allergens.join(", ")));
            }
            println!("    {}", details.join(" | ").dimmed());
        }
    }
}
