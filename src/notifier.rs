//! The fetch → normalize → report pipeline shared by the daily and weekly runs.

use chrono::NaiveDate;
use tracing::{info, warn};

use crate::api::MenuSource;
use crate::config::{ApiSettings, Config};
use crate::error::Result;
use crate::model::{CategorizedMenu, DailyMenuReport, MenuQuery, WeeklyDay, WeeklyMenuReport};
use crate::normalize::{mark_prek_entrees, normalize, reduce_to_entrees};

/// Fetch and normalize one day's full menu.
///
/// A day without a menu yields an empty report, not an error.
pub fn build_daily_report<S: MenuSource + ?Sized>(
    source: &S,
    config: &Config,
    date: NaiveDate,
) -> Result<DailyMenuReport> {
    let query = MenuQuery::new(&config.school, date);
    let mut menu = normalize(source.fetch(&query)?);

    if !menu.is_empty() {
        cross_reference_prek(source, &config.api, &query, &mut menu);
    }
    info!(
        "Normalized {} item(s) in {} categories for {}",
        menu.item_count(),
        menu.category_count(),
        query.serving_date()
    );

    Ok(DailyMenuReport {
        date,
        menu,
        test_run: config.test_run,
    })
}

/// Fetch each date and keep only its entrées.
pub fn build_weekly_report<S: MenuSource + ?Sized>(
    source: &S,
    config: &Config,
    dates: &[NaiveDate],
) -> Result<WeeklyMenuReport> {
    let menus = source.fetch_range(&config.school, dates)?;

    let mut days = Vec::with_capacity(menus.len());
    for (date, items) in menus {
        let query = MenuQuery::new(&config.school, date);
        let mut menu = normalize(items);
        if !menu.is_empty() {
            cross_reference_prek(source, &config.api, &query, &mut menu);
        }
        let entrees = reduce_to_entrees(&menu);
        info!(
            "Found {} entree(s) for {}",
            entrees.len(),
            date.format("%A")
        );
        days.push(WeeklyDay { date, entrees });
    }

    let report = WeeklyMenuReport {
        days,
        test_run: config.test_run,
    };
    info!(
        "Weekly menu has {} entree(s) across {} day(s)",
        report.entree_count(),
        report.days.len()
    );
    Ok(report)
}

/// Flag entrées shared with the PreK menu. Failures here only cost the badge,
/// so they are logged and ignored.
fn cross_reference_prek<S: MenuSource + ?Sized>(
    source: &S,
    api: &ApiSettings,
    query: &MenuQuery,
    menu: &mut CategorizedMenu,
) {
    if query.grade.eq_ignore_ascii_case(&api.prek_grade) {
        return;
    }
    let prek_query = query.with_grade_and_line(&api.prek_grade, &api.prek_serving_line);
    match source.fetch(&prek_query) {
        Ok(prek_items) => {
            if mark_prek_entrees(menu, &prek_items) == 0 {
                info!("No matching PreK entree for {}", query.serving_date());
            }
        }
        Err(e) => warn!(
            "Could not fetch PreK menu for {}: {}",
            query.serving_date(),
            e
        ),
    }
}
