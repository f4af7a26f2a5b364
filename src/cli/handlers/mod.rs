mod check_config;
mod daily;
mod fetch;
mod utils;
mod weekly;

pub use check_config::handle_check_config;
pub use daily::{DailyParams, handle_daily};
pub use fetch::{FetchParams, handle_fetch};
pub use weekly::{WeeklyParams, handle_weekly};

use chrono::{Local, NaiveDate};

use crate::config::Config;

/// Common context passed to all command handlers
pub struct CommandContext {
    pub config: Config,
    pub today: NaiveDate,
}

impl CommandContext {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            today: Local::now().date_naive(),
        }
    }
}
