//! Data models for menu notifications.
//!
//! - [`RawMenuItem`]: one dish as reported by the menu API
//! - [`Calories`]: explicit present/absent calorie value
//! - [`MenuQuery`]: which menu to fetch
//! - [`CategorizedMenu`]: items grouped by category in first-seen order
//! - [`DailyMenuReport`] / [`WeeklyMenuReport`]: inputs to the email renderer

mod item;
mod report;

pub use item::{Calories, RawMenuItem};
pub use report::{CategorizedMenu, DailyMenuReport, MenuQuery, WeeklyDay, WeeklyMenuReport};
