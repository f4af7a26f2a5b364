use chrono::NaiveDate;
use serde::Serialize;
use serde::ser::SerializeMap;

use super::item::RawMenuItem;
use crate::config::SchoolSettings;

/// Date format the menu API expects for `ServingDate`.
pub const SERVING_DATE_FORMAT: &str = "%m/%d/%Y";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuQuery {
    pub school_id: String,
    pub grade: String,
    pub serving_line: String,
    pub meal_type: String,
    pub date: NaiveDate,
}

impl MenuQuery {
    pub fn new(school: &SchoolSettings, date: NaiveDate) -> Self {
        Self {
            school_id: school.school_id.clone(),
            grade: school.grade.clone(),
            serving_line: school.serving_line.clone(),
            meal_type: school.meal_type.clone(),
            date,
        }
    }

    /// Same school, meal and date, but for another grade and serving line.
    pub fn with_grade_and_line(&self, grade: &str, serving_line: &str) -> Self {
        Self {
            grade: grade.to_string(),
            serving_line: serving_line.to_string(),
            ..self.clone()
        }
    }

    pub fn serving_date(&self) -> String {
        self.date.format(SERVING_DATE_FORMAT).to_string()
    }
}

/// Items grouped by upstream category label.
///
/// Both categories and the items within them keep first-seen order. Display
/// ordering is applied by the renderer, not stored here.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategorizedMenu {
    categories: Vec<(String, Vec<RawMenuItem>)>,
}

impl CategorizedMenu {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.iter().all(|(_, items)| items.is_empty())
    }

    pub fn item_count(&self) -> usize {
        self.categories.iter().map(|(_, items)| items.len()).sum()
    }

    pub fn category_count(&self) -> usize {
        self.categories.len()
    }

    /// Items for an exact category label.
    pub fn get(&self, category: &str) -> Option<&[RawMenuItem]> {
        self.categories
            .iter()
            .find(|(label, _)| label == category)
            .map(|(_, items)| items.as_slice())
    }

    pub fn categories(&self) -> impl Iterator<Item = (&str, &[RawMenuItem])> {
        self.categories
            .iter()
            .map(|(label, items)| (label.as_str(), items.as_slice()))
    }

    pub(crate) fn items_mut(&mut self) -> impl Iterator<Item = &mut RawMenuItem> {
        self.categories
            .iter_mut()
            .flat_map(|(_, items)| items.iter_mut())
    }

    /// The item list for `category`, created at the end if not yet present.
    pub(crate) fn entry(&mut self, category: &str) -> &mut Vec<RawMenuItem> {
        let index = match self.categories.iter().position(|(label, _)| label == category) {
            Some(index) => index,
            None => {
                self.categories.push((category.to_string(), Vec::new()));
                self.categories.len() - 1
            }
        };
        &mut self.categories[index].1
    }
}

impl Serialize for CategorizedMenu {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.categories.len()))?;
        for (label, items) in &self.categories {
            map.serialize_entry(label, items)?;
        }
        map.end()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DailyMenuReport {
    pub date: NaiveDate,
    pub menu: CategorizedMenu,
    pub test_run: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeeklyDay {
    pub date: NaiveDate,
    pub entrees: Vec<RawMenuItem>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeeklyMenuReport {
    pub days: Vec<WeeklyDay>,
    pub test_run: bool,
}

impl WeeklyMenuReport {
    pub fn start(&self) -> Option<NaiveDate> {
        self.days.first().map(|d| d.date)
    }

    pub fn end(&self) -> Option<NaiveDate> {
        self.days.last().map(|d| d.date)
    }

    pub fn entree_count(&self) -> usize {
        self.days.iter().map(|d| d.entrees.len()).sum()
    }
}
