use serde::{Deserialize, Serialize};
use std::fmt;

/// Calorie count for an item. Missing upstream values stay `Absent` and are
/// never coerced to zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "Option<u32>", into = "Option<u32>")]
pub enum Calories {
    Present(u32),
    #[default]
    Absent,
}

impl Calories {
    pub fn is_present(&self) -> bool {
        matches!(self, Calories::Present(_))
    }
}

impl From<Option<u32>> for Calories {
    fn from(value: Option<u32>) -> Self {
        value.map_or(Calories::Absent, Calories::Present)
    }
}

impl From<Calories> for Option<u32> {
    fn from(value: Calories) -> Self {
        match value {
            Calories::Present(n) => Some(n),
            Calories::Absent => None,
        }
    }
}

impl fmt::Display for Calories {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Calories::Present(n) => write!(f, "{}", n),
            Calories::Absent => write!(f, "N/A"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawMenuItem {
    pub name: String,
    pub category: String,

    #[serde(default)]
    pub serving_size: String,

    #[serde(default)]
    pub calories: Calories,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub allergens: Vec<String>,

    #[serde(default)]
    pub is_prek: bool,
}

impl RawMenuItem {
    pub fn new(name: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            category: category.into(),
            serving_size: String::new(),
            calories: Calories::Absent,
            allergens: Vec::new(),
            is_prek: false,
        }
    }

    pub fn with_serving_size(mut self, serving_size: impl Into<String>) -> Self {
        self.serving_size = serving_size.into();
        self
    }

    pub fn with_calories(mut self, calories: impl Into<Calories>) -> Self {
        self.calories = calories.into();
        self
    }

    pub fn with_allergens<I, S>(mut self, allergens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.allergens = allergens.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_prek(mut self, is_prek: bool) -> Self {
        self.is_prek = is_prek;
        self
    }

    /// Identity used for de-duplication within a category.
    pub fn dedup_key(&self) -> (&str, &str) {
        (&self.name, &self.serving_size)
    }
}

impl From<u32> for Calories {
    fn from(value: u32) -> Self {
        Calories::Present(value)
    }
}
