//! Tolerant parsing of the menu API payload.
//!
//! The provider owns the wire schema, so unknown fields are ignored and every
//! optional field may be missing, null, a string or a number.

use std::sync::LazyLock;

use regex::Regex;
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::error::FetchError;
use crate::model::{Calories, RawMenuItem};

static PREK_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)pre[\s-]?k").expect("PreK pattern is valid"));

/// Substring heuristic for PreK labels ("PreK", "Pre-K", "Pre K", "pre-kindergarten").
///
/// Matching is purely textual, so upstream renames of items or categories
/// will silently change what gets flagged.
pub fn is_prek_label(label: &str) -> bool {
    PREK_PATTERN.is_match(label)
}

#[derive(Debug, Default, Deserialize)]
struct WireItem {
    #[serde(rename = "MenuItemDescription", default)]
    name: Option<String>,

    #[serde(rename = "ServingSizeByGrade", default)]
    serving_size: Option<Value>,

    #[serde(rename = "Calories", default)]
    calories: Option<Value>,

    #[serde(rename = "Allergens", default)]
    allergens: Option<Value>,

    #[serde(rename = "IsPreK", default)]
    prek: Option<Value>,
}

/// Parse a response body into flat menu items, in payload order.
///
/// An empty body, `null`, `{}` or `[]` is a day without a menu and yields an
/// empty list.
pub fn parse_menu_payload(body: &str) -> Result<Vec<RawMenuItem>, FetchError> {
    let body = body.trim();
    if body.is_empty() {
        return Ok(Vec::new());
    }

    let value: Value =
        serde_json::from_str(body).map_err(|e| FetchError::Payload(e.to_string()))?;

    let categories = match value {
        Value::Null => return Ok(Vec::new()),
        Value::Array(entries) if entries.is_empty() => return Ok(Vec::new()),
        Value::Object(map) => map,
        other => {
            return Err(FetchError::Payload(format!(
                "expected an object of menu categories, got {}",
                value_kind(&other)
            )));
        }
    };

    let mut items = Vec::new();
    for (category, entries) in categories {
        let Value::Array(entries) = entries else {
            debug!("Skipping non-list category {}", category);
            continue;
        };
        for entry in entries {
            if let Some(item) = parse_entry(&category, entry) {
                items.push(item);
            }
        }
    }
    Ok(items)
}

fn parse_entry(category: &str, entry: Value) -> Option<RawMenuItem> {
    if !entry.is_object() {
        debug!("Skipping non-object entry in {}", category);
        return None;
    }
    let wire: WireItem = match serde_json::from_value(entry) {
        Ok(wire) => wire,
        Err(e) => {
            debug!("Skipping unreadable entry in {}: {}", category, e);
            return None;
        }
    };

    let name = wire.name.map(|n| n.trim().to_string()).unwrap_or_default();
    if name.is_empty() {
        debug!("Skipping entry without a name in {}", category);
        return None;
    }

    let is_prek = wire.prek.as_ref().is_some_and(truthy)
        || is_prek_label(&name)
        || is_prek_label(category);

    Some(RawMenuItem {
        serving_size: wire.serving_size.as_ref().map(text).unwrap_or_default(),
        calories: wire
            .calories
            .as_ref()
            .map_or(Calories::Absent, parse_calories),
        allergens: wire.allergens.as_ref().map(split_allergens).unwrap_or_default(),
        is_prek,
        category: category.to_string(),
        name,
    })
}

fn text(value: &Value) -> String {
    match value {
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => n.to_string(),
        _ => String::new(),
    }
}

fn parse_calories(value: &Value) -> Calories {
    let number = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    match number {
        Some(n) if n.is_finite() && n >= 0.0 && n <= f64::from(u32::MAX) => {
            Calories::Present(n.round() as u32)
        }
        _ => Calories::Absent,
    }
}

fn split_allergens(value: &Value) -> Vec<String> {
    let raw: Vec<&str> = match value {
        Value::String(s) => s.split(',').collect(),
        Value::Array(list) => list.iter().filter_map(Value::as_str).collect(),
        _ => Vec::new(),
    };
    raw.into_iter()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

fn truthy(value: &Value) -> bool {
    match value {
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_i64() == Some(1),
        Value::String(s) => matches!(
            s.trim().to_ascii_lowercase().as_str(),
            "true" | "y" | "yes" | "1"
        ),
        _ => false,
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "an object",
    }
}
