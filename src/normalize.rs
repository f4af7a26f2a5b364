//! Turns flat API items into a [`CategorizedMenu`].

use std::collections::HashSet;

use tracing::{debug, info};

use crate::model::{CategorizedMenu, RawMenuItem};

/// Whether a category label names the entrée group ("Entrees", "ENTREES", "Entrée").
pub fn is_entree_category(label: &str) -> bool {
    let label = label.trim().to_lowercase().replace('é', "e");
    label == "entrees" || label == "entree"
}

/// Group items by exact category label, keeping first-seen order.
///
/// Within a category a repeated `(name, serving_size)` pair is dropped; if the
/// dropped copy was flagged PreK the kept entry takes over the flag. Allergens
/// are canonicalized and sorted on every kept item.
pub fn normalize(items: Vec<RawMenuItem>) -> CategorizedMenu {
    let mut menu = CategorizedMenu::new();
    let mut dropped = 0;

    for mut item in items {
        item.allergens = canonical_allergens(&item.allergens);
        let entries = menu.entry(&item.category);
        match entries
            .iter_mut()
            .find(|existing| existing.dedup_key() == item.dedup_key())
        {
            Some(existing) => {
                existing.is_prek |= item.is_prek;
                dropped += 1;
            }
            None => entries.push(item),
        }
    }

    if dropped > 0 {
        debug!("Dropped {} duplicate menu item(s)", dropped);
    }
    menu
}

/// Title-case each allergen, then sort and de-duplicate the list.
pub fn canonical_allergens(allergens: &[String]) -> Vec<String> {
    let mut out: Vec<String> = allergens
        .iter()
        .map(|a| title_case(a))
        .filter(|a| !a.is_empty())
        .collect();
    out.sort();
    out.dedup();
    out
}

/// `"tree NUTS"` -> `"Tree Nuts"`; inner whitespace collapses to one space.
pub fn title_case(text: &str) -> String {
    text.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first
                    .to_uppercase()
                    .chain(chars.flat_map(char::to_lowercase))
                    .collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Only the entrée items of a menu, in menu order. Empty when the menu has no
/// entrée category.
pub fn reduce_to_entrees(menu: &CategorizedMenu) -> Vec<RawMenuItem> {
    menu.categories()
        .filter(|(label, _)| is_entree_category(label))
        .flat_map(|(_, items)| items.iter().cloned())
        .collect()
}

/// Flag main-line entrées that also appear on the PreK menu for the same day.
///
/// Returns the number of entrées flagged.
pub fn mark_prek_entrees(menu: &mut CategorizedMenu, prek_items: &[RawMenuItem]) -> usize {
    let prek_names: HashSet<&str> = prek_items
        .iter()
        .filter(|item| is_entree_category(&item.category))
        .map(|item| item.name.as_str())
        .collect();
    if prek_names.is_empty() {
        return 0;
    }

    let mut flagged = 0;
    for item in menu.items_mut() {
        if is_entree_category(&item.category) && prek_names.contains(item.name.as_str()) {
            if !item.is_prek {
                info!("PreK entree identified: {}", item.name);
            }
            item.is_prek = true;
            flagged += 1;
        }
    }
    flagged
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Calories;

    fn item(name: &str, category: &str) -> RawMenuItem {
        RawMenuItem::new(name, category).with_serving_size("1 each")
    }

    #[test]
    fn test_groups_in_first_seen_order() {
        let menu = normalize(vec![
            item("Corn", "Vegetables"),
            item("Pizza", "Entrees"),
            item("Peas", "Vegetables"),
        ]);
        let labels: Vec<_> = menu.categories().map(|(l, _)| l).collect();
        assert_eq!(labels, vec!["Vegetables", "Entrees"]);
        let veg: Vec<_> = menu
            .get("Vegetables")
            .unwrap()
            .iter()
            .map(|i| i.name.as_str())
            .collect();
        assert_eq!(veg, vec!["Corn", "Peas"]);
    }

    #[test]
    fn test_category_match_is_exact() {
        let menu = normalize(vec![item("Pizza", "ENTREES"), item("Tacos", "Entrees")]);
        assert_eq!(menu.category_count(), 2);
    }

    #[test]
    fn test_duplicates_removed_keeping_first() {
        let menu = normalize(vec![
            item("Pizza", "Entrees").with_calories(Calories::Present(350)),
            item("Burger", "Entrees"),
            item("Pizza", "Entrees").with_calories(Calories::Present(999)),
        ]);
        let entrees = menu.get("Entrees").unwrap();
        assert_eq!(entrees.len(), 2);
        assert_eq!(entrees[0].name, "Pizza");
        assert_eq!(entrees[0].calories, Calories::Present(350));
        assert_eq!(entrees[1].name, "Burger");
    }

    #[test]
    fn test_different_serving_size_is_not_duplicate() {
        let menu = normalize(vec![
            item("Milk", "Milk"),
            item("Milk", "Milk").with_serving_size("8 oz"),
        ]);
        assert_eq!(menu.get("Milk").unwrap().len(), 2);
    }

    #[test]
    fn test_prek_duplicate_merges_flag() {
        let menu = normalize(vec![
            item("Pizza", "Entrees")
                .with_calories(Calories::Present(350))
                .with_allergens(["wheat", "milk"]),
            item("Pizza", "Entrees").with_prek(true),
        ]);
        let entrees = menu.get("Entrees").unwrap();
        assert_eq!(entrees.len(), 1);
        assert!(entrees[0].is_prek);
        assert_eq!(entrees[0].allergens, vec!["Milk", "Wheat"]);
    }

    #[test]
    fn test_absent_calories_preserved() {
        let menu = normalize(vec![item("Apple", "Fruits")]);
        assert_eq!(menu.get("Fruits").unwrap()[0].calories, Calories::Absent);
    }

    #[test]
    fn test_allergens_canonicalized() {
        let allergens = vec![
            "tree NUTS".to_string(),
            " soy".to_string(),
            "Soy".to_string(),
            "EGG".to_string(),
            "".to_string(),
        ];
        assert_eq!(canonical_allergens(&allergens), vec!["Egg", "Soy", "Tree Nuts"]);
    }

    #[test]
    fn test_reduce_to_entrees() {
        let menu = normalize(vec![
            item("Corn", "VEGETABLES"),
            item("Pizza", "ENTREES"),
            item("Tacos", "ENTREES"),
        ]);
        let names: Vec<_> = reduce_to_entrees(&menu)
            .into_iter()
            .map(|i| i.name)
            .collect();
        assert_eq!(names, vec!["Pizza", "Tacos"]);
    }

    #[test]
    fn test_reduce_without_entrees_is_empty() {
        let menu = normalize(vec![item("Corn", "Vegetables"), item("Milk", "Milk")]);
        assert!(reduce_to_entrees(&menu).is_empty());
        assert!(reduce_to_entrees(&CategorizedMenu::new()).is_empty());
    }

    #[test]
    fn test_entree_category_variants() {
        assert!(is_entree_category("ENTREES"));
        assert!(is_entree_category("Entrée"));
        assert!(is_entree_category(" entrees "));
        assert!(!is_entree_category("Side Entrees"));
    }

    #[test]
    fn test_mark_prek_entrees_by_name() {
        let mut menu = normalize(vec![
            item("Pizza", "ENTREES"),
            item("Chicken Nuggets", "ENTREES"),
            item("Corn", "VEGETABLES"),
        ]);
        let prek = vec![
            RawMenuItem::new("Chicken Nuggets", "ENTREES"),
            RawMenuItem::new("Corn", "VEGETABLES"),
        ];
        assert_eq!(mark_prek_entrees(&mut menu, &prek), 1);
        let entrees = menu.get("ENTREES").unwrap();
        assert!(!entrees[0].is_prek);
        assert!(entrees[1].is_prek);
        assert!(!menu.get("VEGETABLES").unwrap()[0].is_prek);
    }

    #[test]
    fn test_mark_prek_without_prek_menu_is_noop() {
        let mut menu = normalize(vec![item("Pizza", "ENTREES")]);
        assert_eq!(mark_prek_entrees(&mut menu, &[]), 0);
        assert!(!menu.get("ENTREES").unwrap()[0].is_prek);
    }
}
