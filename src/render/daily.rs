use super::{LONG_DATE, TEST_PREFIX, document_head, document_tail, escape_html, prek_badge};
use crate::mail::{EmailMessage, Recipients};
use crate::model::{CategorizedMenu, DailyMenuReport, RawMenuItem};
use crate::normalize::{is_entree_category, title_case};

/// Display position of the known categories; everything else follows.
const CANONICAL_ORDER: [&str; 4] = ["entrees", "vegetables", "fruits", "milk"];

const STYLE: &str = "\
body { font-family: 'Segoe UI', Tahoma, Geneva, Verdana, sans-serif; line-height: 1.6; color: #333; max-width: 600px; margin: 0 auto; padding: 20px; background-color: #f9f9f9; }
.container { background-color: white; border-radius: 10px; padding: 30px; }
.header { text-align: center; border-bottom: 3px solid #4CAF50; padding-bottom: 20px; margin-bottom: 30px; }
.header h1 { color: #2E7D32; margin: 0; font-size: 24px; }
.header p { color: #666; margin: 5px 0 0 0; font-size: 16px; }
.category { margin: 25px 0; border-left: 4px solid #4CAF50; padding-left: 15px; }
.category h2 { color: #2E7D32; margin: 0 0 10px 0; font-size: 18px; }
.menu-item { background-color: #f8f9fa; border-radius: 8px; padding: 15px; margin: 10px 0; }
.item-name { font-weight: bold; color: #1B5E20; font-size: 16px; }
.item-details { font-size: 14px; color: #555; margin: 3px 0; }
.allergens { background-color: #FFF3E0; border-radius: 4px; padding: 5px 8px; margin-top: 8px; font-size: 12px; color: #E65100; }
.prek-badge { background-color: #E3F2FD; color: #1565C0; border-radius: 4px; padding: 1px 6px; font-size: 12px; }
.no-menu { text-align: center; padding: 30px; background-color: #f8f9fa; border-radius: 8px; }
.test-banner { background-color: #FFF3E0; border: 2px solid #FF9800; border-radius: 8px; padding: 15px; margin-bottom: 20px; text-align: center; color: #E65100; font-weight: bold; }
.footer { text-align: center; margin-top: 30px; padding-top: 20px; border-top: 1px solid #ddd; font-size: 12px; color: #666; }
";

pub fn daily_subject(report: &DailyMenuReport) -> String {
    let prefix = if report.test_run { TEST_PREFIX } else { "" };
    format!("{}Lunch Menu for {}", prefix, report.date.format(LONG_DATE))
}

/// Categories in display order: Entrees, Vegetables, Fruits, Milk, then the rest
/// in first-seen order. Matching is case-insensitive.
pub fn display_order(menu: &CategorizedMenu) -> Vec<(&str, &[RawMenuItem])> {
    let mut categories: Vec<(usize, (&str, &[RawMenuItem]))> = menu
        .categories()
        .enumerate()
        .map(|(seen, category)| (rank(category.0).unwrap_or(CANONICAL_ORDER.len() + seen), category))
        .collect();
    categories.sort_by_key(|(key, _)| *key);
    categories.into_iter().map(|(_, category)| category).collect()
}

fn rank(label: &str) -> Option<usize> {
    if is_entree_category(label) {
        return Some(0);
    }
    let label = label.trim().to_lowercase();
    CANONICAL_ORDER.iter().position(|known| *known == label)
}

pub fn render_daily(report: &DailyMenuReport) -> String {
    let subject = daily_subject(report);
    let mut html = document_head(&subject, STYLE);
    html.push_str("<div class=\"container\">\n");

    if report.test_run {
        html.push_str(
            "<div class=\"test-banner\">This is a test email - the menu shown is for today, not tomorrow</div>\n",
        );
    }

    html.push_str(&format!(
        "<div class=\"header\">\n<h1>School Lunch Menu</h1>\n<p>{}</p>\n</div>\n",
        report.date.format(LONG_DATE)
    ));

    if report.menu.is_empty() {
        html.push_str(NO_MENU);
    } else {
        for (label, items) in display_order(&report.menu) {
            if items.is_empty() {
                continue;
            }
            html.push_str(&format!(
                "<div class=\"category\">\n<h2>{}</h2>\n",
                escape_html(&title_case(label))
            ));
            for item in items {
                render_item(&mut html, item);
            }
            html.push_str("</div>\n");
        }
    }

    html.push_str("</div>\n");
    html.push_str(&document_tail());
    html
}

const NO_MENU: &str = r#"<div class="no-menu">
<h2>No Menu Available</h2>
<p>There's no menu available for this date. This could be because:</p>
<ul>
<li>It's a weekend (no school)</li>
<li>It's a holiday</li>
<li>The menu hasn't been published yet</li>
</ul>
</div>
"#;

fn render_item(html: &mut String, item: &RawMenuItem) {
    let serving = if item.serving_size.is_empty() {
        "Not listed".to_string()
    } else {
        escape_html(&item.serving_size)
    };
    let allergens = if item.allergens.is_empty() {
        "None listed".to_string()
    } else {
        escape_html(&item.allergens.join(", "))
    };

    html.push_str(&format!(
        "<div class=\"menu-item\">\n\
         <div class=\"item-name\">{}{}</div>\n\
         <div class=\"item-details\">Serving Size: {}</div>\n\
         <div class=\"item-details\">Calories: {}</div>\n\
         <div class=\"allergens\">Allergens: {}</div>\n\
         </div>\n",
        escape_html(&item.name),
        prek_badge(item.is_prek),
        serving,
        item.calories,
        allergens
    ));
}

pub fn daily_message(report: &DailyMenuReport, recipients: Recipients) -> EmailMessage {
    EmailMessage {
        subject: daily_subject(report),
        html_body: render_daily(report),
        recipients,
    }
}
