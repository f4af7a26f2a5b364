//! HTML email rendering.
//!
//! Rendering is a pure function of the report: no clock, no I/O, and no
//! iteration over unordered collections, so the same report always yields
//! byte-identical output.

mod daily;
mod weekly;

pub use daily::{daily_message, daily_subject, display_order, render_daily};
pub use weekly::{render_weekly, weekly_message, weekly_subject};

/// Long date used in headers: `Monday, October 19, 2026`.
pub(crate) const LONG_DATE: &str = "%A, %B %-d, %Y";

pub(crate) const TEST_PREFIX: &str = "[TEST] ";

pub(crate) const FOOTER: &str = r#"<div class="footer">
<p>Data provided by SchoolCafe</p>
<p>This email was generated automatically by menu-notifier.</p>
</div>
"#;

/// Escape text for insertion into HTML element content or attribute values.
pub fn escape_html(input: &str) -> String {
    let mut output = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => output.push_str("&amp;"),
            '<' => output.push_str("&lt;"),
            '>' => output.push_str("&gt;"),
            '"' => output.push_str("&quot;"),
            '\'' => output.push_str("&#x27;"),
            _ => output.push(ch),
        }
    }
    output
}

pub(crate) fn document_head(title: &str, style: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"UTF-8\">\n\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n\
         <title>{}</title>\n<style>\n{}</style>\n</head>\n<body>\n",
        escape_html(title),
        style
    )
}

pub(crate) fn document_tail() -> String {
    format!("{}</body>\n</html>\n", FOOTER)
}

pub(crate) fn prek_badge(is_prek: bool) -> &'static str {
    if is_prek {
        r#" <span class="prek-badge">Pre-K</span>"#
    } else {
        ""
    }
}
