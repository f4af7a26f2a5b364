use super::{LONG_DATE, TEST_PREFIX, document_head, document_tail, escape_html, prek_badge};
use crate::mail::{EmailMessage, Recipients};
use crate::model::{WeeklyDay, WeeklyMenuReport};

const STYLE: &str = "\
body { font-family: Arial, sans-serif; margin: 20px; color: #333; }
.header { background-color: #4CAF50; color: white; padding: 20px; text-align: center; border-radius: 5px; }
.subtitle { color: #E8F5E8; font-size: 16px; margin-top: 10px; }
.day-section { margin: 25px 0; border: 2px solid #4CAF50; border-radius: 8px; overflow: hidden; }
.day-header { background-color: #4CAF50; color: white; padding: 15px; font-size: 18px; font-weight: bold; }
.day-content { padding: 10px 20px; }
.entree { margin: 8px 0; font-weight: bold; }
.prek-badge { background-color: #E3F2FD; color: #1565C0; border-radius: 4px; padding: 1px 6px; font-size: 12px; font-weight: normal; }
.no-menu { color: #666; font-style: italic; }
.test-banner { background-color: #FF9800; color: white; padding: 10px; text-align: center; margin-bottom: 20px; border-radius: 5px; }
.footer { margin-top: 30px; text-align: center; color: #666; font-size: 12px; }
";

pub fn weekly_subject(report: &WeeklyMenuReport) -> String {
    let prefix = if report.test_run { TEST_PREFIX } else { "" };
    match (report.start(), report.end()) {
        (Some(start), Some(end)) => format!(
            "{}Weekly Lunch Preview: {}–{}",
            prefix,
            start.format("%b %-d"),
            end.format("%b %-d, %Y")
        ),
        _ => format!("{}Weekly Lunch Preview", prefix),
    }
}

pub fn render_weekly(report: &WeeklyMenuReport) -> String {
    let subject = weekly_subject(report);
    let mut html = document_head(&subject, STYLE);

    let (title, subtitle) = if report.test_run {
        html.push_str(
            "<div class=\"test-banner\"><strong>TEST RUN</strong> - showing the rest of the current week</div>\n",
        );
        ("This Week's School Lunch Menu", "Rest of Current Week")
    } else {
        ("Next Week's School Lunch Menu", "Upcoming Week")
    };

    html.push_str(&format!(
        "<div class=\"header\">\n<h1>{}</h1>\n<div class=\"subtitle\">{}</div>\n</div>\n",
        title, subtitle
    ));

    for day in &report.days {
        render_day(&mut html, day);
    }

    html.push_str(&document_tail());
    html
}

fn render_day(html: &mut String, day: &WeeklyDay) {
    html.push_str(&format!(
        "<div class=\"day-section\">\n<div class=\"day-header\">{}</div>\n<div class=\"day-content\">\n",
        day.date.format(LONG_DATE)
    ));

    if day.entrees.is_empty() {
        html.push_str("<p class=\"no-menu\">No entrée listed</p>\n");
    } else {
        html.push_str("<ul>\n");
        for entree in &day.entrees {
            html.push_str(&format!(
                "<li class=\"entree\">{}{}</li>\n",
                escape_html(&entree.name),
                prek_badge(entree.is_prek)
            ));
        }
        html.push_str("</ul>\n");
    }

    html.push_str("</div>\n</div>\n");
}

pub fn weekly_message(report: &WeeklyMenuReport, recipients: Recipients) -> EmailMessage {
    EmailMessage {
        subject: weekly_subject(report),
        html_body: render_weekly(report),
        recipients,
    }
}
