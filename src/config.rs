//! Environment-driven configuration.
//!
//! `.env` is merged by [`load_dotenv`], then the environment is read exactly once
//! into an immutable [`Config`] which is then passed to every stage of the pipeline.
//! [`Config::from_lookup`] accepts any lookup function so the parsing rules can be
//! exercised without touching process state.

use std::path::PathBuf;
use std::time::Duration;

use tracing::info;

use crate::error::ConfigError;
use crate::mail::Recipients;

pub const DEFAULT_SMTP_SERVER: &str = "smtp.gmail.com";
pub const DEFAULT_SMTP_PORT: u16 = 587;
pub const DEFAULT_API_URL: &str =
    "https://webapis.schoolcafe.com/api/CalendarView/GetDailyMenuitemsByGrade";
pub const DEFAULT_PREK_GRADE: &str = "PK";
pub const DEFAULT_PREK_SERVING_LINE: &str = "Main Line";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Which menu to ask the upstream API for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchoolSettings {
    pub school_id: String,
    pub grade: String,
    pub serving_line: String,
    pub meal_type: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiSettings {
    pub base_url: String,
    pub timeout: Duration,
    pub prek_grade: String,
    pub prek_serving_line: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SmtpSettings {
    pub server: String,
    pub port: u16,
    pub timeout: Duration,
}

/// Sender credentials and recipients, only needed for the send step.
#[derive(Clone, PartialEq, Eq)]
pub struct MailSettings {
    pub sender_email: String,
    pub sender_password: String,
    pub recipients: Recipients,
}

impl std::fmt::Debug for MailSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MailSettings")
            .field("sender_email", &mask(&self.sender_email))
            .field("sender_password", &"***")
            .field("recipients", &self.recipients.len())
            .finish()
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub school: SchoolSettings,
    pub api: ApiSettings,
    pub smtp: SmtpSettings,
    mail: std::result::Result<MailSettings, &'static str>,
    pub test_run: bool,
}

impl Config {
    /// Load configuration from the process environment. Call [`load_dotenv`] first
    /// to pick up a `.env` file.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| {
            lookup(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        let required = |name: &'static str| get(name).ok_or(ConfigError::Missing(name));

        let school = SchoolSettings {
            school_id: required("SCHOOL_ID")?,
            grade: required("GRADE")?,
            serving_line: required("SERVING_LINE")?,
            meal_type: required("MEAL_TYPE")?,
        };

        let smtp = SmtpSettings {
            server: get("SMTP_SERVER").unwrap_or_else(|| DEFAULT_SMTP_SERVER.to_string()),
            port: parse_number("SMTP_PORT", get("SMTP_PORT"), DEFAULT_SMTP_PORT)?,
            timeout: Duration::from_secs(parse_number(
                "SMTP_TIMEOUT_SECS",
                get("SMTP_TIMEOUT_SECS"),
                DEFAULT_TIMEOUT_SECS,
            )?),
        };

        let api = ApiSettings {
            base_url: get("MENU_API_URL").unwrap_or_else(|| DEFAULT_API_URL.to_string()),
            timeout: Duration::from_secs(parse_number(
                "HTTP_TIMEOUT_SECS",
                get("HTTP_TIMEOUT_SECS"),
                DEFAULT_TIMEOUT_SECS,
            )?),
            prek_grade: get("PREK_GRADE").unwrap_or_else(|| DEFAULT_PREK_GRADE.to_string()),
            prek_serving_line: get("PREK_SERVING_LINE")
                .unwrap_or_else(|| DEFAULT_PREK_SERVING_LINE.to_string()),
        };

        let test_run = get("TEST_RUN").is_some_and(|v| parse_flag(&v));

        let mut recipients = Recipients::default();
        if let Some(primary) = get("RECIPIENT_EMAIL") {
            recipients.insert(&primary);
        }
        if let Some(additional) = get("ADDITIONAL_RECIPIENTS") {
            recipients.extend_from_list(&additional);
        }

        let mail = match (get("SENDER_EMAIL"), get("SENDER_PASSWORD")) {
            (None, _) => Err("SENDER_EMAIL"),
            (_, None) => Err("SENDER_PASSWORD"),
            (Some(_), Some(_)) if recipients.is_empty() => Err("RECIPIENT_EMAIL"),
            (Some(sender_email), Some(sender_password)) => Ok(MailSettings {
                sender_email,
                sender_password,
                recipients,
            }),
        };

        Ok(Self {
            school,
            api,
            smtp,
            mail,
            test_run,
        })
    }

    /// Mail settings, failing with the first missing variable when incomplete.
    pub fn mail(&self) -> Result<&MailSettings, ConfigError> {
        self.mail.as_ref().map_err(|var| ConfigError::Missing(*var))
    }

    /// Log the configuration with credentials and addresses masked.
    pub fn log_summary(&self) {
        info!(
            school_id = %self.school.school_id,
            grade = %self.school.grade,
            serving_line = %self.school.serving_line,
            meal_type = %self.school.meal_type,
            "School configuration loaded"
        );
        info!(
            "SMTP: {}:{}, TEST_RUN: {}",
            self.smtp.server, self.smtp.port, self.test_run
        );
        match &self.mail {
            Ok(mail) => info!(
                "Sender {}, {} recipient(s) configured",
                mask(&mail.sender_email),
                mail.recipients.len()
            ),
            Err(var) => info!("Mail settings incomplete ({} not set)", var),
        }
    }
}

/// Read `.env` from the working directory or a parent into the process environment.
///
/// Variables already set win over the file. A missing file is `Ok(None)`; an
/// unreadable or malformed one is returned as an error for the caller to report.
pub fn load_dotenv() -> Result<Option<PathBuf>, dotenvy::Error> {
    match dotenvy::dotenv() {
        Ok(path) => Ok(Some(path)),
        Err(e) if e.not_found() => Ok(None),
        Err(e) => Err(e),
    }
}

/// Parse an optional positive integer, falling back to `default` when unset.
fn parse_number<T>(var: &'static str, raw: Option<String>, default: T) -> Result<T, ConfigError>
where
    T: std::str::FromStr + Default + PartialEq,
{
    let Some(value) = raw else {
        return Ok(default);
    };
    match value.parse::<T>() {
        Ok(n) if n != T::default() => Ok(n),
        _ => Err(ConfigError::Invalid {
            var,
            reason: "expected a positive integer".to_string(),
            value,
        }),
    }
}

fn parse_flag(value: &str) -> bool {
    matches!(
        value.to_ascii_lowercase().as_str(),
        "true" | "1" | "yes" | "on"
    )
}

/// Mask an email address for logs: `jane.doe@example.com` -> `j***@example.com`.
pub fn mask(address: &str) -> String {
    match address.split_once('@') {
        Some((local, domain)) => {
            let first = local.chars().next().map(String::from).unwrap_or_default();
            format!("{}***@{}", first, domain)
        }
        None => "***".to_string(),
    }
}
