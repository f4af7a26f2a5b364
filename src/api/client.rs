use std::collections::BTreeMap;

use chrono::NaiveDate;
use reqwest::blocking::Client;
use reqwest::header::{ACCEPT, ACCEPT_LANGUAGE, HeaderMap, HeaderValue, ORIGIN, REFERER};
use tracing::{debug, info};
use url::Url;

use super::payload::parse_menu_payload;
use crate::config::{ApiSettings, SchoolSettings};
use crate::error::FetchError;
use crate::model::{MenuQuery, RawMenuItem};

/// Longest slice of an error response kept for diagnostics.
pub const MAX_ERROR_BODY: usize = 512;

/// Anything that can produce the raw items for one menu query.
pub trait MenuSource {
    fn fetch(&self, query: &MenuQuery) -> Result<Vec<RawMenuItem>, FetchError>;

    /// One fetch per date, stopping at the first failure.
    fn fetch_range(
        &self,
        school: &SchoolSettings,
        dates: &[NaiveDate],
    ) -> Result<BTreeMap<NaiveDate, Vec<RawMenuItem>>, FetchError> {
        let mut menus = BTreeMap::new();
        for date in dates {
            let items = self.fetch(&MenuQuery::new(school, *date))?;
            menus.insert(*date, items);
        }
        Ok(menus)
    }
}

/// Blocking client for the SchoolCafe daily menu endpoint.
pub struct MenuFetcher {
    client: Client,
    base_url: Url,
}

impl MenuFetcher {
    pub fn new(api: &ApiSettings) -> Result<Self, FetchError> {
        let base_url = Url::parse(&api.base_url)?;
        super::install_crypto_provider();

        let mut headers = HeaderMap::new();
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("application/json, text/plain, */*"),
        );
        headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-US,en;q=0.9"));
        headers.insert(ORIGIN, HeaderValue::from_static("https://www.schoolcafe.com"));
        headers.insert(REFERER, HeaderValue::from_static("https://www.schoolcafe.com/"));

        let client = Client::builder()
            .timeout(api.timeout)
            .default_headers(headers)
            .build()?;

        Ok(Self { client, base_url })
    }

    pub fn request_url(&self, query: &MenuQuery) -> Url {
        let mut url = self.base_url.clone();
        url.query_pairs_mut()
            .append_pair("SchoolId", &query.school_id)
            .append_pair("ServingDate", &query.serving_date())
            .append_pair("ServingLine", &query.serving_line)
            .append_pair("MealType", &query.meal_type)
            .append_pair("Grade", &query.grade)
            .append_pair("PersonId", "null");
        url
    }
}

impl MenuSource for MenuFetcher {
    fn fetch(&self, query: &MenuQuery) -> Result<Vec<RawMenuItem>, FetchError> {
        let url = self.request_url(query);
        info!(
            "Fetching {} menu for {} (grade {}, {})",
            query.meal_type,
            query.serving_date(),
            query.grade,
            query.serving_line
        );
        debug!("GET {}", url);

        let response = self.client.get(url).send()?;
        let status = response.status();
        let body = response.text()?;

        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
                body: truncate(&body, MAX_ERROR_BODY),
            });
        }

        let items = parse_menu_payload(&body)?;
        if items.is_empty() {
            info!(
                "Empty menu for {} - likely a weekend or holiday",
                query.serving_date()
            );
        } else {
            info!("Fetched {} menu item(s)", items.len());
        }
        Ok(items)
    }
}

fn truncate(body: &str, max_chars: usize) -> String {
    let body = body.trim();
    match body.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}...", &body[..cut]),
        None => body.to_string(),
    }
}
