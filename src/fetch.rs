//! List endpoint access
//!
//! Queries the site's REST list endpoint in OData-verbose mode and unwraps
//! the `{"d":{"results":[...]}}` envelope. URL builders are separate from the
//! client so the query shapes are testable without a server; fixtures stand
//! in for the endpoint in offline runs.

use std::path::Path;
use std::time::Duration;

use chrono::{Months, NaiveDate};
use serde::de::DeserializeOwned;

use crate::error::{AtriumError, AtriumResult};
use crate::models::ListEnvelope;

/// Path segments that mark the end of the site portion of a page URL.
const NON_SITE_PATTERNS: [&str; 8] = [
    "/SitePages/",
    "/Lists/",
    "/SiteAssets/",
    "/Shared%20Documents/",
    "/Forms/",
    "/_layouts/",
    "/CPW/",
    "/Documents/",
];

/// HTTP client for the list endpoint.
pub struct ListClient {
    agent: ureq::Agent,
}

impl ListClient {
    pub fn new() -> Self {
        Self {
            agent: ureq::AgentBuilder::new()
                .timeout(Duration::from_secs(10))
                .build(),
        }
    }

    /// Fetch a list query and unwrap the verbose envelope.
    pub fn fetch_list<T: DeserializeOwned>(&self, url: &str) -> AtriumResult<Vec<T>> {
        let response = self
            .agent
            .get(url)
            .set("Accept", "application/json;odata=verbose")
            .set("Content-Type", "application/json")
            .call()
            .map_err(|e| AtriumError::Fetch {
                message: e.to_string(),
            })?;

        let envelope: ListEnvelope<T> =
            response
                .into_json()
                .map_err(|e| AtriumError::InvalidPayload {
                    url: url.to_string(),
                    message: e.to_string(),
                })?;
        Ok(envelope.d.results)
    }
}

impl Default for ListClient {
    fn default() -> Self {
        Self::new()
    }
}

/// Menu list query, ordered by the explicit ordering column.
pub fn menu_items_url(site_url: &str, list_guid: &str) -> String {
    format!("{site_url}/_api/web/lists(guid'{list_guid}')/items?$orderby=VolgordeID asc")
}

/// Events query for one page of the upcoming window.
///
/// `page` is 1-based; the window runs from `today` through three months out.
pub fn events_url(
    site_url: &str,
    list_guid: &str,
    today: NaiveDate,
    page: usize,
    page_size: usize,
) -> String {
    let until = today
        .checked_add_months(Months::new(3))
        .unwrap_or(NaiveDate::MAX);
    let filter = format!(
        "EventDate ge datetime'{}T00:00:00' and EventDate le datetime'{}T23:59:59'",
        today.format("%Y-%m-%d"),
        until.format("%Y-%m-%d"),
    );
    let skip = page.saturating_sub(1) * page_size;
    format!(
        "{site_url}/_api/web/lists(guid'{list_guid}')/items?$filter={}&$orderby=EventDate asc&$top={page_size}&$skip={skip}",
        encode_query_component(&filter),
    )
}

/// Document library query for one folder, files and folders together.
pub fn documents_url(site_url: &str, list_guid: &str, folder_server_relative: &str) -> String {
    let filter = format!("FileDirRef eq '{folder_server_relative}'");
    format!(
        "{site_url}/_api/web/lists(guid'{list_guid}')/items?$filter={}&$select=Id,Title,FileLeafRef,FileRef,Modified,FSObjType,FileSizeDisplay,Editor/Title,File/Name,File/ServerRelativeUrl,File/TimeLastModified&$expand=Editor,File&$top=5000",
        encode_query_component(&filter),
    )
}

/// Derive the site URL from the page URL.
///
/// Keeps everything from `/sites/` up to the first known non-site segment;
/// a page outside `/sites/` falls back to the configured root.
pub fn detect_site_url(page_url: &str, configured_root: Option<&str>) -> Option<String> {
    let (origin, path) = split_origin(page_url)?;

    if let Some(sites_index) = path.find("/sites/") {
        let mut end = path.len();
        for pattern in NON_SITE_PATTERNS {
            if let Some(at) = path[sites_index..].find(pattern) {
                end = end.min(sites_index + at);
            }
        }
        return Some(format!("{origin}{}", &path[sites_index..end]));
    }

    configured_root.map(str::to_string)
}

/// Split `https://host[:port]/path...` into origin and path.
fn split_origin(url: &str) -> Option<(&str, &str)> {
    let scheme_end = url.find("://")?;
    let after_scheme = scheme_end + 3;
    match url[after_scheme..].find('/') {
        Some(slash) => Some(url.split_at(after_scheme + slash)),
        None => Some((url, "")),
    }
}

/// Percent-encode a query component the way browsers encode URI components:
/// unreserved characters pass through, everything else is UTF-8 escaped.
pub fn encode_query_component(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for byte in raw.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' => out.push(byte as char),
            b'-' | b'_' | b'.' | b'!' | b'~' | b'*' | b'\'' | b'(' | b')' => {
                out.push(byte as char)
            }
            _ => {
                out.push('%');
                out.push_str(&format!("{byte:02X}"));
            }
        }
    }
    out
}

/// Read list records from a JSON fixture file. Accepts either the verbose
/// envelope or a bare array.
pub fn read_fixture<T: DeserializeOwned>(path: &Path) -> AtriumResult<Vec<T>> {
    let raw = std::fs::read_to_string(path)?;
    if let Ok(envelope) = serde_json::from_str::<ListEnvelope<T>>(&raw) {
        return Ok(envelope.d.results);
    }
    serde_json::from_str::<Vec<T>>(&raw).map_err(|e| AtriumError::InvalidPayload {
        url: path.display().to_string(),
        message: e.to_string(),
    })
}
