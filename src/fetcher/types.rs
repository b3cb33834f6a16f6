use chrono::{DateTime, Utc};
use reqwest::StatusCode;
use url::Url;

/// A fetched, charset-decoded HTML page.
///
/// `url_final` is the URL after redirects; `encoding` records which charset
/// the body was decoded from (diagnostic only).
#[derive(Debug)]
pub struct PageResponse {
    pub url_final: Url,
    pub status: StatusCode,
    pub body_utf8: String,
    pub encoding: &'static str,
    pub fetched_at: DateTime<Utc>,
}
