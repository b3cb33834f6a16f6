use std::time::Duration;

use chrono::Utc;
use once_cell::sync::Lazy;
use reqwest::{Client, ClientBuilder, Response};
use tracing::instrument;

use crate::fetcher::{errors::FetchError, pipeline::decode_body, types::PageResponse};

const MAX_BODY_SIZE: u64 = 5 * 1024 * 1024; // 5MB
const USER_AGENT: &str = "RepurposeBot/0.1 (+https://repurpose.example.com)";

/// Shared outbound client: source pages, caption tracks and the model
/// provider all go through independent requests, but reuse one pool.
static HTTP_CLIENT: Lazy<Client> = Lazy::new(|| {
    ClientBuilder::new()
        .connect_timeout(Duration::from_secs(10))
        .timeout(Duration::from_secs(30))
        .user_agent(USER_AGENT)
        .redirect(reqwest::redirect::Policy::limited(10))
        .default_headers({
            let mut headers = reqwest::header::HeaderMap::new();
            headers.insert(
                reqwest::header::ACCEPT,
                "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8"
                    .parse()
                    .unwrap(),
            );
            headers
        })
        .build()
        .expect("Failed to build HTTP client")
});

pub fn get_client() -> &'static Client {
    &HTTP_CLIENT
}

/// Fetch a user-submitted article page as charset-decoded HTML.
#[instrument(skip_all, fields(url = %url))]
pub async fn fetch_page(url: &str) -> Result<PageResponse, FetchError> {
    let response = send(url).await?;

    let final_url = response.url().clone();
    let status = response.status();
    let content_type = content_type_of(&response);
    if !content_type.contains("text/html") && !content_type.contains("application/xhtml") {
        return Err(FetchError::UnsupportedContentType(content_type));
    }

    let body_bytes = response
        .bytes()
        .await
        .map_err(|e| FetchError::Io(e.to_string()))?;
    if body_bytes.len() as u64 > MAX_BODY_SIZE {
        return Err(FetchError::BodyTooLarge(body_bytes.len() as u64));
    }

    let (body_utf8, encoding) = decode_body(&content_type, &body_bytes)?;

    Ok(PageResponse {
        url_final: final_url,
        status,
        body_utf8,
        encoding,
        fetched_at: Utc::now(),
    })
}

/// Fetch a caption-track resource as text.
///
/// Timed-text endpoints answer with XML (`text/xml`, `application/xml`,
/// sometimes `application/ttml+xml`); anything that is not text-shaped is
/// rejected. Caption hosts serve UTF-8, so no charset sniffing here.
#[instrument(skip_all, fields(url = %url))]
pub async fn fetch_raw_text(url: &str) -> Result<String, FetchError> {
    let response = send(url).await?;

    let content_type = content_type_of(&response);
    if !content_type.contains("xml") && !content_type.contains("text/") {
        return Err(FetchError::UnsupportedContentType(content_type));
    }

    let body_bytes = response
        .bytes()
        .await
        .map_err(|e| FetchError::Io(e.to_string()))?;
    if body_bytes.len() as u64 > MAX_BODY_SIZE {
        return Err(FetchError::BodyTooLarge(body_bytes.len() as u64));
    }

    String::from_utf8(body_bytes.to_vec())
        .map_err(|_| FetchError::Charset("caption track was not valid UTF-8".to_string()))
}

async fn send(url: &str) -> Result<Response, FetchError> {
    let parsed_url = url::Url::parse(url)?;

    let response = HTTP_CLIENT
        .get(parsed_url)
        .send()
        .await
        .map_err(FetchError::from_reqwest_error)?;

    // Check content length before downloading
    if let Some(content_length) = response.content_length()
        && content_length > MAX_BODY_SIZE
    {
        return Err(FetchError::BodyTooLarge(content_length));
    }

    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::Http { status });
    }

    Ok(response)
}

fn content_type_of(response: &Response) -> String {
    response
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|ct| ct.to_str().ok())
        .unwrap_or("text/html")
        .to_string()
}
