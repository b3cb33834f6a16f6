pub mod article;
pub mod captions;
pub mod errors;
pub mod model;

pub use errors::ExtractError;
pub use model::{ExtractedText, SourceKind};

use chrono::Utc;
use tracing::instrument;

use crate::fetcher;

impl SourceKind {
    /// Tag a submitted URL as an article page or a video page. Anything not
    /// on a known video host is treated as an article; the article path will
    /// surface its own errors if the URL turns out to be garbage.
    pub fn classify(url: &str) -> Self {
        if captions::is_video_url(url) {
            SourceKind::Video
        } else {
            SourceKind::Article
        }
    }
}

/// Turn a source reference into plain text.
#[instrument(skip_all, fields(url = %url))]
pub async fn extract(url: &str) -> Result<ExtractedText, ExtractError> {
    let kind = SourceKind::classify(url);
    let text = match kind {
        SourceKind::Article => {
            let page = fetcher::fetch_page(url).await?;
            article::extract_article_text(&page.body_utf8)?
        }
        SourceKind::Video => captions::extract_transcript(url).await?,
    };

    Ok(ExtractedText {
        text,
        kind,
        fetched_at: Utc::now(),
    })
}
