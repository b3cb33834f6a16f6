//! Article-page text extraction.
//!
//! No readability scoring here: an ordered, non-exclusive list of likely
//! content containers, and within each the text of paragraph, heading and
//! list-item elements in document order. Pages that match nothing produce
//! `EmptyExtraction`, never an empty success.

use std::sync::LazyLock;

use scraper::{Html, Selector};

use crate::extractor::errors::ExtractError;

/// Containers likely to hold the article body.
static CONTENT_CONTAINERS: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse("article, .post, .entry-content, main")
        .expect("Failed to parse content container selector")
});

/// Elements inside a container whose text is worth keeping.
static TEXT_ELEMENTS: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("p, h1, h2, h3, li").expect("Failed to parse text selector"));

/// Pull plain text from an article page.
pub fn extract_article_text(html: &str) -> Result<String, ExtractError> {
    let document = Html::parse_document(html);

    let mut article_text = String::new();
    for container in document.select(&CONTENT_CONTAINERS) {
        for element in container.select(&TEXT_ELEMENTS) {
            let text: String = element.text().collect();
            let text = text.trim();
            if !text.is_empty() {
                article_text.push_str(text);
                article_text.push('\n');
            }
        }
    }

    if article_text.trim().is_empty() {
        return Err(ExtractError::EmptyExtraction);
    }
    Ok(article_text)
}
