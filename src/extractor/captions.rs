//! Video transcript extraction.
//!
//! The platform's watch page embeds player metadata as JSON; the
//! `captionTracks` array inside it lists one timed-text resource per
//! language. We take the English track or fail — no fallback language, no
//! translation. The timed-text markup (`<text start="…" dur="…">…</text>`)
//! is flattened to prose.

use std::sync::LazyLock;

use regex::Regex;
use serde::Deserialize;
use url::Url;

use crate::extractor::errors::ExtractError;
use crate::fetcher;

/// Hosts that mark a URL as a video source.
const VIDEO_HOSTS: [&str; 5] = [
    "youtube.com",
    "www.youtube.com",
    "m.youtube.com",
    "music.youtube.com",
    "youtu.be",
];

static VIDEO_ID_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_-]{11}$").expect("Failed to compile video id regex"));

static TIMED_TEXT_TAG_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]*>").expect("Failed to compile timed-text tag regex"));

/// One subtitle resource attached to a video, as found in player metadata.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CaptionTrack {
    pub base_url: String,
    pub language_code: String,
}

/// Does this URL belong to the video platform at all?
pub fn is_video_url(url: &str) -> bool {
    Url::parse(url)
        .ok()
        .and_then(|u| u.host_str().map(|h| VIDEO_HOSTS.contains(&h)))
        .unwrap_or(false)
}

/// Pull the 11-character video id out of a known watch-page URL shape.
///
/// Accepted shapes: `watch?v=<id>`, `youtu.be/<id>`, `/shorts/<id>`,
/// `/embed/<id>`. Anything else on a video host is invalid, detected before
/// any network call.
pub fn video_id(url: &str) -> Result<String, ExtractError> {
    let parsed = Url::parse(url).map_err(|_| ExtractError::InvalidVideoUrl)?;
    let host = parsed.host_str().ok_or(ExtractError::InvalidVideoUrl)?;

    let candidate = if host == "youtu.be" {
        parsed
            .path_segments()
            .and_then(|mut segments| segments.next())
            .map(str::to_string)
    } else {
        let mut segments = parsed.path_segments().into_iter().flatten();
        match segments.next() {
            Some("watch") => parsed
                .query_pairs()
                .find(|(key, _)| key == "v")
                .map(|(_, value)| value.into_owned()),
            Some("shorts") | Some("embed") => segments.next().map(str::to_string),
            _ => None,
        }
    };

    match candidate {
        Some(id) if VIDEO_ID_REGEX.is_match(&id) => Ok(id),
        _ => Err(ExtractError::InvalidVideoUrl),
    }
}

/// Fetch and flatten the English transcript for a video URL.
pub async fn extract_transcript(url: &str) -> Result<String, ExtractError> {
    let id = video_id(url)?;

    let watch_url = format!("https://www.youtube.com/watch?v={id}");
    let page = fetcher::fetch_page(&watch_url).await?;

    let tracks = caption_tracks(&page.body_utf8);
    if tracks.is_empty() {
        return Err(ExtractError::NoCaptions);
    }
    let track = select_english_track(&tracks)?;

    let timed_text = fetcher::fetch_raw_text(&track.base_url).await?;
    let transcript = flatten_timed_text(&timed_text);
    if transcript.is_empty() {
        return Err(ExtractError::EmptyTranscript);
    }
    Ok(transcript)
}

/// Locate the `"captionTracks":[…]` array in the watch page's embedded
/// player JSON and decode it. A page without the marker (or with an
/// undecodable slice) simply has no usable tracks.
pub fn caption_tracks(watch_html: &str) -> Vec<CaptionTrack> {
    const MARKER: &str = "\"captionTracks\":";

    let Some(marker_pos) = watch_html.find(MARKER) else {
        return Vec::new();
    };
    let after_marker = &watch_html[marker_pos + MARKER.len()..];
    let Some(array) = balanced_array(after_marker) else {
        return Vec::new();
    };

    serde_json::from_str(array).unwrap_or_default()
}

/// Slice the first balanced `[…]` from `input`, honoring JSON strings and
/// escape sequences so brackets inside URLs don't break the count.
fn balanced_array(input: &str) -> Option<&str> {
    let start = input.find('[')?;
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (offset, ch) in input[start..].char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match ch {
            '\\' if in_string => escaped = true,
            '"' => in_string = !in_string,
            '[' if !in_string => depth += 1,
            ']' if !in_string => {
                depth -= 1;
                if depth == 0 {
                    return Some(&input[start..start + offset + 1]);
                }
            }
            _ => {}
        }
    }
    None
}

/// Prefer the track whose language code is exactly `en`.
pub fn select_english_track(tracks: &[CaptionTrack]) -> Result<&CaptionTrack, ExtractError> {
    tracks
        .iter()
        .find(|track| track.language_code == "en")
        .ok_or(ExtractError::NoEnglishCaptions)
}

/// Strip timed-text markup down to flat prose.
///
/// Closing tags become line boundaries, every remaining tag is dropped, the
/// small set of entities observed in caption data is decoded, and the lines
/// are trimmed and joined with single spaces.
pub fn flatten_timed_text(timed_text: &str) -> String {
    let with_breaks = timed_text.replace("</text>", "\n");
    let stripped = TIMED_TEXT_TAG_REGEX.replace_all(&with_breaks, "");
    let decoded = decode_entities(&stripped);

    decoded
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Caption data double-escapes apostrophes and quotes (`&amp;#39;`), so the
/// double-escaped forms go first and the bare ampersand last.
fn decode_entities(text: &str) -> String {
    text.replace("&amp;#39;", "'")
        .replace("&amp;quot;", "\"")
        .replace("&#39;", "'")
        .replace("&quot;", "\"")
        .replace("&amp;", "&")
}
