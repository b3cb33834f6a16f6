use thiserror::Error;

use crate::fetcher::FetchError;

/// Failures turning a source reference into plain text.
///
/// Everything here is terminal for the request; the orchestrator maps each
/// variant onto a stage-prefixed user-facing message.
#[derive(Error, Debug)]
pub enum ExtractError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// The page had none of the recognized content containers, or they were
    /// all empty. Usually a JS-rendered or unusually structured site.
    #[error("Could not extract article text.")]
    EmptyExtraction,

    /// The URL points at the video platform but does not match any known
    /// watch-page shape. Raised before any network call.
    #[error("not a recognized video URL")]
    InvalidVideoUrl,

    #[error("no caption tracks are available for this video")]
    NoCaptions,

    /// Tracks exist but none is English. No fallback language is attempted.
    #[error("English captions are not available for this video")]
    NoEnglishCaptions,

    #[error("transcript was empty after removing markup")]
    EmptyTranscript,
}
