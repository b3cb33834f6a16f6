use thiserror::Error;

/// Failures talking to the hosted model provider.
///
/// Provider error bodies are preserved verbatim in `Api` so operators can
/// see exactly what the provider said; the HTTP-facing wrapper is applied
/// by the orchestrator.
#[derive(Debug, Error)]
pub enum CompletionError {
    #[error("network error: {0}")]
    Network(String),

    #[error("provider error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("unexpected provider response: {0}")]
    Parse(String),

    #[error("provider returned no completion candidates")]
    Empty,
}
