use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// How a submitted URL was classified.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    Article,
    Video,
}

/// Plain text pulled out of a source, ready to be embedded in a prompt.
/// Never persisted; lives for one request.
#[derive(Debug, Clone)]
pub struct ExtractedText {
    pub text: String,
    pub kind: SourceKind,
    pub fetched_at: DateTime<Utc>,
}
