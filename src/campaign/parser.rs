//! Decoding of raw model completions into a typed package.
//!
//! The completion is untrusted external text: the model is asked to return
//! only JSON but often wraps the object in prose. Extraction, strict
//! decoding and shape validation are three separate steps so each failure
//! mode stays distinguishable (and separately testable).

use thiserror::Error;

use crate::campaign::schema::{self, ContentPackage, FieldSpec};

/// How much of the offending substring a malformed-JSON error carries.
const SNIPPET_CHARS: usize = 200;

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("no JSON object found in the model response")]
    NoJsonFound,

    #[error("model response contained malformed JSON near: {snippet}")]
    MalformedJson { snippet: String },

    #[error("field '{key}' is missing or mistyped (expected {expected})")]
    SchemaMismatch { key: String, expected: String },
}

/// Extract and decode the first balanced-looking JSON object in `raw`.
///
/// Slices from the first `{` to the last `}` inclusive, decodes strictly,
/// then validates against `fields`. No lenient repair, no defaulting of
/// missing fields, no coercion beyond what JSON decoding itself performs.
pub fn parse(raw: &str, fields: &[FieldSpec]) -> Result<ContentPackage, ParseError> {
    let start = raw.find('{').ok_or(ParseError::NoJsonFound)?;
    let end = raw.rfind('}').ok_or(ParseError::NoJsonFound)?;
    if end < start {
        return Err(ParseError::NoJsonFound);
    }
    let candidate = &raw[start..=end];

    let value: serde_json::Value =
        serde_json::from_str(candidate).map_err(|_| ParseError::MalformedJson {
            snippet: snippet_of(candidate),
        })?;

    schema::validate(&value, fields).map_err(|violation| ParseError::SchemaMismatch {
        key: violation.key,
        expected: violation.expected.to_string(),
    })?;

    serde_json::from_value(value).map_err(|_| ParseError::SchemaMismatch {
        key: "$".to_string(),
        expected: "the content package shape".to_string(),
    })
}

fn snippet_of(candidate: &str) -> String {
    match candidate.char_indices().nth(SNIPPET_CHARS) {
        Some((byte_index, _)) => format!("{}…", &candidate[..byte_index]),
        None => candidate.to_string(),
    }
}
