//! The content-package schema.
//!
//! `PACKAGE_FIELDS` is the single source of truth for the package shape:
//! the prompt builder derives its per-field instructions and key directive
//! from it, and the response parser validates against it. Editing a field
//! here changes both sides at once, so the instruction text and the decode
//! schema cannot drift apart.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

/// Runtime type a package field must decode to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// A JSON array of strings.
    StringList,
    /// A single JSON string.
    Text,
    /// A JSON object with exactly the two string fields of a video script.
    Script,
}

/// The two sub-fields of a [`FieldKind::Script`] value.
pub const SCRIPT_FIELDS: [&str; 2] = ["visual", "voiceover"];

/// One field of the package: its wire key, runtime type, and the authorial
/// instruction the model receives for it.
#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    pub key: &'static str,
    pub kind: FieldKind,
    pub instruction: &'static str,
}

/// The five-field campaign package.
pub const PACKAGE_FIELDS: &[FieldSpec] = &[
    FieldSpec {
        key: "twitterTweets",
        kind: FieldKind::StringList,
        instruction: "an array of exactly 5 standalone tweets as plain strings, no numbering. \
                      The first tweet must open with a compelling question that hooks the reader; \
                      the middle tweets walk through the key points; the last tweet closes with a \
                      call to action.",
    },
    FieldSpec {
        key: "linkedInPost",
        kind: FieldKind::Text,
        instruction: "a professional LinkedIn post of two to three short paragraphs with a clear \
                      takeaway, ending with three relevant hashtags on the final line.",
    },
    FieldSpec {
        key: "instagramCaption",
        kind: FieldKind::Text,
        instruction: "a punchy Instagram caption of at most three sentences, followed by five \
                      relevant hashtags.",
    },
    FieldSpec {
        key: "facebookPost",
        kind: FieldKind::Text,
        instruction: "a conversational Facebook post of one to two paragraphs that invites \
                      discussion and closes with a question to the audience.",
    },
    FieldSpec {
        key: "tikTokScript",
        kind: FieldKind::Script,
        instruction: "an object with exactly two string fields: \"visual\" describing what is on \
                      screen shot by shot, and \"voiceover\" giving the narration, for a 30 to 60 \
                      second video.",
    },
];

/// The structured, multi-platform output decoded from a model completion.
///
/// Only ever constructed by [`crate::campaign::parser::parse`] after the
/// decoded object passed [`validate`]; there is no partial or best-effort
/// construction path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ContentPackage {
    pub twitter_tweets: Vec<String>,
    pub linked_in_post: String,
    pub instagram_caption: String,
    pub facebook_post: String,
    pub tik_tok_script: TikTokScript,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TikTokScript {
    pub visual: String,
    pub voiceover: String,
}

/// A field that failed shape validation, and what was expected of it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaViolation {
    pub key: String,
    pub expected: &'static str,
}

impl FieldKind {
    pub fn expected(&self) -> &'static str {
        match self {
            FieldKind::StringList => "an array of strings",
            FieldKind::Text => "a string",
            FieldKind::Script => "an object with string fields \"visual\" and \"voiceover\"",
        }
    }

    fn matches(&self, value: &Value) -> bool {
        match self {
            FieldKind::StringList => value
                .as_array()
                .is_some_and(|items| items.iter().all(Value::is_string)),
            FieldKind::Text => value.is_string(),
            FieldKind::Script => value.as_object().is_some_and(|map| {
                SCRIPT_FIELDS
                    .iter()
                    .all(|field| map.get(*field).is_some_and(Value::is_string))
            }),
        }
    }
}

/// Check a decoded JSON value against a field list. Reports the first
/// missing or mistyped key; never defaults or coerces.
pub fn validate(value: &Value, fields: &[FieldSpec]) -> Result<(), SchemaViolation> {
    let Some(object) = value.as_object() else {
        return Err(SchemaViolation {
            key: "$".to_string(),
            expected: "a JSON object",
        });
    };

    for spec in fields {
        let Some(field_value) = object.get(spec.key) else {
            return Err(SchemaViolation {
                key: spec.key.to_string(),
                expected: spec.kind.expected(),
            });
        };
        if !spec.kind.matches(field_value) {
            return Err(SchemaViolation {
                key: spec.key.to_string(),
                expected: spec.kind.expected(),
            });
        }
    }
    Ok(())
}

/// Bulleted per-field instructions for the prompt.
pub fn prompt_instructions(fields: &[FieldSpec]) -> String {
    let mut out = String::new();
    for spec in fields {
        out.push_str(&format!("- \"{}\": {}\n", spec.key, spec.instruction));
    }
    out
}

/// The key set, quoted and comma-separated, for the JSON-only directive.
pub fn key_list(fields: &[FieldSpec]) -> String {
    fields
        .iter()
        .map(|spec| format!("\"{}\"", spec.key))
        .collect::<Vec<_>>()
        .join(", ")
}
