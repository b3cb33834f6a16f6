//! Prompt construction. Pure string assembly, no I/O.

use crate::campaign::schema::{self, FieldSpec};

/// Hard cutoff on source text embedded in a prompt. A character count, not
/// tokens; oversized sources lose their tail silently, possibly
/// mid-sentence. They never error.
pub const MAX_SOURCE_CHARS: usize = 30_000;

/// Delimiter line separating instructions from source material.
const SOURCE_DELIMITER: &str = "---";

/// Build the single instruction string sent to the model.
///
/// The per-field instructions and the trailing key directive both come from
/// the shared field specs; the directive is advisory only and the parser
/// never assumes the model honored it.
pub fn build_prompt(text: &str, fields: &[FieldSpec]) -> String {
    let truncated = truncate_chars(text, MAX_SOURCE_CHARS);

    let mut prompt = String::new();
    prompt.push_str(
        "You are a world-class social media strategist. Based on the source text below, \
         create an engaging social media campaign.\n\n",
    );
    prompt.push_str("Source Text:\n");
    prompt.push_str(SOURCE_DELIMITER);
    prompt.push('\n');
    prompt.push_str(truncated);
    prompt.push('\n');
    prompt.push_str(SOURCE_DELIMITER);
    prompt.push_str("\n\nProduce the following:\n");
    prompt.push_str(&schema::prompt_instructions(fields));
    prompt.push_str(&format!(
        "\nRespond with a single JSON object with keys {}, nothing else. \
         Do not wrap the object in markdown fences or add commentary.\n",
        schema::key_list(fields)
    ));
    prompt
}

/// Cut `text` to at most `max` characters on a char boundary.
fn truncate_chars(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((byte_index, _)) => &text[..byte_index],
        None => text,
    }
}
