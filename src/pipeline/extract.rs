//! Structured-output extraction and repair.
//!
//! Generative text tends to wrap the payload in prose or markdown fences, or to be
//! cut off. Extraction tries, in order, the outermost brace slice of the raw text,
//! the same slice after fence removal, and the whole unfenced text; the first value
//! with the required shape wins.

use crate::course::StructuredOutput;
use tracing::debug;

const FENCE: &str = "```";

/// Remove markdown fences: a fence opening a line (with its language tag) and a
/// fence closing a line. Backticks elsewhere, such as inside JSON strings, are kept.
pub fn strip_code_fences(text: &str) -> String {
    text.lines()
        .map(strip_line_fences)
        .collect::<Vec<_>>()
        .join("\n")
        .trim()
        .to_string()
}

fn strip_line_fences(line: &str) -> &str {
    let mut line = line;
    if let Some(rest) = line.trim_start().strip_prefix(FENCE) {
        let tag_len = rest
            .find(|c: char| !c.is_ascii_alphanumeric())
            .unwrap_or(rest.len());
        line = &rest[tag_len..];
    }
    line.trim_end().strip_suffix(FENCE).unwrap_or(line)
}

/// Substring from the first `{` to the last `}`, when both exist in that order.
fn outer_braces(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    (start < end).then(|| &text[start..=end])
}

fn parse_shaped<T: StructuredOutput>(candidate: &str) -> Option<T> {
    match serde_json::from_str::<T>(candidate) {
        Ok(value) if value.has_required_shape() => Some(value),
        Ok(_) => {
            debug!(schema = T::SCHEMA_NAME, "Parsed reply lacks required shape");
            None
        }
        Err(e) => {
            debug!(schema = T::SCHEMA_NAME, error = %e, "Candidate did not parse");
            None
        }
    }
}

/// Extract a schema instance from raw provider text, or `None` if nothing usable is there.
pub fn extract_structured<T: StructuredOutput>(raw_text: &str) -> Option<T> {
    if let Some(slice) = outer_braces(raw_text) {
        if let Some(value) = parse_shaped::<T>(slice) {
            return Some(value);
        }
    }

    let cleaned = strip_code_fences(raw_text);
    if let Some(slice) = outer_braces(&cleaned) {
        if let Some(value) = parse_shaped::<T>(slice) {
            return Some(value);
        }
    }

    parse_shaped::<T>(&cleaned)
}
