//! Markdown fence stripping for provider output
//!
//! Models frequently wrap their JSON in a ```json fence despite being told
//! not to. This module extracts the inner text of the first fenced segment.
//! Splitting is on the first fence token and the next closing delimiter, so
//! text after a second fence is discarded. This is not a full fence parser.

/// Strip a leading/trailing code fence from raw provider text
///
/// Preference order: a ```json labeled fence, then an unlabeled ``` fence.
/// The inner segment is trimmed. A fence with no closing delimiter takes the
/// remainder of the text. Input with no fence markers is returned unchanged,
/// untrimmed.
pub fn strip_code_fence(raw: &str) -> &str {
    if let Some(inner) = fenced_segment(raw, "```json") {
        return inner;
    }
    if let Some(inner) = fenced_segment(raw, "```") {
        return inner;
    }
    raw
}

/// Text between the first occurrence of `open` and the next ``` delimiter
fn fenced_segment<'a>(raw: &'a str, open: &str) -> Option<&'a str> {
    let start = raw.find(open)? + open.len();
    let rest = &raw[start..];
    let end = rest.find("```").unwrap_or(rest.len());
    Some(rest[..end].trim())
}
