/// Marker appended to every displayed excerpt, whether or not anything was cut.
pub const ELLIPSIS: &str = "...";

/// The first `max_chars` characters of `text` (all of it when shorter).
///
/// Counts Unicode scalar values, so the cut never lands inside a multi-byte character.
pub fn char_prefix(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((byte_index, _)) => &text[..byte_index],
        None => text,
    }
}

pub fn excerpt(text: &str, max_chars: usize) -> String {
    let mut out = char_prefix(text, max_chars).to_string();
    out.push_str(ELLIPSIS);
    out
}
