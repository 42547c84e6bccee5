//! Canonical text form used for comparison.

/// Normalizes raw extracted text: lower-cases, collapses whitespace runs to a
/// single space, strips punctuation and symbols (alphanumerics and spaces are
/// retained), and trims the ends.
///
/// Whitespace-only input yields the empty string.
pub fn normalize_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut pending_space = false;

    for ch in text.chars() {
        if ch.is_whitespace() {
            pending_space = !out.is_empty();
        } else if ch.is_alphanumeric() {
            if pending_space {
                out.push(' ');
                pending_space = false;
            }
            out.extend(ch.to_lowercase());
        }
        // punctuation and symbols are dropped entirely
    }

    out
}
