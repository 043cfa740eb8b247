//! Small helpers shared across the crate.

/// Truncate a string to at most `max_chars` characters.
///
/// Operates on character boundaries, so multi-byte UTF-8 content (emoji,
/// CJK, accented characters) is never split mid-codepoint.
///
/// # Examples
/// ```
/// use taskforge::util::truncate_chars;
///
/// assert_eq!(truncate_chars("hello", 10), "hello");
/// assert_eq!(truncate_chars("hello", 3), "hel");
/// assert_eq!(truncate_chars("", 5), "");
/// ```
pub fn truncate_chars(s: &str, max_chars: usize) -> &str {
    match s.char_indices().nth(max_chars) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}
