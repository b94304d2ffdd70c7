//! Title sanitization for saved media filenames.

/// Characters stripped from titles before they become filenames.
const ILLEGAL_CHARS: [char; 9] = ['\\', '/', '*', '?', ':', '"', '<', '>', '|'];

/// Maximum title length in characters after stripping.
const MAX_TITLE_CHARS: usize = 100;

/// Sanitizes an episode title for use in a filename.
///
/// Strips the characters `\ / * ? : " < > |`, truncates to 100 characters,
/// then trims surrounding whitespace, in that order. Unicode text passes
/// through untouched.
#[must_use]
pub fn sanitize_title(title: &str) -> String {
    let stripped: String = title
        .chars()
        .filter(|c| !ILLEGAL_CHARS.contains(c))
        .take(MAX_TITLE_CHARS)
        .collect();
    stripped.trim().to_string()
}
