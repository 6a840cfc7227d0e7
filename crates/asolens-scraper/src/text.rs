//! Text post-processing shared by the field extractors.

use regex::Regex;

/// Maximum characters kept from an extracted description. Bounds prompt size
/// downstream.
pub(crate) const DESCRIPTION_MAX_CHARS: usize = 1000;

/// Marker appended when a description was cut at the cap.
pub(crate) const TRUNCATION_MARKER: &str = "...";

/// Strip HTML tags from a fragment and trim surrounding whitespace.
///
/// Tags are removed, not replaced, so the result equals the concatenated
/// text content of the fragment; inner whitespace is left untouched.
pub(crate) fn strip_tags(fragment: &str) -> String {
    let tags = Regex::new(r"<[^>]+>").expect("valid regex");
    tags.replace_all(fragment, "").trim().to_string()
}

/// Cut `text` to at most [`DESCRIPTION_MAX_CHARS`] characters, appending the
/// truncation marker when anything was dropped. Cuts on a char boundary.
pub(crate) fn truncate_description(text: &str) -> String {
    match text.char_indices().nth(DESCRIPTION_MAX_CHARS) {
        None => text.to_string(),
        Some((cut, _)) => {
            let mut truncated = text[..cut].to_string();
            truncated.push_str(TRUNCATION_MARKER);
            truncated
        }
    }
}
