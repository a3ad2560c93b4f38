//! Section and tab id normalization

use regex::Regex;
use std::sync::OnceLock;

/// Normalize free text to a lower-kebab slug
///
/// Lowercases, turns whitespace runs into single hyphens and strips every
/// character outside `[a-z0-9-]`. Section ids double as anchor targets, so
/// the result must be URL/key-safe.
pub fn slugify(input: &str) -> String {
    static WHITESPACE: OnceLock<Regex> = OnceLock::new();
    static DISALLOWED: OnceLock<Regex> = OnceLock::new();

    let whitespace = WHITESPACE.get_or_init(|| Regex::new(r"\s+").unwrap());
    let disallowed = DISALLOWED.get_or_init(|| Regex::new(r"[^a-z0-9-]").unwrap());

    let lowered = input.trim().to_lowercase();
    let hyphenated = whitespace.replace_all(&lowered, "-");
    disallowed.replace_all(&hyphenated, "").into_owned()
}
