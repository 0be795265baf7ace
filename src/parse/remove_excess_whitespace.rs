use std::{borrow::Cow, sync::OnceLock};

use regex::Regex;

/// Collapses every run of whitespace into a single space and trims both ends.
pub fn remove_excess_whitespace(s: &str) -> Cow<'_, str> {
    static RE: OnceLock<Regex> = OnceLock::new();
    let re = RE.get_or_init(|| Regex::new(r"\s\s+|[^\S ]").expect("regex should be valid"));
    re.replace_all(s.trim(), " ")
}
