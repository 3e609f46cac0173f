use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref STRIP_RE: Regex = Regex::new(r"[^a-z0-9_\s-]").unwrap();
    static ref SEPARATOR_RE: Regex = Regex::new(r"[-\s]+").unwrap();
}

/// Turn a human-readable name into a URL-safe identifier.
///
/// Lowercases, drops anything that is not an ASCII letter, digit, underscore,
/// hyphen or whitespace, collapses runs of hyphens/whitespace into one hyphen
/// and trims hyphens and underscores from both ends. May return an empty
/// string when the name has no usable characters.
pub fn slugify(value: &str) -> String {
    let lowered = value.to_lowercase();
    let stripped = STRIP_RE.replace_all(&lowered, "");
    let joined = SEPARATOR_RE.replace_all(stripped.trim(), "-");
    joined.trim_matches(|c| c == '-' || c == '_').to_string()
}
