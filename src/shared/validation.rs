use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Regex for slugs as produced by [`crate::shared::slug::slugify`]
    /// Lowercase alphanumerics and underscores, separated by single hyphens
    /// - Valid: "python", "other-frameworks", "snake_case-2"
    /// - Invalid: "-python", "python-", "other--frameworks", "Python", "a b"
    pub static ref SLUG_REGEX: Regex = Regex::new(r"^[a-z0-9_]+(?:-[a-z0-9_]+)*$").unwrap();

    /// Regex for validating username fields
    /// Letters, digits and @/./+/-/_ only
    /// - Valid: "john_doe", "user123", "jane.doe@home", "a+b-c"
    /// - Invalid: "", "user name", "user#1", "user/name"
    pub static ref USERNAME_REGEX: Regex = Regex::new(r"^[\w.@+-]+$").unwrap();
}
