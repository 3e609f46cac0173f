//! Helpers shared by the HTML form handlers.
//!
//! Validation failures are not HTTP errors here: they are collected per
//! field and handed back to the template that renders the same form again.

use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use validator::ValidationErrors;

/// Field name → error messages, in a shape templates can iterate over
#[derive(Debug, Default, Clone, Serialize)]
#[serde(transparent)]
pub struct FormErrors(BTreeMap<String, Vec<String>>);

impl FormErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.0
            .entry(field.to_string())
            .or_default()
            .push(message.into());
    }

    /// Error messages for a single field
    pub fn field(&self, field: &str) -> &[String] {
        self.0.get(field).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Merge another form's errors into this one
    pub fn extend(&mut self, other: FormErrors) {
        for (field, messages) in other.0 {
            self.0.entry(field).or_default().extend(messages);
        }
    }
}

impl From<ValidationErrors> for FormErrors {
    fn from(errors: ValidationErrors) -> Self {
        let mut form_errors = FormErrors::new();
        for (field, field_errors) in errors.field_errors() {
            for error in field_errors {
                let message = error
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("Invalid value ({})", error.code));
                form_errors.add(&field, message);
            }
        }
        form_errors
    }
}

impl fmt::Display for FormErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, messages) in &self.0 {
            if !first {
                write!(f, "; ")?;
            }
            first = false;
            write!(f, "{}: {}", field, messages.join(" "))?;
        }
        Ok(())
    }
}

/// Give a scheme-less URL the `http://` prefix; leaves `http(s)://` URLs and
/// empty input untouched.
pub fn normalize_url(url: &str) -> String {
    let trimmed = url.trim();
    let lowered = trimmed.to_ascii_lowercase();
    if trimmed.is_empty() || lowered.starts_with("http://") || lowered.starts_with("https://") {
        trimmed.to_string()
    } else {
        format!("http://{}", trimmed)
    }
}

/// Trimmed value, `None` when blank
pub fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[derive(Validate)]
    struct Sample {
        #[validate(length(min = 1, message = "This field is required."))]
        name: String,
        #[validate(url)]
        url: String,
    }

    #[test]
    fn test_from_validation_errors_keeps_messages_and_codes() {
        let sample = Sample {
            name: String::new(),
            url: "not a url".to_string(),
        };
        let errors: FormErrors = sample.validate().unwrap_err().into();

        assert_eq!(errors.field("name"), ["This field is required."]);
        assert_eq!(errors.field("url"), ["Invalid value (url)"]);
        assert!(errors.field("other").is_empty());
    }

    #[test]
    fn test_display_lists_every_field() {
        let mut errors = FormErrors::new();
        errors.add("name", "Too long.");
        errors.add("url", "Bad.");
        assert_eq!(errors.to_string(), "name: Too long.; url: Bad.");
    }

    #[test]
    fn test_extend_merges_messages() {
        let mut a = FormErrors::new();
        a.add("username", "Required.");
        let mut b = FormErrors::new();
        b.add("username", "Taken.");
        b.add("website", "Bad.");

        a.extend(b);
        assert_eq!(a.field("username"), ["Required.", "Taken."]);
        assert_eq!(a.field("website"), ["Bad."]);
    }

    #[test]
    fn test_normalize_url() {
        assert_eq!(normalize_url("www.python.org"), "http://www.python.org");
        assert_eq!(normalize_url("http://docs.python.org/"), "http://docs.python.org/");
        assert_eq!(normalize_url("HTTPS://Example.com"), "HTTPS://Example.com");
        assert_eq!(normalize_url("  example.com  "), "http://example.com");
        assert_eq!(normalize_url(""), "");
    }

    #[test]
    fn test_non_blank() {
        assert_eq!(non_blank(Some("  x ".to_string())), Some("x".to_string()));
        assert_eq!(non_blank(Some("   ".to_string())), None);
        assert_eq!(non_blank(None), None);
    }
}
