use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::shared::forms::normalize_url;

/// Submitted "add page" form
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct PageFormDto {
    #[serde(default)]
    #[schema(example = "Official Python Tutorial")]
    #[validate(length(min = 1, max = 128, message = "Enter a title of 1 to 128 characters."))]
    pub title: String,

    /// Page address; `http://` is assumed when no scheme is given
    #[serde(default)]
    #[schema(example = "http://docs.python.org/3/tutorial/")]
    #[validate(
        length(min = 1, max = 200, message = "Enter a URL of 1 to 200 characters."),
        url(message = "Enter a valid URL.")
    )]
    pub url: String,
}

impl PageFormDto {
    /// Trim the title and give scheme-less URLs an `http://` prefix
    pub fn cleaned(self) -> Self {
        Self {
            title: self.title.trim().to_string(),
            url: normalize_url(&self.url),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cleaned_prefixes_scheme() {
        let form = PageFormDto {
            title: " Docs ".to_string(),
            url: "docs.python.org".to_string(),
        }
        .cleaned();

        assert_eq!(form.title, "Docs");
        assert_eq!(form.url, "http://docs.python.org");
        assert!(form.validate().is_ok());
    }

    #[test]
    fn test_missing_fields_are_invalid() {
        let errors = PageFormDto::default().cleaned().validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("title"));
        assert!(fields.contains_key("url"));
    }

    #[test]
    fn test_url_length_limit() {
        let form = PageFormDto {
            title: "Long".to_string(),
            url: format!("http://example.com/{}", "a".repeat(200)),
        };
        assert!(form.validate().is_err());
    }
}
