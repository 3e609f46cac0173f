use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Submitted "add category" form
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct CategoryFormDto {
    /// Category name, unique across the directory
    #[serde(default)]
    #[schema(example = "Python")]
    #[validate(length(min = 1, max = 128, message = "Enter a name of 1 to 128 characters."))]
    pub name: String,
}

impl CategoryFormDto {
    /// Trim surrounding whitespace before validation
    pub fn cleaned(self) -> Self {
        Self {
            name: self.name.trim().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_name_is_invalid() {
        let form = CategoryFormDto {
            name: "   ".to_string(),
        }
        .cleaned();
        assert!(form.validate().is_err());
    }

    #[test]
    fn test_name_length_limit() {
        let ok = CategoryFormDto {
            name: "a".repeat(128),
        };
        let too_long = CategoryFormDto {
            name: "a".repeat(129),
        };
        assert!(ok.validate().is_ok());
        assert!(too_long.validate().is_err());
    }
}
